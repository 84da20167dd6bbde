//! Whole-document emission tests.
//!
//! Unit tests in `src/` pin down individual command formats; these cover
//! complete documents and the interaction between nesting and content.

use glam::dvec2;
use insta::assert_snapshot;
use tikzgen::{emit_to_string, Bounds, Emitter, Style};

fn triangle() -> Vec<glam::DVec2> {
    vec![dvec2(0.0, 0.0), dvec2(1.0, 0.0), dvec2(0.0, 1.0)]
}

#[test]
fn standalone_document() {
    let doc = emit_to_string(true, |tikz| {
        tikz.header(None, &Style::new())?;
        tikz.shape(&triangle(), &Style::new().with("fill", "red"))?;
        tikz.footer()
    })
    .unwrap();

    assert_snapshot!(doc, @r"
    \documentclass[crop, tikz]{standalone}

    \usepackage{pgfplots}
    \pgfplotsset{compat=1.16}

    \usepackage{libertine}
    \usepackage{libertinust1math}
    \usepackage[T1]{fontenc}

    \begin{document}

    	\setlength{\fboxsep}{0pt}%
    	\begin{tikzpicture}[]()
    		\begin{scope}
    		\draw[fill=red,] (0.00, 1.00) -- (0.00, 0.00) -- (1.00, 0.00) -- (0.00, 1.00);
    		\end{scope}
    	\end{tikzpicture}%
    \end{document}
    ");
}

#[test]
fn fragment_with_grid_colors_and_plots() {
    let doc = emit_to_string(false, |tikz| {
        tikz.header(
            Some(Bounds::from_extents(-1.0, 5.0, -1.0, 2.0)),
            &Style::new().with("scale", "1.5"),
        )?;
        tikz.define_color("series", 0.2, 0.4, 0.8)?;
        tikz.path(
            &[dvec2(0.0, 0.0), dvec2(1.0, 1.0), dvec2(2.0, 0.5)],
            &Style::new(),
        )?;
        tikz.begin_axis(&Style::new().with("xlabel", "$t$"))?;
        tikz.plot(
            &[0.0, 1.0, 2.0],
            &[0.0, 1.0, 4.0],
            &Style::new().with("color", "series"),
            Some("quadratic"),
        )?;
        tikz.plot(&[0.0, 1.0, 2.0], &[0.0, 0.5, 1.0], &Style::new(), None)?;
        tikz.end_axis()?;
        tikz.footer()
    })
    .unwrap();

    assert_snapshot!(doc, @r"
    \setlength{\fboxsep}{0pt}%
    \begin{tikzpicture}[scale=1.5,]()
    	\begin{scope}
    	\clip (-1, -1) rectangle (5, 2);
    	\draw[help lines] (-1, -1) grid (5, 2);
    	\definecolor{series}{rgb}{0.2,0.4,0.8}
    	\draw[] (0.00, 0.00) -- (1.00, 1.00) -- (2.00, 0.50);
    	\begin{axis}[xlabel=$t$,]
    		\addplot[color=series,] coordinates {
    			(0.00000, 0.00000)
    			(1.00000, 1.00000)
    			(2.00000, 4.00000)
    		};
    		\addlegendentry{quadratic}

    		\addplot[forget plot,] coordinates {
    			(0.00000, 0.00000)
    			(1.00000, 0.50000)
    			(2.00000, 1.00000)
    		};

    	\end{axis}
    	\end{scope}
    \end{tikzpicture}%
    ");
}

#[test]
fn clip_limits_following_content_in_scope() {
    let doc = emit_to_string(false, |tikz| {
        tikz.header(None, &Style::new())?;
        tikz.begin_scope(&Style::new())?;
        tikz.clip(&[
            dvec2(0.0, 0.0),
            dvec2(4.0, 0.0),
            dvec2(4.0, 3.0),
            dvec2(0.0, 3.0),
        ])?;
        tikz.fill(&triangle(), &Style::new().with("color", "green"))?;
        tikz.end_scope()?;
        tikz.footer()
    })
    .unwrap();

    // The clip command precedes the fill inside the same scope.
    let clip_at = doc.find("\\clip ").unwrap();
    let fill_at = doc.find("\\fill[").unwrap();
    assert!(clip_at < fill_at);
    let scope_open = doc.find("\\begin{scope}[]").unwrap();
    assert!(scope_open < clip_at);
}

#[test]
fn plot_samples_are_five_decimal() {
    let doc = emit_to_string(false, |tikz| {
        tikz.plot(&[0.0, 1.0, 2.0], &[0.0, 1.0, 4.0], &Style::new(), None)
    })
    .unwrap();

    assert_eq!(doc.matches(", ").count(), 3);
    for line in doc.lines().filter(|l| l.trim_start().starts_with('(')) {
        // (x.xxxxx, y.yyyyy)
        let (x, y) = line.trim().trim_matches(['(', ')']).split_once(", ").unwrap();
        assert_eq!(x.split('.').nth(1).unwrap().len(), 5);
        assert_eq!(y.split('.').nth(1).unwrap().len(), 5);
    }
    assert!(doc.contains("forget plot"));
    assert!(!doc.contains("\\addlegendentry"));
}

#[test]
fn emitters_are_independent() {
    // Two emitters never share nesting state.
    let mut a = Emitter::new(Vec::new());
    let mut b = Emitter::new(Vec::new());
    a.begin_scope(&Style::new()).unwrap();
    assert_eq!(a.depth(), 1);
    assert_eq!(b.depth(), 0);
    assert!(b.end_scope().is_err());
    a.end_scope().unwrap();
}

#[test]
fn sequential_pictures_reuse_one_emitter() {
    let doc = emit_to_string(false, |tikz| {
        tikz.header(None, &Style::new())?;
        tikz.footer()?;
        tikz.header(None, &Style::new())?;
        tikz.footer()
    })
    .unwrap();
    assert_eq!(doc.matches("\\begin{tikzpicture}").count(), 2);
    assert_eq!(doc.matches("\\end{tikzpicture}%").count(), 2);
}
