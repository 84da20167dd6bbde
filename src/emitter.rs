//! The drawing emitter.
//!
//! [`Emitter`] formats one TikZ construct per call and writes it to the
//! caller-owned sink in call order. There is no buffering or reordering:
//! the document reads in the exact order the methods were invoked. The
//! only state carried across calls is the nesting stack (which drives
//! indentation) and the standalone-document flag fixed at construction.

use std::io::Write;

use glam::DVec2;

use crate::errors::EmitError;
use crate::style::Style;

/// Fixed arrow-head spec used by [`Emitter::arrows`].
///
/// A caller-supplied `arrows` option is dropped in favour of this one;
/// see the method docs.
const ARROW_SPEC: &str = "arrows = {-Stealth[reversed, reversed]}";

/// Nesting frames tracked by the emitter.
///
/// Depth of the stack is the indentation level. Every exit operation pops
/// with a kind check, so unbalanced calls fail loudly instead of silently
/// truncating the indent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    /// `\begin{document}` .. `\end{document}` (standalone mode only)
    Document,
    /// `\begin{tikzpicture}` and its inner scope
    Picture,
    /// `\begin{scope}` .. `\end{scope}`
    Scope,
    /// `\begin{axis}` .. `\end{axis}` (pgfplots)
    Axis,
}

impl Frame {
    fn name(self) -> &'static str {
        match self {
            Frame::Document => "document",
            Frame::Picture => "picture",
            Frame::Scope => "scope",
            Frame::Axis => "axis",
        }
    }
}

/// Axis-aligned bounds for the header's clip rectangle and helper grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: DVec2,
    pub max: DVec2,
}

impl Bounds {
    /// Bounds from corner points.
    pub fn new(min: DVec2, max: DVec2) -> Self {
        Self { min, max }
    }

    /// Bounds from extents, `(xmin, xmax, ymin, ymax)` order.
    pub fn from_extents(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Self {
        Self {
            min: DVec2::new(xmin, ymin),
            max: DVec2::new(xmax, ymax),
        }
    }
}

/// Emits TikZ drawing commands to a writable sink.
///
/// The sink is owned by the caller for its entire lifetime: the emitter
/// never closes it, and any write failure propagates immediately as
/// [`EmitError::Io`]. Output is well-formed LaTeX only when every
/// `begin_*`/`end_*` and [`header`](Emitter::header)/[`footer`](Emitter::footer)
/// pair is balanced; unmatched exits are rejected before anything is
/// written.
#[derive(Debug)]
pub struct Emitter<W: Write> {
    out: W,
    standalone: bool,
    frames: Vec<Frame>,
}

impl<W: Write> Emitter<W> {
    /// Emitter for a document fragment (`\begin{tikzpicture}` .. only).
    pub fn new(out: W) -> Self {
        Self {
            out,
            standalone: false,
            frames: Vec::new(),
        }
    }

    /// Emitter for a complete compilable document: [`Emitter::header`]
    /// writes the `standalone` document-class preamble and
    /// [`Emitter::footer`] closes the document.
    pub fn standalone(out: W) -> Self {
        Self {
            out,
            standalone: true,
            frames: Vec::new(),
        }
    }

    /// Current nesting depth (0 outside any picture).
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Consume the emitter and return the sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn indent(&self) -> String {
        "\t".repeat(self.frames.len())
    }

    fn write_str(&mut self, txt: &str) -> Result<(), EmitError> {
        self.out.write_all(txt.as_bytes())?;
        Ok(())
    }

    /// Pop the top frame, which must be `expected`. Returns the new depth.
    fn pop(&mut self, expected: Frame) -> Result<usize, EmitError> {
        match self.frames.last() {
            None => Err(EmitError::ScopeUnderflow),
            Some(&top) if top == expected => {
                self.frames.pop();
                Ok(self.frames.len())
            }
            Some(&top) => Err(EmitError::ScopeMismatch {
                expected: expected.name(),
                found: top.name(),
            }),
        }
    }

    /// Open the picture: in standalone mode the document preamble first,
    /// then the `tikzpicture` environment with `style` as its option list
    /// and an inner scope. With `bounds`, a clip rectangle and a
    /// `help lines` grid covering the box are emitted into that scope.
    ///
    /// Must be balanced by exactly one [`Emitter::footer`] call.
    pub fn header(&mut self, bounds: Option<Bounds>, style: &Style) -> Result<(), EmitError> {
        if self.frames.contains(&Frame::Picture) {
            return Err(EmitError::NestedPicture);
        }
        crate::log::debug!(
            standalone = self.standalone,
            bounded = bounds.is_some(),
            "picture open"
        );
        if self.standalone {
            self.write_str(concat!(
                "\\documentclass[crop, tikz]{standalone}\n",
                "\n",
                "\\usepackage{pgfplots}\n",
                "\\pgfplotsset{compat=1.16}\n",
                "\n",
                "\\usepackage{libertine}\n",
                "\\usepackage{libertinust1math}\n",
                "\\usepackage[T1]{fontenc}\n",
                "\n",
                "\\begin{document}\n",
                "\n",
            ))?;
            self.frames.push(Frame::Document);
        }
        let indent = self.indent();
        let mut txt = String::new();
        txt.push_str(&format!("{indent}\\setlength{{\\fboxsep}}{{0pt}}%\n"));
        txt.push_str(&format!(
            "{indent}\\begin{{tikzpicture}}[{}]()\n",
            style.render()
        ));
        txt.push_str(&format!("{indent}\t\\begin{{scope}}\n"));
        self.write_str(&txt)?;
        self.frames.push(Frame::Picture);
        if let Some(bounds) = bounds {
            let indent = self.indent();
            let (min, max) = (bounds.min, bounds.max);
            let mut txt = String::new();
            txt.push_str(&format!(
                "{indent}\\clip ({}, {}) rectangle ({}, {});\n",
                min.x, min.y, max.x, max.y
            ));
            txt.push_str(&format!(
                "{indent}\\draw[help lines] ({}, {}) grid ({}, {});\n",
                min.x, min.y, max.x, max.y
            ));
            self.write_str(&txt)?;
        }
        Ok(())
    }

    /// Close the picture opened by [`Emitter::header`], and in standalone
    /// mode the surrounding document.
    pub fn footer(&mut self) -> Result<(), EmitError> {
        let depth = self.pop(Frame::Picture)?;
        crate::log::debug!("picture close");
        let indent = "\t".repeat(depth);
        let mut txt = String::new();
        txt.push_str(&format!("{indent}\t\\end{{scope}}\n"));
        txt.push_str(&format!("{indent}\\end{{tikzpicture}}%\n"));
        self.write_str(&txt)?;
        if self.standalone {
            self.pop(Frame::Document)?;
            self.write_str("\\end{document}\n")?;
        }
        Ok(())
    }

    /// Draw a closed polygon outline. The cycle wraps through the last
    /// point, so N points produce N edges.
    pub fn shape(&mut self, poly: &[DVec2], style: &Style) -> Result<(), EmitError> {
        let cycle = closed_cycle(poly)?;
        let txt = format!("{}\\draw[{}] {}\n", self.indent(), style.render(), cycle);
        self.write_str(&txt)
    }

    /// Fill a closed polygon. Same point-joining as [`Emitter::shape`].
    pub fn fill(&mut self, poly: &[DVec2], style: &Style) -> Result<(), EmitError> {
        let cycle = closed_cycle(poly)?;
        let txt = format!("{}\\fill[{}] {}\n", self.indent(), style.render(), cycle);
        self.write_str(&txt)
    }

    /// Clip all subsequent drawing in the current scope to a closed
    /// polygon (a TikZ semantic; the emitter only writes the command).
    pub fn clip(&mut self, poly: &[DVec2]) -> Result<(), EmitError> {
        let cycle = closed_cycle(poly)?;
        let txt = format!("{}\\clip {}\n", self.indent(), cycle);
        self.write_str(&txt)
    }

    /// Draw one straight segment per corresponding pair of points.
    ///
    /// Fails with [`EmitError::LengthMismatch`] before writing anything
    /// if the slices differ in length.
    pub fn lines(&mut self, from: &[DVec2], to: &[DVec2], style: &Style) -> Result<(), EmitError> {
        check_lengths(from.len(), to.len())?;
        let indent = self.indent();
        let opts = style.render();
        let mut txt = String::new();
        for (a, b) in from.iter().zip(to) {
            txt.push_str(&format!(
                "{indent}\\draw[{opts}] {} -- {};\n",
                coord(*a),
                coord(*b)
            ));
        }
        self.write_str(&txt)
    }

    /// Draw one curved double-headed arrow per corresponding pair of
    /// points, with a fixed 45° bend.
    ///
    /// The arrow-head spec is not overridable: a caller-supplied `arrows`
    /// option is dropped and the fixed `-Stealth[reversed, reversed]`
    /// spec is emitted in its place.
    pub fn arrows(&mut self, from: &[DVec2], to: &[DVec2], style: &Style) -> Result<(), EmitError> {
        check_lengths(from.len(), to.len())?;
        let indent = self.indent();
        let opts = style.without("arrows").render();
        let mut txt = String::new();
        for (a, b) in from.iter().zip(to) {
            txt.push_str(&format!(
                "{indent}\\draw[{ARROW_SPEC},{opts}] {} to [bend left=45] {};\n",
                coord(*a),
                coord(*b)
            ));
        }
        self.write_str(&txt)
    }

    /// Draw one open polyline through the points (N points, N-1 edges).
    pub fn path(&mut self, points: &[DVec2], style: &Style) -> Result<(), EmitError> {
        let txt = format!(
            "{}\\draw[{}] {}\n",
            self.indent(),
            style.render(),
            open_run(points)
        );
        self.write_str(&txt)
    }

    /// Draw one open polyline per path in the batch, each as an
    /// independent command.
    pub fn paths<P: AsRef<[DVec2]>>(&mut self, batch: &[P], style: &Style) -> Result<(), EmitError> {
        let indent = self.indent();
        let opts = style.render();
        let mut txt = String::new();
        for path in batch {
            txt.push_str(&format!("{indent}\\draw[{opts}] {}\n", open_run(path.as_ref())));
        }
        self.write_str(&txt)
    }

    /// Draw one filled circle of `radius` (in points) per coordinate,
    /// each as an independent command.
    pub fn points(&mut self, pts: &[DVec2], radius: f64, style: &Style) -> Result<(), EmitError> {
        let indent = self.indent();
        let opts = style.render();
        let mut txt = String::new();
        for p in pts {
            txt.push_str(&format!(
                "{indent}\\fill[{opts}] ({}, {}) circle ({radius}pt);\n",
                p.x, p.y
            ));
        }
        self.write_str(&txt)
    }

    /// Place a node label at a coordinate. `content` is written verbatim;
    /// the caller is responsible for LaTeX-safe text.
    pub fn text(&mut self, at: DVec2, content: &str, style: &Style) -> Result<(), EmitError> {
        let txt = format!(
            "{}\\node[{}] at ({:.2}, {:.2}) {{ {} }};\n",
            self.indent(),
            style.render(),
            at.x,
            at.y,
            content
        );
        self.write_str(&txt)
    }

    /// Open a styled `scope` environment. Must be balanced by
    /// [`Emitter::end_scope`].
    pub fn begin_scope(&mut self, style: &Style) -> Result<(), EmitError> {
        let indent = self.indent();
        let txt = format!("{indent}\n{indent}\\begin{{scope}}[{}]\n", style.render());
        self.write_str(&txt)?;
        self.frames.push(Frame::Scope);
        Ok(())
    }

    /// Close the innermost `scope` environment.
    pub fn end_scope(&mut self) -> Result<(), EmitError> {
        let depth = self.pop(Frame::Scope)?;
        let txt = format!("{}\\end{{scope}}\n", "\t".repeat(depth));
        self.write_str(&txt)
    }

    /// Open a styled pgfplots `axis` environment for [`Emitter::plot`]
    /// calls. Must be balanced by [`Emitter::end_axis`].
    pub fn begin_axis(&mut self, style: &Style) -> Result<(), EmitError> {
        let txt = format!("{}\\begin{{axis}}[{}]\n", self.indent(), style.render());
        self.write_str(&txt)?;
        self.frames.push(Frame::Axis);
        Ok(())
    }

    /// Close the innermost `axis` environment.
    pub fn end_axis(&mut self) -> Result<(), EmitError> {
        let depth = self.pop(Frame::Axis)?;
        let txt = format!("{}\\end{{axis}}\n", "\t".repeat(depth));
        self.write_str(&txt)
    }

    /// Write an `\addplot` coordinate list for equal-length sample
    /// sequences, at 5-decimal precision.
    ///
    /// Without a legend the series is marked `forget plot` (excluded from
    /// the legend); the marker is added to a derived copy of `style`, the
    /// caller's value is never touched. With a legend, an
    /// `\addlegendentry` line follows the coordinate list.
    pub fn plot(
        &mut self,
        xs: &[f64],
        ys: &[f64],
        style: &Style,
        legend: Option<&str>,
    ) -> Result<(), EmitError> {
        check_lengths(xs.len(), ys.len())?;
        crate::log::debug!(samples = xs.len(), legend = legend.is_some(), "addplot");
        let opts = if legend.is_none() {
            style.clone().with_flag("forget plot").render()
        } else {
            style.render()
        };
        let indent = self.indent();
        let mut txt = String::new();
        txt.push_str(&format!("{indent}\\addplot[{opts}] coordinates {{\n"));
        for (x, y) in xs.iter().zip(ys) {
            txt.push_str(&format!("{indent}\t({x:.5}, {y:.5})\n"));
        }
        txt.push_str(&format!("{indent}}};\n"));
        if let Some(legend) = legend {
            txt.push_str(&format!("{indent}\\addlegendentry{{{legend}}}\n"));
        }
        txt.push('\n');
        self.write_str(&txt)
    }

    /// Define a named color from RGB components in `[0, 1]`. Components
    /// are passed through verbatim, without range validation.
    pub fn define_color(&mut self, name: &str, r: f64, g: f64, b: f64) -> Result<(), EmitError> {
        if [r, g, b].iter().any(|c| !(0.0..=1.0).contains(c)) {
            crate::log::warn!(name, r, g, b, "rgb components outside [0, 1]");
        }
        let txt = format!("{}\\definecolor{{{name}}}{{rgb}}{{{r},{g},{b}}}\n", self.indent());
        self.write_str(&txt)
    }

    /// Escape hatch: write the current indent followed by `cmd` verbatim.
    /// No trailing newline is added and no validation is performed.
    pub fn raw(&mut self, cmd: &str) -> Result<(), EmitError> {
        let txt = format!("{}{cmd}", self.indent());
        self.write_str(&txt)
    }
}

/// `(x, y)` at 2-decimal precision, the shape/line/path coordinate format.
fn coord(p: DVec2) -> String {
    format!("({:.2}, {:.2})", p.x, p.y)
}

/// Closed point cycle: starts at the last point, runs through index 0 to
/// the last index, ` -- `-joined and `;`-terminated. N points, N edges.
fn closed_cycle(points: &[DVec2]) -> Result<String, EmitError> {
    let last = points.last().ok_or(EmitError::EmptyPolygon)?;
    let mut txt = coord(*last);
    for p in points {
        txt.push_str(" -- ");
        txt.push_str(&coord(*p));
    }
    txt.push(';');
    Ok(txt)
}

/// Open point run: ` -- `-joined, not closed, `;`-terminated.
fn open_run(points: &[DVec2]) -> String {
    let mut txt = String::new();
    for (k, p) in points.iter().enumerate() {
        txt.push_str(&coord(*p));
        if k + 1 < points.len() {
            txt.push_str(" -- ");
        }
    }
    txt.push(';');
    txt
}

fn check_lengths(left: usize, right: usize) -> Result<(), EmitError> {
    if left != right {
        return Err(EmitError::LengthMismatch { left, right });
    }
    Ok(())
}
