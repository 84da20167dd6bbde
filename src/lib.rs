//! TikZ/PGF drawing-command generation from numeric coordinate data.
//!
//! `tikzgen` turns polygons, paths, point sets, plot samples, and text
//! labels into TikZ (LaTeX) drawing commands, written in call order to a
//! caller-owned sink. It is the text-emission half of a figure pipeline:
//! the caller computes geometry, the emitter formats it. Nothing is
//! buffered or reordered, and the sink is never closed by the emitter.
//!
//! ```
//! use glam::dvec2;
//! use tikzgen::{Emitter, Style};
//!
//! let mut out = Vec::new();
//! let mut tikz = Emitter::new(&mut out);
//! tikz.header(None, &Style::new())?;
//! tikz.shape(
//!     &[dvec2(0.0, 0.0), dvec2(1.0, 0.0), dvec2(0.0, 1.0)],
//!     &Style::new().with("fill", "red!40!white").with("fill opacity", "0.2"),
//! )?;
//! tikz.footer()?;
//! assert!(String::from_utf8(out)?.contains("\\begin{tikzpicture}"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod emitter;
pub mod errors;
pub mod log;
pub mod style;

pub use emitter::{Bounds, Emitter};
pub use errors::EmitError;
pub use style::Style;

/// Run `f` against an emitter over an in-memory buffer and return the
/// accumulated text. `standalone` selects a complete compilable document
/// versus a fragment for inclusion elsewhere.
///
/// ```
/// use tikzgen::{emit_to_string, Style};
///
/// let doc = emit_to_string(true, |tikz| {
///     tikz.header(None, &Style::new())?;
///     tikz.footer()
/// })?;
/// assert!(doc.starts_with("\\documentclass"));
/// # Ok::<(), tikzgen::EmitError>(())
/// ```
pub fn emit_to_string<F>(standalone: bool, f: F) -> Result<String, EmitError>
where
    F: FnOnce(&mut Emitter<&mut Vec<u8>>) -> Result<(), EmitError>,
{
    let mut buf = Vec::new();
    let mut tikz = if standalone {
        Emitter::standalone(&mut buf)
    } else {
        Emitter::new(&mut buf)
    };
    f(&mut tikz)?;
    Ok(String::from_utf8(buf).expect("emitted text is always UTF-8"))
}
