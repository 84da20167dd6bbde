//! Error types for emission failures.
//!
//! Contract violations (mismatched inputs, unbalanced nesting) and sink
//! failures are surfaced immediately; nothing is written for a call that
//! fails its checks.

use miette::Diagnostic;
use thiserror::Error;

/// Errors produced while emitting TikZ commands.
#[derive(Error, Diagnostic, Debug)]
pub enum EmitError {
    #[error("mismatched sequence lengths: {left} vs {right}")]
    #[diagnostic(
        code(tikzgen::emit::length_mismatch),
        help("both sequences must contribute one entry per segment")
    )]
    LengthMismatch { left: usize, right: usize },

    #[error("polygon has no points")]
    #[diagnostic(code(tikzgen::emit::empty_polygon))]
    EmptyPolygon,

    #[error("scope exit without matching entry")]
    #[diagnostic(
        code(tikzgen::emit::scope_underflow),
        help("every end_scope/end_plot/footer needs a matching begin")
    )]
    ScopeUnderflow,

    #[error("unbalanced nesting: tried to close {expected}, but {found} is open")]
    #[diagnostic(code(tikzgen::emit::scope_mismatch))]
    ScopeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("picture already open")]
    #[diagnostic(
        code(tikzgen::emit::nested_picture),
        help("call footer before starting another picture")
    )]
    NestedPicture,

    #[error("write to output sink failed")]
    #[diagnostic(code(tikzgen::emit::io))]
    Io(#[from] std::io::Error),
}
