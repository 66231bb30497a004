// src/error.rs

//! Error types for the routes auto-loader.
//!
//! Every failure is fatal for the invocation that raised it: the transform
//! either rewrites a file completely or produces no output at all. Recovery
//! (re-running after the developer fixes a route) is the caller's business.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutoLoadError {
    /// A route references a page with no match under the pages directory.
    #[error(
        "cannot resolve page `{page}` under the pages directory \
         (referenced at {file:?}:{line}:{column})"
    )]
    UnresolvedPage {
        page: String,
        file: PathBuf,
        line: usize,
        column: usize,
    },

    /// More than one file under the pages directory matches a page name.
    /// Rename one of the candidates, or add an explicit import.
    #[error("page `{page}` matches more than one candidate: {candidates:?}")]
    AmbiguousPage {
        page: String,
        candidates: Vec<PathBuf>,
    },

    /// The routing file could not be parsed. Propagated from the parser,
    /// never produced by the engine itself.
    #[error("parse error in {file:?}: {message}")]
    Parse { file: PathBuf, message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The printer produced a non-UTF-8 buffer. Should not happen with the
    /// writer configuration this crate uses.
    #[error("emitted source is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, AutoLoadError>;
