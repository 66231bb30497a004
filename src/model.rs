// src/model.rs

use serde::Serialize;
use std::path::PathBuf;

/// How an existing import binds its local name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    Default,
    Named,
    Namespace,
}

/// One local name bound by a top-level import declaration.
#[derive(Debug, Clone)]
pub struct ImportBinding {
    /// The local identifier the import introduces.
    pub local: String,
    /// The module specifier it was imported from.
    pub source: String,
    pub kind: ImportKind,
}

/// Where a page reference was found inside the route markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefContext {
    /// `<Route page={SomePage} .../>`
    PageAttr,
    /// `<SomePage />` used as an element tag inside the router markup.
    ElementTag,
}

/// A single occurrence of a page name found while scanning the tree.
///
/// Produced in document order and consumed immediately by the planner;
/// the location fields only exist for diagnostics.
#[derive(Debug, Clone)]
pub struct PageReference {
    pub name: String,
    pub context: RefContext,
    /// Routing file the reference was found in.
    pub source_file: PathBuf,
    /// 1-indexed position of the identifier.
    pub line: usize,
    pub column: usize,
}

/// A page name successfully resolved against the pages directory.
#[derive(Debug, Clone, Serialize)]
pub struct PageManifestEntry {
    /// Logical page name, identical to the component identifier.
    pub name: String,
    /// Relative module specifier the generated loader will import.
    pub specifier: String,
    /// Absolute path of the matched file, kept for collision reports.
    pub path: PathBuf,
}

/// The planner's verdict for one [`PageReference`].
#[derive(Debug, Clone)]
pub enum RewritePlan {
    /// The name is already bound by an existing import; leave everything
    /// about this reference untouched.
    Skip,
    /// Emit a lazy-loader declaration for the resolved page.
    GenerateLoader(PageManifestEntry),
}

impl RewritePlan {
    pub fn is_generate(&self) -> bool {
        matches!(self, RewritePlan::GenerateLoader(_))
    }
}

/// Result of one whole-file transform, including the loaders that were
/// generated so the CLI can report them.
#[derive(Debug, Serialize)]
pub struct TransformOutput {
    /// Rewritten source text (byte-identical to the input when no loader
    /// was generated).
    pub code: String,
    /// Generated loaders in first-reference order, one entry per page name.
    pub loaders: Vec<PageManifestEntry>,
}
