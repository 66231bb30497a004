// src/resolver.rs

use path_absolutize::Absolutize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::model::PageManifestEntry;

/// Extensions a page source file may carry.
pub const PAGE_EXTENSIONS: [&str; 4] = ["js", "jsx", "ts", "tsx"];

/// Outcome of resolving one page name against the pages directory.
#[derive(Debug)]
pub enum Resolution {
    /// No candidate exists. Always a configuration error upstream.
    NotFound,
    Found(PageManifestEntry),
    /// More than one structurally valid candidate. The engine never picks
    /// one; all candidates are reported so the developer can disambiguate.
    Ambiguous(Vec<PathBuf>),
}

/// Resolves page component names against the conventional pages directory.
///
/// For a page `Name` the resolver accepts the nested form
/// `pages/Name/Name.<ext>` and the flat form `pages/Name.<ext>`, with exact
/// case-sensitive matching on the name. All state is handed in explicitly;
/// nothing is cached across invocations.
pub struct PagePathResolver {
    pages_dir: PathBuf,
    /// Directory of the routing file, base for generated specifiers.
    importer_dir: PathBuf,
}

impl PagePathResolver {
    pub fn new(pages_dir: &Path, importer_dir: &Path) -> Self {
        PagePathResolver {
            pages_dir: pages_dir.to_path_buf(),
            importer_dir: importer_dir.to_path_buf(),
        }
    }

    pub fn resolve(&self, page_name: &str) -> Result<Resolution> {
        let mut candidates: Vec<PathBuf> = Vec::new();

        // Nested form: pages/<Name>/<Name>.<ext>
        let nested_dir = self.pages_dir.join(page_name);
        collect_matches(&nested_dir, page_name, &mut candidates)?;

        // Flat form: pages/<Name>.<ext>
        collect_matches(&self.pages_dir, page_name, &mut candidates)?;

        // Directory iteration order is not deterministic; sort so repeated
        // runs always see candidates the same way.
        candidates.sort();
        candidates.dedup();

        tracing::debug!(page = page_name, candidates = candidates.len(), "resolved page name");

        if candidates.is_empty() {
            return Ok(Resolution::NotFound);
        }
        if candidates.len() > 1 {
            return Ok(Resolution::Ambiguous(candidates));
        }
        let path = candidates.remove(0);
        let specifier = self.specifier_for(&path)?;
        Ok(Resolution::Found(PageManifestEntry {
            name: page_name.to_string(),
            specifier,
            path,
        }))
    }

    /// Module specifier for a candidate: the path from the routing file's
    /// directory to the candidate, extension stripped, `/`-separated.
    fn specifier_for(&self, candidate: &Path) -> Result<String> {
        let target = candidate.with_extension("");
        let target = target.absolutize()?.to_path_buf();
        let base = self.importer_dir.absolutize()?.to_path_buf();

        let base_parts: Vec<_> = base.components().collect();
        let target_parts: Vec<_> = target.components().collect();
        let common = base_parts
            .iter()
            .zip(target_parts.iter())
            .take_while(|(a, b)| a == b)
            .count();

        let mut segments: Vec<String> = Vec::new();
        for _ in common..base_parts.len() {
            segments.push("..".to_string());
        }
        for part in &target_parts[common..] {
            segments.push(part.as_os_str().to_string_lossy().into_owned());
        }

        let joined = segments.join("/");
        if joined.starts_with("..") {
            Ok(joined)
        } else {
            Ok(format!("./{joined}"))
        }
    }
}

/// Pushes every file in `dir` whose stem equals `name` and whose extension
/// is a recognized page extension, as an absolute path.
fn collect_matches(dir: &Path, name: &str, out: &mut Vec<PathBuf>) -> Result<()> {
    if !dir.is_dir() {
        return Ok(());
    }
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let stem_matches = path
            .file_stem()
            .and_then(|s| s.to_str())
            .is_some_and(|s| s == name);
        let ext_matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| PAGE_EXTENSIONS.contains(&e));
        if stem_matches && ext_matches {
            out.push(path.absolutize()?.to_path_buf());
        }
    }
    Ok(())
}
