// src/planner.rs

use crate::error::{AutoLoadError, Result};
use crate::imports::ImportTable;
use crate::model::{PageReference, RewritePlan};
use crate::resolver::{PagePathResolver, Resolution};

/// Decides, for every scanned reference, whether to leave it alone or to
/// generate a lazy loader for it.
///
/// A name with an existing import binding is always `Skip`; the import and
/// the route element stay untouched. Everything else must resolve to exactly
/// one file under the pages directory, and the first reference that does not
/// aborts the whole transform. Partial rewrites are never produced: a route
/// table with one bad reference is broken, and shipping the rest of it
/// silently would hide that.
pub fn plan(
    references: &[PageReference],
    imports: &ImportTable,
    resolver: &PagePathResolver,
) -> Result<Vec<RewritePlan>> {
    let mut plans = Vec::with_capacity(references.len());

    for reference in references {
        if imports.contains(&reference.name) {
            tracing::debug!(page = %reference.name, "already imported, skipping");
            plans.push(RewritePlan::Skip);
            continue;
        }
        match resolver.resolve(&reference.name)? {
            Resolution::Found(entry) => {
                tracing::debug!(page = %reference.name, specifier = %entry.specifier, "planned loader");
                plans.push(RewritePlan::GenerateLoader(entry));
            }
            Resolution::NotFound => {
                return Err(AutoLoadError::UnresolvedPage {
                    page: reference.name.clone(),
                    file: reference.source_file.clone(),
                    line: reference.line,
                    column: reference.column,
                });
            }
            Resolution::Ambiguous(candidates) => {
                return Err(AutoLoadError::AmbiguousPage {
                    page: reference.name.clone(),
                    candidates,
                });
            }
        }
    }

    Ok(plans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imports::ImportTable;
    use crate::scanner::scan;
    use crate::transform::parse_source;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn plan_src(src: &str, pages: &Path) -> Result<Vec<RewritePlan>> {
        let routes = pages.parent().unwrap().join("Routes.js");
        let (cm, module) = parse_source(src, &routes).unwrap();
        let imports = ImportTable::build(&module);
        let references = scan(&module, &cm, &routes);
        let resolver = PagePathResolver::new(pages, routes.parent().unwrap());
        plan(&references, &imports, &resolver)
    }

    fn pages_with(tmp: &TempDir, files: &[&str]) -> std::path::PathBuf {
        let pages = tmp.path().join("pages");
        for file in files {
            let path = pages.join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "export default () => null\n").unwrap();
        }
        pages
    }

    const ROUTES: &str = "const Routes = () => (\n\
        <Router>\n\
        <Route path=\"/\" page={HomePage} name=\"home\" />\n\
        <Route path=\"/foo\" page={FooPage} name=\"foo\" />\n\
        </Router>\n\
        )\n";

    #[test]
    fn imported_names_are_skipped_and_unimported_resolved() {
        let tmp = TempDir::new().unwrap();
        let pages = pages_with(&tmp, &["HomePage/HomePage.js"]);

        let src = format!("import FooPage from 'src/pages/FooPage'\n{ROUTES}");
        let plans = plan_src(&src, &pages).unwrap();

        assert_eq!(plans.len(), 2);
        assert!(plans[0].is_generate());
        assert!(matches!(plans[1], RewritePlan::Skip));
    }

    #[test]
    fn unresolved_reference_aborts_with_location() {
        let tmp = TempDir::new().unwrap();
        let pages = pages_with(&tmp, &["HomePage/HomePage.js"]);

        let err = plan_src(ROUTES, &pages).unwrap_err();
        match err {
            AutoLoadError::UnresolvedPage { page, line, .. } => {
                assert_eq!(page, "FooPage");
                assert_eq!(line, 4);
            }
            other => panic!("expected UnresolvedPage, got {other}"),
        }
    }

    #[test]
    fn ambiguous_reference_reports_all_candidates() {
        let tmp = TempDir::new().unwrap();
        let pages = pages_with(
            &tmp,
            &["HomePage/HomePage.js", "FooPage/FooPage.js", "FooPage.js"],
        );

        let err = plan_src(ROUTES, &pages).unwrap_err();
        match err {
            AutoLoadError::AmbiguousPage { page, candidates } => {
                assert_eq!(page, "FooPage");
                assert_eq!(candidates.len(), 2);
            }
            other => panic!("expected AmbiguousPage, got {other}"),
        }
    }

    #[test]
    fn planning_is_deterministic() {
        let tmp = TempDir::new().unwrap();
        let pages = pages_with(&tmp, &["HomePage/HomePage.js", "FooPage.jsx"]);

        let first = plan_src(ROUTES, &pages).unwrap();
        let second = plan_src(ROUTES, &pages).unwrap();
        assert_eq!(format!("{first:?}"), format!("{second:?}"));
    }
}
