// src/emitter.rs

use swc_common::{sync::Lrc, SourceMap, DUMMY_SP};
use swc_ecma_ast::{Module, ModuleDecl, ModuleItem};

use crate::error::Result;
use crate::transform::print_module;

/// Merges the generated declarations into the source text.
///
/// Only the declaration block goes through the printer; everything the
/// developer wrote is carried over byte-for-byte from `source_text`. The
/// block lands on its own lines directly after the last top-level import
/// (at the very top of the file when there are none). The reference sites
/// themselves need no edit: each generated constant binds the exact
/// identifier the route markup already uses, so inserting the block is the
/// only change between input and output.
pub fn emit(
    source_text: &str,
    cm: &Lrc<SourceMap>,
    module: &Module,
    decls: Vec<ModuleItem>,
) -> Result<String> {
    let block = Module {
        span: DUMMY_SP,
        body: decls,
        shebang: None,
    };
    let mut decl_text = print_module(cm, &block)?;
    if !decl_text.ends_with('\n') {
        decl_text.push('\n');
    }

    let offset = insertion_offset(source_text, cm, module);

    let mut out = String::with_capacity(source_text.len() + decl_text.len() + 1);
    out.push_str(&source_text[..offset]);
    if offset > 0 && !out.ends_with('\n') {
        // Last import sits at end-of-file without a trailing newline.
        out.push('\n');
    }
    out.push_str(&decl_text);
    out.push_str(&source_text[offset..]);
    Ok(out)
}

/// Byte offset just past the line holding the last top-level import
/// declaration, or 0 when the file has no imports.
fn insertion_offset(source_text: &str, cm: &Lrc<SourceMap>, module: &Module) -> usize {
    let last_import_end = module.body.iter().rev().find_map(|item| match item {
        ModuleItem::ModuleDecl(ModuleDecl::Import(import)) => Some(import.span.hi),
        _ => None,
    });
    let Some(hi) = last_import_end else {
        return 0;
    };

    let mut offset = cm.lookup_byte_offset(hi).pos.0 as usize;
    let bytes = source_text.as_bytes();
    while offset < bytes.len() && bytes[offset] != b'\n' {
        offset += 1;
    }
    if offset < bytes.len() {
        offset += 1; // step past the newline itself
    }
    offset
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen;
    use crate::model::{PageManifestEntry, RewritePlan};
    use crate::transform::parse_source;
    use std::path::{Path, PathBuf};

    fn loader_plan(name: &str) -> RewritePlan {
        RewritePlan::GenerateLoader(PageManifestEntry {
            name: name.to_string(),
            specifier: format!("./pages/{name}/{name}"),
            path: PathBuf::from(format!("/web/src/pages/{name}/{name}.js")),
        })
    }

    fn emit_with(src: &str, names: &[&str]) -> String {
        let (cm, module) = parse_source(src, Path::new("Routes.js")).unwrap();
        let plans: Vec<_> = names.iter().map(|n| loader_plan(n)).collect();
        let generated = codegen::generate(&plans);
        emit(src, &cm, &module, generated.decls).unwrap()
    }

    #[test]
    fn declaration_block_lands_after_the_last_import_line() {
        let src = "import { Router, Route } from '@framework/router'\n\
                   import FooPage from 'src/pages/FooPage'\n\
                   const Routes = () => null\n";
        let out = emit_with(src, &["HomePage"]);

        assert!(out.starts_with(
            "import { Router, Route } from '@framework/router'\n\
             import FooPage from 'src/pages/FooPage'\n\
             const HomePage = {"
        ));
        assert!(out.ends_with("const Routes = () => null\n"));
    }

    #[test]
    fn files_without_imports_get_the_block_first() {
        let src = "const Routes = () => null\n";
        let out = emit_with(src, &["HomePage"]);

        assert!(out.starts_with("const HomePage = {"));
        assert!(out.ends_with("const Routes = () => null\n"));
    }

    #[test]
    fn import_at_end_of_file_stays_intact() {
        let src = "import FooPage from 'src/pages/FooPage'";
        let out = emit_with(src, &["HomePage"]);

        assert!(out.starts_with("import FooPage from 'src/pages/FooPage'\nconst HomePage = {"));
    }

    #[test]
    fn everything_outside_the_inserted_block_is_byte_identical() {
        let src = "import FooPage from 'src/pages/FooPage'\n\
                   \n\
                   const Routes = () => (\n\
                   <Router>\n\
                   <Route path=\"/\" page={HomePage} name=\"home\" />\n\
                   </Router>\n\
                   )\n";
        let out = emit_with(src, &["HomePage"]);

        let prefix = "import FooPage from 'src/pages/FooPage'\n";
        let suffix = &src[prefix.len()..];
        assert!(out.starts_with(prefix));
        assert!(out.ends_with(suffix));
        // The inserted block is the only difference.
        let inserted = &out[prefix.len()..out.len() - suffix.len()];
        assert!(inserted.starts_with("const HomePage = {"));
        assert!(inserted.contains("import(\"./pages/HomePage/HomePage\")"));
    }
}
