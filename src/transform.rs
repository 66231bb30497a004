// src/transform.rs

//! Whole-file transform: parse, scan, plan, generate, emit, print.
//!
//! One invocation is a pure function of the source text and the pages
//! directory contents. Nothing is cached across calls and the stages run
//! strictly in order; the first planner error aborts before anything is
//! emitted.

use std::path::Path;

use swc_common::{sync::Lrc, FileName, SourceMap};
use swc_ecma_ast::Module;
use swc_ecma_codegen::text_writer::JsWriter;
use swc_ecma_codegen::Emitter;
use swc_ecma_parser::{lexer::Lexer, EsConfig, Parser as SwcParser, StringInput, Syntax, TsConfig};

use crate::codegen;
use crate::emitter;
use crate::error::{AutoLoadError, Result};
use crate::imports::ImportTable;
use crate::model::{RewritePlan, TransformOutput};
use crate::planner;
use crate::resolver::PagePathResolver;
use crate::scanner;

/// Rewrites a routing file so that every page referenced without an explicit
/// import becomes a lazy-loader constant. Returns the rewritten source text.
///
/// `file_path` is where `source_text` came from (used for specifiers and
/// diagnostics, never read); `pages_dir` is the conventional pages root the
/// caller discovered. The rewrite never reprints the developer's code: the
/// output is the input text with the generated declaration block spliced in
/// after the last import, so existing imports, route markup and formatting
/// survive byte-for-byte, and when there is nothing to generate the input
/// comes back unchanged. Running the transform over its own output is
/// always a no-op.
pub fn transform(source_text: &str, file_path: &Path, pages_dir: &Path) -> Result<String> {
    transform_detailed(source_text, file_path, pages_dir).map(|out| out.code)
}

/// Same as [`transform`], additionally reporting which loaders were
/// generated.
pub fn transform_detailed(
    source_text: &str,
    file_path: &Path,
    pages_dir: &Path,
) -> Result<TransformOutput> {
    let (cm, module) = parse_source(source_text, file_path)?;

    let imports = ImportTable::build(&module);
    let references = scanner::scan(&module, &cm, file_path);

    let importer_dir = file_path.parent().unwrap_or_else(|| Path::new("."));
    let resolver = PagePathResolver::new(pages_dir, importer_dir);
    let plans = planner::plan(&references, &imports, &resolver)?;

    if !plans.iter().any(RewritePlan::is_generate) {
        tracing::debug!(file = %file_path.display(), "nothing to generate, source untouched");
        return Ok(TransformOutput {
            code: source_text.to_string(),
            loaders: Vec::new(),
        });
    }

    let codegen::Generated { decls, loaders } = codegen::generate(&plans);
    let code = emitter::emit(source_text, &cm, &module, decls)?;

    tracing::debug!(file = %file_path.display(), loaders = loaders.len(), "rewrote routing file");
    Ok(TransformOutput { code, loaders })
}

/// Parses a routing source file. The syntax is picked from the extension:
/// `.ts`/`.tsx` parse as TypeScript, everything else as ECMAScript with JSX.
pub(crate) fn parse_source(source: &str, file_path: &Path) -> Result<(Lrc<SourceMap>, Module)> {
    let cm: Lrc<SourceMap> = Default::default();
    let fm = cm.new_source_file(FileName::Real(file_path.to_path_buf()), source.to_string());

    let syntax = match file_path.extension().and_then(|e| e.to_str()) {
        Some(ext @ ("ts" | "tsx")) => Syntax::Typescript(TsConfig {
            tsx: ext == "tsx",
            ..Default::default()
        }),
        _ => Syntax::Es(EsConfig {
            jsx: true,
            ..Default::default()
        }),
    };

    let lexer = Lexer::new(
        syntax,
        Default::default(), // es version
        StringInput::from(&*fm),
        None,
    );
    let mut parser = SwcParser::new_from(lexer);

    let module = parser.parse_module().map_err(|e| AutoLoadError::Parse {
        file: file_path.to_path_buf(),
        message: format!("{e:?}"),
    })?;

    Ok((cm, module))
}

/// Prints a module through swc's codegen. Only generated declaration
/// fragments go through here; the developer's own text is spliced, not
/// reprinted.
pub(crate) fn print_module(cm: &Lrc<SourceMap>, module: &Module) -> Result<String> {
    let mut buf = Vec::new();
    {
        let mut emitter = Emitter {
            cfg: swc_ecma_codegen::Config::default(),
            cm: cm.clone(),
            comments: None,
            wr: JsWriter::new(cm.clone(), "\n", &mut buf, None),
        };
        emitter.emit_module(module)?;
    }
    Ok(String::from_utf8(buf)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_source_is_a_parse_error() {
        let err = parse_source("const = <<<", Path::new("Routes.js")).err().unwrap();
        assert!(matches!(err, AutoLoadError::Parse { .. }));
    }

    #[test]
    fn typescript_routing_files_parse() {
        let src = "import type { RouteProps } from './types'\n\
                   const Routes = () => (\n\
                   <Router>\n\
                   <Route path=\"/\" page={HomePage} name=\"home\" />\n\
                   </Router>\n\
                   )\n";
        assert!(parse_source(src, Path::new("Routes.tsx")).is_ok());
    }

    #[test]
    fn printing_preserves_existing_string_raw_form() {
        let src = "import FooPage from 'src/pages/FooPage'\n";
        let (cm, module) = parse_source(src, Path::new("Routes.js")).unwrap();
        let out = print_module(&cm, &module).unwrap();
        assert!(out.contains("'src/pages/FooPage'"));
    }
}
