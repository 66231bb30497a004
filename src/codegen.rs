// src/codegen.rs

use std::collections::HashSet;

use swc_common::DUMMY_SP;
use swc_ecma_ast::*;

use crate::model::{PageManifestEntry, RewritePlan};

/// Everything the emitter needs to merge the rewrite into the file.
pub struct Generated {
    /// Loader declarations, one per distinct page name, in first-reference
    /// order. Each generated constant carries the same identifier the route
    /// already uses, so the reference sites themselves need no edit.
    pub decls: Vec<ModuleItem>,
    /// The manifest entries a declaration was generated for.
    pub loaders: Vec<PageManifestEntry>,
}

/// Turns `GenerateLoader` plans into declaration fragments.
///
/// Two plans for the same page name collapse into a single declaration; the
/// seen-name set keyed by page name is what enforces the at-most-one-binding
/// invariant.
pub fn generate(plans: &[RewritePlan]) -> Generated {
    let mut generated = Generated {
        decls: Vec::new(),
        loaders: Vec::new(),
    };
    let mut seen: HashSet<String> = HashSet::new();

    for plan in plans {
        let RewritePlan::GenerateLoader(entry) = plan else {
            continue;
        };
        if !seen.insert(entry.name.clone()) {
            continue;
        }
        generated.decls.push(loader_decl(&entry.name, &entry.specifier));
        generated.loaders.push(entry.clone());
    }

    tracing::debug!(count = generated.decls.len(), "generated loader declarations");
    generated
}

/// `const <name> = { name: "<name>", loader: () => import("<specifier>") };`
///
/// The two-field object is the bundler-facing contract: `loader` is a
/// zero-argument arrow so the dynamic import stays deferred until a visit
/// actually needs the page.
fn loader_decl(name: &str, specifier: &str) -> ModuleItem {
    let loader = Expr::Arrow(ArrowExpr {
        span: DUMMY_SP,
        params: vec![],
        body: Box::new(BlockStmtOrExpr::Expr(Box::new(Expr::Call(CallExpr {
            span: DUMMY_SP,
            callee: Callee::Import(Import { span: DUMMY_SP }),
            args: vec![ExprOrSpread {
                spread: None,
                expr: Box::new(str_lit(specifier)),
            }],
            type_args: None,
        })))),
        is_async: false,
        is_generator: false,
        type_params: None,
        return_type: None,
    });

    let descriptor = Expr::Object(ObjectLit {
        span: DUMMY_SP,
        props: vec![key_value("name", str_lit(name)), key_value("loader", loader)],
    });

    ModuleItem::Stmt(Stmt::Decl(Decl::Var(Box::new(VarDecl {
        span: DUMMY_SP,
        kind: VarDeclKind::Const,
        declare: false,
        decls: vec![VarDeclarator {
            span: DUMMY_SP,
            name: Pat::Ident(BindingIdent {
                id: Ident::new(name.into(), DUMMY_SP),
                type_ann: None,
            }),
            init: Some(Box::new(descriptor)),
            definite: false,
        }],
    }))))
}

fn key_value(key: &str, value: Expr) -> PropOrSpread {
    PropOrSpread::Prop(Box::new(Prop::KeyValue(KeyValueProp {
        key: PropName::Ident(Ident::new(key.into(), DUMMY_SP)),
        value: Box::new(value),
    })))
}

fn str_lit(value: &str) -> Expr {
    // raw: None makes the printer emit a plain double-quoted literal.
    Expr::Lit(Lit::Str(Str {
        span: DUMMY_SP,
        value: value.into(),
        raw: None,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::print_module;
    use std::path::PathBuf;
    use swc_common::{sync::Lrc, SourceMap};

    fn entry(name: &str, specifier: &str) -> PageManifestEntry {
        PageManifestEntry {
            name: name.to_string(),
            specifier: specifier.to_string(),
            path: PathBuf::from(format!("/web/src/pages/{name}/{name}.js")),
        }
    }

    fn print_decls(decls: Vec<ModuleItem>) -> String {
        let cm: Lrc<SourceMap> = Default::default();
        let module = Module {
            span: DUMMY_SP,
            body: decls,
            shebang: None,
        };
        print_module(&cm, &module).unwrap()
    }

    #[test]
    fn declaration_has_the_two_field_descriptor_shape() {
        let plans = vec![RewritePlan::GenerateLoader(entry(
            "HomePage",
            "./pages/HomePage/HomePage",
        ))];
        let out = print_decls(generate(&plans).decls);

        assert!(out.contains("const HomePage = {"));
        assert!(out.contains("name: \"HomePage\""));
        assert!(out.contains("import(\"./pages/HomePage/HomePage\")"));
    }

    #[test]
    fn duplicate_names_collapse_into_one_declaration() {
        let plans = vec![
            RewritePlan::GenerateLoader(entry("BarPage", "./pages/BarPage/BarPage")),
            RewritePlan::Skip,
            RewritePlan::GenerateLoader(entry("BarPage", "./pages/BarPage/BarPage")),
        ];
        let generated = generate(&plans);

        assert_eq!(generated.decls.len(), 1);
        assert_eq!(generated.loaders.len(), 1);
        assert_eq!(generated.loaders[0].name, "BarPage");
    }

    #[test]
    fn declarations_keep_first_reference_order() {
        let plans = vec![
            RewritePlan::GenerateLoader(entry("BetaPage", "./pages/BetaPage")),
            RewritePlan::GenerateLoader(entry("AlphaPage", "./pages/AlphaPage")),
        ];
        let out = print_decls(generate(&plans).decls);

        let beta = out.find("const BetaPage").unwrap();
        let alpha = out.find("const AlphaPage").unwrap();
        assert!(beta < alpha);
    }
}
