// src/scanner.rs

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use swc_common::{SourceMap, Span};
use swc_ecma_ast::*;
use swc_ecma_visit::{Visit, VisitWith};

use crate::model::{PageReference, RefContext};

/// Walks the routing file's tree and collects page references in document
/// order.
///
/// Two shapes are recognized: a `page={SomePage}` attribute on a `<Route>`
/// element, and a page-like element tag (`<SomePage />`) used inside the
/// router markup. Only bare identifiers count; member expressions, calls and
/// anything else a developer wrote deliberately are left alone. Names that
/// are already bound by a top-level declaration in the same file are skipped
/// too, which is what keeps a second run over generated output from
/// collecting anything.
pub fn scan(module: &Module, cm: &SourceMap, source_file: &Path) -> Vec<PageReference> {
    let mut visitor = RouteVisitor {
        cm,
        source_file: source_file.to_path_buf(),
        locals: top_level_bindings(module),
        route_depth: 0,
        refs: Vec::new(),
    };
    module.visit_with(&mut visitor);
    tracing::debug!(count = visitor.refs.len(), "scanned page references");
    visitor.refs
}

/// Names bound by top-level `var`/`let`/`const`, function and class
/// declarations, including exported ones.
fn top_level_bindings(module: &Module) -> HashSet<String> {
    let mut names = HashSet::new();
    for item in &module.body {
        let decl = match item {
            ModuleItem::Stmt(Stmt::Decl(decl)) => decl,
            ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(export)) => &export.decl,
            _ => continue,
        };
        match decl {
            Decl::Var(var) => {
                for declarator in &var.decls {
                    if let Pat::Ident(binding) = &declarator.name {
                        names.insert(binding.id.sym.to_string());
                    }
                }
            }
            Decl::Fn(f) => {
                names.insert(f.ident.sym.to_string());
            }
            Decl::Class(c) => {
                names.insert(c.ident.sym.to_string());
            }
            _ => {}
        }
    }
    names
}

/// A tag counts as page-like when it is capitalized and ends in `Page`.
/// The bare tag `Page` names nothing and is excluded.
fn is_page_like(name: &str) -> bool {
    name != "Page"
        && name.ends_with("Page")
        && name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}

struct RouteVisitor<'a> {
    cm: &'a SourceMap,
    source_file: PathBuf,
    locals: HashSet<String>,
    /// How many `<Router>`/`<Route>` ancestors the current node has.
    route_depth: usize,
    refs: Vec<PageReference>,
}

impl RouteVisitor<'_> {
    fn push_ref(&mut self, name: &str, span: Span, context: RefContext) {
        if self.locals.contains(name) {
            return;
        }
        let loc = self.cm.lookup_char_pos(span.lo);
        self.refs.push(PageReference {
            name: name.to_string(),
            context,
            source_file: self.source_file.clone(),
            line: loc.line,
            column: loc.col_display + 1,
        });
    }

    /// `<Route page={SomePage} .../>` — the attribute must hold a bare
    /// identifier; any other expression is developer intent.
    fn collect_page_attr(&mut self, el: &JSXElement) {
        for attr in &el.opening.attrs {
            let JSXAttrOrSpread::JSXAttr(attr) = attr else {
                continue;
            };
            let JSXAttrName::Ident(attr_name) = &attr.name else {
                continue;
            };
            if attr_name.sym.to_string() != "page" {
                continue;
            }
            let Some(JSXAttrValue::JSXExprContainer(container)) = &attr.value else {
                continue;
            };
            let JSXExpr::Expr(expr) = &container.expr else {
                continue;
            };
            if let Expr::Ident(ident) = &**expr {
                self.push_ref(&ident.sym.to_string(), ident.span, RefContext::PageAttr);
            }
        }
    }
}

impl Visit for RouteVisitor<'_> {
    fn visit_jsx_element(&mut self, el: &JSXElement) {
        if let JSXElementName::Ident(tag) = &el.opening.name {
            let tag_name = tag.sym.to_string();

            if tag_name == "Route" {
                self.collect_page_attr(el);
            }
            if self.route_depth > 0 && is_page_like(&tag_name) {
                self.push_ref(&tag_name, tag.span, RefContext::ElementTag);
            }
            if tag_name == "Router" || tag_name == "Route" {
                self.route_depth += 1;
                el.visit_children_with(self);
                self.route_depth -= 1;
                return;
            }
        }
        el.visit_children_with(self);
    }
}
