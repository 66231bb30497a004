// src/imports.rs

use std::collections::HashMap;

use swc_ecma_ast::{ImportSpecifier, Module, ModuleDecl, ModuleItem};

use crate::model::{ImportBinding, ImportKind};

/// Index of all local names bound by top-level import declarations.
///
/// Only module-level imports are considered; nothing inside nested scopes
/// can shadow a route reference here. When the same local name is imported
/// twice the later declaration wins, which matches how the engine defers to
/// whatever import the developer wrote last.
#[derive(Debug, Default)]
pub struct ImportTable {
    bindings: HashMap<String, ImportBinding>,
}

impl ImportTable {
    pub fn build(module: &Module) -> Self {
        let mut bindings = HashMap::new();

        for item in &module.body {
            let ModuleItem::ModuleDecl(ModuleDecl::Import(import)) = item else {
                continue;
            };
            let source = import.src.value.to_string();
            for spec in &import.specifiers {
                let (local, kind) = match spec {
                    ImportSpecifier::Default(s) => (&s.local, ImportKind::Default),
                    ImportSpecifier::Named(s) => (&s.local, ImportKind::Named),
                    ImportSpecifier::Namespace(s) => (&s.local, ImportKind::Namespace),
                };
                let local = local.sym.to_string();
                bindings.insert(
                    local.clone(),
                    ImportBinding {
                        local,
                        source: source.clone(),
                        kind,
                    },
                );
            }
        }

        tracing::debug!(count = bindings.len(), "built import table");
        ImportTable { bindings }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&ImportBinding> {
        self.bindings.get(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
