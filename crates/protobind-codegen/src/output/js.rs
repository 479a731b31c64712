//! Helpers shared by the JavaScript-family dialects.

use indexmap::{IndexMap, IndexSet};
use protobind_descriptor::TypeLocation;

use crate::names::lower_leading_run;
use crate::traits::MethodContext;
use crate::writer::CodeBuffer;

/// Exported name of a method binding: `GetFeature` → `getFeature`.
///
/// When services share the file the service leads the name (`Maps` +
/// `GetTile` → `mapsGetTile`), so two services declaring the same method
/// still export distinct names.
pub(crate) fn export_name(m: &MethodContext<'_>) -> String {
    if m.is_shared_file() {
        format!("{}{}", lower_leading_run(&m.service.name), m.method.name)
    } else {
        lower_leading_run(&m.method.name)
    }
}

/// Append a comma to every item but the last.
pub(crate) fn comma_separated(items: impl Iterator<Item = String>) -> Vec<String> {
    let items: Vec<String> = items.collect();
    let last = items.len().saturating_sub(1);
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| if i < last { format!("{},", item) } else { item })
        .collect()
}

/// `import {` / `import type {` block for the referenced types, or nothing
/// when the file references none.
pub(crate) fn import_block(keyword: &str, types: &[&str], module: &str) -> String {
    if types.is_empty() {
        return String::new();
    }
    let mut buf = CodeBuffer::new("  ");
    buf.open(format!("{} {{", keyword))
        .lines(comma_separated(types.iter().map(|t| t.to_string())))
        .close(format!("}} from '{}'", module))
        .blank();
    buf.finish()
}

/// Imports that bring package-qualified type spellings into scope.
///
/// A type with a package is reached through a namespace import of its
/// package root (`import * as google from ...`); one without a package
/// through a named import of its outermost name. The first module seen for a
/// root binds it.
#[derive(Debug, Default)]
pub(crate) struct DeclarationImports {
    namespaces: IndexMap<String, String>,
    named: IndexMap<String, IndexSet<String>>,
}

impl DeclarationImports {
    pub(crate) fn add(&mut self, location: &TypeLocation<'_>, module: String) {
        let package = &location.file.package;
        match package.split('.').next().filter(|root| !root.is_empty()) {
            Some(root) => {
                self.namespaces.entry(root.to_string()).or_insert(module);
            }
            None => {
                let local = location.local_name;
                let outer = local.split('.').next().unwrap_or(local);
                self.named.entry(module).or_default().insert(outer.to_string());
            }
        }
    }

    pub(crate) fn has_namespaces(&self) -> bool {
        !self.namespaces.is_empty()
    }

    /// Namespace imports, then named import blocks, each group followed by a
    /// blank line.
    pub(crate) fn render(&self) -> String {
        let mut buf = CodeBuffer::new("  ");
        for (root, module) in &self.namespaces {
            buf.line(format!("import * as {} from '{}'", root, module));
        }
        if !self.namespaces.is_empty() {
            buf.blank();
        }
        for (module, names) in &self.named {
            let names: Vec<&str> = names.iter().map(String::as_str).collect();
            buf.raw(import_block("import", &names, module));
        }
        buf.finish()
    }
}
