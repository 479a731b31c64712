//! The dialect trait every binding backend implements.

use protobind_descriptor::{Field, File, Message, Method, Registry, Service};

use crate::binding::{Binding, FieldBinding, TypeSet};
use crate::names;
use crate::options::GeneratorOptions;

/// Order in which a dialect visits a service's methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodOrder {
    /// Declaration order from the descriptor.
    Declared,
    /// Sorted by method name (byte-wise, stable).
    ByName,
}

/// How many services a dialect can place in one output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceCount {
    Any,
    ExactlyOne,
}

/// Everything a dialect needs to bind one method.
pub struct MethodContext<'a> {
    pub registry: &'a Registry,
    pub file: &'a File,
    pub service: &'a Service,
    pub method: &'a Method,
    pub request: &'a Message,
    /// Request type name as the dialect spells it.
    pub request_type: String,
    /// Response type name as the dialect spells it.
    pub response_type: String,
    /// Mapped request fields in declaration order, unmapped ones removed.
    pub fields: Vec<FieldBinding>,
    pub options: &'a GeneratorOptions,
}

impl MethodContext<'_> {
    pub fn is_bidi_streaming(&self) -> bool {
        self.method.is_bidi_streaming()
    }

    /// `Service.Method`, as used in IPC channel names and log lines.
    pub fn full_method(&self) -> String {
        format!("{}.{}", self.service.name, self.method.name)
    }

    /// Whether more than one service shares the output file.
    pub fn is_shared_file(&self) -> bool {
        self.file.services.len() > 1
    }
}

/// A service's bound methods, in visiting order.
pub struct ServiceContext<'a> {
    pub file: &'a File,
    pub service: &'a Service,
    pub bindings: &'a [Binding],
}

impl ServiceContext<'_> {
    /// Whether more than one service shares the output file.
    pub fn is_shared_file(&self) -> bool {
        self.file.services.len() > 1
    }
}

/// Inputs to the file template.
pub struct FileContext<'a> {
    pub registry: &'a Registry,
    pub file: &'a File,
    /// Identifier printed in the generation banner.
    pub input_id: &'a str,
    /// Referenced types, first occurrence first.
    pub types: &'a TypeSet,
    /// Rendered services in encounter order.
    pub services: &'a [String],
    /// Whether any bound method is bidirectionally streaming.
    pub streaming: bool,
    pub options: &'a GeneratorOptions,
}

impl FileContext<'_> {
    /// The input file name without its extension, directories kept.
    pub fn base_name(&self) -> &str {
        strip_extension(&self.file.name)
    }

    /// Module the declared message types are imported from.
    ///
    /// Defaults to the companion declaration file `./<base>.d`.
    pub fn types_import(&self) -> String {
        match &self.options.types_import {
            Some(module) => module.clone(),
            None => declaration_module(&self.file.name),
        }
    }

    /// Module another input file's types are imported from: `./<base>.d`,
    /// or `types_import` for this file itself.
    pub fn module_of(&self, file: &File) -> String {
        if file.name == self.file.name {
            self.types_import()
        } else {
            declaration_module(&file.name)
        }
    }
}

/// A client-binding backend.
///
/// Dialects are stateless; the assembler drives them through
/// [`map_field`](Dialect::map_field), [`bind_method`](Dialect::bind_method),
/// [`render_service`](Dialect::render_service) and
/// [`render_file`](Dialect::render_file) in that order.
///
/// # Implementing a dialect
///
/// ```ignore
/// use protobind_codegen::{Binding, Dialect, FileContext, MethodContext};
///
/// struct Listing;
///
/// impl Dialect for Listing {
///     fn name(&self) -> &'static str { "listing" }
///     fn plugin(&self) -> &'static str { "protoc-gen-listing" }
///     fn language(&self) -> &'static str { "text" }
///     fn file_suffix(&self) -> &'static str { "txt" }
///     fn bind_method(&self, m: &MethodContext<'_>) -> Binding {
///         Binding::new(&m.method.name, &m.request_type, &m.response_type, m.full_method())
///     }
///     fn render_file(&self, f: &FileContext<'_>) -> String { f.services.join("\n") }
/// }
/// ```
pub trait Dialect: Send + Sync {
    /// Unique dialect identifier (e.g. "go-cli", "ts-ipc").
    fn name(&self) -> &'static str;

    /// Name of the protoc plugin this dialect stands in for, printed in the
    /// generation banner.
    fn plugin(&self) -> &'static str;

    /// Target language (e.g. "go", "typescript").
    fn language(&self) -> &'static str;

    /// Suffix appended to the input base name, extension included
    /// (e.g. "cli.go").
    fn file_suffix(&self) -> &'static str;

    fn method_order(&self) -> MethodOrder {
        MethodOrder::Declared
    }

    fn services_per_file(&self) -> ServiceCount {
        ServiceCount::Any
    }

    /// Spell a fully-qualified type reference for this target.
    fn type_name(&self, type_ref: &str) -> String {
        names::strip_package(type_ref).to_string()
    }

    /// Map a request field to a declaration/accessor pair.
    ///
    /// Returns [`FieldBinding::none`] for fields the target cannot express;
    /// the assembler drops those.
    fn map_field(&self, _field: &Field) -> FieldBinding {
        FieldBinding::none()
    }

    /// Produce the binding fragment for one method.
    fn bind_method(&self, method: &MethodContext<'_>) -> Binding;

    /// Wrap a service's bindings. Defaults to the fragments separated by a
    /// blank line.
    fn render_service(&self, service: &ServiceContext<'_>) -> String {
        service
            .bindings
            .iter()
            .map(|b| b.fragment.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Apply the file template.
    fn render_file(&self, file: &FileContext<'_>) -> String;

    /// Output file name for an input `.proto` file.
    fn output_name(&self, file_name: &str) -> String {
        format!("{}.{}", strip_extension(file_name), self.file_suffix())
    }
}

/// `./<base>.d` for an input file, directories kept.
pub(crate) fn declaration_module(file_name: &str) -> String {
    format!("./{}.d", strip_extension(file_name))
}

/// Strip the extension of the last path segment: `a/b.proto` → `a/b`.
pub(crate) fn strip_extension(name: &str) -> &str {
    let segment_start = name.rfind('/').map_or(0, |i| i + 1);
    match name[segment_start..].rfind('.') {
        Some(dot) if dot > 0 => &name[..segment_start + dot],
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_stripping() {
        assert_eq!(strip_extension("route_guide.proto"), "route_guide");
        assert_eq!(strip_extension("a/b/route_guide.proto"), "a/b/route_guide");
        assert_eq!(strip_extension("a.v1/service"), "a.v1/service");
        assert_eq!(strip_extension(".hidden"), ".hidden");
        assert_eq!(strip_extension("x.y.proto"), "x.y");
    }
}
