//! TypeScript declaration files (`.d.ts`) for messages, enums and services.
//!
//! The module's top level stands for the package root: a file in
//! `routeguide` declares `Point` directly, a file in `acme.geo.v1` wraps its
//! members in `export declare namespace geo.v1`. A namespace import of the
//! root (`import * as acme`) then reaches every type as `acme.geo.v1.Point`,
//! which is how the promise dialect spells them. Nested messages and enums
//! sit in a namespace named after their parent, so `Outer.Inner` reads the
//! same here as in qualified references.

use protobind_descriptor::{Enum, Field, FieldKind, File, Label, Message, Method, Registry};
use tracing::warn;

use crate::binding::Binding;
use crate::names::{strip_leading_dot, to_lower_camel};
use crate::output::js::DeclarationImports;
use crate::traits::{Dialect, FileContext, MethodContext, ServiceContext};
use crate::writer::CodeBuffer;

/// Static instance of the TypeScript declarations dialect for the registry.
pub static TS_TYPES_DIALECT: TsTypesDialect = TsTypesDialect;

pub struct TsTypesDialect;

const INDENT: &str = "  ";

impl Dialect for TsTypesDialect {
    fn name(&self) -> &'static str {
        "ts-types"
    }

    fn plugin(&self) -> &'static str {
        "protoc-gen-tstypes"
    }

    fn language(&self) -> &'static str {
        "typescript"
    }

    /// `<base>.d.ts`, the module the other TypeScript dialects import
    /// `./<base>.d` from.
    fn file_suffix(&self) -> &'static str {
        "d.ts"
    }

    fn bind_method(&self, m: &MethodContext<'_>) -> Binding {
        let scope = Scope::new(m.registry, m.file, m.options.camel_case_names);
        let (req, resp) = (
            scope.spell(&m.method.input_type),
            scope.spell(&m.method.output_type),
        );
        let stream = |ty: &str, streaming: bool| {
            if streaming && m.options.async_iterators {
                format!("AsyncIterator<{}>", ty)
            } else {
                ty.to_string()
            }
        };

        let mut buf = CodeBuffer::at_level(INDENT, scope.level + 1);
        buf.line(format!(
            "{}: (r: {}) => {};",
            m.method.name,
            stream(&req, m.method.client_streaming),
            stream(&resp, m.method.server_streaming)
        ));
        Binding::new(&m.method.name, req, resp, buf.finish())
    }

    fn render_service(&self, service: &ServiceContext<'_>) -> String {
        let mut buf = CodeBuffer::at_level(INDENT, namespace_level(&service.file.package));
        buf.open(format!("export interface {}Service {{", service.service.name));
        for binding in service.bindings {
            buf.raw(&binding.fragment);
        }
        buf.close("}");
        buf.finish()
    }

    fn render_file(&self, f: &FileContext<'_>) -> String {
        let scope = Scope::new(f.registry, f.file, f.options.camel_case_names);

        let mut declarations: Vec<String> = f
            .file
            .enums
            .iter()
            .map(|e| render_enum(e, scope.level))
            .collect();
        declarations.extend(
            f.file
                .messages
                .iter()
                .map(|m| scope.render_message(m, scope.level)),
        );
        declarations.extend(f.services.iter().cloned());

        let mut buf = CodeBuffer::new(INDENT);
        buf.line(format!("// Code generated by {} DO NOT EDIT.", self.plugin()))
            .line(format!("// InputID: {}", f.input_id))
            .blank()
            .raw(scope.imports(f).render());
        match namespace_path(&f.file.package) {
            Some(path) => {
                buf.open(format!("export declare namespace {} {{", path))
                    .raw(declarations.join("\n"))
                    .close("}");
            }
            None => {
                buf.raw(declarations.join("\n"));
            }
        }
        buf.finish()
    }
}

/// Package segments below the root, wrapped in a namespace: `acme.geo.v1` →
/// `geo.v1`.
fn namespace_path(package: &str) -> Option<&str> {
    package.split_once('.').map(|(_, rest)| rest)
}

fn namespace_level(package: &str) -> usize {
    usize::from(namespace_path(package).is_some())
}

/// Spelling rules for one declaration file.
struct Scope<'a> {
    registry: &'a Registry,
    file: &'a File,
    camel_case: bool,
    /// Indent level of top-level declarations.
    level: usize,
}

impl<'a> Scope<'a> {
    fn new(registry: &'a Registry, file: &'a File, camel_case: bool) -> Self {
        Self {
            registry,
            file,
            camel_case,
            level: namespace_level(&file.package),
        }
    }

    /// Types declared in this file are spelled relative to it; all others
    /// keep their package, which an import binds.
    fn spell(&self, type_ref: &str) -> String {
        match self.registry.locate_type(type_ref) {
            Ok(loc) if loc.file.name == self.file.name || loc.file.package.is_empty() => {
                loc.local_name.to_string()
            }
            Ok(loc) => format!("{}.{}", loc.file.package, loc.local_name),
            Err(err) => {
                warn!(file = %self.file.name, %err, "unresolved type reference, spelled as written");
                strip_leading_dot(type_ref).to_string()
            }
        }
    }

    /// Imports for every type declared in another file, in reference order:
    /// message fields first, then method types.
    fn imports(&self, f: &FileContext<'_>) -> DeclarationImports {
        let mut refs = Vec::new();
        for message in &self.file.messages {
            field_refs(message, &mut refs);
        }
        for method in self.file.services.iter().flat_map(|s| &s.methods) {
            refs.extend(method_refs(method));
        }

        let mut imports = DeclarationImports::default();
        for type_ref in refs {
            match self.registry.locate_type(type_ref) {
                Ok(loc) if loc.file.name != self.file.name => {
                    imports.add(&loc, f.module_of(loc.file));
                }
                _ => {}
            }
        }
        imports
    }

    /// `export interface` for the message, followed by a namespace of the
    /// same name when it declares nested types. Map entries are folded into
    /// their fields and not declared.
    fn render_message(&self, message: &Message, level: usize) -> String {
        let mut buf = CodeBuffer::at_level(INDENT, level);
        buf.open(format!("export interface {} {{", message.name));
        for field in &message.fields {
            buf.line(self.field(field));
        }
        buf.close("}");

        let mut nested: Vec<String> = message
            .enums
            .iter()
            .map(|e| render_enum(e, level + 1))
            .collect();
        nested.extend(
            message
                .nested
                .iter()
                .filter(|m| !m.map_entry)
                .map(|m| self.render_message(m, level + 1)),
        );
        if !nested.is_empty() {
            buf.blank()
                .open(format!("export namespace {} {{", message.name))
                .raw(nested.join("\n"))
                .close("}");
        }
        buf.finish()
    }

    fn field(&self, field: &Field) -> String {
        let name = if self.camel_case {
            to_lower_camel(&field.name)
        } else {
            field.name.clone()
        };

        if let Some((key, value)) = self.map_entry(field) {
            return format!(
                "{}?: {{ [key: {}]: {} }};",
                name,
                key_type(key.kind),
                self.value_type(value)
            );
        }
        let ty = self.value_type(field);
        match field.label {
            Label::Optional => format!("{}?: {};", name, ty),
            Label::Required => format!("{}: {};", name, ty),
            Label::Repeated => format!("{}: Array<{}>;", name, ty),
        }
    }

    fn map_entry(&self, field: &Field) -> Option<(&'a Field, &'a Field)> {
        if !field.is_repeated() || field.kind != FieldKind::Message {
            return None;
        }
        let entry = self.registry.lookup_message(field.type_name.as_deref()?).ok()?;
        entry.map_key_value()
    }

    fn value_type(&self, field: &Field) -> String {
        match field.kind {
            FieldKind::Bool => "boolean".to_string(),
            FieldKind::String => "string".to_string(),
            FieldKind::Bytes => "Uint8Array".to_string(),
            FieldKind::Message | FieldKind::Group | FieldKind::Enum => match &field.type_name {
                Some(type_ref) => self.spell(type_ref),
                None => {
                    warn!(field = %field.name, kind = ?field.kind, "field without a type name");
                    "unknown".to_string()
                }
            },
            _ => "number".to_string(),
        }
    }
}

/// Index signatures only take `string` or `number` keys.
fn key_type(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::String | FieldKind::Bool => "string",
        _ => "number",
    }
}

/// String-valued enum, each member named after itself.
fn render_enum(e: &Enum, level: usize) -> String {
    let mut buf = CodeBuffer::at_level(INDENT, level);
    buf.open(format!("export enum {} {{", e.name));
    for value in &e.values {
        buf.line(format!("{0} = \"{0}\",", value.name));
    }
    buf.close("}");
    buf.finish()
}

fn field_refs<'m>(message: &'m Message, out: &mut Vec<&'m str>) {
    out.extend(message.fields.iter().filter_map(|f| f.type_name.as_deref()));
    for nested in &message.nested {
        field_refs(nested, out);
    }
}

fn method_refs(method: &Method) -> [&str; 2] {
    [method.input_type.as_str(), method.output_type.as_str()]
}
