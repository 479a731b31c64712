//! Go `urfave/cli` command generation.
//!
//! Every method becomes a `cli.Command` whose flags are the request's scalar
//! fields. Message, enum, bytes and group fields cannot be spelled as a flag
//! and are left out of both the flag list and the request literal.

use protobind_descriptor::{Field, FieldKind};

use crate::binding::{Binding, FieldBinding};
use crate::names::{fix_acronyms, to_camel, to_dash};
use crate::traits::{Dialect, FileContext, MethodContext, MethodOrder, ServiceContext, ServiceCount};
use crate::writer::CodeBuffer;

/// Static instance of the Go CLI dialect for the registry.
pub static GO_CLI_DIALECT: GoCliDialect = GoCliDialect;

pub struct GoCliDialect;

/// Commands sit two levels deep: `func Commands` → `return []cli.Command{`.
const COMMAND_LEVEL: usize = 2;

impl Dialect for GoCliDialect {
    fn name(&self) -> &'static str {
        "go-cli"
    }

    fn plugin(&self) -> &'static str {
        "protoc-gen-gocli"
    }

    fn language(&self) -> &'static str {
        "go"
    }

    fn file_suffix(&self) -> &'static str {
        "cli.go"
    }

    /// Commands are listed alphabetically so `--help` output is stable.
    fn method_order(&self) -> MethodOrder {
        MethodOrder::ByName
    }

    /// `Commands` takes a single client constructor.
    fn services_per_file(&self) -> ServiceCount {
        ServiceCount::ExactlyOne
    }

    fn map_field(&self, field: &Field) -> FieldBinding {
        let Some((flag, getter)) = flag_kind(field) else {
            return FieldBinding::none();
        };
        let dash = to_dash(&field.name);
        let slot = fix_acronyms(&to_camel(&field.name));
        let value = match getter {
            Getter::Plain(method) => format!("c.{}(\"{}\")", method, dash),
            Getter::Converted(method, go_type) => {
                format!("{}(c.{}(\"{}\"))", go_type, method, dash)
            }
        };
        FieldBinding::new(
            format!("cli.{}{{Name: \"{}\"}},", flag, dash),
            format!("{}: {},", slot, value),
        )
    }

    fn bind_method(&self, m: &MethodContext<'_>) -> Binding {
        let mut buf = CodeBuffer::at_level("\t", COMMAND_LEVEL);
        buf.open("cli.Command{")
            .line(format!("Name: \"{}\",", to_dash(&m.method.name)));

        if m.fields.is_empty() {
            buf.line("Flags: []cli.Flag{},");
        } else {
            buf.open("Flags: []cli.Flag{")
                .lines(m.fields.iter().map(|f| &f.declaration))
                .close("},");
        }

        buf.open("Action: func(c *cli.Context) error {");
        if m.fields.is_empty() {
            buf.line(format!("req := &{}{{}}", m.request_type));
        } else {
            buf.open(format!("req := &{}{{", m.request_type))
                .lines(m.fields.iter().map(|f| &f.accessor))
                .close("}");
        }
        if m.is_bidi_streaming() {
            write_stream_action(&mut buf, &m.method.name);
        } else {
            write_unary_action(&mut buf, &m.method.name);
        }
        buf.close("},").close("},");

        Binding::new(
            &m.method.name,
            &m.request_type,
            &m.response_type,
            buf.finish(),
        )
    }

    fn render_service(&self, service: &ServiceContext<'_>) -> String {
        service
            .bindings
            .iter()
            .map(|b| b.fragment.as_str())
            .collect()
    }

    fn render_file(&self, f: &FileContext<'_>) -> String {
        let client = f
            .file
            .services
            .first()
            .map(|s| format!("{}Client", s.name))
            .unwrap_or_default();

        let mut buf = CodeBuffer::new("\t");
        buf.line(format!("// Code initially generated by {}", self.plugin()))
            .line(format!("// InputID: {}", f.input_id))
            .blank()
            .line(format!("package {}", f.options.go_package()))
            .blank()
            .open("import (")
            .line("\"context\"")
            .line("\"encoding/json\"")
            .line("\"fmt\"");
        if f.streaming {
            buf.line("\"io\"");
        }
        buf.blank()
            .line("\"github.com/urfave/cli\"")
            .close(")")
            .blank()
            .line(format!(
                "// Commands are autogenerated cli commands generated by {}",
                self.plugin()
            ))
            .open(format!(
                "func Commands(clientFn func() {}) []cli.Command {{",
                client
            ))
            .open("return []cli.Command{");
        for service in f.services {
            buf.raw(service);
        }
        buf.close("}").close("}");
        buf.finish()
    }
}

enum Getter {
    Plain(&'static str),
    /// Getter whose result needs a conversion to the field's Go type.
    Converted(&'static str, &'static str),
}

/// Flag type and `cli.Context` getter for a field, `None` when the field
/// cannot be a flag.
///
/// Kinds sharing a Go representation share a flag: `int32`/`sint32`/
/// `sfixed32` are all `int32`, `fixed32` is a `uint32`, and so on.
fn flag_kind(field: &Field) -> Option<(&'static str, Getter)> {
    if field.is_repeated() {
        return match field.kind {
            FieldKind::String => Some(("StringSliceFlag", Getter::Plain("StringSlice"))),
            _ => None,
        };
    }
    let mapped = match field.kind {
        FieldKind::Double => ("Float64Flag", Getter::Plain("Float64")),
        FieldKind::Float => ("Float64Flag", Getter::Converted("Float64", "float32")),
        FieldKind::Int32 | FieldKind::Sint32 | FieldKind::Sfixed32 => {
            ("IntFlag", Getter::Converted("Int", "int32"))
        }
        FieldKind::Uint32 | FieldKind::Fixed32 => ("UintFlag", Getter::Converted("Uint", "uint32")),
        FieldKind::Int64 | FieldKind::Sint64 | FieldKind::Sfixed64 => {
            ("Int64Flag", Getter::Plain("Int64"))
        }
        FieldKind::Uint64 | FieldKind::Fixed64 => ("Uint64Flag", Getter::Plain("Uint64")),
        FieldKind::Bool => ("BoolFlag", Getter::Plain("Bool")),
        FieldKind::String => ("StringFlag", Getter::Plain("String")),
        FieldKind::Message | FieldKind::Enum | FieldKind::Bytes | FieldKind::Group => {
            return None;
        }
    };
    Some(mapped)
}

fn write_print_response(buf: &mut CodeBuffer) {
    buf.line("s, marshalErr := json.MarshalIndent(resp, \"\", \"  \")")
        .open("if marshalErr != nil {")
        .line("return marshalErr")
        .close("}")
        .line("fmt.Printf(\"%s\\n\", s)");
}

fn write_unary_action(buf: &mut CodeBuffer, method: &str) {
    buf.line(format!(
        "resp, err := clientFn().{}(context.TODO(), req)",
        method
    ))
    .open("if err != nil {")
    .line("return err")
    .close("}");
    write_print_response(buf);
    buf.line("return nil");
}

/// Send the flag-built request once, then print every response until the
/// server closes the stream.
fn write_stream_action(buf: &mut CodeBuffer, method: &str) {
    buf.line(format!(
        "stream, err := clientFn().{}(context.TODO())",
        method
    ))
    .open("if err != nil {")
    .line("return err")
    .close("}")
    .open("if err := stream.Send(req); err != nil {")
    .line("return err")
    .close("}")
    .open("if err := stream.CloseSend(); err != nil {")
    .line("return err")
    .close("}")
    .open("for {")
    .line("resp, err := stream.Recv()")
    .open("if err == io.EOF {")
    .line("return nil")
    .close("}")
    .open("if err != nil {")
    .line("return err")
    .close("}");
    write_print_response(buf);
    buf.close("}");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(field: Field) -> FieldBinding {
        GO_CLI_DIALECT.map_field(&field)
    }

    #[test]
    fn every_scalar_kind_binds() {
        for kind in FieldKind::ALL.into_iter().filter(|k| k.is_scalar()) {
            let binding = map(Field::new("value", kind));
            assert!(!binding.declaration.is_empty(), "{:?}", kind);
            assert!(binding.accessor.starts_with("Value: "), "{:?}", kind);
        }
    }

    #[test]
    fn accessor_decodes_to_field_type() {
        let cases = [
            (FieldKind::Double, "cli.Float64Flag", "Value: c.Float64(\"value\"),"),
            (FieldKind::Float, "cli.Float64Flag", "Value: float32(c.Float64(\"value\")),"),
            (FieldKind::Int32, "cli.IntFlag", "Value: int32(c.Int(\"value\")),"),
            (FieldKind::Sint32, "cli.IntFlag", "Value: int32(c.Int(\"value\")),"),
            (FieldKind::Sfixed32, "cli.IntFlag", "Value: int32(c.Int(\"value\")),"),
            (FieldKind::Uint32, "cli.UintFlag", "Value: uint32(c.Uint(\"value\")),"),
            (FieldKind::Fixed32, "cli.UintFlag", "Value: uint32(c.Uint(\"value\")),"),
            (FieldKind::Int64, "cli.Int64Flag", "Value: c.Int64(\"value\"),"),
            (FieldKind::Sint64, "cli.Int64Flag", "Value: c.Int64(\"value\"),"),
            (FieldKind::Sfixed64, "cli.Int64Flag", "Value: c.Int64(\"value\"),"),
            (FieldKind::Uint64, "cli.Uint64Flag", "Value: c.Uint64(\"value\"),"),
            (FieldKind::Fixed64, "cli.Uint64Flag", "Value: c.Uint64(\"value\"),"),
            (FieldKind::Bool, "cli.BoolFlag", "Value: c.Bool(\"value\"),"),
            (FieldKind::String, "cli.StringFlag", "Value: c.String(\"value\"),"),
        ];
        for (kind, flag, accessor) in cases {
            let binding = map(Field::new("value", kind));
            assert_eq!(
                binding.declaration,
                format!("{}{{Name: \"value\"}},", flag),
                "{:?}",
                kind
            );
            assert_eq!(binding.accessor, accessor, "{:?}", kind);
        }
    }

    #[test]
    fn repeated_string_is_a_slice_flag() {
        let binding = map(Field::repeated("tags", FieldKind::String));
        assert_eq!(binding.declaration, "cli.StringSliceFlag{Name: \"tags\"},");
        assert_eq!(binding.accessor, "Tags: c.StringSlice(\"tags\"),");
        assert_ne!(binding, map(Field::new("tags", FieldKind::String)));
    }

    // Documented limitation: structured, enum and bytes fields never become
    // flags, and neither do repeated non-string scalars.
    #[test]
    fn unrepresentable_fields_have_no_binding() {
        for kind in [
            FieldKind::Message,
            FieldKind::Enum,
            FieldKind::Bytes,
            FieldKind::Group,
        ] {
            assert!(map(Field::new("nested", kind)).is_empty(), "{:?}", kind);
        }
        assert!(map(Field::repeated("ids", FieldKind::Int64)).is_empty());
    }

    #[test]
    fn names_are_normalized() {
        let binding = map(Field::new("group_id", FieldKind::Int64));
        assert_eq!(binding.declaration, "cli.Int64Flag{Name: \"group-id\"},");
        assert_eq!(binding.accessor, "GroupID: c.Int64(\"group-id\"),");

        let binding = map(Field::new("url", FieldKind::String));
        assert_eq!(binding.accessor, "URL: c.String(\"url\"),");
    }
}
