//! Descriptor model for protobuf files, services and messages.
//!
//! These types mirror the parts of `FileDescriptorProto` the generators care
//! about. They are plain data: the code generators only ever read them.

use serde::{Deserialize, Serialize};

/// A `.proto` file: its package plus the services and messages it declares.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct File {
    /// File name as passed to protoc (e.g. "routeguide/route_guide.proto").
    pub name: String,
    /// Protobuf package, empty when the file declares none.
    #[serde(default)]
    pub package: String,
    /// Services in declaration order.
    #[serde(default)]
    pub services: Vec<Service>,
    /// Top-level messages in declaration order.
    #[serde(default)]
    pub messages: Vec<Message>,
    /// Top-level enums in declaration order.
    #[serde(default)]
    pub enums: Vec<Enum>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    #[serde(default)]
    pub methods: Vec<Method>,
}

/// An RPC method.
///
/// `input_type` and `output_type` are fully-qualified references with a
/// leading dot, as protoc writes them (`.routeguide.Point`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    pub input_type: String,
    pub output_type: String,
    #[serde(default)]
    pub client_streaming: bool,
    #[serde(default)]
    pub server_streaming: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<Field>,
    /// Messages declared inside this one.
    #[serde(default)]
    pub nested: Vec<Message>,
    /// Enums declared inside this one.
    #[serde(default)]
    pub enums: Vec<Enum>,
    /// Set on the synthesized `<Field>Entry` message behind a map field.
    /// Its `key` and `value` fields carry the map's types.
    #[serde(default)]
    pub map_entry: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Enum {
    pub name: String,
    #[serde(default)]
    pub values: Vec<EnumValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValue {
    pub name: String,
    pub number: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub kind: FieldKind,
    #[serde(default)]
    pub label: Label,
    /// Referenced type for message and enum fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
}

/// Wire-level field type, one variant per `FieldDescriptorProto.Type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Double,
    Float,
    Int64,
    Uint64,
    Int32,
    Fixed64,
    Fixed32,
    Bool,
    String,
    Group,
    Message,
    Bytes,
    Uint32,
    Enum,
    Sfixed32,
    Sfixed64,
    Sint32,
    Sint64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    #[default]
    Optional,
    Required,
    Repeated,
}

impl FieldKind {
    /// Every kind, in `FieldDescriptorProto.Type` order.
    pub const ALL: [FieldKind; 18] = [
        FieldKind::Double,
        FieldKind::Float,
        FieldKind::Int64,
        FieldKind::Uint64,
        FieldKind::Int32,
        FieldKind::Fixed64,
        FieldKind::Fixed32,
        FieldKind::Bool,
        FieldKind::String,
        FieldKind::Group,
        FieldKind::Message,
        FieldKind::Bytes,
        FieldKind::Uint32,
        FieldKind::Enum,
        FieldKind::Sfixed32,
        FieldKind::Sfixed64,
        FieldKind::Sint32,
        FieldKind::Sint64,
    ];

    /// Whether this is a scalar kind other than `bytes`.
    ///
    /// Message, enum, group and bytes fields have no flat scalar value.
    pub fn is_scalar(self) -> bool {
        !matches!(
            self,
            FieldKind::Group | FieldKind::Message | FieldKind::Bytes | FieldKind::Enum
        )
    }
}

impl File {
    pub fn new(name: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            ..Default::default()
        }
    }

    pub fn with_service(mut self, service: Service) -> Self {
        self.services.push(service);
        self
    }

    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_enum(mut self, e: Enum) -> Self {
        self.enums.push(e);
        self
    }
}

impl Service {
    pub fn new(name: impl Into<String>, methods: Vec<Method>) -> Self {
        Self {
            name: name.into(),
            methods,
        }
    }
}

impl Method {
    /// A unary method.
    pub fn unary(
        name: impl Into<String>,
        input_type: impl Into<String>,
        output_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            input_type: input_type.into(),
            output_type: output_type.into(),
            client_streaming: false,
            server_streaming: false,
        }
    }

    /// A method where both sides stream.
    pub fn bidi(
        name: impl Into<String>,
        input_type: impl Into<String>,
        output_type: impl Into<String>,
    ) -> Self {
        Self {
            client_streaming: true,
            server_streaming: true,
            ..Self::unary(name, input_type, output_type)
        }
    }

    pub fn is_bidi_streaming(&self) -> bool {
        self.client_streaming && self.server_streaming
    }
}

impl Message {
    pub fn new(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            fields,
            ..Default::default()
        }
    }

    /// The `<Field>Entry` message protoc synthesizes for a map field.
    pub fn map_entry(name: impl Into<String>, key: Field, value: Field) -> Self {
        Self {
            map_entry: true,
            ..Self::new(name, vec![key, value])
        }
    }

    pub fn with_nested(mut self, message: Message) -> Self {
        self.nested.push(message);
        self
    }

    pub fn with_enum(mut self, e: Enum) -> Self {
        self.enums.push(e);
        self
    }

    /// Key and value fields of a map entry.
    pub fn map_key_value(&self) -> Option<(&Field, &Field)> {
        if !self.map_entry {
            return None;
        }
        let find = |name: &str| self.fields.iter().find(|f| f.name == name);
        Some((find("key")?, find("value")?))
    }
}

impl Enum {
    /// An enum whose values are numbered from zero in the given order.
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            values: values
                .into_iter()
                .zip(0..)
                .map(|(name, number)| EnumValue {
                    name: name.into(),
                    number,
                })
                .collect(),
        }
    }
}

impl Field {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            label: Label::Optional,
            type_name: None,
        }
    }

    pub fn repeated(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            label: Label::Repeated,
            ..Self::new(name, kind)
        }
    }

    pub fn required(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            label: Label::Required,
            ..Self::new(name, kind)
        }
    }

    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    pub fn is_repeated(&self) -> bool {
        self.label == Label::Repeated
    }
}
