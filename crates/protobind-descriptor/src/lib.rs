//! Protobuf descriptor model and registry.
//!
//! `protobind-descriptor` holds the read-only view of a protoc descriptor set
//! that the `protobind-codegen` dialects generate from. Building the registry
//! (from a `CodeGeneratorRequest`, a JSON fixture, or by hand) is the caller's
//! job; once built it is only queried.
//!
//! # Example
//!
//! ```
//! use protobind_descriptor::{Field, FieldKind, File, Message, Method, Registry, Service};
//!
//! let file = File::new("echo.proto", "echo")
//!     .with_service(Service::new(
//!         "Echo",
//!         vec![Method::unary("Say", ".echo.SayRequest", ".echo.SayResponse")],
//!     ))
//!     .with_message(Message::new("SayRequest", vec![Field::new("text", FieldKind::String)]))
//!     .with_message(Message::new("SayResponse", vec![]));
//!
//! let registry = Registry::from_files([file]).unwrap();
//! let request = registry.lookup_message(".echo.SayRequest").unwrap();
//! assert_eq!(request.fields[0].name, "text");
//! ```

pub mod model;
pub mod registry;

pub use model::{Enum, EnumValue, Field, FieldKind, File, Label, Message, Method, Service};
pub use registry::{LoadError, LookupError, Registry, TypeLocation};
