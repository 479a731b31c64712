//! Client binding generation from protobuf service descriptors.
//!
//! `protobind-codegen` walks the services of one `.proto` file, resolved
//! through a [`protobind_descriptor::Registry`], and renders client glue for
//! a target dialect.
//!
//! # Architecture
//!
//! ```text
//! Registry           Pipeline                 Dialects
//! ────────     ──────────────────────     ─────────────────────
//! File     ─┐                          ┌─> go-cli      (urfave/cli commands)
//! Service  ─┼─> bind ─> render ────────┼─> ts-redux    (thunks + reducer)
//! Message  ─┘   (assemble.rs)          ├─> flow-redux  (Flow thunks + reducer)
//!                                      ├─> ts-ipc      (Electron IPC bridge)
//!                                      ├─> ts-promise  (grpc-js promise class)
//!                                      └─> ts-types    (.d.ts declarations)
//! ```
//!
//! # Example
//!
//! ```
//! use protobind_codegen::{GeneratorOptions, generate_by_name};
//! use protobind_descriptor::Registry;
//!
//! let registry = Registry::from_json(r#"[{
//!     "name": "echo.proto",
//!     "package": "echo",
//!     "services": [{"name": "Echo", "methods": [
//!         {"name": "Say", "input_type": ".echo.Msg", "output_type": ".echo.Msg"}
//!     ]}],
//!     "messages": [{"name": "Msg", "fields": [{"name": "text", "kind": "string"}]}]
//! }]"#).unwrap();
//!
//! let out = generate_by_name(&registry, "echo.proto", "ts-ipc", &GeneratorOptions::default()).unwrap();
//! assert_eq!(out.name, "echo.ipc.ts");
//! assert!(out.content.contains("export const say = (req: Msg"));
//! ```
//!
//! # Feature Flags
//!
//! Dialect flags (use `dialect-*` prefix):
//! - `dialect-go-cli` - Go `urfave/cli` commands
//! - `dialect-ts-redux` - TypeScript Redux thunks and reducer
//! - `dialect-flow-redux` - Flow-typed Redux thunks and reducer
//! - `dialect-ts-ipc` - TypeScript Electron IPC bridge
//! - `dialect-ts-promise` - TypeScript promise wrappers over grpc-js
//! - `dialect-ts-types` - TypeScript declarations for messages, enums and services
//!
//! Language umbrella flags (convenience):
//! - `go` - dialect-go-cli
//! - `typescript` - dialect-ts-redux + dialect-ts-ipc + dialect-ts-promise + dialect-ts-types
//! - `flow` - dialect-flow-redux

pub mod assemble;
pub mod binding;
pub mod error;
pub mod names;
pub mod options;
pub mod output;
pub mod registry;
pub mod traits;
pub mod writer;

pub use assemble::{GeneratedFile, generate, generate_by_name, ordered_methods};
pub use binding::{Binding, FieldBinding, TypeSet};
pub use error::GenerateError;
pub use options::GeneratorOptions;

// Re-export traits
pub use traits::{Dialect, FileContext, MethodContext, MethodOrder, ServiceContext, ServiceCount};

// Re-export registry functions
pub use registry::{dialect_names, dialects, dialects_for_language, get_dialect};
