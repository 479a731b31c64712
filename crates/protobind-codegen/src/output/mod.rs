//! Built-in dialects.
//!
//! Each dialect is a stateless unit struct implementing
//! [`Dialect`](crate::traits::Dialect), exposed as a static for the
//! [registry](crate::registry).

#[cfg(any(
    feature = "dialect-ts-redux",
    feature = "dialect-flow-redux",
    feature = "dialect-ts-ipc",
    feature = "dialect-ts-promise",
    feature = "dialect-ts-types"
))]
pub(crate) mod js;

#[cfg(any(feature = "dialect-ts-redux", feature = "dialect-flow-redux"))]
pub(crate) mod redux;

// Go
#[cfg(feature = "dialect-go-cli")]
pub mod go_cli;

#[cfg(feature = "dialect-go-cli")]
pub use go_cli::{GO_CLI_DIALECT, GoCliDialect};

// Redux
#[cfg(feature = "dialect-ts-redux")]
pub mod ts_redux;

#[cfg(feature = "dialect-ts-redux")]
pub use ts_redux::{TS_REDUX_DIALECT, TsReduxDialect};

#[cfg(feature = "dialect-flow-redux")]
pub mod flow_redux;

#[cfg(feature = "dialect-flow-redux")]
pub use flow_redux::{FLOW_REDUX_DIALECT, FlowReduxDialect};

// Electron IPC
#[cfg(feature = "dialect-ts-ipc")]
pub mod ts_ipc;

#[cfg(feature = "dialect-ts-ipc")]
pub use ts_ipc::{TS_IPC_DIALECT, TsIpcDialect};

// grpc-js promises
#[cfg(feature = "dialect-ts-promise")]
pub mod ts_promise;

#[cfg(feature = "dialect-ts-promise")]
pub use ts_promise::{TS_PROMISE_DIALECT, TsPromiseDialect};

// Declarations
#[cfg(feature = "dialect-ts-types")]
pub mod ts_types;

#[cfg(feature = "dialect-ts-types")]
pub use ts_types::{TS_TYPES_DIALECT, TsTypesDialect};
