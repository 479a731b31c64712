//! Registry of the built-in dialects.
//!
//! The table is fixed at compile time by the enabled `dialect-*` features.
//! Hosts with their own [`Dialect`] pass it to
//! [`generate`](crate::generate) directly instead of registering it.

use crate::traits::Dialect;

static DIALECTS: &[&dyn Dialect] = &[
    #[cfg(feature = "dialect-go-cli")]
    &crate::output::go_cli::GO_CLI_DIALECT,
    #[cfg(feature = "dialect-ts-redux")]
    &crate::output::ts_redux::TS_REDUX_DIALECT,
    #[cfg(feature = "dialect-flow-redux")]
    &crate::output::flow_redux::FLOW_REDUX_DIALECT,
    #[cfg(feature = "dialect-ts-ipc")]
    &crate::output::ts_ipc::TS_IPC_DIALECT,
    #[cfg(feature = "dialect-ts-promise")]
    &crate::output::ts_promise::TS_PROMISE_DIALECT,
    #[cfg(feature = "dialect-ts-types")]
    &crate::output::ts_types::TS_TYPES_DIALECT,
];

/// Get a dialect by name.
pub fn get_dialect(name: &str) -> Option<&'static dyn Dialect> {
    DIALECTS.iter().find(|d| d.name() == name).copied()
}

/// Get all dialects targeting a language.
pub fn dialects_for_language(language: &str) -> Vec<&'static dyn Dialect> {
    DIALECTS
        .iter()
        .filter(|d| d.language() == language)
        .copied()
        .collect()
}

/// List all built-in dialects.
pub fn dialects() -> &'static [&'static dyn Dialect] {
    DIALECTS
}

/// List all built-in dialect names.
pub fn dialect_names() -> Vec<&'static str> {
    DIALECTS.iter().map(|d| d.name()).collect()
}
