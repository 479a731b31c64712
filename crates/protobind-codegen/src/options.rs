//! Per-invocation generator options.

use serde::{Deserialize, Serialize};

use crate::error::GenerateError;

/// Options shared by all dialects. Each dialect reads the ones it knows.
///
/// Built once per invocation and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    /// Identifier printed in the generation banner. Defaults to the input
    /// file name.
    pub input_id: Option<String>,
    /// Module message types are imported from (TypeScript and Flow dialects).
    pub types_import: Option<String>,
    /// Module the Redux dialects import `client` from. Defaults to `./client`.
    pub client_import: Option<String>,
    /// Go package of the CLI file. Defaults to `proto`.
    pub go_package: Option<String>,
    /// Declare streaming sides as `AsyncIterator<T>` (ts-types).
    pub async_iterators: bool,
    /// Spell field names in lower camel case (ts-types).
    pub camel_case_names: bool,
}

impl GeneratorOptions {
    /// Parse a protoc plugin parameter (`--<plugin>_opt=k=v,k=v`).
    ///
    /// Dashes in keys read as underscores (`async-iterators=true`). Unknown
    /// keys are ignored with a warning; an entry without `=`, with an empty
    /// value or with a non-boolean value for a flag is an error.
    pub fn from_parameter(param: &str) -> Result<Self, GenerateError> {
        let mut opts = Self::default();

        for part in param.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let Some((key, value)) = part.split_once('=') else {
                return Err(GenerateError::InvalidParameter(format!(
                    "expected key=value, got {:?}",
                    part
                )));
            };
            let (key, value) = (key.trim().replace('-', "_"), value.trim());
            if value.is_empty() {
                return Err(GenerateError::InvalidParameter(format!(
                    "empty value for {}",
                    key
                )));
            }
            let slot = match key.as_str() {
                "input_id" => &mut opts.input_id,
                "types_import" => &mut opts.types_import,
                "client_import" => &mut opts.client_import,
                "go_package" => &mut opts.go_package,
                "async_iterators" => {
                    opts.async_iterators = parse_flag(&key, value)?;
                    continue;
                }
                "camel_case_names" => {
                    opts.camel_case_names = parse_flag(&key, value)?;
                    continue;
                }
                _ => {
                    tracing::warn!(key = %key, "ignoring unknown generator parameter");
                    continue;
                }
            };
            *slot = Some(value.to_string());
        }

        Ok(opts)
    }

    pub fn with_input_id(mut self, input_id: impl Into<String>) -> Self {
        self.input_id = Some(input_id.into());
        self
    }

    pub fn with_types_import(mut self, module: impl Into<String>) -> Self {
        self.types_import = Some(module.into());
        self
    }

    pub fn with_async_iterators(mut self) -> Self {
        self.async_iterators = true;
        self
    }

    pub(crate) fn client_import(&self) -> &str {
        self.client_import.as_deref().unwrap_or("./client")
    }

    pub(crate) fn go_package(&self) -> &str {
        self.go_package.as_deref().unwrap_or("proto")
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, GenerateError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(GenerateError::InvalidParameter(format!(
            "{} expects true or false, got {:?}",
            key, value
        ))),
    }
}
