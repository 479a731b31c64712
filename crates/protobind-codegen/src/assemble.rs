//! The generation pipeline shared by every dialect.
//!
//! ```text
//! Registry ─> file ─> service ─> method ─> fields
//!                                   │         └─ Dialect::map_field
//!                                   └─ Dialect::bind_method ─> Binding
//!             services <─ Dialect::render_service
//!   GeneratedFile <─ Dialect::render_file
//! ```

use protobind_descriptor::{File, Method, Registry, Service};
use tracing::debug;

use crate::binding::{Binding, TypeSet};
use crate::error::GenerateError;
use crate::options::GeneratorOptions;
use crate::registry::get_dialect;
use crate::traits::{Dialect, FileContext, MethodContext, MethodOrder, ServiceContext, ServiceCount};

/// One generated output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Output path, relative like the input file name.
    pub name: String,
    pub content: String,
}

/// Generate bindings for `file_name` with `dialect`.
///
/// Fails without producing output if the file or any method's input/output
/// type is missing from the registry, or if the file breaks a structural rule
/// of the dialect.
pub fn generate(
    registry: &Registry,
    file_name: &str,
    dialect: &dyn Dialect,
    options: &GeneratorOptions,
) -> Result<GeneratedFile, GenerateError> {
    let file = registry
        .lookup_file(file_name)
        .map_err(|source| GenerateError::FileNotFound { source })?;

    debug!(
        dialect = dialect.name(),
        file = %file.name,
        services = file.services.len(),
        "generating bindings"
    );
    check_service_count(dialect, file)?;

    let mut types = TypeSet::new();
    let mut services = Vec::with_capacity(file.services.len());
    let mut streaming = false;

    for service in &file.services {
        let bindings = bind_service(registry, file, service, dialect, options)?;
        for binding in &bindings {
            types.extend(binding.referenced_types());
        }
        streaming |= service.methods.iter().any(Method::is_bidi_streaming);
        services.push(dialect.render_service(&ServiceContext {
            file,
            service,
            bindings: &bindings,
        }));
    }

    let input_id = options.input_id.as_deref().unwrap_or(&file.name);
    let content = dialect.render_file(&FileContext {
        registry,
        file,
        input_id,
        types: &types,
        services: &services,
        streaming,
        options,
    });

    Ok(GeneratedFile {
        name: dialect.output_name(&file.name),
        content,
    })
}

/// Like [`generate`], resolving the dialect by name first.
pub fn generate_by_name(
    registry: &Registry,
    file_name: &str,
    dialect: &str,
    options: &GeneratorOptions,
) -> Result<GeneratedFile, GenerateError> {
    let dialect =
        get_dialect(dialect).ok_or_else(|| GenerateError::UnknownDialect(dialect.to_string()))?;
    generate(registry, file_name, dialect, options)
}

fn check_service_count(dialect: &dyn Dialect, file: &File) -> Result<(), GenerateError> {
    match dialect.services_per_file() {
        ServiceCount::Any => Ok(()),
        ServiceCount::ExactlyOne if file.services.len() == 1 => Ok(()),
        ServiceCount::ExactlyOne => Err(GenerateError::UnsupportedInput {
            file: file.name.clone(),
            dialect: dialect.name(),
            reason: format!(
                "exactly one service per file is supported, found {}",
                file.services.len()
            ),
        }),
    }
}

/// The service's methods in the order the dialect visits them.
pub fn ordered_methods<'a>(dialect: &dyn Dialect, service: &'a Service) -> Vec<&'a Method> {
    let mut methods: Vec<&Method> = service.methods.iter().collect();
    if dialect.method_order() == MethodOrder::ByName {
        methods.sort_by(|a, b| a.name.cmp(&b.name));
    }
    methods
}

fn bind_service(
    registry: &Registry,
    file: &File,
    service: &Service,
    dialect: &dyn Dialect,
    options: &GeneratorOptions,
) -> Result<Vec<Binding>, GenerateError> {
    let methods = ordered_methods(dialect, service);
    debug!(service = %service.name, methods = methods.len(), "binding service");

    let mut bindings = Vec::with_capacity(methods.len());
    for method in methods {
        let lookup = |type_ref: &str| {
            registry
                .lookup_message(type_ref)
                .map_err(|source| GenerateError::TypeNotFound {
                    file: file.name.clone(),
                    service: service.name.clone(),
                    method: method.name.clone(),
                    source,
                })
        };
        let request = lookup(&method.input_type)?;
        // Resolved only to reject unknown types before any output exists.
        lookup(&method.output_type)?;

        let mut fields = Vec::with_capacity(request.fields.len());
        for field in &request.fields {
            let mapped = dialect.map_field(field);
            if mapped.is_empty() {
                debug!(
                    method = %method.name,
                    field = %field.name,
                    kind = ?field.kind,
                    label = ?field.label,
                    "no binding for field, skipped"
                );
                continue;
            }
            fields.push(mapped);
        }

        bindings.push(dialect.bind_method(&MethodContext {
            registry,
            file,
            service,
            method,
            request,
            request_type: dialect.type_name(&method.input_type),
            response_type: dialect.type_name(&method.output_type),
            fields,
            options,
        }));
    }
    Ok(bindings)
}
