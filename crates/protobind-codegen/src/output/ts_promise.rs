//! TypeScript promise wrappers around `@grpc/grpc-js` clients.
//!
//! Types keep their package qualifier (`routeguide.Point`) and resolve
//! through a namespace import of each package root's declaration module.
//! Method names are kept exactly as declared so they line up with the
//! wrapped `ServiceClient`.

use crate::assemble::ordered_methods;
use crate::binding::Binding;
use crate::names::strip_leading_dot;
use crate::output::js::DeclarationImports;
use crate::traits::{Dialect, FileContext, MethodContext, ServiceContext};
use crate::writer::CodeBuffer;

/// Static instance of the TypeScript promise dialect for the registry.
pub static TS_PROMISE_DIALECT: TsPromiseDialect = TsPromiseDialect;

pub struct TsPromiseDialect;

impl Dialect for TsPromiseDialect {
    fn name(&self) -> &'static str {
        "ts-promise"
    }

    fn plugin(&self) -> &'static str {
        "protoc-gen-tsrpc"
    }

    fn language(&self) -> &'static str {
        "typescript"
    }

    fn file_suffix(&self) -> &'static str {
        "rpc.ts"
    }

    fn type_name(&self, type_ref: &str) -> String {
        strip_leading_dot(type_ref).to_string()
    }

    fn bind_method(&self, m: &MethodContext<'_>) -> Binding {
        let method = &m.method.name;
        let (req, resp) = (&m.request_type, &m.response_type);

        // Class members sit one level inside `export class`.
        let mut buf = CodeBuffer::at_level("  ", 1);
        if m.is_bidi_streaming() {
            buf.open(format!("{method}(): ClientDuplexStream<{req}, {resp}> {{"))
                .line(format!("return this.service.{method}()"))
                .close("}");
        } else {
            buf.open(format!("{method}(req: {req}): Promise<{resp}> {{"))
                .open(format!("return new Promise<{resp}>((resolve, reject) => {{"))
                .open(format!(
                    "this.service.{method}(req, (err: RPCError | null, resp: {resp}) => {{"
                ))
                .open("if (err) {")
                .line("reject(err)")
                .line("return")
                .close("}")
                .line("resolve(resp)")
                .close("})")
                .close("})")
                .close("}");
        }
        Binding::new(method, req, resp, buf.finish())
    }

    fn render_service(&self, service: &ServiceContext<'_>) -> String {
        let mut buf = CodeBuffer::new("  ");
        buf.open(format!("export class {}Service {{", service.service.name))
            .line("service: ServiceClient")
            .blank()
            .open("constructor(service: ServiceClient) {")
            .line("this.service = service")
            .close("}");
        for binding in service.bindings {
            buf.blank().raw(&binding.fragment);
        }
        buf.close("}");
        buf.finish()
    }

    fn render_file(&self, f: &FileContext<'_>) -> String {
        let mut buf = CodeBuffer::new("  ");
        buf.line(format!("// Code generated by {} DO NOT EDIT.", self.plugin()))
            .line(format!("// InputID: {}", f.input_id))
            .blank()
            .line("import {ServiceClient} from '@grpc/grpc-js/build/src/make-client'")
            .line("import {ClientDuplexStream} from '@grpc/grpc-js/build/src/call'");
        // Namespace imports join the grpc-js block; named ones start a new one.
        let imports = type_imports(self, f);
        if !imports.has_namespaces() {
            buf.blank();
        }
        buf.raw(imports.render());
        buf.open("export type RPCError = {")
            .line("name: string")
            .line("message: string")
            .line("code: number")
            .line("details: string")
            .close("}")
            .blank()
            .raw(f.services.join("\n"));
        buf.finish()
    }
}

/// Imports for every request and response type, in the order methods are
/// visited.
fn type_imports(dialect: &dyn Dialect, f: &FileContext<'_>) -> DeclarationImports {
    let mut imports = DeclarationImports::default();
    for service in &f.file.services {
        for method in ordered_methods(dialect, service) {
            for type_ref in [&method.input_type, &method.output_type] {
                if let Ok(location) = f.registry.locate_type(type_ref) {
                    imports.add(&location, f.module_of(location.file));
                }
            }
        }
    }
    imports
}
