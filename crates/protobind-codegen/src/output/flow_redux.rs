//! Flow-typed Redux thunk generation for JavaScript clients.

use crate::binding::Binding;
use crate::output::js::{comma_separated, export_name, import_block};
use crate::output::redux::{self, Flavor, thunk_name};
use crate::traits::{Dialect, FileContext, MethodContext, ServiceContext};
use crate::writer::CodeBuffer;

/// Static instance of the Flow Redux dialect for the registry.
pub static FLOW_REDUX_DIALECT: FlowReduxDialect = FlowReduxDialect;

pub struct FlowReduxDialect;

const FLAVOR: Flavor = Flavor {
    optional: maybe,
    reducer_header,
};

fn maybe(ty: &str) -> String {
    format!("?{}", ty)
}

fn reducer_header(reducer: &str, state: &str, initial: &str) -> String {
    format!(
        "export function {}(state: {} = {}, action: any) {{",
        reducer, state, initial
    )
}

impl Dialect for FlowReduxDialect {
    fn name(&self) -> &'static str {
        "flow-redux"
    }

    fn plugin(&self) -> &'static str {
        "protoc-gen-jsrpc"
    }

    fn language(&self) -> &'static str {
        "flow"
    }

    fn file_suffix(&self) -> &'static str {
        "redux.js"
    }

    fn bind_method(&self, m: &MethodContext<'_>) -> Binding {
        let export = export_name(m);
        let call = thunk_name(&m.method.name);
        let action = redux::action(&m.service.name, &m.method.name);
        let (req, resp) = (&m.request_type, &m.response_type);

        let mut buf = CodeBuffer::new("  ");
        buf.open(format!(
            "export const {export} = (req: {req}, respFn: ?(resp: {resp}) => void, errFn: ?(err: RPCError) => void) => \
             async (dispatch: (action: any) => void) => {{"
        ))
        .open("dispatch({")
        .line(format!("type: '{action}_REQUEST',"))
        .line("payload: req,")
        .close("})")
        .line("let cl = await client()")
        .open(format!("cl.{call}(req, (err: ?RPCError, resp: ?{resp}) => {{"))
        .open("if (err && !errFn) {")
        .open("dispatch({")
        .line("type: 'ERROR',")
        .line(format!("payload: {{error: err, action: '{action}', req}},"))
        .close("})")
        .line("return")
        .close("}")
        .open("if (err && errFn) {")
        .line("console.error(err)")
        .line("errFn(err)")
        .close("}")
        .line("if (resp && respFn) respFn(resp)")
        .open("dispatch({")
        .line(format!("type: '{action}_RESPONSE',"))
        .line("payload: resp,")
        .close("})")
        .close("})")
        .close("}");

        Binding::new(export, req, resp, buf.finish())
    }

    fn render_service(&self, service: &ServiceContext<'_>) -> String {
        redux::render_service(&FLAVOR, service)
    }

    fn render_file(&self, f: &FileContext<'_>) -> String {
        let types: Vec<&str> = f.types.iter().collect();
        let types_import = f.options.types_import.as_deref().unwrap_or("./types");

        let mut buf = CodeBuffer::new("  ");
        buf.line("// @flow")
            .line("/* eslint-disable */")
            .line(format!("// Code generated by {} DO NOT EDIT.", self.plugin()))
            .line(format!("// InputID: {}", f.input_id))
            .line(format!("import {{client}} from '{}'", f.options.client_import()))
            .blank()
            .raw(import_block("import type", &types, types_import));
        // Re-exported so callers need only this module.
        if !types.is_empty() {
            buf.open("export type {")
                .lines(comma_separated(types.iter().map(|t| t.to_string())))
                .close("}")
                .blank();
        }
        buf.open("export type RPCError = {")
            .line("code: number,")
            .line("message: string,")
            .line("details: string,")
            .close("}")
            .blank()
            .raw(f.services.join("\n"));
        buf.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flow_annotations() {
        assert_eq!(maybe("Point"), "?Point");
        insta::assert_snapshot!(
            reducer_header("reducer", "RPCState", "initialState"),
            @"export function reducer(state: RPCState = initialState, action: any) {"
        );
    }
}
