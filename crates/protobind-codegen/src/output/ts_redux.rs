//! TypeScript Redux thunk generation.
//!
//! Each method becomes an async thunk that dispatches `<ACTION>_REQUEST`,
//! calls the client and dispatches `<ACTION>_RESPONSE` (or `ERROR`). The
//! error handler is not module state: thunks read it from the thunk extra
//! argument, so stores opt in with
//! `thunk.withExtraArgument({errHandler})`.

use crate::binding::Binding;
use crate::output::js::{export_name, import_block};
use crate::output::redux::{self, Flavor, thunk_name};
use crate::traits::{Dialect, FileContext, MethodContext, ServiceContext};
use crate::writer::CodeBuffer;

/// Static instance of the TypeScript Redux dialect for the registry.
pub static TS_REDUX_DIALECT: TsReduxDialect = TsReduxDialect;

pub struct TsReduxDialect;

const FLAVOR: Flavor = Flavor {
    optional,
    reducer_header,
};

fn optional(ty: &str) -> String {
    format!("{} | void", ty)
}

fn reducer_header(reducer: &str, state: &str, initial: &str) -> String {
    format!(
        "export const {} = (state: {} = {}, action: any) => {{",
        reducer, state, initial
    )
}

impl Dialect for TsReduxDialect {
    fn name(&self) -> &'static str {
        "ts-redux"
    }

    fn plugin(&self) -> &'static str {
        "protoc-gen-tsredux"
    }

    fn language(&self) -> &'static str {
        "typescript"
    }

    fn file_suffix(&self) -> &'static str {
        "redux.ts"
    }

    /// Redux actions are request/response pairs, so every method, streaming
    /// or not, binds as a unary thunk.
    fn bind_method(&self, m: &MethodContext<'_>) -> Binding {
        let export = export_name(m);
        let call = thunk_name(&m.method.name);
        let action = redux::action(&m.service.name, &m.method.name);
        let (req, resp) = (&m.request_type, &m.response_type);

        let mut buf = CodeBuffer::new("  ");
        buf.open(format!(
            "export const {export} = (req: {req}, respFn: ((resp: {resp}) => void) | void, errFn: ErrFn | void) => \
             async (dispatch: (action: any) => void, getState: () => any, config: RPCConfig | void) => {{"
        ))
        .open("dispatch({")
        .line(format!("type: '{action}_REQUEST',"))
        .line("payload: req,")
        .close("})")
        .line("const cl = await client()")
        .open(format!(
            "cl.{call}(req, (err: RPCError | void, resp: {resp} | void) => {{"
        ))
        .open("if (err) {")
        .open("if (errFn) {")
        .line("console.error(err)")
        .line("errFn(err)")
        .close("}")
        .line("const errHandler = config ? config.errHandler : undefined")
        .open("if (errHandler) {")
        .line("errHandler(err, errFn)")
        .reopen("} else if (!errFn) {")
        .open("dispatch({")
        .line("type: 'ERROR',")
        .line(format!("payload: {{error: err, action: '{action}', req}},"))
        .close("})")
        .close("}")
        .line("return")
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
        buf.line(format!("// Code generated by {} DO NOT EDIT.", self.plugin()))
            .line(format!("// InputID: {}", f.input_id))
            .line(format!("import {{client}} from '{}'", f.options.client_import()))
            .blank()
            .raw(import_block("import", &types, types_import))
            .open("export type RPCError = {")
            .line("code: number,")
            .line("message: string,")
            .line("details: string,")
            .close("}")
            .blank()
            .line("export type ErrFn = (err: RPCError) => void")
            .line("export type ErrHandler = (err: RPCError, errFn: ErrFn | void) => void")
            .open("export type RPCConfig = {")
            .line("errHandler?: ErrHandler,")
            .close("}")
            .blank()
            .raw(f.services.join("\n"));
        buf.finish()
    }
}
