//! TypeScript Electron IPC bridge generation.
//!
//! The renderer side of an IPC tunnel: each call picks a fresh reply channel
//! `<Service>.<Method>-<random hex>`, sends the request on `'rpc'` (or
//! `'rpc-stream'` for duplex streams) and listens for the main process's
//! answers there. Error handlers are passed per call; there is no
//! module-level handler to install.

use crate::binding::Binding;
use crate::output::js::{export_name, import_block};
use crate::traits::{Dialect, FileContext, MethodContext};
use crate::writer::CodeBuffer;

/// Static instance of the TypeScript IPC dialect for the registry.
pub static TS_IPC_DIALECT: TsIpcDialect = TsIpcDialect;

pub struct TsIpcDialect;

impl Dialect for TsIpcDialect {
    fn name(&self) -> &'static str {
        "ts-ipc"
    }

    fn plugin(&self) -> &'static str {
        "protoc-gen-tsipc"
    }

    fn language(&self) -> &'static str {
        "typescript"
    }

    fn file_suffix(&self) -> &'static str {
        "ipc.ts"
    }

    fn bind_method(&self, m: &MethodContext<'_>) -> Binding {
        let export = export_name(m);
        let fragment = if m.is_bidi_streaming() {
            stream_fragment(m, &export)
        } else {
            unary_fragment(m, &export)
        };
        Binding::new(export, &m.request_type, &m.response_type, fragment)
    }

    fn render_file(&self, f: &FileContext<'_>) -> String {
        let types: Vec<&str> = f.types.iter().collect();

        let mut buf = CodeBuffer::new("  ");
        buf.line(format!("// Code generated by {} DO NOT EDIT.", self.plugin()))
            .line(format!("// InputID: {}", f.input_id))
            .line("import {ipcRenderer} from 'electron'")
            .line("import {randomBytes} from 'crypto'")
            .blank()
            .raw(import_block("import", &types, &f.types_import()))
            .open("const replyID = (): string => {")
            .line("return randomBytes(20).toString('hex')")
            .close("}")
            .blank()
            .line("export type RPCErr = {message: string; name?: string; code?: number}")
            .line("export type ErrHandler = (err: RPCErr) => void")
            .line("export const ignoreErr: ErrHandler = () => {}")
            .blank()
            .raw(f.services.join("\n"));
        buf.finish()
    }
}

/// `export const getFeature = (req, errHandler = ignoreErr) => Promise<Resp>`.
fn unary_fragment(m: &MethodContext<'_>, export: &str) -> String {
    let full = m.full_method();
    let (service, method) = (&m.service.name, &m.method.name);
    let (req, resp) = (&m.request_type, &m.response_type);

    let mut buf = CodeBuffer::new("  ");
    buf.open(format!(
        "export const {export} = (req: {req}, errHandler: ErrHandler = ignoreErr) => {{"
    ))
    .open(format!("return new Promise<{resp}>((resolve, reject) => {{"))
    .line(format!("const reply = '{full}-' + replyID()"))
    .open("ipcRenderer.once(reply, (event, arg) => {")
    .open("if (arg.err) {")
    .line(format!("console.error('RPC error ({full}):', arg.err)"))
    .line("errHandler(arg.err)")
    .line("reject(arg.err)")
    .line("return")
    .close("}")
    .line("resolve(arg.resp)")
    .close("})")
    .line(format!(
        "ipcRenderer.send('rpc', {{service: '{service}', method: '{method}', args: req, reply}})"
    ))
    .close("})")
    .close("}");
    buf.finish()
}

/// `<Method>Event` type plus a subscriber returning a sender.
///
/// The listener stays attached until the main process reports `done` or an
/// error, or until the caller sends with `end` set.
fn stream_fragment(m: &MethodContext<'_>, export: &str) -> String {
    let full = m.full_method();
    let (service, method) = (&m.service.name, &m.method.name);
    let (req, resp) = (&m.request_type, &m.response_type);
    let event = if m.is_shared_file() {
        format!("{}{}Event", service, method)
    } else {
        format!("{}Event", method)
    };

    let mut buf = CodeBuffer::new("  ");
    buf.line(format!(
        "export type {event} = {{err?: RPCErr, res?: {resp}, done: boolean}}"
    ))
    .blank()
    .open(format!("export const {export} = ("))
    .line(format!("f: (res: {event}) => void,"))
    .line("errHandler: ErrHandler = ignoreErr,")
    .reopen(format!("): ((req?: {req}, end?: boolean) => void) => {{"))
    .line(format!("const reply = '{full}-' + replyID()"))
    .open("ipcRenderer.on(reply, (event, arg) => {")
    .open("if (!!arg.done || arg.err) {")
    .line("ipcRenderer.removeAllListeners(reply)")
    .close("}")
    .open("if (arg.err) {")
    .line(format!("console.error('RPC-stream error ({full}):', arg.err)"))
    .line("errHandler(arg.err)")
    .close("}")
    .line("f({res: arg.resp, err: arg.err, done: !!arg.done})")
    .close("})")
    .open(format!("return (req?: {req}, end?: boolean) => {{"))
    .line(format!(
        "ipcRenderer.send('rpc-stream', {{service: '{service}', method: '{method}', args: req, reply, end}})"
    ))
    .open("if (end) {")
    .line("ipcRenderer.removeAllListeners(reply)")
    .close("}")
    .close("}")
    .close("}");
    buf.finish()
}
