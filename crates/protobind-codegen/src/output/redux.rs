//! Pieces shared by the TypeScript and Flow Redux dialects: action names,
//! the `RPC` thunk map, the state type, its initial value and the reducer.

use crate::names::{action_name, lower_leading_run};
use crate::output::js::comma_separated;
use crate::traits::ServiceContext;
use crate::writer::CodeBuffer;

/// Syntax differences between the two Redux targets.
pub(crate) struct Flavor {
    /// Spell "T or nothing".
    pub optional: fn(&str) -> String,
    /// Reducer declaration, given the reducer, state type and initial state
    /// names.
    pub reducer_header: fn(&str, &str, &str) -> String,
}

/// Names of the per-service exports.
///
/// A file with one service keeps the plain `RPC` / `RPCState` / `reducer`
/// names; when services share a file each name is prefixed with its service
/// so the exports do not collide.
pub(crate) struct Exports {
    pub rpc: String,
    pub state: String,
    pub initial: String,
    pub reducer: String,
}

impl Exports {
    pub fn for_service(service: &ServiceContext<'_>) -> Self {
        if !service.is_shared_file() {
            return Self {
                rpc: "RPC".to_string(),
                state: "RPCState".to_string(),
                initial: "initialState".to_string(),
                reducer: "reducer".to_string(),
            };
        }
        let name = &service.service.name;
        let lower = lower_leading_run(name);
        Self {
            rpc: format!("{}RPC", name),
            state: format!("{}RPCState", name),
            initial: format!("{}InitialState", lower),
            reducer: format!("{}Reducer", lower),
        }
    }
}

/// Exported thunk name: `GetFeature` → `getFeature`.
pub(crate) fn thunk_name(method: &str) -> String {
    lower_leading_run(method)
}

/// `SERVICE_METHOD` action prefix: `RouteGuide` + `GetFeature` →
/// `ROUTEGUIDE_GET_FEATURE`.
pub(crate) fn action(service: &str, method: &str) -> String {
    action_name(service, &thunk_name(method))
}

/// Render the thunks followed by the `RPC` map, state type, initial state and
/// reducer for one service.
///
/// Bindings pair with the service's methods in declaration order, the order
/// both Redux dialects visit them in.
pub(crate) fn render_service(flavor: &Flavor, service: &ServiceContext<'_>) -> String {
    let exports = Exports::for_service(service);
    let bindings = service.bindings;
    let mut buf = CodeBuffer::new("  ");

    for binding in bindings {
        buf.raw(&binding.fragment).blank();
    }

    buf.open(format!("export const {} = {{", exports.rpc))
        .lines(comma_separated(bindings.iter().map(|b| b.export.clone())))
        .close("}")
        .blank();

    buf.open(format!("export type {} = {{", exports.state))
        .lines(comma_separated(bindings.iter().flat_map(|b| {
            [
                format!("{}Loading: boolean", b.export),
                format!("{}Request: {}", b.export, (flavor.optional)(&b.request_type)),
                format!("{}: {}", b.export, (flavor.optional)(&b.response_type)),
            ]
        })))
        .close("}")
        .blank();

    buf.open(format!("const {}: {} = {{", exports.initial, exports.state))
        .lines(comma_separated(bindings.iter().flat_map(|b| {
            [
                format!("{}Loading: false", b.export),
                format!("{}Request: null", b.export),
                format!("{}: null", b.export),
            ]
        })))
        .close("}")
        .blank();

    buf.open((flavor.reducer_header)(
        &exports.reducer,
        &exports.state,
        &exports.initial,
    ))
    .open("switch (action.type) {");
    for (method, binding) in service.service.methods.iter().zip(bindings) {
        let prefix = action(&service.service.name, &method.name);
        let name = &binding.export;
        buf.open(format!("case '{}_REQUEST': {{", prefix))
            .open("return {")
            .line("...state,")
            .line(format!("{}Loading: true,", name))
            .line(format!("{}Request: action.payload,", name))
            .close("}")
            .close("}")
            .open(format!("case '{}_RESPONSE': {{", prefix))
            .open("return {")
            .line("...state,")
            .line(format!("{}Loading: false,", name))
            .line(format!("{}Request: null,", name))
            .line(format!("{}: action.payload,", name))
            .close("}")
            .close("}");
    }
    buf.open("default:")
        .line("return state")
        .dedent()
        .close("}")
        .close("}");

    buf.finish()
}
