//! Tests for the `system` introspection namespace.

use std::sync::Arc;

use serde_json::{json, Value};

use torii_dispatch::{Dispatcher, ExposedApi, Mapper, MethodDef, Registration};
use torii_protocol::{fault_codes, Fault};

struct DocApi;

impl ExposedApi for DocApi {
    fn name(&self) -> &'static str {
        "DocApi"
    }

    fn methods(&self) -> Vec<MethodDef> {
        vec![
            MethodDef::new("undocumented"),
            MethodDef::new("documented").with_doc("docstring"),
            MethodDef::new("indented").with_doc(
                "
                line 1
                line 2
                ",
            ),
            MethodDef::new("int_to_str").with_signature(&["str", "int"]),
        ]
    }

    fn call(&self, _method: &str, _params: &[Value]) -> Result<Value, Fault> {
        Ok(Value::Null)
    }
}

fn make_mapper() -> Arc<Mapper> {
    let mapper = Arc::new(Mapper::new());
    mapper.register(Registration::singleton(Arc::new(DocApi)));
    mapper.register_introspection_methods();
    mapper
}

fn system_call(mapper: &Arc<Mapper>, method: &str, params: Vec<Value>) -> Result<Value, Fault> {
    Dispatcher::new(Arc::clone(mapper)).dispatch(method, &params, None)
}

#[test]
fn list_methods_includes_system_namespace() {
    let mapper = make_mapper();
    let listed = system_call(&mapper, "system.listMethods", vec![]).expect("value");
    assert_eq!(
        listed,
        json!([
            "DocApi.documented",
            "DocApi.indented",
            "DocApi.int_to_str",
            "DocApi.undocumented",
            "system.listMethods",
            "system.methodHelp",
            "system.methodSignature",
        ])
    );
}

#[test]
fn method_signature_returns_undef_by_default() {
    let mapper = make_mapper();
    let sig = system_call(
        &mapper,
        "system.methodSignature",
        vec![json!("DocApi.undocumented")],
    )
    .expect("value");
    assert_eq!(sig, json!("undef"));
}

#[test]
fn method_signature_returns_declared_signature() {
    let mapper = make_mapper();
    let sig = system_call(
        &mapper,
        "system.methodSignature",
        vec![json!("DocApi.int_to_str")],
    )
    .expect("value");
    assert_eq!(sig, json!(["str", "int"]));
}

#[test]
fn method_signature_blank_for_unknown_method() {
    let mapper = make_mapper();
    let sig = system_call(
        &mapper,
        "system.methodSignature",
        vec![json!("DocApi.missing")],
    )
    .expect("value");
    assert_eq!(sig, json!(""));
}

#[test]
fn method_help_returns_blank_without_doc() {
    let mapper = make_mapper();
    let help = system_call(
        &mapper,
        "system.methodHelp",
        vec![json!("DocApi.undocumented")],
    )
    .expect("value");
    assert_eq!(help, json!(""));
}

#[test]
fn method_help_returns_the_doc() {
    let mapper = make_mapper();
    let help = system_call(
        &mapper,
        "system.methodHelp",
        vec![json!("DocApi.documented")],
    )
    .expect("value");
    assert_eq!(help, json!("docstring"));
}

#[test]
fn method_help_strips_leading_whitespace() {
    let mapper = make_mapper();
    let help = system_call(&mapper, "system.methodHelp", vec![json!("DocApi.indented")])
        .expect("value");
    assert_eq!(help, json!("line 1\nline 2"));
}

#[test]
fn method_help_declares_its_own_signature() {
    let mapper = make_mapper();
    let sig = system_call(
        &mapper,
        "system.methodSignature",
        vec![json!("system.methodHelp")],
    )
    .expect("value");
    assert_eq!(sig, json!(["str", "str"]));
}

#[test]
fn wrong_parameters_yield_invalid_params_fault() {
    let mapper = make_mapper();
    let fault = system_call(&mapper, "system.methodHelp", vec![]).expect_err("fault");
    assert_eq!(
        fault.code,
        fault_codes::server_error::INVALID_METHOD_PARAMETERS
    );
    let fault =
        system_call(&mapper, "system.methodSignature", vec![json!(1)]).expect_err("fault");
    assert_eq!(
        fault.code,
        fault_codes::server_error::INVALID_METHOD_PARAMETERS
    );
}
