//! End-to-end dispatcher tests over a root-registered test API.

use std::sync::{Arc, Mutex};

use serde_json::{json, Value};

use torii_dispatch::{Dispatcher, ExposedApi, Identity, Mapper, MethodDef, Registration};
use torii_protocol::{fault_codes, Fault, RpcRequest, RpcResponse};

/// Test API exposed by the dispatcher for these runs.
struct TestApi {
    identity: Option<Identity>,
}

impl TestApi {
    fn registration() -> Registration {
        Registration::factory("TestApi", |identity| Box::new(TestApi { identity }))
    }
}

impl ExposedApi for TestApi {
    fn name(&self) -> &'static str {
        "TestApi"
    }

    fn methods(&self) -> Vec<MethodDef> {
        vec![
            MethodDef::new("ping")
                .with_signature(&["str"])
                .with_doc("Return \"pong\""),
            MethodDef::new("echo").with_doc("Return the argument back to the caller"),
            MethodDef::new("boom")
                .with_doc("Raise a fault with the specified code and message"),
            MethodDef::new("internal_boom")
                .with_doc("Panic (this should be hidden behind an internal error fault)"),
            MethodDef::new("whoami"),
        ]
    }

    fn call(&self, method: &str, params: &[Value]) -> Result<Value, Fault> {
        match method {
            "ping" => Ok(json!("pong")),
            "echo" => match params {
                [value] => Ok(value.clone()),
                _ => Err(Fault::invalid_params("echo takes exactly one parameter")),
            },
            "boom" => match params {
                [Value::Number(code), Value::String(message)] => Err(Fault::new(
                    code.as_i64().unwrap_or(0) as i32,
                    message.clone(),
                )),
                _ => Err(Fault::invalid_params("boom takes a code and a message")),
            },
            "internal_boom" => panic!("internal boom"),
            "whoami" => Ok(match &self.identity {
                Some(identity) => json!(identity.username()),
                None => Value::Null,
            }),
            other => Err(Fault::method_not_found(other)),
        }
    }
}

fn make_dispatcher() -> Dispatcher {
    let mapper = Arc::new(Mapper::new());
    mapper.register_as("", TestApi::registration());
    Dispatcher::new(mapper)
}

/// Performs a full marshalled round trip, decoding the response envelope.
fn rpc_call(dispatcher: &Dispatcher, method: &str, params: Vec<Value>) -> Result<Value, Fault> {
    let request = RpcRequest::new(method, params).encode().expect("encode");
    let bytes = dispatcher.marshalled_dispatch(&request, None);
    let response: RpcResponse = serde_json::from_slice(&bytes).expect("response envelope");
    response.into_result()
}

#[test]
fn ping_returns_pong() {
    let dispatcher = make_dispatcher();
    assert_eq!(rpc_call(&dispatcher, "ping", vec![]).expect("value"), json!("pong"));
}

#[test]
fn echo_returns_argument() {
    let dispatcher = make_dispatcher();
    for value in [json!(1), json!("string"), json!(1.5)] {
        let got = rpc_call(&dispatcher, "echo", vec![value.clone()]).expect("value");
        assert_eq!(got, value);
    }
}

#[test]
fn unknown_method_yields_method_not_found() {
    let dispatcher = make_dispatcher();
    let fault = rpc_call(&dispatcher, "method_that_does_not_exist", vec![]).expect_err("fault");
    assert_eq!(fault.code, fault_codes::server_error::METHOD_NOT_FOUND);
    assert!(fault.message.contains("method_that_does_not_exist"));
}

#[test]
fn boom_fault_passes_through_verbatim() {
    let dispatcher = make_dispatcher();
    let fault =
        rpc_call(&dispatcher, "boom", vec![json!(1), json!("str")]).expect_err("fault");
    assert_eq!(fault.code, 1);
    assert_eq!(fault.message, "str");
}

#[test]
fn panic_becomes_internal_error_without_detail() {
    let dispatcher = make_dispatcher();
    let fault = rpc_call(&dispatcher, "internal_boom", vec![]).expect_err("fault");
    assert_eq!(fault.code, fault_codes::server_error::INTERNAL_RPC_ERROR);
    assert!(!fault.message.contains("internal boom"));
}

#[test]
fn internal_error_hook_observes_method_and_params() {
    let seen: Arc<Mutex<Option<(String, Vec<Value>)>>> = Arc::new(Mutex::new(None));
    let seen_by_hook = Arc::clone(&seen);

    let mapper = Arc::new(Mapper::new());
    mapper.register_as("", TestApi::registration());
    let dispatcher = Dispatcher::new(mapper).with_internal_error_hook(move |method, params| {
        *seen_by_hook.lock().expect("lock") = Some((method.to_string(), params.to_vec()));
    });

    let fault = rpc_call(&dispatcher, "internal_boom", vec![]).expect_err("fault");
    assert_eq!(fault.code, fault_codes::server_error::INTERNAL_RPC_ERROR);

    let observed = seen.lock().expect("lock").clone().expect("hook ran");
    assert_eq!(observed.0, "internal_boom");
    assert!(observed.1.is_empty());
}

#[test]
fn parse_error_for_malformed_body() {
    let dispatcher = make_dispatcher();
    let bytes = dispatcher.marshalled_dispatch(b"not json", None);
    let response: RpcResponse = serde_json::from_slice(&bytes).expect("envelope");
    let fault = response.into_result().expect_err("fault");
    assert_eq!(fault.code, fault_codes::parse_error::NOT_WELL_FORMED);
}

#[test]
fn invalid_envelope_for_wrong_shape() {
    let dispatcher = make_dispatcher();
    let bytes = dispatcher.marshalled_dispatch(br#"{"not_a_method": 1}"#, None);
    let response: RpcResponse = serde_json::from_slice(&bytes).expect("envelope");
    let fault = response.into_result().expect_err("fault");
    assert_eq!(fault.code, fault_codes::server_error::INVALID_RPC);
}

#[test]
fn decode_request_roundtrips_encode_request() {
    let dispatcher = make_dispatcher();
    let request = RpcRequest::new("echo", vec![json!(42)]).encode().expect("encode");
    let (method, params) = dispatcher.decode_request(&request).expect("decode");
    assert_eq!(method, "echo");
    assert_eq!(params, vec![json!(42)]);
}

#[test]
fn identity_reaches_factory_constructed_handler() {
    let mapper = Arc::new(Mapper::new());
    mapper.register_as("", TestApi::registration());
    let dispatcher = Dispatcher::new(mapper);

    let request = RpcRequest::new("whoami", vec![]).encode().expect("encode");
    let bytes = dispatcher.marshalled_dispatch(&request, Some(Identity::new("alice")));
    let response: RpcResponse = serde_json::from_slice(&bytes).expect("envelope");
    assert_eq!(response.into_result().expect("value"), json!("alice"));
}

#[test]
fn nil_result_faults_when_nil_disabled() {
    let mapper = Arc::new(Mapper::new());
    mapper.register_as("", TestApi::registration());
    let dispatcher = Dispatcher::new(mapper).with_allow_nil(false);

    // whoami returns null for anonymous callers.
    let fault = {
        let request = RpcRequest::new("whoami", vec![]).encode().expect("encode");
        let bytes = dispatcher.marshalled_dispatch(&request, None);
        let response: RpcResponse = serde_json::from_slice(&bytes).expect("envelope");
        response.into_result().expect_err("fault")
    };
    assert_eq!(fault.code, fault_codes::server_error::INTERNAL_RPC_ERROR);
}

#[test]
fn nil_result_allowed_by_default() {
    let dispatcher = make_dispatcher();
    assert_eq!(rpc_call(&dispatcher, "whoami", vec![]).expect("value"), Value::Null);
}
