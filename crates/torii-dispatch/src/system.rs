//! Built-in introspection handler group, mounted at the `system`
//! namespace.

use std::sync::Weak;

use serde_json::{json, Value};

use torii_protocol::Fault;

use crate::api::{ExposedApi, MethodDef};
use crate::mapper::Mapper;

/// Introspection API over a [`Mapper`], using only its public contract.
///
/// Register it through [`Mapper::register_introspection_methods`], which
/// mounts a singleton under `"system"`. It holds a weak back-reference to
/// the mapper, so the mapper stays droppable.
pub struct SystemApi {
    mapper: Weak<Mapper>,
}

impl SystemApi {
    /// Creates an introspection API over the given mapper.
    pub fn new(mapper: Weak<Mapper>) -> Self {
        Self { mapper }
    }

    fn mapper(&self) -> Result<std::sync::Arc<Mapper>, Fault> {
        self.mapper.upgrade().ok_or_else(|| {
            tracing::error!("introspection api outlived its mapper");
            Fault::internal_error()
        })
    }

    fn method_signature(&self, name: &str) -> Result<Value, Fault> {
        match self.mapper()?.lookup(name, None) {
            None => Ok(json!("")),
            Some(bound) => Ok(bound.descriptor().signature_value()),
        }
    }

    fn method_help(&self, name: &str) -> Result<Value, Fault> {
        match self.mapper()?.lookup(name, None) {
            None => Ok(json!("")),
            Some(bound) => Ok(json!(bound.descriptor().help())),
        }
    }
}

impl ExposedApi for SystemApi {
    fn name(&self) -> &'static str {
        "system"
    }

    fn methods(&self) -> Vec<MethodDef> {
        vec![
            MethodDef::new("listMethods"),
            MethodDef::new("methodSignature"),
            MethodDef::new("methodHelp")
                .with_signature(&["str", "str"])
                .with_doc("Return documentation for the specified method"),
        ]
    }

    fn call(&self, method: &str, params: &[Value]) -> Result<Value, Fault> {
        match method {
            "listMethods" => Ok(json!(self.mapper()?.list_methods())),
            "methodSignature" => self.method_signature(one_string_param(method, params)?),
            "methodHelp" => self.method_help(one_string_param(method, params)?),
            other => Err(Fault::method_not_found(other)),
        }
    }
}

/// Extracts the single string parameter the introspection methods take.
fn one_string_param<'p>(method: &str, params: &'p [Value]) -> Result<&'p str, Fault> {
    match params {
        [Value::String(name)] => Ok(name),
        _ => Err(Fault::invalid_params(format!(
            "{method} takes exactly one string parameter"
        ))),
    }
}
