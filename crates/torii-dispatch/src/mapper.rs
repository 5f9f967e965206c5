//! Registry and resolver from qualified method names to bound operations.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use serde_json::Value;

use torii_protocol::Fault;

use crate::api::{ExposedApi, MethodDef};
use crate::identity::Identity;
use crate::system::SystemApi;

/// Namespace reserved for the introspection API.
pub const SYSTEM_NAMESPACE: &str = "system";

/// How a handler group is registered under a namespace.
///
/// Factories get a fresh instance per call, constructed with the caller's
/// identity, so per-request state is naturally isolated. Singletons are
/// shared across calls and ignore the identity; making a shared instance
/// thread-safe is the registrant's responsibility.
pub enum Registration {
    /// Construct a fresh handler group per lookup.
    Factory {
        /// Default namespace name for [`Mapper::register`].
        name: &'static str,
        /// Constructor invoked with the caller's identity.
        make: Box<dyn Fn(Option<Identity>) -> Box<dyn ExposedApi> + Send + Sync>,
    },
    /// A shared instance, registered once and reused for every call.
    Singleton(Arc<dyn ExposedApi>),
}

impl Registration {
    /// Creates a factory registration.
    pub fn factory(
        name: &'static str,
        make: impl Fn(Option<Identity>) -> Box<dyn ExposedApi> + Send + Sync + 'static,
    ) -> Self {
        Self::Factory {
            name,
            make: Box::new(make),
        }
    }

    /// Creates a singleton registration.
    pub fn singleton(instance: Arc<dyn ExposedApi>) -> Self {
        Self::Singleton(instance)
    }

    /// The namespace name used when none is given explicitly.
    fn default_name(&self) -> &'static str {
        match self {
            Self::Factory { name, .. } => name,
            Self::Singleton(instance) => instance.name(),
        }
    }

    /// Resolves the registration into a concrete handler group.
    fn instantiate(&self, identity: Option<Identity>) -> ApiHandle {
        match self {
            Self::Factory { make, .. } => ApiHandle::Owned(make(identity)),
            Self::Singleton(instance) => ApiHandle::Shared(Arc::clone(instance)),
        }
    }
}

/// A resolved handler group, either freshly constructed or shared.
enum ApiHandle {
    Owned(Box<dyn ExposedApi>),
    Shared(Arc<dyn ExposedApi>),
}

impl ApiHandle {
    fn api(&self) -> &dyn ExposedApi {
        match self {
            Self::Owned(api) => api.as_ref(),
            Self::Shared(api) => api.as_ref(),
        }
    }
}

/// An operation bound to a resolved handler group, ready to invoke.
pub struct BoundMethod {
    handle: ApiHandle,
    def: MethodDef,
}

impl BoundMethod {
    /// Invokes the operation with positional parameters.
    pub fn invoke(&self, params: &[Value]) -> Result<Value, Fault> {
        self.handle.api().call(self.def.name, params)
    }

    /// The declared descriptor of the bound operation.
    pub fn descriptor(&self) -> &MethodDef {
        &self.def
    }
}

/// Maps namespace names to registered handler groups and resolves
/// qualified method names (`namespace.method`, or bare `method` in the
/// root namespace) to bound operations.
///
/// Registration is expected to complete during startup, before concurrent
/// dispatch begins; afterwards the table is read-only. There is no
/// process-wide default mapper; construct one and share it via `Arc`.
pub struct Mapper {
    registered: RwLock<HashMap<String, Registration>>,
}

impl Mapper {
    /// Creates an empty mapper.
    pub fn new() -> Self {
        Self {
            registered: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a handler group under its own declared name.
    ///
    /// Re-registering a name silently overwrites the previous binding.
    pub fn register(&self, registration: Registration) {
        let name = registration.default_name().to_string();
        self.register_as(name, registration);
    }

    /// Registers a handler group under an explicit namespace name.
    ///
    /// The empty string is the root namespace, whose methods are addressed
    /// without a prefix. Re-registering a name silently overwrites.
    pub fn register_as(&self, name: impl Into<String>, registration: Registration) {
        self.registered
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into(), registration);
    }

    /// Resolves a qualified method name into a bound operation.
    ///
    /// Splits on the first `.`; a bare name resolves in the root
    /// namespace. Returns `None` when the method name is `_`-prefixed
    /// (private by convention), the namespace is not registered, or the
    /// name is not in the target's declared method set.
    ///
    /// For factory registrations the handler group is constructed fresh
    /// with `identity`; singletons are shared and the identity is ignored.
    pub fn lookup(&self, qualified: &str, identity: Option<Identity>) -> Option<BoundMethod> {
        let (namespace, method) = match qualified.split_once('.') {
            Some((namespace, method)) => (namespace, method),
            None => ("", qualified),
        };
        if method.starts_with('_') {
            return None;
        }
        let registered = self.read_registered();
        let handle = registered.get(namespace)?.instantiate(identity);
        let def = handle.api().methods().into_iter().find(|def| def.name == method)?;
        Some(BoundMethod { handle, def })
    }

    /// Returns the sorted qualified names of every exposed method.
    ///
    /// Root-namespace methods appear unqualified, all others as
    /// `namespace.method`. Sorted lexicographically.
    pub fn list_methods(&self) -> Vec<String> {
        let registered = self.read_registered();
        let mut methods = Vec::new();
        for (namespace, registration) in registered.iter() {
            let handle = registration.instantiate(None);
            for def in handle.api().methods() {
                if def.name.starts_with('_') {
                    continue;
                }
                if namespace.is_empty() {
                    methods.push(def.name.to_string());
                } else {
                    methods.push(format!("{namespace}.{}", def.name));
                }
            }
        }
        methods.sort();
        methods
    }

    /// Registers a [`SystemApi`] singleton under the `"system"` namespace.
    ///
    /// The instance holds a weak back-reference to this mapper, so the
    /// mapper must be kept alive by the caller for introspection to
    /// answer.
    pub fn register_introspection_methods(self: &Arc<Self>) {
        let system = Arc::new(SystemApi::new(Arc::downgrade(self)));
        self.register_as(SYSTEM_NAMESPACE, Registration::singleton(system));
    }

    // The map itself stays valid even if a writer panicked, so a poisoned
    // lock is recovered rather than propagated.
    fn read_registered(&self) -> RwLockReadGuard<'_, HashMap<String, Registration>> {
        self.registered.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Mapper {
    fn default() -> Self {
        Self::new()
    }
}
