//! The contract a handler group must satisfy to be dispatchable.

use serde_json::{json, Value};

use torii_protocol::Fault;

/// Signature reported for a method whose signature is not declared.
/// See: <http://xmlrpc-c.sourceforge.net/introspection.html>
pub const UNDECLARED_SIGNATURE: &str = "undef";

/// Descriptor of one exposed operation.
///
/// Handler groups declare their operations explicitly; the mapper and the
/// introspection API operate purely over this declared set, never over the
/// concrete type's shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDef {
    /// Method name, unqualified. Names starting with `_` are never
    /// exposed by the mapper.
    pub name: &'static str,
    /// Declared signature, return type first. `None` means the signature
    /// is not declared (introspection reports `"undef"`).
    ///
    /// Purely presentational; the dispatcher does not check parameters
    /// against it.
    pub signature: Option<&'static [&'static str]>,
    /// Documentation string shown to developers browsing the service.
    pub doc: &'static str,
}

impl MethodDef {
    /// Creates a descriptor with no signature and no documentation.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            signature: None,
            doc: "",
        }
    }

    /// Attaches a declared signature (return type first).
    pub fn with_signature(mut self, signature: &'static [&'static str]) -> Self {
        self.signature = Some(signature);
        self
    }

    /// Attaches a documentation string.
    pub fn with_doc(mut self, doc: &'static str) -> Self {
        self.doc = doc;
        self
    }

    /// The documentation string with common leading indentation
    /// stripped, as shown to developers browsing the service.
    pub fn help(&self) -> String {
        dedent(self.doc)
    }

    /// The declared signature as a JSON array, or the literal string
    /// [`UNDECLARED_SIGNATURE`] when none is declared. Every surface
    /// that reports signatures goes through this one place.
    pub fn signature_value(&self) -> Value {
        match self.signature {
            Some(signature) => json!(signature),
            None => json!(UNDECLARED_SIGNATURE),
        }
    }
}

/// Strips common leading indentation from a documentation string.
///
/// The first line is trimmed on its own; the common margin is computed
/// over the remaining non-blank lines. Leading and trailing blank lines
/// are dropped.
fn dedent(doc: &str) -> String {
    let lines: Vec<&str> = doc.lines().collect();
    let margin = lines
        .iter()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    for (i, line) in lines.iter().enumerate() {
        if i == 0 {
            out.push(line.trim().to_string());
        } else {
            out.push(strip_margin(line, margin).trim_end().to_string());
        }
    }
    while out.first().is_some_and(|line| line.is_empty()) {
        out.remove(0);
    }
    while out.last().is_some_and(|line| line.is_empty()) {
        out.pop();
    }
    out.join("\n")
}

/// Removes up to `margin` leading whitespace characters from a line.
fn strip_margin(line: &str, margin: usize) -> &str {
    let mut stripped = 0;
    for (idx, ch) in line.char_indices() {
        if stripped == margin || !ch.is_whitespace() {
            return &line[idx..];
        }
        stripped += 1;
    }
    ""
}

/// A handler group: a constructible unit exposing named public operations.
///
/// Implementations declare their operations in [`methods`](Self::methods)
/// and route invocations in [`call`](Self::call). A call either returns a
/// value or raises a [`Fault`] deliberately surfaced to the caller; any
/// panic is contained by the dispatcher and replaced with the generic
/// internal-error fault.
pub trait ExposedApi: Send + Sync {
    /// Default namespace name used when the group is registered without
    /// an explicit name.
    fn name(&self) -> &'static str;

    /// The ordered set of declared public operations.
    fn methods(&self) -> Vec<MethodDef>;

    /// Invokes a declared operation with positional parameters.
    ///
    /// The mapper only routes names present in [`methods`](Self::methods),
    /// so implementations may treat an unknown `method` as unreachable and
    /// answer it with a fault.
    fn call(&self, method: &str, params: &[Value]) -> Result<Value, Fault>;
}
