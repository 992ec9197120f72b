//! Namespace scope tracking
//!
//! A scope records the prefix and default-namespace bindings active at a
//! point in document traversal. Bindings are stacked so that an inner
//! binding shadows an outer one for the same prefix and the outer binding
//! becomes visible again once the inner scope ends.

use std::collections::HashMap;

use crate::node::Namespace;

/// A value encapsulating a scope for namespace names.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    /// The namespaces by prefix, ordered by scope depth.
    ///
    /// The current namespace for a given prefix is the last element.
    namespaces_by_prefix: HashMap<String, Vec<Namespace>>,
    /// The default namespaces, ordered by scope depth.
    default_namespaces: Vec<Namespace>,
}

impl Scope {
    /// Returns the innermost namespace associated with a given prefix.
    pub fn namespace_for_prefix(&self, prefix: &str) -> Option<&Namespace> {
        self.namespaces_by_prefix.get(prefix)?.last()
    }

    /// Associates a given prefix with a given namespace.
    pub fn begin_scope(&mut self, prefix: &str, namespace: Namespace) {
        self.namespaces_by_prefix
            .entry(prefix.to_owned())
            .or_default()
            .push(namespace);
    }

    /// Disassociates a given prefix from its current namespace.
    ///
    /// # Panics
    /// Panics if no binding is active for the prefix. The event source must
    /// only end scopes it has begun.
    pub fn end_scope(&mut self, prefix: &str) {
        let popped = self
            .namespaces_by_prefix
            .get_mut(prefix)
            .and_then(Vec::pop);
        assert!(
            popped.is_some(),
            "unbalanced end of namespace scope for prefix {prefix:?}"
        );
    }

    /// The current default namespace.
    pub fn default_namespace(&self) -> Option<&Namespace> {
        self.default_namespaces.last()
    }

    /// Sets the default namespace.
    pub fn begin_default_scope(&mut self, namespace: Namespace) {
        self.default_namespaces.push(namespace);
    }

    /// Removes the default namespace, reverting to the previous default
    /// namespace if available.
    ///
    /// # Panics
    /// Panics if no default binding is active.
    pub fn end_default_scope(&mut self) {
        assert!(
            self.default_namespaces.pop().is_some(),
            "unbalanced end of default namespace scope"
        );
    }
}
