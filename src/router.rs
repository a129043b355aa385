//! Map a URL fragment (`#/about`) to a value.

use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct Router<T> {
    default: T,
    routes: BTreeMap<String, T>,
}

impl<T: Clone> Router<T> {
    pub fn new<I, K>(default: T, routes: I) -> Self
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
    {
        Self {
            default,
            routes: routes.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Look up `hash` (including its leading `#`). An empty fragment routes
    /// to `/`; unknown routes fall back to the default.
    pub fn route(&self, hash: &str) -> T {
        let route = hash.strip_prefix('#').unwrap_or(hash);
        let route = if route.is_empty() { "/" } else { route };
        self.routes
            .get(route)
            .cloned()
            .unwrap_or_else(|| self.default.clone())
    }
}
