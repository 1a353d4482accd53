//! Proxy configuration.

use serde::{Deserialize, Serialize};

use crate::ProxyError;

/// Proxy type token accepted in the `type` field of a proxy definition.
pub const PROXY_TYPE: &str = "localkv";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Configuration for a [`LocalKeyValueProxy`](crate::LocalKeyValueProxy).
///
/// Mirrors the proxy block of a model definition:
///
/// ```json
/// { "type": "localkv", "id": "users" }
/// ```
pub struct ProxyConfig {
    /// Proxy type token; must equal [`PROXY_TYPE`].
    #[serde(rename = "type")]
    pub proxy_type: String,
    /// Storage namespace. All records handled by the proxy live under this id.
    pub id: Option<String>,
    /// Id of the record collection that owns the proxy, used when `id` is not given.
    #[serde(alias = "storeId")]
    pub store_id: Option<String>,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            proxy_type: PROXY_TYPE.to_string(),
            id: None,
            store_id: None,
        }
    }
}

impl ProxyConfig {
    /// Creates a configuration with an explicit storage namespace.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Sets the owning collection id used as a namespace fallback.
    pub fn with_store_id(mut self, store_id: impl Into<String>) -> Self {
        self.store_id = Some(store_id.into());
        self
    }

    /// Parses a proxy definition from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ProxyError::Configuration`] when the JSON is malformed.
    pub fn from_json(raw: &str) -> Result<Self, ProxyError> {
        serde_json::from_str(raw).map_err(|e| ProxyError::Configuration(e.to_string()))
    }

    /// Resolves the storage namespace: the explicit id, else the owning collection id.
    ///
    /// # Errors
    ///
    /// Returns [`ProxyError::Configuration`] when the proxy type is not [`PROXY_TYPE`] or when
    /// neither id is present and non-blank.
    pub fn resolve_id(&self) -> Result<String, ProxyError> {
        if self.proxy_type != PROXY_TYPE {
            return Err(ProxyError::Configuration(format!(
                "proxy type `{}` is not `{PROXY_TYPE}`",
                self.proxy_type
            )));
        }

        [self.id.as_deref(), self.store_id.as_deref()]
            .into_iter()
            .flatten()
            .find(|id| !id.trim().is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                ProxyError::Configuration(
                    "no unique id was provided to the local key-value proxy".to_string(),
                )
            })
    }
}
