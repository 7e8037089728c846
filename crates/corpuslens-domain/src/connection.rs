//! Connection module - credentials and identifiers for one remote corpus

use std::fmt;

/// Default API root of the hosted retrieval service.
///
/// Versioned paths (`/v2/...`, `/v1/index`) are appended per call.
pub const DEFAULT_BASE_URL: &str = "https://api.vectara.io";

/// Connection parameters for a single remote corpus.
///
/// A connection is immutable once constructed. The API key never appears in
/// `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Connection {
    api_key: String,
    customer_id: String,
    corpus_id: String,
    base_url: String,
}

impl Connection {
    /// Create a connection against the default base URL.
    ///
    /// All three fields are trimmed and must be non-empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use corpuslens_domain::Connection;
    ///
    /// let conn = Connection::new("zut_abc", "1234", "5").unwrap();
    /// assert_eq!(conn.corpus_id(), "5");
    /// assert!(Connection::new("", "1234", "5").is_err());
    /// ```
    pub fn new(
        api_key: impl Into<String>,
        customer_id: impl Into<String>,
        corpus_id: impl Into<String>,
    ) -> Result<Self, String> {
        let api_key = api_key.into().trim().to_string();
        let customer_id = customer_id.into().trim().to_string();
        let corpus_id = corpus_id.into().trim().to_string();

        for (field, value) in [
            ("API key", &api_key),
            ("customer ID", &customer_id),
            ("corpus ID", &corpus_id),
        ] {
            if value.is_empty() {
                return Err(format!("{} must not be empty", field));
            }
        }

        Ok(Self {
            api_key,
            customer_id,
            corpus_id,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Point the connection at a different API root (trailing `/` removed).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// API key presented on every call
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Tenant (customer) identifier
    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    /// Corpus identifier or key
    pub fn corpus_id(&self) -> &str {
        &self.corpus_id
    }

    /// API root without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("api_key", &"<redacted>")
            .field("customer_id", &self.customer_id)
            .field("corpus_id", &self.corpus_id)
            .field("base_url", &self.base_url)
            .finish()
    }
}
