//! Session-scoped proxy endpoint resolution.

use std::fmt;

use url::Url;

/// Placeholder substituted with the session id.
pub const SESSION_PLACEHOLDER: &str = "{sessionId}";

/// Proxy URL template loaded once at startup.
///
/// The template may embed credentials, so `Debug` redacts like
/// [`ProxyEndpoint`]'s `Display`.
#[derive(Clone, PartialEq, Eq)]
pub struct ProxyTemplate(String);

impl ProxyTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn has_placeholder(&self) -> bool {
        self.0.contains(SESSION_PLACEHOLDER)
    }

    /// Replace every placeholder occurrence with `session_id`, verbatim.
    ///
    /// No escaping is applied; a session id with URL-hostile characters
    /// produces an endpoint the client will fail to use.
    pub fn resolve(&self, session_id: &str) -> ProxyEndpoint {
        ProxyEndpoint(self.0.replace(SESSION_PLACEHOLDER, session_id))
    }
}

impl fmt::Debug for ProxyTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ProxyTemplate").field(&redact(&self.0)).finish()
    }
}

/// A concrete upstream proxy URL for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyEndpoint(String);

impl ProxyEndpoint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Displays with any password replaced, for logging.
impl fmt::Display for ProxyEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(&self.0))
    }
}

fn redact(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(mut url) if url.password().is_some() => {
            let _ = url.set_password(Some("***"));
            url.to_string()
        }
        Ok(_) => raw.to_string(),
        Err(_) => "<unparseable proxy url>".to_string(),
    }
}
