/*!
 * Credential providers for outbound requests.
 *
 * A provider is handed to the HTTP client when it is built and consulted on
 * every request. Returning `None` sends the request unauthenticated.
 */

use std::fmt::Debug;
use std::path::PathBuf;

use log::debug;

/// Source of the bearer token attached to catalog and backend requests
pub trait CredentialProvider: Send + Sync + Debug {
    /// Current bearer token, if any
    fn bearer_token(&self) -> Option<String>;
}

/// Never attaches a token
#[derive(Debug, Default, Clone)]
pub struct NoCredentials;

impl CredentialProvider for NoCredentials {
    fn bearer_token(&self) -> Option<String> {
        None
    }
}

/// A fixed token supplied at startup
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

// Keep the token out of debug output.
impl Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("StaticToken").field(&"***").finish()
    }
}

impl CredentialProvider for StaticToken {
    fn bearer_token(&self) -> Option<String> {
        non_blank(&self.0)
    }
}

/// Reads the token from an environment variable on every request
#[derive(Debug, Clone)]
pub struct EnvToken {
    var: String,
}

impl EnvToken {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl CredentialProvider for EnvToken {
    fn bearer_token(&self) -> Option<String> {
        std::env::var(&self.var).ok().and_then(|value| non_blank(&value))
    }
}

/// Reads the token from a file on every request, so an external process can
/// rotate it without restarting us
#[derive(Debug, Clone)]
pub struct FileToken {
    path: PathBuf,
}

impl FileToken {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CredentialProvider for FileToken {
    fn bearer_token(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => non_blank(&contents),
            Err(e) => {
                debug!("No token read from {:?}: {}", self.path, e);
                None
            }
        }
    }
}

fn non_blank(token: &str) -> Option<String> {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
