//! The login gate in front of the control screen.
//!
//! A purely local comparison -- no request leaves the machine and nothing
//! server-side is protected by it. The defaults reproduce the shipped
//! credentials; deployments can override both via configuration.

use secrecy::{ExposeSecret, SecretString};

use crate::error::CoreError;

/// Username accepted by a gate built with [`LoginGate::default`].
pub const DEFAULT_USERNAME: &str = "adthi";
/// Password accepted by a gate built with [`LoginGate::default`].
pub const DEFAULT_PASSWORD: &str = "12345678";

/// The exact message shown on a failed login.
pub const MISMATCH_MESSAGE: &str = "Wrong username or password ,pls correct it";

/// Local credential check gating access to the control screen.
pub struct LoginGate {
    username: String,
    password: SecretString,
}

impl LoginGate {
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }

    /// Check a credential pair. `Ok` means the caller may navigate to the
    /// control view; the error carries the message to display verbatim.
    pub fn verify(&self, username: &str, password: &str) -> Result<(), CoreError> {
        if username == self.username && password == self.password.expose_secret() {
            Ok(())
        } else {
            tracing::debug!(username, "login rejected");
            Err(CoreError::LoginRejected {
                message: MISMATCH_MESSAGE.into(),
            })
        }
    }
}

impl Default for LoginGate {
    fn default() -> Self {
        Self::new(DEFAULT_USERNAME, SecretString::from(DEFAULT_PASSWORD))
    }
}
