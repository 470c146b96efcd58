//! Signed-in session state
//!
//! Sign-in and sign-out happen at the external auth provider. The client only
//! records whether a session is present and which identity it carries.

/// Authenticated identity reported by the auth provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    label: String,
}

impl Session {
    /// Session identified by `label` (typically the account email)
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}
