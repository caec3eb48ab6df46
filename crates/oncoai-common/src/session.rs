//! Session and user profile types.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Display name used when no stored profile is readable.
pub const DEFAULT_DISPLAY_NAME: &str = "Usuario";

/// Public profile returned alongside an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserInfo {
    pub fn new(username: impl Into<String>) -> Self {
        Self { username: username.into(), name: None, email: None }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Full name if set and non-empty, otherwise the username.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(n) if !n.is_empty() => n,
            _ => &self.username,
        }
    }
}

/// An authenticated session. Presence of a token means "logged in".
#[derive(Debug, Clone)]
pub struct Session {
    pub token: SecretString,
    pub user: Option<UserInfo>,
}

impl Session {
    pub fn new(token: impl Into<String>, user: Option<UserInfo>) -> Self {
        Self { token: SecretString::from(token.into()), user }
    }

    /// Value for an `Authorization: Bearer` header.
    pub fn bearer(&self) -> &str {
        self.token.expose_secret()
    }

    pub fn display_name(&self) -> &str {
        self.user.as_ref().map(UserInfo::display_name).unwrap_or(DEFAULT_DISPLAY_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_prefers_full_name() {
        assert_eq!(UserInfo::new("alice").with_name("Alice Liddell").display_name(), "Alice Liddell");
        assert_eq!(UserInfo::new("alice").display_name(), "alice");
        assert_eq!(UserInfo::new("alice").with_name("").display_name(), "alice");
    }

    #[test]
    fn test_user_info_tolerates_missing_optionals() {
        let user: UserInfo = serde_json::from_str(r#"{"username":"bob"}"#).unwrap();
        assert_eq!(user, UserInfo::new("bob"));
        assert_eq!(serde_json::to_string(&user).unwrap(), r#"{"username":"bob"}"#);
    }

    #[test]
    fn test_session_without_user_uses_default_name() {
        let s = Session::new("tok", None);
        assert_eq!(s.display_name(), DEFAULT_DISPLAY_NAME);
        assert_eq!(s.bearer(), "tok");
    }
}
