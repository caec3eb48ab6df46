use thiserror::Error;

#[derive(Debug, Error)]
pub enum OncoaiError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Non-2xx response. `detail` is the server's `detail` field when the
    /// body was JSON and carried one.
    #[error("API error [{status}]: {}", detail.as_deref().unwrap_or("no detail"))]
    Api { status: u16, detail: Option<String> },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl OncoaiError {
    /// Server-provided detail message, if this error carries one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            OncoaiError::Api { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Message shown inline to the user: the server detail when present,
    /// otherwise `fallback`.
    pub fn user_message<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self {
            OncoaiError::Validation(msg) => msg,
            _ => self.detail().unwrap_or(fallback),
        }
    }
}

pub type Result<T> = std::result::Result<T, OncoaiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_detail() {
        let err = OncoaiError::Api { status: 401, detail: Some("Usuario o contraseña incorrectos".into()) };
        assert_eq!(err.user_message("Error de autenticación"), "Usuario o contraseña incorrectos");
    }

    #[test]
    fn test_user_message_falls_back_without_detail() {
        let err = OncoaiError::Api { status: 500, detail: None };
        assert_eq!(err.user_message("Error en la predicción"), "Error en la predicción");

        let err = OncoaiError::Io(std::io::Error::other("disk full"));
        assert_eq!(err.user_message("Error en el registro"), "Error en el registro");
    }
}
