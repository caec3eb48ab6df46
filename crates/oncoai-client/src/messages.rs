//! User-facing copy. The service's audience is Spanish-speaking; the
//! landing page copy is English, as on the public site.

pub const MISSING_FIELDS: &str = "Por favor, completa todos los campos";
pub const PASSWORD_TOO_SHORT: &str = "La contraseña debe tener al menos 6 caracteres";
pub const LOGIN_REQUIRED: &str = "❌ Debes iniciar sesión primero";
pub const FILE_REQUIRED: &str = "❌ Selecciona un archivo CSV o Excel";
pub const LOGGED_OUT: &str = "✅ Sesión cerrada correctamente";
pub const LOADING_LABEL: &str = r#"<span class="loading"></span> Procesando..."#;
pub const FILE_LABEL_EMPTY: &str = "📁 Seleccionar archivo CSV/Excel";

// Generic fallbacks when the server sends no `detail`
pub const LOGIN_FAILED: &str = "Error de autenticación";
pub const REGISTER_FAILED: &str = "Error en el registro";
pub const PREDICT_FAILED: &str = "Error en la predicción";
pub const BATCH_FAILED: &str = "Error en la predicción batch";

pub const MODELS_AUTHENTICATED: &str =
    "We offer predictive models to help in oncology. Click on a model to make predictions.";
pub const MODELS_ANONYMOUS: &str =
    "We offer predictive models to help in oncology. Please authenticate to access our models.";

pub fn error(message: &str) -> String {
    format!("❌ Error: {}", message)
}

pub fn welcome(name: &str) -> String {
    format!("✅ Bienvenido/a, {}. Sesión iniciada correctamente.", name)
}

pub fn welcome_back(name: &str) -> String {
    format!("🔐 Bienvenido/a de nuevo, {}. Sesión activa.", name)
}

pub fn registered(username: &str) -> String {
    format!("✅ Usuario {} registrado. Ahora puedes iniciar sesión.", username)
}

pub fn file_label(file_name: &str) -> String {
    format!("📄 {}", file_name)
}
