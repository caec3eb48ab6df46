//! Page model.
//!
//! Controllers never touch a real browser: they drive a `Dom`, which
//! exposes the handful of element operations the pages need. `Document` is
//! the in-memory implementation used by the CLI and all tests.

use std::collections::{BTreeMap, HashMap};

/// Element ids shared by the pages.
pub mod ids {
    // Survival page sections
    pub const LOGIN_SECTION: &str = "login-section";
    pub const MANUAL_SECTION: &str = "manual-section";
    pub const BATCH_SECTION: &str = "batch-section";
    pub const LOGOUT_SECTION: &str = "logout-section";

    // Forms
    pub const PASSWORD_FORM: &str = "password-form";
    pub const REGISTER_FORM: &str = "register-form";
    pub const PREDICT_FORM: &str = "predictForm";
    pub const BATCH_FORM: &str = "batchForm";
    pub const AUTH_FORMS: [&str; 2] = [PASSWORD_FORM, REGISTER_FORM];

    // Buttons
    pub const LOGIN_SUBMIT: &str = "login-submit";
    pub const REGISTER_SUBMIT: &str = "submit-register";
    pub const PREDICT_SUBMIT: &str = "predict-submit";
    pub const BATCH_SUBMIT: &str = "batch-submit";
    pub const SUBMIT_BUTTONS: [&str; 4] = [LOGIN_SUBMIT, REGISTER_SUBMIT, PREDICT_SUBMIT, BATCH_SUBMIT];
    pub const REGISTER_BUTTON: &str = "register-btn";
    pub const LOGOUT_BUTTON: &str = "logout-btn";
    pub const BACK_TO_LOGIN: &str = "back-to-login";

    // Result containers
    pub const LOGIN_RESULT: &str = "loginResult";
    pub const MANUAL_RESULT: &str = "result";
    pub const BATCH_RESULT: &str = "batchResult";

    // Dashboard widgets
    pub const FIELDS_CONTAINER: &str = "fieldsContainer";
    pub const FILE_INPUT_LABEL: &str = "file-input-label";

    // Landing page
    pub const AUTH_LINK: &str = "auth-link";
    pub const LOGOUT_LINK: &str = "logout-link";
    pub const MODELS_CONTAINER: &str = "models-container";
    pub const AUTH_PROMPT: &str = "auth-prompt";
    pub const MODELS_DESCRIPTION: &str = "models-description";
}

/// Attribute holding a button's label while it shows the loading state.
pub const ORIGINAL_TEXT_ATTR: &str = "data-original-text";

/// A file picked in a form's file input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self { name: name.into(), bytes: bytes.into() }
    }

    /// MIME type the batch endpoint expects for this file's extension.
    pub fn content_type(&self) -> &'static str {
        let ext = self
            .name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "csv" => "text/csv",
            "xls" => "application/vnd.ms-excel",
            "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            _ => "application/octet-stream",
        }
    }
}

/// Element operations used by the controllers.
///
/// Operations on unknown ids are no-ops and reads return empty values, the
/// way a missing `getElementById` guard behaves on a page that lacks the
/// element.
pub trait Dom: Send {
    fn contains(&self, id: &str) -> bool;

    fn set_visible(&mut self, id: &str, visible: bool);
    fn is_visible(&self, id: &str) -> bool;

    fn set_inner_html(&mut self, id: &str, html: &str);
    fn inner_html(&self, id: &str) -> String;

    fn set_class(&mut self, id: &str, class: &str);
    fn class(&self, id: &str) -> String;

    fn set_disabled(&mut self, id: &str, disabled: bool);
    fn is_disabled(&self, id: &str) -> bool;

    fn attribute(&self, id: &str, name: &str) -> Option<String>;
    fn set_attribute(&mut self, id: &str, name: &str, value: &str);

    /// Current value of a named input inside a form.
    fn field_value(&self, form: &str, name: &str) -> Option<String>;
    fn set_field_value(&mut self, form: &str, name: &str, value: &str);
    /// Add an input whose reset value is `default`.
    fn define_field(&mut self, form: &str, name: &str, default: &str);
    /// Drop every input of a form.
    fn clear_fields(&mut self, form: &str);
    /// Restore inputs to their defaults and drop the file selection.
    fn reset_form(&mut self, form: &str);

    fn selected_file(&self, form: &str) -> Option<SelectedFile>;

    fn navigate(&mut self, url: &str);
}

#[derive(Debug, Clone, Default)]
struct Element {
    visible: bool,
    html: String,
    class: String,
    disabled: bool,
    attributes: HashMap<String, String>,
}

#[derive(Debug, Clone, Default)]
struct Field {
    value: String,
    default: String,
}

#[derive(Debug, Clone, Default)]
struct Form {
    // Ordered so iteration is deterministic in tests.
    fields: BTreeMap<String, Field>,
    file: Option<SelectedFile>,
}

/// Headless in-memory page.
#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: HashMap<String, Element>,
    forms: HashMap<String, Form>,
    location: Option<String>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element with its initial visibility and content.
    pub fn with_element(mut self, id: &str, visible: bool, html: &str) -> Self {
        self.add_element(id, visible, html);
        self
    }

    pub fn add_element(&mut self, id: &str, visible: bool, html: &str) {
        self.elements.insert(
            id.to_string(),
            Element { visible, html: html.to_string(), ..Default::default() },
        );
    }

    /// Login/registration plus the prediction dashboard, as served on the
    /// survival model page.
    pub fn survival_page() -> Self {
        let mut doc = Self::new()
            .with_element(ids::LOGIN_SECTION, true, "")
            .with_element(ids::MANUAL_SECTION, false, "")
            .with_element(ids::BATCH_SECTION, false, "")
            .with_element(ids::LOGOUT_SECTION, false, "")
            .with_element(ids::PASSWORD_FORM, true, "")
            .with_element(ids::REGISTER_FORM, false, "")
            .with_element(ids::PREDICT_FORM, true, "")
            .with_element(ids::BATCH_FORM, true, "")
            .with_element(ids::LOGIN_SUBMIT, true, "Iniciar sesión")
            .with_element(ids::REGISTER_SUBMIT, true, "Registrarse")
            .with_element(ids::PREDICT_SUBMIT, true, "Predecir")
            .with_element(ids::BATCH_SUBMIT, true, "Procesar archivo")
            .with_element(ids::REGISTER_BUTTON, true, "Crear cuenta")
            .with_element(ids::LOGOUT_BUTTON, true, "Cerrar sesión")
            .with_element(ids::BACK_TO_LOGIN, true, "Volver")
            .with_element(ids::FIELDS_CONTAINER, true, "")
            .with_element(ids::FILE_INPUT_LABEL, true, "📁 Seleccionar archivo CSV/Excel");
        for id in [ids::LOGIN_RESULT, ids::MANUAL_RESULT, ids::BATCH_RESULT] {
            doc.add_element(id, false, "");
            doc.set_class(id, "result");
        }
        for (form, fields) in [
            (ids::PASSWORD_FORM, &["username", "password"][..]),
            (ids::REGISTER_FORM, &["reg-username", "reg-email", "reg-fullname", "reg-password"][..]),
        ] {
            for field in fields {
                doc.define_field(form, field, "");
            }
        }
        doc.forms.entry(ids::PREDICT_FORM.to_string()).or_default();
        doc.forms.entry(ids::BATCH_FORM.to_string()).or_default();
        doc
    }

    /// Public landing page with the auth-dependent regions.
    pub fn landing_page() -> Self {
        Self::new()
            .with_element(ids::AUTH_LINK, true, "Iniciar sesión")
            .with_element(ids::LOGOUT_LINK, false, "Cerrar sesión")
            .with_element(ids::MODELS_CONTAINER, false, "")
            .with_element(ids::AUTH_PROMPT, true, "")
            .with_element(ids::MODELS_DESCRIPTION, true, "")
    }

    /// Pick (or clear) the file of a form's file input.
    pub fn select_file(&mut self, form: &str, file: Option<SelectedFile>) {
        self.forms.entry(form.to_string()).or_default().file = file;
    }

    /// Last navigation target, if any.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Names of a form's inputs.
    pub fn field_names(&self, form: &str) -> Vec<String> {
        self.forms
            .get(form)
            .map(|f| f.fields.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.get_mut(id)
    }
}

impl Dom for Document {
    fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    fn set_visible(&mut self, id: &str, visible: bool) {
        if let Some(el) = self.element_mut(id) {
            el.visible = visible;
        }
    }

    fn is_visible(&self, id: &str) -> bool {
        self.elements.get(id).is_some_and(|el| el.visible)
    }

    fn set_inner_html(&mut self, id: &str, html: &str) {
        if let Some(el) = self.element_mut(id) {
            el.html = html.to_string();
        }
    }

    fn inner_html(&self, id: &str) -> String {
        self.elements.get(id).map(|el| el.html.clone()).unwrap_or_default()
    }

    fn set_class(&mut self, id: &str, class: &str) {
        if let Some(el) = self.element_mut(id) {
            el.class = class.to_string();
        }
    }

    fn class(&self, id: &str) -> String {
        self.elements.get(id).map(|el| el.class.clone()).unwrap_or_default()
    }

    fn set_disabled(&mut self, id: &str, disabled: bool) {
        if let Some(el) = self.element_mut(id) {
            el.disabled = disabled;
        }
    }

    fn is_disabled(&self, id: &str) -> bool {
        self.elements.get(id).is_some_and(|el| el.disabled)
    }

    fn attribute(&self, id: &str, name: &str) -> Option<String> {
        self.elements.get(id).and_then(|el| el.attributes.get(name).cloned())
    }

    fn set_attribute(&mut self, id: &str, name: &str, value: &str) {
        if let Some(el) = self.element_mut(id) {
            el.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn field_value(&self, form: &str, name: &str) -> Option<String> {
        self.forms
            .get(form)
            .and_then(|f| f.fields.get(name))
            .map(|field| field.value.clone())
    }

    fn set_field_value(&mut self, form: &str, name: &str, value: &str) {
        let form = self.forms.entry(form.to_string()).or_default();
        form.fields.entry(name.to_string()).or_default().value = value.to_string();
    }

    fn define_field(&mut self, form: &str, name: &str, default: &str) {
        let form = self.forms.entry(form.to_string()).or_default();
        form.fields.insert(
            name.to_string(),
            Field { value: default.to_string(), default: default.to_string() },
        );
    }

    fn clear_fields(&mut self, form: &str) {
        if let Some(f) = self.forms.get_mut(form) {
            f.fields.clear();
        }
    }

    fn reset_form(&mut self, form: &str) {
        if let Some(f) = self.forms.get_mut(form) {
            for field in f.fields.values_mut() {
                field.value = field.default.clone();
            }
            f.file = None;
        }
    }

    fn selected_file(&self, form: &str) -> Option<SelectedFile> {
        self.forms.get(form).and_then(|f| f.file.clone())
    }

    fn navigate(&mut self, url: &str) {
        self.location = Some(url.to_string());
    }
}
