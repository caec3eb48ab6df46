//! Login, registration and logout.

use std::sync::Arc;

use oncoai_common::session::DEFAULT_DISPLAY_NAME;
use oncoai_common::{ClientConfig, OncoaiError, Result, UserInfo};
use secrecy::{ExposeSecret, SecretString};
use tracing::{info, warn};

use super::read_trimmed;
use crate::api::{Credentials, PredictionApi, Registration, TokenResponse};
use crate::dom::{ids, Dom, ORIGINAL_TEXT_ATTR};
use crate::fields::generate_fields;
use crate::messages;
use crate::render::{clear_result, escape_html, set_loading, show_error, show_result, ResultKind};
use crate::store::{end_session, TokenStore};

pub const MIN_PASSWORD_LEN: usize = 6;

/// Client-side checks run before any registration request.
pub fn validate_registration(registration: &Registration) -> Result<()> {
    let password = registration.password.expose_secret();
    if registration.username.is_empty()
        || registration.email.is_empty()
        || registration.full_name.is_empty()
        || password.is_empty()
    {
        return Err(OncoaiError::Validation(messages::MISSING_FIELDS.to_string()));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(OncoaiError::Validation(messages::PASSWORD_TOO_SHORT.to_string()));
    }
    Ok(())
}

pub struct AuthController {
    config: ClientConfig,
    store: Arc<dyn TokenStore>,
    api: Arc<dyn PredictionApi>,
}

impl AuthController {
    pub fn new(config: ClientConfig, store: Arc<dyn TokenStore>, api: Arc<dyn PredictionApi>) -> Self {
        Self { config, store, api }
    }

    /// Page load: remember button labels and restore an existing session.
    pub fn init(&self, dom: &mut dyn Dom) {
        for button in ids::SUBMIT_BUTTONS {
            if dom.contains(button) {
                let label = dom.inner_html(button);
                dom.set_attribute(button, ORIGINAL_TEXT_ATTR, &label);
            }
        }

        if self.store.is_authenticated() {
            show_sections(dom, true);
            let name = self
                .store
                .stored_user()
                .map(|u| u.display_name().to_string())
                .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string());
            info!("Restored existing session");
            show_result(dom, ids::LOGIN_RESULT, &messages::welcome_back(&escape_html(&name)), ResultKind::Success);
        }
    }

    pub async fn login(&self, dom: &mut dyn Dom) {
        let username = read_trimmed(dom, ids::PASSWORD_FORM, "username");
        let password = read_trimmed(dom, ids::PASSWORD_FORM, "password");

        if username.is_empty() || password.is_empty() {
            show_result(dom, ids::LOGIN_RESULT, messages::MISSING_FIELDS, ResultKind::Error);
            return;
        }
        let credentials = Credentials::new(username, password);

        set_loading(dom, ids::LOGIN_SUBMIT, true);
        clear_result(dom, ids::LOGIN_RESULT);

        info!(username = %credentials.username, "Attempting login");
        match self.api.token(&credentials).await {
            Ok(resp) => self.start_session(dom, &credentials.username, resp),
            Err(e) => {
                warn!(error = %e, "Login failed");
                show_error(dom, ids::LOGIN_RESULT, e.user_message(messages::LOGIN_FAILED));
            }
        }

        set_loading(dom, ids::LOGIN_SUBMIT, false);
    }

    fn start_session(&self, dom: &mut dyn Dom, username: &str, resp: TokenResponse) {
        self.store.set_token(&SecretString::from(resp.access_token));
        if let Some(user) = &resp.user {
            self.store.set_user(user);
        }
        show_sections(dom, true);

        let name = resp.user.as_ref().map(UserInfo::display_name).unwrap_or(username);
        info!(username = %username, "Login succeeded");
        show_result(dom, ids::LOGIN_RESULT, &messages::welcome(&escape_html(name)), ResultKind::Success);
        dom.navigate(&self.config.pages.landing_page);
    }

    /// Switch between the registration and password forms.
    pub fn show_registration(&self, dom: &mut dyn Dom, show: bool) {
        show_auth_form(dom, if show { ids::REGISTER_FORM } else { ids::PASSWORD_FORM });
        clear_result(dom, ids::LOGIN_RESULT);
    }

    pub async fn register(&self, dom: &mut dyn Dom) {
        let registration = Registration {
            username: read_trimmed(dom, ids::REGISTER_FORM, "reg-username"),
            email: read_trimmed(dom, ids::REGISTER_FORM, "reg-email"),
            full_name: read_trimmed(dom, ids::REGISTER_FORM, "reg-fullname"),
            password: SecretString::from(read_trimmed(dom, ids::REGISTER_FORM, "reg-password")),
        };

        if let Err(e) = validate_registration(&registration) {
            show_result(dom, ids::LOGIN_RESULT, e.user_message(messages::REGISTER_FAILED), ResultKind::Error);
            return;
        }

        set_loading(dom, ids::REGISTER_SUBMIT, true);
        clear_result(dom, ids::LOGIN_RESULT);

        info!(username = %registration.username, "Registering user");
        match self.api.register(&registration).await {
            Ok(user) => {
                show_result(
                    dom,
                    ids::LOGIN_RESULT,
                    &messages::registered(&escape_html(&user.username)),
                    ResultKind::Success,
                );
                dom.reset_form(ids::REGISTER_FORM);
                show_auth_form(dom, ids::PASSWORD_FORM);
            }
            Err(e) => {
                warn!(error = %e, "Registration failed");
                show_error(dom, ids::LOGIN_RESULT, e.user_message(messages::REGISTER_FAILED));
            }
        }

        set_loading(dom, ids::REGISTER_SUBMIT, false);
    }

    pub fn logout(&self, dom: &mut dyn Dom) {
        end_session(self.store.as_ref());
        show_sections(dom, false);
        for id in [ids::LOGIN_RESULT, ids::MANUAL_RESULT, ids::BATCH_RESULT] {
            clear_result(dom, id);
        }
        for form in [ids::PASSWORD_FORM, ids::PREDICT_FORM, ids::BATCH_FORM] {
            dom.reset_form(form);
        }
        generate_fields(dom, self.config.pages.field_layout);
        show_result(dom, ids::LOGIN_RESULT, messages::LOGGED_OUT, ResultKind::Success);
    }
}

/// Authenticated view shows the prediction sections and the logout
/// control; anonymous view shows only the login section.
pub fn show_sections(dom: &mut dyn Dom, authenticated: bool) {
    for id in [ids::MANUAL_SECTION, ids::BATCH_SECTION, ids::LOGOUT_SECTION] {
        dom.set_visible(id, authenticated);
    }
    dom.set_visible(ids::LOGIN_SECTION, !authenticated);
}

fn show_auth_form(dom: &mut dyn Dom, form: &str) {
    for id in ids::AUTH_FORMS {
        dom.set_visible(id, id == form);
    }
}
