//! Landing page: mirrors the session state, never changes it except to log out.

use std::sync::Arc;

use oncoai_common::ClientConfig;

use super::dashboard_destination;
use crate::dom::{ids, Dom};
use crate::messages;
use crate::store::{end_session, TokenStore};

pub struct LandingController {
    config: ClientConfig,
    store: Arc<dyn TokenStore>,
}

impl LandingController {
    pub fn new(config: ClientConfig, store: Arc<dyn TokenStore>) -> Self {
        Self { config, store }
    }

    pub fn check_auth_status(&self, dom: &mut dyn Dom) {
        let authenticated = self.store.is_authenticated();
        dom.set_visible(ids::AUTH_LINK, !authenticated);
        dom.set_visible(ids::LOGOUT_LINK, authenticated);
        dom.set_visible(ids::MODELS_CONTAINER, authenticated);
        dom.set_visible(ids::AUTH_PROMPT, !authenticated);
        let description = if authenticated {
            messages::MODELS_AUTHENTICATED
        } else {
            messages::MODELS_ANONYMOUS
        };
        dom.set_inner_html(ids::MODELS_DESCRIPTION, description);
    }

    pub fn logout(&self, dom: &mut dyn Dom) {
        end_session(self.store.as_ref());
        self.check_auth_status(dom);
    }

    pub fn open_models(&self, dom: &mut dyn Dom) {
        let target = dashboard_destination(&self.config, self.store.as_ref());
        dom.navigate(target);
    }
}
