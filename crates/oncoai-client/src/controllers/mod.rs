//! Page controllers.
//!
//! Each controller owns its collaborators (config, token store, API) and
//! exposes one method per user action. Controllers never fail: every error
//! ends up in a result container and the page stays usable.

pub mod auth;
pub mod dashboard;
pub mod landing;

pub use auth::AuthController;
pub use dashboard::DashboardController;
pub use landing::LandingController;

use oncoai_common::ClientConfig;

use crate::dom::Dom;
use crate::store::TokenStore;

/// Trimmed value of a form input, empty when missing.
pub(crate) fn read_trimmed(dom: &dyn Dom, form: &str, name: &str) -> String {
    dom.field_value(form, name)
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}

/// Where the "models" link leads: the dashboard with a session, the landing
/// page without one.
pub fn dashboard_destination<'a>(config: &'a ClientConfig, store: &dyn TokenStore) -> &'a str {
    if store.is_authenticated() {
        &config.pages.dashboard_page
    } else {
        &config.pages.landing_page
    }
}
