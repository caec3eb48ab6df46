//! Page assembly: controllers wired to their events.

use std::sync::Arc;

use async_trait::async_trait;
use oncoai_common::ClientConfig;
use tracing::info;

use crate::api::PredictionApi;
use crate::controllers::{AuthController, DashboardController, LandingController};
use crate::dom::Dom;
use crate::events::{Event, EventHandler, EventRegistry, Page};
use crate::store::TokenStore;

#[async_trait]
impl EventHandler for AuthController {
    async fn handle(&self, event: Event, dom: &mut dyn Dom) {
        match event {
            Event::PageLoaded(_) => self.init(dom),
            Event::LoginSubmitted => self.login(dom).await,
            Event::RegisterRequested => self.show_registration(dom, true),
            Event::BackToLogin => self.show_registration(dom, false),
            Event::RegisterSubmitted => self.register(dom).await,
            Event::LogoutClicked => self.logout(dom),
            _ => {}
        }
    }
}

#[async_trait]
impl EventHandler for DashboardController {
    async fn handle(&self, event: Event, dom: &mut dyn Dom) {
        match event {
            Event::PageLoaded(_) => self.init(dom),
            Event::ManualSubmitted => self.predict_manual(dom).await,
            Event::BatchSubmitted => self.predict_batch(dom).await,
            Event::FileChanged => self.file_changed(dom),
            _ => {}
        }
    }
}

#[async_trait]
impl EventHandler for LandingController {
    async fn handle(&self, event: Event, dom: &mut dyn Dom) {
        match event {
            Event::PageLoaded(_) => self.check_auth_status(dom),
            Event::LogoutClicked => self.logout(dom),
            Event::ModelsLinkClicked => self.open_models(dom),
            _ => {}
        }
    }
}

/// A page's event registry.
pub struct App {
    page: Page,
    registry: EventRegistry,
}

impl App {
    /// Survival model page: auth forms plus the prediction dashboard.
    pub fn survival_page(
        config: &ClientConfig,
        store: Arc<dyn TokenStore>,
        api: Arc<dyn PredictionApi>,
    ) -> Self {
        let auth = Arc::new(AuthController::new(config.clone(), store.clone(), api.clone()));
        let dashboard = Arc::new(DashboardController::new(config.clone(), store, api));

        let mut registry = EventRegistry::new();
        registry.register_all(
            &[
                Event::PageLoaded(Page::Survival),
                Event::LoginSubmitted,
                Event::RegisterRequested,
                Event::RegisterSubmitted,
                Event::BackToLogin,
                Event::LogoutClicked,
            ],
            auth,
        );
        registry.register_all(
            &[
                Event::PageLoaded(Page::Survival),
                Event::ManualSubmitted,
                Event::BatchSubmitted,
                Event::FileChanged,
            ],
            dashboard,
        );
        info!("Survival page ready");
        Self { page: Page::Survival, registry }
    }

    pub fn landing_page(config: &ClientConfig, store: Arc<dyn TokenStore>) -> Self {
        let landing = Arc::new(LandingController::new(config.clone(), store));
        let mut registry = EventRegistry::new();
        registry.register_all(
            &[Event::PageLoaded(Page::Landing), Event::LogoutClicked, Event::ModelsLinkClicked],
            landing,
        );
        info!("Landing page ready");
        Self { page: Page::Landing, registry }
    }

    /// Fire this page's load event.
    pub async fn load(&self, dom: &mut dyn Dom) {
        self.dispatch(Event::PageLoaded(self.page), dom).await;
    }

    pub async fn dispatch(&self, event: Event, dom: &mut dyn Dom) {
        self.registry.dispatch(event, dom).await;
    }
}
