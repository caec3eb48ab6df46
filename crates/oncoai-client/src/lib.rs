//! oncoai-client: Headless client for the OncoAI survival prediction service.
//! Provides:
//!   - Session persistence (`store`)
//!   - The prediction API client and its test double (`api`)
//!   - A page model with an in-memory implementation (`dom`)
//!   - Result rendering and the dynamic feature form (`render`, `fields`)
//!   - Auth, dashboard and landing controllers wired to page events (`app`)

pub mod api;
pub mod app;
pub mod controllers;
pub mod dom;
pub mod events;
pub mod fields;
pub mod messages;
pub mod render;
pub mod store;

pub use api::{HttpPredictionApi, MockPredictionApi, PredictionApi};
pub use app::App;
pub use dom::{Document, Dom, SelectedFile};
pub use events::{Event, Page};
pub use store::{FileStorage, MemoryStorage, StorageTokenStore, TokenStore};
