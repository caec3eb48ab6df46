//! Manual and batch prediction.

use std::sync::Arc;

use oncoai_common::{ClientConfig, FeatureVector};
use tracing::{info, warn};

use crate::api::PredictionApi;
use crate::dom::{ids, Dom};
use crate::fields::generate_fields;
use crate::messages;
use crate::render::{
    clear_result, manual_result_html, set_loading, show_batch_results, show_error, show_result, ResultKind,
};
use crate::store::TokenStore;

pub struct DashboardController {
    config: ClientConfig,
    store: Arc<dyn TokenStore>,
    api: Arc<dyn PredictionApi>,
}

impl DashboardController {
    pub fn new(config: ClientConfig, store: Arc<dyn TokenStore>, api: Arc<dyn PredictionApi>) -> Self {
        Self { config, store, api }
    }

    pub fn init(&self, dom: &mut dyn Dom) {
        generate_fields(dom, self.config.pages.field_layout);
    }

    /// Current feature vector of the manual form.
    pub fn read_features(dom: &dyn Dom) -> FeatureVector {
        FeatureVector::from_lookup(|name| dom.field_value(ids::PREDICT_FORM, name))
    }

    pub async fn predict_manual(&self, dom: &mut dyn Dom) {
        let Some(token) = self.store.token() else {
            show_result(dom, ids::MANUAL_RESULT, messages::LOGIN_REQUIRED, ResultKind::Error);
            return;
        };

        set_loading(dom, ids::PREDICT_SUBMIT, true);
        clear_result(dom, ids::MANUAL_RESULT);

        let features = Self::read_features(dom);
        match self.api.predict(&token, &features).await {
            Ok(prediction) => {
                info!(probability = prediction.survival_probability, "Manual prediction complete");
                show_result(dom, ids::MANUAL_RESULT, &manual_result_html(&prediction), ResultKind::Success);
            }
            Err(e) => {
                warn!(error = %e, "Manual prediction failed");
                show_error(dom, ids::MANUAL_RESULT, e.user_message(messages::PREDICT_FAILED));
            }
        }

        set_loading(dom, ids::PREDICT_SUBMIT, false);
    }

    pub async fn predict_batch(&self, dom: &mut dyn Dom) {
        let Some(token) = self.store.token() else {
            show_result(dom, ids::BATCH_RESULT, messages::LOGIN_REQUIRED, ResultKind::Error);
            return;
        };
        let Some(file) = dom.selected_file(ids::BATCH_FORM) else {
            show_result(dom, ids::BATCH_RESULT, messages::FILE_REQUIRED, ResultKind::Error);
            return;
        };

        set_loading(dom, ids::BATCH_SUBMIT, true);
        clear_result(dom, ids::BATCH_RESULT);

        match self.api.batch_predict(&token, &file).await {
            Ok(batch) => {
                info!(file = %file.name, rows = batch.predictions.len(), "Batch prediction complete");
                show_batch_results(dom, ids::BATCH_RESULT, &batch.predictions);
            }
            Err(e) => {
                warn!(file = %file.name, error = %e, "Batch prediction failed");
                show_error(dom, ids::BATCH_RESULT, e.user_message(messages::BATCH_FAILED));
            }
        }

        set_loading(dom, ids::BATCH_SUBMIT, false);
    }

    /// Reflect the file picker's selection in its label.
    pub fn file_changed(&self, dom: &mut dyn Dom) {
        let label = match dom.selected_file(ids::BATCH_FORM) {
            Some(file) => messages::file_label(&file.name),
            None => messages::FILE_LABEL_EMPTY.to_string(),
        };
        dom.set_inner_html(ids::FILE_INPUT_LABEL, &label);
    }
}
