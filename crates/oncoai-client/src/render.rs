//! Result containers and button loading state.

use oncoai_common::{PredictionResult, SurvivalPrediction};

use crate::dom::{Dom, ORIGINAL_TEXT_ATTR};
use crate::messages;

/// CSS state of a result container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    Info,
    Success,
    Error,
}

impl ResultKind {
    pub fn as_class(self) -> &'static str {
        match self {
            ResultKind::Info => "info",
            ResultKind::Success => "success",
            ResultKind::Error => "error",
        }
    }
}

/// Escape text for interpolation into markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn show_result(dom: &mut dyn Dom, id: &str, message: &str, kind: ResultKind) {
    dom.set_inner_html(id, message);
    dom.set_class(id, &format!("result {}", kind.as_class()));
    dom.set_visible(id, true);
}

/// `❌ Error: {message}` with the message escaped.
pub fn show_error(dom: &mut dyn Dom, id: &str, message: &str) {
    show_result(dom, id, &messages::error(&escape_html(message)), ResultKind::Error);
}

pub fn clear_result(dom: &mut dyn Dom, id: &str) {
    dom.set_inner_html(id, "");
    dom.set_visible(id, false);
    dom.set_class(id, "result");
}

/// Toggle a submit button's loading indicator.
///
/// Entering the loading state remembers the current label unless the
/// button is already disabled (a load in progress); leaving it restores the
/// remembered label.
pub fn set_loading(dom: &mut dyn Dom, button: &str, loading: bool) {
    if loading {
        if !dom.is_disabled(button) {
            let label = dom.inner_html(button);
            dom.set_attribute(button, ORIGINAL_TEXT_ATTR, &label);
        }
        dom.set_disabled(button, true);
        dom.set_inner_html(button, messages::LOADING_LABEL);
    } else {
        dom.set_disabled(button, false);
        let label = dom.attribute(button, ORIGINAL_TEXT_ATTR).unwrap_or_default();
        dom.set_inner_html(button, &label);
    }
}

pub fn manual_result_html(prediction: &SurvivalPrediction) -> String {
    format!(
        r#"🎯 Probabilidad de supervivencia > 3 años: <span class="prediction-result">{}%</span>"#,
        prediction.percent()
    )
}

/// One line per prediction, coloured by the survival threshold, plus a
/// total footer.
pub fn batch_results_html(predictions: &[PredictionResult]) -> String {
    let items: String = predictions
        .iter()
        .map(|result| {
            let class = if result.is_favourable() { "success" } else { "error" };
            let percent = result.percent().map(|p| format!("{}%", p)).unwrap_or_else(|| "N/D".to_string());
            format!(
                r#"
            <div class="batch-result-item {}">
                <strong>Fila {}:</strong> {}
            </div>"#,
                class,
                result.display_row(),
                percent
            )
        })
        .collect();

    format!(
        r#"
        <div class="result success">
            <h4>📊 Resultados de Predicción Batch</h4>
            <div class="batch-results">{}
            </div>
            <div class="mt-2">
                <strong>Total:</strong> {} predicciones procesadas
            </div>
        </div>
    "#,
        items,
        predictions.len()
    )
}

pub fn show_batch_results(dom: &mut dyn Dom, id: &str, predictions: &[PredictionResult]) {
    dom.set_inner_html(id, &batch_results_html(predictions));
    dom.set_class(id, "result");
    dom.set_visible(id, true);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{ids, Document};

    fn rows(n: u64) -> Vec<PredictionResult> {
        (0..n)
            .map(|row| PredictionResult { row, survival_probability: Some(row as f64 / n as f64) })
            .collect()
    }

    #[test]
    fn test_batch_html_has_one_line_per_prediction() {
        for n in [0u64, 1, 7] {
            let html = batch_results_html(&rows(n));
            assert_eq!(html.matches("batch-result-item").count(), n as usize);
            assert!(html.contains(&format!("<strong>Total:</strong> {} predicciones procesadas", n)));
        }
    }

    #[test]
    fn test_batch_lines_are_one_based_and_colour_coded() {
        let html = batch_results_html(&[
            PredictionResult { row: 0, survival_probability: Some(0.8) },
            PredictionResult { row: 1, survival_probability: Some(0.2) },
            PredictionResult { row: 2, survival_probability: None },
        ]);
        let items: Vec<&str> = html.split("batch-result-item ").skip(1).collect();
        assert_eq!(items.len(), 3);
        assert!(items[0].starts_with("success") && items[0].contains("<strong>Fila 1:</strong> 80.00%"));
        assert!(items[1].starts_with("error") && items[1].contains("<strong>Fila 2:</strong> 20.00%"));
        assert!(items[2].starts_with("error"));
        assert!(html.contains("<strong>Fila 3:</strong> N/D"));
    }

    #[test]
    fn test_show_and_clear_result_toggle_state() {
        let mut doc = Document::survival_page();
        show_result(&mut doc, ids::MANUAL_RESULT, "ok", ResultKind::Success);
        assert!(doc.is_visible(ids::MANUAL_RESULT));
        assert_eq!(doc.class(ids::MANUAL_RESULT), "result success");

        clear_result(&mut doc, ids::MANUAL_RESULT);
        assert!(!doc.is_visible(ids::MANUAL_RESULT));
        assert_eq!(doc.inner_html(ids::MANUAL_RESULT), "");
        assert_eq!(doc.class(ids::MANUAL_RESULT), "result");
    }

    #[test]
    fn test_loading_restores_original_label() {
        let mut doc = Document::survival_page();
        set_loading(&mut doc, ids::PREDICT_SUBMIT, true);
        assert!(doc.is_disabled(ids::PREDICT_SUBMIT));
        assert_eq!(doc.inner_html(ids::PREDICT_SUBMIT), messages::LOADING_LABEL);

        // A second enter must not overwrite the remembered label.
        set_loading(&mut doc, ids::PREDICT_SUBMIT, true);
        set_loading(&mut doc, ids::PREDICT_SUBMIT, false);
        assert!(!doc.is_disabled(ids::PREDICT_SUBMIT));
        assert_eq!(doc.inner_html(ids::PREDICT_SUBMIT), "Predecir");
    }

    #[test]
    fn test_error_message_is_escaped() {
        let mut doc = Document::survival_page();
        show_error(&mut doc, ids::LOGIN_RESULT, "<script>");
        assert_eq!(doc.inner_html(ids::LOGIN_RESULT), "❌ Error: &lt;script&gt;");
    }
}
