//! Dynamic feature form.
//!
//! One routine builds the 32 numeric inputs of the manual prediction form.
//! The layout is configurable; whichever markup is chosen, the form ends up
//! with the same named inputs in model order, each defaulting to `0`.

use oncoai_common::features::{field_name, Measurement};
use oncoai_common::{FieldLayout, GENES};

use crate::dom::{ids, Dom};

/// Default value of every generated input.
pub const FIELD_DEFAULT: &str = "0";

fn input(name: &str) -> String {
    format!(
        r#"<input type="number" step="any" name="{}" value="{}" placeholder="0.0" class="form-input" required>"#,
        name, FIELD_DEFAULT
    )
}

fn table_markup() -> String {
    let rows: String = GENES
        .iter()
        .map(|gene| {
            format!(
                r#"<tr><td class="gene-name">{}</td><td>{}</td><td>{}</td></tr>"#,
                gene,
                input(&field_name(gene, Measurement::Expression)),
                input(&field_name(gene, Measurement::Scna)),
            )
        })
        .collect();
    format!(
        r#"<table class="feature-table"><thead><tr><th>Gen</th><th>Expresión</th><th>SCNA</th></tr></thead><tbody>{}</tbody></table>"#,
        rows
    )
}

fn paired_markup() -> String {
    // Two fields per row; each gene's pair shares a row.
    GENES
        .iter()
        .map(|gene| {
            let groups: String = [Measurement::Expression, Measurement::Scna]
                .into_iter()
                .map(|m| {
                    let name = field_name(gene, m);
                    format!(
                        r#"<div class="field-group"><label title="{}">{}:</label>{}</div>"#,
                        name,
                        name.replace('_', " "),
                        input(&name)
                    )
                })
                .collect();
            format!(r#"<div class="field-row">{}</div>"#, groups)
        })
        .collect()
}

/// Markup for the chosen layout.
pub fn render_fields(layout: FieldLayout) -> String {
    match layout {
        FieldLayout::Table => table_markup(),
        FieldLayout::Paired => paired_markup(),
    }
}

/// Replace the fields container and the prediction form's inputs with a
/// fresh all-zero set.
pub fn generate_fields(dom: &mut dyn Dom, layout: FieldLayout) {
    dom.set_inner_html(ids::FIELDS_CONTAINER, &render_fields(layout));
    dom.clear_fields(ids::PREDICT_FORM);
    for gene in GENES {
        for m in [Measurement::Expression, Measurement::Scna] {
            dom.define_field(ids::PREDICT_FORM, &field_name(gene, m), FIELD_DEFAULT);
        }
    }
}
