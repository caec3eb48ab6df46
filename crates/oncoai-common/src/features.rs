//! Gene feature list for the survival model.
//!
//! The model consumes 16 immune-related genes, each measured twice:
//! expression level and SCNA (somatic copy-number alteration). Fields are
//! interleaved per gene, so the vector order is
//! `B2M_expression, B2M_scna, C1QB_expression, C1QB_scna, ...`.

use serde::{Deserialize, Serialize};

/// Genes in model order.
pub const GENES: [&str; 16] = [
    "B2M", "C1QB", "C1QC", "CASP1", "CD2", "CD3E", "CD4", "CD74",
    "FCER1G", "FCGR3A", "IL10", "LCK", "LCP2", "LYN", "PTPRC", "SERPING1",
];

/// Number of numeric fields submitted per prediction.
pub const FEATURE_COUNT: usize = GENES.len() * 2;

pub const EXPRESSION_SUFFIX: &str = "_expression";
pub const SCNA_SUFFIX: &str = "_scna";

/// The two measurements taken per gene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measurement {
    Expression,
    Scna,
}

impl Measurement {
    pub fn suffix(self) -> &'static str {
        match self {
            Measurement::Expression => EXPRESSION_SUFFIX,
            Measurement::Scna => SCNA_SUFFIX,
        }
    }
}

/// Form field name for one gene measurement, e.g. `CD4_scna`.
pub fn field_name(gene: &str, measurement: Measurement) -> String {
    format!("{}{}", gene, measurement.suffix())
}

/// All 32 field names in model order.
pub fn feature_names() -> Vec<String> {
    GENES
        .iter()
        .flat_map(|g| {
            [
                field_name(g, Measurement::Expression),
                field_name(g, Measurement::Scna),
            ]
        })
        .collect()
}

/// Parse a raw form value. Empty, unparseable and non-finite input all
/// become 0.0.
pub fn parse_feature_value(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Ordered 32-value feature vector, fresh per submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    /// All-zero vector, the state of a freshly generated form.
    pub fn zeros() -> Self {
        Self(vec![0.0; FEATURE_COUNT])
    }

    /// Build a vector by looking up each field name in order. Missing or
    /// unparseable values coerce to 0.0.
    pub fn from_lookup<F>(mut lookup: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let values = feature_names()
            .iter()
            .map(|name| lookup(name).map(|raw| parse_feature_value(&raw)).unwrap_or(0.0))
            .collect();
        Self(values)
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self::zeros()
    }
}
