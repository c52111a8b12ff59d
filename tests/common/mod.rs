//! Frozen fixture model shared by the integration tests.
//!
//! The classifier scores class 2 ("Bad") from the checking account status,
//! the duration and the amount only; class 1 ("Good") has an all-zero row.
//! Every other column still takes part in preprocessing.

#![allow(dead_code)]

use candle_core::{Device, Tensor};
use credit_risk_server::encoding::CategoricalField;
use credit_risk_server::form::CreditForm;
use credit_risk_server::tabular_engine::{CONFIG_FILE, WEIGHTS_FILE};
use credit_risk_server::types::CreditApplication;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

fn scaler(column: &str) -> (f64, f64) {
    match column {
        "Duration_Months" => (20.9, 12.0),
        "Credit_Amount" => (3271.0, 2822.0),
        _ => (0.0, 1.0),
    }
}

fn bad_weight(column: &str, category: Option<&str>) -> f32 {
    match (column, category) {
        ("ExistingAccount_Status", Some("A11")) => 2.0,
        ("ExistingAccount_Status", Some("A12")) => 1.0,
        ("ExistingAccount_Status", Some("A13")) => -0.5,
        ("ExistingAccount_Status", Some("A14")) => -2.0,
        ("Duration_Months", None) => 0.8,
        ("Credit_Amount", None) => 0.5,
        _ => 0.0,
    }
}

pub fn features() -> Vec<Value> {
    CreditApplication::COLUMNS
        .iter()
        .map(|&column| match CategoricalField::from_key(column) {
            Some(field) => json!({
                "kind": "categorical",
                "column": column,
                "categories": field.codes().collect::<Vec<_>>(),
            }),
            None => {
                let (mean, scale) = scaler(column);
                json!({"kind": "numeric", "column": column, "mean": mean, "scale": scale})
            }
        })
        .collect()
}

fn bad_row() -> Vec<f32> {
    let mut row = Vec::new();
    for &column in CreditApplication::COLUMNS.iter() {
        match CategoricalField::from_key(column) {
            Some(field) => row.extend(field.codes().map(|code| bad_weight(column, Some(code)))),
            None => row.push(bad_weight(column, None)),
        }
    }
    row
}

/// Temp directory holding a fixture artifact, removed on drop.
pub struct ModelDir(PathBuf);

impl ModelDir {
    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl Drop for ModelDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

/// Writes the fixture artifact into a fresh temp directory.
pub fn write_model(handle_unknown: &str) -> ModelDir {
    let dir = std::env::temp_dir().join(format!(
        "credit-risk-model-{}",
        uuid::Uuid::new_v4().simple()
    ));
    std::fs::create_dir_all(&dir).unwrap();

    let config = json!({
        "classes": [1, 2],
        "handle_unknown": handle_unknown,
        "features": features(),
    });
    std::fs::write(dir.join(CONFIG_FILE), serde_json::to_vec_pretty(&config).unwrap()).unwrap();

    let bad = bad_row();
    let width = bad.len();
    let mut weight = vec![0f32; width];
    weight.extend(bad);

    let tensors = HashMap::from([
        (
            "classifier.weight".to_string(),
            Tensor::from_vec(weight, (2, width), &Device::Cpu).unwrap(),
        ),
        (
            "classifier.bias".to_string(),
            Tensor::new(&[0f32, 0f32], &Device::Cpu).unwrap(),
        ),
    ]);
    candle_core::safetensors::save(&tensors, dir.join(WEIGHTS_FILE)).unwrap();

    ModelDir(dir)
}

/// The golden application: no checking account, 12 months, 5000 DM,
/// every other answer at its form default.
pub fn golden_application() -> CreditApplication {
    CreditForm {
        account_status: "no checking account".into(),
        duration_months: 12,
        credit_amount: 5000.0,
        ..CreditForm::default()
    }
    .to_application()
    .unwrap()
}

/// Short account history, long duration and a large amount.
pub fn risky_application() -> CreditApplication {
    CreditForm {
        account_status: "< 0 DM".into(),
        duration_months: 48,
        credit_amount: 15000.0,
        ..CreditForm::default()
    }
    .to_application()
    .unwrap()
}
