/// Loads the frozen fixture artifact through the public loader and checks
/// golden predictions and load failures.
mod common;

use credit_risk_server::engine::Engine;
use credit_risk_server::tabular_engine::{TabularConfig, TabularEngine, WEIGHTS_FILE};
use std::path::Path;

async fn load(dir: &Path) -> anyhow::Result<TabularEngine> {
    TabularEngine::new(TabularConfig {
        model_path: Some(dir.to_path_buf()),
        cpu: true,
        ..TabularConfig::default()
    })
    .await
}

#[tokio::test]
async fn golden_application_is_good() {
    let model = common::write_model("error");
    let engine = load(model.path()).await.unwrap();
    let code = engine.predict(&common::golden_application()).await.unwrap();
    assert_eq!(code, 1);
}

#[tokio::test]
async fn risky_application_is_bad() {
    let model = common::write_model("error");
    let engine = load(model.path()).await.unwrap();
    let code = engine.predict(&common::risky_application()).await.unwrap();
    assert_eq!(code, 2);
}

#[tokio::test]
async fn predictions_are_deterministic() {
    let model = common::write_model("error");
    let engine = load(model.path()).await.unwrap();
    let application = common::golden_application();
    let first = engine.predict(&application).await.unwrap();
    for _ in 0..10 {
        assert_eq!(engine.predict(&application).await.unwrap(), first);
    }
}

#[tokio::test]
async fn model_info_describes_the_artifact() {
    let model = common::write_model("error");
    let engine = load(model.path()).await.unwrap();
    let info = engine.info();
    assert_eq!(info.classes, vec![1, 2]);
    assert_eq!(info.columns.len(), 20);
    assert_eq!(info.columns[0], "ExistingAccount_Status");
    assert_eq!(info.input_width, 62);
}

#[tokio::test]
async fn unknown_category_fails_inference_without_poisoning_engine() {
    let model = common::write_model("error");
    let engine = load(model.path()).await.unwrap();

    let mut broken = common::golden_application();
    broken.purpose = "A47".into();
    let err = engine.predict(&broken).await.unwrap_err();
    assert!(err.to_string().contains("A47"));

    assert_eq!(engine.predict(&common::golden_application()).await.unwrap(), 1);
}

#[tokio::test]
async fn ignored_unknown_category_still_scores() {
    let model = common::write_model("ignore");
    let engine = load(model.path()).await.unwrap();
    let mut application = common::risky_application();
    application.housing = "A999".into();
    assert_eq!(engine.predict(&application).await.unwrap(), 2);
}

#[tokio::test]
async fn invalid_model_path_fails_to_load() {
    let missing = std::env::temp_dir().join("credit-risk-model-does-not-exist");
    let err = load(&missing).await.err().unwrap();
    assert!(format!("{err:#}").contains("is not a directory"));
}

#[tokio::test]
async fn missing_weights_fail_to_load() {
    let model = common::write_model("error");
    std::fs::remove_file(model.path().join(WEIGHTS_FILE)).unwrap();
    let err = load(model.path()).await.err().unwrap();
    assert!(format!("{err:#}").contains("not found"));
}

#[tokio::test]
async fn mismatched_weights_fail_to_load() {
    let model = common::write_model("error");
    let config_path = model.path().join("config.json");
    let mut config: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&config_path).unwrap()).unwrap();
    config["classes"] = serde_json::json!([1, 2, 3]);
    std::fs::write(&config_path, serde_json::to_vec(&config).unwrap()).unwrap();

    let err = load(model.path()).await.err().unwrap();
    assert!(format!("{err:#}").contains("failed to load classifier"));
}

#[tokio::test]
async fn fixture_directory_is_removed_on_drop() {
    let model = common::write_model("error");
    let dir = model.path().to_path_buf();
    assert!(dir.join(WEIGHTS_FILE).is_file());

    drop(model);
    assert!(!dir.exists());
}
