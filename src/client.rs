use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::time::Duration;

use crate::types::CreditApplication;

/// The service answers with a list, but a bare integer is accepted too.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum PredictionValue {
    Many(Vec<i64>),
    One(i64),
}

#[derive(Debug, Deserialize)]
struct PredictionBody {
    prediction: PredictionValue,
}

/// Thin HTTP client for the `/predict` endpoint.
#[derive(Debug, Clone)]
pub struct PredictionClient {
    http: reqwest::Client,
    endpoint: String,
}

impl PredictionClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    /// Posts one application and returns the first prediction code.
    #[tracing::instrument(skip(self, application), fields(endpoint = %self.endpoint))]
    pub async fn predict(&self, application: &CreditApplication) -> Result<i64> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(application)
            .send()
            .await
            .with_context(|| format!("request to {} failed", self.endpoint))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("prediction service returned {status}: {body}");
        }

        let body: PredictionBody = response
            .json()
            .await
            .context("prediction service returned an unexpected body")?;

        match body.prediction {
            PredictionValue::One(code) => Ok(code),
            PredictionValue::Many(codes) => codes
                .first()
                .copied()
                .context("prediction service returned an empty prediction"),
        }
    }
}
