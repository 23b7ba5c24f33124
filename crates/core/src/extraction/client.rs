//! HTTP client for the extraction service.

use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use boekhoud_shared::config::ExtractionSettings;

use super::types::ExtractionGuess;

/// Request body for the extraction endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExtractionRequest<'a> {
    file_url: &'a str,
}

/// Client for the external extraction service.
///
/// Failure of any kind (transport error, non-2xx status, undecodable body)
/// yields an empty guess. The caller never sees an error; the review form
/// simply stays blank for fields that could not be guessed.
pub struct ExtractionClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ExtractionClient {
    /// Create a client from settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn from_settings(settings: &ExtractionSettings) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint: settings.endpoint.clone(),
        })
    }

    /// Ask the extraction service for a guess about the document at `file_url`.
    ///
    /// Never fails: every error path collapses to an empty guess, logged at
    /// debug level only.
    pub async fn guess(&self, file_url: &str) -> ExtractionGuess {
        let response = match self
            .http
            .post(&self.endpoint)
            .json(&ExtractionRequest { file_url })
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                debug!(error = %e, "extraction request failed");
                return ExtractionGuess::default();
            }
        };

        if !response.status().is_success() {
            debug!(status = %response.status(), "extraction service returned non-success");
            return ExtractionGuess::default();
        }

        match response.json::<ExtractionGuess>().await {
            Ok(guess) => guess,
            Err(e) => {
                debug!(error = %e, "extraction response undecodable");
                ExtractionGuess::default()
            }
        }
    }
}
