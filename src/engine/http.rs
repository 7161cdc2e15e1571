use super::{types::*, AnalysisService};
use crate::config::Config;
use crate::error::{PaletteError, Result};
use crate::model::ColorRuleResult;
use anyhow::Context;
use reqwest::blocking::{multipart, Client};
use std::time::Duration;
use tracing::debug;

pub struct HttpAnalysisService {
    base_url: String,
    client: Client,
}

impl HttpAnalysisService {
    pub fn new(cfg: &Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.service.timeout_seconds.max(1)))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            base_url: cfg.service.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn endpoint(&self, test_id: &str) -> String {
        format!("{}/{}", self.base_url, test_id)
    }
}

fn transport_reason(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        format!("request timed out: {e}")
    } else if e.is_connect() {
        format!("failed to connect: {e}")
    } else {
        format!("transport error: {e}")
    }
}

impl AnalysisService for HttpAnalysisService {
    fn status(&self) -> Result<ServiceStatus> {
        let url = format!("{}/", self.base_url);
        debug!("GET {url}");
        let status = match self.client.get(&url).send() {
            Ok(resp) => ServiceStatus {
                base_url: self.base_url.clone(),
                reachable: resp.status().is_success(),
                http_status: Some(resp.status().as_u16()),
                error: None,
            },
            Err(e) => ServiceStatus {
                base_url: self.base_url.clone(),
                reachable: false,
                http_status: None,
                error: Some(transport_reason(&e)),
            },
        };
        Ok(status)
    }

    fn analyze(&self, test_id: &str, payload: &ImagePayload) -> Result<ColorRuleResult> {
        let url = self.endpoint(test_id);
        debug!("POST {url} image={} bytes={}", payload.file_name, payload.bytes.len());

        let part = multipart::Part::bytes(payload.bytes.clone()).file_name(payload.file_name.clone());
        let form = multipart::Form::new().part("image", part);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .map_err(|e| PaletteError::AnalysisFailed(transport_reason(&e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PaletteError::AnalysisFailed(format!("HTTP {status} from {url}")));
        }

        let body = response
            .bytes()
            .map_err(|e| PaletteError::AnalysisFailed(format!("reading response: {e}")))?;
        decode_result(&body)
    }
}
