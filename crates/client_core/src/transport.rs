use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client,
};
use shared::protocol::{
    parse_analysis_response, AnalysisResponse, HealthResponse, ANALYZE_AUDIO_ROUTE,
    AUDIO_FIELD_NAME, HEALTH_ROUTE,
};
use tracing::{debug, info};
use url::Url;

use crate::{
    config::{endpoint, parse_backend_url},
    error::TransportError,
    types::AnalysisRequest,
};

#[async_trait]
pub trait AnalysisTransport: Send + Sync {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResponse, TransportError>;
}

pub struct MissingAnalysisTransport;

#[async_trait]
impl AnalysisTransport for MissingAnalysisTransport {
    async fn analyze(&self, _request: AnalysisRequest) -> Result<AnalysisResponse, TransportError> {
        Err(TransportError::Network(
            "analysis backend is not configured".to_string(),
        ))
    }
}

#[derive(Debug, Clone)]
pub struct HttpAnalysisTransport {
    http: Client,
    analyze_url: Url,
    health_url: Url,
}

impl HttpAnalysisTransport {
    pub fn new(backend_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        let base = parse_backend_url(backend_url)?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(TransportError::from_reqwest)?;
        Ok(Self {
            http,
            analyze_url: endpoint(&base, ANALYZE_AUDIO_ROUTE)?,
            health_url: endpoint(&base, HEALTH_ROUTE)?,
        })
    }

    pub fn analyze_url(&self) -> &Url {
        &self.analyze_url
    }

    pub async fn check_health(&self) -> Result<HealthResponse, TransportError> {
        let health: HealthResponse = self
            .http
            .get(self.health_url.clone())
            .send()
            .await
            .map_err(TransportError::from_reqwest)?
            .error_for_status()
            .map_err(TransportError::from_reqwest)?
            .json()
            .await
            .map_err(TransportError::from_reqwest)?;
        info!(status = %health.status, "analysis: backend health probed");
        Ok(health)
    }
}

#[async_trait]
impl AnalysisTransport for HttpAnalysisTransport {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResponse, TransportError> {
        let AnalysisRequest {
            file_name,
            content_type,
            bytes,
        } = request;
        info!(
            file = %file_name,
            content_type = %content_type,
            bytes = bytes.len(),
            url = %self.analyze_url,
            "analysis: uploading audio"
        );

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(&content_type)
            .map_err(TransportError::from_reqwest)?;
        let form = Form::new().part(AUDIO_FIELD_NAME, part);

        let response = self
            .http
            .post(self.analyze_url.clone())
            .multipart(form)
            .send()
            .await
            .map_err(TransportError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(TransportError::from_reqwest)?;
        debug!(bytes = body.len(), "analysis: response body received");
        Ok(parse_analysis_response(&body)?)
    }
}
