use std::io::Read;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use log::{debug, info};
use serde::Deserialize;

use super::{EnhanceImage, FetchImage, GenerateBanner, GenerateRequest, ServiceError};
use crate::config::ServiceConfig;

const USER_AGENT: &str = concat!("banner-studio/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the banner backend: generation, enhancement, and logo
/// upload. Calls block the calling thread; the app runs them on a worker
/// thread and feeds results back through a channel.
pub struct BannerClient {
    agent: ureq::Agent,
    base_url: String,
}

#[derive(Deserialize)]
struct LogoResponse {
    logo_path: String,
}

#[derive(Deserialize)]
struct HealthResponse {
    status: String,
}

fn service_err(err: ureq::Error) -> ServiceError {
    match err {
        ureq::Error::Status(code, _) => ServiceError::Status(code),
        other => ServiceError::Transport(Box::new(other)),
    }
}

fn read_bytes(response: ureq::Response) -> Result<Vec<u8>, ServiceError> {
    let mut bytes = Vec::new();
    response.into_reader().read_to_end(&mut bytes)?;
    Ok(bytes)
}

impl BannerClient {
    pub fn new(config: &ServiceConfig) -> Self {
        // Generation can take minutes on a CPU backend; only bound the
        // connection setup.
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(10))
            .build();
        Self {
            agent,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Probes `/api/health`.
    pub fn health_check(&self) -> Result<(), ServiceError> {
        let response = self
            .agent
            .get(&self.url("/api/health"))
            .set("User-Agent", USER_AGENT)
            .call()
            .map_err(service_err)?;
        let health: HealthResponse = response.into_json()?;
        if health.status == "ok" {
            Ok(())
        } else {
            Err(ServiceError::InvalidResponse(health.status))
        }
    }

    /// Uploads raw logo bytes and returns the stored-path token to pass
    /// back in a generation request.
    pub fn upload_logo(&self, bytes: &[u8]) -> Result<String, ServiceError> {
        info!("uploading logo ({} bytes)", bytes.len());
        let response = self
            .agent
            .post(&self.url("/api/upload-logo"))
            .set("User-Agent", USER_AGENT)
            .set("Content-Type", "application/octet-stream")
            .send_bytes(bytes)
            .map_err(service_err)?;
        let logo: LogoResponse = response.into_json()?;
        Ok(logo.logo_path)
    }
}

impl GenerateBanner for BannerClient {
    fn generate(&self, request: &GenerateRequest) -> Result<Vec<u8>, ServiceError> {
        info!(
            "generating banner: {}x{}, {} steps",
            request.width, request.height, request.num_inference_steps
        );
        let response = self
            .agent
            .post(&self.url("/api/generate-banner"))
            .set("User-Agent", USER_AGENT)
            .send_json(request)
            .map_err(service_err)?;
        read_bytes(response)
    }
}

impl EnhanceImage for BannerClient {
    fn enhance_image(&self, image: &[u8]) -> Result<Vec<u8>, ServiceError> {
        info!("requesting AI enhancement ({} bytes)", image.len());
        // The backend takes the image as a base64 data URL.
        let body = serde_json::json!({
            "image": format!("data:image/png;base64,{}", BASE64.encode(image)),
        });
        let response = self
            .agent
            .post(&self.url("/api/ai-enhance"))
            .set("User-Agent", USER_AGENT)
            .send_json(body)
            .map_err(service_err)?;
        read_bytes(response)
    }
}

impl FetchImage for BannerClient {
    fn fetch_image(&self, url: &str) -> Result<Vec<u8>, ServiceError> {
        debug!("fetching image from {url}");
        let response = self
            .agent
            .get(url)
            .set("User-Agent", USER_AGENT)
            .call()
            .map_err(service_err)?;
        read_bytes(response)
    }
}
