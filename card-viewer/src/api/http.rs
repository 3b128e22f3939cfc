// HTTP implementation of the profile backend (reqwest)

use async_trait::async_trait;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use url::Url;

use super::service::{ProfileService, ServiceError};
use crate::config::ViewerSettings;
use crate::models::requests::ConnectPayload;
use crate::models::responses::{ApiResponse, ConnectResponse, ProfileRecord};

pub struct HttpProfileService {
    client: reqwest::Client,
    base: Url,
}

impl HttpProfileService {
    pub fn new(settings: &ViewerSettings) -> anyhow::Result<Self> {
        let base = Url::parse(settings.api_base_url.trim())
            .map_err(|e| anyhow::anyhow!("Invalid api_base_url: {}", e))?;
        if base.cannot_be_a_base() {
            anyhow::bail!("api_base_url cannot carry a path: {}", base);
        }

        let client = reqwest::Client::builder()
            .timeout(settings.request_timeout())
            .build()?;

        Ok(Self { client, base })
    }

    /// `{base}/{segments...}` with every segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

/// Decode the `{ success, data, message }` envelope, or turn a non-2xx reply into
/// `ServiceError::Status` carrying the body's `message`.
async fn read_envelope<T: DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<ApiResponse<T>, ServiceError> {
    let status = resp.status();
    let body = resp.bytes().await?;

    if !status.is_success() {
        let message = serde_json::from_slice::<ApiResponse<serde_json::Value>>(&body)
            .ok()
            .and_then(|env| env.message);
        return Err(ServiceError::Status {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_slice(&body).map_err(|e| ServiceError::Decode(e.to_string()))
}

#[async_trait]
impl ProfileService for HttpProfileService {
    async fn fetch_profile(
        &self,
        view_id: &str,
    ) -> Result<ApiResponse<ProfileRecord>, ServiceError> {
        let url = self.endpoint(&["profile", "view", view_id]);
        debug!("[PHASE: profile] [STEP: fetch] GET {}", url);
        let resp = self.client.get(url).send().await?;
        read_envelope(resp).await
    }

    async fn increment_views(&self, profile_id: &str) -> Result<(), ServiceError> {
        let url = self.endpoint(&["profile", profile_id, "views"]);
        debug!("[PHASE: profile] [STEP: view_count] PATCH {}", url);
        let resp = self.client.patch(url).send().await?;
        if !resp.status().is_success() {
            warn!(
                "[PHASE: profile] [STEP: view_count] Increment returned HTTP {}",
                resp.status()
            );
            return Err(ServiceError::Status {
                status: resp.status().as_u16(),
                message: None,
            });
        }
        Ok(())
    }

    async fn connect(&self, payload: &ConnectPayload) -> Result<ConnectResponse, ServiceError> {
        let url = self.endpoint(&["connections", "connect"]);
        debug!("[PHASE: share] [STEP: submit] POST {}", url);
        let resp = self.client.post(url).json(payload).send().await?;
        read_envelope(resp).await
    }
}
