use crate::constants::{BASE_URL, REQUEST_TIMEOUT};
use crate::error::{ImouError, Result};
use crate::protocol::{RequestEnvelope, ResponseEnvelope, signed_system};
use serde_json::{Map, Value};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::RwLock;
use tokio::time::Duration;

/// Per-application credentials issued by the Open API console, plus
/// the device this client controls.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub app_id: String,
    pub app_secret: String,
    pub device_id: String,
    pub channel: String,
}

impl Credentials {
    pub fn new(
        app_id: impl Into<String>,
        app_secret: impl Into<String>,
        device_id: impl Into<String>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            app_secret: app_secret.into(),
            device_id: device_id.into(),
            channel: "0".to_string(),
        }
    }

    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = channel.into();
        self
    }
}

/// Bearer token handed out by the `accessToken` method. `expire_time`
/// is the vendor-reported lifetime in seconds; it is stored but not
/// enforced.
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token: String,
    pub expire_time: Option<i64>,
}

pub struct ImouCam {
    pub(crate) credentials: Credentials,
    pub(crate) base_url: String,
    pub(crate) timeout: Duration,

    pub(crate) http: reqwest::Client,

    // Atomic state
    pub(crate) authenticated: Arc<AtomicBool>,

    // Every request carries a unique increasing id
    pub(crate) request_seq: Arc<AtomicU64>,

    pub(crate) token: Arc<RwLock<Option<AccessToken>>>,
}

impl ImouCam {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: BASE_URL.to_string(),
            timeout: REQUEST_TIMEOUT,
            http: reqwest::Client::new(),
            authenticated: Arc::new(AtomicBool::new(false)),
            request_seq: Arc::new(AtomicU64::new(1)),
            token: Arc::new(RwLock::new(None)),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn device_id(&self) -> &str {
        &self.credentials.device_id
    }

    pub fn channel(&self) -> &str {
        &self.credentials.channel
    }

    pub(crate) fn next_request_id(&self) -> String {
        self.request_seq.fetch_add(1, Ordering::AcqRel).to_string()
    }

    /// POST a signed envelope to `{base}/{method}` and unwrap the
    /// `result.data` payload.
    pub(crate) async fn send_request(&self, method: &str, params: Value) -> Result<Value> {
        let envelope = RequestEnvelope {
            system: signed_system(&self.credentials.app_id, &self.credentials.app_secret),
            id: self.next_request_id(),
            params,
        };

        let url = format!("{}/{}", self.base_url, method);
        tracing::debug!(method, id = %envelope.id, "sending request");

        let response = self
            .http
            .post(&url)
            .timeout(self.timeout)
            .json(&envelope)
            .send()
            .await?;

        let envelope: ResponseEnvelope = response
            .json()
            .await
            .map_err(|e| ImouError::SerializationError(format!("Invalid response body: {}", e)))?;

        envelope.into_data()
    }

    /// Params for control calls: the stored token plus the device and
    /// channel ids, merged with any method-specific fields. Fails when
    /// no token has been obtained yet.
    pub(crate) async fn control_params(&self, extra: Value) -> Result<Value> {
        let guard = self.token.read().await;
        let token = guard.as_ref().ok_or(ImouError::NotAuthenticated)?;

        let mut params = Map::new();
        params.insert("token".to_string(), Value::from(token.token.as_str()));
        params.insert(
            "deviceId".to_string(),
            Value::from(self.credentials.device_id.as_str()),
        );
        params.insert(
            "channelId".to_string(),
            Value::from(self.credentials.channel.as_str()),
        );

        if let Value::Object(fields) = extra {
            params.extend(fields);
        }

        Ok(Value::Object(params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_cam() -> ImouCam {
        ImouCam::new(Credentials::new("app", "secret", "DEV1").with_channel("2"))
    }

    #[test]
    fn request_ids_increase() {
        let cam = test_cam();
        assert_eq!(cam.next_request_id(), "1");
        assert_eq!(cam.next_request_id(), "2");
        assert_eq!(cam.next_request_id(), "3");
    }

    #[tokio::test]
    async fn control_params_require_token() {
        let cam = test_cam();
        match cam.control_params(json!({})).await {
            Err(ImouError::NotAuthenticated) => {}
            other => panic!("expected NotAuthenticated, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn control_params_merge_extra_fields() {
        let cam = test_cam();
        *cam.token.write().await = Some(AccessToken {
            token: "At_test".to_string(),
            expire_time: Some(86400),
        });

        let params = cam
            .control_params(json!({"operation": "3", "duration": "1000"}))
            .await
            .unwrap();

        assert_eq!(params["token"], "At_test");
        assert_eq!(params["deviceId"], "DEV1");
        assert_eq!(params["channelId"], "2");
        assert_eq!(params["operation"], "3");
        assert_eq!(params["duration"], "1000");
    }
}
