use crate::error::{ImouError, Result};
use crate::imou::{AccessToken, ImouCam};
use async_trait::async_trait;
use serde_json::json;
use std::sync::atomic::Ordering;

#[async_trait]
pub trait Authentication: Send + Sync {
    /// Obtain a bearer token from the platform
    async fn authenticate(&self) -> Result<()>;

    /// Check if a token has been obtained
    fn is_authenticated(&self) -> bool;

    /// Get the current token, if any
    async fn access_token(&self) -> Option<AccessToken>;
}

#[async_trait]
impl Authentication for ImouCam {
    async fn authenticate(&self) -> Result<()> {
        let data = self.send_request("accessToken", json!({})).await?;

        let token = data
            .get("accessToken")
            .and_then(|t| t.as_str())
            .ok_or_else(|| {
                ImouError::AuthenticationError("Response carried no accessToken".to_string())
            })?
            .to_string();

        let expire_time = data.get("expireTime").and_then(|e| e.as_i64());

        *self.token.write().await = Some(AccessToken { token, expire_time });
        self.authenticated.store(true, Ordering::Release);

        tracing::info!(device = %self.device_id(), "authenticated");
        Ok(())
    }

    fn is_authenticated(&self) -> bool {
        self.authenticated.load(Ordering::Acquire)
    }

    async fn access_token(&self) -> Option<AccessToken> {
        self.token.read().await.clone()
    }
}
