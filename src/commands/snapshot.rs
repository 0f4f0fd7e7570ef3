use crate::error::{ImouError, Result};
use crate::imou::ImouCam;
use async_trait::async_trait;
use serde_json::{Value, json};

#[async_trait]
pub trait Snapshot: Send + Sync {
    /// Trigger a snapshot and return the image URL
    async fn snapshot(&self) -> Result<String>;

    /// Trigger a snapshot and download the image bytes
    async fn fetch_snapshot(&self) -> Result<Vec<u8>>;
}

/// Pull the image URL out of a snapshot `data` payload. A success
/// envelope without a url means the camera did not produce an image
/// in time.
fn image_url(data: &Value) -> Result<String> {
    data.get("url")
        .and_then(|u| u.as_str())
        .map(str::to_string)
        .ok_or_else(|| ImouError::SnapshotError("Response carried no image URL".to_string()))
}

#[async_trait]
impl Snapshot for ImouCam {
    async fn snapshot(&self) -> Result<String> {
        let params = self.control_params(json!({})).await?;
        let data = self.send_request("setDeviceSnapEnhanced", params).await?;

        let url = image_url(&data)?;
        tracing::debug!(%url, "snapshot ready");
        Ok(url)
    }

    async fn fetch_snapshot(&self) -> Result<Vec<u8>> {
        let url = self.snapshot().await?;

        let bytes = self
            .http
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        Ok(bytes.to_vec())
    }
}
