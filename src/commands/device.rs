use crate::error::Result;
use crate::imou::ImouCam;
use async_trait::async_trait;
use serde_json::{Value, json};

#[async_trait]
pub trait DeviceInfo: Send + Sync {
    /// Check whether the device is reachable from the cloud
    async fn device_online(&self) -> Result<bool>;

    /// Get firmware version information
    async fn device_version(&self) -> Result<Value>;
}

#[async_trait]
impl DeviceInfo for ImouCam {
    async fn device_online(&self) -> Result<bool> {
        let params = self.control_params(json!({})).await?;
        let data = self.send_request("deviceOnline", params).await?;

        // The platform reports "1" online, "0" offline, "4" sleeping.
        Ok(data.get("onLine").and_then(|o| o.as_str()) == Some("1"))
    }

    async fn device_version(&self) -> Result<Value> {
        let params = self.control_params(json!({})).await?;
        self.send_request("deviceVersionList", params).await
    }
}
