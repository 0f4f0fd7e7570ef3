use crate::constants::{API_VERSION, OK_CODE, describe_code};
use crate::error::{ImouError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// The `system` block every Open API request carries. The vendor
/// verifies `sign` against the timestamp/nonce pair server-side.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemHeader {
    pub ver: String,
    pub app_id: String,
    pub sign: String,
    pub time: i64,
    pub nonce: String,
}

#[derive(Debug, Serialize)]
pub struct RequestEnvelope {
    pub system: SystemHeader,
    pub id: String,
    pub params: Value,
}

#[derive(Debug, Deserialize)]
pub struct ResponseEnvelope {
    pub result: ApiResult,
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiResult {
    pub code: String,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Value,
}

impl ResponseEnvelope {
    /// Unwrap the `data` payload, turning a non-zero `result.code`
    /// into a typed error.
    pub fn into_data(self) -> Result<Value> {
        if self.result.code != OK_CODE {
            let msg = self
                .result
                .msg
                .unwrap_or_else(|| describe_code(&self.result.code).to_string());
            return Err(ImouError::ApiError {
                code: self.result.code,
                msg,
            });
        }
        Ok(self.result.data)
    }
}

/// md5-hex signature over the canonical `time:{t},nonce:{n},appSecret:{s}`
/// string, exactly as the Open API expects it.
pub fn openapi_sign(time: i64, nonce: &str, app_secret: &str) -> String {
    let raw = format!("time:{},nonce:{},appSecret:{}", time, nonce, app_secret);
    format!("{:x}", md5::compute(raw.as_bytes()))
}

/// Build a freshly-signed `system` header: current Unix time plus a
/// single-use v4 UUID nonce.
pub fn signed_system(app_id: &str, app_secret: &str) -> SystemHeader {
    let time = chrono::Utc::now().timestamp();
    let nonce = Uuid::new_v4().to_string();
    let sign = openapi_sign(time, &nonce, app_secret);

    SystemHeader {
        ver: API_VERSION.to_string(),
        app_id: app_id.to_string(),
        sign,
        time,
        nonce,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sign_matches_known_digest() {
        let sign = openapi_sign(
            1_700_000_000,
            "8f2d9b4a-1c3e-4f5a-9b6d-7e8f9a0b1c2d",
            "0e3684c5605c4f479faff2a452ae81",
        );
        assert_eq!(sign, "163c468c677fbfabbabe2f9754a4d3a8");

        assert_eq!(
            openapi_sign(1, "n", "s"),
            "451d519b4a06943b3cdcbe7a67c7965b"
        );
    }

    #[test]
    fn system_header_serializes_with_vendor_field_names() {
        let header = SystemHeader {
            ver: "1.0".to_string(),
            app_id: "lc2e13fd".to_string(),
            sign: "abc".to_string(),
            time: 42,
            nonce: "n-1".to_string(),
        };
        let value = serde_json::to_value(&header).unwrap();

        assert_eq!(value["ver"], "1.0");
        assert_eq!(value["appId"], "lc2e13fd");
        assert_eq!(value["sign"], "abc");
        assert_eq!(value["time"], 42);
        assert_eq!(value["nonce"], "n-1");
    }

    #[test]
    fn request_envelope_shape() {
        let envelope = RequestEnvelope {
            system: signed_system("app", "secret"),
            id: "7".to_string(),
            params: json!({"deviceId": "D1"}),
        };
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["id"], "7");
        assert_eq!(value["params"]["deviceId"], "D1");
        assert!(value["system"]["sign"].is_string());
        assert_eq!(value["system"]["sign"].as_str().unwrap().len(), 32);
    }

    #[test]
    fn success_envelope_yields_data() {
        let envelope: ResponseEnvelope = serde_json::from_value(json!({
            "result": {
                "code": "0",
                "msg": "Operation is successful.",
                "data": {"accessToken": "At_0001", "expireTime": 86400}
            },
            "id": "1"
        }))
        .unwrap();

        let data = envelope.into_data().unwrap();
        assert_eq!(data["accessToken"], "At_0001");
    }

    #[test]
    fn error_envelope_yields_api_error() {
        let envelope: ResponseEnvelope = serde_json::from_value(json!({
            "result": {"code": "TK1002", "msg": null},
            "id": "3"
        }))
        .unwrap();

        match envelope.into_data() {
            Err(ImouError::ApiError { code, msg }) => {
                assert_eq!(code, "TK1002");
                assert_eq!(msg, "Access token expired or does not exist");
            }
            other => panic!("expected ApiError, got {:?}", other),
        }
    }

    #[test]
    fn envelope_without_data_defaults_to_null() {
        let envelope: ResponseEnvelope = serde_json::from_value(json!({
            "result": {"code": "0"}
        }))
        .unwrap();
        assert!(envelope.into_data().unwrap().is_null());
    }
}
