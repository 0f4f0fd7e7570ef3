use phf::phf_map;
use tokio::time::Duration;

pub const BASE_URL: &str = "https://openapi.easy4ip.com/openapi";

pub const API_VERSION: &str = "1.0";

/// `result.code` value the Open API returns on success.
pub const OK_CODE: &str = "0";

/// Known Open API error codes, used to describe failures when the
/// vendor omits a message.
pub static CODES: phf::Map<&'static str, &'static str> = phf_map! {
    "0" => "OK",
    "SN1001" => "Invalid signature",
    "SN1002" => "Request replayed or nonce reused",
    "TK1001" => "Failed to create access token",
    "TK1002" => "Access token expired or does not exist",
    "DV1002" => "Device does not exist",
    "DV1007" => "Channel does not exist",
    "OP1009" => "Device is offline",
    "OP1010" => "Device response timed out",
};

/// How long a single directional move runs, in milliseconds.
pub const MOVE_DURATION_MS: u64 = 1000;

/// Wait after a move before asking for a snapshot, so the image is
/// taken once the camera has physically stopped.
pub const SETTLE_TIME: Duration = Duration::from_secs(4);

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub fn describe_code(code: &str) -> &'static str {
    CODES.get(code).copied().unwrap_or("Unrecognized error code")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_resolve() {
        assert_eq!(describe_code("0"), "OK");
        assert_eq!(
            describe_code("TK1002"),
            "Access token expired or does not exist"
        );
    }

    #[test]
    fn unknown_code_falls_back() {
        assert_eq!(describe_code("XX9999"), "Unrecognized error code");
    }
}
