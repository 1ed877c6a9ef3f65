//! Passkey data types: configuration, request bodies, and response envelopes.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::PasskeyError;

/// Production host, used for `ckb1` (mainnet) addresses.
pub const PRODUCTION_URL: &str = "https://webauthn-api.did.id";

/// Test host, used for every other address.
pub const TEST_URL: &str = "https://test-webauthn-api.did.id";

/// Configuration for a [`PasskeyClient`](crate::PasskeyClient).
#[derive(Debug, Clone)]
pub struct PasskeyConfig {
    /// Base URL for mainnet addresses.
    pub production_url: String,
    /// Base URL for all other addresses.
    pub test_url: String,
    /// Per-request timeout. `None` leaves reqwest's default.
    pub timeout: Option<Duration>,
}

impl Default for PasskeyConfig {
    fn default() -> Self {
        Self {
            production_url: PRODUCTION_URL.to_string(),
            test_url: TEST_URL.to_string(),
            timeout: None,
        }
    }
}

/// Body of `POST /v1/webauthn/authorize-info`.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorizeInfoRequest<'a> {
    /// Address whose backup keys are requested.
    pub ckb_address: &'a str,
}

/// Data returned by `authorize-info`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizeInfo {
    /// Backup addresses authorized to sign for the master address.
    #[serde(default)]
    pub ckb_address: Vec<String>,
}

/// Body of `POST /v1/webauthn/verify`.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyRequest<'a> {
    /// The address the message claims to come from.
    pub master_addr: &'a str,
    /// The key that actually produced the signature.
    pub backup_addr: &'a str,
    /// The signed message.
    pub msg: &'a str,
    /// Hex signature without a `0x` prefix.
    pub signature: &'a str,
}

/// Data returned by `verify`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyResult {
    /// Whether the service accepted the signature.
    pub is_valid: bool,
}

/// The wire envelope every service response is wrapped in.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Zero on success.
    #[serde(default)]
    pub err_no: i64,
    /// Error text when `err_no` is non-zero.
    #[serde(default)]
    pub err_msg: String,
    /// Payload, present on success.
    pub data: Option<T>,
}

/// A decoded service response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiResult<T> {
    /// `err_no == 0` with a payload.
    Success(T),
    /// `err_no != 0`.
    Failure {
        /// The `err_no` value.
        code: i64,
        /// The `err_msg` value.
        message: String,
    },
}

impl<T> ApiEnvelope<T> {
    /// Classify the envelope.
    ///
    /// # Errors
    /// `MissingData` if the service reported success without a payload.
    pub fn into_result(self) -> Result<ApiResult<T>, PasskeyError> {
        if self.err_no != 0 {
            return Ok(ApiResult::Failure {
                code: self.err_no,
                message: self.err_msg,
            });
        }
        self.data.map(ApiResult::Success).ok_or(PasskeyError::MissingData)
    }
}

impl<T> ApiResult<T> {
    /// The payload, or `ApiError` for a failure.
    pub fn into_data(self) -> Result<T, PasskeyError> {
        match self {
            ApiResult::Success(data) => Ok(data),
            ApiResult::Failure { code, message } => Err(PasskeyError::ApiError { code, message }),
        }
    }
}
