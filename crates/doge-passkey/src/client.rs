//! HTTP client for the delegated WebAuthn verification service.

use futures::future::try_join_all;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::PasskeyError;
use crate::types::{
    ApiEnvelope, ApiResult, AuthorizeInfo, AuthorizeInfoRequest, PasskeyConfig, VerifyRequest,
    VerifyResult,
};

/// Address prefix of mainnet addresses, which are served by the production host.
const MAINNET_PREFIX: &str = "ckb1";

/// HTTP client for the passkey verification API.
#[derive(Debug, Clone)]
pub struct PasskeyClient {
    /// Client configuration.
    config: PasskeyConfig,
    /// Underlying HTTP client.
    client: reqwest::Client,
}

impl Default for PasskeyClient {
    fn default() -> Self {
        Self::new(PasskeyConfig::default())
    }
}

impl PasskeyClient {
    /// Create a new passkey client with the given configuration.
    pub fn new(config: PasskeyConfig) -> Self {
        let client = reqwest::Client::new();
        Self { config, client }
    }

    /// The base URL that serves `address`.
    pub fn endpoint_for(&self, address: &str) -> &str {
        if address.starts_with(MAINNET_PREFIX) {
            &self.config.production_url
        } else {
            &self.config.test_url
        }
    }

    /// Fetch the backup addresses authorized for `address`.
    pub async fn authorize_info(&self, address: &str) -> Result<Vec<String>, PasskeyError> {
        let url = format!("{}/v1/webauthn/authorize-info", self.endpoint_for(address));
        let info: AuthorizeInfo = self
            .post(&url, &AuthorizeInfoRequest { ckb_address: address })
            .await?;
        Ok(info.ckb_address)
    }

    /// Ask the service whether `backup` signed `message` on behalf of `master`.
    ///
    /// A leading `0x` on `signature` is stripped before sending.
    pub async fn verify_backup(
        &self,
        master: &str,
        backup: &str,
        message: &str,
        signature: &str,
    ) -> Result<bool, PasskeyError> {
        let url = format!("{}/v1/webauthn/verify", self.endpoint_for(master));
        let body = VerifyRequest {
            master_addr: master,
            backup_addr: backup,
            msg: message,
            signature: signature.strip_prefix("0x").unwrap_or(signature),
        };
        let result: VerifyResult = self.post(&url, &body).await?;
        Ok(result.is_valid)
    }

    /// Verify a passkey-signed message for `address`.
    ///
    /// Every authorized backup address (or `address` itself when it has none)
    /// is checked concurrently. Returns `true` if any of them accepts the
    /// signature; the first request error fails the whole call.
    pub async fn verify_passkey_message(
        &self,
        address: &str,
        message: &str,
        signature: &str,
    ) -> Result<bool, PasskeyError> {
        let mut candidates = self.authorize_info(address).await?;
        if candidates.is_empty() {
            candidates.push(address.to_string());
        }
        debug!(address, candidates = candidates.len(), "verifying passkey message");

        let results = try_join_all(
            candidates
                .iter()
                .map(|backup| self.verify_backup(address, backup, message, signature)),
        )
        .await?;

        Ok(results.into_iter().any(|valid| valid))
    }

    /// POST a JSON body and unwrap the service's response envelope.
    async fn post<B, T>(&self, url: &str, body: &B) -> Result<T, PasskeyError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(url, "passkey request");

        let mut request = self.client.post(url).json(body);
        if let Some(timeout) = self.config.timeout {
            request = request.timeout(timeout);
        }

        let resp = request.send().await?;
        let status = resp.status();

        if !status.is_success() {
            let mut message = resp.text().await.unwrap_or_default();
            if message.is_empty() {
                message = status.canonical_reason().unwrap_or_default().to_string();
            }
            warn!(url, status = status.as_u16(), %message, "passkey service returned error status");
            return Err(PasskeyError::ServerError {
                status_code: status.as_u16(),
                message,
            });
        }

        let text = resp.text().await?;
        let envelope: ApiEnvelope<T> = serde_json::from_str(&text)?;
        let result = envelope.into_result()?;
        if let ApiResult::Failure { code, message } = &result {
            warn!(url, code, %message, "passkey service rejected request");
        }
        result.into_data()
    }
}
