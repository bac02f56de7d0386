use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Verdict from the token service. On `access == false` the status and
/// message are forwarded to the client untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenDecision {
    pub access: bool,
    pub status: u16,
    pub message: String,
}

/// Delegated authorization check against the external identity service.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn check(&self, user_id: &str, token: &str) -> Result<TokenDecision>;
}

#[derive(Serialize)]
struct CheckRequest<'a> {
    user_id: &'a str,
    token: &'a str,
}

/// Production verifier: POSTs `{user_id, token}` to the token service and
/// decodes its JSON verdict. Transport failures bubble up as unexpected
/// errors (500), never as a denial.
pub struct HttpTokenVerifier {
    client: reqwest::Client,
    url: String,
}

impl HttpTokenVerifier {
    pub fn new(url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }
}

#[async_trait]
impl TokenVerifier for HttpTokenVerifier {
    async fn check(&self, user_id: &str, token: &str) -> Result<TokenDecision> {
        let decision = self
            .client
            .post(&self.url)
            .json(&CheckRequest { user_id, token })
            .send()
            .await
            .context("token service unreachable")?
            .json::<TokenDecision>()
            .await
            .context("token service returned malformed verdict")?;

        Ok(decision)
    }
}
