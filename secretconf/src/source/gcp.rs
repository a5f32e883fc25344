use super::{SecretSource, SourceError};
use async_trait::async_trait;
use base64::Engine as _;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

/// Default endpoint of the Secret Manager REST API.
pub const DEFAULT_BASE_URL: &str = "https://secretmanager.googleapis.com";

/// Environment variable read by [`GcpSecretManager::from_env`].
pub const ACCESS_TOKEN_VAR: &str = "GOOGLE_OAUTH_ACCESS_TOKEN";

/// Google Cloud Secret Manager over its REST API.
///
/// Always reads the `latest` version of a secret. Authentication uses an
/// OAuth2 bearer token obtained by the caller (for example from
/// `gcloud auth print-access-token` or the metadata server).
pub struct GcpSecretManager {
    project_id: String,
    access_token: SecretString,
    base_url: String,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct AccessSecretVersionResponse {
    payload: SecretPayload,
}

#[derive(Deserialize)]
struct SecretPayload {
    #[serde(default)]
    data: String,
}

impl GcpSecretManager {
    /// Create a client for `project_id` authenticated with `access_token`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::InvalidKey`] if `project_id` is empty.
    pub fn new(
        project_id: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Result<Self, SourceError> {
        let project_id = project_id.into();
        if project_id.is_empty() {
            return Err(SourceError::InvalidKey {
                key: project_id,
                reason: "project id cannot be empty",
            });
        }

        Ok(Self {
            project_id,
            access_token: SecretString::from(access_token.into()),
            base_url: DEFAULT_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        })
    }

    /// Create a client reading the token from `GOOGLE_OAUTH_ACCESS_TOKEN`.
    pub fn from_env(project_id: impl Into<String>) -> Result<Self, SourceError> {
        let token = std::env::var(ACCESS_TOKEN_VAR)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| SourceError::NotFound {
                key: ACCESS_TOKEN_VAR.to_string(),
            })?;
        Self::new(project_id, token.trim())
    }

    /// Point the client at a different endpoint (emulators, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Use a preconfigured HTTP client (proxies, timeouts).
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Project the secrets are read from.
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    fn latest_version_url(&self, key: &str) -> String {
        format!(
            "{}/v1/projects/{}/secrets/{}/versions/latest:access",
            self.base_url, self.project_id, key
        )
    }
}

/// Secret names are `[A-Za-z0-9_-]+`; anything else would change the
/// request path.
fn validate_secret_name(key: &str) -> Result<(), SourceError> {
    let invalid = |reason| SourceError::InvalidKey {
        key: key.to_string(),
        reason,
    };

    if key.is_empty() {
        return Err(invalid("secret name cannot be empty"));
    }
    if !key
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
    {
        return Err(invalid(
            "secret name may only contain letters, digits, '_' and '-'",
        ));
    }
    Ok(())
}

impl std::fmt::Debug for GcpSecretManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GcpSecretManager")
            .field("project_id", &self.project_id)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl SecretSource for GcpSecretManager {
    async fn fetch(&self, key: &str) -> Result<String, SourceError> {
        validate_secret_name(key)?;

        let response = self
            .client
            .get(self.latest_version_url(key))
            .bearer_auth(self.access_token.expose_secret())
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound {
                key: key.to_string(),
            });
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SourceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: AccessSecretVersionResponse = response.json().await?;
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(body.payload.data.as_bytes())
            .map_err(|e| SourceError::Decode(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| SourceError::Decode(e.to_string()))
    }
}
