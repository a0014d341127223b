//! Conversion client and the HTTP generation service behind it

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::core::config::ClientConfig;
use crate::core::errors::{CodeswapError, Result};
use crate::core::models::{ConversionRequest, ConversionResult};
use crate::core::sanitizer::sanitize;

/// Environment variable consulted when the configuration carries no access token
pub const ACCESS_TOKEN_ENV: &str = "CODESWAP_ACCESS_TOKEN";

/// Output format hint sent with every prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
}

/// Reply from the generation service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedReply {
    pub message: String,
    pub conversation_id: Option<String>,
}

/// A service that answers one prompt with generated text.
///
/// Every call is an independent exchange; implementations must not carry
/// conversation state from one call to the next.
#[async_trait]
pub trait CodeGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, format: OutputFormat) -> Result<GeneratedReply>;
}

#[async_trait]
impl<T: CodeGenerator + ?Sized> CodeGenerator for Arc<T> {
    async fn generate(&self, prompt: &str, format: OutputFormat) -> Result<GeneratedReply> {
        (**self).generate(prompt, format).await
    }
}

/// Instruction sent to the generation service for one file
pub fn build_prompt(request: &ConversionRequest) -> String {
    format!(
        "Convert the following code written in {} to {} without any explanation and return only converted code in a code block:\n{}",
        request.source_language, request.destination_language, request.content
    )
}

/// Converts file contents through a [`CodeGenerator`]
#[derive(Debug, Clone)]
pub struct ConversionClient<G> {
    generator: G,
}

impl<G: CodeGenerator> ConversionClient<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// Convert one request.
    ///
    /// A dry run returns an empty result without contacting the generator.
    pub async fn convert(
        &self,
        request: &ConversionRequest,
        dry_run: bool,
    ) -> Result<ConversionResult> {
        if dry_run {
            return Ok(ConversionResult::default());
        }

        let prompt = build_prompt(request);
        debug!(
            "Requesting {} -> {} conversion ({} bytes)",
            request.source_language,
            request.destination_language,
            request.content.len()
        );

        let reply = self.generator.generate(&prompt, OutputFormat::Text).await?;
        Ok(ConversionResult::new(sanitize(&reply.message)))
    }
}

/// Settings read from the opaque client configuration
#[derive(Clone, Deserialize)]
pub struct ChatSettings {
    pub endpoint: String,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl fmt::Debug for ChatSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatSettings")
            .field("endpoint", &self.endpoint)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

impl ChatSettings {
    /// Deserialize settings from the configuration value
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let settings: Self = serde_yaml::from_value(config.value().clone()).map_err(|e| {
            CodeswapError::ConfigError {
                message: format!("invalid generation service settings: {}", e),
            }
        })?;

        if settings.endpoint.trim().is_empty() {
            return Err(CodeswapError::MissingField {
                field: "endpoint".to_string(),
            });
        }

        Ok(settings)
    }
}

#[derive(Serialize)]
struct PromptBody<'a> {
    prompt: &'a str,
    output: OutputFormat,
    conversation_id: Option<&'a str>,
}

/// HTTP client for the generation service.
///
/// Debug output redacts the access token.
#[derive(Clone)]
pub struct ChatClient {
    client: reqwest::Client,
    endpoint: String,
    access_token: Option<String>,
}

impl fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatClient")
            .field("endpoint", &self.endpoint)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ChatClient {
    /// Create a client from explicit settings
    pub fn new(settings: ChatSettings) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout_ms) = settings.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        let client = builder.build()?;

        let access_token = settings
            .access_token
            .filter(|token| !token.is_empty())
            .or_else(|| std::env::var(ACCESS_TOKEN_ENV).ok().filter(|t| !t.is_empty()));

        Ok(Self {
            client,
            endpoint: settings.endpoint,
            access_token,
        })
    }

    /// Create from the opaque client configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(ChatSettings::from_config(config)?)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CodeGenerator for ChatClient {
    async fn generate(&self, prompt: &str, format: OutputFormat) -> Result<GeneratedReply> {
        let body = PromptBody {
            prompt,
            output: format,
            conversation_id: None,
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| CodeswapError::NetworkError {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CodeswapError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let json: serde_json::Value =
            response
                .json()
                .await
                .map_err(|e| CodeswapError::InvalidResponseError {
                    message: e.to_string(),
                })?;

        let message = json["message"]
            .as_str()
            .ok_or_else(|| CodeswapError::InvalidResponseError {
                message: "No message in response".to_string(),
            })?
            .to_string();

        let conversation_id = json["conversation_id"].as_str().map(|s| s.to_string());

        Ok(GeneratedReply {
            message,
            conversation_id,
        })
    }
}
