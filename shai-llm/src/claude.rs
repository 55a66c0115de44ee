use std::time::Duration;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CLAUDE_MODEL: &str = "claude-3-5-haiku-20241022";
const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Minimal client for the Anthropic Messages API.
#[derive(Clone, Debug)]
pub struct ClaudeClient {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
    endpoint: String,
}

/// Text and token counts of one completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClaudeReply {
    pub text: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<RequestMessage<'a>>,
}

#[derive(Serialize)]
struct RequestMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    #[serde(default)]
    input_tokens: u64,
    #[serde(default)]
    output_tokens: u64,
}

impl ClaudeClient {
    pub fn new(
        api_key: Option<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build http client")?;

        Ok(Self {
            http,
            api_key,
            model: model.into(),
            endpoint: MESSAGES_URL.to_owned(),
        })
    }

    /// Point the client at a different Messages endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn complete(
        &self,
        system: &str,
        user: &str,
        max_tokens: u32,
    ) -> anyhow::Result<ClaudeReply> {
        let Some(api_key) = self.api_key.as_deref() else {
            anyhow::bail!("Claude API key not configured");
        };

        let body = MessagesRequest {
            model: &self.model,
            max_tokens,
            system,
            messages: vec![RequestMessage {
                role: "user",
                content: user,
            }],
        };

        let response = self
            .http
            .post(&self.endpoint)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .context("failed to reach Claude API")?
            .error_for_status()
            .context("Claude API returned an error status")?;

        let parsed: MessagesResponse = response
            .json()
            .await
            .context("failed to decode Claude API response")?;

        let text = parsed
            .content
            .into_iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text)
            .map(|text| text.trim().to_owned())
            .context("Claude API response had no text content")?;

        let (input_tokens, output_tokens) = parsed
            .usage
            .map_or((0, 0), |usage| (usage.input_tokens, usage.output_tokens));

        Ok(ClaudeReply {
            text,
            input_tokens,
            output_tokens,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_key_fails_without_a_request() {
        let client = ClaudeClient::new(None, DEFAULT_CLAUDE_MODEL, Duration::from_secs(1))
            .unwrap()
            .with_endpoint("http://127.0.0.1:9/unreachable");

        assert!(!client.is_configured());
        let err = client.complete("system", "user", 10).await.unwrap_err();
        assert_eq!(err.to_string(), "Claude API key not configured");
    }

    #[test]
    fn decodes_message_responses() {
        let raw = r#"{
            "id": "msg_1",
            "type": "message",
            "content": [{"type": "text", "text": " [\"a\"] "}],
            "usage": {"input_tokens": 12, "output_tokens": 30}
        }"#;
        let parsed: MessagesResponse = serde_json::from_str(raw).unwrap();

        assert_eq!(parsed.content[0].kind, "text");
        assert_eq!(parsed.content[0].text.as_deref(), Some(" [\"a\"] "));
        let usage = parsed.usage.unwrap();
        assert_eq!((usage.input_tokens, usage.output_tokens), (12, 30));
    }
}
