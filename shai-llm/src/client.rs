use std::time::Duration;

use anyhow::Context as _;
use ollama_rs::{
    Ollama,
    generation::chat::{ChatMessage, request::ChatMessageRequest},
    models::ModelOptions,
};
use shai_utils::env::{env_bool, env_string, env_string_or, env_u64};
use shai_utils::formatting::preview;
use tracing::{debug, error, info};

use crate::claude::{ClaudeClient, DEFAULT_CLAUDE_MODEL};
use crate::parse::{clean_list_lines, parse_json_lines};
use crate::persona::Persona;
use crate::prompt::{json_request, line_request, system_prompt};
use crate::usage::TokenUsage;

const DEFAULT_OLLAMA_MODEL: &str = "llama2";
const DEFAULT_CLAUDE_TIMEOUT_SECS: u64 = 30;
const OLLAMA_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Clone, Debug)]
enum LlmBackend {
    Claude(ClaudeClient),
    Ollama { client: Ollama, model: String },
}

/// Lines produced for one request and which backend was asked for them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Generation {
    pub lines: Vec<String>,
    pub using_local: bool,
}

#[derive(Clone, Debug)]
pub struct LlmService {
    backend: LlmBackend,
    usage: TokenUsage,
}

impl LlmService {
    pub fn claude(client: ClaudeClient) -> Self {
        Self {
            backend: LlmBackend::Claude(client),
            usage: TokenUsage::new(),
        }
    }

    pub fn ollama(host: impl Into<String>, port: u16, model: impl Into<String>) -> Self {
        Self {
            backend: LlmBackend::Ollama {
                client: Ollama::new(host.into(), port),
                model: model.into(),
            },
            usage: TokenUsage::new(),
        }
    }

    /// Build the service from `USE_LOCAL`, `CLAUDE_*` and `OLLAMA_*` variables.
    pub fn from_env() -> anyhow::Result<Self> {
        if env_bool("USE_LOCAL", false) {
            let host = env_string_or("OLLAMA_HOST", "http://127.0.0.1");
            let port = env_string("OLLAMA_PORT")
                .and_then(|value| value.parse::<u16>().ok())
                .unwrap_or(11434);
            let model = env_string_or("OLLAMA_MODEL", DEFAULT_OLLAMA_MODEL);

            info!(host = %host, port, model = %model, "using local Ollama backend");
            return Ok(Self::ollama(host, port, model));
        }

        let api_key = env_string("CLAUDE_API_KEY");
        let model = env_string_or("CLAUDE_MODEL", DEFAULT_CLAUDE_MODEL);
        let timeout = Duration::from_secs(env_u64(
            "LLM_TIMEOUT_SECONDS",
            DEFAULT_CLAUDE_TIMEOUT_SECS,
        ));

        let client = ClaudeClient::new(api_key, model, timeout)?;
        info!(
            model = %client.model(),
            configured = client.is_configured(),
            "using Claude backend"
        );
        Ok(Self::claude(client))
    }

    pub fn using_local(&self) -> bool {
        matches!(self.backend, LlmBackend::Ollama { .. })
    }

    pub fn claude_configured(&self) -> bool {
        match &self.backend {
            LlmBackend::Claude(client) => client.is_configured(),
            LlmBackend::Ollama { .. } => false,
        }
    }

    pub fn usage(&self) -> &TokenUsage {
        &self.usage
    }

    /// Produce lines for `user_input` in the given persona.
    ///
    /// Never fails: blank input gets the persona's default lines and backend
    /// errors are logged and replaced by fallback lines.
    pub async fn generate(&self, persona: Persona, user_input: &str) -> Generation {
        let using_local = self.using_local();
        let user_input = user_input.trim();

        if user_input.is_empty() {
            return Generation {
                lines: persona.empty_input_lines(),
                using_local,
            };
        }

        let lines = match self.request_lines(persona, user_input).await {
            Ok(lines) if !lines.is_empty() => lines,
            Ok(_) => {
                error!(persona = persona.as_str(), "backend returned no lines; using fallbacks");
                persona.fallback_lines(user_input)
            }
            Err(err) => {
                error!(?err, persona = persona.as_str(), "generation failed; using fallbacks");
                persona.fallback_lines(user_input)
            }
        };

        Generation { lines, using_local }
    }

    async fn request_lines(&self, persona: Persona, user_input: &str) -> anyhow::Result<Vec<String>> {
        debug!(
            persona = persona.as_str(),
            input = %preview(user_input, 80),
            "requesting generation"
        );

        match &self.backend {
            LlmBackend::Claude(client) => {
                let reply = client
                    .complete(
                        &system_prompt(persona),
                        &json_request(persona, user_input),
                        persona.max_tokens(),
                    )
                    .await?;
                self.usage.record(reply.input_tokens, reply.output_tokens);

                Ok(parse_json_lines(&reply.text, persona.line_limit()))
            }
            LlmBackend::Ollama { client, model } => {
                let messages = vec![
                    ChatMessage::system(system_prompt(persona)),
                    ChatMessage::user(line_request(persona, user_input)),
                ];
                let request = ChatMessageRequest::new(model.clone(), messages)
                    .options(ModelOptions::default().temperature(0.9));

                let response = tokio::time::timeout(OLLAMA_TIMEOUT, client.send_chat_messages(request))
                    .await
                    .context("ollama request timed out")?
                    .context("cannot reach Ollama; make sure it is running")?;

                Ok(clean_list_lines(
                    response.message.content.trim(),
                    persona.line_limit(),
                ))
            }
        }
    }
}
