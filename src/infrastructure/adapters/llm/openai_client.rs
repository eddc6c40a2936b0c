//! OpenAI Script Client
//!
//! Implements ScriptGeneratorPort via the chat completions API. The system
//! prompt asks for a 30-second Brazilian-Portuguese educational script as
//! JSON, which is parsed straight into the domain script types.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{ScriptError, ScriptGeneratorPort};
use crate::domain::script::GeneratedScript;

const SYSTEM_PROMPT: &str = r#"Você é um especialista em criar roteiros para vídeos educativos de 30 segundos em português brasileiro.

IMPORTANTE:
1. Crie um roteiro com EXATAMENTE 30 segundos (75-80 palavras)
2. Divida o roteiro em segmentos naturais de fala (frases ou ideias completas)
3. Para cada segmento, indique:
   - O texto exato a ser narrado
   - Palavras-chave visuais (o que mostrar na tela)
   - Duração estimada em segundos (baseado em 2.5 palavras/segundo)

Retorne no formato JSON:
{
  "titulo": "Título do vídeo",
  "segmentos": [
    {
      "texto": "Texto a ser narrado",
      "palavras_chave": ["palavra1", "palavra2"],
      "duracao_estimada": 3.5,
      "tipo_visual": "video|imagem|animacao"
    }
  ],
  "palavras_totais": 75
}"#;

/// OpenAI client configuration
#[derive(Debug, Clone)]
pub struct OpenAiClientConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl OpenAiClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: "https://api.openai.com".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            timeout_secs: 30,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

/// OpenAI script client
pub struct OpenAiScriptClient {
    client: Client,
    config: OpenAiClientConfig,
}

impl OpenAiScriptClient {
    pub fn new(config: OpenAiClientConfig) -> Result<Self, ScriptError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ScriptError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.config.base_url)
    }
}

#[async_trait]
impl ScriptGeneratorPort for OpenAiScriptClient {
    async fn generate(&self, prompt: &str) -> Result<GeneratedScript, ScriptError> {
        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: format!("Crie um roteiro de vídeo educativo sobre: {}", prompt),
                },
            ],
            temperature: 0.7,
            max_tokens: 500,
        };

        tracing::debug!(
            url = %self.completions_url(),
            model = %self.config.model,
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ScriptError::Timeout
                } else if e.is_connect() {
                    ScriptError::NetworkError(format!("Cannot connect to OpenAI: {}", e))
                } else {
                    ScriptError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ScriptError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ScriptError::InvalidResponse(e.to_string()))?;

        let content = completion
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| ScriptError::InvalidResponse("Empty choices".to_string()))?;

        let script: GeneratedScript = serde_json::from_str(content).map_err(|e| {
            ScriptError::InvalidResponse(format!("Script JSON parse failed: {}", e))
        })?;

        tracing::info!(
            title = %script.title,
            segments = script.segments.len(),
            total_words = script.total_word_count,
            "Script generated"
        );

        Ok(script)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = OpenAiClientConfig::new("sk-test");
        assert_eq!(config.base_url, "https://api.openai.com");
        assert_eq!(config.model, "gpt-3.5-turbo");
    }

    #[test]
    fn test_completions_url() {
        let config = OpenAiClientConfig::new("sk-test").with_base_url("http://localhost:9999");
        let client = OpenAiScriptClient::new(config).unwrap();
        assert_eq!(
            client.completions_url(),
            "http://localhost:9999/v1/chat/completions"
        );
    }

    #[test]
    fn test_script_content_parses_into_domain() {
        let content = r#"{
            "titulo": "Fotossíntese em 30 segundos",
            "segmentos": [
                {"texto": "As plantas transformam luz em energia",
                 "palavras_chave": ["planta", "sol"],
                 "duracao_estimada": 2.4,
                 "tipo_visual": "video"}
            ],
            "palavras_totais": 6
        }"#;
        let script: GeneratedScript = serde_json::from_str(content).unwrap();
        assert_eq!(script.title, "Fotossíntese em 30 segundos");
        assert_eq!(script.segments.len(), 1);
    }
}
