use crate::config::Settings;
use crate::error::GameError;
use serde_json::{Value, json};

/// Anything that can turn a prompt into a model reply.
pub trait ModelCaller: Send + Sync {
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, GameError>> + Send;

    fn health(&self) -> Value;
}

pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl GeminiClient {
    pub fn new(settings: &Settings) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(settings.request_timeout)
                .build()
                .unwrap_or_default(),
            base_url: settings.api_base.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
        }
    }

    async fn call_gemini(&self, prompt: &str) -> Result<String, GameError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| GameError::ModelCall {
            status: None,
            message: "Gemini API key not configured".into(),
        })?;

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let payload = json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": {
                "temperature": self.temperature,
                "maxOutputTokens": self.max_tokens
            }
        });

        log::debug!("Calling Gemini API with model: {}", self.model);
        let res = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&payload)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let err_text = res.text().await.unwrap_or_default();
            log::error!("Gemini API error: {status} - {err_text}");
            return Err(GameError::ModelCall {
                status: Some(status.as_u16()),
                message: format!("Gemini API error: {} - {err_text}", status.as_u16()),
            });
        }

        let body: Value = res.json().await?;
        let text = candidate_text(&body)?;
        log::debug!("Received response from Gemini (length: {} chars)", text.len());
        Ok(text.to_string())
    }
}

impl ModelCaller for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GameError> {
        log::info!("Generating response using Gemini API");
        self.call_gemini(prompt).await.inspect_err(|e| {
            log::error!("{e}");
        })
    }

    fn health(&self) -> Value {
        match self.api_key {
            Some(_) => json!({ "status": "healthy", "provider": "gemini", "service": "llm" }),
            None => json!({
                "status": "unhealthy",
                "provider": "gemini",
                "service": "llm",
                "error": "No Gemini API key configured"
            }),
        }
    }
}

/// Pulls the reply text out of a `generateContent` envelope.
fn candidate_text(body: &Value) -> Result<&str, GameError> {
    body["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .ok_or_else(|| {
            log::error!("Unexpected Gemini response format: {body}");
            GameError::ModelCall {
                status: None,
                message: format!(
                    "Unexpected Gemini response format: {}",
                    GameError::excerpt(&body.to_string())
                ),
            }
        })
}
