use std::time::Duration;

use base64::Engine;
use common::{
    env_config::AiConfig,
    error::{AppError, Res},
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    parse::parse_verdict,
    persona::Persona,
    prompt,
    types::{AnalysisInput, InputKind, PersonaVerdict},
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Client for the generative-AI provider (any OpenAI-compatible
/// chat-completions endpoint).
#[derive(Clone)]
pub struct AnalystClient {
    http: reqwest::Client,
    config: AiConfig,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: String,
}

impl AnalystClient {
    pub fn new(config: AiConfig) -> Res<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(AnalystClient { http, config })
    }

    /// Scores one conversation input under the given persona.
    pub async fn analyze(
        &self,
        input: &AnalysisInput<'_>,
        persona: Persona,
    ) -> Res<PersonaVerdict> {
        let user_message = match input.kind {
            InputKind::Text => json!({
                "role": "user",
                "content": prompt::text_prompt(input.content),
            }),
            InputKind::Image => {
                let data_url = to_data_url(input.content);
                json!({
                    "role": "user",
                    "content": [
                        { "type": "text", "text": prompt::image_prompt() },
                        { "type": "image_url", "image_url": { "url": data_url } },
                    ],
                })
            }
        };

        let body = json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": prompt::system_prompt(persona) },
                user_message,
            ],
            "temperature": 0.7,
        });

        let response = self
            .http
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            log::error!("AI provider returned {}: {}", status, detail);
            return Err(AppError::Internal(format!(
                "AI provider returned error status: {}",
                status
            )));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to parse AI response: {}", e)))?;

        let reply = chat
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| AppError::Internal("AI response carried no choices".to_string()))?;

        parse_verdict(reply)
    }
}

/// Normalizes a screenshot payload to a data URL. Accepts a bare base64
/// string or an already-formed data URL.
fn to_data_url(content: &str) -> String {
    if content.starts_with("data:") {
        return content.to_string();
    }
    let mime = base64::engine::general_purpose::STANDARD
        .decode(content.as_bytes().iter().take(16).cloned().collect::<Vec<u8>>())
        .ok()
        .map(|head| detect_image_mime(&head))
        .unwrap_or("image/png");
    format!("data:{};base64,{}", mime, content)
}

fn detect_image_mime(head: &[u8]) -> &'static str {
    if head.starts_with(&[0x89, b'P', b'N', b'G']) {
        "image/png"
    } else if head.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "image/jpeg"
    } else if head.starts_with(b"GIF8") {
        "image/gif"
    } else if head.len() >= 12 && &head[8..12] == b"WEBP" {
        "image/webp"
    } else {
        "image/png"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_common_image_formats() {
        assert_eq!(detect_image_mime(&[0x89, b'P', b'N', b'G', 0, 0]), "image/png");
        assert_eq!(detect_image_mime(&[0xFF, 0xD8, 0xFF, 0xE0]), "image/jpeg");
        assert_eq!(detect_image_mime(b"GIF89a"), "image/gif");
        assert_eq!(detect_image_mime(&[0, 0, 0, 0]), "image/png");
    }

    #[test]
    fn passes_data_urls_through() {
        let url = "data:image/png;base64,abc";
        assert_eq!(to_data_url(url), url);
    }

    #[test]
    fn wraps_bare_base64_in_data_url() {
        let encoded = base64::engine::general_purpose::STANDARD.encode([0xFF, 0xD8, 0xFF, 0xE0]);
        let url = to_data_url(&encoded);
        assert!(url.starts_with("data:image/jpeg;base64,"));
    }
}
