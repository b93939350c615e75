use std::{future::Future, pin::Pin, time::Duration};

use log::debug;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

mod api_error;
pub use api_error::OpenRouterApiError;

use crate::generator::{GenerateError, GeneratedImage, ImageGenerator, Model, fetch_image_bytes};

const API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Talks to OpenRouter directly: a chat completion with the image modality,
/// where the generated image comes back attached to the assistant message.
#[derive(Clone)]
pub struct OpenRouter {
    model: Model,
    api_key: String,
    client: Client,
}

impl OpenRouter {
    pub fn new(model: Model, api_key: String) -> Self {
        Self {
            model,
            api_key,
            client: Client::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub images: Vec<ImageEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ImageEntry {
    pub image_url: ImageUrl,
}

#[derive(Debug, Deserialize)]
pub struct ImageUrl {
    pub url: String,
}

impl ImageGenerator for OpenRouter {
    fn generate<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<GeneratedImage, GenerateError>> + Send + 'a>> {
        Box::pin(async move {
            let resp = self
                .client
                .post(API_URL)
                .timeout(Duration::from_secs(60 * 3))
                .bearer_auth(&self.api_key)
                .json(&request_payload(self.model, prompt))
                .send()
                .await?;

            let status = resp.status();
            let text = resp.text().await?;
            debug!("completion response ({status}): {text}");

            if !status.is_success() {
                let message = error_message(&text).unwrap_or_else(|| text.clone());
                let api_error = OpenRouterApiError::from_status(status.as_u16(), message);
                return Err(GenerateError::service(api_error.to_string()));
            }

            let response: CompletionResponse = serde_json::from_str(&text).map_err(|_| {
                GenerateError::Transport(format!("unreadable response ({status}): {text}"))
            })?;

            let image_url = first_image_url(&response)
                .ok_or_else(|| GenerateError::service("No image generated"))?
                .to_string();

            let data = fetch_image_bytes(&self.client, &image_url).await?;
            Ok(GeneratedImage {
                data,
                url: image_url,
            })
        })
    }
}

fn request_payload(model: Model, prompt: &str) -> serde_json::Value {
    json!({
        "model": model.id(),
        "messages": [
            {
                "role": "user",
                "content": prompt,
            }
        ],
        "modalities": ["image"],
    })
}

fn first_image_url(response: &CompletionResponse) -> Option<&str> {
    let image = response.choices.first()?.message.images.first()?;
    Some(image.image_url.url.as_str())
}

/// Pulls `error.message` out of an OpenRouter error body
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    Some(value["error"]["message"].as_str()?.to_string())
}

#[cfg(test)]
mod test {
    use expect_test::expect;

    use super::*;

    #[test]
    fn payload_serialization() {
        let expect = expect![[
            r#"{"messages":[{"content":"a lighthouse at dawn","role":"user"}],"modalities":["image"],"model":"sourceful/riverflow-v2-pro"}"#
        ]];
        expect.assert_eq(
            &serde_json::to_string(&request_payload(Model::Riverflow2Pro, "a lighthouse at dawn"))
                .unwrap(),
        );
    }

    #[test]
    fn extracts_first_image_url() {
        let response: CompletionResponse = serde_json::from_str(
            r#"{
                "choices": [
                    {
                        "message": {
                            "role": "assistant",
                            "content": "",
                            "images": [
                                {"type": "image_url", "image_url": {"url": "data:image/png;base64,AAEC"}},
                                {"type": "image_url", "image_url": {"url": "data:image/png;base64,BBBB"}}
                            ]
                        }
                    }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(
            first_image_url(&response),
            Some("data:image/png;base64,AAEC")
        );
    }

    #[test]
    fn response_without_images() {
        let response: CompletionResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"role": "assistant", "content": "no can do"}}]}"#,
        )
        .unwrap();
        assert_eq!(first_image_url(&response), None);
    }

    #[test]
    fn response_without_choices() {
        let response: CompletionResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(first_image_url(&response), None);
    }

    #[test]
    fn error_message_extraction() {
        let body = r#"{"error": {"code": 429, "message": "Rate limited"}}"#;
        assert_eq!(error_message(body).as_deref(), Some("Rate limited"));
        assert_eq!(error_message("not json"), None);
        assert_eq!(error_message(r#"{"error": "flat"}"#), None);
    }
}
