use std::{future::Future, pin::Pin, time::Duration};

use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::generator::{GenerateError, GeneratedImage, ImageGenerator, fetch_image_bytes};

/// Client for a generation gateway speaking the `/generate-image` protocol:
/// `{"prompt": ...}` in, `{"success": ..., "image_url": ..., "error": ...}`
/// out.
#[derive(Clone)]
pub struct Gateway {
    base_url: String,
    client: Client,
}

impl Gateway {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/generate-image", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Serialize)]
pub struct GenerateRequest<'a> {
    pub prompt: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ImageGenerator for Gateway {
    fn generate<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<GeneratedImage, GenerateError>> + Send + 'a>> {
        Box::pin(async move {
            let resp = self
                .client
                .post(self.endpoint())
                .timeout(Duration::from_secs(60 * 3))
                .json(&GenerateRequest { prompt })
                .send()
                .await?;

            // The gateway pairs failure bodies with non-2xx statuses; the
            // body is authoritative either way.
            let status = resp.status();
            let text = resp.text().await?;
            debug!("generate-image response ({status}): {text}");

            let response: GenerateResponse = serde_json::from_str(&text).map_err(|_| {
                GenerateError::Transport(format!("unreadable response ({status}): {text}"))
            })?;

            let image_url = interpret(response)?;
            let data = fetch_image_bytes(&self.client, &image_url).await?;
            Ok(GeneratedImage {
                data,
                url: image_url,
            })
        })
    }
}

/// Success requires both the flag and the image location; everything else is
/// a service failure carrying whatever message the gateway provided.
fn interpret(response: GenerateResponse) -> Result<String, GenerateError> {
    match (response.success, response.image_url) {
        (true, Some(url)) => Ok(url),
        _ => Err(GenerateError::Service {
            message: response.error,
        }),
    }
}

#[cfg(test)]
mod test {
    use expect_test::expect;

    use super::*;

    #[test]
    fn request_serialization() {
        let req = GenerateRequest {
            prompt: "a red fox in the snow",
        };
        let expect = expect![[r#"{"prompt":"a red fox in the snow"}"#]];
        expect.assert_eq(&serde_json::to_string(&req).unwrap());
    }

    #[test]
    fn success_response_yields_url() {
        let resp: GenerateResponse =
            serde_json::from_str(r#"{"success": true, "image_url": "https://img.example/x.png"}"#)
                .unwrap();
        assert_eq!(interpret(resp).unwrap(), "https://img.example/x.png");
    }

    #[test]
    fn failure_response_carries_service_message() {
        let resp: GenerateResponse =
            serde_json::from_str(r#"{"success": false, "error": "bad input"}"#).unwrap();
        match interpret(resp).unwrap_err() {
            GenerateError::Service { message } => assert_eq!(message.as_deref(), Some("bad input")),
            other => panic!("expected service error, got {other:?}"),
        }
    }

    #[test]
    fn failure_without_message() {
        let resp: GenerateResponse = serde_json::from_str(r#"{"success": false}"#).unwrap();
        match interpret(resp).unwrap_err() {
            GenerateError::Service { message } => assert_eq!(message, None),
            other => panic!("expected service error, got {other:?}"),
        }
    }

    #[test]
    fn success_flag_without_url_is_a_failure() {
        let resp: GenerateResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(matches!(
            interpret(resp),
            Err(GenerateError::Service { message: None })
        ));
    }
}
