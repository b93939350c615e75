use std::{future::Future, pin::Pin};

use reqwest::Client;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

pub mod gateway;
pub use gateway::Gateway;

pub mod open_router;
pub use open_router::OpenRouter;

mod data_url;
mod error;
pub use error::GenerateError;

use crate::GeneratorBox;

#[derive(
    Debug,
    Clone,
    Copy,
    Display,
    clap::ValueEnum,
    Serialize,
    Deserialize,
    Hash,
    PartialEq,
    Eq,
    EnumIter,
    Default,
)]
pub enum Model {
    #[default]
    #[strum(to_string = "Riverflow V2 Pro")]
    Riverflow2Pro,
    #[strum(to_string = "Gemini 2.5 Flash Image")]
    GeminiFlashImage,
}

#[derive(
    Debug,
    Clone,
    Copy,
    Display,
    clap::ValueEnum,
    Serialize,
    Deserialize,
    Hash,
    PartialEq,
    Eq,
    EnumIter,
    Default,
)]
pub enum Backend {
    #[default]
    OpenRouter,
    #[strum(to_string = "Generation Gateway")]
    Gateway,
}

impl Model {
    /// The model id OpenRouter routes on
    pub fn id(&self) -> &'static str {
        match self {
            Model::Riverflow2Pro => "sourceful/riverflow-v2-pro",
            Model::GeminiFlashImage => "google/gemini-2.5-flash-image-preview",
        }
    }

    pub fn make(&self, key: String) -> GeneratorBox {
        Box::new(OpenRouter::new(*self, key))
    }
}

/// One generated image: the fetched bytes plus the location the service
/// reported for it
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub data: Vec<u8>,
    pub url: String,
}

pub trait ImageGenerator {
    fn generate<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<GeneratedImage, GenerateError>> + Send + 'a>>;
}

/// Services either return a plain URL or inline the image as a data URL.
/// Both end up as raw bytes here.
pub(crate) async fn fetch_image_bytes(
    client: &Client,
    url: &str,
) -> Result<Vec<u8>, GenerateError> {
    if data_url::is_data_url(url) {
        data_url::decode(url).map_err(|e| GenerateError::Transport(e.to_string()))
    } else {
        Ok(client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?
            .to_vec())
    }
}
