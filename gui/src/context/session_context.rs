use color_eyre::Result;
use derive_more::{From, TryInto};
use engine::generator::{GenerateError, GeneratedImage};
use iced::{Task, advanced::image::Handle as ImgHandle};
use log::{debug, error};

use crate::{
    message::{ContextMessage, Message},
    notice::{Notice, fallback_message},
};

/// The generation session: one token per user intent, and the single phase
/// value every view renders from
#[derive(Debug, Default)]
pub struct SessionContext {
    pub phase: Phase,
    token: u64,
}

#[derive(Debug, Default, Clone, From, TryInto)]
pub enum Phase {
    #[default]
    Idle,
    Loading(Loading),
    Resolved(Resolved),
}

#[derive(Debug, Clone)]
pub struct Loading {
    pub token: u64,
}

#[derive(Debug, Clone, From, TryInto)]
pub enum Resolved {
    Success(StoredImage),
    Failure(Failure),
}

#[derive(Debug, Clone)]
pub struct StoredImage {
    pub handle: ImgHandle,
    pub data: Vec<u8>,
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct Failure {
    pub text: String,
}

impl SessionContext {
    /// Starts a new generation attempt, superseding any in-flight one
    pub fn begin(&mut self) -> u64 {
        self.token += 1;
        self.phase = Loading { token: self.token }.into();
        self.token
    }

    pub fn reject_empty(&mut self) {
        self.phase = Resolved::from(Failure {
            text: fallback_message(Notice::EmptyPrompt).into(),
        })
        .into();
    }

    pub fn update(&mut self, message: ContextMessage) -> Result<Task<Message>> {
        use ContextMessage::*;
        match message {
            GenerationFinished { token, result } => {
                self.apply(token, result);
                Ok(Task::none())
            }
        }
    }

    fn apply(&mut self, token: u64, result: Result<GeneratedImage, GenerateError>) {
        if token != self.token {
            debug!("Discarding result of superseded generation {token}");
            return;
        }

        let resolved = match result {
            Ok(image) => Resolved::from(StoredImage {
                handle: ImgHandle::from_bytes(image.data.clone()),
                data: image.data,
                url: image.url,
            }),
            Err(GenerateError::Service { message }) => Resolved::from(Failure {
                text: message
                    .unwrap_or_else(|| fallback_message(Notice::ServiceFailure).into()),
            }),
            Err(GenerateError::Transport(detail)) => {
                error!("Image generation transport failure: {detail}");
                Resolved::from(Failure {
                    text: fallback_message(Notice::TransportFailure).into(),
                })
            }
        };
        self.phase = resolved.into();
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading(_))
    }

    pub fn image(&self) -> Option<&StoredImage> {
        match &self.phase {
            Phase::Resolved(Resolved::Success(image)) => Some(image),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn sample_image() -> GeneratedImage {
        GeneratedImage {
            data: vec![1u8, 2, 3],
            url: "https://img.example/x.png".into(),
        }
    }

    fn failure_text(session: &SessionContext) -> &str {
        match &session.phase {
            Phase::Resolved(Resolved::Failure(f)) => &f.text,
            other => panic!("expected failure phase, got {other:?}"),
        }
    }

    #[test]
    fn begin_enters_loading() {
        let mut session = SessionContext::default();
        session.begin();
        assert!(session.is_loading());
        assert!(session.image().is_none());
    }

    #[test]
    fn success_result_stores_the_image() {
        let mut session = SessionContext::default();
        let token = session.begin();
        session.apply(token, Ok(sample_image()));

        assert!(!session.is_loading());
        let image = session.image().unwrap();
        assert_eq!(image.data, vec![1u8, 2, 3]);
        assert_eq!(image.url, "https://img.example/x.png");
    }

    #[test]
    fn service_failure_uses_the_service_message() {
        let mut session = SessionContext::default();
        let token = session.begin();
        session.apply(token, Err(GenerateError::service("bad input")));

        assert!(!session.is_loading());
        assert_eq!(failure_text(&session), "bad input");
    }

    #[test]
    fn service_failure_without_message_falls_back() {
        let mut session = SessionContext::default();
        let token = session.begin();
        session.apply(token, Err(GenerateError::Service { message: None }));

        assert_eq!(failure_text(&session), "Failed to generate image");
    }

    #[test]
    fn transport_failure_uses_the_generic_message() {
        let mut session = SessionContext::default();
        let token = session.begin();
        session.apply(token, Err(GenerateError::Transport("conn refused".into())));

        assert_eq!(
            failure_text(&session),
            "An error occurred while generating the image"
        );
    }

    #[test]
    fn stale_results_are_discarded() {
        let mut session = SessionContext::default();
        let first = session.begin();
        let second = session.begin();

        session.apply(first, Ok(sample_image()));
        assert!(session.is_loading(), "stale result must not resolve");

        session.apply(second, Err(GenerateError::service("late failure")));
        assert_eq!(failure_text(&session), "late failure");
    }

    #[test]
    fn resubmit_clears_a_previous_result() {
        let mut session = SessionContext::default();
        let token = session.begin();
        session.apply(token, Ok(sample_image()));

        session.begin();
        assert!(session.is_loading());
        assert!(session.image().is_none());
    }

    #[test]
    fn empty_prompt_shows_the_validation_notice() {
        let mut session = SessionContext::default();
        session.reject_empty();
        assert_eq!(failure_text(&session), "Please enter a prompt");
    }
}
