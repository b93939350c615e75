use derive_more::{From, TryInto};
use engine::generator::{GenerateError, GeneratedImage};

#[derive(Debug, Clone, From, TryInto)]
pub enum Message {
    Ui(UiMessage),
    Context(ContextMessage),
}

#[derive(Debug, Clone, From, TryInto)]
pub enum UiMessage {
    Studio(ui_messages::Studio),
    Options(ui_messages::Options),
    MessageDialog(ui_messages::MessageDialog),
}

/// Completions of background work; handled by the context, independent of
/// which state is currently shown
#[derive(Debug, Clone)]
pub enum ContextMessage {
    GenerationFinished {
        token: u64,
        result: Result<GeneratedImage, GenerateError>,
    },
}

pub mod ui_messages {
    use engine::generator::{Backend, Model};
    use iced::widget::text_editor;

    #[derive(Debug, Clone)]
    pub enum Studio {
        UpdatePromptText(text_editor::Action),
        ExamplePressed(&'static str),
        Submit,
        DownloadPressed,
        OpenOptions,
    }

    #[derive(Debug, Clone)]
    pub enum Options {
        ApiTokenChanged(String),
        GatewayUrlChanged(String),
        SelectBackend(Backend),
        SelectModel(Model),
        Ok,
    }

    #[derive(Debug, Clone)]
    pub enum MessageDialog {
        Confirm,
        EditAction(text_editor::Action),
    }
}
