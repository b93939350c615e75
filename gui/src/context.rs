use color_eyre::Result;
use engine::{
    GeneratorBox,
    generator::{Backend, Gateway, Model},
};
use iced::Task;
use serde::{Deserialize, Serialize};

use crate::message::{ContextMessage, Message};

pub mod session_context;

pub struct Context {
    pub session: session_context::SessionContext,
    pub config: Config,
}

impl Context {
    pub fn from_config(config: Config) -> Self {
        Self {
            session: session_context::SessionContext::default(),
            config,
        }
    }

    pub fn update(&mut self, message: ContextMessage) -> Result<Task<Message>> {
        self.session.update(message)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub backend: Backend,
    pub open_router_token: String,
    pub gateway_url: String,
    pub model: Model,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            open_router_token: String::new(),
            gateway_url: "http://localhost:5000".into(),
            model: Model::default(),
        }
    }
}

impl Config {
    pub fn make_generator(&self) -> GeneratorBox {
        match self.backend {
            Backend::OpenRouter => self.model.make(self.open_router_token.clone()),
            Backend::Gateway => Box::new(Gateway::new(self.gateway_url.clone())),
        }
    }
}
