use color_eyre::Result;
use iced::{
    Length,
    widget::{button, column, radio, row, space, text, text_input},
};
use strum::IntoEnumIterator;

use crate::{
    TryIntoExt, bold_text, elem_list,
    message::{UiMessage, ui_messages::Options as MyMessage},
    save_config,
    state::{State, StateCommand, Studio, cmd},
    top_level_container,
};
use engine::generator::{Backend, Model};

#[derive(Debug, Clone)]
pub struct Options;

impl State for Options {
    fn update(
        &mut self,
        event: UiMessage,
        ctx: &mut crate::context::Context,
    ) -> Result<StateCommand> {
        let msg: MyMessage = event.try_into_ex()?;

        use MyMessage::*;
        match msg {
            ApiTokenChanged(val) => {
                ctx.config.open_router_token = val;
                cmd::none()
            }

            GatewayUrlChanged(val) => {
                ctx.config.gateway_url = val;
                cmd::none()
            }

            SelectBackend(backend) => {
                ctx.config.backend = backend;
                cmd::none()
            }

            SelectModel(model) => {
                ctx.config.model = model;
                cmd::none()
            }

            Ok => {
                save_config(&ctx.config)?;
                cmd::transition(Studio::new())
            }
        }
    }

    fn view<'a>(&'a self, ctx: &'a crate::context::Context) -> iced::Element<'a, UiMessage> {
        let mut items = Vec::from(elem_list![
            bold_text("Options").width(Length::Fill).center(),
            space().height(20),
            text("Backend"),
            column(Backend::iter().map(|b| {
                radio(format!("{b}"), b, Some(ctx.config.backend), |b| {
                    MyMessage::SelectBackend(b).into()
                })
                .into()
            }))
            .spacing(10),
            space().height(20),
            text("OpenRouter API Key"),
            text_input("sk-or-v1-...", &ctx.config.open_router_token)
                .on_input(|s| MyMessage::ApiTokenChanged(s).into())
                .width(Length::Fill),
            space().height(20),
            text("Gateway URL"),
            text_input("http://localhost:5000", &ctx.config.gateway_url)
                .on_input(|s| MyMessage::GatewayUrlChanged(s).into())
                .width(Length::Fill),
            space().height(20),
            text("Image Model"),
            column(Model::iter().map(|m| {
                radio(format!("{m}"), m, Some(ctx.config.model), |m| {
                    MyMessage::SelectModel(m).into()
                })
                .into()
            }))
            .spacing(10),
        ]);

        items.push(space().height(30).into());
        items.push(row![button("Ok").on_press(MyMessage::Ok.into())].into());

        top_level_container(
            column(items)
                .spacing(12)
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .into()
    }

    fn clone(&self) -> Box<dyn State> {
        Box::new(Clone::clone(self))
    }
}
