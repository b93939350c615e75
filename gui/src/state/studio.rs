use color_eyre::Result;
use engine::save;
use iced::{
    Color, Element, Length, Task,
    alignment::Vertical,
    keyboard::{self, key},
    widget::{self, Button, Column, Container, button, container, row, space, text, text_editor},
};

use crate::{
    APP_NAME, ElemHelper, TryIntoExt, elem_list, italic_text,
    context::{
        Context,
        session_context::{Phase, Resolved},
    },
    message::{ContextMessage, UiMessage, ui_messages::Studio as MyMessage},
    state::{Modal, Options, State, StateCommand, cmd},
};

const EXAMPLE_PROMPTS: [&str; 3] = [
    "A serene Japanese garden with cherry blossoms",
    "A futuristic city skyline at sunset",
    "An astronaut riding a horse on Mars",
];

#[derive(Debug, Clone)]
pub struct Studio {
    prompt_content: text_editor::Content,
}

impl Studio {
    pub fn new() -> Self {
        Self {
            prompt_content: text_editor::Content::default(),
        }
    }
}

impl State for Studio {
    fn update(&mut self, message: UiMessage, ctx: &mut Context) -> Result<StateCommand> {
        use MyMessage::*;
        match message.try_into_ex()? {
            UpdatePromptText(action) => {
                self.prompt_content.perform(action);
                cmd::none()
            }
            ExamplePressed(example) => {
                self.prompt_content = text_editor::Content::with_text(example);
                cmd::none()
            }
            Submit => {
                let raw = self.prompt_content.text();
                let Some(prompt) = normalized_prompt(&raw) else {
                    ctx.session.reject_empty();
                    return cmd::none();
                };
                let prompt = prompt.to_owned();
                let token = ctx.session.begin();
                let generator = ctx.config.make_generator();
                cmd::task(Task::perform(
                    async move { generator.generate(&prompt).await },
                    move |result| ContextMessage::GenerationFinished { token, result }.into(),
                ))
            }
            DownloadPressed => {
                if let Some(image) = ctx.session.image() {
                    let path = save::save_to_downloads(&image.data)?;
                    cmd::transition(Modal::message(
                        State::clone(self),
                        "Image Saved",
                        path.display().to_string(),
                    ))
                } else {
                    cmd::none()
                }
            }
            OpenOptions => cmd::transition(Options),
        }
    }

    fn view<'a>(&'a self, ctx: &'a Context) -> Element<'a, UiMessage> {
        let editor = widget::text_editor(&self.prompt_content)
            .placeholder("Describe the image you want to create")
            .on_action(|a| MyMessage::UpdatePromptText(a).into())
            .key_binding(|key_press| match key_press.key.as_ref() {
                keyboard::Key::Named(key::Named::Enter) if !key_press.modifiers.shift() => Some(
                    text_editor::Binding::Custom(MyMessage::Submit.into()),
                ),
                _ => text_editor::Binding::from_key_press(key_press),
            });

        let mut main_col: Vec<Element<'a, UiMessage>> = Vec::from(elem_list![
            mk_header(),
            widget::rule::horizontal(2),
            space().height(10),
            editor,
            mk_example_buttons(),
            row![
                space::horizontal(),
                mk_generate_button(ctx.session.is_loading())
            ],
        ]);

        match &ctx.session.phase {
            Phase::Idle => {}
            Phase::Loading(_) => {
                main_col.push(row![italic_text("Generating image..."), space::horizontal()].into());
            }
            Phase::Resolved(Resolved::Success(image)) => {
                main_col.extend(elem_list![
                    container(widget::image(&image.handle).width(Length::Fill)).max_width(832),
                    row![
                        space::horizontal(),
                        button("Download").on_press(MyMessage::DownloadPressed.into())
                    ],
                ]);
            }
            Phase::Resolved(Resolved::Failure(failure)) => {
                main_col.push(
                    container(text(&failure.text))
                        .padding(10)
                        .width(Length::Fill)
                        .style(|_theme| container::background(Color::from_rgb(0.98, 0.9, 0.9)))
                        .into(),
                );
            }
        }

        crate::top_level_container(widget::column(main_col).spacing(15)).into()
    }

    fn clone(&self) -> Box<dyn State> {
        Box::new(Clone::clone(self))
    }
}

fn normalized_prompt(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn mk_header() -> Container<'static, UiMessage> {
    container(
        row![
            row![space::horizontal()].width(Length::FillPortion(1)),
            widget::text(APP_NAME).size(32),
            row![
                space::horizontal(),
                button("⚙").on_press(MyMessage::OpenOptions.into())
            ]
            .align_y(Vertical::Center)
            .width(Length::FillPortion(1)),
        ]
        .align_y(Vertical::Center),
    )
    .padding(10)
}

fn mk_example_buttons() -> Column<'static, UiMessage> {
    widget::column![
        row![text("Try an example:").size(14), space::horizontal()],
        row(EXAMPLE_PROMPTS.iter().map(|p| {
            button(text(*p).size(13))
                .on_press(MyMessage::ExamplePressed(*p).into())
                .into_elem()
        }))
        .spacing(10),
    ]
    .spacing(5)
}

fn mk_generate_button<'a>(loading: bool) -> Button<'a, UiMessage> {
    let mut btn = button(if loading { "Generating..." } else { "Generate" });
    if !loading {
        btn = btn.on_press(MyMessage::Submit.into());
    }
    btn
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn blank_prompts_are_rejected() {
        assert_eq!(normalized_prompt(""), None);
        assert_eq!(normalized_prompt("   \n\t  "), None);
    }

    #[test]
    fn prompts_are_trimmed() {
        assert_eq!(normalized_prompt("  a red fox \n"), Some("a red fox"));
    }
}
