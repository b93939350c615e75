use clap::Parser;
use color_eyre::Result;
use prompt_studio::{Gui, cli::Cli, load_config};

pub fn main() -> Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();
    let mut cfg = load_config()?;
    if let Some(token) = cli.open_router_token {
        cfg.get_or_insert_default().open_router_token = token;
    }
    iced::application(move || Gui::new(cfg.clone()), Gui::update, Gui::view).run()?;
    Ok(())
}
