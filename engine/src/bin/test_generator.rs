use std::path::Path;

use clap::Parser;
use color_eyre::Result;
use engine::{generator::Model, save};

#[derive(clap::Parser)]
struct Arg {
    model: Model,
    key: String,
    prompt: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    pretty_env_logger::init();
    let Arg { model, key, prompt } = Arg::parse();
    let generator = model.make(key);

    let image = generator.generate(&prompt).await?;
    let path = save::save_into(Path::new("."), &image.data)?;
    println!("Saved {} bytes to {}", image.data.len(), path.display());

    Ok(())
}
