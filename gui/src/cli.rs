#[derive(Debug, clap::Parser)]
pub struct Cli {
    /// Overrides the OpenRouter API key from the config file
    #[arg(short, long)]
    pub open_router_token: Option<String>,
}
