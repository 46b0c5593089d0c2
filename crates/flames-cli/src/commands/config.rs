use clap::Subcommand;
use flames_core::{load_documents, AssetSource};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Dot-separated document key (e.g. "names.gfName", "sample.cute")
        key: String,
    },
    /// Print the whole configuration, defaults filled in
    Show,
}

pub async fn run(
    action: ConfigAction,
    source: AssetSource,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_documents(&source).await?.config;
    match action {
        ConfigAction::Get { key } => match config.get(&key) {
            Some(value) => println!("{value}"),
            None => {
                eprintln!("unknown key: {key}");
                std::process::exit(1);
            }
        },
        ConfigAction::Show => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }
    Ok(())
}
