//! Report whether the OpenAI API key is visible to the server after env
//! file loading.

use std::path::PathBuf;

use clap::Parser;
use study_assistant::config::{key_hint, ENV_FILES};

#[derive(Parser, Debug)]
#[command(name = "check-env", about = "Check that OPENAI_API_KEY is configured")]
struct Args {
    /// Env file to load instead of the default `api.env` / `.env`
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Print the full key instead of its last four characters
    #[arg(long)]
    reveal: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    match &args.env_file {
        Some(path) => {
            dotenvy::from_path(path)
                .map_err(|e| anyhow::anyhow!("Failed to load {}: {}", path.display(), e))?;
            println!("Loaded {}", path.display());
        }
        None => {
            for file in ENV_FILES {
                if dotenvy::from_filename(file).is_ok() {
                    println!("Loaded {}", file);
                }
            }
        }
    }

    match std::env::var("OPENAI_API_KEY").ok().filter(|key| !key.trim().is_empty()) {
        Some(key) if args.reveal => println!("OPENAI_API_KEY: {}", key),
        Some(key) => println!("OPENAI_API_KEY: {}", key_hint(&key)),
        None => {
            println!("OPENAI_API_KEY: not set");
            std::process::exit(1);
        }
    }

    Ok(())
}
