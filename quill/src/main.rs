use std::process::ExitCode;

use clap::{Parser, Subcommand};
use quill_core::{QuillConfig, Settings};

#[derive(Parser)]
#[command(name = "quill", version, about = "A small server-rendered blog")]
struct Cli {
    /// Configuration profile: loads `application-{profile}.yaml` and
    /// `.env.{profile}`. `QUILL_PROFILE` takes precedence.
    #[arg(long, short, global = true, default_value = "dev")]
    profile: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the web server (default).
    Serve,
    /// Apply database migrations and exit.
    Migrate,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = QuillConfig::load(&cli.profile)
        .and_then(|config| Settings::from_config(&config).map(|settings| (config, settings)));
    let (config, settings) = match loaded {
        Ok(loaded) => loaded,
        Err(err) => {
            eprintln!("quill: {err}");
            return ExitCode::FAILURE;
        }
    };
    quill_core::init_tracing(settings.logging.json);
    tracing::info!(profile = config.profile(), "configuration loaded");

    let result = match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => quill::run(settings).await,
        Command::Migrate => match quill::prepare_database(&settings).await {
            Ok(pool) => {
                pool.close().await;
                Ok(())
            }
            Err(err) => Err(err),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "quill failed");
            ExitCode::FAILURE
        }
    }
}
