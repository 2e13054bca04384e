mod cli;
mod commands;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use compose_control::Error as ComposeError;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        if let Some(compose_error) = e.downcast_ref::<ComposeError>() {
            eprintln!("Error: {}", compose_error);
            if let Some(suggestion) = compose_error.suggestion() {
                eprintln!("\nHint: {}", suggestion);
            }
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing()?;

    let out = output::CliOutput;
    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let bin_name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
            Ok(())
        }
        Commands::Validate => commands::run_validate(&cli.manifest, &out),
        Commands::Decode {
            input,
            strict,
            json,
            latest,
        } => {
            let project = commands::load_project(&cli.manifest)?;
            let options = commands::DecodeOptions {
                strict,
                json,
                latest,
            };
            commands::run_decode(&project, input, options, &out).await
        }
        Commands::Profiles {
            enable_all,
            disable,
            json,
        } => {
            let project = commands::load_project(&cli.manifest)?;
            commands::run_profiles(&project, enable_all, &disable, json, &out)
        }
        Commands::Reverse { select, json } => {
            let project = commands::load_project(&cli.manifest)?;
            commands::run_reverse(&project, &select, json, &out)
        }
        Commands::Images { new, json } => {
            let project = commands::load_project(&cli.manifest)?;
            commands::run_images(&project, &new, &cli.manifest, json, &out)
        }
    }
}

fn init_tracing() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays parseable for --json.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}
