use std::process::ExitCode;

use clap::Parser;
use dicebins_api::cli::{Cli, Command, OutputFormat, ServeArgs, run_bins};
use dicebins_api::config::DicebinsConfig;
use dicebins_api::{create_app, tracing_setup};
use dicebins_calculator::format::PASTE_INSTRUCTIONS;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = DicebinsConfig::load()?.apply_profile();
    tracing_setup::init_logging(&config.logging)?;

    let config_path = DicebinsConfig::config_path();
    if !config_path.exists() {
        warn!(
            "Configuration file '{}' not found. Using default configuration.",
            config_path.display()
        );
    }
    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.environment.env_type,
        "Starting dicebins"
    );

    match cli.command.unwrap_or(Command::Serve(ServeArgs::default())) {
        Command::Serve(args) => {
            serve(config, args).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Bins(args) => match run_bins(&args) {
            Ok(output) => {
                if args.paste && args.format == OutputFormat::Text {
                    eprintln!("Format the target spreadsheet column as Text before pasting:");
                    for (step, instruction) in PASTE_INSTRUCTIONS.iter().enumerate() {
                        eprintln!("  {}. {}", step + 1, instruction);
                    }
                }
                print!("{output}");
                Ok(ExitCode::SUCCESS)
            }
            Err(err) => {
                for notice in err.notices() {
                    eprintln!("{notice}");
                }
                Ok(ExitCode::from(2))
            }
        },
    }
}

async fn serve(mut config: DicebinsConfig, args: ServeArgs) -> anyhow::Result<()> {
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let addr = config.server.bind_address();
    info!(%addr, "Configuring web server");

    let app = create_app(config);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "Dicebins server listening");

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(%err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
