//! Storyboard CLI binary.
//!
//! Terminal host for the studio:
//! - Analyze a script into scenes
//! - Render storyboard panels to image files
//! - Chat with the creative assistant

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{
        Cli, Commands, analyze_command, chat_command, generate_command, open_studio,
        styles_command,
    };

    let cli = Cli::parse();

    #[cfg(feature = "observability")]
    let provider = storyboard::observability::init_observability_with_config(
        storyboard::observability::ObservabilityConfig::new("storyboard")
            .with_log_level(storyboard::telemetry::default_filter(cli.verbose)),
    )?;
    #[cfg(not(feature = "observability"))]
    storyboard::telemetry::init_console_telemetry(cli.verbose)?;

    let config = cli.config.as_deref();
    match cli.command {
        Commands::Analyze { script, json } => {
            let studio = open_studio(config).await?;
            analyze_command(&studio, &script, json).await?;
        }

        Commands::Generate {
            script,
            out,
            resolution,
            style,
            scene,
        } => {
            let studio = open_studio(config).await?;
            generate_command(&studio, &script, &out, resolution, style, scene).await?;
        }

        Commands::Chat => {
            let studio = open_studio(config).await?;
            chat_command(&studio).await?;
        }

        Commands::Styles => styles_command(),
    }

    #[cfg(feature = "observability")]
    provider.shutdown()?;

    Ok(())
}
