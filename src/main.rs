//! ProjectHub dev server
//!
//! Main application entry point

use clap::{Parser, Subcommand};
use tracing::info;

use projecthub::{
    config::Settings,
    utils::logging,
    DevServer, ServeMode,
};

#[derive(Parser, Debug)]
#[command(name = "projecthub", version, about = "ProjectHub development server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the frontend and proxy API calls to the backend
    Serve {
        /// Override the configured dev port
        #[arg(long, env = "PORT")]
        port: Option<u16>,
    },
    /// Serve the built frontend on the preview port
    Preview {
        /// Override the configured preview port
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // Load configuration
    let mut settings = Settings::new()?;

    let mode = match cli.command.unwrap_or(Command::Serve { port: None }) {
        Command::Serve { port } => {
            if let Some(port) = port {
                settings.dev_server.port = port;
            }
            ServeMode::Dev
        }
        Command::Preview { port } => {
            if let Some(port) = port {
                settings.dev_server.preview_port = port;
            }
            ServeMode::Preview
        }
    };

    settings.validate()?;

    // Initialize logging
    let _guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", projecthub::info());

    let server = DevServer::new(settings.dev_server.clone(), mode)?;
    server.run().await?;

    info!("ProjectHub dev server has been shut down.");

    Ok(())
}
