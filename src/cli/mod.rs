pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "comments-api")]
#[command(about = "Comments REST API server and token tool")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Port to listen on (overrides COMMENTS_API_PORT)")]
        port: Option<u16>,
    },

    #[command(about = "Sign a bearer token with SECURITY_JWT_SECRET")]
    Token {
        #[arg(long, default_value = "admin", help = "Value of the sub claim")]
        subject: String,
        #[arg(long, help = "Token lifetime in hours (defaults to SECURITY_JWT_EXPIRY_HOURS)")]
        ttl_hours: Option<u64>,
    },
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Serve { port } => commands::serve::handle(port).await,
        Commands::Token { subject, ttl_hours } => commands::token::handle(subject, ttl_hours),
    }
}
