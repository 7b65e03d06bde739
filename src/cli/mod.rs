pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

use crate::client::ApiClient;

#[derive(Parser)]
#[command(name = "jobadmin")]
#[command(about = "Admin CLI for the job-listing board")]
#[command(version)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        default_value = "http://127.0.0.1:3000",
        help = "Base URL of the admin API"
    )]
    pub server: String,

    #[arg(long, global = true, help = "Session token (see `jobadmin login`)")]
    pub token: Option<String>,

    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Obtain a session token for the admin area")]
    Login {
        #[arg(long, default_value = "staff")]
        user: String,
        #[arg(long)]
        password: String,
    },

    #[command(about = "Job posting management")]
    Jobs {
        #[command(subcommand)]
        cmd: commands::jobs::JobsCommands,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    // --token wins; the environment is the fallback for scripted use.
    let token = cli
        .token
        .clone()
        .or_else(|| std::env::var("JOBBOARD_TOKEN").ok());

    let mut client = ApiClient::new(cli.server.clone());
    if let Some(token) = token {
        client = client.with_token(token);
    }

    match cli.command {
        Commands::Login { user, password } => {
            commands::login::handle(&client, &user, &password, output_format).await
        }
        Commands::Jobs { cmd } => commands::jobs::handle(&client, cmd, output_format).await,
    }
}
