//! Wardrobe command line client.
//!
//! Thin front end over the session layer: log in, call endpoints, fetch
//! images and follow the live message feed.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use futures::StreamExt;
use serde_json::Value;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use wardrobe::{Client, connect};
use wardrobe_application::SessionError;
use wardrobe_domain::{Credentials, ImageSource, RequestDescriptor};
use wardrobe_infrastructure::ClientConfig;

#[derive(Parser)]
#[command(
    name = "wardrobe",
    about = "Command line client for the Wardrobe media library",
    version
)]
struct Cli {
    /// Config file (defaults to ./wardrobe.toml when present)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in and store the issued tokens
    Login {
        /// Account name
        #[arg(long, short = 'u')]
        username: String,

        /// Account password
        #[arg(long, short = 'p')]
        password: String,
    },

    /// Forget the stored tokens
    Logout,

    /// Check whether the stored access token is still accepted
    Status,

    /// Send an authenticated GET and print the JSON reply
    Get {
        /// Endpoint path, e.g. /api/statistics/
        endpoint: String,
    },

    /// Send an authenticated POST with a JSON body and print the reply
    Post {
        /// Endpoint path, e.g. /api/search/
        endpoint: String,

        /// JSON body
        #[arg(default_value = "{}")]
        body: String,
    },

    /// Download an image with the session token
    Image {
        /// Image URL or path
        url: String,

        /// Output file
        output: PathBuf,
    },

    /// Follow the live message feed
    Messages,

    /// List server backups with their download links
    Backups,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::load(cli.config.as_deref())?;
    tracing::debug!(base_url = %config.base_url, "Configuration loaded");

    let client = connect(&config)?;

    if let Err(e) = run(&client, cli.command).await {
        if let Some(session_error) = e.downcast_ref::<SessionError>()
            && session_error.requires_login()
        {
            eprintln!("{session_error}: run `wardrobe login` first");
            std::process::exit(2);
        }
        return Err(e);
    }
    Ok(())
}

async fn run(client: &Client, command: Command) -> Result<(), Box<dyn std::error::Error>> {
    let session = client.session();

    match command {
        Command::Login { username, password } => {
            session
                .login(&Credentials::new(username, password))
                .await?;
            println!("Logged in");
        }
        Command::Logout => {
            session.logout().await?;
            println!("Logged out");
        }
        Command::Status => {
            if session.check_current_token().await? {
                println!("Session active");
            } else {
                println!("Access token rejected; it will be refreshed on the next request");
            }
        }
        Command::Get { endpoint } => {
            let reply = session.request(&RequestDescriptor::get(endpoint)).await?;
            print_json(&reply)?;
        }
        Command::Post { endpoint, body } => {
            let payload: Value = serde_json::from_str(&body)?;
            let reply = session
                .request(&RequestDescriptor::post_json(endpoint, payload))
                .await?;
            print_json(&reply)?;
        }
        Command::Image { url, output } => match session.fetch_blob(&url).await {
            ImageSource::Object(object) => {
                let blob = session.blobs().get(&object).await;
                session.revoke_blob(&object).await;
                let blob = blob.ok_or("image released before it was saved")?;
                tokio::fs::write(&output, &blob.bytes).await?;
                println!("Saved {} bytes to {}", blob.len(), output.display());
            }
            ImageSource::Fallback(_) => {
                return Err(format!("could not load image {url}").into());
            }
        },
        Command::Messages => {
            let mut feed = client.message_stream().await?;
            while let Some(message) = feed.next().await {
                match message {
                    Ok(message) => println!("[{}] {}", message.level, message.text),
                    Err(e) => tracing::warn!(error = %e, "Skipping message"),
                }
            }
            println!("Message feed closed");
        }
        Command::Backups => {
            for backup in client.list_backups().await? {
                let link = client.backup_download_url(&backup.timestamp).await?;
                println!("{}  {}  {link}", backup.timestamp, backup.comment);
            }
        }
    }

    Ok(())
}

fn print_json(value: &Value) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
