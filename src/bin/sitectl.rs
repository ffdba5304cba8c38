//! Operator CLI for the maintenance flag.
//!
//! `status` reads the flag without authentication; `on` and `off` log in
//! with the admin secret and write through the settings API, printing the
//! value the server actually persisted.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;

#[derive(Parser)]
#[command(name = "sitectl", about = "Control sitegate maintenance mode")]
struct Cli {
    /// Base URL of the running sitegate server
    #[arg(long, default_value = "http://localhost:3000")]
    url: String,

    /// Admin secret; falls back to the ADMIN_SECRET environment variable
    #[arg(long)]
    secret: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the current maintenance flag
    Status,
    /// Turn maintenance mode on
    On,
    /// Turn maintenance mode off
    Off,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    let secret = cli.secret.or_else(|| std::env::var("ADMIN_SECRET").ok());
    let client = reqwest::Client::new();

    match cli.command {
        Command::Status => {
            let settings = fetch_settings(&client, &cli.url).await?;
            print_flag(&settings);
        }
        Command::On => {
            let settings = set_flag(&client, &cli.url, secret.as_deref(), true).await?;
            print_flag(&settings);
        }
        Command::Off => {
            let settings = set_flag(&client, &cli.url, secret.as_deref(), false).await?;
            print_flag(&settings);
        }
    }

    Ok(())
}

async fn fetch_settings(client: &reqwest::Client, base_url: &str) -> Result<serde_json::Value> {
    let res = client
        .get(format!("{}/api/settings", base_url))
        .send()
        .await
        .context("failed to reach the settings API")?;

    if !res.status().is_success() {
        bail!("settings read failed with status {}", res.status());
    }

    res.json().await.context("settings response was not valid JSON")
}

async fn set_flag(
    client: &reqwest::Client,
    base_url: &str,
    secret: Option<&str>,
    maintenance_mode: bool,
) -> Result<serde_json::Value> {
    let Some(secret) = secret else {
        bail!("an admin secret is required; pass --secret or set ADMIN_SECRET");
    };

    let token = login(client, base_url, secret).await?;

    let res = client
        .post(format!("{}/api/settings", base_url))
        .bearer_auth(&token)
        .json(&json!({ "maintenanceMode": maintenance_mode }))
        .send()
        .await
        .context("failed to reach the settings API")?;

    let status = res.status();
    let body: serde_json::Value = res.json().await.unwrap_or_default();

    if !status.is_success() {
        let message = body["error"].as_str().unwrap_or("unknown error");
        bail!("toggle failed ({}): {}", status, message);
    }

    // Best effort: single-use token, drop the session afterwards
    let _ = client
        .delete(format!("{}/api/auth/session", base_url))
        .bearer_auth(&token)
        .send()
        .await;

    Ok(body)
}

async fn login(client: &reqwest::Client, base_url: &str, secret: &str) -> Result<String> {
    let res = client
        .post(format!("{}/api/auth/login", base_url))
        .json(&json!({ "secret": secret }))
        .send()
        .await
        .context("failed to reach the login endpoint")?;

    if res.status() == reqwest::StatusCode::UNAUTHORIZED {
        bail!("login rejected: invalid admin secret");
    }
    if !res.status().is_success() {
        bail!("login failed with status {}", res.status());
    }

    let body: serde_json::Value = res.json().await.context("login response was not valid JSON")?;
    body["token"]
        .as_str()
        .map(str::to_string)
        .context("login response did not contain a token")
}

fn print_flag(settings: &serde_json::Value) {
    match settings["maintenanceMode"].as_bool() {
        Some(true) => println!("maintenance mode: ON"),
        Some(false) => println!("maintenance mode: OFF"),
        None => println!("unexpected settings payload: {}", settings),
    }
}
