//! skillpath CLI application
//!
//! Command-line front end for the skillpath learning platform.

mod args;
mod cli;
mod handlers;
mod renderer;

use std::process::ExitCode;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use handlers::{Cli, Reported};
use log::info;
use renderer::TerminalRenderer;
use skillpath_core::{ClientBuilder, ClientError, Scope};
use Commands::*;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", describe(&err));
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let Args {
        api_url,
        store_file,
        no_color,
        command,
    } = args;

    let client = ClientBuilder::new()
        .with_base_url(api_url)
        .with_store_path(store_file)
        .build()
        .await
        .context("Failed to initialize client")?;

    let cli = Cli::new(client, TerminalRenderer::new(!no_color));

    info!("skillpath started");

    // Ctrl-C cancels the parent; the in-flight command resolves to
    // `ClientError::Cancelled` instead of printing a half-applied result.
    let interrupt = Scope::new();
    let scope = interrupt.child();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            interrupt.cancel();
        }
    });

    scope.run(async { Ok(dispatch(&cli, command).await) }).await?
}

async fn dispatch(cli: &Cli, command: Option<Commands>) -> Result<()> {
    match command {
        Some(Login(args)) => cli.login(args).await,
        Some(Logout) => cli.logout().await,
        Some(Whoami) => cli.whoami().await,
        Some(Plan { command }) => cli.handle_plan_command(command).await,
        Some(Ai { command }) => cli.handle_ai_command(command).await,
        Some(Course { command }) => cli.handle_course_command(command).await,
        Some(Post { command }) => cli.handle_post_command(command).await,
        Some(Saved { command }) => cli.handle_saved_command(command).await,
        Some(User { command }) => cli.handle_user_command(command).await,
        None => cli.list_plans().await,
    }
}

/// The message shown for a failed command.
fn describe(err: &anyhow::Error) -> String {
    if let Some(reported) = err.downcast_ref::<Reported>() {
        return reported.to_string();
    }
    match err.downcast_ref::<ClientError>() {
        Some(client_error) => client_error.user_message(),
        None => format!("Error: {err:#}"),
    }
}
