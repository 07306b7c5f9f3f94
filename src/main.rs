mod api;
mod auth;
mod cli;
mod config;
mod error;
mod input;
mod logging;
mod models;
mod ui;
mod view;

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands, GlobalArgs};
use api::{GraphqlClient, TodoApi};
use auth::ConfiguredSession;
use config::{AmplifyConfig, Overrides};
use models::CreateTodoInput;
use ui::run_tui;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "todos", &mut std::io::stdout());
        return Ok(());
    }

    let log_file = cli
        .global
        .log_file
        .clone()
        .unwrap_or_else(|| config::data_dir().join("todos.log"));
    logging::init(&log_file, &cli.global.log_level)?;

    let session = session_from(&cli.global);
    let api: Arc<dyn TodoApi> = Arc::new(client_from(&cli.global, &session)?);
    let rt = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;

    match cli.command {
        Some(Commands::List) => {
            let todos = rt.block_on(api.list_todos())?;
            if todos.is_empty() {
                println!("No todos yet.");
            }
            for todo in todos {
                println!("{} - {}", todo.name, todo.description);
            }
        }
        Some(Commands::Create { name, description }) => {
            if name.is_empty() || description.is_empty() {
                bail!("both NAME and DESCRIPTION must be non-empty");
            }
            let todo = rt.block_on(api.create_todo(CreateTodoInput { name, description }))?;
            println!(
                "Created '{}' ({})",
                todo.name,
                todo.id.as_deref().unwrap_or("no id returned")
            );
        }
        Some(Commands::Tui) | None => {
            run_tui(api, Box::new(session), rt.handle().clone())?;
        }
        Some(Commands::Completions { .. }) => {}
    }

    Ok(())
}

fn session_from(args: &GlobalArgs) -> ConfiguredSession {
    let username = args
        .user
        .clone()
        .or_else(|| std::env::var("USER").ok())
        .unwrap_or_else(|| "there".to_string());
    ConfiguredSession::new(username, args.token.clone())
}

fn client_from(args: &GlobalArgs, session: &ConfiguredSession) -> Result<GraphqlClient> {
    let overrides = Overrides {
        endpoint: args.endpoint.clone(),
        api_key: args.api_key.clone(),
        token: session.token().map(str::to_string),
    };
    let config = AmplifyConfig::discover(args.config.as_deref())?.resolve(&overrides)?;
    log::info!(
        "using endpoint {} (region {})",
        config.endpoint,
        config.region.as_deref().unwrap_or("unset")
    );
    Ok(GraphqlClient::new(config))
}
