use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(author, version, about = "Terminal client for a hosted GraphQL todo list", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Amplify configuration file (defaults to ./amplifyconfiguration.json, then ~/.todos/)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// GraphQL endpoint, overriding aws_appsync_graphqlEndpoint
    #[arg(long, global = true, env = "TODOS_ENDPOINT")]
    pub endpoint: Option<String>,

    /// API key, overriding aws_appsync_apiKey
    #[arg(long, global = true, env = "TODOS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Token for AMAZON_COGNITO_USER_POOLS / OPENID_CONNECT authentication
    #[arg(long, global = true, env = "TODOS_ID_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Name shown in the greeting
    #[arg(short, long, global = true, env = "TODOS_USER")]
    pub user: Option<String>,

    /// Log file (defaults to ~/.todos/todos.log)
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log filter directive, e.g. "debug" or "todo_tui=trace"
    #[arg(long, global = true, env = "TODOS_LOG", default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch TUI interface
    Tui,
    /// Print all todos
    List,
    /// Create a todo
    Create {
        #[arg(value_name = "NAME")]
        name: String,
        #[arg(value_name = "DESCRIPTION")]
        description: String,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
