use std::path::PathBuf;

use thiserror::Error;

/// Failure of a single request against the GraphQL endpoint.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("graphql error: {}", .0.join("; "))]
    Graphql(Vec<String>),
    #[error("response carried no data")]
    MissingData,
}

/// The two operations the todo view can see fail.
#[derive(Debug, Error)]
pub enum TodoError {
    #[error("error fetching todos")]
    ListFetch(#[source] ApiError),
    #[error("error creating todo")]
    Create(#[source] ApiError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("no GraphQL endpoint configured (set aws_appsync_graphqlEndpoint or --endpoint)")]
    MissingEndpoint,
    #[error("API_KEY authentication selected but no API key configured")]
    MissingApiKey,
    #[error("{0} authentication selected but no token supplied (--token)")]
    MissingToken(&'static str),
    #[error("AWS_IAM authentication is not supported")]
    UnsupportedAuth,
}
