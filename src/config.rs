use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

pub const CONFIG_FILE_NAME: &str = "amplifyconfiguration.json";

/// The subset of an Amplify configuration file this client reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AmplifyConfig {
    #[serde(rename = "aws_appsync_graphqlEndpoint")]
    pub endpoint: Option<String>,
    #[serde(rename = "aws_appsync_region")]
    pub region: Option<String>,
    #[serde(rename = "aws_appsync_authenticationType", default)]
    pub auth_type: AuthType,
    #[serde(rename = "aws_appsync_apiKey")]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthType {
    #[default]
    ApiKey,
    AmazonCognitoUserPools,
    OpenidConnect,
    AwsIam,
}

/// How requests are authorized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// Sent as `x-api-key`.
    ApiKey(String),
    /// Sent verbatim as `Authorization`.
    Token(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub endpoint: String,
    pub region: Option<String>,
    pub credential: Credential,
}

/// Values given on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub token: Option<String>,
}

impl AmplifyConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `explicit` if given, otherwise the first default location that exists.
    /// Having no file at all is fine as long as the overrides fill the gaps.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match default_locations().into_iter().find(|p| p.exists()) {
            Some(path) => {
                log::debug!("using config file {}", path.display());
                Self::from_file(&path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn resolve(self, overrides: &Overrides) -> Result<ClientConfig, ConfigError> {
        let endpoint = overrides
            .endpoint
            .clone()
            .or(self.endpoint)
            .filter(|e| !e.is_empty())
            .ok_or(ConfigError::MissingEndpoint)?;

        let credential = match self.auth_type {
            AuthType::ApiKey => Credential::ApiKey(
                overrides
                    .api_key
                    .clone()
                    .or(self.api_key)
                    .ok_or(ConfigError::MissingApiKey)?,
            ),
            AuthType::AmazonCognitoUserPools => Credential::Token(
                overrides
                    .token
                    .clone()
                    .ok_or(ConfigError::MissingToken("AMAZON_COGNITO_USER_POOLS"))?,
            ),
            AuthType::OpenidConnect => Credential::Token(
                overrides
                    .token
                    .clone()
                    .ok_or(ConfigError::MissingToken("OPENID_CONNECT"))?,
            ),
            AuthType::AwsIam => return Err(ConfigError::UnsupportedAuth),
        };

        Ok(ClientConfig {
            endpoint,
            region: self.region,
            credential,
        })
    }
}

pub fn data_dir() -> PathBuf {
    let home_dir = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home_dir).join(".todos")
}

fn default_locations() -> Vec<PathBuf> {
    vec![PathBuf::from(CONFIG_FILE_NAME), data_dir().join(CONFIG_FILE_NAME)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn reads_amplify_api_key_config() {
        let file = write_config(
            r#"{
                "aws_project_region": "us-east-1",
                "aws_appsync_graphqlEndpoint": "https://example.appsync-api.us-east-1.amazonaws.com/graphql",
                "aws_appsync_region": "us-east-1",
                "aws_appsync_authenticationType": "API_KEY",
                "aws_appsync_apiKey": "da2-abc"
            }"#,
        );
        let config = AmplifyConfig::discover(Some(file.path()))
            .unwrap()
            .resolve(&Overrides::default())
            .unwrap();
        assert_eq!(
            config.endpoint,
            "https://example.appsync-api.us-east-1.amazonaws.com/graphql"
        );
        assert_eq!(config.region.as_deref(), Some("us-east-1"));
        assert_eq!(config.credential, Credential::ApiKey("da2-abc".into()));
    }

    #[test]
    fn overrides_win_over_file() {
        let file = write_config(
            r#"{"aws_appsync_graphqlEndpoint": "https://a/graphql", "aws_appsync_apiKey": "file-key"}"#,
        );
        let overrides = Overrides {
            endpoint: Some("https://b/graphql".into()),
            api_key: Some("flag-key".into()),
            token: None,
        };
        let config = AmplifyConfig::from_file(file.path())
            .unwrap()
            .resolve(&overrides)
            .unwrap();
        assert_eq!(config.endpoint, "https://b/graphql");
        assert_eq!(config.credential, Credential::ApiKey("flag-key".into()));
    }

    #[test]
    fn user_pool_auth_needs_a_token() {
        let config = AmplifyConfig {
            endpoint: Some("https://a/graphql".into()),
            auth_type: AuthType::AmazonCognitoUserPools,
            ..Default::default()
        };
        assert!(matches!(
            config.clone().resolve(&Overrides::default()),
            Err(ConfigError::MissingToken(_))
        ));
        let overrides = Overrides {
            token: Some("jwt".into()),
            ..Default::default()
        };
        assert_eq!(
            config.resolve(&overrides).unwrap().credential,
            Credential::Token("jwt".into())
        );
    }

    #[test]
    fn missing_endpoint_and_iam_are_rejected() {
        assert!(matches!(
            AmplifyConfig::default().resolve(&Overrides::default()),
            Err(ConfigError::MissingEndpoint)
        ));
        let iam = AmplifyConfig {
            endpoint: Some("https://a/graphql".into()),
            auth_type: AuthType::AwsIam,
            ..Default::default()
        };
        assert!(matches!(
            iam.resolve(&Overrides::default()),
            Err(ConfigError::UnsupportedAuth)
        ));
    }

    #[test]
    fn malformed_file_reports_path() {
        let file = write_config("{not json");
        match AmplifyConfig::from_file(file.path()) {
            Err(ConfigError::Parse { path, .. }) => assert_eq!(path, file.path()),
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
