use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::json;

use super::graphql::{
    CreateTodoData, GraphqlRequest, GraphqlResponse, ListTodosData, CREATE_TODO, LIST_TODOS,
};
use super::TodoApi;
use crate::config::{ClientConfig, Credential};
use crate::error::{ApiError, TodoError};
use crate::models::{CreateTodoInput, Todo};

pub struct GraphqlClient {
    client: Client,
    endpoint: String,
    credential: Credential,
}

impl GraphqlClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.endpoint,
            credential: config.credential,
        }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, ApiError> {
        let request = GraphqlRequest { query, variables };
        let builder = self.client.post(&self.endpoint).json(&request);
        let builder = match &self.credential {
            Credential::ApiKey(key) => builder.header("x-api-key", key),
            Credential::Token(token) => builder.header(AUTHORIZATION, token),
        };

        let response = builder.send().await?.error_for_status()?;
        let envelope: GraphqlResponse<T> = response.json().await?;
        envelope.into_result()
    }
}

#[async_trait]
impl TodoApi for GraphqlClient {
    async fn list_todos(&self) -> Result<Vec<Todo>, TodoError> {
        let data: ListTodosData = self
            .execute(LIST_TODOS, json!({}))
            .await
            .map_err(TodoError::ListFetch)?;

        let connection = data.list_todos;
        if connection.next_token.is_some() {
            log::debug!("listTodos returned a nextToken; only the first page is shown");
        }
        Ok(connection.items.into_iter().flatten().collect())
    }

    async fn create_todo(&self, input: CreateTodoInput) -> Result<Todo, TodoError> {
        let data: CreateTodoData = self
            .execute(CREATE_TODO, json!({ "input": input }))
            .await
            .map_err(TodoError::Create)?;
        Ok(data.create_todo)
    }
}
