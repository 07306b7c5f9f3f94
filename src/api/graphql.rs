use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::models::Todo;

pub const LIST_TODOS: &str = r#"query ListTodos(
  $filter: ModelTodoFilterInput
  $limit: Int
  $nextToken: String
) {
  listTodos(filter: $filter, limit: $limit, nextToken: $nextToken) {
    items {
      id
      name
      description
      createdAt
      updatedAt
      __typename
    }
    nextToken
    __typename
  }
}"#;

pub const CREATE_TODO: &str = r#"mutation CreateTodo(
  $input: CreateTodoInput!
  $condition: ModelTodoConditionInput
) {
  createTodo(input: $input, condition: $condition) {
    id
    name
    description
    createdAt
    updatedAt
    __typename
  }
}"#;

#[derive(Serialize)]
pub struct GraphqlRequest<'a> {
    pub query: &'a str,
    pub variables: serde_json::Value,
}

#[derive(Deserialize)]
struct GraphqlErrorMessage {
    message: String,
}

#[derive(Deserialize)]
pub struct GraphqlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Option<Vec<GraphqlErrorMessage>>,
}

impl<T> GraphqlResponse<T> {
    /// Any reported error fails the whole operation, even alongside partial data.
    pub fn into_result(self) -> Result<T, ApiError> {
        match self.errors {
            Some(errors) if !errors.is_empty() => Err(ApiError::Graphql(
                errors.into_iter().map(|e| e.message).collect(),
            )),
            _ => self.data.ok_or(ApiError::MissingData),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTodosData {
    pub list_todos: TodoConnection,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoConnection {
    pub items: Vec<Option<Todo>>,
    #[serde(default)]
    pub next_token: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoData {
    pub create_todo: Todo,
}
