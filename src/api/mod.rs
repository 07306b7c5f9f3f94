mod client;
mod graphql;

pub use client::GraphqlClient;

use async_trait::async_trait;

use crate::error::TodoError;
use crate::models::{CreateTodoInput, Todo};

/// The hosted backend, as far as the todo view is concerned.
#[async_trait]
pub trait TodoApi: Send + Sync {
    /// All todo items, in the order the backend returns them.
    async fn list_todos(&self) -> Result<Vec<Todo>, TodoError>;

    /// Persists one item and returns the stored record.
    async fn create_todo(&self, input: CreateTodoInput) -> Result<Todo, TodoError>;
}
