use crate::error::TodoError;
use crate::input::TextField;
use crate::models::{CreateTodoInput, Field, FormState, Todo};

/// Completion of a background request, delivered back to the view.
#[derive(Debug)]
pub enum ApiEvent {
    Loaded(Result<Vec<Todo>, TodoError>),
    Created(Result<Todo, TodoError>),
}

/// State owned by the todo view: the displayed list and the new-item form.
///
/// The list is whatever the last successful load returned followed by every
/// item created since, in creation order. A load replaces it wholesale; there
/// is no matching of optimistic entries against stored ones.
#[derive(Debug, Default)]
pub struct TodoView {
    pub todos: Vec<Todo>,
    pub form: FormState,
}

impl TodoView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_input(&mut self, field: Field, value: impl Into<String>) {
        self.form.field_mut(field).set(value);
    }

    /// Applies a keystroke-level edit to one field.
    pub fn edit(&mut self, field: Field, edit: impl FnOnce(&mut TextField)) {
        edit(self.form.field_mut(field));
    }

    /// Appends the form contents as an unconfirmed item and clears the form.
    ///
    /// Returns the input to persist, or `None` when either field is empty.
    pub fn submit(&mut self) -> Option<CreateTodoInput> {
        if self.form.name.is_empty() || self.form.description.is_empty() {
            return None;
        }
        let input = CreateTodoInput {
            name: self.form.name.value().to_string(),
            description: self.form.description.value().to_string(),
        };
        self.todos.push(Todo::from(input.clone()));
        self.form.clear();
        Some(input)
    }

    pub fn apply(&mut self, event: ApiEvent) {
        match event {
            ApiEvent::Loaded(Ok(todos)) => {
                log::debug!("loaded {} todos", todos.len());
                self.todos = todos;
            }
            ApiEvent::Loaded(Err(TodoError::ListFetch(source))) => {
                log::error!("error fetching todos: {source}");
            }
            ApiEvent::Created(Ok(todo)) => {
                log::debug!("created todo {}", todo.id.as_deref().unwrap_or("<no id>"));
            }
            ApiEvent::Created(Err(TodoError::Create(source))) => {
                log::error!("error creating todo: {source}");
            }
            ApiEvent::Loaded(Err(err)) | ApiEvent::Created(Err(err)) => {
                log::error!("{err}");
            }
        }
    }
}
