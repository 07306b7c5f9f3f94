use serde::{Deserialize, Deserializer, Serialize};

use crate::input::TextField;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Todo {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

impl Todo {
    /// A locally created item that the backend has not assigned an id to yet.
    pub fn unconfirmed(name: impl Into<String>, description: impl Into<String>) -> Self {
        Todo {
            id: None,
            name: name.into(),
            description: description.into(),
        }
    }
}

impl From<CreateTodoInput> for Todo {
    fn from(input: CreateTodoInput) -> Self {
        Todo::unconfirmed(input.name, input.description)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateTodoInput {
    pub name: String,
    pub description: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Description,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub name: TextField,
    pub description: TextField,
}

impl FormState {
    pub fn field(&self, field: Field) -> &TextField {
        match field {
            Field::Name => &self.name,
            Field::Description => &self.description,
        }
    }

    pub fn field_mut(&mut self, field: Field) -> &mut TextField {
        match field {
            Field::Name => &mut self.name,
            Field::Description => &mut self.description,
        }
    }

    pub fn clear(&mut self) {
        *self = FormState::default();
    }
}

/// Which widget receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Name,
    Description,
    CreateButton,
    SignOutButton,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Name => Focus::Description,
            Focus::Description => Focus::CreateButton,
            Focus::CreateButton => Focus::SignOutButton,
            Focus::SignOutButton => Focus::Name,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Focus::Name => Focus::SignOutButton,
            Focus::Description => Focus::Name,
            Focus::CreateButton => Focus::Description,
            Focus::SignOutButton => Focus::CreateButton,
        }
    }

    pub fn field(self) -> Option<Field> {
        match self {
            Focus::Name => Some(Field::Name),
            Focus::Description => Some(Field::Description),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_reads_null_description_as_empty() {
        let todo: Todo =
            serde_json::from_str(r#"{"id":"t1","name":"Milk","description":null,"__typename":"Todo"}"#)
                .unwrap();
        assert_eq!(todo.id.as_deref(), Some("t1"));
        assert_eq!(todo.description, "");
    }

    #[test]
    fn focus_cycles_through_all_widgets() {
        let mut focus = Focus::default();
        for _ in 0..4 {
            focus = focus.next();
        }
        assert_eq!(focus, Focus::Name);
        assert_eq!(Focus::Name.previous(), Focus::SignOutButton);
        assert_eq!(Focus::CreateButton.field(), None);
    }
}
