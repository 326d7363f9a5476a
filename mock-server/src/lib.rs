use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::{net::TcpListener, sync::RwLock};

const DEFAULT_CATEGORY: &str = "Default";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: i64,
    pub item_name: String,
    pub due_date: Option<String>,
    pub task_category: String,
    /// Stored opaquely; the server never interprets recurrence.
    pub recurring_type: Option<Value>,
    pub done: bool,
}

/// Body for both create and update. Any `id` in an update body is ignored in
/// favour of the path.
#[derive(Deserialize)]
pub struct TodoInput {
    pub item_name: String,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub task_category: String,
    #[serde(default)]
    pub recurring_type: Option<Value>,
    #[serde(default)]
    pub done: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Default)]
pub struct Store {
    last_id: i64,
    todos: BTreeMap<i64, TodoItem>,
}

impl Store {
    /// Inserts with the next id. Ids only grow, so iteration order is
    /// insertion order.
    pub fn insert(&mut self, input: TodoInput) -> Result<TodoItem, ApiFailure> {
        let todo = normalize(self.last_id + 1, input)?;
        self.last_id = todo.id;
        self.todos.insert(todo.id, todo.clone());
        Ok(todo)
    }
}

pub type Db = Arc<RwLock<Store>>;

/// Status plus `{"error": ...}` body.
pub type ApiFailure = (StatusCode, Json<ErrorBody>);

pub fn app() -> Router {
    router(Db::default())
}

/// Router over an existing store, so tests can seed or inspect it.
pub fn router(db: Db) -> Router {
    let todos = Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", put(update_todo).delete(delete_todo));
    Router::new().nest("/api", todos).with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn failure(status: StatusCode, message: &str) -> ApiFailure {
    (
        status,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
}

/// Trims text fields and fills the category sentinel.
fn normalize(id: i64, input: TodoInput) -> Result<TodoItem, ApiFailure> {
    let item_name = input.item_name.trim().to_string();
    if item_name.is_empty() {
        return Err(failure(StatusCode::BAD_REQUEST, "item_name must not be empty"));
    }
    let task_category = match input.task_category.trim() {
        "" => DEFAULT_CATEGORY.to_string(),
        category => category.to_string(),
    };
    Ok(TodoItem {
        id,
        item_name,
        due_date: input.due_date,
        task_category,
        recurring_type: input.recurring_type,
        done: input.done,
    })
}

async fn list_todos(State(db): State<Db>) -> Json<Vec<TodoItem>> {
    let store = db.read().await;
    debug!("Listing {} todos", store.todos.len());
    Json(store.todos.values().cloned().collect())
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<TodoInput>,
) -> Result<(StatusCode, Json<TodoItem>), ApiFailure> {
    let todo = db.write().await.insert(input)?;
    debug!("Created todo with id: {}", todo.id);
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<TodoInput>,
) -> Result<Json<TodoItem>, ApiFailure> {
    let mut store = db.write().await;
    let Some(slot) = store.todos.get_mut(&id) else {
        warn!("Todo with id {id} not found");
        return Err(failure(StatusCode::NOT_FOUND, "Todo not found"));
    };
    *slot = normalize(id, input)?;
    debug!("Updated todo with id: {id}");
    Ok(Json(slot.clone()))
}

async fn delete_todo(State(db): State<Db>, Path(id): Path<i64>) -> Result<StatusCode, ApiFailure> {
    let mut store = db.write().await;
    match store.todos.remove(&id) {
        Some(_) => {
            debug!("Deleted todo with id: {id}");
            Ok(StatusCode::NO_CONTENT)
        }
        None => {
            warn!("Todo with id {id} not found");
            Err(failure(StatusCode::NOT_FOUND, "Todo not found"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(json: &str) -> TodoInput {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn todo_serializes_every_field() {
        let todo = TodoItem {
            id: 1,
            item_name: "Test".to_string(),
            due_date: None,
            task_category: "Default".to_string(),
            recurring_type: Some(serde_json::json!("Daily")),
            done: false,
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["item_name"], "Test");
        assert!(json["due_date"].is_null());
        assert_eq!(json["recurring_type"], "Daily");
        assert_eq!(json["done"], false);
    }

    #[test]
    fn input_defaults_optional_fields() {
        let parsed = input(r#"{"item_name":"No extras"}"#);
        assert_eq!(parsed.item_name, "No extras");
        assert!(parsed.task_category.is_empty());
        assert!(parsed.recurring_type.is_none());
        assert!(!parsed.done);
    }

    #[test]
    fn input_rejects_missing_item_name() {
        let result: Result<TodoInput, _> = serde_json::from_str(r#"{"done":true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn insert_assigns_increasing_ids() {
        let mut store = Store::default();
        let first = store.insert(input(r#"{"item_name":"a"}"#)).unwrap();
        let second = store.insert(input(r#"{"item_name":"b"}"#)).unwrap();
        assert_eq!((first.id, second.id), (1, 2));
    }

    #[test]
    fn normalize_trims_and_defaults_category() {
        let todo = normalize(4, input(r#"{"item_name":"  walk dog ","task_category":"  "}"#)).unwrap();
        assert_eq!(todo.item_name, "walk dog");
        assert_eq!(todo.task_category, "Default");
    }

    #[test]
    fn normalize_rejects_blank_name() {
        let (status, Json(body)) = normalize(1, input(r#"{"item_name":"   "}"#)).unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "item_name must not be empty");
    }
}
