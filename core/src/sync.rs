//! Local todo collection kept in step with the remote store.
//!
//! # Invariants
//! - Confirm-then-apply: the collection changes only after the store answers
//!   with success. Failures leave it exactly as it was.
//! - Create and update responses replace local entries wholesale.
//! - The last error survives until the next successful operation.
//! - The state `RefCell` is never borrowed across an `.await`, so operations
//!   may overlap on one task. Overlapping writes to the same id are
//!   last-writer-wins.

use std::cell::RefCell;

use log::{debug, info, warn};

use crate::category::{self, Extraction};
use crate::client::TodoClient;
use crate::config::ClientConfig;
use crate::error::{ApiError, Operation, SyncError};
use crate::http::Transport;
use crate::types::{NewTodoItem, TodoId, TodoItem};

/// What an operation did to local state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The store confirmed the change and it was applied locally.
    Committed,
    /// Nothing to do: blank input, or an id not present locally.
    Skipped,
    /// The call failed; the error is available from `last_error`.
    Failed,
}

#[derive(Debug, Default)]
struct SyncState {
    todos: Vec<TodoItem>,
    loads_in_flight: usize,
    last_error: Option<SyncError>,
}

/// Owns the local todo collection and the remote calls that change it.
pub struct Synchronizer<T> {
    client: TodoClient,
    transport: T,
    state: RefCell<SyncState>,
}

impl<T: Transport> Synchronizer<T> {
    /// Creates an empty synchronizer. Call [`Synchronizer::load`] (or use
    /// [`Synchronizer::start`]) to populate it.
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self {
            client: TodoClient::with_config(&config),
            transport,
            state: RefCell::new(SyncState::default()),
        }
    }

    /// Creates a synchronizer and runs the startup load once. A failed load
    /// leaves an empty collection with the error recorded.
    pub async fn start(config: ClientConfig, transport: T) -> Self {
        let sync = Self::new(config, transport);
        sync.load().await;
        sync
    }

    /// Live category preview for partially typed input.
    pub fn preview(&self, raw_input: &str) -> Extraction {
        category::extract(raw_input)
    }

    /// Replaces the local collection with the remote one.
    pub async fn load(&self) -> Outcome {
        let in_flight = LoadGuard::enter(&self.state);
        let result = self.fetch_all().await;
        drop(in_flight);

        match result {
            Ok(todos) => {
                info!("event=todos_load module=sync status=ok count={}", todos.len());
                self.commit(|current| *current = todos);
                Outcome::Committed
            }
            Err(err) => self.fail(SyncError::from_api(err, Operation::Load, None)),
        }
    }

    /// Creates a todo from free-form input such as `"buy milk #errands"`.
    ///
    /// Input that is empty once hashtags are stripped is skipped without
    /// contacting the store.
    pub async fn add(&self, raw_input: &str) -> Outcome {
        let Some(candidate) = candidate(raw_input) else {
            debug!("event=todo_add module=sync status=skipped reason=empty_text");
            return Outcome::Skipped;
        };

        match self.create(&candidate).await {
            Ok(created) => {
                info!("event=todo_add module=sync status=ok id={}", created.id);
                self.commit(|todos| todos.push(created));
                Outcome::Committed
            }
            Err(err) => self.fail(SyncError::from_api(err, Operation::Add, None)),
        }
    }

    /// Flips `done` on a locally known todo.
    pub async fn toggle(&self, id: TodoId) -> Outcome {
        let Some(mut next) = self.get(id) else {
            debug!("event=todo_toggle module=sync status=skipped reason=unknown_id id={id}");
            return Outcome::Skipped;
        };
        next.done = !next.done;

        match self.update(id, &next).await {
            Ok(stored) => {
                info!("event=todo_toggle module=sync status=ok id={id} done={}", stored.done);
                self.commit(|todos| {
                    if let Some(slot) = todos.iter_mut().find(|todo| todo.id == id) {
                        *slot = stored;
                    }
                });
                Outcome::Committed
            }
            Err(err) => self.fail(SyncError::from_api(err, Operation::Toggle, Some(id))),
        }
    }

    /// Deletes a todo remotely, then drops it locally if present.
    pub async fn delete(&self, id: TodoId) -> Outcome {
        match self.remove(id).await {
            Ok(()) => {
                info!("event=todo_delete module=sync status=ok id={id}");
                self.commit(|todos| todos.retain(|todo| todo.id != id));
                Outcome::Committed
            }
            Err(err) => self.fail(SyncError::from_api(err, Operation::Delete, Some(id))),
        }
    }

    /// Snapshot of the collection in display order.
    pub fn todos(&self) -> Vec<TodoItem> {
        self.state.borrow().todos.clone()
    }

    pub fn get(&self, id: TodoId) -> Option<TodoItem> {
        self.state.borrow().todos.iter().find(|todo| todo.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.state.borrow().todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().todos.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loads_in_flight > 0
    }

    pub fn last_error(&self) -> Option<SyncError> {
        self.state.borrow().last_error.clone()
    }

    /// The last error rendered for display.
    pub fn error_message(&self) -> Option<String> {
        self.state.borrow().last_error.as_ref().map(ToString::to_string)
    }

    #[cfg(test)]
    fn transport(&self) -> &T {
        &self.transport
    }

    async fn fetch_all(&self) -> Result<Vec<TodoItem>, ApiError> {
        let response = self.transport.execute(self.client.build_list_todos()).await?;
        self.client.parse_list_todos(response)
    }

    async fn create(&self, candidate: &NewTodoItem) -> Result<TodoItem, ApiError> {
        let request = self.client.build_create_todo(candidate)?;
        let response = self.transport.execute(request).await?;
        self.client.parse_create_todo(response)
    }

    async fn update(&self, id: TodoId, item: &TodoItem) -> Result<TodoItem, ApiError> {
        let request = self.client.build_update_todo(id, item)?;
        let response = self.transport.execute(request).await?;
        self.client.parse_update_todo(response)
    }

    async fn remove(&self, id: TodoId) -> Result<(), ApiError> {
        let response = self.transport.execute(self.client.build_delete_todo(id)).await?;
        self.client.parse_delete_todo(response)
    }

    fn commit(&self, apply: impl FnOnce(&mut Vec<TodoItem>)) {
        let mut state = self.state.borrow_mut();
        apply(&mut state.todos);
        state.last_error = None;
    }

    fn fail(&self, err: SyncError) -> Outcome {
        warn!("event=todo_sync module=sync status=error error={err}");
        self.state.borrow_mut().last_error = Some(err);
        Outcome::Failed
    }
}

/// Counts one in-flight load until dropped, including when the `load`
/// future itself is dropped before completing.
struct LoadGuard<'a> {
    state: &'a RefCell<SyncState>,
}

impl<'a> LoadGuard<'a> {
    fn enter(state: &'a RefCell<SyncState>) -> Self {
        state.borrow_mut().loads_in_flight += 1;
        Self { state }
    }
}

impl Drop for LoadGuard<'_> {
    fn drop(&mut self) {
        self.state.borrow_mut().loads_in_flight -= 1;
    }
}

/// Builds the create payload, or `None` when no text remains.
fn candidate(raw_input: &str) -> Option<NewTodoItem> {
    let extraction = category::extract(raw_input);
    if !extraction.is_submittable() {
        return None;
    }
    Some(NewTodoItem {
        item_name: extraction.text,
        due_date: None,
        task_category: extraction.category,
        recurring_type: None,
        done: false,
    })
}
