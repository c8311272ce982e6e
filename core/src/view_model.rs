//! View-models that drive the fetch state machine and publish the outcome.
//!
//! Each call walks `Idle -> Loading -> Success | Failed`. `is_loading` is
//! `true` only while a request is in flight. Errors are both returned and
//! published in `last_error`, so a presentation layer can either await the
//! call or just observe state.

use std::sync::Arc;

use tracing::warn;

use crate::error::ApiError;
use crate::observable::ObservableState;
use crate::repository::UserRepository;
use crate::transport::Transport;
use crate::types::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPhase {
    #[default]
    Idle,
    Loading,
    Success,
    Failed,
}

/// Observable fields shared by both view-models.
#[derive(Debug, Clone, Default)]
pub struct FetchState {
    pub is_loading: ObservableState<bool>,
    pub phase: ObservableState<FetchPhase>,
    pub last_error: ObservableState<Option<ApiError>>,
}

impl FetchState {
    fn begin(&self) {
        self.phase.set(FetchPhase::Loading);
        self.is_loading.set(true);
    }

    fn finish<R>(&self, result: &Result<R, ApiError>) {
        self.is_loading.set(false);
        match result {
            Ok(_) => {
                self.last_error.set(None);
                self.phase.set(FetchPhase::Success);
            }
            Err(e) => {
                self.last_error.set(Some(e.clone()));
                self.phase.set(FetchPhase::Failed);
            }
        }
    }
}

/// Backs the user list screen.
pub struct UserListViewModel<T> {
    repository: Arc<UserRepository<T>>,
    pub users: ObservableState<Vec<User>>,
    pub fetch: FetchState,
}

impl<T: Transport> UserListViewModel<T> {
    pub fn new(repository: Arc<UserRepository<T>>) -> Self {
        Self {
            repository,
            users: ObservableState::new(Vec::new()),
            fetch: FetchState::default(),
        }
    }

    /// Reload the list. On failure the previous list is left untouched.
    pub async fn fetch_users(&self) -> Result<(), ApiError> {
        self.fetch.begin();
        let result = self.repository.list_users().await;
        if let Ok(users) = &result {
            self.users.set(users.clone());
        }
        self.fetch.finish(&result);
        result.map(|_| ()).inspect_err(|e| warn!(error = %e, "fetching users failed"))
    }
}

/// Backs the add-user form.
pub struct AddUserViewModel<T> {
    repository: Arc<UserRepository<T>>,
    pub is_success: ObservableState<bool>,
    pub fetch: FetchState,
}

impl<T: Transport> AddUserViewModel<T> {
    pub fn new(repository: Arc<UserRepository<T>>) -> Self {
        Self {
            repository,
            is_success: ObservableState::new(false),
            fetch: FetchState::default(),
        }
    }

    /// Store a user. `is_success` drops back to `false` when the call starts
    /// and is `true` only after this call succeeds.
    pub async fn add_user(&self, user_id: &str, name: &str, comment: &str) -> Result<(), ApiError> {
        self.is_success.set(false);
        self.fetch.begin();
        let result = self.repository.create_user(user_id, name, comment).await;
        self.is_success.set(result.is_ok());
        self.fetch.finish(&result);
        result.inspect_err(|e| warn!(error = %e, "adding user failed"))
    }
}
