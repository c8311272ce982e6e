use std::{collections::BTreeMap, sync::Arc};

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

pub const LIST_PATH: &str = "/api/user/all";
pub const STORE_PATH: &str = "/api/user/store";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: i64,
    pub name: String,
    pub comment: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserList {
    pub users: Vec<User>,
}

/// Store payload. Every field arrives as a string.
#[derive(Deserialize)]
pub struct StoreUser {
    pub user_id: String,
    pub name: String,
    pub comment: String,
}

pub type Db = Arc<RwLock<BTreeMap<i64, User>>>;

pub fn app() -> Router {
    app_with_users(Vec::new())
}

/// Router pre-seeded with `users`.
pub fn app_with_users(users: Vec<User>) -> Router {
    let db: Db = Arc::new(RwLock::new(
        users.into_iter().map(|u| (u.user_id, u)).collect(),
    ));
    Router::new()
        .route(LIST_PATH, post(list_users))
        .route(STORE_PATH, post(store_user))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_users(State(db): State<Db>) -> Json<UserList> {
    let users = db.read().await;
    Json(UserList {
        users: users.values().cloned().collect(),
    })
}

async fn store_user(
    State(db): State<Db>,
    Json(input): Json<StoreUser>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let user_id: i64 = input.user_id.trim().parse().map_err(|_| {
        tracing::warn!(user_id = %input.user_id, "rejected non-numeric user id");
        StatusCode::BAD_REQUEST
    })?;
    let mut users = db.write().await;
    if users.contains_key(&user_id) {
        tracing::warn!(user_id, "rejected duplicate user id");
        return Err(StatusCode::CONFLICT);
    }
    users.insert(
        user_id,
        User {
            user_id,
            name: input.name,
            comment: input.comment,
        },
    );
    tracing::info!(user_id, "stored user");
    Ok(Json(serde_json::json!({ "result": "ok" })))
}
