//! Stateless request builder and response parser for the user API.
//!
//! # Design
//! `UserApi` holds only an `ApiConfig` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`, so
//! a host with its own HTTP stack can run the round trip itself.
//! `UserRepository` reuses the same decoding for its async path.

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::http::{self, HttpRequest, HttpResponse};
use crate::types::{NewUser, User, UserList};

#[derive(Debug, Clone)]
pub struct UserApi {
    config: ApiConfig,
}

impl UserApi {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    /// Default endpoints under `base_url`.
    pub fn with_base_url(base_url: &str) -> Self {
        Self::new(ApiConfig::with_base_url(base_url))
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn build_list_users(&self) -> Result<HttpRequest, ApiError> {
        http::build_post(&self.config.list_url(), None)
    }

    pub fn build_create_user(&self, input: &NewUser) -> Result<HttpRequest, ApiError> {
        http::build_post(&self.config.store_url(), Some(&input.to_envelope()))
    }

    pub fn parse_list_users(&self, response: HttpResponse) -> Result<Vec<User>, ApiError> {
        decode_users(http::parse_json(&response)?)
    }

    /// Success is status 200 alone; the body is never inspected.
    pub fn parse_create_user(&self, response: HttpResponse) -> Result<(), ApiError> {
        http::check_status(&response)
    }
}

/// Pull the `users` array out of a list response.
pub fn decode_users(value: serde_json::Value) -> Result<Vec<User>, ApiError> {
    serde_json::from_value::<UserList>(value)
        .map(|list| list.users)
        .map_err(|e| ApiError::DeserializationError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api() -> UserApi {
        UserApi::with_base_url("http://localhost:3000")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_list_users_produces_correct_request() {
        let req = api().build_list_users().unwrap();
        assert_eq!(req.url, "http://localhost:3000/api/user/all");
        assert!(req.body.is_none());
        assert_eq!(req.headers.len(), 1);
    }

    #[test]
    fn build_create_user_produces_correct_request() {
        let req = api()
            .build_create_user(&NewUser::new("12", "Dave", "new here"))
            .unwrap();
        assert_eq!(req.url, "http://localhost:3000/api/user/store");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "user_id": "12", "name": "Dave", "comment": "new here" })
        );
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let api = UserApi::with_base_url("http://localhost:3000/");
        let req = api.build_list_users().unwrap();
        assert_eq!(req.url, "http://localhost:3000/api/user/all");
    }

    #[test]
    fn parse_list_users_single() {
        let users = api()
            .parse_list_users(response(
                200,
                r#"{"users":[{"user_id":1,"name":"Alice","comment":"hi"}]}"#,
            ))
            .unwrap();
        assert_eq!(users, vec![User::new(1, "Alice", "hi")]);
    }

    #[test]
    fn parse_list_users_empty_is_not_an_error() {
        let users = api().parse_list_users(response(200, r#"{"users":[]}"#)).unwrap();
        assert!(users.is_empty());
    }

    #[test]
    fn parse_list_users_missing_key() {
        let err = api().parse_list_users(response(200, r#"{"people":[]}"#)).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_list_users_bad_element() {
        let err = api()
            .parse_list_users(response(200, r#"{"users":[{"user_id":1,"name":"A"}]}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_list_users_server_error() {
        let err = api().parse_list_users(response(500, "")).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }

    #[test]
    fn parse_create_user_ignores_body() {
        assert!(api().parse_create_user(response(200, "")).is_ok());
        assert!(api().parse_create_user(response(200, "garbage")).is_ok());
    }

    #[test]
    fn parse_create_user_wrong_status() {
        let err = api().parse_create_user(response(409, "{}")).unwrap_err();
        assert_eq!(
            err,
            ApiError::HttpError {
                status: 409,
                message: "Conflict".to_string()
            }
        );
    }
}
