//! Client core for the user directory service.
//!
//! # Overview
//! Lists users and stores new ones through two JSON-over-POST endpoints, and
//! publishes loading and result state through `ObservableState` fields that
//! a presentation layer subscribes to.
//!
//! # Design
//! - `UserApi` is stateless: `build_*` produces an `HttpRequest`, `parse_*`
//!   consumes an `HttpResponse`. Hosts with their own HTTP stack (see the
//!   `userlist-ffi` crate) use it directly.
//! - `HttpClient` runs the round trip through a `Transport`, which keeps the
//!   network behind one trait and makes every layer above it testable with
//!   canned responses.
//! - `UserRepository` and the view-models sit on top and own no I/O.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod observable;
pub mod repository;
pub mod transport;
pub mod types;
pub mod view_model;

pub use crate::api::UserApi;
pub use crate::client::HttpClient;
pub use crate::config::{ApiConfig, ConfigError};
pub use crate::error::{ApiError, TransportError};
pub use crate::http::{HttpRequest, HttpResponse, RequestEnvelope};
pub use crate::observable::{ObservableState, Subscription};
pub use crate::repository::UserRepository;
pub use crate::transport::{Transport, UreqTransport};
pub use crate::types::{NewUser, User, UserKey, UserList};
pub use crate::view_model::{AddUserViewModel, FetchPhase, FetchState, UserListViewModel};
