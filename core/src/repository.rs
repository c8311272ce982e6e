//! Domain façade over `HttpClient` for the two user endpoints.

use tracing::info;

use crate::api::{decode_users, UserApi};
use crate::client::HttpClient;
use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{NewUser, User};

#[derive(Debug, Clone)]
pub struct UserRepository<T> {
    api: UserApi,
    client: HttpClient<T>,
}

impl<T: Transport> UserRepository<T> {
    pub fn new(config: ApiConfig, transport: T) -> Self {
        Self {
            api: UserApi::new(config),
            client: HttpClient::new(transport),
        }
    }

    pub fn api(&self) -> &UserApi {
        &self.api
    }

    pub fn client(&self) -> &HttpClient<T> {
        &self.client
    }

    /// Fetch every user known to the server.
    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let value = self.client.post(&self.api.config().list_url(), None).await?;
        let users = decode_users(value)?;
        info!(count = users.len(), "users fetched");
        Ok(users)
    }

    /// Store a new user. Inputs are expected to be validated already.
    pub async fn create_user(&self, user_id: &str, name: &str, comment: &str) -> Result<(), ApiError> {
        let envelope = NewUser::new(user_id, name, comment).to_envelope();
        self.client
            .send(&self.api.config().store_url(), Some(&envelope))
            .await?;
        info!(%user_id, "user stored");
        Ok(())
    }
}
