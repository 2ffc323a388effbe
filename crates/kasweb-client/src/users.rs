//! User management endpoints (admin only on the backend)

use crate::error::Result;
use crate::BackendClient;
use kasweb_core::{User, UserPayload};
use reqwest::Method;

impl BackendClient {
    pub async fn list_users(&self) -> Result<Vec<User>> {
        let response = self.request(Method::GET, "/users").send().await?;

        self.handle_list(response).await
    }

    pub async fn get_user(&self, id: &str) -> Result<User> {
        let path = format!("/users/{}", urlencoding::encode(id));
        let response = self.request(Method::GET, &path).send().await?;

        self.handle_response(response).await
    }

    pub async fn create_user(&self, payload: &UserPayload) -> Result<()> {
        let response = self.request(Method::POST, "/users").json(payload).send().await?;

        self.handle_empty_response(response).await
    }

    /// Update a user; a payload without password keeps the current one
    pub async fn update_user(&self, id: &str, payload: &UserPayload) -> Result<()> {
        let path = format!("/users/{}", urlencoding::encode(id));
        let response = self.request(Method::PUT, &path).json(payload).send().await?;

        self.handle_empty_response(response).await
    }

    pub async fn delete_user(&self, id: &str) -> Result<()> {
        let path = format!("/users/{}", urlencoding::encode(id));
        let response = self.request(Method::DELETE, &path).send().await?;

        self.handle_empty_response(response).await
    }
}
