//! Category and fund endpoints

use crate::error::Result;
use crate::BackendClient;
use kasweb_core::{Category, CategoryPayload, Fund, FundPayload};
use reqwest::Method;

impl BackendClient {
    // =============================================================================
    // Categories
    // =============================================================================

    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        let response = self.request(Method::GET, "/categories").send().await?;

        self.handle_list(response).await
    }

    pub async fn create_category(&self, payload: &CategoryPayload) -> Result<()> {
        let response = self
            .request(Method::POST, "/categories")
            .json(payload)
            .send()
            .await?;

        self.handle_empty_response(response).await
    }

    pub async fn update_category(&self, id: &str, payload: &CategoryPayload) -> Result<()> {
        let path = format!("/categories/{}", urlencoding::encode(id));
        let response = self.request(Method::PUT, &path).json(payload).send().await?;

        self.handle_empty_response(response).await
    }

    pub async fn delete_category(&self, id: &str) -> Result<()> {
        let path = format!("/categories/{}", urlencoding::encode(id));
        let response = self.request(Method::DELETE, &path).send().await?;

        self.handle_empty_response(response).await
    }

    // =============================================================================
    // Funds
    // =============================================================================

    pub async fn list_funds(&self) -> Result<Vec<Fund>> {
        let response = self.request(Method::GET, "/funds").send().await?;

        self.handle_list(response).await
    }

    pub async fn create_fund(&self, payload: &FundPayload) -> Result<()> {
        let response = self.request(Method::POST, "/funds").json(payload).send().await?;

        self.handle_empty_response(response).await
    }

    pub async fn update_fund(&self, id: &str, payload: &FundPayload) -> Result<()> {
        let path = format!("/funds/{}", urlencoding::encode(id));
        let response = self.request(Method::PUT, &path).json(payload).send().await?;

        self.handle_empty_response(response).await
    }

    /// Delete a fund; the backend refuses while transactions reference it
    pub async fn delete_fund(&self, id: &str) -> Result<()> {
        let path = format!("/funds/{}", urlencoding::encode(id));
        let response = self.request(Method::DELETE, &path).send().await?;

        self.handle_empty_response(response).await
    }
}
