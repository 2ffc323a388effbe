//! Dashboard aggregate endpoints

use crate::error::Result;
use crate::BackendClient;
use kasweb_core::{CategoryData, DashboardStats, MonthlyData, TransactionType};
use reqwest::Method;

impl BackendClient {
    /// Totals for the stat cards
    pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
        let response = self.request(Method::GET, "/dashboard/stats").send().await?;

        self.handle_response(response).await
    }

    /// Income and expense per month for the last six months
    pub async fn dashboard_monthly(&self) -> Result<Vec<MonthlyData>> {
        let response = self.request(Method::GET, "/dashboard/monthly").send().await?;

        self.handle_list(response).await
    }

    /// This month's totals per category for one transaction type
    pub async fn dashboard_categories(&self, tx_type: TransactionType) -> Result<Vec<CategoryData>> {
        let response = self
            .request(Method::GET, "/dashboard/category")
            .query(&[("type", tx_type.to_string())])
            .send()
            .await?;

        self.handle_list(response).await
    }
}
