//! Transaction endpoints

use crate::error::Result;
use crate::BackendClient;
use kasweb_core::{NewTransaction, StatusUpdate, Transaction};
use reqwest::Method;

impl BackendClient {
    /// List all transactions visible to the caller, newest first
    pub async fn list_transactions(&self) -> Result<Vec<Transaction>> {
        let response = self.request(Method::GET, "/transactions").send().await?;

        self.handle_list(response).await
    }

    /// Get a transaction by ID
    pub async fn get_transaction(&self, id: &str) -> Result<Transaction> {
        let path = format!("/transactions/{}", urlencoding::encode(id));
        let response = self.request(Method::GET, &path).send().await?;

        self.handle_response(response).await
    }

    /// Record a new income or expense
    pub async fn create_transaction(&self, tx: &NewTransaction) -> Result<()> {
        let response = self
            .request(Method::POST, "/transactions")
            .json(tx)
            .send()
            .await?;

        self.handle_empty_response(response).await
    }

    /// Replace the editable fields of a transaction
    pub async fn update_transaction(&self, id: &str, tx: &NewTransaction) -> Result<()> {
        let path = format!("/transactions/{}", urlencoding::encode(id));
        let response = self.request(Method::PUT, &path).json(tx).send().await?;

        self.handle_empty_response(response).await
    }

    /// Approve or reject a pending transaction
    pub async fn update_transaction_status(&self, id: &str, update: &StatusUpdate) -> Result<()> {
        let path = format!("/transactions/{}/status", urlencoding::encode(id));
        let response = self.request(Method::PUT, &path).json(update).send().await?;

        self.handle_empty_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::spawn_backend;
    use axum::{
        extract::{Path, State},
        http::StatusCode,
        routing::{get, put},
        Json, Router,
    };
    use kasweb_core::{PaymentMethod, TransactionStatus, TransactionType};
    use rust_decimal_macros::dec;
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    type Seen = Arc<Mutex<Vec<Value>>>;

    fn fake_transactions(seen: Seen) -> Router {
        Router::new()
            .route(
                "/api/transactions",
                get(|| async {
                    Json(json!({"data": [
                        {"id": "t1", "type": "income", "amount": 100000, "date": "2025-01-02T00:00:00Z", "status": "approved"},
                        {"id": "t2", "type": "expense", "amount": 25000.5, "date": "2025-01-03", "status": "pending"}
                    ]}))
                })
                .post(|State(seen): State<Seen>, Json(body): Json<Value>| async move {
                    seen.lock().unwrap().push(body);
                    (StatusCode::CREATED, Json(json!({"message": "created", "data": {}})))
                }),
            )
            .route(
                "/api/transactions/:id/status",
                put(|State(seen): State<Seen>, Path(id): Path<String>, Json(body): Json<Value>| async move {
                    if id == "missing" {
                        return (StatusCode::NOT_FOUND, Json(json!({"error": "Transaction not found"})));
                    }
                    seen.lock().unwrap().push(body);
                    (StatusCode::OK, Json(json!({"message": "updated"})))
                }),
            )
            .with_state(seen)
    }

    #[tokio::test]
    async fn test_list_transactions() {
        let seen = Seen::default();
        let client = BackendClient::new(spawn_backend(fake_transactions(seen)).await);
        let txs = client.list_transactions().await.unwrap();
        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].tx_type, TransactionType::Income);
        assert_eq!(txs[1].amount, dec!(25000.5));
        assert_eq!(txs[1].status, TransactionStatus::Pending);
    }

    #[tokio::test]
    async fn test_create_transaction_posts_payload() {
        let seen = Seen::default();
        let client = BackendClient::new(spawn_backend(fake_transactions(seen.clone())).await);
        let tx = NewTransaction {
            tx_type: TransactionType::Income,
            amount: dec!(500000),
            category: "Persembahan".to_string(),
            description: String::new(),
            event_name: "Ibadah Minggu".to_string(),
            date: "2025-03-02".to_string(),
            fund_id: Some("f1".to_string()),
            payment_method: PaymentMethod::Cash,
            note_url: String::new(),
        };
        client.create_transaction(&tx).await.unwrap();

        let bodies = seen.lock().unwrap();
        assert_eq!(bodies[0]["type"], "income");
        assert_eq!(bodies[0]["fundId"], "f1");
        assert_eq!(bodies[0]["noteUrl"], "");
    }

    #[tokio::test]
    async fn test_status_update() {
        let seen = Seen::default();
        let client = BackendClient::new(spawn_backend(fake_transactions(seen.clone())).await);
        client
            .update_transaction_status("t2", &StatusUpdate::reject("Nota buram"))
            .await
            .unwrap();
        assert_eq!(seen.lock().unwrap()[0]["rejectionReason"], "Nota buram");

        let err = client
            .update_transaction_status("missing", &StatusUpdate::approve())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
