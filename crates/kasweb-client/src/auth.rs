//! Authentication endpoints

use crate::error::Result;
use crate::BackendClient;
use kasweb_core::{Credentials, LoginResponse, RegisterRequest};
use reqwest::Method;

impl BackendClient {
    /// Exchange credentials for a token and the user profile
    ///
    /// Wrong credentials come back as `ClientError::Unauthorized` carrying
    /// the backend's message.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        let response = self
            .request(Method::POST, "/auth/login")
            .json(credentials)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Create an account through the public register endpoint
    pub async fn register(&self, request: &RegisterRequest) -> Result<()> {
        let response = self
            .request(Method::POST, "/auth/register")
            .json(request)
            .send()
            .await?;

        self.handle_empty_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::spawn_backend;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use kasweb_core::Role;
    use serde_json::{json, Value};

    fn fake_auth() -> Router {
        Router::new()
            .route(
                "/api/auth/login",
                post(|Json(body): Json<Value>| async move {
                    if body["password"] == "admin123" {
                        (
                            StatusCode::OK,
                            Json(json!({
                                "data": {
                                    "token": "jwt-token",
                                    "user": {"id": "u1", "name": "Bendahara", "email": body["email"], "role": "admin"}
                                }
                            })),
                        )
                    } else {
                        (StatusCode::UNAUTHORIZED, Json(json!({"error": "Email atau password salah"})))
                    }
                }),
            )
            .route(
                "/api/auth/register",
                post(|Json(body): Json<Value>| async move {
                    if body["email"] == "taken@gkjw.com" {
                        (StatusCode::BAD_REQUEST, Json(json!({"error": "Email sudah terdaftar"})))
                    } else {
                        (StatusCode::CREATED, Json(json!({"data": {"id": "u9", "role": body["role"]}})))
                    }
                }),
            )
    }

    #[tokio::test]
    async fn test_login_success() {
        let client = BackendClient::new(spawn_backend(fake_auth()).await);
        let login = client
            .login(&Credentials {
                email: "admin@gkjw.com".to_string(),
                password: "admin123".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(login.token, "jwt-token");
        assert_eq!(login.user.role, Role::Admin);
        assert_eq!(login.user.email, "admin@gkjw.com");
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let client = BackendClient::new(spawn_backend(fake_auth()).await);
        let err = client
            .login(&Credentials {
                email: "admin@gkjw.com".to_string(),
                password: "nope".to_string(),
            })
            .await
            .unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(err.user_message("Login gagal"), "Email atau password salah");
    }

    #[tokio::test]
    async fn test_register() {
        let client = BackendClient::new(spawn_backend(fake_auth()).await);
        let request = RegisterRequest {
            name: "Sari".to_string(),
            email: "sari@gkjw.com".to_string(),
            password: "rahasia".to_string(),
            role: Role::Member,
        };
        client.register(&request).await.unwrap();

        let taken = RegisterRequest {
            email: "taken@gkjw.com".to_string(),
            ..request
        };
        let err = client.register(&taken).await.unwrap_err();
        assert_eq!(err.user_message("Register gagal. Silakan coba lagi."), "Email sudah terdaftar");
    }
}
