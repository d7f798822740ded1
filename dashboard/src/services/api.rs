//! # API Client
//!
//! Thin reqwest wrapper around the `/api` endpoints. It attaches the
//! session's bearer token, unwraps the `ApiResponse` envelope and turns
//! every failure into a [`ServiceError`]:
//!
//! | failure | error |
//! |---|---|
//! | connection refused, timeout | `Network` |
//! | 401 | `Unauthorized` |
//! | 400 carrying field errors | `Validation` |
//! | any other non-2xx | `Http { status, message }` |
//! | body that is not the expected JSON | `Decode` |

use church_admin_core::domain::ServiceError;
use log::{debug, warn};
use reqwest::{multipart::Form, Client, Method, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use shared::ApiResponse;

use super::session::SessionStore;
use crate::config::DashboardConfig;

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: SessionStore,
}

fn transport_error(error: reqwest::Error) -> ServiceError {
    if error.is_timeout() {
        ServiceError::Network(format!("Request timed out: {}", error))
    } else if error.is_decode() {
        ServiceError::Decode(error.to_string())
    } else {
        ServiceError::Network(error.to_string())
    }
}

/// Error for a non-2xx response, using the envelope's message when the
/// body carries one
pub(crate) fn status_error(status: StatusCode, body: &[u8]) -> ServiceError {
    let envelope = serde_json::from_slice::<ApiResponse<Value>>(body).ok();
    let message = envelope
        .as_ref()
        .and_then(|envelope| envelope.message.clone())
        .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));
    let field_errors = envelope
        .and_then(|envelope| envelope.errors)
        .unwrap_or_default();

    match status {
        StatusCode::UNAUTHORIZED => ServiceError::Unauthorized(message),
        StatusCode::BAD_REQUEST if !field_errors.is_empty() => {
            ServiceError::Validation(field_errors)
        }
        _ => ServiceError::Http {
            status: status.as_u16(),
            message,
        },
    }
}

impl ApiClient {
    pub fn new(config: &DashboardConfig, session: SessionStore) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(transport_error)?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        debug!("{} {}", method, url);
        let builder = self.client.request(method, url);
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send and return the raw body of a successful response
    async fn send_raw(&self, builder: RequestBuilder) -> Result<Vec<u8>, ServiceError> {
        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(transport_error)?;
        if !status.is_success() {
            let error = status_error(status, &body);
            warn!("API request failed ({}): {}", status.as_u16(), error);
            return Err(error);
        }
        Ok(body.to_vec())
    }

    async fn send_envelope<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<ApiResponse<T>, ServiceError> {
        let body = self.send_raw(builder).await?;
        let envelope: ApiResponse<T> = serde_json::from_slice(&body)
            .map_err(|e| ServiceError::Decode(format!("Unexpected response body: {}", e)))?;
        if !envelope.success {
            return Err(ServiceError::Http {
                status: StatusCode::OK.as_u16(),
                message: envelope
                    .message
                    .unwrap_or_else(|| "Request was not successful".to_string()),
            });
        }
        Ok(envelope)
    }

    async fn send_data<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ServiceError> {
        self.send_envelope(builder)
            .await?
            .data
            .ok_or_else(|| ServiceError::Decode("Response envelope has no data".to_string()))
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T, ServiceError> {
        self.send_data(self.request(Method::GET, path).query(query))
            .await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ServiceError> {
        self.send_data(self.request(Method::POST, path).json(body))
            .await
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ServiceError> {
        self.send_data(self.request(Method::PUT, path).json(body))
            .await
    }

    pub async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ServiceError> {
        self.send_data(self.request(Method::PATCH, path).json(body))
            .await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ServiceError> {
        self.send_envelope::<Value>(self.request(Method::DELETE, path))
            .await
            .map(|_| ())
    }

    /// Raw bytes of a non-JSON endpoint such as a CSV export
    pub async fn download(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<Vec<u8>, ServiceError> {
        self.send_raw(self.request(Method::GET, path).query(query))
            .await
    }

    pub async fn upload<T: DeserializeOwned>(&self, path: &str, form: Form) -> Result<T, ServiceError> {
        self.send_data(self.request(Method::POST, path).multipart(form))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_uses_envelope_message() {
        let body = br#"{"success":false,"message":"Member not found"}"#;
        assert_eq!(
            status_error(StatusCode::NOT_FOUND, body),
            ServiceError::Http {
                status: 404,
                message: "Member not found".to_string()
            }
        );
    }

    #[test]
    fn test_status_error_classification() {
        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED, b""),
            ServiceError::Unauthorized(_)
        ));

        let body = br#"{"success":false,"message":"Validation failed","errors":["Name is required"]}"#;
        assert_eq!(
            status_error(StatusCode::BAD_REQUEST, body),
            ServiceError::Validation(vec!["Name is required".to_string()])
        );

        let error = status_error(StatusCode::BAD_GATEWAY, b"<html>bad gateway</html>");
        assert_eq!(error.to_string(), "Request failed with status 502");
        assert!(error.is_retryable());
    }

    #[test]
    fn test_urls_join_cleanly() {
        let config = DashboardConfig::default().with_base_url("http://localhost:3000/");
        let client = ApiClient::new(&config, SessionStore::ephemeral()).unwrap();
        assert_eq!(client.url("/members"), "http://localhost:3000/api/members");
        assert_eq!(
            client.url("giving/donations/donation_1"),
            "http://localhost:3000/api/giving/donations/donation_1"
        );
    }

    #[tokio::test]
    async fn test_unreachable_server_is_a_network_error() {
        let config = DashboardConfig {
            request_timeout_ms: 500,
            ..DashboardConfig::default()
        }
        .with_base_url("http://127.0.0.1:9");
        let client = ApiClient::new(&config, SessionStore::ephemeral()).unwrap();
        let error = client
            .get::<Value>("health", &[])
            .await
            .unwrap_err();
        assert!(matches!(error, ServiceError::Network(_)));
    }
}
