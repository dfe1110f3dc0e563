//! Thin JSON-over-HTTP wrapper used by the action layer.

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Error body shapes the server may return.
#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorPayload {
    Detailed { error: ErrorDetail },
    Plain { error: String },
}

#[derive(Deserialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    session: Option<String>,
}

impl HttpClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            session: None,
        })
    }

    /// Attach a session token to every request.
    pub fn with_session(mut self, token: impl Into<String>) -> Self {
        self.session = Some(token.into());
        self
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        debug!("{} {}", method, url);

        let builder = self.client.request(method, url);
        match &self.session {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub async fn get<R: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<R> {
        let response = self.request(Method::GET, path).query(query).send().await?;
        decode(response).await
    }

    pub async fn send_json<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ClientResult<R> {
        let response = self.request(method, path).json(body).send().await?;
        decode(response).await
    }

    pub async fn delete<R: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<R> {
        let response = self.request(Method::DELETE, path).query(query).send().await?;
        decode(response).await
    }
}

async fn decode<R: DeserializeOwned>(response: Response) -> ClientResult<R> {
    let status = response.status();
    let bytes = response.bytes().await?;

    if status.is_success() {
        return Ok(serde_json::from_slice(&bytes)?);
    }

    Err(api_error(status.as_u16(), &bytes))
}

fn api_error(status: u16, bytes: &[u8]) -> ClientError {
    match serde_json::from_slice::<ErrorPayload>(bytes) {
        Ok(ErrorPayload::Detailed { error }) => ClientError::Api {
            status,
            code: error.code,
            message: error.message,
        },
        Ok(ErrorPayload::Plain { error }) => ClientError::Api {
            status,
            code: String::new(),
            message: error,
        },
        Err(_) => ClientError::Api {
            status,
            code: String::new(),
            message: match serde_json::from_slice::<Value>(bytes) {
                Ok(Value::String(text)) => text,
                _ => String::from_utf8_lossy(bytes).trim().to_string(),
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detailed_error_body_is_decoded() {
        let body = br#"{"error":{"code":"MISSING_SESSION","message":"Missing session"}}"#;
        match api_error(400, body) {
            ClientError::Api { status, code, message } => {
                assert_eq!(status, 400);
                assert_eq!(code, "MISSING_SESSION");
                assert_eq!(message, "Missing session");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_plain_error_body_is_decoded() {
        let err = api_error(404, br#"{"error":"Account not found"}"#);
        assert_eq!(err.user_message(), "Account not found");
    }

    #[test]
    fn test_non_json_body_becomes_message() {
        let err = api_error(502, b"Bad Gateway\n");
        assert_eq!(err.user_message(), "Bad Gateway");
    }
}
