// Backend API HTTP client.
// Handles authentication headers and response status mapping.

use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT},
};

use crate::error::{Result, StockroomError};

const CLIENT_USER_AGENT: &str = "stockroom-client";

/// REST client for the back-office backend.
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `base_url` with the given bearer token.
    pub fn new(base_url: impl Into<String>, token: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();

        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| StockroomError::Other(e.to_string()))?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(StockroomError::Api)?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    /// Create a client from the STOCKROOM_API_URL and STOCKROOM_TOKEN
    /// environment variables.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("STOCKROOM_API_URL").map_err(|_| {
            StockroomError::Other("missing STOCKROOM_API_URL environment variable".to_string())
        })?;
        let token = std::env::var("STOCKROOM_TOKEN").map_err(|_| StockroomError::MissingToken)?;
        Self::new(base_url, &token)
    }

    /// Make a GET request to the backend API.
    pub async fn get(&self, endpoint: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url, endpoint);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(StockroomError::Api)?;

        self.check_response(response).await
    }

    /// Check response status and convert errors.
    async fn check_response(&self, response: Response) -> Result<Response> {
        match response.status() {
            StatusCode::OK | StatusCode::CREATED | StatusCode::ACCEPTED => Ok(response),
            StatusCode::UNAUTHORIZED => Err(StockroomError::Unauthorized),
            StatusCode::NOT_FOUND => {
                let url = response.url().to_string();
                Err(StockroomError::NotFound(url))
            }
            status => Err(StockroomError::Other(format!(
                "HTTP {}: {}",
                status,
                response.text().await.unwrap_or_default()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("https://api.example.test/", "token").unwrap();
        assert_eq!(client.base_url, "https://api.example.test");
    }
}
