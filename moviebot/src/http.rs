use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::{config::ServiceConfig, error::ClientError};

/// Build the HTTP client shared by the TMDB and YouTube clients
pub fn build_client(config: &ServiceConfig) -> Result<Client, ClientError> {
    Ok(Client::builder()
        .timeout(config.http_timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

/// Join a base URL and a path without doubling up slashes
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Send the request and decode a JSON body, mapping any non-success status to an error
pub(crate) async fn get_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ClientError> {
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ClientError::Status(status));
    }
    Ok(response.json().await?)
}
