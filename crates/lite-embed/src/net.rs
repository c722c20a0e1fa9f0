//! HTTP fetches for provider metadata and scripts
//!
//! Blocking reqwest calls moved onto smol's blocking pool.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::EmbedError;

fn client(user_agent: &str) -> Result<reqwest::blocking::Client, EmbedError> {
    Ok(reqwest::blocking::Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .build()?)
}

fn get(url: &str, user_agent: &str) -> Result<reqwest::blocking::Response, EmbedError> {
    tracing::debug!("fetching {}", url);
    let response = client(user_agent)?.get(url).send()?;

    let status = response.status();
    if !status.is_success() {
        tracing::warn!("HTTP {} from {}", status.as_u16(), url);
        return Err(EmbedError::Http {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    Ok(response)
}

/// Fetch a body as text
pub async fn fetch_text(url: &str, user_agent: &str) -> Result<String, EmbedError> {
    let (url, user_agent) = (url.to_string(), user_agent.to_string());
    smol::unblock(move || -> Result<String, EmbedError> { Ok(get(&url, &user_agent)?.text()?) }).await
}

/// Fetch and decode a JSON body
pub async fn fetch_json<T>(url: &str, user_agent: &str) -> Result<T, EmbedError>
where
    T: DeserializeOwned + Send + 'static,
{
    let (url, user_agent) = (url.to_string(), user_agent.to_string());
    smol::unblock(move || -> Result<T, EmbedError> { Ok(get(&url, &user_agent)?.json::<T>()?) }).await
}
