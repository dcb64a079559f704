use std::time::Duration;

use anyhow::Result;
use log::debug;
use reqwest::redirect::Policy;
use reqwest::StatusCode;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Redirects are not followed, a redirected probe must not count as found.
pub fn client(timeout: Duration) -> Result<reqwest::Client> {
    Ok(reqwest::ClientBuilder::new()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .redirect(Policy::none())
        .build()?)
}

/// Checks whether `url` exists by sending a `HEAD` request.
///
/// Only `200 OK` counts as existing. Transport failures are returned as errors.
pub async fn exists(client: &reqwest::Client, url: &str) -> Result<bool> {
    let status = client.head(url).send().await?.status();
    debug!("HEAD `{url}` -> {status}");
    Ok(status == StatusCode::OK)
}
