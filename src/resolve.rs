use anyhow::Result;
use lazy_regex::regex_captures;
use log::{debug, warn};

use crate::http;

/// Scale suffixes probed before falling back to the base image, highest first.
pub const SCALES: [u32; 2] = [4, 2];

/// Builds the `<prefix>@<scale>x.<ext>` candidates for `url`, in probing order.
///
/// Returns nothing when the url has no file extension to split on.
pub fn candidate_urls(url: &str) -> Vec<String> {
    match regex_captures!(r"^(.*)\.([^./]+)$", url) {
        Some((_, prefix, ext)) => SCALES
            .iter()
            .map(|scale| format!("{prefix}@{scale}x.{ext}"))
            .collect(),
        None => Vec::new(),
    }
}

/// Returns the highest resolution variant of `url` that exists, or `url` itself.
pub async fn large_url(client: &reqwest::Client, url: &str) -> Result<String> {
    for candidate in candidate_urls(url) {
        match http::exists(client, &candidate).await {
            Ok(true) => {
                debug!("found large variant `{candidate}`");
                return Ok(candidate);
            }
            Ok(false) => continue,
            Err(err) => {
                warn!("couldn't probe `{candidate}`: {err}");
                return Err(err);
            }
        }
    }
    debug!("no large variant for `{url}`");
    Ok(url.to_string())
}
