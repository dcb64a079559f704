use std::fmt::Display;
use std::str::FromStr;

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://api.hipchat.com/v2";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("hipchat rejected the request ({status} {kind}): {message}")]
    Rejected {
        status: u16,
        kind: String,
        message: String,
    },
    #[error("unexpected response ({status}): {body}")]
    Decode { status: u16, body: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmoticonType {
    All,
    #[default]
    Group,
    Global,
}

impl EmoticonType {
    pub const VARIANTS: [&'static str; 3] = ["all", "group", "global"];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmoticonType::All => "all",
            EmoticonType::Group => "group",
            EmoticonType::Global => "global",
        }
    }
}

impl Display for EmoticonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmoticonType {
    type Err = simple_error::SimpleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(EmoticonType::All),
            "group" => Ok(EmoticonType::Group),
            "global" => Ok(EmoticonType::Global),
            other => Err(simple_error::simple_error!(
                "unknown emoticon type `{}`",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    #[serde(rename = "self")]
    pub self_: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emoticon {
    pub id: u64,
    pub shortcut: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
}

/// One page of `GET /emoticon`; paging metadata and links are ignored.
#[derive(Debug, Deserialize)]
pub struct EmoticonPage {
    pub items: Vec<Emoticon>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
    #[serde(rename = "type", default)]
    kind: String,
}

#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    api_url: String,
    token: String,
}

impl Client {
    pub fn new(http: reqwest::Client, api_url: &str, token: &str) -> Client {
        Client {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Fetches one page of emoticons starting at `start_index`.
    pub async fn emoticons(
        &self,
        kind: EmoticonType,
        start_index: usize,
        max_results: usize,
    ) -> Result<Vec<Emoticon>, ApiError> {
        let response = self
            .http
            .get(format!("{}/emoticon", self.api_url))
            .bearer_auth(&self.token)
            .query(&[
                ("max-results", max_results.to_string()),
                ("start-index", start_index.to_string()),
                ("type", kind.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(match serde_json::from_str::<ErrorBody>(&body) {
                Ok(ErrorBody { error }) => ApiError::Rejected {
                    status: status.as_u16(),
                    kind: error.kind,
                    message: error.message,
                },
                Err(_) => ApiError::Decode {
                    status: status.as_u16(),
                    body,
                },
            });
        }

        let page: EmoticonPage =
            serde_json::from_str(&body).map_err(|_| ApiError::Decode {
                status: status.as_u16(),
                body,
            })?;
        info!(
            "got {} emoticons starting at {start_index}",
            page.items.len()
        );
        Ok(page.items)
    }
}
