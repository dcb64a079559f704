use std::time::Duration;

use anyhow::Result;
use derive_builder::Builder;
use futures::{StreamExt, TryStreamExt};
use indicatif::ProgressBar;
use log::info;

use crate::hipchat::{Client, Emoticon, EmoticonType};
use crate::resolve;

pub const PAGE_SIZE: usize = 1000;
pub const PAGE_DELAY: Duration = Duration::from_millis(1000);
pub const DEFAULT_PARALLEL: usize = 8;

#[derive(Debug, Clone, Builder)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct FetchOptions {
    #[builder(default)]
    pub kind: EmoticonType,
    #[builder(default = "PAGE_SIZE")]
    pub page_size: usize,
    #[builder(default = "PAGE_DELAY")]
    pub page_delay: Duration,
    /// Max concurrent resolutions within one page
    #[builder(default = "DEFAULT_PARALLEL")]
    pub parallel: usize,
}

impl FetchOptions {
    pub fn builder() -> FetchOptionsBuilder {
        FetchOptionsBuilder::default()
    }
}

impl FetchOptionsBuilder {
    fn validate(&self) -> Result<(), String> {
        if self.page_size == Some(0) {
            Err("page size must be positive".to_string())
        } else if self.parallel == Some(0) {
            Err("parallelism must be positive".to_string())
        } else {
            Ok(())
        }
    }
}

/// An emoticon together with the best image url found for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedEmoticon {
    pub emoticon: Emoticon,
    pub large_url: String,
}

impl EnrichedEmoticon {
    pub async fn resolve(http: &reqwest::Client, emoticon: Emoticon) -> Result<Self> {
        let large_url = resolve::large_url(http, &emoticon.url).await?;
        Ok(Self {
            emoticon,
            large_url,
        })
    }
}

async fn enrich_page(
    client: &Client,
    page: Vec<Emoticon>,
    parallel: usize,
) -> Result<Vec<EnrichedEmoticon>> {
    futures::stream::iter(page)
        .map(|emoticon| EnrichedEmoticon::resolve(client.http(), emoticon))
        .buffered(parallel)
        .try_collect()
        .await
}

/// Walks every page of emoticons and resolves their large urls.
///
/// Pages are fetched one after another with `page_delay` in between, the walk
/// ends at the first page holding fewer than `page_size` items. Any failure
/// aborts the whole walk.
pub async fn fetch_emoticons(
    client: &Client,
    opt: &FetchOptions,
    progress: &ProgressBar,
) -> Result<Vec<EnrichedEmoticon>> {
    let mut emoticons = Vec::new();
    let mut start_index = 0;

    loop {
        let page = client
            .emoticons(opt.kind, start_index, opt.page_size)
            .await?;
        let is_last = page.len() < opt.page_size;

        let enriched = enrich_page(client, page, opt.parallel).await?;
        emoticons.extend(enriched);
        progress.set_message(format!("fetched {} emoticons", emoticons.len()));

        if is_last {
            break;
        }
        tokio::time::sleep(opt.page_delay).await;
        start_index += opt.page_size;
    }

    info!("fetched {} emoticons", emoticons.len());
    Ok(emoticons)
}
