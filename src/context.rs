use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use indicatif::ProgressBar;
use log::info;
use structopt::clap;
use structopt::StructOpt;

use crate::config::Config;
use crate::fetch::{fetch_emoticons, FetchOptions};
use crate::hipchat::{self, EmoticonType};
use crate::html;
use crate::opt::Opt;
use crate::pack::EmojiPack;

#[derive(Debug, Clone)]
pub struct Context {
    pub opt: Arc<Opt>,
    pub config: Arc<Config>,
}

fn spinner() -> ProgressBar {
    let progress = ProgressBar::new_spinner();
    progress.enable_steady_tick(Duration::from_millis(120));
    progress.set_message("fetching emoticons");
    progress
}

impl Context {
    pub fn new(opt: Opt, config: Config) -> Context {
        Context {
            opt: Arc::new(opt),
            config: Arc::new(config),
        }
    }

    /// Parses `args`; usage errors and help requests come back as `clap::Error`.
    pub fn from_iter_safe<I>(args: I, config: Config) -> Result<Context, clap::Error>
    where
        I: IntoIterator,
        I::Item: Into<OsString> + Clone,
    {
        Ok(Self::new(Opt::from_iter_safe(args)?, config))
    }

    /// Runs the parsed command, returning the path that was written.
    pub async fn run(&self) -> Result<PathBuf> {
        match self.opt.as_ref() {
            Opt::Dump {
                output,
                token,
                kind,
            } => {
                self.dump(token, *kind, output).await?;
                info!("dumped: {}", output.display());
                Ok(output.clone())
            }
            Opt::Html { input, output } => {
                self.html(input, output).await?;
                info!("generated: {}", output.display());
                Ok(output.clone())
            }
        }
    }

    pub fn fetch_options(&self, kind: EmoticonType) -> Result<FetchOptions> {
        Ok(FetchOptions::builder()
            .kind(kind)
            .parallel(self.config.parallel)
            .build()?)
    }

    pub async fn dump(&self, token: &str, kind: EmoticonType, output: &Path) -> Result<()> {
        info!("fetching...");
        let http = crate::http::client(self.config.http_timeout)?;
        let client = hipchat::Client::new(http, &self.config.api_url, token);
        let opt = self.fetch_options(kind)?;

        let progress = spinner();
        let emoticons = fetch_emoticons(&client, &opt, &progress).await;
        progress.finish_and_clear();

        EmojiPack::from_emoticons(&emoticons?).save(output).await
    }

    pub async fn html(&self, input: &Path, output: &Path) -> Result<()> {
        let pack = EmojiPack::load(input).await?;
        html::generate_page(&pack, output).await
    }
}

#[cfg(test)]
mod tests {
    use mockito::{Matcher, Server};

    use super::*;
    use crate::hipchat::tests::{emoticon, page_body};

    fn config(api_url: &str) -> Config {
        Config {
            api_url: api_url.to_string(),
            http_timeout: Duration::from_secs(5),
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn missing_token_makes_no_request() {
        let mut server = Server::new_async().await;
        let list = server
            .mock("GET", Matcher::Any)
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;
        let probe = server
            .mock("HEAD", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let err = Context::from_iter_safe(["emojipack", "dump"], config(&server.url()))
            .unwrap_err();

        assert_eq!(err.kind, clap::ErrorKind::MissingRequiredArgument);
        list.assert_async().await;
        probe.assert_async().await;
    }

    #[tokio::test]
    async fn dump_then_html() {
        let mut server = Server::new_async().await;
        let base = server.url();
        let items = vec![emoticon(1, &base), emoticon(2, &base)];
        let page = server
            .mock("GET", "/emoticon")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("start-index".into(), "0".into()),
                Matcher::UrlEncoded("max-results".into(), "1000".into()),
                Matcher::UrlEncoded("type".into(), "all".into()),
            ]))
            .match_header("authorization", "Bearer t0ken")
            .with_header("content-type", "application/json")
            .with_body(page_body(&items))
            .expect(1)
            .create_async()
            .await;
        let large = server
            .mock("HEAD", "/img/2@2x.png")
            .with_status(200)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let yaml_path = dir.path().join("emoji.yml");
        let html_path = dir.path().join("emoji.html");

        let dump = Context::from_iter_safe(
            [
                "emojipack".to_string(),
                "dump".to_string(),
                "--token=t0ken".to_string(),
                "--type=all".to_string(),
                format!("--output={}", yaml_path.display()),
            ],
            config(&base),
        )
        .unwrap();
        assert_eq!(dump.run().await.unwrap(), yaml_path);
        page.assert_async().await;
        large.assert_async().await;

        let pack = EmojiPack::load(&yaml_path).await.unwrap();
        assert_eq!(pack.title, "HipChat");
        assert_eq!(pack.emojis.len(), 2);
        assert_eq!(pack.emojis[0].name, "emo1");
        assert_eq!(pack.emojis[0].src, format!("{base}/img/1.png"));
        assert_eq!(pack.emojis[1].src, format!("{base}/img/2@2x.png"));

        let html = Context::from_iter_safe(
            [
                "emojipack".to_string(),
                "html".to_string(),
                format!("--input={}", yaml_path.display()),
                format!("--output={}", html_path.display()),
            ],
            config(&base),
        )
        .unwrap();
        assert_eq!(html.run().await.unwrap(), html_path);

        let page = tokio::fs::read_to_string(&html_path).await.unwrap();
        assert_eq!(page.matches("<tr>").count(), pack.emojis.len());
    }

    #[tokio::test]
    async fn rejected_dump_writes_nothing() {
        let mut server = Server::new_async().await;
        let _page = server
            .mock("GET", "/emoticon")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body(r#"{"error":{"code":401,"message":"Invalid OAuth session","type":"Unauthorized"}}"#)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let yaml_path = dir.path().join("emoji.yml");
        let ctx = Context::new(
            Opt::Dump {
                output: yaml_path.clone(),
                token: "expired".to_string(),
                kind: EmoticonType::Group,
            },
            config(&server.url()),
        );

        let err = ctx.run().await.unwrap_err();

        assert!(err.to_string().contains("Invalid OAuth session"));
        assert!(tokio::fs::metadata(&yaml_path).await.is_err());
    }
}
