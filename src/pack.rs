use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};

use crate::fetch::EnrichedEmoticon;

pub const TITLE: &str = "HipChat";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiRecord {
    pub name: String,
    pub src: String,
}

impl From<&EnrichedEmoticon> for EmojiRecord {
    fn from(emoticon: &EnrichedEmoticon) -> Self {
        Self {
            name: emoticon.emoticon.shortcut.clone(),
            src: emoticon.large_url.trim().to_string(),
        }
    }
}

/// An emoji pack definition, as consumed by emoji-pack importers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiPack {
    pub title: String,
    pub emojis: Vec<EmojiRecord>,
}

impl EmojiPack {
    pub fn from_emoticons(emoticons: &[EnrichedEmoticon]) -> Self {
        Self {
            title: TITLE.to_string(),
            emojis: emoticons.iter().map(EmojiRecord::from).collect(),
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        crate::fs::write_output(path, self.to_yaml()?).await?;
        info!("saved {} emojis to `{}`", self.emojis.len(), path.display());
        Ok(())
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("couldn't read `{}`", path.display()))?;
        Self::from_yaml(&data).with_context(|| format!("couldn't parse `{}`", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hipchat::Emoticon;

    fn enriched(shortcut: &str, large_url: &str) -> EnrichedEmoticon {
        EnrichedEmoticon {
            emoticon: Emoticon {
                id: 1,
                shortcut: shortcut.to_string(),
                url: "https://x/base.png".to_string(),
                links: None,
            },
            large_url: large_url.to_string(),
        }
    }

    #[test]
    fn records_keep_order_and_trim_src() {
        let pack = EmojiPack::from_emoticons(&[
            enriched("smile", " https://x/smile@4x.png\n"),
            enriched("allthethings", "https://x/att@2x.png"),
        ]);

        assert_eq!(pack.title, "HipChat");
        assert_eq!(
            pack.emojis,
            vec![
                EmojiRecord {
                    name: "smile".to_string(),
                    src: "https://x/smile@4x.png".to_string(),
                },
                EmojiRecord {
                    name: "allthethings".to_string(),
                    src: "https://x/att@2x.png".to_string(),
                },
            ]
        );
    }

    #[test]
    fn yaml_is_block_style_with_title_first() {
        let pack = EmojiPack::from_emoticons(&[enriched("smile", "https://x/s@4x.png")]);
        let yaml = pack.to_yaml().unwrap();

        assert!(yaml.starts_with("title: HipChat\n"));
        assert!(yaml.contains("emojis:\n- name: smile\n"));
        assert!(!yaml.contains('{') && !yaml.contains('['));
        assert_eq!(EmojiPack::from_yaml(&yaml).unwrap(), pack);
    }

    #[test]
    fn empty_pack_serializes() {
        let yaml = EmojiPack::from_emoticons(&[]).to_yaml().unwrap();
        assert_eq!(EmojiPack::from_yaml(&yaml).unwrap().emojis.len(), 0);
    }

    #[tokio::test]
    async fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("emoji.yml");
        let pack = EmojiPack::from_emoticons(&[
            enriched("smile", "https://x/s@4x.png"),
            enriched("wat", "https://x/wat.gif"),
        ]);

        pack.save(&path).await.unwrap();

        assert_eq!(EmojiPack::load(&path).await.unwrap(), pack);
    }

    #[tokio::test]
    async fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = EmojiPack::load(dir.path().join("nope.yml"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("couldn't read"));
    }
}
