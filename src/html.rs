use std::path::Path;

use anyhow::Result;
use log::info;
use maud::{html, Markup, PreEscaped, Render, DOCTYPE};

use crate::pack::EmojiPack;

/// `<img src="..." />` with an escaped source.
fn image(src: &str) -> Markup {
    let src = src.render().into_string();
    PreEscaped(format!(r#"<img src="{src}" />"#))
}

/// Renders a preview page with one table row per emoji. Names and sources are escaped.
///
/// The header cells sit directly in `<thead>`, so every `<tr>` is an emoji.
pub fn render(pack: &EmojiPack) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { (pack.title) }
            }
            body {
                table {
                    thead {
                        th { "Name" }
                        th { "Image" }
                    }
                    tbody {
                        @for emoji in &pack.emojis {
                            tr {
                                td { (emoji.name) }
                                td { (image(&emoji.src)) }
                            }
                        }
                    }
                }
            }
        }
    }
}

pub async fn generate_page(pack: &EmojiPack, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    crate::fs::write_output(path, render(pack).into_string()).await?;
    info!("rendered {} emojis to `{}`", pack.emojis.len(), path.display());
    Ok(())
}
