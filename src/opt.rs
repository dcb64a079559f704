use std::path::PathBuf;

use structopt::clap::AppSettings;
use structopt::StructOpt;
use thiserror::Error;

use crate::hipchat::EmoticonType;

#[derive(Error, Debug)]
pub enum FilePathParseError {
    #[error("couldn't fetch metadata: {0}")]
    NoMetadata(#[from] std::io::Error),
    #[error("doesn't correspond to a file")]
    InvalidType,
}

fn valid_file_path<P>(src: P) -> Result<PathBuf, FilePathParseError>
where
    P: AsRef<str>,
{
    let path = PathBuf::from(src.as_ref());
    let meta = path.metadata()?;
    if !meta.is_file() {
        Err(FilePathParseError::InvalidType)
    } else {
        Ok(path)
    }
}

fn non_empty(src: &str) -> Result<String, &'static str> {
    let src = src.trim();
    if src.is_empty() {
        Err("must not be empty")
    } else {
        Ok(src.to_string())
    }
}

#[derive(Debug, StructOpt)]
#[structopt(
    name = "emojipack",
    about = "Dump HipChat emoticons as an emoji pack.",
    setting = AppSettings::SubcommandRequiredElseHelp
)]
pub enum Opt {
    /// Dump HipChat emoticons to a YAML emoji pack
    Dump {
        /// Output file path
        #[structopt(long, default_value = "./emoji.yml")]
        output: PathBuf,

        /// HipChat API token
        #[structopt(long, parse(try_from_str = non_empty))]
        token: String,

        /// HipChat emoticon type
        #[structopt(
            long = "type",
            default_value = "group",
            possible_values = &EmoticonType::VARIANTS
        )]
        kind: EmoticonType,
    },
    /// Generate an HTML preview page from a dumped emoji pack
    Html {
        /// Input YAML file path
        #[structopt(long, default_value = "./emoji.yml", parse(try_from_str = valid_file_path))]
        input: PathBuf,

        /// Output file path
        #[structopt(long, default_value = "./emoji.html")]
        output: PathBuf,
    },
}
