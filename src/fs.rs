use std::path::Path;

use anyhow::{Context, Result};
use simple_error::simple_error;

pub async fn assert_dir(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    match tokio::fs::metadata(path).await {
        Ok(meta) => {
            if meta.is_dir() {
                Ok(())
            } else {
                Err(simple_error!("`{}` exists but is not a directory", path.display()).into())
            }
        }
        Err(_) => Ok(tokio::fs::create_dir_all(path).await?),
    }
}

/// Overwrites `path` with `data`, creating missing parent directories.
pub async fn write_output(path: impl AsRef<Path>, data: impl AsRef<[u8]>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        assert_dir(parent).await?;
    }
    tokio::fs::write(path, data)
        .await
        .with_context(|| format!("couldn't write `{}`", path.display()))
}
