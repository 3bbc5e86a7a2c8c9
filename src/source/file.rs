use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::DatasetSource;

/// Reads a dataset from the local filesystem.
///
/// Files ending in `.gz` are decompressed in memory before parsing.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_gzip(&self) -> bool {
        self.path.extension().and_then(|e| e.to_str()) == Some("gz")
    }
}

fn gunzip(bytes: &[u8]) -> Result<String> {
    let mut decoder = GzDecoder::new(bytes);
    let mut text = String::new();
    decoder.read_to_string(&mut text)?;
    Ok(text)
}

#[async_trait::async_trait]
impl DatasetSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn load(&self) -> Result<String> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("failed to read dataset '{}'", self.path.display()))?;
        debug!(
            path = %self.path.display(),
            bytes = bytes.len(),
            gzip = self.is_gzip(),
            "Dataset read"
        );

        if self.is_gzip() {
            gunzip(&bytes)
                .with_context(|| format!("failed to decompress dataset '{}'", self.path.display()))
        } else {
            String::from_utf8(bytes)
                .with_context(|| format!("dataset '{}' is not valid UTF-8", self.path.display()))
        }
    }
}
