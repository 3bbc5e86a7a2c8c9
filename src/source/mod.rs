//! Where dataset text comes from.
//!
//! [`DatasetSource`] is the async trait the analyzers read through.
//! [`FileSource`] reads a CSV from disk, transparently gunzipping `.gz` files.
//! [`InlineSource`] serves text already held in memory.

mod file;
mod inline;

pub use file::FileSource;
pub use inline::InlineSource;

use anyhow::Result;

/// Produces the raw CSV text of one dataset.
#[async_trait::async_trait]
pub trait DatasetSource: Send + Sync {
    /// Short human-readable label used in logs and error messages.
    fn describe(&self) -> String;

    /// Returns the full dataset text. Called once per report; nothing is cached.
    async fn load(&self) -> Result<String>;
}
