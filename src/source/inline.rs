use anyhow::Result;

use super::DatasetSource;

/// A dataset already loaded into memory.
#[derive(Debug, Clone)]
pub struct InlineSource {
    text: String,
}

impl InlineSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait::async_trait]
impl DatasetSource for InlineSource {
    fn describe(&self) -> String {
        format!("inline ({} bytes)", self.text.len())
    }

    async fn load(&self) -> Result<String> {
        Ok(self.text.clone())
    }
}
