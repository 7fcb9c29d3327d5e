use crate::domain::model::{OutputFormat, RangeSpec};
use crate::utils::error::Result;
use std::io::Write;

pub trait Storage: Send + Sync {
    type Writer: Write;

    /// Opens `path` for writing, replacing any existing file.
    fn create_file(&self, path: &str) -> Result<Self::Writer>;

    fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let mut writer = self.create_file(path)?;
        writer.write_all(data)?;
        writer.flush()?;
        Ok(())
    }
}

/// Source of the ranges to render and how to render them.
pub trait ConfigProvider: Send + Sync {
    fn range_specs(&self) -> Result<Vec<RangeSpec>>;
    fn output_format(&self) -> OutputFormat;
    fn include_headers(&self) -> bool {
        true
    }
}
