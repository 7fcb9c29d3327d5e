use crate::core::{ConfigProvider, OutputFormat, RangeKind, RangeSpec};
use crate::utils::error::{RangeError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_non_zero, validate_path, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_OUTPUT_FILE: &str = "ranges.txt";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub ranges: Vec<RangeSpec>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
    pub headers: Option<bool>,
    pub path: Option<String>,
    pub file: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RangeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${RANGE_END})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RangeError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        if self.ranges.is_empty() {
            return Err(RangeError::MissingConfigError {
                field: "ranges".to_string(),
            });
        }

        if let Some(path) = &self.output.path {
            validate_path("output.path", path)?;
        }
        if let Some(file) = &self.output.file {
            validate_non_empty_string("output.file", file)?;
        }

        for (index, spec) in self.ranges.iter().enumerate() {
            if let Some(name) = &spec.name {
                validate_non_empty_string(&format!("ranges[{}].name", index), name)?;
            }
            if let RangeKind::Numbers {
                step: Some(step), ..
            } = spec.kind
            {
                validate_non_zero(&format!("ranges[{}].step", index), step)?;
            }
        }

        Ok(())
    }

    pub fn output_path(&self) -> Option<&str> {
        self.output.path.as_deref()
    }

    pub fn output_file(&self) -> &str {
        self.output.file.as_deref().unwrap_or(DEFAULT_OUTPUT_FILE)
    }
}

impl ConfigProvider for TomlConfig {
    fn range_specs(&self) -> Result<Vec<RangeSpec>> {
        Ok(self.ranges.clone())
    }

    fn output_format(&self) -> OutputFormat {
        self.output.format.unwrap_or_default()
    }

    fn include_headers(&self) -> bool {
        self.output.headers.unwrap_or(true)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
