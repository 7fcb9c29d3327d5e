pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use args::{CliConfig, KindArg};

#[cfg(feature = "cli")]
mod args {
    use crate::config::toml_config::{TomlConfig, DEFAULT_OUTPUT_FILE};
    use crate::core::{ConfigProvider, OutputFormat, RangeKind, RangeSpec};
    use crate::utils::error::Result;
    use crate::utils::validation::{
        validate_non_empty_string, validate_non_zero, validate_path, validate_required_field,
        Validate,
    };
    use clap::{Parser, ValueEnum};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
    pub enum KindArg {
        Numbers,
        Evens,
        Odds,
        Letters,
    }

    #[derive(Debug, Clone, Parser)]
    #[command(name = "rangekit")]
    #[command(about = "Print stepped integer and letter ranges")]
    pub struct CliConfig {
        /// Kind of range to print
        #[arg(long, value_enum, default_value = "numbers")]
        pub kind: KindArg,

        /// First value (numbers, evens, odds)
        #[arg(long, allow_hyphen_values = true)]
        pub from: Option<i32>,

        /// Last value, included when the step lands on it
        #[arg(long, allow_hyphen_values = true)]
        pub to: Option<i32>,

        /// Step size for numbers; the sign follows the range direction
        #[arg(long, allow_hyphen_values = true)]
        pub step: Option<i32>,

        /// First letter (letters)
        #[arg(long)]
        pub start: Option<char>,

        /// Last letter (letters)
        #[arg(long)]
        pub end: Option<char>,

        /// Swap the endpoints before printing
        #[arg(long)]
        pub reverse: bool,

        /// Output format: lines, csv or json
        #[arg(long)]
        pub format: Option<OutputFormat>,

        /// Leave out range headers (`# name` lines, CSV header row)
        #[arg(long)]
        pub no_headers: bool,

        /// TOML file with a batch of ranges; replaces the single-range flags
        #[arg(short, long)]
        pub config: Option<String>,

        /// Directory to write output into instead of stdout
        #[arg(long)]
        pub output_path: Option<String>,

        /// File name inside --output-path (default ranges.txt)
        #[arg(long)]
        pub output_file: Option<String>,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON")]
        pub json_logs: bool,
    }

    impl CliConfig {
        pub fn range_spec(&self) -> Result<RangeSpec> {
            let kind = match self.kind {
                KindArg::Letters => RangeKind::Letters {
                    start: *validate_required_field("start", &self.start)?,
                    end: *validate_required_field("end", &self.end)?,
                },
                KindArg::Numbers => RangeKind::Numbers {
                    from: *validate_required_field("from", &self.from)?,
                    to: *validate_required_field("to", &self.to)?,
                    step: self.step,
                },
                KindArg::Evens => RangeKind::Evens {
                    from: *validate_required_field("from", &self.from)?,
                    to: *validate_required_field("to", &self.to)?,
                },
                KindArg::Odds => RangeKind::Odds {
                    from: *validate_required_field("from", &self.from)?,
                    to: *validate_required_field("to", &self.to)?,
                },
            };

            Ok(RangeSpec::new(kind).reversed(self.reverse))
        }

        pub fn output_file(&self) -> &str {
            self.output_file.as_deref().unwrap_or(DEFAULT_OUTPUT_FILE)
        }

        /// 命令列參數覆蓋檔案設定
        pub fn apply_overrides(&self, toml_config: &mut TomlConfig) {
            if let Some(format) = self.format {
                toml_config.output.format = Some(format);
                tracing::info!("🔧 Output format overridden to: {}", format);
            }
            if self.no_headers {
                toml_config.output.headers = Some(false);
            }
            if let Some(path) = &self.output_path {
                toml_config.output.path = Some(path.clone());
                tracing::info!("🔧 Output path overridden to: {}", path);
            }
            if let Some(file) = &self.output_file {
                toml_config.output.file = Some(file.clone());
                tracing::info!("🔧 Output file overridden to: {}", file);
            }
        }
    }

    impl ConfigProvider for CliConfig {
        fn range_specs(&self) -> Result<Vec<RangeSpec>> {
            Ok(vec![self.range_spec()?])
        }

        fn output_format(&self) -> OutputFormat {
            self.format.unwrap_or_default()
        }

        fn include_headers(&self) -> bool {
            !self.no_headers
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            if let Some(path) = &self.output_path {
                validate_path("output_path", path)?;
            }
            if let Some(file) = &self.output_file {
                validate_non_empty_string("output_file", file)?;
            }

            // 批次模式下單一範圍參數會被忽略
            if self.config.is_some() {
                return Ok(());
            }
            if let Some(step) = self.step {
                validate_non_zero("step", step)?;
            }
            self.range_spec().map(|_| ())
        }
    }

}
