use crate::core::render::Renderer;
use crate::core::{ConfigProvider, RenderedRange, Storage};
use crate::utils::error::Result;
use std::io::{BufWriter, Write};

pub struct RangeEngine<C: ConfigProvider> {
    config: C,
}

impl<C: ConfigProvider> RangeEngine<C> {
    pub fn new(config: C) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// Builds every configured range, stopping at the first invalid one.
    pub fn build(&self) -> Result<Vec<RenderedRange>> {
        let specs = self.config.range_specs()?;
        tracing::info!("Building {} range(s)", specs.len());

        let mut ranges = Vec::with_capacity(specs.len());
        for (index, spec) in specs.iter().enumerate() {
            let range = spec.build().inspect_err(|e| {
                tracing::error!("❌ Range #{} ({}) is invalid: {}", index, spec.label(), e);
            })?;
            tracing::debug!("Range #{} {} -> {} values", index, range, range.len());
            ranges.push(RenderedRange {
                name: spec.label(),
                range,
            });
        }

        Ok(ranges)
    }

    fn renderer(&self) -> Renderer {
        Renderer::new(self.config.output_format(), self.config.include_headers())
    }

    /// Builds and streams the rendered ranges into `out`.
    pub fn run_into<W: Write>(&self, out: &mut W) -> Result<()> {
        let ranges = self.build()?;
        self.renderer().render(&ranges, out)?;
        out.flush()?;
        tracing::info!(
            "✅ Rendered {} range(s) as {}",
            ranges.len(),
            self.config.output_format()
        );
        Ok(())
    }

    /// Renders into memory; meant for small outputs and tests.
    pub fn run(&self) -> Result<String> {
        let ranges = self.build()?;
        self.renderer().render_to_string(&ranges)
    }

    /// Streams the rendered ranges into `file_name` in `storage`.
    pub fn run_to<S: Storage>(&self, storage: &S, file_name: &str) -> Result<()> {
        let mut writer = BufWriter::new(storage.create_file(file_name)?);
        self.run_into(&mut writer)?;
        tracing::info!("📁 Output saved to: {}", file_name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{OutputFormat, RangeKind, RangeSpec};
    use crate::utils::error::RangeError;
    use std::collections::HashMap;
    use std::io;
    use std::sync::{Arc, Mutex};

    struct StaticConfig {
        specs: Vec<RangeSpec>,
        format: OutputFormat,
    }

    impl ConfigProvider for StaticConfig {
        fn range_specs(&self) -> Result<Vec<RangeSpec>> {
            Ok(self.specs.clone())
        }

        fn output_format(&self) -> OutputFormat {
            self.format
        }
    }

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let mut data = self
                .0
                .lock()
                .map_err(|_| io::Error::other("buffer lock poisoned"))?;
            data.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, SharedBuffer>>>,
    }

    impl MockStorage {
        fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().ok()?;
            let buffer = files.get(path)?.0.lock().ok()?;
            Some(buffer.clone())
        }
    }

    impl Storage for MockStorage {
        type Writer = SharedBuffer;

        fn create_file(&self, path: &str) -> Result<SharedBuffer> {
            let mut files = self
                .files
                .lock()
                .map_err(|_| RangeError::ConfigError {
                    message: "storage lock poisoned".to_string(),
                })?;
            let buffer = SharedBuffer::default();
            files.insert(path.to_string(), buffer.clone());
            Ok(buffer)
        }
    }

    #[test]
    fn test_run_renders_all_specs() {
        let engine = RangeEngine::new(StaticConfig {
            specs: vec![
                RangeSpec::new(RangeKind::Evens { from: 0, to: 4 }).named("evens"),
                RangeSpec::new(RangeKind::Letters {
                    start: 'x',
                    end: 'z',
                }),
            ],
            format: OutputFormat::Lines,
        });

        let output = engine.run().unwrap();
        assert_eq!(output, "# evens\n0\n2\n4\n\n# letters x..z\nx\ny\nz\n");
    }

    #[test]
    fn test_first_invalid_spec_fails_the_run() {
        let engine = RangeEngine::new(StaticConfig {
            specs: vec![
                RangeSpec::new(RangeKind::Numbers {
                    from: 1,
                    to: 3,
                    step: None,
                }),
                RangeSpec::new(RangeKind::Evens { from: 3, to: 3 }),
            ],
            format: OutputFormat::Csv,
        });

        assert!(matches!(engine.run(), Err(RangeError::NoValues { .. })));
    }

    #[test]
    fn test_run_to_writes_storage() {
        let storage = MockStorage::default();
        let engine = RangeEngine::new(StaticConfig {
            specs: vec![RangeSpec::new(RangeKind::Numbers {
                from: 3,
                to: 1,
                step: None,
            })],
            format: OutputFormat::Json,
        });

        engine.run_to(&storage, "ranges.json").unwrap();
        let written = String::from_utf8(storage.get_file("ranges.json").unwrap()).unwrap();
        assert_eq!(written, engine.run().unwrap());
        assert!(written.contains("\"numbers 3..1\""));
    }
}
