use crate::core::{BuiltRange, OutputFormat, RenderedRange};
use crate::utils::error::{RangeError, Result};
use serde::{Serialize, Serializer};
use std::io::Write;

#[derive(Serialize)]
struct JsonRange<'a> {
    name: &'a str,
    range: &'a BuiltRange,
    values: JsonValues<'a>,
}

/// Serialises the values of a range as a sequence without collecting them.
struct JsonValues<'a>(&'a BuiltRange);

impl Serialize for JsonValues<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.values())
    }
}

pub struct Renderer {
    format: OutputFormat,
    include_headers: bool,
}

impl Renderer {
    pub fn new(format: OutputFormat, include_headers: bool) -> Self {
        Self {
            format,
            include_headers,
        }
    }

    /// Streams every range into `out`; memory use does not grow with range length.
    pub fn render<W: Write>(&self, ranges: &[RenderedRange], out: &mut W) -> Result<()> {
        tracing::debug!("Rendering {} ranges as {}", ranges.len(), self.format);
        match self.format {
            OutputFormat::Lines => self.render_lines(ranges, out),
            OutputFormat::Csv => self.render_csv(ranges, out),
            OutputFormat::Json => Self::render_json(ranges, out),
        }
    }

    pub fn render_to_string(&self, ranges: &[RenderedRange]) -> Result<String> {
        let mut buffer = Vec::new();
        self.render(ranges, &mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| RangeError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
    }

    fn render_lines<W: Write>(&self, ranges: &[RenderedRange], out: &mut W) -> Result<()> {
        for (position, rendered) in ranges.iter().enumerate() {
            // 範圍之間空一行
            if position > 0 {
                writeln!(out)?;
            }
            if self.include_headers {
                writeln!(out, "# {}", rendered.name)?;
            }
            for value in rendered.range.values() {
                writeln!(out, "{}", value)?;
            }
        }
        Ok(())
    }

    fn render_csv<W: Write>(&self, ranges: &[RenderedRange], out: &mut W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(out);
        if self.include_headers {
            writer.write_record(["name", "index", "value"])?;
        }

        for rendered in ranges {
            for (index, value) in rendered.range.values().enumerate() {
                let index = index.to_string();
                let value = value.to_string();
                writer.write_record([rendered.name.as_str(), index.as_str(), value.as_str()])?;
            }
        }

        writer.flush()?;
        Ok(())
    }

    fn render_json<W: Write>(ranges: &[RenderedRange], out: &mut W) -> Result<()> {
        let payload: Vec<JsonRange<'_>> = ranges
            .iter()
            .map(|rendered| JsonRange {
                name: &rendered.name,
                range: &rendered.range,
                values: JsonValues(&rendered.range),
            })
            .collect();

        serde_json::to_writer_pretty(&mut *out, &payload)?;
        writeln!(out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CharRange, IntRange};
    use std::io;

    /// Accepts `limit` bytes, then fails every write.
    struct CappedSink {
        written: usize,
        limit: usize,
    }

    impl Write for CappedSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.written >= self.limit {
                return Err(io::Error::other("sink full"));
            }
            let accepted = buf.len().min(self.limit - self.written);
            self.written += accepted;
            Ok(accepted)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn sample() -> Vec<RenderedRange> {
        vec![
            RenderedRange {
                name: "small".to_string(),
                range: BuiltRange::Int(IntRange::one_to(3)),
            },
            RenderedRange {
                name: "letters".to_string(),
                range: BuiltRange::Letters(CharRange::from_to('c', 'a').unwrap()),
            },
        ]
    }

    #[test]
    fn test_render_lines() {
        let output = Renderer::new(OutputFormat::Lines, true)
            .render_to_string(&sample())
            .unwrap();
        assert_eq!(output, "# small\n1\n2\n3\n\n# letters\nc\nb\na\n");

        let bare = Renderer::new(OutputFormat::Lines, false)
            .render_to_string(&sample())
            .unwrap();
        assert_eq!(bare, "1\n2\n3\n\nc\nb\na\n");
    }

    #[test]
    fn test_render_csv() {
        let output = Renderer::new(OutputFormat::Csv, true)
            .render_to_string(&sample())
            .unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "name,index,value");
        assert_eq!(lines[1], "small,0,1");
        assert_eq!(lines[6], "letters,2,a");
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn test_render_json() {
        let output = Renderer::new(OutputFormat::Json, true)
            .render_to_string(&sample())
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed[0]["name"], "small");
        assert_eq!(parsed[0]["range"]["type"], "int");
        assert_eq!(parsed[0]["range"]["step"], 1);
        assert_eq!(parsed[1]["values"], serde_json::json!(["c", "b", "a"]));
    }

    #[test]
    fn test_render_nothing() {
        let output = Renderer::new(OutputFormat::Lines, true)
            .render_to_string(&[])
            .unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn test_full_i32_range_streams_without_materialising() {
        let whole = vec![RenderedRange {
            name: "everything".to_string(),
            range: BuiltRange::Int(IntRange::from_to(i32::MIN, i32::MAX)),
        }];

        for format in [OutputFormat::Lines, OutputFormat::Csv, OutputFormat::Json] {
            let mut sink = CappedSink {
                written: 0,
                limit: 64 * 1024,
            };
            let result = Renderer::new(format, true).render(&whole, &mut sink);

            assert!(result.is_err(), "{} should stop at the full sink", format);
            assert_eq!(sink.written, sink.limit);
        }
    }

    #[test]
    fn test_render_streams_first_values_in_order() {
        let whole = vec![RenderedRange {
            name: "everything".to_string(),
            range: BuiltRange::Int(IntRange::from_to(i32::MIN, i32::MAX)),
        }];
        let mut sink = CappedSink {
            written: 0,
            limit: 0,
        };
        assert!(matches!(
            Renderer::new(OutputFormat::Lines, false).render(&whole, &mut sink),
            Err(RangeError::IoError(_))
        ));

        let mut buffer = [0u8; 36];
        let mut cursor = io::Cursor::new(&mut buffer[..]);
        let result = Renderer::new(OutputFormat::Lines, false).render(&whole, &mut cursor);
        assert!(matches!(result, Err(RangeError::IoError(_))));
        assert_eq!(
            std::str::from_utf8(&buffer).unwrap(),
            "-2147483648\n-2147483647\n-2147483646\n"
        );
    }
}
