//! Record writers for the command-line front end

use std::io::Write;

use html_escape::encode_text;

use crate::types::EnrichedRecord;

/// Output format selectable from the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One JSON object per line
    #[default]
    Json,
    /// An HTML table with one row per package
    Html,
}

/// Destination for enriched records, written one at a time as they arrive
pub trait RecordWriter {
    fn write_record(&mut self, record: &EnrichedRecord) -> std::io::Result<()>;

    /// Write any trailer and flush
    fn finish(&mut self) -> std::io::Result<()>;
}

/// Create the writer for `format` on top of `out`
pub fn writer_for<'a, W: Write + 'a>(format: OutputFormat, out: W) -> Box<dyn RecordWriter + 'a> {
    match format {
        OutputFormat::Json => Box::new(JsonLinesWriter::new(out)),
        OutputFormat::Html => Box::new(HtmlTableWriter::new(out)),
    }
}

pub struct JsonLinesWriter<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RecordWriter for JsonLinesWriter<W> {
    fn write_record(&mut self, record: &EnrichedRecord) -> std::io::Result<()> {
        serde_json::to_writer(&mut self.out, record)?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }

    fn finish(&mut self) -> std::io::Result<()> {
        self.out.flush()
    }
}

/// Writes a `<table>` whose header is emitted lazily with the first row
pub struct HtmlTableWriter<W: Write> {
    out: W,
    header_written: bool,
}

impl<W: Write> HtmlTableWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            header_written: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_header(&mut self) -> std::io::Result<()> {
        if self.header_written {
            return Ok(());
        }
        self.header_written = true;
        writeln!(self.out, "<table id=\"packageTable\">")?;
        writeln!(
            self.out,
            "<thead><tr><th>Package</th><th>Current Version</th><th>Latest Version</th><th>Vulnerabilities</th><th>What's New</th></tr></thead>"
        )?;
        writeln!(self.out, "<tbody>")
    }
}

impl<W: Write> RecordWriter for HtmlTableWriter<W> {
    fn write_record(&mut self, record: &EnrichedRecord) -> std::io::Result<()> {
        self.write_header()?;
        writeln!(
            self.out,
            "<tr><td width=\"20%\">{}</td><td width=\"10%\">{}</td><td width=\"10%\">{}</td><td width=\"10%\">{}</td><td width=\"50%\"><div class=\"markdown-body\">{}</div></td></tr>",
            encode_text(&record.name),
            encode_text(&record.declared_version),
            encode_text(&record.latest_version),
            encode_text(&record.vulnerability_status),
            record.changelog_html,
        )?;
        self.out.flush()
    }

    fn finish(&mut self) -> std::io::Result<()> {
        self.write_header()?;
        writeln!(self.out, "</tbody>\n</table>")?;
        self.out.flush()
    }
}
