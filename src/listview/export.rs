use super::Record;
use crate::error::{Error, Result};
use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// One exported column: header label plus the record field it reads.
#[derive(Debug, Clone, Copy)]
pub struct Column<F> {
    pub header: &'static str,
    pub field: F,
}

impl<F> Column<F> {
    pub const fn new(header: &'static str, field: F) -> Self {
        Self { header, field }
    }
}

/// Serializes `records` as CSV: a header line, then one line per record,
/// `\n` between lines and no trailing newline. Values containing commas,
/// quotes or line breaks are quoted per RFC 4180.
pub fn to_csv<'a, R, I>(records: I, columns: &[Column<R::Field>]) -> Result<String>
where
    R: Record + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .quote_style(QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer.write_record(columns.iter().map(|c| c.header))?;
    for record in records {
        writer.write_record(columns.iter().map(|c| record.value(c.field).to_string()))?;
    }

    let bytes = writer.into_inner().map_err(|e| Error::Io(e.into_error()))?;
    let mut text = String::from_utf8(bytes)
        .map_err(|e| Error::Validation(format!("export produced invalid UTF-8: {}", e)))?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

/// `<entity>-<YYYY-MM-DD>.csv`
pub fn export_filename(entity: &str, date: NaiveDate) -> String {
    format!("{}-{}.csv", entity, date.format("%Y-%m-%d"))
}

/// Host "save file" primitive that receives a finished export.
pub trait FileSink {
    fn save(&mut self, filename: &str, contents: &str) -> Result<()>;
}

/// Saves exports as files inside a directory.
#[derive(Debug, Clone)]
pub struct DirSink {
    dir: PathBuf,
}

impl DirSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl FileSink for DirSink {
    fn save(&mut self, filename: &str, contents: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(filename);
        fs::write(&path, contents)?;
        info!("Exported {} bytes to {}", contents.len(), path.display());
        Ok(())
    }
}
