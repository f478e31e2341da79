//! Append-only CSV record store, one file per entity.
//!
//! There is no locking: concurrent appends to the same file rely on the filesystem's own
//! append semantics.

use serde_json::{Map, Value};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use crate::entities::{Entity, EntitySchema};
use crate::error::AppError;
use crate::submission::Record;

/// One listed row: header name to cell value, in file column order.
pub type Row = Map<String, Value>;

#[derive(Debug, Clone)]
pub struct CsvStore {
    entity: Entity,
    path: PathBuf,
}

impl CsvStore {
    pub fn new(data_dir: &Path, entity: Entity) -> Self {
        Self {
            entity,
            path: entity.path_in(data_dir),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }

    fn schema(&self) -> &'static EntitySchema {
        self.entity.schema()
    }

    /// Every data row in file order, or `None` when the file has not been created yet.
    pub fn read_rows(&self) -> Result<Option<Vec<Row>>, AppError> {
        if !self.exists() {
            return Ok(None);
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)?;
        let headers = reader.headers()?.clone();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let row: Row = headers
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    let cell = record
                        .get(i)
                        .map(|v| Value::String(v.to_string()))
                        .unwrap_or(Value::Null);
                    (name.to_string(), cell)
                })
                .collect();
            rows.push(row);
        }

        Ok(Some(rows))
    }

    /// Rows for display; a single all-null placeholder row when there is no data yet.
    pub fn list(&self) -> Result<Vec<Row>, AppError> {
        match self.read_rows()? {
            Some(rows) if !rows.is_empty() => Ok(rows),
            _ => Ok(vec![self.schema().placeholder_row()]),
        }
    }

    /// Append one row, writing the header first if the file is new.
    ///
    /// An existing header fixes the column order; columns absent from `record` become empty cells.
    pub fn append(&self, record: &Record) -> Result<(), AppError> {
        let existing_header = self.existing_header()?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        let columns: Vec<String> = match existing_header {
            Some(header) => header,
            None => {
                tracing::info!("Creating {} with header row", self.path.display());
                writer.write_record(self.schema().columns)?;
                self.schema().columns.iter().map(|c| c.to_string()).collect()
            }
        };

        writer.write_record(
            columns
                .iter()
                .map(|column| record.get(column).map(String::as_str).unwrap_or("")),
        )?;
        writer.flush()?;
        Ok(())
    }

    fn existing_header(&self) -> Result<Option<Vec<String>>, AppError> {
        match fs::metadata(&self.path) {
            Ok(meta) if meta.len() > 0 => {}
            Ok(_) => return Ok(None),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)?;
        let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        Ok(if header.is_empty() { None } else { Some(header) })
    }
}
