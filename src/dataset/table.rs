//! In-memory table with named columns

use super::record::{FlowField, FlowRecord};
use crate::error::{Error, Result};
use csv::{ReaderBuilder, Trim};
use std::path::Path;
use tracing::debug;

/// Rows of string cells under a header
///
/// Columns beyond the seven flow fields are carried along and ignored by
/// the codec.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl FlowTable {
    /// Build a table, checking every row has one cell per header
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        if let Some((idx, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != headers.len()) {
            return Err(Error::Schema(format!(
                "row {idx} has {} cells, header has {}",
                row.len(),
                headers.len()
            )));
        }
        Ok(Self { headers, rows })
    }

    /// Build a table holding exactly the seven flow columns
    pub fn from_records(records: &[FlowRecord]) -> Self {
        let headers = FlowField::ALL.iter().map(|f| f.column().to_string()).collect();
        let rows = records
            .iter()
            .map(|r| {
                FlowField::ALL
                    .iter()
                    .map(|&f| match r.label(f) {
                        Some(label) => label.to_string(),
                        None => r.value(f).unwrap_or_default().to_string(),
                    })
                    .collect()
            })
            .collect();
        Self { headers, rows }
    }

    /// Read a CSV file with a header row
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_path(path)
            .map_err(|e| Error::csv(path, e))?;

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| Error::csv(path, e))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| Error::csv(path, e))?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        debug!(path = %path.display(), rows = rows.len(), columns = headers.len(), "loaded flow table");
        Self::new(headers, rows)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column, or a schema error naming it
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| Error::Schema(format!("required column '{name}' is missing")))
    }

    /// Parse every row into a flow record
    ///
    /// Fails on the first missing column or unparsable continuous cell; no
    /// partial result is returned.
    pub fn records(&self) -> Result<Vec<FlowRecord>> {
        let mut index = [0usize; 7];
        for (slot, field) in index.iter_mut().zip(FlowField::ALL) {
            *slot = self.column_index(field.column())?;
        }
        let [src, dst, sport, dport, proto, rate, load] = index;

        self.rows
            .iter()
            .enumerate()
            .map(|(row_idx, row)| {
                let number = |col: usize, field: FlowField| -> Result<f64> {
                    row[col].parse::<f64>().map_err(|_| {
                        Error::Schema(format!(
                            "row {row_idx}: {field} value '{}' is not numeric",
                            row[col]
                        ))
                    })
                };
                Ok(FlowRecord {
                    src_addr: row[src].clone(),
                    dst_addr: row[dst].clone(),
                    sport: number(sport, FlowField::Sport)?,
                    dport: row[dport].clone(),
                    proto: row[proto].clone(),
                    rate: number(rate, FlowField::Rate)?,
                    load: number(load, FlowField::Load)?,
                })
            })
            .collect()
    }

    /// Header names joined by commas, with no whitespace or quotes
    ///
    /// This is the schema string the flow-import library expects.
    pub fn schema_string(&self) -> String {
        self.headers
            .iter()
            .map(|h| h.chars().filter(|c| !c.is_whitespace() && *c != '\'' && *c != '"').collect::<String>())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Reorder columns so the named categorical ones come first
    ///
    /// Names not present in the table are skipped; the remaining columns
    /// keep their relative order.
    #[must_use]
    pub fn with_categorical_first(&self, categorical: &[&str]) -> Self {
        let mut order: Vec<usize> = categorical
            .iter()
            .filter_map(|name| self.headers.iter().position(|h| h == name))
            .collect();
        let rest: Vec<usize> = (0..self.headers.len()).filter(|i| !order.contains(i)).collect();
        order.extend(rest);

        let headers = order.iter().map(|&i| self.headers[i].clone()).collect();
        let rows = self
            .rows
            .iter()
            .map(|row| order.iter().map(|&i| row[i].clone()).collect())
            .collect();
        Self { headers, rows }
    }
}
