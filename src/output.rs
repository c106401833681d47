//! Record sinks
//!
//! Writes CDR batches as JSON lines or CSV and dumps reference data as JSON
//! lines of `{collection, key, record}` where `record` is the flat field map.

use crate::repository::{Entity, FlatMap, InMemoryRepository};
use crate::simulation::SynthesisResult;
use crate::types::OutputFormat;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;
use std::io::Write;
use tracing::debug;

/// One line of a reference snapshot
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotLine<'a> {
    /// Collection the record belongs to
    pub collection: &'static str,
    /// Opaque record key
    pub key: &'a str,
    /// Flat field map of the record
    pub record: FlatMap,
}

/// Write records in the requested format, returning the number written
pub fn write_records<W, T>(writer: W, records: &[T], format: OutputFormat) -> SynthesisResult<usize>
where
    W: Write,
    T: Entity,
{
    match format {
        OutputFormat::Json => write_json_lines(writer, records),
        OutputFormat::Csv => write_csv(writer, records),
    }
}

/// One JSON object per line
pub fn write_json_lines<W, T>(mut writer: W, records: &[T]) -> SynthesisResult<usize>
where
    W: Write,
    T: Serialize,
{
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writeln!(writer)?;
    }
    writer.flush()?;

    debug!(count = records.len(), "Wrote JSON lines");
    Ok(records.len())
}

/// CSV with one column per flat-map field
///
/// The header is the sorted union of every record's fields; fields a record
/// lacks are left empty.
pub fn write_csv<W, T>(writer: W, records: &[T]) -> SynthesisResult<usize>
where
    W: Write,
    T: Entity,
{
    let rows = records
        .iter()
        .map(|record| record.to_flat_map())
        .collect::<Result<Vec<_>, _>>()?;
    let columns: BTreeSet<&str> = rows
        .iter()
        .flat_map(|row| row.keys().map(String::as_str))
        .collect();

    let mut csv_writer = csv::Writer::from_writer(writer);
    if !rows.is_empty() {
        csv_writer.write_record(&columns)?;
    }
    for row in &rows {
        csv_writer.write_record(columns.iter().map(|column| cell_text(row.get(*column))))?;
    }
    csv_writer.flush()?;

    debug!(count = rows.len(), columns = columns.len(), "Wrote CSV rows");
    Ok(rows.len())
}

/// Dump a repository as snapshot lines
pub fn write_snapshot<W, T>(mut writer: W, repository: &InMemoryRepository<T>) -> SynthesisResult<usize>
where
    W: Write,
    T: Entity,
{
    let mut written = 0;
    for (key, entity) in repository.entries() {
        let line = SnapshotLine {
            collection: T::COLLECTION,
            key: key.as_str(),
            record: entity.to_flat_map()?,
        };
        serde_json::to_writer(&mut writer, &line)?;
        writeln!(writer)?;
        written += 1;
    }
    writer.flush()?;

    debug!(collection = T::COLLECTION, count = written, "Wrote snapshot");
    Ok(written)
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bearer::{Bearer, Qos};
    use crate::repository::Repository;
    use crate::types::{BearerType, RecordKey};

    fn bearers() -> Vec<Bearer> {
        vec![
            Bearer::new(100001, BearerType::Default, Qos::new(64, 128).unwrap()),
            Bearer::new(100002, BearerType::Dedicated, Qos::new(256, 1024).unwrap()),
        ]
    }

    #[test]
    fn test_json_lines() {
        let mut buffer = Vec::new();
        let written = write_json_lines(&mut buffer, &bearers()).unwrap();
        assert_eq!(written, 2);

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: Bearer = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(parsed.id, 100002);
    }

    #[test]
    fn test_csv_header_and_rows() {
        let mut buffer = Vec::new();
        write_records(&mut buffer, &bearers(), OutputFormat::Csv).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "bearer_type,id,qos_gbr,qos_mbr");
        assert_eq!(lines[1], "Default,100001,64,128");
        assert_eq!(lines[2], "Dedicated,100002,256,1024");
    }

    #[test]
    fn test_csv_empty_batch_writes_nothing() {
        let mut buffer = Vec::new();
        let written = write_csv::<_, Bearer>(&mut buffer, &[]).unwrap();
        assert_eq!(written, 0);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(None), "");
        assert_eq!(cell_text(Some(&Value::Null)), "");
        assert_eq!(cell_text(Some(&serde_json::json!("a,b"))), "a,b");
        assert_eq!(cell_text(Some(&serde_json::json!(42))), "42");
    }

    #[test]
    fn test_snapshot_lines() {
        let mut repository = InMemoryRepository::new();
        for (index, bearer) in bearers().into_iter().enumerate() {
            repository.add(RecordKey::from(format!("BEA{}", index)), bearer).unwrap();
        }

        let mut buffer = Vec::new();
        assert_eq!(write_snapshot(&mut buffer, &repository).unwrap(), 2);

        let text = String::from_utf8(buffer).unwrap();
        let first: Value = serde_json::from_str(text.lines().next().unwrap()).unwrap();
        assert_eq!(first["collection"], "bearers");
        assert_eq!(first["key"], "BEA0");
        assert_eq!(first["record"]["qos_gbr"], 64);
    }
}
