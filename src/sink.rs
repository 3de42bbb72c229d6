use std::{
    fs,
    io::{BufWriter, ErrorKind, Write},
    path::Path,
};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tempfile::NamedTempFile;

use crate::record::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SinkMode {
    /// Replace whatever the destination held.
    #[default]
    Overwrite,
    /// Keep existing records, replacing those with the same number.
    Merge,
}

/// Writes `records` as one JSON array, returning how many records the file
/// now holds. The document goes to a sibling temp file first and is renamed
/// over `path`, so readers never see a partial array. The temp file is
/// removed if anything fails.
pub fn save(records: &[Record], path: &Path, mode: SinkMode) -> anyhow::Result<usize> {
    let merged;
    let records = match mode {
        SinkMode::Overwrite => records,
        SinkMode::Merge => {
            let mut existing = match load(path) {
                Ok(existing) => existing,
                Err(e) if is_not_found(&e) => Vec::new(),
                Err(e) => return Err(e),
            };
            for record in records {
                if let Some(slot) = existing.iter_mut().find(|r| r.number == record.number) {
                    slot.clone_from(record);
                } else {
                    existing.push(record.clone());
                }
            }
            merged = existing;
            &merged[..]
        }
    };

    let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        let mut ser = Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
        records.serialize(&mut ser)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }
    tmp.persist(path).map_err(|e| e.error)?;

    tracing::debug!(target: "sink", "wrote {} records to {}", records.len(), path.display());
    Ok(records.len())
}

pub fn load(path: &Path) -> anyhow::Result<Vec<Record>> {
    let file = fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}

fn is_not_found(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .is_some_and(|e| e.kind() == ErrorKind::NotFound)
}
