use crate::error::{GraderError, Result};
use crate::model::RosterEntry;
use csv::{Reader, ReaderBuilder, StringRecord};
use std::{fs::File, path::PathBuf};
use tracing::debug;

/// Locates per-section roster files under one base directory.
#[derive(Debug, Clone)]
pub struct RosterDirectory {
    base: PathBuf,
}

impl RosterDirectory {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn path_for(&self, section: &str) -> PathBuf {
        self.base.join(format!("sec{}.csv", section))
    }

    /// Opens the section's roster. Entries are read as the iterator advances.
    pub fn open(&self, section: &str) -> Result<RosterReader> {
        let path = self.path_for(section);
        let file = File::open(&path).map_err(|source| GraderError::RosterNotFound {
            section: section.to_string(),
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "opened roster");
        let reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);
        Ok(RosterReader {
            path,
            reader,
            record: StringRecord::new(),
        })
    }

    pub fn load(&self, section: &str) -> Result<Vec<RosterEntry>> {
        self.open(section)?.collect()
    }
}

pub struct RosterReader {
    path: PathBuf,
    reader: Reader<File>,
    record: StringRecord,
}

impl RosterReader {
    fn entry_from_record(&self) -> Result<RosterEntry> {
        match (self.record.get(0), self.record.get(1)) {
            (Some(name), Some(net_id)) => Ok(RosterEntry::new(name, net_id)),
            _ => Err(GraderError::MalformedRoster {
                path: self.path.clone(),
                line: self.record.position().map(|p| p.line()).unwrap_or(0),
            }),
        }
    }
}

impl Iterator for RosterReader {
    type Item = Result<RosterEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record(&mut self.record) {
            Ok(true) => Some(self.entry_from_record()),
            Ok(false) => None,
            Err(source) => Some(Err(GraderError::RosterRead {
                path: self.path.clone(),
                source,
            })),
        }
    }
}
