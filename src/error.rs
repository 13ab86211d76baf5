use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = GraderError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum GraderError {
    #[error("roster not found for section {section}: {} ({source})", .path.display())]
    RosterNotFound {
        section: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not read roster {}: {source}", .path.display())]
    RosterRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("roster {} line {line}: expected a name and a net ID", .path.display())]
    MalformedRoster { path: PathBuf, line: u64 },

    #[error("row for {net_id} has {actual} grades but the sheet has {expected} assignments")]
    ColumnMismatch {
        net_id: String,
        expected: usize,
        actual: usize,
    },

    #[error("no output file could be created after {attempts} attempts")]
    OutputUnavailable { attempts: u32 },

    #[error("input closed before the session finished")]
    InputClosed,

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
