use crate::error::{GraderError, Result};
use crate::model::{AssignmentList, GradeRow};
use csv::{Terminator, Writer, WriterBuilder};
use std::{
    fs::{File, OpenOptions},
    path::{Path, PathBuf},
};
use tracing::info;

/// The grade CSV on disk. Nothing is buffered between calls: every write
/// opens the file, writes, syncs and closes it again.
#[derive(Debug)]
pub struct GradeSheet {
    path: PathBuf,
    columns: Option<usize>,
}

fn csv_writer(file: File) -> Writer<File> {
    WriterBuilder::new()
        .delimiter(b',')
        .terminator(Terminator::CRLF)
        .from_writer(file)
}

fn finish(mut wtr: Writer<File>) -> Result<()> {
    wtr.flush()?;
    let file = wtr.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()?;
    Ok(())
}

impl GradeSheet {
    /// Creates the file, truncating anything already there.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        File::create(&path)?;
        info!(path = %path.display(), "created grade sheet");
        Ok(Self {
            path,
            columns: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write_header(&mut self, assignments: &AssignmentList) -> Result<()> {
        let mut wtr = csv_writer(File::create(&self.path)?);
        wtr.write_record(assignments.header())?;
        finish(wtr)?;
        self.columns = Some(assignments.len());
        Ok(())
    }

    pub fn append_grade_row(&self, net_id: &str, grades: &[String]) -> Result<()> {
        if let Some(expected) = self.columns {
            if grades.len() != expected {
                return Err(GraderError::ColumnMismatch {
                    net_id: net_id.to_string(),
                    expected,
                    actual: grades.len(),
                });
            }
        }

        let file = OpenOptions::new().append(true).open(&self.path)?;
        let mut wtr = csv_writer(file);
        wtr.write_record(std::iter::once(net_id).chain(grades.iter().map(String::as_str)))?;
        finish(wtr)?;
        info!(net_id, path = %self.path.display(), "grade row written");
        Ok(())
    }

    pub fn append(&self, row: &GradeRow) -> Result<()> {
        self.append_grade_row(&row.net_id, &row.grades)
    }
}
