//! The interactive grading flow.
//!
//! Section, output file, assignments, then students one at a time until the
//! instructor types `q`. Each finished student is written to the sheet
//! before the next name is asked for.

use crate::config::Config;
use crate::error::{GraderError, Result};
use crate::matcher::NameQuery;
use crate::model::{AssignmentList, GradeRow, RosterEntry};
use crate::roster::RosterDirectory;
use crate::sheet::GradeSheet;
use std::{
    ffi::OsStr,
    io::{BufRead, Write},
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

pub const QUIT: &str = "q";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Quit before an output file existed.
    Cancelled,
    Finished { path: PathBuf, rows: usize },
}

enum Lookup {
    Quit,
    Again,
    Found(RosterEntry),
}

pub fn default_file_name(section: &str) -> String {
    format!("sec{}-grades.csv", section)
}

pub fn has_csv_extension(name: &str) -> bool {
    Path::new(name).extension() == Some(OsStr::new("csv"))
}

pub struct Session<R, W> {
    input: R,
    output: W,
    config: Config,
    roster: RosterDirectory,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, config: Config) -> Self {
        let roster = RosterDirectory::new(&config.roster_dir);
        Self {
            input,
            output,
            config,
            roster,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn run(&mut self) -> Result<Outcome> {
        let Some(section) = self.select_section()? else {
            self.say("Goodbye")?;
            return Ok(Outcome::Cancelled);
        };
        // A missing or malformed roster fails before any file is created.
        self.roster.load(&section)?;

        let Some(mut sheet) = self.name_output_file(&section)? else {
            self.say("Goodbye")?;
            return Ok(Outcome::Cancelled);
        };
        let assignments = self.read_assignments()?;
        sheet.write_header(&assignments)?;

        let rows = self.grade_students(&section, &sheet, &assignments)?;
        info!(rows, path = %sheet.path().display(), "session finished");

        self.say("")?;
        self.say(&format!(
            "Recorded {} {} in {}",
            rows,
            if rows == 1 { "student" } else { "students" },
            sheet.path().display()
        ))?;
        self.say(&format!(
            "Finished at {}. Import the file into your gradebook.",
            chrono::Local::now().format("%Y-%m-%d %H:%M")
        ))?;
        self.say("Goodbye")?;
        Ok(Outcome::Finished {
            path: sheet.path().to_path_buf(),
            rows,
        })
    }

    fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{}", line)?;
        Ok(())
    }

    /// Prints `message`, then reads one line. `None` means input is closed.
    fn ask(&mut self, message: &str) -> Result<Option<String>> {
        if !message.is_empty() {
            writeln!(self.output, "{}", message)?;
        }
        write!(self.output, "> ")?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        writeln!(self.output)?;
        if read == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }

    fn ask_required(&mut self, message: &str) -> Result<String> {
        self.ask(message)?.ok_or(GraderError::InputClosed)
    }

    fn select_section(&mut self) -> Result<Option<String>> {
        let message = format!(
            "Which section are you grading?  Enter {} ({} to exit)",
            self.config.sections.join(" or "),
            QUIT
        );
        loop {
            let Some(answer) = self.ask(&message)? else {
                return Ok(None);
            };
            let answer = answer.trim();
            if answer == QUIT {
                return Ok(None);
            }
            if self.config.is_section(answer) {
                debug!(section = answer, "section selected");
                return Ok(Some(answer.to_string()));
            }
        }
    }

    fn name_output_file(&mut self, section: &str) -> Result<Option<GradeSheet>> {
        let default = default_file_name(section);
        let message = format!("Name the output file.  Default: {} (Enter)", default);
        let mut failures = 0;
        loop {
            let answer = self.ask_required(&message)?;
            if answer == QUIT {
                return Ok(None);
            }
            let name = if answer.is_empty() { default.as_str() } else { answer.as_str() };
            if !has_csv_extension(name) {
                debug!(name, "rejected file name without .csv extension");
                continue;
            }

            let path = self.config.output_dir.join(name);
            match GradeSheet::create(&path) {
                Ok(sheet) => return Ok(Some(sheet)),
                Err(err) => {
                    failures += 1;
                    warn!(path = %path.display(), error = %err, failures, "could not create output file");
                    self.say("There has been an error.  Try again.")?;
                    self.say("")?;
                    if failures >= self.config.max_create_attempts {
                        return Err(GraderError::OutputUnavailable { attempts: failures });
                    }
                }
            }
        }
    }

    fn read_assignments(&mut self) -> Result<AssignmentList> {
        loop {
            let answer = self.ask_required("Enter assignment names separated by commas")?;
            let assignments = AssignmentList::parse(&answer);
            if !assignments.has_blank() {
                return Ok(assignments);
            }
            self.say("Assignment names cannot be blank")?;
            self.say("")?;
        }
    }

    fn grade_students(
        &mut self,
        section: &str,
        sheet: &GradeSheet,
        assignments: &AssignmentList,
    ) -> Result<usize> {
        let mut rows = 0;
        loop {
            let student = match self.find_student(section)? {
                Lookup::Quit => return Ok(rows),
                Lookup::Again => continue,
                Lookup::Found(student) => student,
            };
            if !self.confirm(&student)? {
                continue;
            }
            let row = self.collect_grades(&student, assignments)?;
            sheet.append(&row)?;
            rows += 1;
        }
    }

    fn find_student(&mut self, section: &str) -> Result<Lookup> {
        let Some(name) = self.ask(&format!("Enter a student's name to grade ({} to finish)", QUIT))?
        else {
            return Ok(Lookup::Quit);
        };
        if name == QUIT {
            return Ok(Lookup::Quit);
        }

        let mut candidates = NameQuery::parse(&name).filter(self.roster.load(section)?);
        debug!(query = %name, matches = candidates.len(), "roster lookup");

        match candidates.len() {
            0 => {
                self.say("No students found by that name")?;
                self.say("")?;
                Ok(Lookup::Again)
            }
            1 => Ok(candidates.pop().map_or(Lookup::Again, Lookup::Found)),
            _ => Ok(self.choose(candidates)?.map_or(Lookup::Again, Lookup::Found)),
        }
    }

    /// Numbered pick list; the last number means none of them.
    fn choose(&mut self, mut candidates: Vec<RosterEntry>) -> Result<Option<RosterEntry>> {
        let none = candidates.len() + 1;
        self.say("Select the student to grade")?;
        for (idx, student) in candidates.iter().enumerate() {
            writeln!(self.output, "{}: {}", idx + 1, student.name)?;
        }
        writeln!(self.output, "{}: None of the above", none)?;
        self.say("")?;

        loop {
            let answer = self.ask_required("")?;
            match answer.trim().parse::<usize>() {
                Ok(n) if n == none => return Ok(None),
                Ok(n) if (1..none).contains(&n) => return Ok(Some(candidates.swap_remove(n - 1))),
                _ => {
                    self.say(&format!("Enter a number from 1 to {}", none))?;
                }
            }
        }
    }

    fn confirm(&mut self, student: &RosterEntry) -> Result<bool> {
        self.say(&format!("You chose {}", student.name))?;
        let answer = self.ask_required("Continue? (Y/n)")?;
        Ok(answer != "n")
    }

    fn collect_grades(
        &mut self,
        student: &RosterEntry,
        assignments: &AssignmentList,
    ) -> Result<GradeRow> {
        self.say(&format!(
            "You will be grading {}",
            assignments.names().join(", ")
        ))?;
        self.say("")?;

        let mut grades = Vec::with_capacity(assignments.len());
        for assignment in assignments.iter() {
            let grade =
                self.ask_required(&format!("Enter {}'s grade for {}", student.name, assignment))?;
            grades.push(grade);
        }
        Ok(GradeRow {
            net_id: student.net_id.clone(),
            grades,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_name_uses_section() {
        assert_eq!(default_file_name("2"), "sec2-grades.csv");
    }

    #[test]
    fn csv_extension_required() {
        assert!(has_csv_extension("grades.csv"));
        assert!(has_csv_extension("out/grades.csv"));
        assert!(!has_csv_extension("grades"));
        assert!(!has_csv_extension("grades.CSV"));
        assert!(!has_csv_extension("grades.csv.bak"));
        assert!(!has_csv_extension(".csv"));
    }
}
