use grader::GraderError;
use grader::model::RosterEntry;
use grader::roster::RosterDirectory;
use std::fs;
use tempfile::tempdir;

#[test]
fn reads_first_two_columns_in_order() -> anyhow::Result<()> {
    let dir = tempdir()?;
    fs::write(
        dir.path().join("sec1.csv"),
        "\"Doe, Jane\",jd1,extra,columns\r\nJohn Smith,js2\r\n",
    )?;

    let roster = RosterDirectory::new(dir.path()).load("1")?;
    assert_eq!(
        roster,
        vec![
            RosterEntry::new("Doe, Jane", "jd1"),
            RosterEntry::new("John Smith", "js2"),
        ]
    );
    Ok(())
}

#[test]
fn path_is_derived_from_section() {
    let dir = RosterDirectory::new("/srv/students");
    assert_eq!(
        dir.path_for("2"),
        std::path::PathBuf::from("/srv/students/sec2.csv")
    );
}

#[test]
fn missing_roster_names_section_and_path() {
    let dir = tempdir().unwrap();
    let err = RosterDirectory::new(dir.path()).open("7").err().unwrap();
    match &err {
        GraderError::RosterNotFound { section, path, .. } => {
            assert_eq!(section, "7");
            assert_eq!(path, &dir.path().join("sec7.csv"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains("roster not found for section 7"));
}

#[test]
fn short_row_is_malformed() -> anyhow::Result<()> {
    let dir = tempdir()?;
    fs::write(dir.path().join("sec1.csv"), "Jane Doe,jd1\nNo Id\n")?;

    let mut reader = RosterDirectory::new(dir.path()).open("1")?;
    assert_eq!(reader.next().transpose()?, Some(RosterEntry::new("Jane Doe", "jd1")));
    let err = reader.next().unwrap().unwrap_err();
    assert!(matches!(err, GraderError::MalformedRoster { line: 2, .. }));
    Ok(())
}

#[test]
fn empty_roster_has_no_entries() -> anyhow::Result<()> {
    let dir = tempdir()?;
    fs::write(dir.path().join("sec1.csv"), "")?;
    assert!(RosterDirectory::new(dir.path()).load("1")?.is_empty());
    Ok(())
}
