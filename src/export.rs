//! Review workbook for a finished grade sheet.

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use std::{
    fs::File,
    path::{Path, PathBuf},
};
use tracing::info;

const MIN_COLUMN_WIDTH: usize = 10;
const MAX_COLUMN_WIDTH: usize = 40;

pub fn output_path(input: &Path, output: Option<PathBuf>) -> PathBuf {
    output.unwrap_or_else(|| {
        let mut out: PathBuf = input.into();
        out.set_extension("xlsx");
        out
    })
}

struct ReviewFormats {
    title: Format,
    header: Format,
    cell: Format,
    number: Format,
}

impl ReviewFormats {
    fn new() -> Self {
        Self {
            title: Format::new()
                .set_bold()
                .set_font_size(14)
                .set_align(FormatAlign::Left)
                .set_align(FormatAlign::VerticalCenter),
            header: Format::new()
                .set_bold()
                .set_border(FormatBorder::Thin)
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
                .set_text_wrap(),
            cell: Format::new()
                .set_border(FormatBorder::Thin)
                .set_align(FormatAlign::Left)
                .set_align(FormatAlign::VerticalCenter),
            number: Format::new()
                .set_border(FormatBorder::Thin)
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter),
        }
    }
}

/// The grade sheet as read back from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl GradeTable {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);
        let header = rdr.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(Self { header, rows })
    }

    fn column_width(&self, col: usize) -> usize {
        let widest = std::iter::once(&self.header)
            .chain(&self.rows)
            .filter_map(|row| row.get(col))
            .map(|cell| cell.chars().count())
            .max()
            .unwrap_or(0);
        (widest + 2).clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH)
    }
}

fn write_title(ws: &mut Worksheet, source: &Path, columns: u16, fmt: &ReviewFormats) -> Result<()> {
    let title = format!(
        "{} (exported {})",
        source.file_name().unwrap_or(source.as_os_str()).to_string_lossy(),
        chrono::Local::now().format("%Y-%m-%d")
    );
    if columns > 1 {
        ws.merge_range(0, 0, 0, columns - 1, &title, &fmt.title)?;
    } else {
        ws.write_string_with_format(0, 0, &title, &fmt.title)?;
    }
    ws.set_row_height(0, 24)?;
    Ok(())
}

fn write_grade_cell(ws: &mut Worksheet, row: u32, col: u16, value: &str, fmt: &ReviewFormats) -> Result<()> {
    // Net ID stays text even when it looks numeric.
    match value.trim().parse::<f64>() {
        Ok(n) if col > 0 && n.is_finite() => {
            ws.write_number_with_format(row, col, n, &fmt.number)?;
        }
        _ => {
            ws.write_string_with_format(row, col, value, &fmt.cell)?;
        }
    }
    Ok(())
}

pub fn write_review(table: &GradeTable, source: &Path, output: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Grades")?;
    let fmt = ReviewFormats::new();

    let columns = table.header.len().max(1) as u16;
    write_title(worksheet, source, columns, &fmt)?;

    for (col, name) in table.header.iter().enumerate() {
        worksheet.write_string_with_format(1, col as u16, name, &fmt.header)?;
    }
    for (i, record) in table.rows.iter().enumerate() {
        let row = i as u32 + 2;
        for (col, value) in record.iter().enumerate() {
            write_grade_cell(worksheet, row, col as u16, value, &fmt)?;
        }
    }

    for col in 0..columns {
        worksheet.set_column_width(col, table.column_width(col as usize) as f64)?;
    }
    worksheet.set_freeze_panes(2, 1)?;

    workbook
        .save(output)
        .with_context(|| format!("saving {}", output.display()))?;
    Ok(())
}

pub fn export_review(input: PathBuf, output: Option<PathBuf>) -> Result<PathBuf> {
    let output_path = output_path(&input, output);
    let table = GradeTable::load(&input)?;
    write_review(&table, &input, &output_path)?;
    info!(rows = table.rows.len(), path = %output_path.display(), "review workbook written");
    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_defaults_to_xlsx_beside_input() {
        let out = output_path(Path::new("out/sec1-grades.csv"), None);
        assert_eq!(out, PathBuf::from("out/sec1-grades.xlsx"));
    }

    #[test]
    fn explicit_output_wins() {
        let out = output_path(Path::new("a.csv"), Some(PathBuf::from("b.xlsx")));
        assert_eq!(out, PathBuf::from("b.xlsx"));
    }

    #[test]
    fn column_width_is_clamped() {
        let table = GradeTable {
            header: vec!["Net ID".into(), "A very long assignment name that keeps going and going".into()],
            rows: vec![vec!["ab1".into(), "9".into()]],
        };
        assert_eq!(table.column_width(0), MIN_COLUMN_WIDTH);
        assert_eq!(table.column_width(1), MAX_COLUMN_WIDTH);
    }
}
