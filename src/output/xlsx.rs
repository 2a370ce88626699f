//! Excel workbook sink
//!
//! The workbook is rewritten in full after every appended row, so the file on
//! disk always holds every row written so far. Rows left by an earlier run are
//! read back first and kept ahead of the new ones.

use crate::output::traits::{EmailSummary, OutputResult, ResultSink, SiteResult};
use calamine::{open_workbook, Data, Reader, Xlsx};
use rust_xlsxwriter::Workbook;
use std::path::{Path, PathBuf};

/// Column titles of the results sheet
pub const HEADERS: [&str; 3] = ["#", "URL", "Emails"];

/// Extra characters of room added to each column's longest value
const COLUMN_PADDING: usize = 2;

/// Writes site rows to an `.xlsx` workbook
pub struct XlsxSink {
    path: PathBuf,
    sheet_name: String,
    rows: Vec<SiteResult>,
    prepared: bool,
}

impl XlsxSink {
    /// Creates a sink without touching the file
    ///
    /// The workbook is prepared on first use; see [`XlsxSink::prepare`].
    pub fn new(path: impl AsRef<Path>, sheet_name: &str) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            sheet_name: sheet_name.to_string(),
            rows: Vec::new(),
            prepared: false,
        }
    }

    /// Creates a sink and prepares its workbook right away
    ///
    /// # Errors
    ///
    /// Fails if an existing workbook cannot be read, or a new one cannot be
    /// written (missing directory, file locked).
    pub fn open(path: impl AsRef<Path>, sheet_name: &str) -> OutputResult<Self> {
        let mut sink = Self::new(path, sheet_name);
        sink.prepare()?;
        Ok(sink)
    }

    /// Loads the rows of an existing workbook, or writes a new one holding
    /// only the header row
    ///
    /// Does nothing once it has succeeded; after a failure the next call
    /// tries again.
    pub fn prepare(&mut self) -> OutputResult<()> {
        if self.prepared {
            return Ok(());
        }

        if self.path.exists() {
            self.rows = read_rows(&self.path)?;
            tracing::info!(
                "Appending to {} ({} existing rows)",
                self.path.display(),
                self.rows.len()
            );
        } else {
            self.rows.clear();
            self.save(false)?;
        }

        self.prepared = true;
        Ok(())
    }

    pub fn rows(&self) -> &[SiteResult] {
        &self.rows
    }

    /// Width of each column: its longest value, header included, plus padding
    pub fn column_widths(&self) -> [usize; 3] {
        let mut widths = HEADERS.map(|h| h.chars().count());

        for row in &self.rows {
            let cells = [
                row.index.to_string().chars().count(),
                row.url.chars().count(),
                row.summary.to_string().chars().count(),
            ];
            for (width, cell) in widths.iter_mut().zip(cells) {
                *width = (*width).max(cell);
            }
        }

        widths.map(|w| w + COLUMN_PADDING)
    }

    fn save(&self, fit_columns: bool) -> OutputResult<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&self.sheet_name)?;

        for (col, title) in HEADERS.iter().enumerate() {
            worksheet.write_string(0, col as u16, *title)?;
        }

        for (i, row) in self.rows.iter().enumerate() {
            let r = (i + 1) as u32;
            worksheet.write_number(r, 0, row.index as f64)?;
            worksheet.write_string(r, 1, &row.url)?;
            worksheet.write_string(r, 2, &row.summary.to_string())?;
        }

        if fit_columns {
            for (col, width) in self.column_widths().iter().enumerate() {
                worksheet.set_column_width(col as u16, *width as f64)?;
            }
        }

        workbook.save(&self.path)?;
        Ok(())
    }
}

/// Reads the data rows (everything below the header) of a workbook's first sheet
fn read_rows(path: &Path) -> OutputResult<Vec<SiteResult>> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let Some(range) = workbook.worksheet_range_at(0) else {
        return Ok(Vec::new());
    };

    let rows = range?
        .rows()
        .skip(1)
        .filter(|cells| cells.iter().any(|cell| !matches!(cell, Data::Empty)))
        .map(|cells| {
            let text = |col: usize| cells.get(col).map(|c| c.to_string()).unwrap_or_default();
            SiteResult {
                index: cells.first().map(index_cell).unwrap_or(0),
                url: text(1),
                summary: EmailSummary::from(text(2).as_str()),
            }
        })
        .collect();

    Ok(rows)
}

fn index_cell(cell: &Data) -> usize {
    match cell {
        Data::Float(n) => *n as usize,
        Data::Int(n) => *n as usize,
        Data::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

impl ResultSink for XlsxSink {
    /// Adds the row and saves; on failure the row is dropped, not retried
    fn append(&mut self, row: &SiteResult) -> OutputResult<()> {
        self.prepare()?;
        self.rows.push(row.clone());
        if let Err(e) = self.save(false) {
            self.rows.pop();
            return Err(e);
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.prepare()?;
        self.save(true)
    }
}
