use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::error::{ClientbookError, Result};
use crate::sheet::Table;

/// Where the two tabs live: a spreadsheet workbook, or a directory holding
/// one `<sheet>.csv` per tab.
pub enum SheetSource {
    Workbook(PathBuf),
    CsvDir(PathBuf),
}

impl SheetSource {
    pub fn open(path: &Path) -> Result<Self> {
        if path.is_dir() {
            return Ok(Self::CsvDir(path.to_path_buf()));
        }
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext)
                if ext.eq_ignore_ascii_case("xlsx")
                    || ext.eq_ignore_ascii_case("xls")
                    || ext.eq_ignore_ascii_case("ods") =>
            {
                Ok(Self::Workbook(path.to_path_buf()))
            }
            _ => Err(ClientbookError::UnsupportedSource(
                path.display().to_string(),
            )),
        }
    }

    /// Read one tab as a raw rectangular block of text cells. No header
    /// interpretation happens here; the locator runs on the block later.
    pub fn read_block(&self, sheet: &str) -> Result<Vec<Vec<String>>> {
        match self {
            Self::Workbook(path) => read_workbook_block(path, sheet),
            Self::CsvDir(dir) => read_csv_block(dir, sheet),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Workbook(path) => format!("workbook {}", path.display()),
            Self::CsvDir(dir) => format!("CSV directory {}", dir.display()),
        }
    }
}

fn read_workbook_block(path: &Path, sheet: &str) -> Result<Vec<Vec<String>>> {
    use calamine::Reader;

    let mut workbook = calamine::open_workbook_auto(path).map_err(|e| {
        ClientbookError::Workbook(format!("failed to open {}: {e}", path.display()))
    })?;
    let range = workbook
        .worksheet_range(sheet)
        .map_err(|e| ClientbookError::Workbook(format!("sheet '{sheet}': {e}")))?;
    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect())
}

fn cell_text(cell: &calamine::Data) -> String {
    use calamine::Data;
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            // Whole floats are amounts; render without the .0 so the numeric
            // cleaner and display both see plain integers.
            if f.fract() == 0.0 && f.abs() < 1e15 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

fn read_csv_block(dir: &Path, sheet: &str) -> Result<Vec<Vec<String>>> {
    let path = dir.join(format!("{sheet}.csv"));
    let file = std::fs::File::open(&path).map_err(|e| {
        ClientbookError::Workbook(format!("failed to open {}: {e}", path.display()))
    })?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(std::io::BufReader::new(file));
    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(|f| f.to_string()).collect());
    }
    Ok(rows)
}

/// Read-through cache over sheet loads. Every view render re-requests both
/// tabs; the workbook is only re-read once the entry is older than the TTL.
/// Invalidation is purely time-based.
pub struct SheetCache {
    source: SheetSource,
    ttl: Duration,
    entries: HashMap<String, (Instant, Table)>,
}

impl SheetCache {
    pub fn new(source: SheetSource, ttl_secs: u64) -> Self {
        Self {
            source,
            ttl: Duration::from_secs(ttl_secs),
            entries: HashMap::new(),
        }
    }

    pub fn load(&mut self, sheet: &str) -> Result<Table> {
        if let Some((at, table)) = self.entries.get(sheet) {
            if at.elapsed() < self.ttl {
                return Ok(table.clone());
            }
        }
        let block = self.source.read_block(sheet)?;
        let table = Table::from_block(&block, sheet)?;
        self.entries
            .insert(sheet.to_string(), (Instant::now(), table.clone()));
        Ok(table)
    }

    pub fn source(&self) -> &SheetSource {
        &self.source
    }
}
