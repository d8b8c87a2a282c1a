use std::path::Path;

use colored::Colorize;

use crate::error::Result;
use crate::settings::{load_settings, save_settings, shellexpand_path};
use crate::sheet::Table;
use crate::source::SheetSource;

pub fn run(
    path: &str,
    summary_sheet: Option<String>,
    history_sheet: Option<String>,
    cache_ttl: Option<u64>,
) -> Result<()> {
    let expanded = shellexpand_path(path);
    let source = SheetSource::open(Path::new(&expanded))?;

    let mut settings = load_settings();
    settings.workbook = expanded;
    if let Some(s) = summary_sheet {
        settings.summary_sheet = s;
    }
    if let Some(s) = history_sheet {
        settings.history_sheet = s;
    }
    if let Some(ttl) = cache_ttl {
        settings.cache_ttl_secs = ttl;
    }

    // Probe the summary sheet so a bad path or sheet name fails here rather
    // than on first use.
    let block = source.read_block(&settings.summary_sheet)?;
    let table = Table::from_block(&block, &settings.summary_sheet)?;

    save_settings(&settings)?;

    println!("{} {}", "Configured".green().bold(), source.describe());
    println!(
        "Summary sheet:  {} ({} data rows)",
        settings.summary_sheet,
        table.rows.len()
    );
    println!("History sheet:  {}", settings.history_sheet);
    println!("Cache TTL:      {}s", settings.cache_ttl_secs);
    Ok(())
}
