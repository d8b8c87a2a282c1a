use colored::Colorize;
use comfy_table::Table;

use crate::cli::Book;
use crate::error::Result;
use crate::fmt::{money, number};
use crate::reports;

pub fn run(workbook: Option<&str>, all: bool) -> Result<()> {
    let mut book = Book::open(workbook)?;
    let companies = book.companies()?;
    if companies.is_empty() {
        println!("No client data in the summary sheet.");
        return Ok(());
    }

    let visible = reports::visible_companies(&companies, all);
    if visible.is_empty() {
        println!("No active clients. Use --all to include ended/suspended ones.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Client", "Manager", "Phone", "Content", "Balance", "Status",
    ]);
    for c in &visible {
        table.add_row(vec![
            c.name.clone(),
            c.manager.clone(),
            c.phone.clone(),
            c.content.clone(),
            money(c.balance),
            c.status.clone(),
        ]);
    }
    println!("{table}");

    let stats = reports::book_stats(&companies, &[]);
    println!(
        "{} clients ({} active)  outstanding {}",
        number(stats.companies as i64),
        number(stats.active as i64),
        money(stats.outstanding).bold(),
    );
    if !all && stats.active < stats.companies {
        println!("{}", "Ended/suspended clients hidden; pass --all to show them.".dimmed());
    }
    Ok(())
}
