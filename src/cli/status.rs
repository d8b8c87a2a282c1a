use crate::cli::Book;
use crate::error::Result;
use crate::fmt::{money, number};
use crate::reports;

pub fn run(workbook: Option<&str>) -> Result<()> {
    let mut book = Book::open(workbook)?;

    println!("Source:         {}", book.source().describe());
    println!("Summary sheet:  {}", book.settings.summary_sheet);
    println!("History sheet:  {}", book.settings.history_sheet);
    println!("Cache TTL:      {}s", book.settings.cache_ttl_secs);

    let companies = book.companies()?;
    let txns = book.transactions()?;
    let stats = reports::book_stats(&companies, &txns);

    println!();
    println!("Clients:       {}", number(stats.companies as i64));
    println!("Active:        {}", number(stats.active as i64));
    println!("Transactions:  {}", number(stats.transactions as i64));
    println!("Outstanding:   {}", money(stats.outstanding));

    Ok(())
}
