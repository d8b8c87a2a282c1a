use colored::Colorize;

use crate::cli::Book;
use crate::error::{ClientbookError, Result};
use crate::reports;

const SIMULATION_NOTE: &str = "Simulation only: no changes were written to the workbook.";

pub fn add(
    workbook: Option<&str>,
    name: &str,
    manager: Option<&str>,
    phone: Option<&str>,
    content: Option<&str>,
) -> Result<()> {
    let mut book = Book::open(workbook)?;
    let companies = book.companies()?;

    if reports::find_company(&companies, name).is_some() {
        println!(
            "{} a client named '{name}' already exists in the summary sheet.",
            "Note:".yellow().bold()
        );
    }

    println!("{} {name}", "Registered:".green().bold());
    println!("  Manager:  {}", manager.unwrap_or("-"));
    println!("  Phone:    {}", phone.unwrap_or("-"));
    println!("  Content:  {}", content.unwrap_or("-"));
    println!("{}", SIMULATION_NOTE.yellow());
    Ok(())
}

pub fn update(
    workbook: Option<&str>,
    name: &str,
    manager: Option<&str>,
    phone: Option<&str>,
    end: bool,
) -> Result<()> {
    let mut book = Book::open(workbook)?;
    let companies = book.companies()?;
    let company = reports::find_company(&companies, name)
        .ok_or_else(|| ClientbookError::UnknownClient(name.to_string()))?;

    println!("{} {name}", "Updated:".green().bold());
    if let Some(m) = manager {
        println!("  Manager:  {} -> {m}", company.manager);
    }
    if let Some(p) = phone {
        println!("  Phone:    {} -> {p}", company.phone);
    }
    if end {
        println!("  Status:   {} -> 거래 종료", company.status);
    }
    if manager.is_none() && phone.is_none() && !end {
        println!("  (nothing to change)");
    }
    println!("{}", SIMULATION_NOTE.yellow());
    Ok(())
}
