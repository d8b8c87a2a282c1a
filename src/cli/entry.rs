use std::io::Write;

use chrono::Local;
use colored::Colorize;

use crate::cli::Book;
use crate::error::{ClientbookError, Result};
use crate::fmt::money;
use crate::reports;
use crate::sheet::{parse_date, parse_number};

pub(crate) fn prompt(label: &str) -> String {
    print!("{label}");
    let _ = std::io::stdout().flush();
    let mut input = String::new();
    let _ = std::io::stdin().read_line(&mut input);
    input.trim().to_string()
}

pub(crate) fn pick_from(label: &str, names: &[&str]) -> Option<String> {
    println!("{label}");
    for (i, name) in names.iter().enumerate() {
        println!("  {}) {name}", i + 1);
    }
    let choice = prompt("Select number: ");
    let idx: usize = choice.parse().unwrap_or(0);
    if idx == 0 || idx > names.len() {
        println!("Invalid selection.");
        return None;
    }
    Some(names[idx - 1].to_string())
}

pub fn run(
    workbook: Option<&str>,
    company: Option<&str>,
    date: Option<&str>,
    sales: Option<f64>,
    collection: Option<f64>,
    memo: Option<&str>,
) -> Result<()> {
    let mut book = Book::open(workbook)?;
    let companies = book.companies()?;
    if companies.is_empty() {
        println!("No client data in the summary sheet.");
        return Ok(());
    }

    let interactive = company.is_none();
    let name = match company {
        Some(n) => n.to_string(),
        None => {
            let active = reports::visible_companies(&companies, false);
            let names: Vec<&str> = active.iter().map(|c| c.name.as_str()).collect();
            match pick_from("Clients:", &names) {
                Some(n) => n,
                None => return Ok(()),
            }
        }
    };
    if reports::find_company(&companies, &name).is_none() {
        return Err(ClientbookError::UnknownClient(name));
    }

    let today = Local::now().format("%Y-%m-%d").to_string();
    let date = match date {
        Some(d) => d.to_string(),
        None if interactive => {
            let input = prompt(&format!("Date [{today}]: "));
            if input.is_empty() {
                today
            } else {
                input
            }
        }
        None => today,
    };
    if parse_date(&date).is_none() {
        return Err(ClientbookError::Other(format!(
            "invalid date '{date}' (expected YYYY-MM-DD)"
        )));
    }

    let sales = match sales {
        Some(v) => v,
        None if interactive => parse_number(&prompt("Sales amount: ")),
        None => 0.0,
    };
    let collection = match collection {
        Some(v) => v,
        None if interactive => parse_number(&prompt("Collection amount: ")),
        None => 0.0,
    };
    let memo = match memo {
        Some(m) => m.to_string(),
        None if interactive => prompt("Memo: "),
        None => String::new(),
    };

    println!();
    println!("{} {name} / {date}", "Recorded:".green().bold());
    println!("  Sales:       {}", money(sales));
    println!("  Collection:  {}", money(collection));
    if !memo.is_empty() {
        println!("  Memo:        {memo}");
    }
    println!(
        "{}",
        "Simulation only: no changes were written to the workbook.".yellow()
    );
    Ok(())
}
