use colored::Colorize;
use comfy_table::Table;

use crate::cli::Book;
use crate::error::{ClientbookError, Result};
use crate::fmt::money;
use crate::models::Company;
use crate::reports;

fn or_dash(s: &str) -> &str {
    if s.is_empty() {
        "-"
    } else {
        s
    }
}

fn print_info(company: &Company) {
    println!("{}", company.name.bold());
    println!("  Manager:  {}", or_dash(&company.manager));
    println!("  Phone:    {}", or_dash(&company.phone));
    if company.content.is_empty() {
        println!("  Content:  -");
    } else {
        let wrapped = textwrap::fill(&company.content, 60);
        let mut lines = wrapped.lines();
        println!("  Content:  {}", lines.next().unwrap_or("-"));
        for line in lines {
            println!("            {line}");
        }
    }
    let balance = money(company.balance);
    if company.balance > 0.0 {
        println!("  Balance:  {}", balance.red());
    } else {
        println!("  Balance:  {balance}");
    }
    if !company.status.is_empty() {
        println!("  Status:   {}", company.status);
    }
}

pub fn run(workbook: Option<&str>, name: &str, all: bool) -> Result<()> {
    let mut book = Book::open(workbook)?;
    let companies = book.companies()?;
    if companies.is_empty() {
        println!("No client data in the summary sheet.");
        return Ok(());
    }

    let visible = reports::visible_companies(&companies, all);
    let Some(company) = visible.iter().find(|c| c.name == name) else {
        if reports::find_company(&companies, name).is_some() {
            println!("'{name}' is marked ended/suspended. Pass --all to include it.");
            return Ok(());
        }
        let near: Vec<&str> = visible
            .iter()
            .filter(|c| c.name.contains(name))
            .map(|c| c.name.as_str())
            .collect();
        if near.is_empty() {
            return Err(ClientbookError::UnknownClient(name.to_string()));
        }
        println!("No exact match for '{name}'. Closest names:");
        for n in near {
            println!("  {n}");
        }
        return Ok(());
    };

    print_info(company);
    println!();

    let txns = book.transactions()?;
    let history = reports::company_history(&txns, &company.name);
    if history.is_empty() {
        println!("No transactions on file.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Date", "Sales", "Collection", "Balance", "Memo"]);
    for t in &history {
        table.add_row(vec![
            t.date.clone(),
            money(t.sales),
            money(t.collection),
            money(t.balance),
            t.memo.clone(),
        ]);
    }
    println!("{table}");

    let monthly = reports::monthly_summary(&history);
    if !monthly.is_empty() {
        println!();
        println!("{}", "Monthly totals".bold());
        let mut summary = Table::new();
        summary.set_header(vec!["Month", "Sales", "Collection", "Balance"]);
        for row in &monthly {
            summary.add_row(vec![
                row.month.clone(),
                money(row.sales),
                money(row.collection),
                money(row.balance),
            ]);
        }
        println!("{summary}");
    }
    Ok(())
}
