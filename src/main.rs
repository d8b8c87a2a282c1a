mod cli;
mod error;
mod fmt;
mod models;
mod reports;
mod settings;
mod sheet;
mod source;
mod tui;

use clap::Parser;

use cli::{Cli, Commands, ManageCommands};

fn main() {
    let cli = Cli::parse();
    let workbook = cli.workbook.as_deref();

    let result = match cli.command {
        None => cli::dashboard::run(workbook),
        Some(Commands::Init {
            path,
            summary_sheet,
            history_sheet,
            cache_ttl,
        }) => cli::init::run(&path, summary_sheet, history_sheet, cache_ttl),
        Some(Commands::Lookup { name, all }) => cli::lookup::run(workbook, &name, all),
        Some(Commands::List { all }) => cli::list::run(workbook, all),
        Some(Commands::Entry {
            company,
            date,
            sales,
            collection,
            memo,
        }) => cli::entry::run(
            workbook,
            company.as_deref(),
            date.as_deref(),
            sales,
            collection,
            memo.as_deref(),
        ),
        Some(Commands::Manage { command }) => match command {
            ManageCommands::Add {
                name,
                manager,
                phone,
                content,
            } => cli::manage::add(
                workbook,
                &name,
                manager.as_deref(),
                phone.as_deref(),
                content.as_deref(),
            ),
            ManageCommands::Update {
                name,
                manager,
                phone,
                end,
            } => cli::manage::update(workbook, &name, manager.as_deref(), phone.as_deref(), end),
        },
        Some(Commands::Status) => cli::status::run(workbook),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
