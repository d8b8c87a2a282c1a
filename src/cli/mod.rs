pub mod dashboard;
pub mod entry;
pub mod init;
pub mod list;
pub mod lookup;
pub mod manage;
pub mod status;

use clap::{Parser, Subcommand};

use crate::error::Result;
use crate::models::{self, Company, Transaction};
use crate::settings::{load_settings, resolve_workbook, Settings};
use crate::source::{SheetCache, SheetSource};

#[derive(Parser)]
#[command(
    name = "clientbook",
    about = "Client ledger dashboard over a two-tab spreadsheet workbook."
)]
pub struct Cli {
    /// Workbook path for this run (.xlsx file or directory of per-sheet CSVs)
    #[arg(long, global = true)]
    pub workbook: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Point clientbook at a workbook and name its two sheets.
    Init {
        /// Path to the workbook
        path: String,
        /// Name of the company summary sheet (default: 요약)
        #[arg(long = "summary-sheet")]
        summary_sheet: Option<String>,
        /// Name of the transaction history sheet (default: 거래내역)
        #[arg(long = "history-sheet")]
        history_sheet: Option<String>,
        /// Sheet cache lifetime in seconds
        #[arg(long = "cache-ttl")]
        cache_ttl: Option<u64>,
    },
    /// Look up one client: contacts, history and monthly totals.
    Lookup {
        /// Client name (exact match)
        name: String,
        /// Include ended/suspended clients in the match
        #[arg(long)]
        all: bool,
    },
    /// List clients with balances.
    List {
        /// Include ended/suspended clients
        #[arg(long)]
        all: bool,
    },
    /// Record a transaction (simulated; the workbook is never written).
    Entry {
        /// Client name
        #[arg(long)]
        company: Option<String>,
        /// Transaction date, YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
        /// Sales amount in won
        #[arg(long)]
        sales: Option<f64>,
        /// Collection amount in won
        #[arg(long)]
        collection: Option<f64>,
        /// Memo line
        #[arg(long)]
        memo: Option<String>,
    },
    /// Manage client records (simulated).
    Manage {
        #[command(subcommand)]
        command: ManageCommands,
    },
    /// Show workbook location and summary statistics.
    Status,
}

#[derive(Subcommand)]
pub enum ManageCommands {
    /// Register a new client (simulated).
    Add {
        /// Client name
        name: String,
        /// Contact person
        #[arg(long)]
        manager: Option<String>,
        /// Phone number
        #[arg(long)]
        phone: Option<String>,
        /// Primary goods / contents of trade
        #[arg(long)]
        content: Option<String>,
    },
    /// Update contact info or mark a client ended (simulated).
    Update {
        /// Client name (exact match)
        name: String,
        /// New contact person
        #[arg(long)]
        manager: Option<String>,
        /// New phone number
        #[arg(long)]
        phone: Option<String>,
        /// Mark the client relationship as ended
        #[arg(long)]
        end: bool,
    },
}

/// One open workbook: settings plus the TTL cache over its two tabs. Every
/// view loads fresh through here, so nothing is carried between views beyond
/// what the cache holds.
pub(crate) struct Book {
    pub settings: Settings,
    cache: SheetCache,
}

impl Book {
    pub fn open(workbook_flag: Option<&str>) -> Result<Self> {
        let settings = load_settings();
        let path = resolve_workbook(workbook_flag)?;
        let source = SheetSource::open(&path)?;
        let cache = SheetCache::new(source, settings.cache_ttl_secs);
        Ok(Self { settings, cache })
    }

    pub fn companies(&mut self) -> Result<Vec<Company>> {
        let sheet = self.settings.summary_sheet.clone();
        let table = self.cache.load(&sheet)?;
        models::companies_from(&table, &sheet)
    }

    pub fn transactions(&mut self) -> Result<Vec<Transaction>> {
        let sheet = self.settings.history_sheet.clone();
        let table = self.cache.load(&sheet)?;
        models::transactions_from(&table, &sheet)
    }

    pub fn source(&self) -> &SheetSource {
        self.cache.source()
    }
}
