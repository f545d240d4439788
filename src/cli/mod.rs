pub mod export;
pub mod import;
pub mod init;
pub mod login;
pub mod records;
pub mod report;
pub mod status;
pub mod users;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "zvit", about = "Облік відкриття рахунків: імпорт з Excel, експорт CSV, місячні звіти.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up zvit: choose a data directory and initialize the database.
    Init {
        /// Path for zvit data (default: ~/Documents/zvit)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Sign in and store the session.
    Login {
        /// Email of an existing user
        #[arg(long)]
        email: Option<String>,
        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Sign out and invalidate the stored session.
    Logout,
    /// Manage account-opening records.
    Records {
        #[command(subcommand)]
        command: RecordsCommands,
    },
    /// Import records from an Excel workbook (first sheet).
    Import {
        /// Path to .xlsx/.xls file
        file: String,
    },
    /// Write a one-row example workbook for the import format.
    Template {
        /// Output path (default: shablon_import.xlsx)
        #[arg(long)]
        output: Option<String>,
    },
    /// Export all records to CSV (UTF-8 with BOM).
    Export {
        /// Output path (default: <data_dir>/exports/zvit_YYYY-MM-DD.csv)
        #[arg(long)]
        output: Option<String>,
    },
    /// Monthly and status reports.
    Report {
        #[command(subcommand)]
        command: ReportCommands,
    },
    /// Manage users (administrators only).
    Users {
        #[command(subcommand)]
        command: UsersCommands,
    },
    /// Show data directory, counts and the signed-in user.
    Status,
    /// Generate shell completions.
    Completions {
        /// Shell to generate for
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
pub enum RecordsCommands {
    /// Add a record.
    Add {
        /// Full name
        #[arg(long)]
        fio: String,
        /// Tax id
        #[arg(long)]
        ipn: String,
        /// Organization the account was opened through
        #[arg(long)]
        organization: String,
        /// Opening date: DD.MM.YYYY or YYYY-MM-DD
        #[arg(long = "date-opened")]
        date_opened: String,
        /// First deposit date (empty = pending activation)
        #[arg(long = "date-first-deposit")]
        date_first_deposit: Option<String>,
        /// Card status: На випуску, На відділенні, На організації, Активована
        #[arg(long = "card-status")]
        card_status: Option<String>,
        /// Contract signed
        #[arg(long)]
        contract: bool,
        /// Passport copy received
        #[arg(long)]
        passport: bool,
        /// Questionnaire filled in
        #[arg(long)]
        questionnaire: bool,
        /// Free-text comment
        #[arg(long)]
        comment: Option<String>,
    },
    /// List records, newest first.
    List {
        /// Only records of one organization
        #[arg(long)]
        organization: Option<String>,
    },
    /// Replace every field of an existing record.
    Edit {
        /// Record id (shown in `zvit records list`)
        id: i64,
        #[arg(long)]
        fio: String,
        #[arg(long)]
        ipn: String,
        #[arg(long)]
        organization: String,
        #[arg(long = "date-opened")]
        date_opened: String,
        #[arg(long = "date-first-deposit")]
        date_first_deposit: Option<String>,
        #[arg(long = "card-status")]
        card_status: Option<String>,
        #[arg(long)]
        contract: bool,
        #[arg(long)]
        passport: bool,
        #[arg(long)]
        questionnaire: bool,
        #[arg(long)]
        comment: Option<String>,
    },
    /// Delete a record (asks for confirmation).
    Delete {
        /// Record id
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Accounts opened per organization and month of a year.
    Opened {
        /// Report year (default: current year)
        #[arg(long)]
        year: Option<i32>,
    },
    /// Accounts activated per organization and month (all years).
    Activated,
    /// Active vs pending tallies per organization.
    Status,
}

#[derive(Subcommand)]
pub enum UsersCommands {
    /// Add a user. The very first user becomes an administrator.
    Add {
        /// Email used to sign in
        email: String,
        /// Role: Менеджер or Адміністратор (default: Менеджер)
        #[arg(long)]
        role: Option<String>,
        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// List users.
    List,
}
