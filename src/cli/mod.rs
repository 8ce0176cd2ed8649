pub mod backup;
pub mod catalog;
pub mod demo;
pub mod export;
pub mod history;
pub mod init;
pub mod rows;
pub mod segment;
pub mod session;
pub mod status;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "skarbnik", about = "Budget-classification planning CLI with field-level change history.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up skarbnik: choose a data directory and initialize the database.
    Init {
        /// Path for skarbnik data (default: ~/Documents/skarbnik)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Manage the editing session (user, role, organizational unit).
    Session {
        #[command(subcommand)]
        command: SessionCommands,
    },
    /// Inspect and load reference catalogs.
    Catalog {
        #[command(subcommand)]
        command: CatalogCommands,
    },
    /// Create and edit budget-classification rows.
    Rows {
        #[command(subcommand)]
        command: RowsCommands,
    },
    /// Edit yearly-segment figures.
    Segment {
        #[command(subcommand)]
        command: SegmentCommands,
    },
    /// Show a field's change history.
    History {
        /// Row id (or budget-year id with --segment)
        id: i64,
        /// Field name, grid or backend form
        #[arg(long)]
        field: String,
        /// Treat the id as a budget-year (segment) id
        #[arg(long)]
        segment: bool,
    },
    /// Export data to CSV.
    Export {
        #[command(subcommand)]
        command: ExportCommands,
    },
    /// Load sample catalogs and rows to explore skarbnik.
    Demo,
    /// Show current database and summary statistics.
    Status,
    /// Back up the database.
    Backup {
        /// Output path (default: <data_dir>/backups/skarbnik-YYYYMMDD-HHMMSS.db)
        #[arg(long)]
        output: Option<String>,
    },
    /// Generate shell completions.
    Completions {
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum SessionCommands {
    /// Start a session: who is editing, in which role, for which unit.
    Login {
        /// User name
        #[arg(long)]
        user: String,
        /// Role: kierownictwo, bbf or ko
        #[arg(long)]
        rola: String,
        /// Organizational-unit id
        #[arg(long)]
        komorka: i64,
    },
    /// Clear the session.
    Logout,
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List a catalog's entries.
    List {
        /// Catalog kind (e.g. dzialy, rozdzialy, grupy_wydatkow)
        kind: String,
    },
    /// Load a JSON fixture file into a catalog.
    Load {
        /// Path to the JSON fixture
        file: String,
        /// Catalog kind the file belongs to
        #[arg(long)]
        kind: String,
    },
}

#[derive(Subcommand)]
pub enum RowsCommands {
    /// Validate and create a new row with its 4 planning-year segments.
    Add {
        /// Część budżetowa code
        #[arg(long)]
        czesc: Option<String>,
        /// Dział code
        #[arg(long)]
        dzial: Option<String>,
        /// Rozdział code
        #[arg(long)]
        rozdzial: Option<String>,
        /// Paragraf code
        #[arg(long)]
        paragraf: Option<String>,
        /// Funding-source code
        #[arg(long)]
        zrodlo: Option<String>,
        /// Expense-group id
        #[arg(long)]
        grupa: Option<i64>,
        /// Task code (full form, e.g. 1.1.1.1)
        #[arg(long)]
        zadanie: Option<String>,
        /// Program name
        #[arg(long)]
        program: Option<String>,
        /// Plan WI text
        #[arg(long = "plan-wi")]
        plan_wi: Option<String>,
        /// Optional justification text
        #[arg(long)]
        uzasadnienie: Option<String>,
    },
    /// List rows with their current values.
    List,
    /// Show one row with its yearly segments.
    Show { id: i64 },
    /// Patch a single field. The value may be a scalar or a JSON reference
    /// object; it is reduced to its identifier before storing.
    Set {
        id: i64,
        /// Field name, grid or backend form
        #[arg(long)]
        field: String,
        /// New value (scalar or JSON object)
        #[arg(long)]
        value: String,
    },
}

#[derive(Subcommand)]
pub enum SegmentCommands {
    /// Patch a yearly-segment field.
    Set {
        id: i64,
        /// Field name: potrzeba, limit, kwota_umowy or numer_umowy
        #[arg(long)]
        field: String,
        /// New value
        #[arg(long)]
        value: String,
    },
}

#[derive(Subcommand)]
pub enum ExportCommands {
    /// Export rows to CSV.
    Rows {
        /// Output file path
        #[arg(long)]
        output: String,
    },
    /// Export yearly segments to CSV.
    Segments {
        /// Output file path
        #[arg(long)]
        output: String,
    },
}
