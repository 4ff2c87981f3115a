use crate::core::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for wardroster
#[derive(Parser)]
#[command(
    name = "wardroster",
    version = env!("CARGO_PKG_VERSION"),
    about = "Hospital shift-rostering store: publish computed rosters atomically into SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        /// Print the current configuration file to stdout
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        /// Edit the configuration file with your preferred editor
        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        /// Specify the editor to use (overrides $EDITOR/$VISUAL)
        #[arg(long = "editor", help = "Editor to use (vim, nano, or custom path)")]
        editor: Option<String>,
    },

    /// Manage wards
    Ward {
        #[command(subcommand)]
        action: WardAction,
    },

    /// Manage staff members
    Staff {
        #[command(subcommand)]
        action: StaffAction,
    },

    /// Manage shift types
    #[command(name = "shift-type")]
    ShiftType {
        #[command(subcommand)]
        action: ShiftTypeAction,
    },

    /// Manage schedules (rostering horizons)
    Schedule {
        #[command(subcommand)]
        action: ScheduleAction,
    },

    /// Replace the roster of a schedule with a computed roster file
    Publish {
        /// Schedule id
        schedule: String,

        /// Roster file (JSON) produced by the scheduling engine
        #[arg(long, short = 'f', value_name = "FILE")]
        file: String,
    },

    /// Print the persisted roster and metrics of a schedule
    Roster {
        /// Schedule id
        schedule: String,

        /// Print the state as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print or manage the internal log table
    Log {
        /// Print rows from the internal `log` table
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Database maintenance
    Db {
        #[arg(long, help = "Run pending migrations")]
        migrate: bool,

        #[arg(long, help = "Run SQLite integrity and foreign key checks")]
        check: bool,

        #[arg(long, help = "Compact the database file")]
        vacuum: bool,

        #[arg(long, help = "Show database statistics")]
        info: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f', help = "Overwrite an existing backup without asking")]
        force: bool,
    },

    /// Export the persisted roster of a schedule
    Export {
        #[arg(long, value_name = "ID")]
        schedule: String,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum WardAction {
    /// Add a ward
    Add { id: String, name: String },
    /// List wards
    List,
}

#[derive(Subcommand)]
pub enum StaffAction {
    /// Add a staff member
    Add {
        id: String,
        name: String,
        #[arg(long, help = "Home ward id")]
        ward: Option<String>,
    },
    /// List staff members
    List,
}

#[derive(Subcommand)]
pub enum ShiftTypeAction {
    /// Add a shift type
    Add {
        id: String,
        name: String,
        #[arg(long, help = "Slot label (Early, Late, Night, ...)")]
        slot: String,
        #[arg(long = "start", help = "Start time (HH:MM)")]
        start: Option<String>,
        #[arg(long = "end", help = "End time (HH:MM)")]
        end: Option<String>,
    },
    /// List shift types
    List,
}

#[derive(Subcommand)]
pub enum ScheduleAction {
    /// Add a schedule for a ward
    Add {
        id: String,
        #[arg(long)]
        ward: String,
        #[arg(long = "from", help = "First day (YYYY-MM-DD)")]
        from: String,
        #[arg(long = "to", help = "Last day (YYYY-MM-DD)")]
        to: String,
    },
    /// List schedules
    List,
    /// Show one schedule with its metrics
    Show { id: String },
    /// Delete a schedule and its roster
    Del {
        id: String,
        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
}
