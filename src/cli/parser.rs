use clap::{Parser, Subcommand};

/// Command-line interface definition for rcampus
#[derive(Parser)]
#[command(
    name = "rcampus",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track campus places, devices and trouble tickets; device status follows open tickets",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Print list/show output as JSON
    #[arg(global = true, long = "json")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Show the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,
    },

    /// Manage the database (migrations, integrity checks, status rebuild)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(
            long = "check",
            help = "Check database integrity and report devices with a stale status"
        )]
        check: bool,

        #[arg(
            long = "rebuild-status",
            help = "Recompute every device status from its problems"
        )]
        rebuild_status: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage campuses
    Campus {
        #[command(subcommand)]
        action: CampusAction,
    },

    /// Manage classrooms
    Classroom {
        #[command(subcommand)]
        action: ClassroomAction,
    },

    /// Manage places (seat coordinates inside a classroom)
    Place {
        #[command(subcommand)]
        action: PlaceAction,
    },

    /// Manage devices
    Device {
        #[command(subcommand)]
        action: DeviceAction,
    },

    /// Manage users (ticket authors)
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Manage problems (trouble tickets)
    Problem {
        #[command(subcommand)]
        action: ProblemAction,
    },
}

#[derive(Subcommand)]
pub enum CampusAction {
    /// Create a campus
    Add {
        #[arg(long)]
        number: i64,
        #[arg(long, default_value = "")]
        address: String,
    },
    /// Update a campus (only the given fields)
    Edit {
        id: i64,
        #[arg(long)]
        number: Option<i64>,
        #[arg(long)]
        address: Option<String>,
    },
    /// Delete a campus with everything inside it
    Del {
        id: i64,
        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
    /// List campuses
    List,
    /// Show one campus
    Show { id: i64 },
}

#[derive(Subcommand)]
pub enum ClassroomAction {
    /// Create a classroom in a campus
    Add {
        #[arg(long)]
        campus: i64,
        #[arg(long)]
        number: i64,
    },
    /// Update a classroom (only the given fields)
    Edit {
        id: i64,
        #[arg(long)]
        number: Option<i64>,
        #[arg(long)]
        campus: Option<i64>,
    },
    /// Delete a classroom with its places, devices and problems
    Del {
        id: i64,
        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
    /// List classrooms
    List {
        #[arg(long, help = "Only classrooms of this campus")]
        campus: Option<i64>,
    },
    /// Show one classroom
    Show { id: i64 },
}

#[derive(Subcommand)]
pub enum PlaceAction {
    /// Create a place at (x, y) in a classroom
    Add {
        #[arg(long)]
        classroom: i64,
        #[arg(long, allow_hyphen_values = true)]
        x: i64,
        #[arg(long, allow_hyphen_values = true)]
        y: i64,
        #[arg(
            long = "type",
            default_value = crate::models::place::DEFAULT_PLACE_TYPE
        )]
        place_type: String,
    },
    /// Update a place (only the given fields)
    Edit {
        id: i64,
        #[arg(long, allow_hyphen_values = true)]
        x: Option<i64>,
        #[arg(long, allow_hyphen_values = true)]
        y: Option<i64>,
        #[arg(long = "type")]
        place_type: Option<String>,
    },
    /// Delete a place with its devices and their problems
    Del {
        id: i64,
        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
    /// List places
    List {
        #[arg(long, help = "Only places of this classroom")]
        classroom: Option<i64>,
    },
    /// Show one place
    Show { id: i64 },
}

#[derive(Subcommand)]
pub enum DeviceAction {
    /// Install a device at a place
    Add {
        #[arg(long)]
        place: i64,
        #[arg(long)]
        description: Option<String>,
    },
    /// Update a device (only the given fields)
    Edit {
        id: i64,
        #[arg(long)]
        place: Option<i64>,
        #[arg(long, help = "New description (an empty string clears it)")]
        description: Option<String>,
    },
    /// Delete a device with its problems
    Del {
        id: i64,
        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
    /// List devices
    List {
        #[arg(long, help = "Only devices at this place")]
        place: Option<i64>,
    },
    /// Show one device
    Show { id: i64 },
}

#[derive(Subcommand)]
pub enum UserAction {
    /// Register a user
    Add {
        #[arg(long)]
        login: String,
        #[arg(long)]
        email: String,
        #[arg(long = "password-hash", default_value = "")]
        password_hash: String,
        #[arg(long)]
        admin: bool,
    },
    /// List users
    List,
    /// Show one user
    Show { id: i64 },
}

#[derive(Subcommand)]
pub enum ProblemAction {
    /// Report a problem on a device
    Add {
        #[arg(long)]
        device: i64,
        #[arg(long)]
        user: i64,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, help = "Pending, In Progress or Resolved")]
        status: Option<String>,
        #[arg(long, help = "Create the problem already inactive")]
        inactive: bool,
    },
    /// Update a problem (only the given fields)
    Edit {
        id: i64,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, help = "Pending, In Progress or Resolved")]
        status: Option<String>,
        #[arg(long, help = "true or false")]
        active: Option<bool>,
        #[arg(long, help = "Move the problem to another device")]
        device: Option<i64>,
        #[arg(long)]
        user: Option<i64>,
    },
    /// Delete a problem
    Del { id: i64 },
    /// List problems
    List {
        #[arg(long, help = "Only problems of this device")]
        device: Option<i64>,
    },
    /// Show one problem
    Show { id: i64 },
}

impl CampusAction {
    /// List and show only read the database.
    pub fn is_read_only(&self) -> bool {
        matches!(self, Self::List | Self::Show { .. })
    }
}

impl ClassroomAction {
    pub fn is_read_only(&self) -> bool {
        matches!(self, Self::List { .. } | Self::Show { .. })
    }
}

impl PlaceAction {
    pub fn is_read_only(&self) -> bool {
        matches!(self, Self::List { .. } | Self::Show { .. })
    }
}

impl DeviceAction {
    pub fn is_read_only(&self) -> bool {
        matches!(self, Self::List { .. } | Self::Show { .. })
    }
}

impl UserAction {
    pub fn is_read_only(&self) -> bool {
        matches!(self, Self::List | Self::Show { .. })
    }
}

impl ProblemAction {
    pub fn is_read_only(&self) -> bool {
        matches!(self, Self::List { .. } | Self::Show { .. })
    }
}
