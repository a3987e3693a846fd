//! Clap derive structures for the `taller` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.
//! Kept free of workspace crates so `build.rs` can include it for man pages.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// taller -- administration console for a vehicle-maintenance shop
#[derive(Debug, Parser)]
#[command(
    name = "taller",
    version,
    about = "Administer a vehicle-maintenance shop from the command line",
    long_about = "Console for the maintenance-shop backend: vehicles, employees,\n\
        services, work orders, payments, users, roles and inventory.\n\n\
        Log in once with `taller login`; the session token is kept in the\n\
        system keyring for later commands.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "TALLER_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend URL (overrides profile)
    #[arg(long, short = 'S', env = "TALLER_SERVER", global = true)]
    pub server: Option<String>,

    /// Session token (skips the stored session)
    #[arg(long, env = "TALLER_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "TALLER_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "TALLER_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "TALLER_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Query filter sent with list requests (repeatable)
    #[arg(
        long = "filter",
        value_name = "FIELD=VALUE",
        value_parser = parse_assignment,
        global = true
    )]
    pub filters: Vec<(String, String)>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and store the session token
    Login(LoginArgs),

    /// End the session and forget the stored token
    Logout,

    /// Show the logged-in user and their permissions
    Whoami,

    /// List the screens the current session may open
    Screens,

    /// Manage vehicles
    #[command(alias = "veh")]
    Vehicles(VehiclesArgs),

    /// Manage employees
    #[command(alias = "emp")]
    Employees(EmployeesArgs),

    /// Manage the service catalogue
    #[command(alias = "svc")]
    Services(ServicesArgs),

    /// Manage work orders
    #[command(alias = "ord")]
    Orders(OrdersArgs),

    /// Record and review payments
    #[command(alias = "pay")]
    Payments(PaymentsArgs),

    /// Manage user accounts
    Users(UsersArgs),

    /// Manage roles and their permissions
    Roles(RolesArgs),

    /// Manage parts and supplies stock
    #[command(alias = "inv")]
    Inventory(InventoryArgs),

    /// Summary of orders, payments and stock alerts
    Report,

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared Arguments ─────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Username (defaults to the profile's)
    #[arg(long, short = 'u')]
    pub username: Option<String>,
}

/// Field assignments for create/update.
#[derive(Debug, Clone, Default, Args)]
pub struct FieldArgs {
    /// Set a form field, e.g. `--set placa=ABC-123` (repeatable)
    #[arg(long = "set", short = 's', value_name = "FIELD=VALUE", value_parser = parse_assignment)]
    pub fields: Vec<(String, String)>,

    /// Prompt for every form field
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

/// Record operations every resource screen offers.
#[derive(Debug, Subcommand)]
pub enum CrudCommand {
    /// Show one record
    Get {
        /// Record ID
        id: i64,
    },

    /// Create a record from form fields
    Create(FieldArgs),

    /// Edit a record; unset fields keep their current value
    Update {
        /// Record ID
        id: i64,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Delete a record (asks for confirmation)
    #[command(alias = "rm")]
    Delete {
        /// Record ID
        id: i64,
    },
}

/// Date range shared by history-style listings.
#[derive(Debug, Clone, Default, Args)]
pub struct DateRangeArgs {
    /// Earliest date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// Latest date (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,
}

/// Parse `FIELD=VALUE`. The value may be empty or contain further `=`.
pub fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{raw}'"))?;
    let field = field.trim();
    if field.is_empty() {
        return Err(format!("missing field name in '{raw}'"));
    }
    Ok((field.to_owned(), value.to_owned()))
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  VEHICLES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct VehiclesArgs {
    #[command(subcommand)]
    pub command: VehiclesCommand,
}

#[derive(Debug, Subcommand)]
pub enum VehiclesCommand {
    /// List vehicles
    #[command(alias = "ls")]
    List,

    #[command(flatten)]
    Crud(CrudCommand),

    /// Maintenance history of a vehicle
    History {
        /// Vehicle ID
        id: i64,

        /// Only entries with this status
        #[arg(long)]
        status: Option<String>,

        #[command(flatten)]
        range: DateRangeArgs,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  EMPLOYEES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct EmployeesArgs {
    #[command(subcommand)]
    pub command: EmployeesCommand,
}

#[derive(Debug, Subcommand)]
pub enum EmployeesCommand {
    /// List employees
    #[command(alias = "ls")]
    List,

    #[command(flatten)]
    Crud(CrudCommand),

    /// Work orders assigned to an employee
    Assignments {
        /// Employee ID
        id: i64,
    },

    /// Employees free to take new work
    Available,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SERVICES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ServicesArgs {
    #[command(subcommand)]
    pub command: ServicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum ServicesCommand {
    /// List services
    #[command(alias = "ls")]
    List {
        /// Only active services
        #[arg(long)]
        active: bool,
    },

    #[command(flatten)]
    Crud(CrudCommand),

    /// Flip a service between active and inactive
    Toggle {
        /// Service ID
        id: i64,
    },

    /// Service categories known to the backend
    Categories,

    /// Services performed on a vehicle
    ByVehicle {
        /// Vehicle ID
        id: i64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ORDERS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct OrdersArgs {
    #[command(subcommand)]
    pub command: OrdersCommand,
}

#[derive(Debug, Subcommand)]
pub enum OrdersCommand {
    /// List work orders
    #[command(alias = "ls")]
    List {
        /// Case-insensitive text matched against every column
        #[arg(long)]
        search: Option<String>,

        /// Only orders with this status
        #[arg(long)]
        status: Option<String>,

        /// Intake date range
        #[command(flatten)]
        range: DateRangeArgs,
    },

    #[command(flatten)]
    Crud(CrudCommand),

    /// Line items of an order
    Details {
        /// Order ID
        id: i64,
    },

    /// Add a service line to an order
    AddDetail {
        /// Order ID
        order: i64,

        /// Service ID
        #[arg(long)]
        service: i64,

        /// Quantity
        #[arg(long, default_value = "1")]
        quantity: i64,

        /// Unit price (defaults to the service cost)
        #[arg(long)]
        price: Option<f64>,
    },

    /// Change a line item of an order
    UpdateDetail {
        /// Order ID
        order: i64,

        /// Detail ID
        detail: i64,

        /// Service ID
        #[arg(long)]
        service: i64,

        /// Quantity
        #[arg(long)]
        quantity: i64,

        /// Unit price
        #[arg(long)]
        price: Option<f64>,
    },

    /// Remove a line item from an order
    RemoveDetail {
        /// Order ID
        order: i64,

        /// Detail ID
        detail: i64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PAYMENTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct PaymentsArgs {
    #[command(subcommand)]
    pub command: PaymentsCommand,
}

#[derive(Debug, Subcommand)]
pub enum PaymentsCommand {
    /// List payments
    #[command(alias = "ls")]
    List,

    #[command(flatten)]
    Crud(CrudCommand),

    /// Payments recorded against an order
    ByOrder {
        /// Order ID
        id: i64,
    },

    /// Settle an order through the payment processing endpoint
    Process(FieldArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  USERS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub command: UsersCommand,
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// List user accounts
    #[command(alias = "ls")]
    List,

    #[command(flatten)]
    Crud(CrudCommand),

    /// Enable or disable an account
    Toggle {
        /// User ID
        id: i64,
    },

    /// Set a new password (prompted twice)
    SetPassword {
        /// User ID
        id: i64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ROLES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct RolesArgs {
    #[command(subcommand)]
    pub command: RolesCommand,
}

#[derive(Debug, Subcommand)]
pub enum RolesCommand {
    /// List roles
    #[command(alias = "ls")]
    List,

    #[command(flatten)]
    Crud(CrudCommand),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  INVENTORY
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct InventoryArgs {
    #[command(subcommand)]
    pub command: InventoryCommand,
}

#[derive(Debug, Subcommand)]
pub enum InventoryCommand {
    /// List stock items
    #[command(alias = "ls")]
    List {
        /// Only items at or below their minimum quantity
        #[arg(long)]
        restock: bool,
    },

    #[command(flatten)]
    Crud(CrudCommand),

    /// Add to (or, with a negative delta, take from) an item's stock
    Adjust {
        /// Item ID
        id: i64,

        /// Units to add; negative to consume
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },

    /// Items at or below a stock threshold
    LowStock {
        /// Threshold in units
        #[arg(long, short = 't', default_value = "10")]
        threshold: i64,
    },

    /// Inventory categories known to the backend
    Categories,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create or extend the config file with guided setup
    Init,

    /// Display current configuration
    Show,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Print the config file location
    Path,

    /// Store the active profile's password in the system keyring
    SetPassword,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_tree_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn assignment_keeps_extra_equals() {
        assert_eq!(
            parse_assignment("observaciones=ruido=motor").unwrap(),
            ("observaciones".into(), "ruido=motor".into())
        );
        assert_eq!(parse_assignment("color=").unwrap(), ("color".into(), String::new()));
        assert!(parse_assignment("placa").is_err());
        assert!(parse_assignment("=x").is_err());
    }

    #[test]
    fn negative_adjustment_parses() {
        let cli = Cli::try_parse_from(["taller", "inventory", "adjust", "3", "-2"]).unwrap();
        match cli.command {
            Command::Inventory(InventoryArgs {
                command: InventoryCommand::Adjust { id, delta },
            }) => assert_eq!((id, delta), (3, -2)),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn flattened_crud_subcommands_parse() {
        let cli = Cli::try_parse_from([
            "taller", "vehicles", "update", "7", "--set", "color=Azul", "-s", "tipo=SUV",
        ])
        .unwrap();
        match cli.command {
            Command::Vehicles(VehiclesArgs {
                command: VehiclesCommand::Crud(CrudCommand::Update { id, fields }),
            }) => {
                assert_eq!(id, 7);
                assert_eq!(fields.fields.len(), 2);
                assert!(!fields.interactive);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
