//! Command line definition

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use mesa_client::config::{DEFAULT_BASE_URL, DEFAULT_DATA_DIR, DEFAULT_RETURN_URL, DEFAULT_TIMEOUT_SECS};
use mesa_client::{ClientConfig, Route};

/// Restaurant reservations from the terminal
#[derive(Debug, Parser)]
#[command(name = "mesa", version, about = "Restaurant reservation client")]
pub struct Cli {
    /// Backend base URL
    #[arg(long, global = true, env = "MESA_API_URL", default_value = DEFAULT_BASE_URL)]
    pub api_url: String,

    /// Where the payment provider sends the payer back
    #[arg(long, global = true, env = "MESA_RETURN_URL", default_value = DEFAULT_RETURN_URL)]
    pub return_url: String,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "MESA_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Directory holding the session and the pending payment
    #[arg(long, global = true, env = "MESA_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Log level for this run (overrides RUST_LOG)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(&self.api_url)
            .with_return_url(&self.return_url)
            .with_timeout(self.timeout)
            .with_data_dir(&self.data_dir)
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and remember the session
    SignIn {
        #[arg(long)]
        email: String,
        #[arg(long, env = "MESA_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account
    SignUp {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },

    /// Forget the stored session
    SignOut,

    /// Show who is signed in
    Whoami,

    /// List districts
    Districts,

    /// Browse restaurants
    Restaurants(BrowseArgs),

    /// Show one restaurant
    Restaurant { id: i64 },

    /// Price a party at a restaurant
    Quote {
        #[arg(long)]
        restaurant: i64,
        #[arg(long, default_value_t = 1)]
        people: u32,
    },

    /// Book a table
    Reserve(ReserveArgs),

    /// Start the payment of an existing reservation
    Pay { reservation_id: i64 },

    /// Handle the return from the payment provider
    Return(ReturnArgs),

    /// Show the reservation that was just paid
    Confirmation,

    /// List your reservations
    History,
}

impl Command {
    /// View the command stands for, for the route guard
    pub fn route(&self) -> Option<Route> {
        match self {
            Command::SignIn { .. } => Some(Route::SignIn),
            Command::SignUp { .. } => Some(Route::SignUp),
            Command::SignOut | Command::Whoami => None,
            Command::Districts
            | Command::Restaurants(_)
            | Command::Restaurant { .. }
            | Command::Quote { .. } => Some(Route::Restaurants),
            Command::Reserve(_) | Command::Pay { .. } | Command::Return(_) => {
                Some(Route::ReservationForm)
            }
            Command::Confirmation => Some(Route::ReservationConfirmation),
            Command::History => Some(Route::ReservationHistory),
        }
    }
}

#[derive(Debug, Args)]
pub struct BrowseArgs {
    #[arg(long, default_value_t = 0)]
    pub page: u32,
    #[arg(long, default_value_t = shared::models::page::DEFAULT_PAGE_SIZE)]
    pub size: u32,
    /// Only restaurants in this district
    #[arg(long, conflicts_with_all = ["name", "address"])]
    pub district: Option<String>,
    /// Search by name (with --address)
    #[arg(long)]
    pub name: Option<String>,
    /// Search by address (with --name)
    #[arg(long)]
    pub address: Option<String>,
}

#[derive(Debug, Args)]
pub struct ReserveArgs {
    #[arg(long)]
    pub restaurant: i64,
    /// Reservation day, YYYY-MM-DD
    #[arg(long)]
    pub date: NaiveDate,
    /// Time slot, HH:MM
    #[arg(long)]
    pub time: String,
    #[arg(long, default_value_t = 1)]
    pub people: u32,
    #[arg(long)]
    pub note: Option<String>,
    /// Go straight to payment
    #[arg(long)]
    pub pay: bool,
}

#[derive(Debug, Args)]
pub struct ReturnArgs {
    /// Full return URL as the provider redirected to it
    #[arg(conflicts_with_all = ["token", "payer_id"])]
    pub url: Option<String>,
    #[arg(long)]
    pub token: Option<String>,
    #[arg(long = "payer-id")]
    pub payer_id: Option<String>,
}
