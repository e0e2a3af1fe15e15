use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands;
use crate::constants::{DEFAULT_CONCURRENCY, DEFAULT_LIMIT_TICKERS};
use crate::models::{Anchor, MonthKey, PriceMode};

#[derive(Parser)]
#[command(name = "tickerboard")]
#[command(about = "Monthly ticker mentions and gainers", long_about = None)]
pub struct Cli {
    /// Mention log (JSON lines); defaults to $MENTIONS_PATH or data/mentions.jsonl
    #[arg(long, global = true)]
    pub mentions: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments shared by the gainers commands
#[derive(clap::Args, Debug, Clone)]
pub struct GainerArgs {
    /// Month to report (YYYY-MM); defaults to the newest month with mentions
    #[arg(short, long)]
    pub month: Option<MonthKey>,

    /// Where the basis price is taken from
    #[arg(long, value_enum, default_value_t = Anchor::Mention)]
    pub anchor: Anchor,

    /// Price field: oc (open -> live quote) or cc (close -> last close)
    #[arg(long, value_enum, default_value_t = PriceMode::Cc)]
    pub mode: PriceMode,

    /// Most-mentioned tickers to price
    #[arg(long, default_value_t = DEFAULT_LIMIT_TICKERS)]
    pub limit: usize,

    /// Concurrent price lookups (1-10)
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Rows to print
    #[arg(long, default_value_t = 10)]
    pub top: usize,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List months that have mentions, newest first
    Months,
    /// Most-mentioned tickers for a month
    Top {
        #[arg(short, long)]
        month: Option<MonthKey>,

        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
    /// First-mention leaderboard for a month
    Users {
        #[arg(short, long)]
        month: Option<MonthKey>,

        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
    /// Rank mentioned tickers by price gain
    Gainers {
        #[command(flatten)]
        args: GainerArgs,
    },
    /// Gainers among the tickers a user mentioned first
    UserGainers {
        /// User id
        #[arg(short, long)]
        user: String,

        #[command(flatten)]
        args: GainerArgs,
    },
}

pub async fn run() {
    let cli = Cli::parse();
    let store = commands::open_store(cli.mentions);

    match cli.command {
        Commands::Months => {
            commands::months::run(&store);
        }
        Commands::Top { month, limit } => {
            commands::top::run(&store, month, limit);
        }
        Commands::Users { month, limit } => {
            commands::users::run(&store, month, limit);
        }
        Commands::Gainers { args } => {
            commands::gainers::run(&store, &args, None).await;
        }
        Commands::UserGainers { user, args } => {
            commands::gainers::run(&store, &args, Some(user.as_str())).await;
        }
    }
}
