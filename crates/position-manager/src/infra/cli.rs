use {
    crate::domain::{
        Side,
        eth::{Address, B256, FlowType, U256},
        lifecycle::Requested,
    },
    std::path::PathBuf,
};

#[derive(Debug, clap::Parser)]
#[clap(about = "Builds Uniswap v3 position transactions for a wallet to sign")]
pub struct Args {
    /// The log filter. Logs go to stderr, stdout only carries the result.
    #[clap(long, env, default_value = "info,position_manager=debug")]
    pub log: String,

    /// Whether to use JSON format for the logs.
    #[clap(long, env, default_value = "false")]
    pub use_json_logs: bool,

    /// Path to the TOML configuration file. Built-in defaults apply without
    /// one, which leaves no node endpoint configured.
    #[clap(long, env)]
    pub config: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Command,
}

/// Sender, pricing and rendering of a built transaction.
#[derive(Debug, Clone, clap::Args)]
pub struct Submission {
    /// The wallet that will sign the transaction.
    #[clap(long, env)]
    pub wallet: Address,

    /// Gas price in wei, decimal or `0x` hex. Falls back to the configured
    /// default gas price.
    #[clap(long, env)]
    pub gas_price: Option<U256>,

    /// How numbers are rendered: `defi` as hex, `pool` and `defi_swap` as
    /// decimals.
    #[clap(long, env, default_value = "defi")]
    pub flow: FlowType,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum QuoteSide {
    Token0,
    Token1,
}

impl From<QuoteSide> for Side {
    fn from(side: QuoteSide) -> Self {
        match side {
            QuoteSide::Token0 => Side::Token0,
            QuoteSide::Token1 => Side::Token1,
        }
    }
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Open a new position. Prices are in token1 per token0.
    Mint {
        #[clap(long)]
        pair: String,
        /// Deposit per token as `SYMBOL=AMOUNT` or `SYMBOL=max`.
        #[clap(long = "amount", value_parser = parse_deposit)]
        amounts: Vec<(String, Requested)>,
        #[clap(long)]
        min_price: String,
        #[clap(long)]
        max_price: String,
        #[clap(flatten)]
        submission: Submission,
    },
    /// Add tokens to an existing position.
    Increase {
        #[clap(long)]
        token_id: U256,
        #[clap(long = "amount", value_parser = parse_deposit)]
        amounts: Vec<(String, Requested)>,
        #[clap(flatten)]
        submission: Submission,
    },
    /// Remove a share of a position's liquidity and collect the tokens.
    Decrease {
        #[clap(long)]
        token_id: U256,
        #[clap(long)]
        percent: u8,
        #[clap(flatten)]
        submission: Submission,
    },
    /// Remove all liquidity of a position.
    Exit {
        #[clap(long)]
        token_id: U256,
        #[clap(flatten)]
        submission: Submission,
    },
    /// Collect the fees a position earned.
    Collect {
        #[clap(long)]
        token_id: U256,
        #[clap(flatten)]
        submission: Submission,
    },
    /// Deposit the earned fees back into the position.
    Restake {
        #[clap(long)]
        token_id: U256,
        #[clap(flatten)]
        submission: Submission,
    },
    /// Open a position around the current price with `amount` of token0.
    AddPosition {
        #[clap(long)]
        pair: String,
        #[clap(long)]
        amount: String,
        /// How far below and above the current price the range reaches, in
        /// percent.
        #[clap(long)]
        range_percent: String,
        #[clap(flatten)]
        submission: Submission,
    },
    /// Let the position manager spend a token.
    Approve {
        #[clap(long)]
        token: Address,
        #[clap(flatten)]
        submission: Submission,
    },
    /// How much of the other token a deposit needs.
    Quote {
        #[clap(long)]
        pair: String,
        #[clap(long, value_enum)]
        side: QuoteSide,
        #[clap(long)]
        amount: String,
        #[clap(long)]
        min_price: String,
        #[clap(long)]
        max_price: String,
    },
    /// What a position holds at the current price.
    Allocation {
        #[clap(long)]
        token_id: U256,
    },
    /// Fees a position earned so far.
    Rewards {
        #[clap(long)]
        token_id: U256,
        #[clap(long, env)]
        wallet: Address,
    },
    /// Native currency balance of a wallet.
    Balance {
        #[clap(long, env)]
        wallet: Address,
    },
    /// Decimals of a token.
    Decimals {
        #[clap(long)]
        token: Address,
    },
    /// Whether a transaction is pending, failed or succeeded.
    TxStatus {
        #[clap(long)]
        hash: B256,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mint { .. } => "mint",
            Self::Increase { .. } => "increase",
            Self::Decrease { .. } => "decrease",
            Self::Exit { .. } => "exit",
            Self::Collect { .. } => "collect",
            Self::Restake { .. } => "restake",
            Self::AddPosition { .. } => "add-position",
            Self::Approve { .. } => "approve",
            Self::Quote { .. } => "quote",
            Self::Allocation { .. } => "allocation",
            Self::Rewards { .. } => "rewards",
            Self::Balance { .. } => "balance",
            Self::Decimals { .. } => "decimals",
            Self::TxStatus { .. } => "tx-status",
        }
    }
}

fn parse_deposit(value: &str) -> Result<(String, Requested), String> {
    let (symbol, amount) = value
        .split_once('=')
        .ok_or_else(|| format!("expected SYMBOL=AMOUNT, got {value:?}"))?;
    if symbol.is_empty() {
        return Err(format!("missing symbol in {value:?}"));
    }
    let requested = if amount.eq_ignore_ascii_case("max") {
        Requested::Max
    } else {
        Requested::Amount(amount.to_string())
    };
    Ok((symbol.to_string(), requested))
}
