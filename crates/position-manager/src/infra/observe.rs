//! Events that are meaningful to the position manager. Each function logs
//! one of them when it happens.

use {
    super::config::Config,
    crate::domain::{
        Error,
        ResolvedCoin,
        Range,
        TokenId,
        eth::{Address, Gas, TransactionDescriptor, Tx, U256},
        fees::Leftover,
        position::Pool,
    },
};

/// Setup the observability. The log argument configures the tokio tracing
/// framework.
pub fn init(log: &str, use_json: bool) {
    let config = ::observe::Config::new(log, use_json);
    ::observe::tracing::initialize(&config);
}

/// Observe the loaded configuration.
pub fn config(config: &Config) {
    tracing::debug!(
        chain = %config.chain,
        network = config.chain.name(),
        position_manager = %config.position_manager,
        pairs = ?config.pools.iter().map(|pool| &pool.id).collect::<Vec<_>>(),
        "loaded config"
    );
}

/// Observe a gas estimate.
pub fn estimated(tx: &Tx, gas: Gas) {
    tracing::debug!(to = %tx.to, value = %tx.value.0, gas = %gas.0, "estimated gas");
}

/// Observe that the node refused to estimate a transaction.
pub fn estimation_failed(tx: &Tx, err: &Error) {
    tracing::warn!(from = %tx.from, to = %tx.to, input = %tx.input, ?err, "gas estimation failed");
}

/// Observe that a wallet cannot afford a transaction.
pub fn preflight_failed(wallet: Address, err: &Error) {
    tracing::info!(%wallet, %err, "preflight check failed");
}

/// Observe that the fee is held back from a whole balance deposit.
pub fn reserved_fee(coin: &ResolvedCoin, fee: U256) {
    tracing::debug!(
        symbol = %coin.token.symbol,
        balance = %coin.raw,
        %fee,
        "reserving fee from balance"
    );
}

/// Observe a transaction ready for signing.
pub fn assembled(tx: &TransactionDescriptor) {
    tracing::info!(
        from = %tx.from,
        to = %tx.to,
        value = %tx.value.0,
        gas = %tx.gas.0,
        flow = %tx.flow,
        "assembled transaction"
    );
}

pub fn minted(pool: &Pool, range: Range, tx: &TransactionDescriptor) {
    tracing::debug!(
        pair = %pool.id,
        lower = %range.lower(),
        upper = %range.upper(),
        value = %tx.value.0,
        "built mint"
    );
}

pub fn decreasing(token_id: TokenId, percent: u8, liquidity: u128) {
    tracing::debug!(%token_id, percent, liquidity, "decreasing liquidity");
}

pub fn restaking(token_id: TokenId, fees: (U256, U256), remainder: Option<&Leftover>) {
    tracing::debug!(%token_id, fee0 = %fees.0, fee1 = %fees.1, ?remainder, "restaking fees");
}

/// Observe a failed command.
pub fn command_failed(command: &str, err: &anyhow::Error) {
    tracing::error!(command, ?err, "command failed");
}
