//! Checks that a wallet can afford a transaction before it is handed out.

use {
    super::{
        Error,
        coin::ResolvedCoin,
        eth::{Address, U256},
    },
    crate::infra::{blockchain::Node, observe},
    futures::future,
};

/// The wallet's holdings of a token it is about to spend.
#[derive(Debug, Clone)]
pub struct Holding {
    pub coin: ResolvedCoin,
    pub balance: U256,
    pub allowance: U256,
}

/// The affordability rules. The native balance has to cover the fee plus
/// every native coin sent along. Every other coin needs enough allowance for
/// `spender` and enough balance, checked in that order.
pub fn evaluate(
    native_symbol: &str,
    native_balance: U256,
    fee: U256,
    coins: &[ResolvedCoin],
    holdings: &[Holding],
) -> Result<(), Error> {
    let native = coins.iter().filter(|coin| coin.token.native);
    let required = native
        .clone()
        .fold(fee, |total, coin| total.saturating_add(coin.raw));
    if native_balance < required {
        let mut native = native;
        let symbol = native
            .find(|coin| !coin.raw.is_zero())
            .map(|coin| coin.token.symbol.clone())
            .unwrap_or_else(|| native_symbol.to_string());
        return Err(Error::InsufficientFunds {
            symbol,
            required,
            available: native_balance,
        });
    }

    for holding in holdings {
        let token = &holding.coin.token;
        let required = holding.coin.raw;
        if holding.allowance < required {
            return Err(Error::InsufficientAllowance {
                symbol: token.symbol.clone(),
                required,
                approved: holding.allowance,
            });
        }
        if holding.balance < required {
            return Err(Error::InsufficientFunds {
                symbol: token.symbol.clone(),
                required,
                available: holding.balance,
            });
        }
    }
    Ok(())
}

/// Reads the wallet's holdings and applies [`evaluate`].
pub async fn check(
    node: &dyn Node,
    wallet: Address,
    spender: Address,
    native_symbol: &str,
    coins: &[ResolvedCoin],
    fee: U256,
) -> Result<(), Error> {
    let spent = coins
        .iter()
        .filter(|coin| !coin.token.native && !coin.raw.is_zero());
    let holdings = future::try_join_all(spent.map(|coin| async move {
        let (balance, allowance) = futures::try_join!(
            node.token_balance(coin.token.address, wallet),
            node.allowance(coin.token.address, wallet, spender),
        )?;
        Ok::<_, Error>(Holding {
            coin: coin.clone(),
            balance,
            allowance,
        })
    }));
    let (native_balance, holdings) = futures::try_join!(
        async { Ok::<_, Error>(node.native_balance(wallet).await?) },
        holdings,
    )?;

    evaluate(native_symbol, native_balance, fee, coins, &holdings)
        .inspect_err(|err| observe::preflight_failed(wallet, err))
}
