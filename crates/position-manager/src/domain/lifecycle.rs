//! Position lifecycle operations. Each one reads what it needs from the
//! chain and returns a transaction for the wallet to sign, or a report.

use {
    super::{
        Error,
        assembler::{self, Kind},
        calls,
        coin::{Amount, Coin, ResolvedCoin, Token},
        eth::{
            Address,
            B256,
            Bytes,
            Ether,
            FlowType,
            GasPrice,
            TransactionDescriptor,
            TxStatus,
            U256,
        },
        fees::{self, Leftover},
        liquidity,
        position::{Pool, Position, Side, TokenId},
        preflight,
        price,
        quote,
        tick::{Range, Tick},
        valuation::{self, Amounts},
    },
    crate::infra::{blockchain::Node, observe, registry::Registry, time},
    alloy::primitives::address,
    bigdecimal::BigDecimal,
    chain::Chain,
    futures::future,
    num::{BigInt, BigRational, Zero},
    number::{
        conversions::{big_rational_from_decimal_str, big_rational_to_plain_decimal},
        serialization::{HexOrDecimalU256, PlainDecimal},
    },
    serde::Serialize,
    serde_with::{DisplayFromStr, serde_as},
    std::{sync::Arc, time::Duration},
};

/// The address wallets use for the native currency itself.
pub const NATIVE_CURRENCY: Address = address!("EeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE");

/// Fractional digits of reported prices.
const PRICE_DIGITS: u32 = 18;

/// Liquidity used to read the token ratio of a position that holds none.
const RATIO_LIQUIDITY: u128 = 1_000_000_000_000_000_000;

#[derive(Debug, Clone)]
pub struct Settings {
    pub chain: Chain,
    pub position_manager: Address,
    /// How long a built transaction stays valid.
    pub deadline: Duration,
}

/// Who sends a transaction and how it is priced and rendered.
#[derive(Debug, Clone, Copy)]
pub struct Submission {
    pub wallet: Address,
    pub gas_price: GasPrice,
    pub flow: FlowType,
}

/// How much of a token goes into a deposit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requested {
    /// Whole tokens, e.g. `"1.5"`.
    Amount(String),
    /// The wallet's entire balance.
    Max,
}

/// The tokens deposited into a position, by symbol. Tokens of the pool that
/// are not named are not deposited.
#[derive(Debug, Clone, Default)]
pub struct Deposit(pub Vec<(String, Requested)>);

impl Deposit {
    fn coins(&self, pool: &Pool) -> Result<[Coin; 2], Error> {
        if let Some((symbol, _)) = self.0.iter().find(|(symbol, _)| {
            !symbol.eq_ignore_ascii_case(&pool.token0.symbol)
                && !symbol.eq_ignore_ascii_case(&pool.token1.symbol)
        }) {
            return Err(Error::Validation(format!(
                "{symbol} is not traded in pair {}",
                pool.id
            )));
        }
        let coin = |token: &Token| {
            let requested = self
                .0
                .iter()
                .find(|(symbol, _)| symbol.eq_ignore_ascii_case(&token.symbol));
            match requested {
                Some((_, Requested::Max)) => Coin::max(token.clone()),
                Some((_, Requested::Amount(amount))) => {
                    Coin::new(token.clone(), Amount::Decimal(amount.clone()))
                }
                None => Coin::new(token.clone(), Amount::default()),
            }
        };
        Ok([coin(&pool.token0), coin(&pool.token1)])
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaked {
    pub tx: TransactionDescriptor,
    pub fees: Amounts,
    /// Fees that do not match the position's token ratio and stay in the
    /// wallet.
    pub remainder: Option<Leftover>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddedPosition {
    pub min_price: String,
    pub max_price: String,
    pub amounts: Amounts,
    pub tx: TransactionDescriptor,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub pair: String,
    pub range: Range,
    pub current: Tick,
    /// The pool's current price in token1 per token0.
    pub price: String,
    pub amounts: Amounts,
}

#[serde_as]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    pub token_id: TokenId,
    pub pair: String,
    pub range: Range,
    pub current: Tick,
    pub price: String,
    /// Rendered as a string, real liquidities do not fit a JSON number.
    #[serde_as(as = "DisplayFromStr")]
    pub liquidity: u128,
    pub amounts: Amounts,
}

#[serde_as]
#[derive(Debug, Clone, Serialize)]
pub struct Balance {
    pub symbol: String,
    #[serde_as(as = "HexOrDecimalU256")]
    pub raw: U256,
    #[serde_as(as = "PlainDecimal")]
    pub amount: BigDecimal,
}

/// Builds the transactions and reports of the position lifecycle.
#[derive(Clone)]
pub struct Positions {
    node: Arc<dyn Node>,
    registry: Arc<Registry>,
    settings: Arc<Settings>,
}

impl Positions {
    pub fn new(node: Arc<dyn Node>, registry: Arc<Registry>, settings: Settings) -> Self {
        Self {
            node,
            registry,
            settings: Arc::new(settings),
        }
    }

    pub fn chain(&self) -> Chain {
        self.settings.chain
    }

    /// Opens a new position over the price range `min_price..max_price`,
    /// in token1 per token0.
    pub async fn mint(
        &self,
        submission: &Submission,
        pair: &str,
        deposit: &Deposit,
        min_price: &str,
        max_price: &str,
    ) -> Result<TransactionDescriptor, Error> {
        let pool = self.registry.resolve(pair)?;
        let range = price_range(pool, min_price, max_price)?;
        let coins = deposit.coins(pool)?;
        self.mint_coins(submission, pool, range, coins).await
    }

    async fn mint_coins(
        &self,
        submission: &Submission,
        pool: &Pool,
        range: Range,
        coins: [Coin; 2],
    ) -> Result<TransactionDescriptor, Error> {
        let coins = self.resolve(submission.wallet, &coins).await?;
        let deadline = self.deadline()?;
        let build = |coins: &[ResolvedCoin]| -> Result<(Vec<Bytes>, Ether), Error> {
            let amounts = (raw(coins, 0), raw(coins, 1));
            let calls = calls::mint(pool, range, amounts, submission.wallet, deadline)?;
            Ok((calls, native_value(coins)))
        };
        let tx = self
            .submit(submission, self.settings.position_manager, Kind::Liquidity, coins, build)
            .await?;
        observe::minted(pool, range, &tx);
        Ok(tx)
    }

    pub async fn increase(
        &self,
        submission: &Submission,
        token_id: TokenId,
        deposit: &Deposit,
    ) -> Result<TransactionDescriptor, Error> {
        let (_, pool) = self.position(token_id).await?;
        let coins = self.resolve(submission.wallet, &deposit.coins(pool)?).await?;
        let deadline = self.deadline()?;
        let build = |coins: &[ResolvedCoin]| -> Result<(Vec<Bytes>, Ether), Error> {
            let amounts = (raw(coins, 0), raw(coins, 1));
            Ok((
                calls::increase(pool, token_id, amounts, deadline),
                native_value(coins),
            ))
        };
        self.submit(submission, self.settings.position_manager, Kind::Liquidity, coins, build)
            .await
    }

    /// Removes `percent` of the position's liquidity and collects the tokens
    /// together with the fees.
    pub async fn decrease(
        &self,
        submission: &Submission,
        token_id: TokenId,
        percent: u8,
    ) -> Result<TransactionDescriptor, Error> {
        if percent > 100 {
            return Err(Error::Validation(format!(
                "percent must be between 0 and 100, got {percent}"
            )));
        }
        let (position, pool) = self.position(token_id).await?;
        let liquidity = removed_liquidity(position.liquidity, percent);
        observe::decreasing(token_id, percent, liquidity);
        let deadline = self.deadline()?;
        let calls = calls::decrease(pool, token_id, liquidity, submission.wallet, deadline);
        self.submit_calls(submission, self.settings.position_manager, Kind::Liquidity, calls)
            .await
    }

    pub async fn exit(
        &self,
        submission: &Submission,
        token_id: TokenId,
    ) -> Result<TransactionDescriptor, Error> {
        self.decrease(submission, token_id, 100).await
    }

    pub async fn collect(
        &self,
        submission: &Submission,
        token_id: TokenId,
    ) -> Result<TransactionDescriptor, Error> {
        let (_, pool) = self.position(token_id).await?;
        let calls = calls::collect(pool, token_id, submission.wallet);
        self.submit_calls(submission, self.settings.position_manager, Kind::Liquidity, calls)
            .await
    }

    /// Collects the earned fees and deposits them back into the position.
    pub async fn restake(
        &self,
        submission: &Submission,
        token_id: TokenId,
    ) -> Result<Restaked, Error> {
        let wallet = submission.wallet;
        let ((position, pool), earned) = futures::try_join!(self.position(token_id), async {
            Ok::<_, Error>(self.node.earned_fees(token_id, wallet).await?)
        })?;
        let current = self.node.pool_tick(pool).await?;
        let held = liquidity::amounts_for_liquidity(
            current.sqrt_ratio(),
            position.range.lower().sqrt_ratio(),
            position.range.upper().sqrt_ratio(),
            U256::from(match position.liquidity {
                0 => RATIO_LIQUIDITY,
                liquidity => liquidity,
            }),
        )?;
        let remainder = fees::remainder(earned, held)?
            .map(|remainder| Leftover::new(remainder, pool.token(remainder.side)));
        observe::restaking(token_id, earned, remainder.as_ref());

        let calls = calls::restake(pool, token_id, earned, wallet, self.deadline()?);
        let tx = self
            .submit_calls(submission, self.settings.position_manager, Kind::Liquidity, calls)
            .await?;
        Ok(Restaked {
            tx,
            fees: Amounts::new(&pool.token0, &pool.token1, earned.0, earned.1),
            remainder,
        })
    }

    /// Mints a position around the current price: `range_percent` below and
    /// above it, with `amount` of token0 and the matching amount of token1.
    pub async fn add_position(
        &self,
        submission: &Submission,
        pair: &str,
        amount: &str,
        range_percent: &str,
    ) -> Result<AddedPosition, Error> {
        let spread = big_rational_from_decimal_str(range_percent)
            .filter(|spread| !spread.is_zero() && *spread < hundred())
            .ok_or_else(|| {
                Error::Validation(format!(
                    "range percent must be a decimal between 0 and 100, got {range_percent:?}"
                ))
            })?;
        let pool = self.registry.resolve(pair)?;
        let current = self.node.pool_tick(pool).await?;
        let price = price::tick_to_price(&pool.token0, &pool.token1, current).adjusted();
        let bound = |spread: BigRational| {
            big_rational_to_plain_decimal(&(&price * spread / hundred()), PRICE_DIGITS)
        };
        let min_price = bound(hundred() - &spread);
        let max_price = bound(hundred() + &spread);
        let range = price_range(pool, &min_price, &max_price)?;

        let supplied = Coin::new(pool.token0.clone(), Amount::Decimal(amount.to_string()))
            .resolve(None)?
            .raw;
        let amounts = quote::pair_amounts(pool, range, current, Side::Token0, supplied)?;
        let coins = [
            Coin::new(pool.token0.clone(), Amount::Raw(amounts.raw0)),
            Coin::new(pool.token1.clone(), Amount::Raw(amounts.raw1)),
        ];
        let tx = self.mint_coins(submission, pool, range, coins).await?;
        Ok(AddedPosition {
            min_price,
            max_price,
            amounts,
            tx,
        })
    }

    /// Lets the position manager spend any amount of `token`.
    pub async fn approve(
        &self,
        submission: &Submission,
        token: Address,
    ) -> Result<TransactionDescriptor, Error> {
        let call = calls::approve(self.settings.position_manager);
        self.submit_calls(submission, token, Kind::Approve, vec![call])
            .await
    }

    /// The amount of the other token a deposit of `amount` of `side` needs
    /// over `min_price..max_price`.
    pub async fn quote(
        &self,
        pair: &str,
        side: Side,
        amount: &str,
        min_price: &str,
        max_price: &str,
    ) -> Result<Quote, Error> {
        let pool = self.registry.resolve(pair)?;
        let range = price_range(pool, min_price, max_price)?;
        let supplied = Coin::new(pool.token(side).clone(), Amount::Decimal(amount.to_string()))
            .resolve(None)?
            .raw;
        let current = self.node.pool_tick(pool).await?;
        let amounts = quote::pair_amounts(pool, range, current, side, supplied)?;
        Ok(Quote {
            pair: pool.id.clone(),
            range,
            current,
            price: current_price(pool, current),
            amounts,
        })
    }

    /// What an existing position is worth at the current price.
    pub async fn allocation(&self, token_id: TokenId) -> Result<Allocation, Error> {
        let (position, pool) = self.position(token_id).await?;
        let current = self.node.pool_tick(pool).await?;
        let amounts = valuation::amounts_for_range(
            &ResolvedCoin::new(pool.token0.clone(), U256::ZERO),
            &ResolvedCoin::new(pool.token1.clone(), U256::ZERO),
            position.range.lower(),
            position.range.upper(),
            current,
            Some(U256::from(position.liquidity)),
        )?;
        Ok(Allocation {
            token_id,
            pair: pool.id.clone(),
            range: position.range,
            current,
            price: current_price(pool, current),
            liquidity: position.liquidity,
            amounts,
        })
    }

    /// Fees the position has earned and `owner` could collect now.
    pub async fn rewards(&self, owner: Address, token_id: TokenId) -> Result<Amounts, Error> {
        let ((_, pool), (fee0, fee1)) = futures::try_join!(self.position(token_id), async {
            Ok::<_, Error>(self.node.earned_fees(token_id, owner).await?)
        })?;
        Ok(Amounts::new(&pool.token0, &pool.token1, fee0, fee1))
    }

    /// The wallet's balance of the chain's native currency.
    pub async fn balance(&self, wallet: Address) -> Result<Balance, Error> {
        let raw = self.node.native_balance(wallet).await?;
        Ok(Balance {
            symbol: self.settings.chain.native_symbol().to_string(),
            raw,
            amount: number::units::from_raw(raw, 18),
        })
    }

    pub async fn token_decimals(&self, token: Address) -> Result<u8, Error> {
        if token == NATIVE_CURRENCY {
            return Ok(18);
        }
        Ok(self.node.decimals(token).await?)
    }

    pub async fn tx_status(&self, hash: B256) -> Result<TxStatus, Error> {
        Ok(self.node.tx_status(hash).await?)
    }

    /// The on-chain position and the registered pool it belongs to.
    async fn position(&self, token_id: TokenId) -> Result<(Position, &Pool), Error> {
        let position = self.node.position(token_id).await?;
        let pool = self
            .registry
            .find(position.token0, position.token1, position.fee)
            .ok_or_else(|| {
                Error::UnknownPair(format!(
                    "{}/{} at fee {}",
                    position.token0, position.token1, position.fee
                ))
            })?;
        Ok((position, pool))
    }

    async fn resolve(&self, wallet: Address, coins: &[Coin]) -> Result<Vec<ResolvedCoin>, Error> {
        future::try_join_all(coins.iter().map(|coin| async move {
            let balance = match (coin.use_max_balance, coin.token.native) {
                (false, _) => None,
                (true, true) => Some(self.node.native_balance(wallet).await?),
                (true, false) => Some(self.node.token_balance(coin.token.address, wallet).await?),
            };
            coin.resolve(balance)
        }))
        .await
    }

    fn deadline(&self) -> Result<U256, Error> {
        time::deadline(self.settings.deadline)
            .map(U256::from)
            .ok_or_else(|| Error::validation("system clock is before the epoch"))
    }

    /// Submits calls that move no tokens out of the wallet.
    async fn submit_calls(
        &self,
        submission: &Submission,
        to: Address,
        kind: Kind,
        calls: Vec<Bytes>,
    ) -> Result<TransactionDescriptor, Error> {
        let build = |_: &[ResolvedCoin]| -> Result<(Vec<Bytes>, Ether), Error> {
            Ok((calls.clone(), Ether::default()))
        };
        self.submit(submission, to, kind, Vec::new(), build).await
    }

    /// Estimates the transaction `build` makes from `coins`, checks the wallet
    /// can afford it and buffers the gas.
    ///
    /// A native coin spending the whole balance is reduced by the fee and the
    /// transaction rebuilt, keeping the first estimate.
    async fn submit<F>(
        &self,
        submission: &Submission,
        to: Address,
        kind: Kind,
        coins: Vec<ResolvedCoin>,
        build: F,
    ) -> Result<TransactionDescriptor, Error>
    where
        F: Fn(&[ResolvedCoin]) -> Result<(Vec<Bytes>, Ether), Error> + Send + Sync,
    {
        let wallet = submission.wallet;
        let (calls, value) = build(&coins)?;
        let tx = assembler::tx(wallet, to, value, calls)?;
        let estimated = assembler::estimate(self.node.as_ref(), tx, kind).await?;
        let fee = estimated.fee(submission.gas_price)?;

        let max_native = coins
            .iter()
            .position(|coin| coin.token.native && coin.from_max_balance);
        let (coins, estimated) = match max_native {
            Some(index) => {
                let coin = &coins[index];
                let raw = coin.raw.checked_sub(fee).ok_or_else(|| Error::InsufficientFunds {
                    symbol: coin.token.symbol.clone(),
                    required: fee,
                    available: coin.raw,
                })?;
                observe::reserved_fee(coin, fee);
                let mut reduced = coins.clone();
                reduced[index] = coin.with_raw(raw);
                let (calls, value) = build(&reduced)?;
                let tx = assembler::tx(wallet, to, value, calls)?;
                (reduced, estimated.replace(tx))
            }
            None => (coins, estimated),
        };

        preflight::check(
            self.node.as_ref(),
            wallet,
            self.settings.position_manager,
            self.settings.chain.native_symbol(),
            &coins,
            fee,
        )
        .await?;
        let tx = estimated.into_descriptor(submission.gas_price, submission.flow)?;
        observe::assembled(&tx);
        Ok(tx)
    }
}

/// Parses price bounds in token1 per token0 into a usable tick range.
fn price_range(pool: &Pool, min_price: &str, max_price: &str) -> Result<Range, Error> {
    let tick = |value: &str| {
        price::try_parse_tick(&pool.token0, &pool.token1, pool.fee, value)
            .ok_or_else(|| Error::Validation(format!("invalid price {value:?}")))
    };
    Range::new(tick(min_price)?, tick(max_price)?)
}

fn current_price(pool: &Pool, current: Tick) -> String {
    price::tick_to_price(&pool.token0, &pool.token1, current).to_plain_decimal(PRICE_DIGITS)
}

fn removed_liquidity(liquidity: u128, percent: u8) -> u128 {
    let removed = U256::from(liquidity) * U256::from(percent) / U256::from(100u64);
    // Never more than `liquidity` as `percent` is at most 100.
    u128::try_from(removed).unwrap_or(liquidity)
}

fn raw(coins: &[ResolvedCoin], index: usize) -> U256 {
    coins.get(index).map_or(U256::ZERO, |coin| coin.raw)
}

/// The native currency sent along with the deposit.
fn native_value(coins: &[ResolvedCoin]) -> Ether {
    Ether(
        coins
            .iter()
            .filter(|coin| coin.token.native)
            .fold(U256::ZERO, |total, coin| total.saturating_add(coin.raw)),
    )
}

fn hundred() -> BigRational {
    BigRational::from_integer(BigInt::from(100))
}
