use {
    super::{
        Error,
        Node,
        contracts::{
            Erc20,
            INonfungiblePositionManager,
            IUniswapV3Factory,
            IUniswapV3Pool,
            PositionManager,
        },
    },
    crate::domain::{
        FeeTier,
        Pool,
        Position,
        Range,
        Tick,
        TokenId,
        eth::{Address, B256, Gas, Tx, TxStatus, U256},
    },
    alloy::{
        contract::Error as ContractError,
        network::ReceiptResponse,
        primitives::{
            TxKind,
            aliases::{I24, U24},
        },
        providers::{DynProvider, Provider, ProviderBuilder},
        rpc::{
            client::ClientBuilder,
            types::{TransactionInput, TransactionRequest},
        },
        transports::RpcError,
    },
    std::{future::Future, time::Duration},
};

/// The chain as seen through a JSON-RPC node.
#[derive(Clone)]
pub struct Ethereum {
    provider: DynProvider,
    position_manager: Address,
    timeout: Duration,
}

impl Ethereum {
    pub fn new(url: &url::Url, position_manager: Address, timeout: Duration) -> Self {
        let client = ClientBuilder::default().http(url.clone());
        Self {
            provider: ProviderBuilder::new().connect_client(client).erased(),
            position_manager,
            timeout,
        }
    }

    fn manager(&self) -> PositionManager<DynProvider> {
        INonfungiblePositionManager::new(self.position_manager, self.provider.clone())
    }

    fn erc20(&self, token: Address) -> Erc20<DynProvider> {
        Erc20::new(token, self.provider.clone())
    }

    async fn timed<T>(&self, request: impl Future<Output = Result<T, Error>>) -> Result<T, Error> {
        tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| Error::Timeout)?
    }
}

/// Whether the node failed to answer, as opposed to the call itself failing.
/// Reverts can hide inside transport errors, so error responses only count
/// as node errors when they carry no revert data.
fn is_node_error(err: &ContractError) -> bool {
    match err {
        ContractError::TransportError(RpcError::ErrorResp(payload)) => {
            payload.as_revert_data().is_none()
        }
        ContractError::TransportError(_) => true,
        _ => false,
    }
}

fn fee(fee: FeeTier) -> Result<U24, Error> {
    U24::try_from(fee.pips()).map_err(|err| Error::Response(format!("fee {fee}: {err}")))
}

#[async_trait::async_trait]
impl Node for Ethereum {
    async fn pool_tick(&self, pool: &Pool) -> Result<Tick, Error> {
        self.timed(async {
            let (token0, token1) = (pool.token0.address, pool.token1.address);
            let factory = self.manager().factory().call().await?;
            let address = IUniswapV3Factory::new(factory, self.provider.clone())
                .getPool(token0, token1, fee(pool.fee)?)
                .call()
                .await?;
            if address.is_zero() {
                return Err(Error::MissingPool {
                    token0,
                    token1,
                    fee: pool.fee,
                });
            }
            let slot0 = IUniswapV3Pool::new(address, self.provider.clone())
                .slot0()
                .call()
                .await?;
            let tick = i32::try_from(slot0.tick)
                .map_err(|err| Error::Response(format!("pool tick: {err}")))?;
            Tick::new(tick).map_err(|err| Error::Response(err.to_string()))
        })
        .await
    }

    async fn position(&self, token_id: TokenId) -> Result<Position, Error> {
        self.timed(async {
            let position = match self.manager().positions(token_id.0).call().await {
                Ok(position) => position,
                Err(err) if is_node_error(&err) => return Err(err.into()),
                Err(err) => {
                    tracing::debug!(?err, %token_id, "positions call failed");
                    return Err(Error::UnknownPosition(token_id));
                }
            };
            let fee = u32::try_from(position.fee)
                .map_err(|err| Error::Response(format!("fee: {err}")))
                .and_then(|pips| {
                    FeeTier::try_from(pips).map_err(|err| Error::Response(err.to_string()))
                })?;
            let tick = |tick: I24| {
                i32::try_from(tick)
                    .map_err(|err| Error::Response(format!("tick: {err}")))
                    .and_then(|tick| {
                        Tick::new(tick).map_err(|err| Error::Response(err.to_string()))
                    })
            };
            let range = Range::new(tick(position.tickLower)?, tick(position.tickUpper)?)
                .map_err(|err| Error::Response(err.to_string()))?;
            Ok(Position {
                token_id,
                token0: position.token0,
                token1: position.token1,
                fee,
                range,
                liquidity: position.liquidity,
            })
        })
        .await
    }

    async fn native_balance(&self, owner: Address) -> Result<U256, Error> {
        self.timed(async { Ok(self.provider.get_balance(owner).await?) })
            .await
    }

    async fn token_balance(&self, token: Address, owner: Address) -> Result<U256, Error> {
        self.timed(async { Ok(self.erc20(token).balanceOf(owner).call().await?) })
            .await
    }

    async fn allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> Result<U256, Error> {
        self.timed(async {
            Ok(self
                .erc20(token)
                .allowance(owner, spender)
                .call()
                .await?)
        })
        .await
    }

    async fn earned_fees(&self, token_id: TokenId, owner: Address) -> Result<(U256, U256), Error> {
        self.timed(async {
            let params = INonfungiblePositionManager::CollectParams {
                tokenId: token_id.0,
                recipient: owner,
                amount0Max: u128::MAX,
                amount1Max: u128::MAX,
            };
            let fees = self.manager().collect(params).from(owner).call().await?;
            Ok((fees.amount0, fees.amount1))
        })
        .await
    }

    async fn decimals(&self, token: Address) -> Result<u8, Error> {
        self.timed(async { Ok(self.erc20(token).decimals().call().await?) })
            .await
    }

    async fn estimate_gas(&self, tx: &Tx) -> Result<Gas, Error> {
        let request = TransactionRequest {
            from: Some(tx.from),
            to: Some(TxKind::Call(tx.to)),
            value: Some(tx.value.0),
            input: TransactionInput::new(tx.input.clone()),
            ..Default::default()
        };
        self.timed(async {
            match self.provider.estimate_gas(request).await {
                Ok(gas) => Ok(Gas::from(gas)),
                // The node answered but refuses to execute the call.
                Err(RpcError::ErrorResp(payload)) => {
                    Err(Error::Revert(payload.message.to_string()))
                }
                Err(err) => Err(err.into()),
            }
        })
        .await
    }

    async fn tx_status(&self, hash: B256) -> Result<TxStatus, Error> {
        self.timed(async {
            let status = match self.provider.get_transaction_receipt(hash).await? {
                None => TxStatus::Pending,
                Some(receipt) if ReceiptResponse::status(&receipt) => TxStatus::Succeeded,
                Some(_) => TxStatus::Failed,
            };
            Ok(status)
        })
        .await
    }
}
