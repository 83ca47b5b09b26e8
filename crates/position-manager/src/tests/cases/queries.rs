use {
    crate::{
        domain::{
            Error,
            Side,
            eth::{B256, TxStatus, U256},
            lifecycle::NATIVE_CURRENCY,
        },
        infra::blockchain::{self, MockNode},
        tests::setup::{self, DAI, Onchain, WALLET},
    },
};

#[tokio::test]
async fn allocation_values_the_position() {
    let allocation = Onchain::default()
        .positions()
        .allocation(setup::TOKEN_ID)
        .await
        .unwrap();
    assert_eq!(allocation.pair, "eth_dai");
    assert_eq!(allocation.current, setup::tick(-76_013));
    assert_eq!(
        allocation.amounts.raw0,
        U256::from(2_213_450_439_406_679_284_565u128)
    );
    assert_eq!(allocation.amounts.raw1, U256::from(999_999_999_999_999_999u128));

    let json = serde_json::to_value(&allocation).unwrap();
    assert_eq!(json["tokenId"], "1518");
    assert_eq!(json["liquidity"], "947545951144384551924");
    assert_eq!(json["price"], "0.000499991249679726");
    assert_eq!(json["range"]["lower"], -76_980);
    assert_eq!(json["amounts"]["amount0"], "2213.450439406679284565");
}

#[tokio::test]
async fn quotes_the_other_side() {
    let quote = Onchain::default()
        .positions()
        .quote("eth_dai", Side::Token1, "1", "0.000455", "0.00056")
        .await
        .unwrap();
    assert_eq!(quote.amounts.raw1, setup::eth(1));
    assert_eq!(
        quote.amounts.raw0,
        U256::from(2_333_751_273_601_738_228_983u128)
    );
}

#[tokio::test]
async fn rewards_are_the_collectable_fees() {
    let amounts = Onchain {
        fees: (U256::from(985_400_000_000_000_000u64), U256::ZERO),
        ..Default::default()
    }
    .positions()
    .rewards(WALLET, setup::TOKEN_ID)
    .await
    .unwrap();
    let json = serde_json::to_value(&amounts).unwrap();
    assert_eq!(json["amount0"], "0.9854");
    assert_eq!(json["amount1"], "0");
}

#[tokio::test]
async fn balance_in_native_currency() {
    let balance = Onchain::default()
        .positions()
        .balance(WALLET)
        .await
        .unwrap();
    assert_eq!(balance.symbol, "ETH");
    assert_eq!(balance.raw, setup::eth(10));
    assert_eq!(serde_json::to_value(&balance).unwrap()["amount"], "10");
}

#[tokio::test]
async fn token_decimals() {
    let mut node = MockNode::new();
    node.expect_decimals()
        .withf(|token| *token == DAI)
        .returning(|_| Ok(18));
    let positions = setup::positions(node);
    assert_eq!(positions.token_decimals(DAI).await.unwrap(), 18);
    // The native currency is never looked up.
    assert_eq!(positions.token_decimals(NATIVE_CURRENCY).await.unwrap(), 18);
}

#[tokio::test]
async fn transaction_status() {
    let mut node = MockNode::new();
    node.expect_tx_status()
        .returning(|hash| match hash.0[0] {
            0 => Ok(TxStatus::Pending),
            1 => Ok(TxStatus::Succeeded),
            _ => Err(blockchain::Error::Timeout),
        });
    let positions = setup::positions(node);

    assert_eq!(
        positions.tx_status(B256::ZERO).await.unwrap(),
        TxStatus::Pending
    );
    let mut succeeded = B256::ZERO;
    succeeded.0[0] = 1;
    assert_eq!(
        positions.tx_status(succeeded).await.unwrap(),
        TxStatus::Succeeded
    );
    let mut unreachable = B256::ZERO;
    unreachable.0[0] = 2;
    assert!(matches!(
        positions.tx_status(unreachable).await,
        Err(Error::Node(_))
    ));
}
