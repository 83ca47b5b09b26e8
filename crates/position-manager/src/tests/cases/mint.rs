use {
    crate::{
        domain::{
            Error,
            eth::{FlowType, U256},
            lifecycle::{Deposit, Requested},
        },
        infra::blockchain::contracts::INonfungiblePositionManager as Manager,
        tests::setup::{self, DAI, Onchain, POSITION_MANAGER, WALLET, WETH},
    },
    alloy::{primitives::aliases::I24, sol_types::SolCall},
};

fn deposit(entries: &[(&str, Requested)]) -> Deposit {
    Deposit(
        entries
            .iter()
            .map(|(symbol, requested)| (symbol.to_string(), requested.clone()))
            .collect(),
    )
}

fn amount(value: &str) -> Requested {
    Requested::Amount(value.to_string())
}

#[tokio::test]
async fn native_deposit_refunds_leftover_currency() {
    let positions = Onchain::default().positions();
    let tx = positions
        .mint(
            &setup::submission(FlowType::Defi),
            "eth_dai",
            &deposit(&[("ETH", amount("1")), ("DAI", amount("2213.45"))]),
            "0.000455",
            "0.00056",
        )
        .await
        .unwrap();

    assert_eq!(tx.from, WALLET);
    assert_eq!(tx.to, POSITION_MANAGER);
    assert_eq!(tx.value.0, setup::eth(1));
    assert_eq!(setup::selectors(&tx.data), [
        Manager::mintCall::SELECTOR,
        Manager::refundETHCall::SELECTOR
    ]);

    let mint = Manager::mintCall::abi_decode(&setup::calls(&tx.data)[0])
        .unwrap()
        .params;
    assert_eq!((mint.token0, mint.token1), (DAI, WETH));
    assert_eq!(mint.tickLower, I24::try_from(-76_980).unwrap());
    assert_eq!(mint.tickUpper, I24::try_from(-74_880).unwrap());
    assert_eq!(
        mint.amount0Desired,
        U256::from(2_213_450_000_000_000_000_000u128)
    );
    assert_eq!(mint.amount1Desired, setup::eth(1));
    assert_eq!(mint.recipient, WALLET);
    assert_eq!(mint.deadline, U256::from(1_700_900_000u64));

    let json = serde_json::to_value(&tx).unwrap();
    assert_eq!(json["gas"], "0x35b60");
    assert_eq!(json["gasPrice"], "0x3b9aca00");
    assert_eq!(json["value"], "0xde0b6b3a7640000");
}

#[tokio::test]
async fn whole_native_balance_leaves_room_for_the_fee() {
    let positions = Onchain {
        native_balance: setup::eth(2),
        ..Default::default()
    }
    .positions();
    let tx = positions
        .mint(
            &setup::submission(FlowType::Pool),
            "eth_dai",
            &deposit(&[("ETH", Requested::Max), ("DAI", amount("100"))]),
            "0.000455",
            "0.00056",
        )
        .await
        .unwrap();

    let value = setup::eth(2) - setup::fee();
    assert_eq!(tx.value.0, value);
    let mint = Manager::mintCall::abi_decode(&setup::calls(&tx.data)[0])
        .unwrap()
        .params;
    assert_eq!(mint.amount1Desired, value);
    assert_eq!(serde_json::to_value(&tx).unwrap()["value"], "1999800000000000000");
}

#[tokio::test]
async fn whole_native_balance_below_the_fee() {
    let positions = Onchain {
        native_balance: setup::fee() - U256::from(1u64),
        ..Default::default()
    }
    .positions();
    let err = positions
        .mint(
            &setup::submission(FlowType::Defi),
            "eth_dai",
            &deposit(&[("ETH", Requested::Max)]),
            "0.000455",
            "0.00056",
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InsufficientFunds { symbol, .. } if symbol == "ETH"));
}

#[tokio::test]
async fn native_balance_must_cover_value_and_fee() {
    let mint = |native_balance: U256| async move {
        Onchain {
            native_balance,
            ..Default::default()
        }
        .positions()
        .mint(
            &setup::submission(FlowType::Defi),
            "eth_dai",
            &deposit(&[("ETH", amount("1"))]),
            "0.000455",
            "0.00056",
        )
        .await
    };

    let exact = setup::eth(1) + setup::fee();
    assert!(mint(exact).await.is_ok());
    let err = mint(exact - U256::from(1u64)).await.unwrap_err();
    assert!(matches!(
        err,
        Error::InsufficientFunds { required, available, .. }
            if required == exact && available == exact - U256::from(1u64)
    ));
}

#[tokio::test]
async fn token_deposits_need_allowance() {
    let positions = Onchain {
        dai_allowance: U256::ZERO,
        ..Default::default()
    }
    .positions();
    let err = positions
        .mint(
            &setup::submission(FlowType::Defi),
            "eth_dai",
            &deposit(&[("DAI", amount("100"))]),
            "0.000455",
            "0.00056",
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::InsufficientAllowance { symbol, required, approved }
            if symbol == "DAI" && required == setup::eth(100) && approved == U256::ZERO
    ));
}

#[tokio::test]
async fn rejects_invalid_requests() {
    let positions = Onchain::default().positions();
    let submission = setup::submission(FlowType::Defi);
    let one_eth = deposit(&[("ETH", amount("1"))]);

    let err = positions
        .mint(&submission, "eth_usdc", &one_eth, "0.000455", "0.00056")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UnknownPair(_)));

    // Bounds in the wrong order.
    let err = positions
        .mint(&submission, "eth_dai", &one_eth, "0.00056", "0.000455")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    let err = positions
        .mint(&submission, "eth_dai", &one_eth, "abc", "0.00056")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    let err = positions
        .mint(
            &submission,
            "eth_dai",
            &deposit(&[("USDC", amount("1"))]),
            "0.000455",
            "0.00056",
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    // More fractional digits than the token has.
    let err = positions
        .mint(
            &submission,
            "eth_dai",
            &deposit(&[("DAI", amount("0.0000000000000000001"))]),
            "0.000455",
            "0.00056",
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test]
async fn increase_uses_the_same_deposit_path() {
    let positions = Onchain::default().positions();
    let tx = positions
        .increase(
            &setup::submission(FlowType::Defi),
            setup::TOKEN_ID,
            &deposit(&[("eth", amount("0.5"))]),
        )
        .await
        .unwrap();
    assert_eq!(tx.value.0, setup::eth(1) / U256::from(2u64));
    assert_eq!(setup::selectors(&tx.data), [
        Manager::increaseLiquidityCall::SELECTOR,
        Manager::refundETHCall::SELECTOR
    ]);
    let increase = Manager::increaseLiquidityCall::abi_decode(&setup::calls(&tx.data)[0])
        .unwrap()
        .params;
    assert_eq!(increase.tokenId, setup::TOKEN_ID.0);
    assert_eq!(increase.amount0Desired, U256::ZERO);
    assert_eq!(tx.to, POSITION_MANAGER);
}
