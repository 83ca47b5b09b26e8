use {
    crate::{
        domain::{
            Side,
            eth::{FlowType, U256},
        },
        infra::blockchain::contracts::INonfungiblePositionManager as Manager,
        tests::setup::{self, Onchain, WALLET},
    },
    alloy::sol_types::SolCall,
};

const FEES: (u128, u128) = (985_400_000_000_000_000, 1_010_000_000_000_000_000);

fn fees() -> (U256, U256) {
    (U256::from(FEES.0), U256::from(FEES.1))
}

#[tokio::test]
async fn deposits_collected_fees() {
    let restaked = Onchain {
        fees: fees(),
        ..Default::default()
    }
    .positions()
    .restake(&setup::submission(FlowType::Defi), setup::TOKEN_ID)
    .await
    .unwrap();

    let tx = &restaked.tx;
    assert_eq!(tx.value.0, U256::ZERO);
    assert_eq!(setup::selectors(&tx.data), [
        Manager::collectCall::SELECTOR,
        Manager::increaseLiquidityCall::SELECTOR,
        Manager::unwrapWETH9Call::SELECTOR,
    ]);
    let calls = setup::calls(&tx.data);
    let collect = Manager::collectCall::abi_decode(&calls[0]).unwrap().params;
    assert_eq!(collect.recipient, WALLET);
    let increase = Manager::increaseLiquidityCall::abi_decode(&calls[1])
        .unwrap()
        .params;
    assert_eq!((increase.amount0Desired, increase.amount1Desired), fees());

    assert_eq!(restaked.fees.raw0, fees().0);
    // Inside the range the fees are matched at the position's ratio, which
    // needs far less ETH than DAI.
    let remainder = restaked.remainder.as_ref().unwrap();
    assert_eq!(remainder.side, Side::Token1);
    assert_eq!(remainder.raw, U256::from(1_009_554_812_711_205_706u128));
}

#[tokio::test]
async fn position_above_range_keeps_token0_fees() {
    let restaked = Onchain {
        tick: -70_000,
        fees: fees(),
        ..Default::default()
    }
    .positions()
    .restake(&setup::submission(FlowType::Pool), setup::TOKEN_ID)
    .await
    .unwrap();

    let remainder = restaked.remainder.as_ref().unwrap();
    assert_eq!(remainder.side, Side::Token0);
    assert_eq!(remainder.raw, fees().0);
    assert_eq!(remainder.symbol, "DAI");

    let json = serde_json::to_value(&restaked).unwrap();
    assert_eq!(json["remainder"]["amount"], "0.9854");
    assert_eq!(json["remainder"]["side"], "token0");
    assert_eq!(json["fees"]["amount1"], "1.01");
    assert_eq!(json["tx"]["value"], "0");
}

#[tokio::test]
async fn nothing_left_without_fees() {
    let restaked = Onchain::default()
        .positions()
        .restake(&setup::submission(FlowType::Defi), setup::TOKEN_ID)
        .await
        .unwrap();
    assert!(restaked.remainder.is_none());
}

#[tokio::test]
async fn emptied_position_keeps_the_range_ratio() {
    let restaked = Onchain {
        liquidity: 0,
        fees: fees(),
        ..Default::default()
    }
    .positions()
    .restake(&setup::submission(FlowType::Defi), setup::TOKEN_ID)
    .await
    .unwrap();

    let remainder = restaked.remainder.as_ref().unwrap();
    assert_eq!(remainder.side, Side::Token1);
    assert_eq!(remainder.raw, U256::from(1_009_554_812_711_205_706u128));
}
