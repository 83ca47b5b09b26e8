use {
    crate::{
        domain::{
            Error,
            FeeTier,
            Position,
            Range,
            eth::{Address, FlowType, Gas, U256},
        },
        infra::blockchain::{self, contracts::INonfungiblePositionManager as Manager},
        tests::setup::{self, DAI, Onchain, WALLET},
    },
    alloy::{primitives::address, sol_types::SolCall},
};

fn removed(data: &alloy::primitives::Bytes) -> u128 {
    Manager::decreaseLiquidityCall::abi_decode(&setup::calls(data)[0])
        .unwrap()
        .params
        .liquidity
}

#[tokio::test]
async fn removes_a_share_and_forwards_native_currency() {
    let positions = Onchain::default().positions();
    let tx = positions
        .decrease(&setup::submission(FlowType::Defi), setup::TOKEN_ID, 50)
        .await
        .unwrap();

    assert_eq!(tx.value.0, U256::ZERO);
    assert_eq!(setup::selectors(&tx.data), [
        Manager::decreaseLiquidityCall::SELECTOR,
        Manager::collectCall::SELECTOR,
        Manager::unwrapWETH9Call::SELECTOR,
        Manager::sweepTokenCall::SELECTOR,
    ]);
    assert_eq!(removed(&tx.data), 473_772_975_572_192_275_962);

    let calls = setup::calls(&tx.data);
    let collect = Manager::collectCall::abi_decode(&calls[1]).unwrap().params;
    assert_eq!(collect.tokenId, setup::TOKEN_ID.0);
    assert_eq!(collect.recipient, Address::ZERO);
    let unwrap = Manager::unwrapWETH9Call::abi_decode(&calls[2]).unwrap();
    assert_eq!(unwrap.recipient, WALLET);
    let sweep = Manager::sweepTokenCall::abi_decode(&calls[3]).unwrap();
    assert_eq!((sweep.token, sweep.recipient), (DAI, WALLET));
}

#[tokio::test]
async fn percent_bounds() {
    let positions = Onchain::default().positions();
    let submission = setup::submission(FlowType::Pool);

    let exit = positions.exit(&submission, setup::TOKEN_ID).await.unwrap();
    assert_eq!(removed(&exit.data), 947_545_951_144_384_551_924);

    let err = positions
        .decrease(&submission, setup::TOKEN_ID, 101)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test]
async fn removing_nothing_never_sends_an_empty_decrease() {
    // The position manager reverts `decreaseLiquidity` with zero liquidity.
    let mut node = Onchain::default().node_without_estimates();
    node.expect_estimate_gas().returning(|tx| {
        let empty_decrease = setup::calls(&tx.input).iter().any(|call| {
            Manager::decreaseLiquidityCall::abi_decode(call)
                .is_ok_and(|decrease| decrease.params.liquidity == 0)
        });
        if empty_decrease {
            return Err(blockchain::Error::Revert("execution reverted".to_string()));
        }
        Ok(Gas::from(setup::GAS))
    });

    let tx = setup::positions(node)
        .decrease(&setup::submission(FlowType::Defi), setup::TOKEN_ID, 0)
        .await
        .unwrap();
    assert_eq!(setup::selectors(&tx.data), [
        Manager::collectCall::SELECTOR,
        Manager::unwrapWETH9Call::SELECTOR,
        Manager::sweepTokenCall::SELECTOR,
    ]);
}

#[tokio::test]
async fn collect_only_pays_the_fee() {
    let tx = Onchain::default()
        .positions()
        .collect(&setup::submission(FlowType::Defi), setup::TOKEN_ID)
        .await
        .unwrap();
    assert_eq!(setup::selectors(&tx.data), [
        Manager::collectCall::SELECTOR,
        Manager::unwrapWETH9Call::SELECTOR,
        Manager::sweepTokenCall::SELECTOR,
    ]);

    let err = Onchain {
        native_balance: U256::ZERO,
        ..Default::default()
    }
    .positions()
    .collect(&setup::submission(FlowType::Defi), setup::TOKEN_ID)
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        Error::InsufficientFunds { symbol, required, .. }
            if symbol == "ETH" && required == setup::fee()
    ));
}

#[tokio::test]
async fn unknown_positions() {
    let mut node = blockchain::MockNode::new();
    node.expect_position()
        .returning(|token_id| Err(blockchain::Error::UnknownPosition(token_id)));
    let err = setup::positions(node)
        .decrease(&setup::submission(FlowType::Defi), setup::TOKEN_ID, 10)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UnknownPosition(id) if id == setup::TOKEN_ID));

    // A position in a pool that is not registered.
    let mut node = blockchain::MockNode::new();
    node.expect_position().returning(|token_id| {
        Ok(Position {
            token_id,
            token0: DAI,
            token1: address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"),
            fee: FeeTier::Low,
            range: Range::new(setup::tick(-60), setup::tick(60)).unwrap(),
            liquidity: 1,
        })
    });
    let err = setup::positions(node)
        .collect(&setup::submission(FlowType::Defi), setup::TOKEN_ID)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UnknownPair(_)));
}

#[tokio::test]
async fn node_failures_are_not_estimation_errors() {
    let mut node = blockchain::MockNode::new();
    node.expect_position()
        .returning(|_| Err(blockchain::Error::Timeout));
    let err = setup::positions(node)
        .exit(&setup::submission(FlowType::Defi), setup::TOKEN_ID)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Node(blockchain::Error::Timeout)));
}
