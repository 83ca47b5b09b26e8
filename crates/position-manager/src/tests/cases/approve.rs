use {
    crate::{
        domain::{
            Error,
            eth::{FlowType, Gas, U256},
        },
        infra::blockchain::contracts::IERC20,
        tests::setup::{self, DAI, Onchain, POSITION_MANAGER},
    },
    alloy::sol_types::SolCall,
};

#[tokio::test]
async fn approves_the_position_manager() {
    let tx = Onchain::default()
        .positions()
        .approve(&setup::submission(FlowType::Pool), DAI)
        .await
        .unwrap();

    assert_eq!(tx.to, DAI);
    assert_eq!(tx.gas, Gas::from(250_000));
    let approve = IERC20::approveCall::abi_decode(&tx.data).unwrap();
    assert_eq!(approve.spender, POSITION_MANAGER);
    assert_eq!(approve.amount, U256::MAX);

    let json = serde_json::to_value(&tx).unwrap();
    assert_eq!(json["gas"], "250000");
    assert_eq!(json["gasPrice"], "1000000000");
    assert_eq!(json["value"], "0");
}

#[tokio::test]
async fn approving_needs_the_fee() {
    let err = Onchain {
        native_balance: setup::fee() - U256::from(1u64),
        ..Default::default()
    }
    .positions()
    .approve(&setup::submission(FlowType::Defi), DAI)
    .await
    .unwrap_err();
    assert!(matches!(err, Error::InsufficientFunds { .. }));
}
