use {
    crate::{
        domain::{
            Error,
            eth::{FlowType, U256},
        },
        infra::blockchain::contracts::INonfungiblePositionManager as Manager,
        tests::setup::{self, Onchain},
    },
    alloy::{primitives::aliases::I24, sol_types::SolCall},
};

#[tokio::test]
async fn mints_around_the_current_price() {
    let added = Onchain::default()
        .positions()
        .add_position(&setup::submission(FlowType::Defi), "eth_dai", "1000", "10")
        .await
        .unwrap();

    assert_eq!(added.min_price, "0.000449992124711754");
    assert_eq!(added.max_price, "0.000549990374647699");
    assert_eq!(added.amounts.raw0, setup::eth(1_000));
    assert_eq!(added.amounts.raw1, U256::from(537_827_704_357_542_924u128));

    assert_eq!(added.tx.value.0, added.amounts.raw1);
    let mint = Manager::mintCall::abi_decode(&setup::calls(&added.tx.data)[0])
        .unwrap()
        .params;
    assert_eq!(mint.tickLower, I24::try_from(-77_040).unwrap());
    assert_eq!(mint.tickUpper, I24::try_from(-75_060).unwrap());
    assert_eq!(mint.amount0Desired, setup::eth(1_000));
    assert_eq!(mint.amount1Desired, added.amounts.raw1);
}

#[tokio::test]
async fn range_percent_is_exclusive() {
    let positions = Onchain::default().positions();
    let submission = setup::submission(FlowType::Defi);
    for range in ["0", "100", "150", "-5", "ten"] {
        let err = positions
            .add_position(&submission, "eth_dai", "1000", range)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)), "{range}");
    }
}
