use sdk::cosmwasm_std::Addr;

use factory::EscrowRegistry;

use crate::common::{borrower, lender, test_case::TestCase};

#[test]
fn one_escrow_per_owner_and_pair() {
    let mut test_case = TestCase::new();
    let (gohm, ohm, dai) = (test_case.gohm(), test_case.ohm(), test_case.dai());

    let cooler = test_case.borrower_cooler();
    assert_eq!(cooler, test_case.borrower_cooler());
    assert_eq!(1, test_case.chain.journal().of_type("cooler-clone").count());

    let other_pair = test_case
        .chain
        .generate_cooler(&borrower(), &ohm, &dai)
        .unwrap();
    let other_owner = test_case
        .chain
        .generate_cooler(&lender(), &gohm, &dai)
        .unwrap();
    assert_ne!(cooler, other_pair);
    assert_ne!(cooler, other_owner);

    let factory = test_case.chain.factory();
    assert_eq!(Some(&cooler), factory.cooler_for(&borrower(), &gohm, &dai));
    assert_eq!(&[cooler.clone(), other_owner], factory.coolers_for(&gohm, &dai));
    assert_eq!(3, test_case.chain.registry().len());
    assert!(factory.is_valid_escrow(&other_pair));
    assert!(!factory.is_valid_escrow(&Addr::unchecked("forged")));

    let escrow = test_case.chain.cooler(&cooler).unwrap();
    assert_eq!(&borrower(), escrow.owner());
    assert_eq!(&gohm, escrow.collateral());
    assert_eq!(&dai, escrow.debt());
    assert_eq!(factory.address(), escrow.factory());
}

#[test]
fn unknown_token() {
    let mut test_case = TestCase::new();
    let dai = test_case.dai();

    assert!(test_case
        .chain
        .generate_cooler(&borrower(), &Addr::unchecked("unlisted"), &dai)
        .is_err());
    assert!(test_case.chain.registry().is_empty());
    assert!(test_case.chain.events().is_empty());
}
