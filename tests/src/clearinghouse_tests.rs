use access_control::Unauthorized;
use clearinghouse::ContractError;
use cooler::LoanId;
use finance::{coin::Amount, duration::Duration, interest};
use modules::Ledger;
use sdk::cosmwasm_std::Addr;

use chain::Error;

use crate::common::{
    borrower, emergency, overseer,
    test_case::{TestCase, FUND_AMOUNT},
    TOKEN,
};

const REBALANCE: &str = "clearinghouse-rebalance";

fn owed(test_case: &TestCase, cooler: &Addr, loan_ids: &[LoanId]) -> Amount {
    loan_ids
        .iter()
        .map(|&loan_id| test_case.loan(cooler, loan_id).amount)
        .sum()
}

fn rebalances(test_case: &TestCase) -> usize {
    test_case.chain.journal().of_type(REBALANCE).count()
}

#[test]
fn receivables_follow_the_loans() {
    let mut test_case = TestCase::new();
    test_case.fund();
    let cooler = test_case.borrower_cooler();
    let (dai, house) = (test_case.dai(), test_case.house());

    let first = test_case.borrow(&cooler, 3_000 * TOKEN);
    let second = test_case.borrow(&cooler, 6_000 * TOKEN);
    assert_eq!((0, 1), (first, second));
    assert_eq!(
        owed(&test_case, &cooler, &[first, second]),
        test_case.receivables()
    );
    assert_eq!(FUND_AMOUNT - 9_000 * TOKEN, test_case.house_shares());

    let repaid = 1_000 * TOKEN;
    test_case
        .chain
        .approve(&borrower(), &dai, &cooler, repaid)
        .unwrap();
    test_case
        .chain
        .repay_loan(&borrower(), &cooler, first, repaid)
        .unwrap();
    assert_eq!(
        owed(&test_case, &cooler, &[first, second]),
        test_case.receivables()
    );
    // repaid directly and swept into the vault
    assert_eq!(0, test_case.balance(&dai, &house));
    assert_eq!(FUND_AMOUNT - 8_000 * TOKEN, test_case.house_shares());

    let loan = test_case.loan(&cooler, second);
    let needed = test_case
        .chain
        .cooler(&cooler)
        .unwrap()
        .collateral_for(loan.amount, test_case.config().loan_to_collateral())
        .unwrap();
    test_case.give_collateral(&borrower(), &house, needed - loan.collateral);
    assert_eq!(Ok(()), test_case.chain.extend_loan(&borrower(), &cooler, second));

    let config = test_case.config();
    assert_eq!(
        loan.amount + interest::interest_for(loan.amount, config.interest_rate, config.duration).unwrap(),
        test_case.loan(&cooler, second).amount
    );
    assert_eq!(needed, test_case.loan(&cooler, second).collateral);
    assert_eq!(
        owed(&test_case, &cooler, &[first, second]),
        test_case.receivables()
    );

    let rest = test_case.loan(&cooler, first).amount;
    test_case.chain.approve(&borrower(), &dai, &cooler, rest).unwrap();
    test_case
        .chain
        .repay_loan(&borrower(), &cooler, first, rest)
        .unwrap();
    assert_eq!(0, test_case.loan(&cooler, first).collateral);
    assert_eq!(
        owed(&test_case, &cooler, &[first, second]),
        test_case.receivables()
    );
}

#[test]
fn rebalance_once_per_cadence() {
    let mut test_case = TestCase::new();
    let start = test_case.chain.now();
    let cadence = test_case.config().fund_cadence;

    test_case.fund();
    assert_eq!(FUND_AMOUNT, test_case.house_shares());
    assert_eq!(FUND_AMOUNT, test_case.house_debt());
    assert_eq!(start + cadence, test_case.chain.clearinghouse().fund_time());

    let events = test_case.chain.events().len();
    test_case.chain.advance(Duration::from_days(6));
    assert_eq!(Ok(false), test_case.chain.rebalance());
    assert_eq!(FUND_AMOUNT, test_case.house_shares());
    assert_eq!(FUND_AMOUNT, test_case.house_debt());
    assert_eq!(events, test_case.chain.events().len());
}

#[test]
fn rebalance_catches_up_in_one_transfer() {
    let mut test_case = TestCase::new();
    let start = test_case.chain.now();
    test_case.fund();

    let cooler = test_case.borrower_cooler();
    test_case.borrow(&cooler, 3_000 * TOKEN);
    assert_eq!(FUND_AMOUNT - 3_000 * TOKEN, test_case.house_shares());

    test_case.chain.advance(Duration::from_days(22));
    assert_eq!(Ok(true), test_case.chain.rebalance());
    assert_eq!(
        start + Duration::from_days(28),
        test_case.chain.clearinghouse().fund_time()
    );
    assert_eq!(2, rebalances(&test_case));
    assert_eq!(FUND_AMOUNT, test_case.house_shares());
    assert_eq!(FUND_AMOUNT + 3_000 * TOKEN, test_case.house_debt());

    assert_eq!(Ok(false), test_case.chain.rebalance());
    assert_eq!(2, rebalances(&test_case));
}

#[test]
fn rebalance_returns_the_excess() {
    let mut test_case = TestCase::new();
    test_case.fund();

    // doubles the value of every share
    let total = test_case.chain.vault().total_assets(test_case.chain.bank());
    test_case.chain.accrue_savings(total).unwrap();

    test_case.chain.advance(Duration::from_days(7));
    assert_eq!(Ok(true), test_case.chain.rebalance());
    assert_eq!(FUND_AMOUNT / 2, test_case.house_shares());
    assert_eq!(FUND_AMOUNT / 2, test_case.house_debt());
    assert_eq!(
        Ok(FUND_AMOUNT),
        test_case
            .chain
            .vault()
            .max_withdraw(test_case.chain.bank(), &test_case.house())
    );
}

#[test]
fn default_and_burn() {
    let mut test_case = TestCase::new();
    test_case.fund();
    let cooler = test_case.borrower_cooler();
    let (gohm, ohm, house) = (test_case.gohm(), test_case.ohm(), test_case.house());

    let loan_id = test_case.borrow(&cooler, 3_000 * TOKEN);
    let loan = test_case.loan(&cooler, loan_id);
    assert_eq!(TOKEN, loan.collateral);

    test_case
        .chain
        .advance(test_case.config().duration + Duration::from_secs(1));
    assert_eq!(
        Err(Error::ClearingHouse(ContractError::Unauthorized(Unauthorized))),
        test_case
            .chain
            .claim_defaulted_batch(&borrower(), &[cooler.clone()], &[loan_id])
    );

    let defaulted = test_case
        .chain
        .claim_defaulted_batch(&overseer(), &[cooler.clone()], &[loan_id])
        .unwrap();
    assert_eq!(1, defaulted.len());
    assert_eq!(loan.amount, defaulted[0].amount);
    assert_eq!(TOKEN, test_case.balance(&gohm, &house));
    assert_eq!(0, test_case.receivables());
    // the written off principal equals the shares lent out
    assert_eq!(test_case.house_shares(), test_case.house_debt());

    let index = test_case.chain.staking().index();
    assert_eq!(Ok(index), test_case.chain.burn());
    assert_eq!(0, test_case.balance(&gohm, &house));
    assert_eq!(0, test_case.balance(&ohm, &house));
    assert_eq!(Ok(0), test_case.chain.bank().total_supply(&ohm));
}

#[test]
fn batch_length_mismatch_changes_nothing() {
    let mut test_case = TestCase::new();
    test_case.fund();
    let cooler = test_case.borrower_cooler();
    let gohm = test_case.gohm();

    let first = test_case.borrow(&cooler, 3_000 * TOKEN);
    let second = test_case.borrow(&cooler, 3_000 * TOKEN);
    test_case
        .chain
        .advance(test_case.config().duration + Duration::from_secs(1));

    let receivables = test_case.receivables();
    let events = test_case.chain.events().len();
    let escrowed = test_case.balance(&gohm, &cooler);

    assert_eq!(
        Err(Error::ClearingHouse(ContractError::LengthDiscrepancy {})),
        test_case.chain.claim_defaulted_batch(
            &overseer(),
            &[cooler.clone(), cooler.clone()],
            &[first]
        )
    );
    assert_eq!(receivables, test_case.receivables());
    assert_eq!(events, test_case.chain.events().len());
    assert_eq!(escrowed, test_case.balance(&gohm, &cooler));
    assert_eq!(0, test_case.balance(&gohm, &test_case.house()));

    // a failing entry reverts the ones before it
    assert_eq!(
        Err(Error::ClearingHouse(ContractError::Cooler(
            cooler::ContractError::UnknownLoan(7)
        ))),
        test_case
            .chain
            .claim_defaulted_batch(&overseer(), &[cooler.clone(), cooler.clone()], &[second, 7])
    );
    assert_eq!(receivables, test_case.receivables());
    assert_eq!(escrowed, test_case.balance(&gohm, &cooler));
}

#[test]
fn collateral_cannot_be_defunded() {
    let mut test_case = TestCase::new();
    test_case.fund();
    let (gohm, house) = (test_case.gohm(), test_case.house());
    test_case.chain.mint(&gohm, &house, TOKEN).unwrap();

    assert_eq!(
        Err(Error::ClearingHouse(ContractError::OnlyBurnable {})),
        test_case.chain.defund(&overseer(), &gohm, TOKEN)
    );
    assert_eq!(TOKEN, test_case.balance(&gohm, &house));
    assert_eq!(
        0,
        test_case
            .balance(&gohm, test_case.chain.treasury().address())
    );
}

#[test]
fn defund_writes_off_debt() {
    let mut test_case = TestCase::new();
    test_case.fund();
    let (dai, sdai, house) = (test_case.dai(), test_case.sdai(), test_case.house());
    let treasury = test_case.chain.treasury().address().clone();

    test_case
        .chain
        .defund(&overseer(), &sdai, 1_000 * TOKEN)
        .unwrap();
    assert_eq!(FUND_AMOUNT - 1_000 * TOKEN, test_case.house_shares());
    assert_eq!(FUND_AMOUNT - 1_000 * TOKEN, test_case.house_debt());

    test_case.chain.mint(&dai, &house, 500 * TOKEN).unwrap();
    test_case.chain.defund(&overseer(), &dai, 500 * TOKEN).unwrap();
    assert_eq!(FUND_AMOUNT - 1_500 * TOKEN, test_case.house_debt());
    assert_eq!(500 * TOKEN, test_case.balance(&dai, &treasury));
}

#[test]
fn emergency_shutdown() {
    let mut test_case = TestCase::new();
    test_case.fund();
    let cooler = test_case.borrower_cooler();
    let treasury_debt = test_case
        .chain
        .treasury()
        .total_debt(&test_case.sdai());
    assert_eq!(FUND_AMOUNT, treasury_debt);

    assert!(matches!(
        test_case.chain.emergency_shutdown(&overseer()),
        Err(Error::ClearingHouse(ContractError::Unauthorized(_)))
    ));
    assert_eq!(Ok(()), test_case.chain.emergency_shutdown(&emergency()));
    assert!(!test_case.chain.clearinghouse().is_active());
    assert_eq!(0, test_case.house_shares());
    assert_eq!(0, test_case.house_debt());

    let house = test_case.house();
    test_case.give_collateral(&borrower(), &house, TOKEN);
    assert_eq!(
        Err(Error::ClearingHouse(ContractError::NotActive {})),
        test_case.chain.lend_to_cooler(&borrower(), &cooler, 3_000 * TOKEN)
    );

    test_case.chain.advance(Duration::from_days(7));
    assert_eq!(Ok(true), test_case.chain.rebalance());
    assert_eq!(0, test_case.house_shares());

    assert_eq!(Ok(()), test_case.chain.activate(&emergency()));
    test_case.chain.advance(Duration::from_days(7));
    assert_eq!(Ok(true), test_case.chain.rebalance());
    assert_eq!(FUND_AMOUNT, test_case.house_shares());
}

#[test]
fn lends_only_through_factory_escrows() {
    let mut test_case = TestCase::new();
    test_case.fund();
    let (ohm, dai) = (test_case.ohm(), test_case.dai());

    assert_eq!(
        Err(Error::ClearingHouse(ContractError::OnlyFromFactory {})),
        test_case
            .chain
            .lend_to_cooler(&borrower(), &Addr::unchecked("forged"), TOKEN)
    );

    let cooler = test_case
        .chain
        .generate_cooler(&borrower(), &ohm, &dai)
        .unwrap();
    assert_eq!(
        Err(Error::ClearingHouse(ContractError::BadEscrow {})),
        test_case.chain.lend_to_cooler(&borrower(), &cooler, TOKEN)
    );
}
