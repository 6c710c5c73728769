use cooler::{CallbackError, ContractError, CoolerCallback, LoanId};
use finance::{arithmetic, coin::Amount, duration::Duration, interest, rate::Rate};
use platform::context::Context;
use sdk::cosmwasm_std::{Addr, Uint256};

use chain::Error;

use crate::common::{borrower, lender, test_case::TestCase, TOKEN};

const PRINCIPAL: Amount = 1_000 * TOKEN;
const COLLATERAL: Amount = 200 * TOKEN;
const LOAN_TO_COLLATERAL: Amount = 5 * TOKEN;

fn rate() -> Rate {
    Rate::from_permille(5)
}

fn term() -> Duration {
    Duration::from_days(121)
}

struct Rejecting;

impl CoolerCallback for Rejecting {
    fn is_cooler_callback(&self) -> bool {
        true
    }

    fn on_repay(
        &mut self,
        _ctx: &mut Context<'_>,
        _cooler: &Addr,
        _loan_id: LoanId,
        _amount: Amount,
    ) -> Result<(), CallbackError> {
        Err(CallbackError::new("repayments paused"))
    }

    fn on_roll(
        &mut self,
        _ctx: &mut Context<'_>,
        _cooler: &Addr,
        _loan_id: LoanId,
        _new_debt: Amount,
        _new_collateral: Amount,
    ) -> Result<(), CallbackError> {
        Ok(())
    }

    fn on_default(
        &mut self,
        _ctx: &mut Context<'_>,
        _cooler: &Addr,
        _loan_id: LoanId,
        _debt: Amount,
        _collateral: Amount,
    ) -> Result<(), CallbackError> {
        Ok(())
    }
}

/// A request of the borrower for the principal, funded by the lender.
fn requested(test_case: &mut TestCase) -> Addr {
    let cooler = test_case.borrower_cooler();
    let dai = test_case.dai();

    test_case.give_collateral(&borrower(), &cooler, COLLATERAL);
    test_case.chain.mint(&dai, &lender(), PRINCIPAL).unwrap();
    test_case
        .chain
        .approve(&lender(), &dai, &cooler, PRINCIPAL)
        .unwrap();

    assert_eq!(
        Ok(0),
        test_case.chain.request_loan(
            &borrower(),
            &cooler,
            PRINCIPAL,
            rate(),
            LOAN_TO_COLLATERAL,
            term()
        )
    );
    cooler
}

#[test]
fn interest_only_repayment() {
    let mut test_case = TestCase::new();
    let cooler = requested(&mut test_case);
    let (gohm, dai) = (test_case.gohm(), test_case.dai());

    assert_eq!(
        Ok(0),
        test_case
            .chain
            .clear_request(&lender(), &cooler, 0, false, false)
    );
    assert_eq!(PRINCIPAL, test_case.balance(&dai, &borrower()));
    assert_eq!(COLLATERAL, test_case.balance(&gohm, &cooler));

    let interest = interest::interest_for(PRINCIPAL, rate(), term()).unwrap();
    assert_eq!(1_657_534_246_575_342_000, interest);
    assert_eq!(PRINCIPAL + interest, test_case.loan(&cooler, 0).amount);

    test_case.chain.advance(Duration::from_secs(term().secs() / 2));
    test_case
        .chain
        .approve(&borrower(), &dai, &cooler, interest)
        .unwrap();
    let released = test_case
        .chain
        .repay_loan(&borrower(), &cooler, 0, interest)
        .unwrap();

    assert_eq!(
        arithmetic::mul_div(COLLATERAL, interest, PRINCIPAL + interest).unwrap(),
        released
    );
    assert_eq!(330_958_274_640_664_011, released);

    let loan = test_case.loan(&cooler, 0);
    assert_eq!(PRINCIPAL, loan.amount);
    assert_eq!(COLLATERAL - released, loan.collateral);
    assert_eq!(interest, loan.unclaimed);
    assert_eq!(released, test_case.balance(&gohm, &borrower()));
    // the collateral to debt ratio never drops on repayment
    assert!(
        Uint256::from(loan.collateral) * Uint256::from(PRINCIPAL + interest)
            >= Uint256::from(COLLATERAL) * Uint256::from(loan.amount)
    );

    assert_eq!(Ok(interest), test_case.chain.claim_repaid(&cooler, 0));
    assert_eq!(interest, test_case.balance(&dai, &lender()));
    assert_eq!(0, test_case.loan(&cooler, 0).unclaimed);
}

#[test]
fn repayment_dust() {
    let mut test_case = TestCase::new();
    let cooler = requested(&mut test_case);
    let dai = test_case.dai();

    test_case
        .chain
        .clear_request(&lender(), &cooler, 0, true, false)
        .unwrap();
    test_case.chain.approve(&borrower(), &dai, &cooler, 1).unwrap();

    assert_eq!(
        Err(Error::Cooler(ContractError::ZeroCollateralReturned {})),
        test_case.chain.repay_loan(&borrower(), &cooler, 0, 1)
    );
}

#[test]
fn failing_callback_reverts_repayment() {
    let mut test_case = TestCase::new();
    let cooler = requested(&mut test_case);
    let dai = test_case.dai();

    assert_eq!(
        Ok(0),
        test_case
            .chain
            .clear_request_with_callback(&lender(), &cooler, 0, true, &Rejecting)
    );
    assert!(test_case.loan(&cooler, 0).has_callback);

    test_case
        .chain
        .approve(&borrower(), &dai, &cooler, PRINCIPAL)
        .unwrap();
    let events = test_case.chain.events().len();
    let loan = test_case.loan(&cooler, 0);

    assert_eq!(
        Err(Error::Cooler(ContractError::NotCoolerCallback {})),
        test_case.chain.repay_loan(&borrower(), &cooler, 0, PRINCIPAL)
    );
    assert!(matches!(
        test_case
            .chain
            .repay_loan_with_callback(&borrower(), &cooler, 0, PRINCIPAL, &mut Rejecting),
        Err(Error::Cooler(ContractError::Callback(_)))
    ));

    assert_eq!(loan, test_case.loan(&cooler, 0));
    assert_eq!(PRINCIPAL, test_case.balance(&dai, &borrower()));
    assert_eq!(0, test_case.balance(&dai, &lender()));
    assert_eq!(events, test_case.chain.events().len());
}

#[test]
fn defaulted_loan_leaves_a_vacant_slot() {
    let mut test_case = TestCase::new();
    let cooler = requested(&mut test_case);
    let gohm = test_case.gohm();

    test_case
        .chain
        .clear_request(&lender(), &cooler, 0, true, false)
        .unwrap();

    assert_eq!(
        Err(Error::Cooler(ContractError::NoDefault {})),
        test_case.chain.claim_defaulted(&cooler, 0)
    );

    test_case.chain.advance(term() + Duration::from_secs(1));
    let defaulted = test_case.chain.claim_defaulted(&cooler, 0).unwrap();
    assert_eq!(COLLATERAL, defaulted.collateral);
    assert_eq!(Duration::from_secs(1), defaulted.elapsed);
    assert_eq!(COLLATERAL, test_case.balance(&gohm, &lender()));

    assert_eq!(
        Err(ContractError::UnknownLoan(0)),
        test_case.chain.cooler(&cooler).unwrap().loan(0).cloned()
    );
    assert_eq!(
        Err(Error::Cooler(ContractError::UnknownLoan(0))),
        test_case.chain.claim_defaulted(&cooler, 0)
    );
    assert_eq!(1, test_case.chain.cooler(&cooler).unwrap().loans_len());
}

#[test]
fn loan_transfer() {
    let mut test_case = TestCase::new();
    let cooler = requested(&mut test_case);
    let buyer = Addr::unchecked("buyer");

    test_case
        .chain
        .clear_request(&lender(), &cooler, 0, true, false)
        .unwrap();

    assert_eq!(
        Err(Error::Cooler(ContractError::OnlyApproved {})),
        test_case.chain.transfer_ownership(&buyer, &cooler, 0)
    );
    test_case
        .chain
        .approve_transfer(&lender(), &cooler, &buyer, 0)
        .unwrap();
    assert_eq!(Ok(()), test_case.chain.transfer_ownership(&buyer, &cooler, 0));
    assert_eq!(buyer, test_case.loan(&cooler, 0).lender);

    assert_eq!(
        Err(Error::Cooler(ContractError::OnlyApproved {})),
        test_case.chain.set_direct_repay(&lender(), &cooler, 0, false)
    );
    assert_eq!(
        Ok(()),
        test_case.chain.set_direct_repay(&buyer, &cooler, 0, false)
    );
    assert!(!test_case.loan(&cooler, 0).repay_direct);
}

#[test]
fn roll_over_lender_terms() {
    let mut test_case = TestCase::new();
    let cooler = requested(&mut test_case);

    test_case
        .chain
        .clear_request(&lender(), &cooler, 0, true, false)
        .unwrap();
    assert_eq!(
        Err(Error::Cooler(ContractError::NotRollable {})),
        test_case.chain.roll_loan(&borrower(), &cooler, 0)
    );

    test_case
        .chain
        .provide_new_terms_for_roll(&lender(), &cooler, 0, rate(), LOAN_TO_COLLATERAL, term())
        .unwrap();
    let owed = test_case.loan(&cooler, 0).amount;
    let new_collateral = test_case
        .chain
        .cooler(&cooler)
        .unwrap()
        .new_collateral_for(0)
        .unwrap();
    test_case.give_collateral(&borrower(), &cooler, new_collateral);

    assert_eq!(Ok(()), test_case.chain.roll_loan(&borrower(), &cooler, 0));

    let loan = test_case.loan(&cooler, 0);
    assert_eq!(
        owed + interest::interest_for(owed, rate(), term()).unwrap(),
        loan.amount
    );
    assert_eq!(COLLATERAL + new_collateral, loan.collateral);
    assert!(!loan.request.active);
}

#[test]
fn rescind() {
    let mut test_case = TestCase::new();
    let cooler = requested(&mut test_case);
    let gohm = test_case.gohm();

    assert_eq!(
        Err(Error::Cooler(ContractError::OnlyApproved {})),
        test_case.chain.rescind_request(&lender(), &cooler, 0)
    );
    assert_eq!(Ok(()), test_case.chain.rescind_request(&borrower(), &cooler, 0));
    assert_eq!(COLLATERAL, test_case.balance(&gohm, &borrower()));
    assert_eq!(
        Err(Error::Cooler(ContractError::Deactivated {})),
        test_case
            .chain
            .clear_request(&lender(), &cooler, 0, true, false)
    );
}
