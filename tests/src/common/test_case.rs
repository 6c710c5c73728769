use chain::{Chain, Genesis};
use clearinghouse::Config;
use cooler::{Loan, LoanId};
use finance::coin::Amount;
use modules::Ledger;
use sdk::{
    cosmwasm_std::{Addr, Uint128},
    testing,
};

use super::{borrower, emergency, overseer, TOKEN};

pub const FUND_AMOUNT: Amount = 1_000_000 * TOKEN;

pub struct TestCase {
    pub chain: Chain,
}

impl TestCase {
    pub fn new() -> Self {
        Self::with_config(Config {
            fund_amount: Uint128::new(FUND_AMOUNT),
            ..Default::default()
        })
    }

    pub fn with_config(config: Config) -> Self {
        testing::init_tracing();

        let chain = Chain::new(Genesis {
            overseer: overseer(),
            emergency: emergency(),
            clearinghouse: config,
            ..Default::default()
        })
        .unwrap();

        Self { chain }
    }

    pub fn gohm(&self) -> Addr {
        self.chain.assets().gohm.clone()
    }

    pub fn ohm(&self) -> Addr {
        self.chain.assets().ohm.clone()
    }

    pub fn dai(&self) -> Addr {
        self.chain.assets().dai.clone()
    }

    pub fn sdai(&self) -> Addr {
        self.chain.assets().sdai.clone()
    }

    pub fn house(&self) -> Addr {
        self.chain.clearinghouse().address().clone()
    }

    pub fn config(&self) -> Config {
        self.chain.clearinghouse().config().clone()
    }

    pub fn fund(&mut self) -> &mut Self {
        assert_eq!(Ok(true), self.chain.rebalance());
        self
    }

    /// The escrow of the borrower for gOHM and DAI.
    pub fn borrower_cooler(&mut self) -> Addr {
        let (gohm, dai) = (self.gohm(), self.dai());
        self.chain
            .generate_cooler(&borrower(), &gohm, &dai)
            .unwrap()
    }

    /// Mints gOHM to `owner` and allows `spender` to pledge it.
    pub fn give_collateral(&mut self, owner: &Addr, spender: &Addr, amount: Amount) -> &mut Self {
        let gohm = self.gohm();
        self.chain.mint(&gohm, owner, amount).unwrap();
        self.chain.approve(owner, &gohm, spender, amount).unwrap();
        self
    }

    /// Borrows `amount` from the clearing house, pledging freshly minted gOHM.
    pub fn borrow(&mut self, cooler: &Addr, amount: Amount) -> LoanId {
        let collateral = self
            .chain
            .cooler(cooler)
            .unwrap()
            .collateral_for(amount, self.config().loan_to_collateral())
            .unwrap();
        let house = self.house();
        self.give_collateral(&borrower(), &house, collateral);

        self.chain
            .lend_to_cooler(&borrower(), cooler, amount)
            .unwrap()
    }

    pub fn loan(&self, cooler: &Addr, loan_id: LoanId) -> Loan {
        self.chain
            .cooler(cooler)
            .unwrap()
            .loan(loan_id)
            .unwrap()
            .clone()
    }

    pub fn balance(&self, token: &Addr, holder: &Addr) -> Amount {
        self.chain.balance(token, holder)
    }

    pub fn house_shares(&self) -> Amount {
        self.balance(&self.sdai(), &self.house())
    }

    pub fn house_debt(&self) -> Amount {
        self.chain
            .treasury()
            .reserve_debt(&self.sdai(), &self.house())
    }

    pub fn receivables(&self) -> Amount {
        self.chain.clearinghouse().receivables()
    }
}
