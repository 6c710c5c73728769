use std::fmt::Debug;

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("[Finance] Multiplication overflow when evaluating `{details}`")]
    MultiplicationOverflow { details: String },

    #[error("[Finance] Addition overflow when evaluating `{details}`")]
    AdditionOverflow { details: String },

    #[error("[Finance] Division by zero when evaluating `{details}`")]
    DivisionByZero { details: String },
}

impl Error {
    pub fn multiplication_overflow<L, R>(lhs: L, rhs: R) -> Self
    where
        L: Debug,
        R: Debug,
    {
        Self::MultiplicationOverflow {
            details: format!("({:?} * {:?})", lhs, rhs),
        }
    }

    pub fn addition_overflow<L, R>(lhs: L, rhs: R) -> Self
    where
        L: Debug,
        R: Debug,
    {
        Self::AdditionOverflow {
            details: format!("({:?} + {:?})", lhs, rhs),
        }
    }

    pub fn division_by_zero<N>(numerator: N) -> Self
    where
        N: Debug,
    {
        Self::DivisionByZero {
            details: format!("({:?} / 0)", numerator),
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
