use anchor_lang::prelude::*;
use crate::errors::OracleMiddlewareError;

/// Protocol operation a price is requested for. Variant order is the wire encoding.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    None,
    Initialize,
    InitiateDeposit,
    ValidateDeposit,
    InitiateWithdrawal,
    ValidateWithdrawal,
    InitiateOpenPosition,
    ValidateOpenPosition,
    InitiateClosePosition,
    ValidateClosePosition,
    Liquidation,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionClass {
    /// Freshest price, never biased.
    Immediate,
    /// Commits a pending operation at "now".
    Initiate,
    /// Confirms a pending operation at its committed timestamp.
    Validate,
}

/// Which way the confidence interval or penalty moves the price.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BiasDirection {
    None,
    Up,
    Down,
}

impl Action {
    pub fn class(self) -> ActionClass {
        match self {
            Action::None | Action::Initialize | Action::Liquidation => ActionClass::Immediate,
            Action::InitiateDeposit
            | Action::InitiateWithdrawal
            | Action::InitiateOpenPosition
            | Action::InitiateClosePosition => ActionClass::Initiate,
            Action::ValidateDeposit
            | Action::ValidateWithdrawal
            | Action::ValidateOpenPosition
            | Action::ValidateClosePosition => ActionClass::Validate,
        }
    }

    /// Withdrawals and opening a position are disadvantaged by an underpriced asset,
    /// deposits and closing a position by an overpriced one.
    pub fn bias(self) -> BiasDirection {
        match self {
            Action::InitiateWithdrawal
            | Action::ValidateWithdrawal
            | Action::InitiateOpenPosition
            | Action::ValidateOpenPosition => BiasDirection::Up,
            Action::InitiateDeposit
            | Action::ValidateDeposit
            | Action::InitiateClosePosition
            | Action::ValidateClosePosition => BiasDirection::Down,
            Action::None | Action::Initialize | Action::Liquidation => BiasDirection::None,
        }
    }
}

impl TryFrom<u8> for Action {
    type Error = anchor_lang::error::Error;

    fn try_from(value: u8) -> Result<Self> {
        let action = match value {
            0 => Action::None,
            1 => Action::Initialize,
            2 => Action::InitiateDeposit,
            3 => Action::ValidateDeposit,
            4 => Action::InitiateWithdrawal,
            5 => Action::ValidateWithdrawal,
            6 => Action::InitiateOpenPosition,
            7 => Action::ValidateOpenPosition,
            8 => Action::InitiateClosePosition,
            9 => Action::ValidateClosePosition,
            10 => Action::Liquidation,
            _ => return err!(OracleMiddlewareError::UnsupportedAction),
        };
        Ok(action)
    }
}

impl From<Action> for u8 {
    fn from(action: Action) -> u8 {
        match action {
            Action::None => 0,
            Action::Initialize => 1,
            Action::InitiateDeposit => 2,
            Action::ValidateDeposit => 3,
            Action::InitiateWithdrawal => 4,
            Action::ValidateWithdrawal => 5,
            Action::InitiateOpenPosition => 6,
            Action::ValidateOpenPosition => 7,
            Action::InitiateClosePosition => 8,
            Action::ValidateClosePosition => 9,
            Action::Liquidation => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::test_utils::assert_error;

    #[test]
    fn discriminants_round_trip() {
        for value in 0u8..=10 {
            let action = Action::try_from(value).unwrap();
            assert_eq!(u8::from(action), value);
        }
    }

    #[test]
    fn unknown_discriminant_is_rejected() {
        assert_error(Action::try_from(11), OracleMiddlewareError::UnsupportedAction);
        assert!(Action::try_from(u8::MAX).is_err());
    }

    #[test]
    fn classes_and_bias_agree() {
        for value in 0u8..=10 {
            let action = Action::try_from(value).unwrap();
            let unbiased = action.bias() == BiasDirection::None;
            assert_eq!(unbiased, action.class() == ActionClass::Immediate, "{action:?}");
        }
        assert_eq!(Action::ValidateWithdrawal.bias(), BiasDirection::Up);
        assert_eq!(Action::ValidateClosePosition.bias(), BiasDirection::Down);
        assert_eq!(Action::InitiateOpenPosition.class(), ActionClass::Initiate);
    }
}
