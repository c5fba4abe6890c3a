use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::models::registration::DanceType;

/// Registration fee per dance type, in INR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    pub solo: Decimal,
    pub duo: Decimal,
    pub group: Decimal,
}

impl FeeSchedule {
    pub fn new(solo: Decimal, duo: Decimal, group: Decimal) -> Self {
        Self { solo, duo, group }
    }

    /// Same fee for every entry.
    pub fn flat(amount: Decimal) -> Self {
        Self::new(amount, amount, amount)
    }

    pub fn fee_for(&self, dance_type: DanceType) -> Decimal {
        match dance_type {
            DanceType::Solo => self.solo,
            DanceType::Duo => self.duo,
            DanceType::Group => self.group,
        }
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self::new(Decimal::from(500), Decimal::from(800), Decimal::from(1200))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(DanceType::Solo, dec!(500))]
    #[case(DanceType::Duo, dec!(800))]
    #[case(DanceType::Group, dec!(1200))]
    fn test_default_fee(#[case] dance_type: DanceType, #[case] expected: Decimal) {
        assert_eq!(FeeSchedule::default().fee_for(dance_type), expected);
    }

    #[test]
    fn test_flat_fee() {
        let fees = FeeSchedule::flat(dec!(500));
        assert_eq!(fees.fee_for(DanceType::Group), dec!(500));
        assert_eq!(fees.fee_for(DanceType::Duo), fees.fee_for(DanceType::Solo));
    }
}
