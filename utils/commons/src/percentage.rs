use super::*;

use core::ops::Mul;

/// Whole percentage expressed in micro percent.
const HUNDRED_PERCENT: u64 = 100_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, SchemaType)]
pub struct Percentage(u64);

impl Percentage {
    pub fn from_micro_percent(micro_percent: u64) -> Self {
        Self(micro_percent)
    }

    pub fn from_percent(percent: u64) -> Self {
        Self(percent * 1_000_000)
    }

    /// What is left of a hundred percent after taking `self`.
    pub fn complement(self) -> Self {
        Percentage(HUNDRED_PERCENT.saturating_sub(self.0))
    }
}

/// Rounds down to the nearest micro CCD.
impl Mul<Amount> for Percentage {
    type Output = Amount;

    fn mul(self, rhs: Amount) -> Self::Output {
        Amount::from_micro_ccd(
            (rhs.micro_ccd as u128 * self.0 as u128 / HUNDRED_PERCENT as u128) as u64,
        )
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;

    #[concordium_test]
    fn test_complement() {
        claim_eq!(
            Percentage::from_percent(5).complement(),
            Percentage::from_percent(95)
        );
        claim_eq!(
            Percentage::from_percent(150).complement(),
            Percentage::from_micro_percent(0)
        );
    }

    #[concordium_test]
    fn test_mul_rounds_down() {
        claim_eq!(
            Percentage::from_percent(95) * Amount::from_micro_ccd(99),
            Amount::from_micro_ccd(94)
        );
        claim_eq!(
            Percentage::from_percent(95) * Amount::from_ccd(100),
            Amount::from_ccd(95)
        );
    }
}
