use super::*;

/// Split of a sale price between the seller and the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, SchemaType)]
pub struct SaleShares {
    pub seller: Amount,
    pub fee: Amount,
}

/// The seller gets the complement of `fee` rounded down, the marketplace keeps
/// the rest, so the two shares always add up to `price`.
pub fn calc_sale_shares(price: Amount, fee: Percentage) -> SaleShares {
    let seller = fee.complement() * price;
    SaleShares {
        seller,
        fee: Amount::from_micro_ccd(price.micro_ccd - seller.micro_ccd),
    }
}

/// Shares for a sale at the marketplace fee.
pub fn marketplace_shares(price: Amount) -> SaleShares {
    calc_sale_shares(price, Percentage::from_percent(MARKETPLACE_FEE_PERCENT))
}

#[concordium_cfg_test]
mod tests {
    use super::*;

    #[concordium_test]
    fn test_shares() {
        let expected_shares = SaleShares {
            seller: Amount::from_micro_ccd(95),
            fee: Amount::from_micro_ccd(5),
        };

        claim_eq!(expected_shares, marketplace_shares(Amount::from_micro_ccd(100)));
    }

    #[concordium_test]
    fn test_shares_round_in_favour_of_fee() {
        let shares = marketplace_shares(Amount::from_micro_ccd(5));

        // floor(5 * 95 / 100) = 4
        claim_eq!(shares.seller, Amount::from_micro_ccd(4));
        claim_eq!(shares.fee, Amount::from_micro_ccd(1));
    }

    #[concordium_test]
    fn test_shares_add_up_to_price() {
        for micro_ccd in [0u64, 1, 19, 20, 21, 1_000_003, u64::MAX] {
            let price = Amount::from_micro_ccd(micro_ccd);
            let shares = marketplace_shares(price);
            claim_eq!(shares.seller.micro_ccd + shares.fee.micro_ccd, micro_ccd);
        }
    }
}
