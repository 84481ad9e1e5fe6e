use super::*;

/// An untagged event of a token changing hands through the marketplace.
#[derive(Debug, Serialize, SchemaType)]
pub struct NftTransferEvent {
    /// The ID of the token being moved.
    pub token_id: ContractTokenId,
    /// The address owning the token before the move, `None` when minting.
    pub from: Option<Address>,
    /// The address owning the token after the move.
    pub to: Address,
    /// Metadata URI, only set when minting.
    pub token_uri: String,
    /// Listing price, only set when listing.
    pub price: Amount,
}

/// An untagged event of fees being paid out to the contract owner.
#[derive(Debug, Serialize, SchemaType)]
pub struct WithdrawEvent {
    /// Account receiving the fees.
    pub to: AccountAddress,
    /// Amount paid out.
    pub amount: Amount,
}

/// An untagged event of the contract owner being replaced.
#[derive(Debug, Serialize, SchemaType)]
pub struct OwnershipTransferredEvent {
    pub previous_owner: AccountAddress,
    pub new_owner: AccountAddress,
}

/// Tagged Custom event to be serialized for the event log.
#[derive(Debug)]
pub enum CustomEvent {
    /// Minting, listing, buying or unlisting NFT
    NftTransfer(NftTransferEvent),
    /// Withdrawing collected fees
    Withdraw(WithdrawEvent),
    /// Handing over the contract
    OwnershipTransferred(OwnershipTransferredEvent),
}

impl Serial for CustomEvent {
    fn serial<W: Write>(&self, out: &mut W) -> Result<(), W::Err> {
        match self {
            CustomEvent::NftTransfer(event) => {
                out.write_u8(NFT_TRANSFER_TAG)?;
                event.serial(out)
            }
            CustomEvent::Withdraw(event) => {
                out.write_u8(WITHDRAW_TAG)?;
                event.serial(out)
            }
            CustomEvent::OwnershipTransferred(event) => {
                out.write_u8(OWNERSHIP_TRANSFERRED_TAG)?;
                event.serial(out)
            }
        }
    }
}

impl Deserial for CustomEvent {
    fn deserial<R: Read>(source: &mut R) -> ParseResult<Self> {
        let tag = source.read_u8()?;
        match tag {
            NFT_TRANSFER_TAG => NftTransferEvent::deserial(source).map(CustomEvent::NftTransfer),
            WITHDRAW_TAG => WithdrawEvent::deserial(source).map(CustomEvent::Withdraw),
            OWNERSHIP_TRANSFERRED_TAG => OwnershipTransferredEvent::deserial(source)
                .map(CustomEvent::OwnershipTransferred),
            _ => Err(ParseError::default()),
        }
    }
}
