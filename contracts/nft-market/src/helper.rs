use super::*;

pub fn get_account_address(address: Address) -> ContractResult<AccountAddress> {
    match address {
        Address::Account(addr) => Ok(addr),
        Address::Contract(_) => bail!(CustomContractError::OnlyAccountAddress.into()),
    }
}

pub fn token_metadata_event(token_id: ContractTokenId, token_uri: String) -> ContractEvent {
    Cis2Event::TokenMetadata(TokenMetadataEvent {
        token_id,
        metadata_url: MetadataUrl {
            url: token_uri,
            hash: None,
        },
    })
}

/// Event logged next to the CIS2 event whenever a token changes hands
/// through the marketplace.
pub fn nft_transfer_event(
    token_id: ContractTokenId,
    from: Option<Address>,
    to: Address,
    token_uri: String,
    price: Amount,
) -> CustomEvent {
    CustomEvent::NftTransfer(NftTransferEvent {
        token_id,
        from,
        to,
        token_uri,
        price,
    })
}

pub fn transfer_event(token_id: ContractTokenId, from: Address, to: Address) -> ContractEvent {
    Cis2Event::Transfer(TransferEvent {
        token_id,
        amount: ContractTokenAmount::from(1),
        from,
        to,
    })
}
