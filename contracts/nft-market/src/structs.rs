use super::*;

/// The state for each address.
#[derive(Serial, DeserialWithState, Deletable, StateClone)]
#[concordium(state_parameter = "S")]
pub struct AddressState<S: HasStateApi> {
    /// The tokens owned by this address.
    pub owned_tokens: StateSet<ContractTokenId, S>,
    /// The address which are currently enabled as operators for this address.
    pub operators: StateSet<Address, S>,
}

/// Data kept for every minted token.
#[derive(Debug, Serialize, SchemaType, Clone, PartialEq, Eq)]
pub struct TokenDetails {
    /// Current owner, the contract itself while the token is listed.
    pub owner: Address,
    /// Metadata URI given at minting.
    pub token_uri: String,
}

/// A token offered for sale.
#[derive(Debug, Serialize, SchemaType, Clone, Copy, PartialEq, Eq)]
pub struct Listing {
    /// Account that listed the token and receives the proceeds.
    pub seller: AccountAddress,
    /// Exact amount a buyer has to pay.
    pub price: Amount,
}

/// The contract state.
#[derive(Serial, DeserialWithState, StateClone)]
#[concordium(state_parameter = "S")]
pub struct State<S: HasStateApi> {
    /// Account allowed to withdraw the collected fees.
    pub owner: AccountAddress,
    /// ID the next minted token gets. Wider than the token ID so that
    /// `u32::MAX` itself can still be minted.
    pub next_token_id: u64,
    /// The state for each address.
    pub addresses: StateMap<Address, AddressState<S>, S>,
    /// All minted tokens.
    pub tokens: StateMap<ContractTokenId, TokenDetails, S>,
    /// Tokens currently up for sale.
    pub listings: StateMap<ContractTokenId, Listing, S>,
}

#[derive(Debug, Serialize, SchemaType)]
pub struct ListParams {
    /// Token to put up for sale.
    pub token_id: ContractTokenId,
    /// Asking price, must be greater than zero.
    pub price: Amount,
}
