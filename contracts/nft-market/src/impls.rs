use super::*;

use core::convert::TryFrom;

impl<S: HasStateApi> AddressState<S> {
    fn empty(state_builder: &mut StateBuilder<S>) -> Self {
        Self {
            owned_tokens: state_builder.new_set(),
            operators: state_builder.new_set(),
        }
    }
}

// Functions for creating, updating and querying the contract state.
impl<S: HasStateApi> State<S> {
    /// Creates a empty state with no tokens and no listings.
    pub fn empty(owner: AccountAddress, state_builder: &mut StateBuilder<S>) -> Self {
        State {
            owner,
            next_token_id: u64::from(FIRST_TOKEN_ID),
            addresses: state_builder.new_map(),
            tokens: state_builder.new_map(),
            listings: state_builder.new_map(),
        }
    }

    /// Mint the next token with the given address as the owner.
    /// Results in an error once the token IDs are exhausted.
    pub fn mint(
        &mut self,
        owner: Address,
        token_uri: String,
        state_builder: &mut StateBuilder<S>,
    ) -> ContractResult<ContractTokenId> {
        let token_id = u32::try_from(self.next_token_id)
            .map(TokenIdU32)
            .map_err(|_| CustomContractError::TokenIdOverflow)?;
        self.next_token_id += 1;

        self.tokens.insert(token_id, TokenDetails { owner, token_uri });

        let mut owner_address = self
            .addresses
            .entry(owner)
            .or_insert_with(|| AddressState::empty(state_builder));
        owner_address.owned_tokens.insert(token_id);

        Ok(token_id)
    }

    /// Check that the token ID currently exists in this contract.
    #[inline(always)]
    pub fn contains_token(&self, token_id: &ContractTokenId) -> bool {
        self.tokens.get(token_id).is_some()
    }

    pub fn owner_of(&self, token_id: &ContractTokenId) -> ContractResult<Address> {
        self.tokens
            .get(token_id)
            .map(|details| details.owner)
            .ok_or(ContractError::InvalidTokenId)
    }

    pub fn token_uri(&self, token_id: &ContractTokenId) -> ContractResult<String> {
        self.tokens
            .get(token_id)
            .map(|details| details.token_uri.clone())
            .ok_or(ContractError::InvalidTokenId)
    }

    /// Get the current balance of a given token ID for a given address.
    /// Results in an error if the token ID does not exist in the state.
    /// Since this contract only contains NFTs, the balance will always be
    /// either 1 or 0.
    pub fn balance(
        &self,
        token_id: &ContractTokenId,
        address: &Address,
    ) -> ContractResult<ContractTokenAmount> {
        let owner = self.owner_of(token_id)?;
        Ok(ContractTokenAmount::from(if owner == *address { 1 } else { 0 }))
    }

    /// Tokens owned by the given address, in no particular order.
    pub fn owned_tokens(&self, address: &Address) -> Vec<ContractTokenId> {
        self.addresses
            .get(address)
            .map(|address_state| address_state.owned_tokens.iter().map(|id| *id).collect())
            .unwrap_or_default()
    }

    /// Check if a given address is an operator of a given owner address.
    pub fn is_operator(&self, owner: &Address, address: &Address) -> bool {
        self.addresses
            .get(owner)
            .map(|address_state| address_state.operators.contains(address))
            .unwrap_or(false)
    }

    /// Update the state with a transfer of some token.
    /// Results in an error if the token ID does not exist in the state or if
    /// the from address have insufficient tokens to do the transfer.
    pub fn transfer(
        &mut self,
        token_id: &ContractTokenId,
        amount: ContractTokenAmount,
        from: &Address,
        to: Address,
        state_builder: &mut StateBuilder<S>,
    ) -> ContractResult<()> {
        ensure!(self.contains_token(token_id), ContractError::InvalidTokenId);

        // A zero transfer does not modify the state.
        if amount == ContractTokenAmount::from(0) {
            return Ok(());
        }

        // Since this contract only contains NFTs, no one will have an amount
        // greater than 1.
        ensure!(
            amount == ContractTokenAmount::from(1),
            ContractError::InsufficientFunds
        );

        self.move_token(token_id, from, to, state_builder)
    }

    /// Hand the token over from `from` to `to`, keeping the owned token sets
    /// in line with the token table.
    fn move_token(
        &mut self,
        token_id: &ContractTokenId,
        from: &Address,
        to: Address,
        state_builder: &mut StateBuilder<S>,
    ) -> ContractResult<()> {
        {
            let mut details = self
                .tokens
                .get_mut(token_id)
                .ok_or(ContractError::InvalidTokenId)?;
            ensure!(details.owner == *from, ContractError::InsufficientFunds);
            details.owner = to;
        }

        if let Some(mut from_address_state) = self.addresses.get_mut(from) {
            from_address_state.owned_tokens.remove(token_id);
        }

        let mut to_address_state = self
            .addresses
            .entry(to)
            .or_insert_with(|| AddressState::empty(state_builder));
        to_address_state.owned_tokens.insert(*token_id);

        Ok(())
    }

    /// Update the state adding a new operator for a given address.
    /// Succeeds even if the `operator` is already an operator for the
    /// `address`.
    pub fn add_operator(
        &mut self,
        owner: &Address,
        operator: &Address,
        state_builder: &mut StateBuilder<S>,
    ) {
        let mut owner_address_state = self
            .addresses
            .entry(*owner)
            .or_insert_with(|| AddressState::empty(state_builder));
        owner_address_state.operators.insert(*operator);
    }

    /// Update the state removing an operator for a given address.
    /// Succeeds even if the `operator` is _not_ an operator for the `address`.
    pub fn remove_operator(&mut self, owner: &Address, operator: &Address) {
        self.addresses
            .get_mut(owner)
            .map(|mut address_state| address_state.operators.remove(operator));
    }

    /// Move the token into the custody of `escrow` and record the listing.
    /// Results in an error if `seller` does not own the token.
    pub fn list(
        &mut self,
        token_id: ContractTokenId,
        seller: AccountAddress,
        price: Amount,
        escrow: Address,
        state_builder: &mut StateBuilder<S>,
    ) -> ContractResult<()> {
        self.move_token(&token_id, &Address::Account(seller), escrow, state_builder)?;
        self.listings.insert(token_id, Listing { seller, price });
        Ok(())
    }

    /// Fails with TokenNotListedForSale, if token is not listed.
    pub fn listing(&self, token_id: &ContractTokenId) -> ContractResult<Listing> {
        self.listings
            .get(token_id)
            .map(|listing| *listing)
            .ok_or_else(|| CustomContractError::TokenNotListedForSale.into())
    }

    /// Remove a listing and hand the token from `escrow` to `to`.
    /// Returns the removed listing.
    pub fn close_listing(
        &mut self,
        token_id: &ContractTokenId,
        escrow: &Address,
        to: Address,
        state_builder: &mut StateBuilder<S>,
    ) -> ContractResult<Listing> {
        let listing = self
            .listings
            .remove_and_get(token_id)
            .ok_or(CustomContractError::TokenNotListedForSale)?;
        self.move_token(token_id, escrow, to, state_builder)?;
        Ok(listing)
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use test_infrastructure::*;

    const ACCOUNT_0: AccountAddress = AccountAddress([0u8; 32]);
    const ADDRESS_0: Address = Address::Account(ACCOUNT_0);
    const ACCOUNT_1: AccountAddress = AccountAddress([1u8; 32]);
    const ADDRESS_1: Address = Address::Account(ACCOUNT_1);
    const ESCROW: Address = Address::Contract(ContractAddress {
        index: 10,
        subindex: 0,
    });

    fn uri() -> String {
        String::from("ipfs://bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi")
    }

    #[concordium_test]
    fn test_mint_assigns_sequential_ids() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = State::empty(ACCOUNT_0, &mut state_builder);

        let first = state
            .mint(ADDRESS_0, uri(), &mut state_builder)
            .expect_report("Failed to mint first token");
        let second = state
            .mint(ADDRESS_1, uri(), &mut state_builder)
            .expect_report("Failed to mint second token");

        claim_eq!(first, TokenIdU32(FIRST_TOKEN_ID));
        claim_eq!(second, TokenIdU32(FIRST_TOKEN_ID + 1));
        claim_eq!(state.owned_tokens(&ADDRESS_0), vec![first]);
        claim_eq!(state.owned_tokens(&ADDRESS_1), vec![second]);
    }

    #[concordium_test]
    fn test_mint_rejects_when_ids_run_out() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = State::empty(ACCOUNT_0, &mut state_builder);
        state.next_token_id = u64::from(u32::MAX);

        // The last ID is still handed out.
        let last = state
            .mint(ADDRESS_0, uri(), &mut state_builder)
            .expect_report("Failed to mint the last token");
        claim_eq!(last, TokenIdU32(u32::MAX));
        claim_eq!(state.owner_of(&last), Ok(ADDRESS_0));

        let err = state
            .mint(ADDRESS_1, uri(), &mut state_builder)
            .expect_err_report("Minting past the last ID should fail");

        claim_eq!(err, ContractError::from(CustomContractError::TokenIdOverflow));
        claim_eq!(state.owned_tokens(&ADDRESS_1), Vec::<ContractTokenId>::new());
    }

    #[concordium_test]
    fn test_balance() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = State::empty(ACCOUNT_0, &mut state_builder);
        let token_id = state
            .mint(ADDRESS_0, uri(), &mut state_builder)
            .expect_report("Failed to mint token");

        claim_eq!(
            state.balance(&token_id, &ADDRESS_0),
            Ok(ContractTokenAmount::from(1))
        );
        claim_eq!(
            state.balance(&token_id, &ADDRESS_1),
            Ok(ContractTokenAmount::from(0))
        );
        claim_eq!(
            state.balance(&TokenIdU32(99999), &ADDRESS_0),
            Err(ContractError::InvalidTokenId)
        );
    }

    #[concordium_test]
    fn test_transfer_amounts() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = State::empty(ACCOUNT_0, &mut state_builder);
        let token_id = state
            .mint(ADDRESS_0, uri(), &mut state_builder)
            .expect_report("Failed to mint token");

        // Zero transfer leaves the owner as is.
        state
            .transfer(
                &token_id,
                ContractTokenAmount::from(0),
                &ADDRESS_1,
                ADDRESS_1,
                &mut state_builder,
            )
            .expect_report("Zero transfer should succeed");
        claim_eq!(state.owner_of(&token_id), Ok(ADDRESS_0));

        claim_eq!(
            state.transfer(
                &token_id,
                ContractTokenAmount::from(2),
                &ADDRESS_0,
                ADDRESS_1,
                &mut state_builder,
            ),
            Err(ContractError::InsufficientFunds)
        );

        state
            .transfer(
                &token_id,
                ContractTokenAmount::from(1),
                &ADDRESS_0,
                ADDRESS_1,
                &mut state_builder,
            )
            .expect_report("Transfer by owner should succeed");
        claim_eq!(state.owner_of(&token_id), Ok(ADDRESS_1));
        claim!(state.owned_tokens(&ADDRESS_0).is_empty());
        claim_eq!(state.owned_tokens(&ADDRESS_1), vec![token_id]);
    }

    #[concordium_test]
    fn test_list_and_close_listing() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = State::empty(ACCOUNT_0, &mut state_builder);
        let token_id = state
            .mint(ADDRESS_0, uri(), &mut state_builder)
            .expect_report("Failed to mint token");
        let price = Amount::from_micro_ccd(100);

        claim_eq!(
            state.list(token_id, ACCOUNT_1, price, ESCROW, &mut state_builder),
            Err(ContractError::InsufficientFunds),
            "Only the owner's token can be listed"
        );

        state
            .list(token_id, ACCOUNT_0, price, ESCROW, &mut state_builder)
            .expect_report("Failed to list token");
        claim_eq!(state.owner_of(&token_id), Ok(ESCROW));
        claim_eq!(
            state.listing(&token_id),
            Ok(Listing {
                seller: ACCOUNT_0,
                price,
            })
        );

        let listing = state
            .close_listing(&token_id, &ESCROW, ADDRESS_1, &mut state_builder)
            .expect_report("Failed to close listing");
        claim_eq!(listing.seller, ACCOUNT_0);
        claim_eq!(state.owner_of(&token_id), Ok(ADDRESS_1));
        claim_eq!(
            state.listing(&token_id),
            Err(CustomContractError::TokenNotListedForSale.into())
        );
        claim_eq!(
            state.close_listing(&token_id, &ESCROW, ADDRESS_1, &mut state_builder),
            Err(CustomContractError::TokenNotListedForSale.into())
        );
    }

    #[concordium_test]
    fn test_operators() {
        let mut state_builder = TestStateBuilder::new();
        let mut state = State::empty(ACCOUNT_0, &mut state_builder);

        state.add_operator(&ADDRESS_0, &ADDRESS_1, &mut state_builder);
        claim!(state.is_operator(&ADDRESS_0, &ADDRESS_1));
        claim!(!state.is_operator(&ADDRESS_1, &ADDRESS_0));

        state.remove_operator(&ADDRESS_0, &ADDRESS_1);
        claim!(!state.is_operator(&ADDRESS_0, &ADDRESS_1));
    }
}
