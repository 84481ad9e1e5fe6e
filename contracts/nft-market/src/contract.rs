use super::*;

/// List of supported standards by this contract address.
const SUPPORTS_STANDARDS: [StandardIdentifier<'static>; 2] =
    [CIS0_STANDARD_IDENTIFIER, CIS2_STANDARD_IDENTIFIER];

/// Initialize contract instance with no tokens and no listings.
/// The account creating the instance becomes the contract owner.
#[init(contract = "NFTMarket")]
fn init<S: HasStateApi>(
    ctx: &impl HasInitContext,
    state_builder: &mut StateBuilder<S>,
) -> InitResult<State<S>> {
    // Construct the initial contract state.
    let state = State::empty(ctx.init_origin(), state_builder);
    Ok(state)
}

/// Mint a new token owned by the sender.
/// Logs a `Mint`, a `TokenMetadata` and an `NftTransfer` event.
/// Returns the ID of the new token.
///
/// It rejects if:
/// - Fails to parse parameter.
/// - All token IDs are taken.
/// - Fails to log any of the events.
#[receive(
    contract = "NFTMarket",
    name = "createNFT",
    parameter = "String",
    return_value = "ContractTokenId",
    mutable,
    enable_logger
)]
fn create_nft<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<ContractTokenId> {
    // Parse the parameter.
    let token_uri: String = ctx.parameter_cursor().get()?;
    let owner = ctx.sender();

    let (state, state_builder) = host.state_and_builder();
    let token_id = state.mint(owner, token_uri.clone(), state_builder)?;

    // Event for minted NFT.
    logger.log(&ContractEvent::Mint(MintEvent {
        token_id,
        amount: ContractTokenAmount::from(1),
        owner,
    }))?;

    // Metadata URL for the NFT.
    logger.log(&token_metadata_event(token_id, token_uri.clone()))?;

    logger.log(&nft_transfer_event(
        token_id,
        None,
        owner,
        token_uri,
        Amount::zero(),
    ))?;

    Ok(token_id)
}

/// Put a token up for sale. The token is moved into the custody of this
/// contract until it is bought or the listing is cancelled.
/// Logs a `Transfer` and an `NftTransfer` event.
///
/// It rejects if:
/// - Fails to parse parameter.
/// - The price is zero.
/// - The token does not exist.
/// - The sender is not the owner of the token.
/// - The owner is a contract address.
/// - Fails to log any of the events.
#[receive(
    contract = "NFTMarket",
    name = "listNFT",
    parameter = "ListParams",
    mutable,
    enable_logger
)]
fn list_nft<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params: ListParams = ctx.parameter_cursor().get()?;
    let sender = ctx.sender();
    let escrow = Address::Contract(ctx.self_address());

    ensure!(
        params.price > Amount::zero(),
        CustomContractError::InvalidPrice.into()
    );

    let (state, state_builder) = host.state_and_builder();

    // Ensuring only owner of NFT can list it.
    ensure!(
        state.owner_of(&params.token_id)? == sender,
        ContractError::Unauthorized
    );
    let seller = get_account_address(sender)?;

    state.list(params.token_id, seller, params.price, escrow, state_builder)?;

    logger.log(&transfer_event(params.token_id, sender, escrow))?;

    // Event for listing NFT.
    logger.log(&nft_transfer_event(
        params.token_id,
        Some(sender),
        escrow,
        String::new(),
        params.price,
    ))?;

    Ok(())
}

/// Buy one of the listed NFTs.
///
/// The seller receives the price minus the marketplace fee, the fee stays in
/// the contract balance.
/// Logs a `Transfer` and an `NftTransfer` event.
///
/// Rejects if:
/// - It fails to parse the parameter.
/// - The token is not listed.
/// - The amount is not equal to the listed price.
/// - The transfer to the seller fails.
/// - Fails to log any of the events.
#[receive(
    contract = "NFTMarket",
    name = "buyNFT",
    parameter = "ContractTokenId",
    mutable,
    enable_logger,
    payable
)]
fn buy_nft<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    amount: Amount,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let token_id: ContractTokenId = ctx.parameter_cursor().get()?;
    let buyer = ctx.sender();
    let escrow = Address::Contract(ctx.self_address());

    let listing = host.state().listing(&token_id)?;

    // Ensuring the exact listing price is paid
    ensure!(
        amount == listing.price,
        CustomContractError::IncorrectPrice.into()
    );

    let (state, state_builder) = host.state_and_builder();
    state.close_listing(&token_id, &escrow, buyer, state_builder)?;

    let shares = marketplace_shares(listing.price);
    host.invoke_transfer(&listing.seller, shares.seller)
        .map_err(CustomContractError::from)?;

    logger.log(&transfer_event(token_id, escrow, buyer))?;

    // Event for buying NFT.
    logger.log(&nft_transfer_event(
        token_id,
        Some(escrow),
        buyer,
        String::new(),
        Amount::zero(),
    ))?;

    Ok(())
}

/// Take a listed token off the market and hand it back to the seller.
/// Logs a `Transfer` and an `NftTransfer` event.
///
/// Rejects if
/// - It fails to parse the parameter.
/// - The token is not listed.
/// - Not send by the seller.
/// - Fails to log any of the events.
#[receive(
    contract = "NFTMarket",
    name = "cancelListing",
    parameter = "ContractTokenId",
    mutable,
    enable_logger
)]
fn cancel_listing<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let token_id: ContractTokenId = ctx.parameter_cursor().get()?;
    let sender = ctx.sender();
    let escrow = Address::Contract(ctx.self_address());

    let listing = host.state().listing(&token_id)?;

    // Ensuring only the seller can cancel the listing
    ensure!(
        sender.matches_account(&listing.seller),
        CustomContractError::OnlySeller.into()
    );

    let (state, state_builder) = host.state_and_builder();
    state.close_listing(&token_id, &escrow, sender, state_builder)?;

    logger.log(&transfer_event(token_id, escrow, sender))?;

    // Event for unlisting NFT.
    logger.log(&nft_transfer_event(
        token_id,
        Some(escrow),
        sender,
        String::new(),
        Amount::zero(),
    ))?;

    Ok(())
}

/// Pay the whole contract balance, the fees collected from sales, to the
/// contract owner.
/// Logs a `Withdraw` event.
///
/// It rejects if:
/// - Sender is other than the contract owner.
/// - The contract balance is zero.
/// - The transfer to the owner fails.
/// - Fails to log `Withdraw` event.
#[receive(
    contract = "NFTMarket",
    name = "withdrawFunds",
    mutable,
    enable_logger
)]
fn withdraw_funds<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let owner = host.state().owner;

    // Ensure the sender is the contract owner;
    ensure!(
        ctx.sender().matches_account(&owner),
        CustomContractError::OnlyContractOwner.into()
    );

    let balance = host.self_balance();
    ensure!(
        balance > Amount::zero(),
        CustomContractError::ZeroBalance.into()
    );

    host.invoke_transfer(&owner, balance)
        .map_err(CustomContractError::from)?;

    logger.log(&CustomEvent::Withdraw(WithdrawEvent {
        to: owner,
        amount: balance,
    }))?;

    Ok(())
}

/// Hand the contract over to a new owner.
/// Logs an `OwnershipTransferred` event.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - Sender is other than the contract owner.
/// - Fails to log `OwnershipTransferred` event.
#[receive(
    contract = "NFTMarket",
    name = "transferOwnership",
    parameter = "AccountAddress",
    mutable,
    enable_logger
)]
fn transfer_ownership<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let new_owner: AccountAddress = ctx.parameter_cursor().get()?;
    let state = host.state_mut();

    ensure!(
        ctx.sender().matches_account(&state.owner),
        CustomContractError::OnlyContractOwner.into()
    );

    let previous_owner = state.owner;
    state.owner = new_owner;

    logger.log(&CustomEvent::OwnershipTransferred(
        OwnershipTransferredEvent {
            previous_owner,
            new_owner,
        },
    ))?;

    Ok(())
}

/// Metadata URI of a token.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - The token does not exist.
#[receive(
    contract = "NFTMarket",
    name = "tokenURI",
    parameter = "ContractTokenId",
    return_value = "String"
)]
fn token_uri<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<String> {
    let token_id: ContractTokenId = ctx.parameter_cursor().get()?;
    host.state().token_uri(&token_id)
}

/// Current owner of a token. Listed tokens are owned by this contract.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - The token does not exist.
#[receive(
    contract = "NFTMarket",
    name = "ownerOf",
    parameter = "ContractTokenId",
    return_value = "Address"
)]
fn owner_of<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Address> {
    let token_id: ContractTokenId = ctx.parameter_cursor().get()?;
    host.state().owner_of(&token_id)
}

/// View function that returns the listing of the given token.
#[receive(
    contract = "NFTMarket",
    name = "getListing",
    parameter = "ContractTokenId",
    return_value = "Listing"
)]
fn get_listing<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Listing> {
    let token_id: ContractTokenId = ctx.parameter_cursor().get()?;
    host.state().listing(&token_id)
}

/// View tokens owned by particular address.
#[receive(
    contract = "NFTMarket",
    name = "viewOwnedTokens",
    parameter = "Address",
    return_value = "Vec<ContractTokenId>"
)]
fn view_owned_tokens<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Vec<ContractTokenId>> {
    let owner: Address = ctx.parameter_cursor().get()?;
    Ok(host.state().owned_tokens(&owner))
}

/// Execute a list of token transfers, in the order of the list.
///
/// Logs a `Transfer` event for each transfer in the list.
/// Produces an action which sends a message to each contract which are the
/// receiver of a transfer.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - Any of the transfers fail to be executed, which could be if:
///     - The `token_id` does not exist.
///     - The sender is not the owner of the token, or an operator for this
///       specific `token_id` and `from` address.
///     - The token is not owned by the `from`.
/// - Fails to log event.
/// - Any of the messages sent to contracts receiving a transfer choose to
///   reject.
#[receive(
    contract = "NFTMarket",
    name = "transfer",
    parameter = "TransferParameter",
    mutable,
    enable_logger
)]
fn transfer<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    // Parse the parameter.
    let TransferParams(transfers): TransferParameter = ctx.parameter_cursor().get()?;
    // Get the sender who invoked this contract function.
    let sender = ctx.sender();

    for transfer in transfers {
        let (state, state_builder) = host.state_and_builder();
        // Authenticate the sender for this transfer
        ensure!(
            transfer.from == sender || state.is_operator(&transfer.from, &sender),
            ContractError::Unauthorized
        );

        let to_address = transfer.to.address();
        // Update the contract state
        state.transfer(
            &transfer.token_id,
            transfer.amount,
            &transfer.from,
            to_address,
            state_builder,
        )?;

        // Log transfer event
        logger.log(&ContractEvent::Transfer(TransferEvent {
            token_id: transfer.token_id,
            amount: transfer.amount,
            from: transfer.from,
            to: to_address,
        }))?;

        // If the receiver is a contract, we add sending it a message to the list of
        // actions.
        if let Receiver::Contract(address, entrypoint_name) = transfer.to {
            let parameter = OnReceivingCis2Params {
                token_id: transfer.token_id,
                amount: transfer.amount,
                from: transfer.from,
                data: transfer.data,
            };

            host.invoke_contract(
                &address,
                &parameter,
                entrypoint_name.as_entrypoint_name(),
                Amount::zero(),
            )
            .map_err(CustomContractError::from)?;
        }
    }
    Ok(())
}

/// Enable or disable addresses as operators of the sender address.
/// Logs an `UpdateOperator` event.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - Fails to log event.
#[receive(
    contract = "NFTMarket",
    name = "updateOperator",
    parameter = "UpdateOperatorParams",
    mutable,
    enable_logger
)]
fn update_operator<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    // Parse the parameter.
    let UpdateOperatorParams(params) = ctx.parameter_cursor().get()?;
    // Get the sender who invoked this contract function.
    let sender = ctx.sender();

    let (state, state_builder) = host.state_and_builder();
    for param in params {
        // Update the operator in the state.
        match param.update {
            OperatorUpdate::Add => state.add_operator(&sender, &param.operator, state_builder),
            OperatorUpdate::Remove => state.remove_operator(&sender, &param.operator),
        }

        // Log the appropriate event
        logger.log(&ContractEvent::UpdateOperator(UpdateOperatorEvent {
            owner: sender,
            operator: param.operator,
            update: param.update,
        }))?;
    }

    Ok(())
}

/// Takes a list of queries. Each query is an owner address and some address to
/// check as an operator of the owner address.
///
/// It rejects if:
/// - It fails to parse the parameter.
#[receive(
    contract = "NFTMarket",
    name = "operatorOf",
    parameter = "OperatorOfQueryParams",
    return_value = "OperatorOfQueryResponse"
)]
fn operator_of<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<OperatorOfQueryResponse> {
    // Parse the parameter.
    let params: OperatorOfQueryParams = ctx.parameter_cursor().get()?;
    // Build the response.
    let mut response = Vec::with_capacity(params.queries.len());
    let state = host.state();
    for query in params.queries {
        // Query the state for address being an operator of owner.
        let is_operator = state.is_operator(&query.owner, &query.address);
        response.push(is_operator);
    }

    Ok(OperatorOfQueryResponse::from(response))
}

/// Get the balance of given token IDs and addresses.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - Any of the queried `token_id` does not exist.
#[receive(
    contract = "NFTMarket",
    name = "balanceOf",
    parameter = "ContractBalanceOfQueryParams",
    return_value = "ContractBalanceOfQueryResponse"
)]
fn balance_of<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<ContractBalanceOfQueryResponse> {
    // Parse the parameter.
    let params: ContractBalanceOfQueryParams = ctx.parameter_cursor().get()?;
    // Build the response.
    let mut response = Vec::with_capacity(params.queries.len());
    let state = host.state();
    for query in params.queries {
        // Query the state for balance.
        let amount = state.balance(&query.token_id, &query.address)?;
        response.push(amount);
    }

    Ok(ContractBalanceOfQueryResponse::from(response))
}

/// Get the token metadata URLs of the given token IDs. The URL is the token URI
/// given at minting.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - Any of the queried `token_id` does not exist.
#[receive(
    contract = "NFTMarket",
    name = "tokenMetadata",
    parameter = "ContractTokenMetadataQueryParams",
    return_value = "TokenMetadataQueryResponse"
)]
fn token_metadata<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<TokenMetadataQueryResponse> {
    // Parse the parameter.
    let params: ContractTokenMetadataQueryParams = ctx.parameter_cursor().get()?;
    // Build the response.
    let mut response = Vec::with_capacity(params.queries.len());
    let state = host.state();
    for token_id in params.queries {
        let metadata_url = MetadataUrl {
            url: state.token_uri(&token_id)?,
            hash: None,
        };
        response.push(metadata_url);
    }

    Ok(TokenMetadataQueryResponse::from(response))
}

/// Get the supported standards or addresses for a implementation given list of
/// standard identifiers.
///
/// It rejects if:
/// - It fails to parse the parameter.
#[receive(
    contract = "NFTMarket",
    name = "supports",
    parameter = "SupportsQueryParams",
    return_value = "SupportsQueryResponse"
)]
fn supports<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    _host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<SupportsQueryResponse> {
    // Parse the parameter.
    let params: SupportsQueryParams = ctx.parameter_cursor().get()?;

    // Build the response.
    let mut response = Vec::with_capacity(params.queries.len());
    for std_id in params.queries {
        if SUPPORTS_STANDARDS.contains(&std_id.as_standard_identifier()) {
            response.push(SupportResult::Support);
        } else {
            response.push(SupportResult::NoSupport);
        }
    }

    Ok(SupportsQueryResponse::from(response))
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use test_infrastructure::*;

    const ACCOUNT_0: AccountAddress = AccountAddress([0u8; 32]);
    const ADDRESS_0: Address = Address::Account(ACCOUNT_0);
    const ACCOUNT_1: AccountAddress = AccountAddress([1u8; 32]);
    const ADDRESS_1: Address = Address::Account(ACCOUNT_1);
    const SELF_ADDRESS: ContractAddress = ContractAddress {
        index: 10,
        subindex: 0,
    };
    const SELF: Address = Address::Contract(SELF_ADDRESS);
    const OTHER_CONTRACT: ContractAddress = ContractAddress {
        index: 11,
        subindex: 0,
    };

    const TOKEN_URI: &str = "https://github.com/rohitroy-github";

    /// Contract instance owned by `ACCOUNT_0` with no tokens.
    fn default_host() -> TestHost<State<TestStateApi>> {
        let mut ctx = TestInitContext::empty();
        ctx.set_init_origin(ACCOUNT_0);
        let mut state_builder = TestStateBuilder::new();

        let state = init(&ctx, &mut state_builder).expect_report("Failed during init_NFTMarket");

        TestHost::new(state, state_builder)
    }

    fn receive_ctx(sender: Address, parameter: &[u8]) -> TestReceiveContext {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(sender)
            .set_self_address(SELF_ADDRESS)
            .set_parameter(parameter);
        ctx
    }

    fn mint_to(host: &mut TestHost<State<TestStateApi>>, owner: Address) -> ContractTokenId {
        let (state, state_builder) = host.state_and_builder();
        state
            .mint(owner, String::from(TOKEN_URI), state_builder)
            .expect_report("Failed to mint token")
    }

    fn list(
        host: &mut TestHost<State<TestStateApi>>,
        token_id: ContractTokenId,
        seller: AccountAddress,
        price: Amount,
    ) {
        let (state, state_builder) = host.state_and_builder();
        state
            .list(token_id, seller, price, SELF, state_builder)
            .expect_report("Failed to list token");
    }

    /// Test initialization succeeds.
    #[concordium_test]
    fn test_init() {
        let host = default_host();

        claim_eq!(host.state().owner, ACCOUNT_0);
        claim_eq!(host.state().next_token_id, u64::from(FIRST_TOKEN_ID));
        claim_eq!(
            host.state().tokens.iter().count(),
            0,
            "No token should be initialized"
        );
        claim_eq!(
            host.state().listings.iter().count(),
            0,
            "No listings should be initialized"
        );
    }

    /// Test minting, ensuring the new token is owned by the sender, carries
    /// the token URI and the appropriate events are logged.
    #[concordium_test]
    fn test_create_nft() {
        let mut host = default_host();
        let bytes = to_bytes(&String::from(TOKEN_URI));
        let ctx = receive_ctx(ADDRESS_0, &bytes);
        let mut logger = TestLogger::init();

        let result = create_nft(&ctx, &mut host, &mut logger);

        let token_id = result.expect_report("Results in rejection");
        claim_eq!(token_id, TokenIdU32(FIRST_TOKEN_ID));

        // Check the state
        claim_eq!(host.state().owner_of(&token_id), Ok(ADDRESS_0));
        claim_eq!(
            host.state().token_uri(&token_id),
            Ok(String::from(TOKEN_URI))
        );

        // Check the logs
        claim_eq!(logger.logs.len(), 3, "Three events should be logged");
        claim_eq!(
            logger.logs[0],
            to_bytes(&ContractEvent::Mint(MintEvent {
                token_id,
                amount: ContractTokenAmount::from(1),
                owner: ADDRESS_0,
            })),
            "Expected an event for minting"
        );
        claim_eq!(
            logger.logs[1],
            to_bytes(&token_metadata_event(token_id, String::from(TOKEN_URI)))
        );
        claim_eq!(
            logger.logs[2],
            to_bytes(&CustomEvent::NftTransfer(NftTransferEvent {
                token_id,
                from: None,
                to: ADDRESS_0,
                token_uri: String::from(TOKEN_URI),
                price: Amount::zero(),
            }))
        );
    }

    #[concordium_test]
    fn test_create_nft_increments_token_id() {
        let mut host = default_host();
        let bytes = to_bytes(&String::from(TOKEN_URI));
        let ctx = receive_ctx(ADDRESS_1, &bytes);
        let mut logger = TestLogger::init();

        let first = create_nft(&ctx, &mut host, &mut logger).expect_report("First mint failed");
        let second = create_nft(&ctx, &mut host, &mut logger).expect_report("Second mint failed");

        claim_eq!(second, TokenIdU32(first.0 + 1));
        claim_eq!(host.state().owned_tokens(&ADDRESS_1).len(), 2);
    }

    #[concordium_test]
    fn test_list_nft_zero_price() {
        let mut host = default_host();
        let token_id = mint_to(&mut host, ADDRESS_0);
        let bytes = to_bytes(&ListParams {
            token_id,
            price: Amount::zero(),
        });
        let ctx = receive_ctx(ADDRESS_0, &bytes);
        let mut logger = TestLogger::init();

        let result = list_nft(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(CustomContractError::InvalidPrice.into()));
    }

    #[concordium_test]
    fn test_list_nft_not_owner() {
        let mut host = default_host();
        let token_id = mint_to(&mut host, ADDRESS_0);
        let bytes = to_bytes(&ListParams {
            token_id,
            price: Amount::from_micro_ccd(5),
        });
        let ctx = receive_ctx(ADDRESS_1, &bytes);
        let mut logger = TestLogger::init();

        let result = list_nft(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(ContractError::Unauthorized));
        claim_eq!(host.state().owner_of(&token_id), Ok(ADDRESS_0));
    }

    #[concordium_test]
    fn test_list_nft_unknown_token() {
        let mut host = default_host();
        let bytes = to_bytes(&ListParams {
            token_id: TokenIdU32(99999),
            price: Amount::from_micro_ccd(5),
        });
        let ctx = receive_ctx(ADDRESS_0, &bytes);
        let mut logger = TestLogger::init();

        let result = list_nft(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(ContractError::InvalidTokenId));
    }

    #[concordium_test]
    fn test_list_nft_contract_owner() {
        let mut host = default_host();
        let token_id = mint_to(&mut host, Address::Contract(OTHER_CONTRACT));
        let bytes = to_bytes(&ListParams {
            token_id,
            price: Amount::from_micro_ccd(5),
        });
        let ctx = receive_ctx(Address::Contract(OTHER_CONTRACT), &bytes);
        let mut logger = TestLogger::init();

        let result = list_nft(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(CustomContractError::OnlyAccountAddress.into()));
    }

    /// Test listing moves the token into the custody of the contract and logs
    /// the appropriate events.
    #[concordium_test]
    fn test_list_nft() {
        let mut host = default_host();
        let token_id = mint_to(&mut host, ADDRESS_0);
        let price = Amount::from_micro_ccd(100);
        let bytes = to_bytes(&ListParams { token_id, price });
        let ctx = receive_ctx(ADDRESS_0, &bytes);
        let mut logger = TestLogger::init();

        let result = list_nft(&ctx, &mut host, &mut logger);

        claim_eq!(result, Ok(()));
        claim_eq!(host.state().owner_of(&token_id), Ok(SELF));
        claim_eq!(
            host.state().listing(&token_id),
            Ok(Listing {
                seller: ACCOUNT_0,
                price,
            })
        );

        claim_eq!(logger.logs.len(), 2, "Two events should be logged");
        claim_eq!(
            logger.logs[0],
            to_bytes(&transfer_event(token_id, ADDRESS_0, SELF))
        );
        claim_eq!(
            logger.logs[1],
            to_bytes(&CustomEvent::NftTransfer(NftTransferEvent {
                token_id,
                from: Some(ADDRESS_0),
                to: SELF,
                token_uri: String::new(),
                price,
            }))
        );
    }

    #[concordium_test]
    fn test_buy_nft_not_listed() {
        let mut host = default_host();
        let bytes = to_bytes(&TokenIdU32(99999));
        let ctx = receive_ctx(ADDRESS_0, &bytes);
        let mut logger = TestLogger::init();

        let result = buy_nft(&ctx, &mut host, Amount::zero(), &mut logger);

        claim_eq!(
            result,
            Err(CustomContractError::TokenNotListedForSale.into())
        );
    }

    #[concordium_test]
    fn test_buy_nft_incorrect_price() {
        let mut host = default_host();
        let token_id = mint_to(&mut host, ADDRESS_0);
        list(&mut host, token_id, ACCOUNT_0, Amount::from_micro_ccd(100));
        let bytes = to_bytes(&token_id);
        let ctx = receive_ctx(ADDRESS_1, &bytes);
        let mut logger = TestLogger::init();

        // Paying too little or too much is rejected alike.
        for micro_ccd in [50, 150] {
            let amount = Amount::from_micro_ccd(micro_ccd);
            host.set_self_balance(amount);
            let result = buy_nft(&ctx, &mut host, amount, &mut logger);

            claim_eq!(result, Err(CustomContractError::IncorrectPrice.into()));
            claim!(host.state().listing(&token_id).is_ok());
            claim_eq!(host.state().owner_of(&token_id), Ok(SELF));
        }
        claim!(logger.logs.is_empty());
    }

    /// Test buying hands the token to the buyer, pays 95% of the price to the
    /// seller and keeps 5% in the contract.
    #[concordium_test]
    fn test_buy_nft() {
        let mut host = default_host();
        let token_id = mint_to(&mut host, ADDRESS_0);
        let price = Amount::from_micro_ccd(100);
        list(&mut host, token_id, ACCOUNT_0, price);
        let bytes = to_bytes(&token_id);
        let ctx = receive_ctx(ADDRESS_1, &bytes);
        let mut logger = TestLogger::init();

        host.set_self_balance(price);
        let result = buy_nft(&ctx, &mut host, price, &mut logger);

        claim_eq!(result, Ok(()));
        // 95% of the price was sent to the seller
        claim!(host.transfer_occurred(&ACCOUNT_0, Amount::from_micro_ccd(95)));
        // 5% of the price was kept in the contract balance
        claim_eq!(host.self_balance(), Amount::from_micro_ccd(5));

        claim_eq!(host.state().owner_of(&token_id), Ok(ADDRESS_1));
        claim!(host.state().listing(&token_id).is_err());

        claim_eq!(logger.logs.len(), 2, "Two events should be logged");
        claim_eq!(
            logger.logs[0],
            to_bytes(&transfer_event(token_id, SELF, ADDRESS_1))
        );
        claim_eq!(
            logger.logs[1],
            to_bytes(&CustomEvent::NftTransfer(NftTransferEvent {
                token_id,
                from: Some(SELF),
                to: ADDRESS_1,
                token_uri: String::new(),
                price: Amount::zero(),
            }))
        );
    }

    #[concordium_test]
    fn test_cancel_listing_not_listed() {
        let mut host = default_host();
        let bytes = to_bytes(&TokenIdU32(99999));
        let ctx = receive_ctx(ADDRESS_0, &bytes);
        let mut logger = TestLogger::init();

        let result = cancel_listing(&ctx, &mut host, &mut logger);

        claim_eq!(
            result,
            Err(CustomContractError::TokenNotListedForSale.into())
        );
    }

    #[concordium_test]
    fn test_cancel_listing_not_seller() {
        let mut host = default_host();
        let token_id = mint_to(&mut host, ADDRESS_0);
        list(&mut host, token_id, ACCOUNT_0, Amount::from_micro_ccd(5));
        let bytes = to_bytes(&token_id);
        let ctx = receive_ctx(ADDRESS_1, &bytes);
        let mut logger = TestLogger::init();

        let result = cancel_listing(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(CustomContractError::OnlySeller.into()));
        claim_eq!(host.state().owner_of(&token_id), Ok(SELF));
    }

    /// Test cancelling hands the token back to the seller.
    #[concordium_test]
    fn test_cancel_listing() {
        let mut host = default_host();
        let token_id = mint_to(&mut host, ADDRESS_0);
        list(&mut host, token_id, ACCOUNT_0, Amount::from_micro_ccd(5));
        let bytes = to_bytes(&token_id);
        let ctx = receive_ctx(ADDRESS_0, &bytes);
        let mut logger = TestLogger::init();

        let result = cancel_listing(&ctx, &mut host, &mut logger);

        claim_eq!(result, Ok(()));
        claim_eq!(host.state().owner_of(&token_id), Ok(ADDRESS_0));
        claim!(host.state().listing(&token_id).is_err());

        claim_eq!(logger.logs.len(), 2, "Two events should be logged");
        claim_eq!(
            logger.logs[0],
            to_bytes(&transfer_event(token_id, SELF, ADDRESS_0))
        );
        claim_eq!(
            logger.logs[1],
            to_bytes(&CustomEvent::NftTransfer(NftTransferEvent {
                token_id,
                from: Some(SELF),
                to: ADDRESS_0,
                token_uri: String::new(),
                price: Amount::zero(),
            }))
        );
    }

    #[concordium_test]
    fn test_withdraw_funds_not_owner() {
        let mut host = default_host();
        let ctx = receive_ctx(ADDRESS_1, &[]);
        let mut logger = TestLogger::init();

        host.set_self_balance(Amount::from_micro_ccd(5));
        let result = withdraw_funds(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(CustomContractError::OnlyContractOwner.into()));
        claim_eq!(host.self_balance(), Amount::from_micro_ccd(5));
    }

    #[concordium_test]
    fn test_withdraw_funds_zero_balance() {
        let mut host = default_host();
        let ctx = receive_ctx(ADDRESS_0, &[]);
        let mut logger = TestLogger::init();

        let result = withdraw_funds(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(CustomContractError::ZeroBalance.into()));
    }

    /// Test the fees collected from a sale are paid out to the owner.
    #[concordium_test]
    fn test_withdraw_funds() {
        let mut host = default_host();
        let token_id = mint_to(&mut host, ADDRESS_0);
        let price = Amount::from_micro_ccd(100);
        list(&mut host, token_id, ACCOUNT_0, price);

        let bytes = to_bytes(&token_id);
        let ctx = receive_ctx(ADDRESS_1, &bytes);
        let mut logger = TestLogger::init();
        host.set_self_balance(price);
        buy_nft(&ctx, &mut host, price, &mut logger).expect_report("Failed to buy token");

        let contract_balance = host.self_balance();
        let ctx = receive_ctx(ADDRESS_0, &[]);
        let mut logger = TestLogger::init();

        let result = withdraw_funds(&ctx, &mut host, &mut logger);

        claim_eq!(result, Ok(()));
        claim!(host.transfer_occurred(&ACCOUNT_0, contract_balance));
        claim_eq!(host.self_balance(), Amount::zero());
        claim_eq!(
            logger.logs,
            vec![to_bytes(&CustomEvent::Withdraw(WithdrawEvent {
                to: ACCOUNT_0,
                amount: contract_balance,
            }))]
        );
    }

    #[concordium_test]
    fn test_transfer_ownership() {
        let mut host = default_host();
        let bytes = to_bytes(&ACCOUNT_1);
        let mut logger = TestLogger::init();

        let ctx = receive_ctx(ADDRESS_1, &bytes);
        let result = transfer_ownership(&ctx, &mut host, &mut logger);
        claim_eq!(result, Err(CustomContractError::OnlyContractOwner.into()));

        let ctx = receive_ctx(ADDRESS_0, &bytes);
        let result = transfer_ownership(&ctx, &mut host, &mut logger);
        claim_eq!(result, Ok(()));
        claim_eq!(host.state().owner, ACCOUNT_1);
        claim_eq!(
            logger.logs,
            vec![to_bytes(&CustomEvent::OwnershipTransferred(
                OwnershipTransferredEvent {
                    previous_owner: ACCOUNT_0,
                    new_owner: ACCOUNT_1,
                }
            ))]
        );

        // The previous owner can no longer withdraw.
        host.set_self_balance(Amount::from_micro_ccd(5));
        let ctx = receive_ctx(ADDRESS_0, &[]);
        let result = withdraw_funds(&ctx, &mut host, &mut logger);
        claim_eq!(result, Err(CustomContractError::OnlyContractOwner.into()));
    }

    #[concordium_test]
    fn test_token_uri_and_owner_of() {
        let mut host = default_host();
        let token_id = mint_to(&mut host, ADDRESS_1);

        let bytes = to_bytes(&token_id);
        let ctx = receive_ctx(ADDRESS_0, &bytes);
        claim_eq!(token_uri(&ctx, &host), Ok(String::from(TOKEN_URI)));
        claim_eq!(owner_of(&ctx, &host), Ok(ADDRESS_1));

        let bytes = to_bytes(&TokenIdU32(99999));
        let ctx = receive_ctx(ADDRESS_0, &bytes);
        claim_eq!(token_uri(&ctx, &host), Err(ContractError::InvalidTokenId));
        claim_eq!(owner_of(&ctx, &host), Err(ContractError::InvalidTokenId));
    }

    /// Test transfer succeeds, when `from` is the sender.
    #[concordium_test]
    fn test_transfer_account() {
        let mut host = default_host();
        let token_id = mint_to(&mut host, ADDRESS_0);

        let transfer = Transfer {
            token_id,
            from: ADDRESS_0,
            to: Receiver::from_account(ACCOUNT_1),
            amount: ContractTokenAmount::from(1),
            data: AdditionalData::empty(),
        };
        let bytes = to_bytes(&TransferParams(vec![transfer]));
        let ctx = receive_ctx(ADDRESS_0, &bytes);
        let mut logger = TestLogger::init();

        let result = self::transfer(&ctx, &mut host, &mut logger);

        claim_eq!(result, Ok(()));
        claim_eq!(host.state().owner_of(&token_id), Ok(ADDRESS_1));
        claim_eq!(logger.logs.len(), 1, "Only one event should be logged");
        claim_eq!(
            logger.logs[0],
            to_bytes(&transfer_event(token_id, ADDRESS_0, ADDRESS_1)),
            "Incorrect event emitted"
        );
    }

    fn on_receiving_cis2() -> OwnedEntrypointName {
        OwnedEntrypointName::new_unchecked("onReceivingCIS2".into())
    }

    fn transfer_to_contract(token_id: ContractTokenId) -> TransferParameter {
        TransferParams(vec![Transfer {
            token_id,
            from: ADDRESS_0,
            to: Receiver::Contract(OTHER_CONTRACT, on_receiving_cis2()),
            amount: ContractTokenAmount::from(1),
            data: AdditionalData::empty(),
        }])
    }

    /// Test transfer to a contract notifies the receiving contract.
    #[concordium_test]
    fn test_transfer_contract() {
        let mut host = default_host();
        let token_id = mint_to(&mut host, ADDRESS_0);

        host.setup_mock_entrypoint(
            OTHER_CONTRACT,
            on_receiving_cis2(),
            MockFn::new(
                |parameter, _amount, _balance, _state| -> Result<(bool, ()), CallContractError<()>> {
                    let params = OnReceivingCis2Params::<ContractTokenId, ContractTokenAmount>::deserial(
                        &mut Cursor::new(parameter),
                    )
                    .map_err(|_| CallContractError::Trap)?;
                    if params.from != ADDRESS_0 {
                        return Err(CallContractError::Trap);
                    }
                    Ok((false, ()))
                },
            ),
        );

        let bytes = to_bytes(&transfer_to_contract(token_id));
        let ctx = receive_ctx(ADDRESS_0, &bytes);
        let mut logger = TestLogger::init();

        let result = self::transfer(&ctx, &mut host, &mut logger);

        claim_eq!(result, Ok(()));
        claim_eq!(
            host.state().owner_of(&token_id),
            Ok(Address::Contract(OTHER_CONTRACT))
        );
        claim_eq!(
            logger.logs,
            vec![to_bytes(&transfer_event(
                token_id,
                ADDRESS_0,
                Address::Contract(OTHER_CONTRACT)
            ))]
        );
    }

    /// Test transfer fails, when the receiving contract rejects the token.
    #[concordium_test]
    fn test_transfer_contract_rejects() {
        let mut host = default_host();
        let token_id = mint_to(&mut host, ADDRESS_0);

        host.setup_mock_entrypoint(
            OTHER_CONTRACT,
            on_receiving_cis2(),
            MockFn::new(
                |_parameter, _amount, _balance, _state| -> Result<(bool, ()), CallContractError<()>> {
                    Err(CallContractError::Trap)
                },
            ),
        );

        let bytes = to_bytes(&transfer_to_contract(token_id));
        let ctx = receive_ctx(ADDRESS_0, &bytes);
        let mut logger = TestLogger::init();

        let result = self::transfer(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(CustomContractError::InvokeContractError.into()));
    }

    /// Test transfer token fails, when sender is neither the owner or an
    /// operator of the owner.
    #[concordium_test]
    fn test_transfer_not_authorized() {
        let mut host = default_host();
        let token_id = mint_to(&mut host, ADDRESS_0);

        let transfer = Transfer {
            token_id,
            from: ADDRESS_0,
            to: Receiver::from_account(ACCOUNT_1),
            amount: ContractTokenAmount::from(1),
            data: AdditionalData::empty(),
        };
        let bytes = to_bytes(&TransferParams(vec![transfer]));
        let ctx = receive_ctx(ADDRESS_1, &bytes);
        let mut logger = TestLogger::init();

        let result = self::transfer(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(ContractError::Unauthorized));
    }

    /// Test a listed token cannot be moved by the seller through `transfer`.
    #[concordium_test]
    fn test_transfer_listed_token() {
        let mut host = default_host();
        let token_id = mint_to(&mut host, ADDRESS_0);
        list(&mut host, token_id, ACCOUNT_0, Amount::from_micro_ccd(5));

        let transfer = Transfer {
            token_id,
            from: ADDRESS_0,
            to: Receiver::from_account(ACCOUNT_1),
            amount: ContractTokenAmount::from(1),
            data: AdditionalData::empty(),
        };
        let bytes = to_bytes(&TransferParams(vec![transfer]));
        let ctx = receive_ctx(ADDRESS_0, &bytes);
        let mut logger = TestLogger::init();

        let result = self::transfer(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(ContractError::InsufficientFunds));
        claim_eq!(host.state().owner_of(&token_id), Ok(SELF));
    }

    /// Test transfer succeeds when sender is not the owner, but is an operator
    /// of the owner.
    #[concordium_test]
    fn test_operator_transfer() {
        let mut host = default_host();
        let token_id = mint_to(&mut host, ADDRESS_0);

        // ADDRESS_0 makes ADDRESS_1 an operator.
        let update = UpdateOperator {
            update: OperatorUpdate::Add,
            operator: ADDRESS_1,
        };
        let bytes = to_bytes(&UpdateOperatorParams(vec![update]));
        let ctx = receive_ctx(ADDRESS_0, &bytes);
        let mut logger = TestLogger::init();

        let result = update_operator(&ctx, &mut host, &mut logger);

        claim_eq!(result, Ok(()));
        claim!(host.state().is_operator(&ADDRESS_0, &ADDRESS_1));
        claim_eq!(
            logger.logs[0],
            to_bytes(&ContractEvent::UpdateOperator(UpdateOperatorEvent {
                owner: ADDRESS_0,
                operator: ADDRESS_1,
                update: OperatorUpdate::Add,
            })),
            "Incorrect event emitted"
        );

        let transfer = Transfer {
            token_id,
            from: ADDRESS_0,
            to: Receiver::from_account(ACCOUNT_1),
            amount: ContractTokenAmount::from(1),
            data: AdditionalData::empty(),
        };
        let bytes = to_bytes(&TransferParams(vec![transfer]));
        let ctx = receive_ctx(ADDRESS_1, &bytes);

        let result = self::transfer(&ctx, &mut host, &mut logger);

        claim_eq!(result, Ok(()));
        claim_eq!(host.state().owner_of(&token_id), Ok(ADDRESS_1));
    }

    #[concordium_test]
    fn test_balance_of() {
        let mut host = default_host();
        let token_id = mint_to(&mut host, ADDRESS_0);

        let params = ContractBalanceOfQueryParams {
            queries: vec![
                BalanceOfQuery {
                    token_id,
                    address: ADDRESS_0,
                },
                BalanceOfQuery {
                    token_id,
                    address: ADDRESS_1,
                },
            ],
        };
        let bytes = to_bytes(&params);
        let ctx = receive_ctx(ADDRESS_0, &bytes);

        let result = balance_of(&ctx, &host);

        claim_eq!(
            result,
            Ok(ContractBalanceOfQueryResponse::from(vec![
                ContractTokenAmount::from(1),
                ContractTokenAmount::from(0),
            ]))
        );
    }

    #[concordium_test]
    fn test_token_metadata() {
        let mut host = default_host();
        let token_id = mint_to(&mut host, ADDRESS_0);

        let params = ContractTokenMetadataQueryParams {
            queries: vec![token_id],
        };
        let bytes = to_bytes(&params);
        let ctx = receive_ctx(ADDRESS_0, &bytes);

        let result = token_metadata(&ctx, &host);

        claim_eq!(
            result,
            Ok(TokenMetadataQueryResponse::from(vec![MetadataUrl {
                url: String::from(TOKEN_URI),
                hash: None,
            }]))
        );
    }

    #[concordium_test]
    fn test_view_owned_tokens() {
        let mut host = default_host();
        let token_id = mint_to(&mut host, ADDRESS_0);
        let listed_token_id = mint_to(&mut host, ADDRESS_0);
        list(&mut host, listed_token_id, ACCOUNT_0, Amount::from_micro_ccd(5));

        let bytes = to_bytes(&ADDRESS_0);
        let ctx = receive_ctx(ADDRESS_0, &bytes);
        claim_eq!(view_owned_tokens(&ctx, &host), Ok(vec![token_id]));

        let bytes = to_bytes(&SELF);
        let ctx = receive_ctx(ADDRESS_0, &bytes);
        claim_eq!(view_owned_tokens(&ctx, &host), Ok(vec![listed_token_id]));

        let bytes = to_bytes(&listed_token_id);
        let ctx = receive_ctx(ADDRESS_0, &bytes);
        claim_eq!(
            get_listing(&ctx, &host),
            Ok(Listing {
                seller: ACCOUNT_0,
                price: Amount::from_micro_ccd(5),
            })
        );
    }

    #[concordium_test]
    fn test_operator_of() {
        let mut host = default_host();
        {
            let (state, state_builder) = host.state_and_builder();
            state.add_operator(&ADDRESS_0, &ADDRESS_1, state_builder);
        }

        let params = OperatorOfQueryParams {
            queries: vec![
                OperatorOfQuery {
                    owner: ADDRESS_0,
                    address: ADDRESS_1,
                },
                OperatorOfQuery {
                    owner: ADDRESS_1,
                    address: ADDRESS_0,
                },
            ],
        };
        let bytes = to_bytes(&params);
        let ctx = receive_ctx(ADDRESS_0, &bytes);

        let response = operator_of(&ctx, &host).expect_report("Failed to query operators");

        claim_eq!(
            to_bytes(&response),
            to_bytes(&OperatorOfQueryResponse::from(vec![true, false]))
        );
    }

    #[concordium_test]
    fn test_supports() {
        let host = default_host();
        let params = SupportsQueryParams {
            queries: vec![
                StandardIdentifierOwned::new_unchecked("CIS-0".to_string()),
                StandardIdentifierOwned::new_unchecked("CIS-2".to_string()),
                StandardIdentifierOwned::new_unchecked("CIS-3".to_string()),
            ],
        };
        let bytes = to_bytes(&params);
        let ctx = receive_ctx(ADDRESS_0, &bytes);

        let response = supports(&ctx, &host).expect_report("Failed to query standards");

        claim_eq!(
            to_bytes(&response),
            to_bytes(&SupportsQueryResponse::from(vec![
                SupportResult::Support,
                SupportResult::Support,
                SupportResult::NoSupport,
            ]))
        );
    }
}
