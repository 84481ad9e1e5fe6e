use super::*;

/// The custom errors the contract can produce.
#[derive(Serialize, Debug, PartialEq, Eq, Reject, SchemaType)]
pub enum CustomContractError {
    /// Failed parsing the parameter (Error code: -1).
    #[from(ParseError)]
    ParseParams,
    /// Failed logging: Log is full (Error code: -2).
    LogFull,
    /// Failed logging: Log is malformed (Error code: -3).
    LogMalformed,
    /// Failed to invoke a contract (Error code: -4).
    InvokeContractError,
    /// Failed to invoke a transfer (Error code: -5).
    InvokeTransferError,
    /// Only account addresses can sell tokens (Error code: -6).
    OnlyAccountAddress,
    /// Listing price must be greater than zero (Error code: -7).
    InvalidPrice,
    /// Token is not listed for sale (Error code: -8).
    TokenNotListedForSale,
    /// Amount sent does not equal the listing price (Error code: -9).
    IncorrectPrice,
    /// Only the seller can cancel a listing (Error code: -10).
    OnlySeller,
    /// Only the contract owner has access (Error code: -11).
    OnlyContractOwner,
    /// Contract balance is zero, nothing to withdraw (Error code: -12).
    ZeroBalance,
    /// No token IDs left to mint (Error code: -13).
    TokenIdOverflow,
}

/// Mapping the logging errors to CustomContractError.
impl From<LogError> for CustomContractError {
    fn from(le: LogError) -> Self {
        match le {
            LogError::Full => Self::LogFull,
            LogError::Malformed => Self::LogMalformed,
        }
    }
}

/// Mapping errors related to contract invocations to CustomContractError.
impl<T> From<CallContractError<T>> for CustomContractError {
    fn from(_cce: CallContractError<T>) -> Self {
        Self::InvokeContractError
    }
}

/// Mapping errors related to transfers to CustomContractError.
impl From<TransferError> for CustomContractError {
    fn from(_te: TransferError) -> Self {
        Self::InvokeTransferError
    }
}

/// Mapping CustomContractError to ContractError
impl From<CustomContractError> for ContractError {
    fn from(c: CustomContractError) -> Self {
        Cis2Error::Custom(c)
    }
}
