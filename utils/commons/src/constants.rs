/// Tag for the Custom NFT Transfer event.
///
/// Tags from `u8::MAX` down to `u8::MAX - 4` are taken by the CIS-2 events.
pub const NFT_TRANSFER_TAG: u8 = u8::MAX - 5;

/// Tag for the Custom Withdraw event.
pub const WITHDRAW_TAG: u8 = u8::MAX - 6;

/// Tag for the Custom Ownership Transferred event.
pub const OWNERSHIP_TRANSFERRED_TAG: u8 = u8::MAX - 7;

/// Share of every sale kept by the marketplace, in percent.
pub const MARKETPLACE_FEE_PERCENT: u64 = 5;

/// First token ID handed out by `createNFT`.
pub const FIRST_TOKEN_ID: u32 = 1;
