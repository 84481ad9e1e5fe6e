//! An NFT marketplace smart contract built on the Concordium Token Standard
//! CIS2.
//!
//! # Description
//! Anyone can mint a token with `createNFT`, giving the URI of its metadata.
//! Token IDs are handed out sequentially starting from 1. A token is then
//! globally identified by the contract address together with the token ID.
//!
//! The owner of a token can put it up for sale at a fixed price with
//! `listNFT`. The listed token is held by the contract itself until it is
//! either bought with `buyNFT` or taken back by the seller with
//! `cancelListing`. When a token is bought the seller receives 95% of the
//! price and the remaining 5% stays in the contract, from where the contract
//! owner can collect it with `withdrawFunds`.
//!
//! Note: The word 'address' refers to either an account address or a
//! contract address.
//!
//! As follows from the CIS2 specification, the contract also has a `transfer`
//! function for transferring a token from one address to another address. An
//! address can enable and disable one or more addresses as operators. An
//! operator of some address is allowed to transfer any tokens owned by this
//! address.

#![cfg_attr(not(feature = "std"), no_std)]
use crate::{events::*, helper::*, structs::*};
use commons::*;
use concordium_cis2::*;
use concordium_std::*;

mod contract;
mod events;
mod helper;
mod impls;
mod structs;
