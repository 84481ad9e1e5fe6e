//! It exposes the error type, type aliases, event tags and fee arithmetic
//! shared by the marketplace contract.
#![cfg_attr(not(feature = "std"), no_std)]
pub use crate::{calculations::*, constants::*, errors::*, percentage::*, types::*};
use concordium_cis2::*;
use concordium_std::*;

mod calculations;
mod constants;
mod errors;
mod percentage;
mod types;
