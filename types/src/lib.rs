//! Fundamental types for the rill streaming-payment protocol.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: addresses, token amounts, timestamps, asset references, and the
//! stream record itself.

pub mod address;
pub mod amount;
pub mod asset;
pub mod error;
pub mod stream;
pub mod time;

pub use address::Address;
pub use amount::TokenAmount;
pub use asset::{AssetId, AssetRef};
pub use error::AddressError;
pub use stream::{Stream, StreamId};
pub use time::{Clock, Timestamp};
