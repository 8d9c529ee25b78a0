//! Token claims and the codec that signs and verifies them.

pub mod claims;
pub mod codec;

pub use claims::{Claims, TokenIdentity, UserIdClaim};
pub use codec::TokenCodec;
