//! Modes of Operation
//!
//! Both modes are generic over [`BlockCipher`](crate::cipher::BlockCipher)
//! and expand the key once per call.

pub mod ctr;
pub mod ecb;

pub use ctr::{Counter, Ctr};
pub use ecb::Ecb;
