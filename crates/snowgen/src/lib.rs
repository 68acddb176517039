#![doc = include_str!("../README.md")]

mod base62;
mod error;
mod generator;
mod id;
#[cfg(feature = "serde")]
pub mod serde;
mod status;
mod time;

pub use crate::base62::*;
pub use crate::error::*;
pub use crate::generator::*;
pub use crate::id::*;
pub use crate::status::*;
pub use crate::time::*;
