#![doc = include_str!("../README.md")]

mod rand;
mod range;
#[cfg(feature = "thread-rng")]
mod thread_random;
mod types;
mod validate;

pub use crate::rand::*;
pub use crate::range::*;
#[cfg(feature = "thread-rng")]
pub use crate::thread_random::*;
pub use crate::types::*;
pub use crate::validate::*;
