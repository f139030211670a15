//! Utility types shared by both representations.
//!
//! - [`Kind`] - which entity an element holds
//! - [`Layout`] - measured size / alignment / stride of a type
//! - [`Error`] / [`Result`] - error handling for buffer plumbing

mod error;
mod kind;
pub mod layout;

pub use error::*;
pub use kind::*;
pub use layout::{Layout, Representation};
