//! Block structures exchanged between peers.
//!
//! Headers and bodies travel separately during sync; full blocks are only
//! sent when a new block is announced.

#[allow(clippy::module_inception)]
mod block;
mod body;
mod header;

pub use block::Block;
pub use body::BlockBody;
pub use header::{BlockHeader, EMPTY_ROOT_HASH};
