//! # quickfit-core
//!
//! Quick-fit allocator state machine over a simulated address space.
//!
//! A fixed catalogue of block sizes, each backed by a FIFO free list,
//! services allocate/free/query requests against a growable pool of slots.
//! This is an educational model: no real memory is mapped, and blocks are
//! never split or coalesced.

#![deny(unsafe_code)]

pub mod allocator;
pub mod free_list;

pub use allocator::{AllocOutcome, FreeError, FreeOutcome, QuickFitAllocator};
pub use free_list::FreeLists;
