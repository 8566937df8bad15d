//! Epoch-cached proof-of-work hashing front end.
//!
//! Memory-hard PoW algorithms in the ethash family derive their mixing work
//! from an epoch: a contiguous range of block heights sharing one expensive
//! precomputed dataset. This crate provides the lifecycle management around
//! such an algorithm:
//! - A pluggable engine capability ([`EpochEngine`]) supplying epoch
//!   derivation, dataset construction, and the mixing and verification
//!   routines.
//! - A single-slot context cache ([`EpochContextCache`]) that rebuilds the
//!   dataset only when a requested height crosses into a new epoch.
//! - A hashing facade ([`PowHasher`]) exposing `hash_one` and `verify` over
//!   the cache, with typed and byte-slice entry points.
//! - A deterministic reference engine ([`ReferenceEngine`]) for exercising
//!   the stack end to end.

pub mod cache;
pub mod engine;
pub mod error;
pub mod hasher;
pub mod reference;
pub mod types;

pub use cache::EpochContextCache;
pub use engine::{EpochContext, EpochEngine};
pub use error::Error;
pub use hasher::PowHasher;
pub use reference::{ReferenceContext, ReferenceEngine, ReferenceEngineBuilder};
pub use types::{Hash256, PowOutput, VerifyOutcome};
