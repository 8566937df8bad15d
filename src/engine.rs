use crate::types::{Hash256, PowOutput, VerifyOutcome};
use std::fmt::Display;

/// An immutable per-epoch dataset tagged with the epoch it was built for.
///
/// Contexts are expensive to build (seconds to minutes for production-sized
/// datasets) and are held behind an `Arc` by the
/// [`EpochContextCache`](crate::cache::EpochContextCache) once built.
pub trait EpochContext {
    /// The epoch number this dataset belongs to.
    fn epoch_number(&self) -> u64;
}

/// The mixing engine capability consumed by the cache and the facade.
///
/// Implementations supply epoch derivation, dataset construction, and the
/// one-shot hashing and verification routines.
pub trait EpochEngine: Send + Sync {
    /// The dataset type produced by [`build_context`](Self::build_context).
    type Context: EpochContext + Send + Sync;

    /// Error returned when a dataset cannot be built.
    type BuildError: Display;

    /// Map a block height to its epoch number.
    ///
    /// Must be a pure function of height: heights within the same epoch map
    /// to the same epoch number, and higher heights map to equal-or-higher
    /// epoch numbers.
    fn epoch_number_for(&self, height: u64) -> u64;

    /// Build the dataset for an epoch.
    ///
    /// Must be a deterministic pure function of the epoch number.
    fn build_context(&self, epoch_number: u64) -> Result<Self::Context, Self::BuildError>;

    /// Compute the mix and final digest for one `(header, nonce)` candidate.
    ///
    /// Deterministic: identical inputs against the same context always yield
    /// the same output. Mixing itself does not fail.
    fn hash_one(
        &self,
        ctx: &Self::Context,
        height: u64,
        header_hash: &Hash256,
        nonce: u64,
    ) -> PowOutput;

    /// Recompute the mix for `(header, nonce)` and compare it against the
    /// supplied one.
    ///
    /// `valid` must hold exactly when [`hash_one`](Self::hash_one) with the
    /// same inputs against the same context would have produced `mix`. The
    /// recomputed final digest is returned either way.
    fn verify(
        &self,
        ctx: &Self::Context,
        height: u64,
        header_hash: &Hash256,
        mix: &Hash256,
        nonce: u64,
    ) -> VerifyOutcome;
}
