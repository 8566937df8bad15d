use crate::cache::EpochContextCache;
use crate::engine::EpochEngine;
use crate::error::Error;
use crate::types::{Hash256, PowOutput, VerifyOutcome};
use std::sync::Arc;

/// Proof-of-work hashing facade.
///
/// Both entry points obtain an epoch context from the cache, rebuilding the
/// dataset when the requested height crosses into a new epoch, then delegate
/// the mixing work to the engine.
pub struct PowHasher<E: EpochEngine> {
    engine: Arc<E>,
    cache: EpochContextCache<E>,
}

impl<E: EpochEngine> PowHasher<E> {
    pub fn new(engine: E) -> Self {
        Self::with_engine(Arc::new(engine))
    }

    /// Build around an already shared engine handle.
    pub fn with_engine(engine: Arc<E>) -> Self {
        let cache = EpochContextCache::new(Arc::clone(&engine));
        Self { engine, cache }
    }

    /// Compute the mix and final digest for one candidate.
    ///
    /// May trigger an epoch rebuild; otherwise pure. Identical
    /// `(header_hash, height, nonce)` inputs always yield the same output
    /// for a given epoch dataset.
    pub fn hash_one(
        &self,
        header_hash: &Hash256,
        nonce: u64,
        height: u64,
    ) -> Result<PowOutput, Error> {
        let ctx = self.cache.ensure(height)?;
        Ok(self.engine.hash_one(&ctx, height, header_hash, nonce))
    }

    /// Recompute the mix for a previously produced candidate and report
    /// whether the supplied mix matches.
    ///
    /// The recomputed digest is returned whether or not the mix matched; a
    /// mismatch is a normal outcome of work that fails the proof, not an
    /// error.
    pub fn verify(
        &self,
        header_hash: &Hash256,
        nonce: u64,
        height: u64,
        mix: &Hash256,
    ) -> Result<VerifyOutcome, Error> {
        let ctx = self.cache.ensure(height)?;
        Ok(self.engine.verify(&ctx, height, header_hash, mix, nonce))
    }

    /// Byte-slice variant of [`hash_one`](Self::hash_one).
    ///
    /// Every slice must be exactly 32 bytes; size violations fail before the
    /// cache is consulted, and the output slices are written only once the
    /// whole computation has succeeded, never partially.
    pub fn hash_one_into(
        &self,
        header_hash: &[u8],
        nonce: u64,
        height: u64,
        mix_out: &mut [u8],
        digest_out: &mut [u8],
    ) -> Result<(), Error> {
        let header = Hash256::from_slice(header_hash)?;
        check_out_len("mix output", mix_out)?;
        check_out_len("digest output", digest_out)?;

        let out = self.hash_one(&header, nonce, height)?;
        mix_out.copy_from_slice(out.mix.as_bytes());
        digest_out.copy_from_slice(out.digest.as_bytes());
        Ok(())
    }

    /// Byte-slice variant of [`verify`](Self::verify).
    pub fn verify_from(
        &self,
        header_hash: &[u8],
        nonce: u64,
        height: u64,
        mix: &[u8],
        digest_out: &mut [u8],
    ) -> Result<bool, Error> {
        let header = Hash256::from_slice(header_hash)?;
        let mix = Hash256::from_slice(mix)?;
        check_out_len("digest output", digest_out)?;

        let outcome = self.verify(&header, nonce, height, &mix)?;
        digest_out.copy_from_slice(outcome.digest.as_bytes());
        Ok(outcome.valid)
    }

    /// Epoch number of the currently resident context, if any.
    pub fn cached_epoch(&self) -> Option<u64> {
        self.cache.cached_epoch()
    }
}

fn check_out_len(what: &str, buf: &[u8]) -> Result<(), Error> {
    if buf.len() != Hash256::LEN {
        return Err(Error::InvalidInput(format!(
            "{what} must be {} bytes, got {}",
            Hash256::LEN,
            buf.len()
        )));
    }
    Ok(())
}
