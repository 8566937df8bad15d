//! Deterministic reference engine.
//!
//! Exercises the facade and cache end to end with a real per-epoch dataset:
//! the dataset is expanded from a keyed-blake3 seed of the epoch number, and
//! each hash folds data-dependent dataset blocks into a 32-byte mix state
//! before a sha2 finalization. This is a stand-in for a production
//! memory-hard algorithm, not one itself; it behaves like the real
//! collaborator (deterministic per epoch, sensitive to every input bit) at
//! test-friendly sizes.

use crate::engine::{EpochContext, EpochEngine};
use crate::error::Error;
use crate::types::{Hash256, PowOutput, VerifyOutcome};
use blake3::Hasher as Blake3;
use derive_builder::Builder;
use sha2::{Digest, Sha256};
use std::convert::Infallible;

const SEED_DOMAIN: &[u8] = b"epochash:seed:v1|";
const MIX_DOMAIN: &[u8] = b"epochash:mix:v1|";

/// Dataset block granularity in bytes.
const BLOCK_SIZE: usize = 64;

/// Engine parameters: epoch cadence, dataset size, and mixing depth.
#[derive(Builder, Debug, Clone)]
#[builder(pattern = "owned")]
pub struct ReferenceEngine {
    /// Heights per epoch.
    #[builder(default = "30_000")]
    pub epoch_length: u64,
    /// 64-byte blocks per epoch dataset.
    #[builder(default = "8192")]
    pub dataset_blocks: usize,
    /// Data-dependent mixing rounds per hash.
    #[builder(default = "64")]
    pub rounds: usize,
}

impl Default for ReferenceEngine {
    fn default() -> Self {
        Self {
            epoch_length: 30_000,
            dataset_blocks: 8192,
            rounds: 64,
        }
    }
}

impl ReferenceEngine {
    fn validate(&self) -> Result<(), Error> {
        if self.epoch_length == 0 {
            return Err(Error::InvalidInput("epoch_length must be >= 1".into()));
        }
        if self.dataset_blocks == 0 {
            return Err(Error::InvalidInput("dataset_blocks must be >= 1".into()));
        }
        if self.rounds == 0 {
            return Err(Error::InvalidInput("rounds must be >= 1".into()));
        }
        Ok(())
    }
}

impl ReferenceEngineBuilder {
    pub fn build_validated(self) -> Result<ReferenceEngine, Error> {
        let engine = self
            .build()
            .map_err(|e| Error::InvalidInput(e.to_string()))?;
        engine.validate()?;
        Ok(engine)
    }
}

/// Precomputed dataset for one epoch.
pub struct ReferenceContext {
    epoch_number: u64,
    dataset: Vec<[u8; BLOCK_SIZE]>,
}

impl ReferenceContext {
    /// Number of 64-byte blocks in this dataset.
    pub fn blocks(&self) -> usize {
        self.dataset.len()
    }
}

impl EpochContext for ReferenceContext {
    fn epoch_number(&self) -> u64 {
        self.epoch_number
    }
}

impl EpochEngine for ReferenceEngine {
    type Context = ReferenceContext;
    type BuildError = Infallible;

    fn epoch_number_for(&self, height: u64) -> u64 {
        height / self.epoch_length
    }

    fn build_context(&self, epoch_number: u64) -> Result<ReferenceContext, Infallible> {
        let seed = derive_epoch_seed(epoch_number);

        let mut dataset = Vec::with_capacity(self.dataset_blocks);
        for index in 0..self.dataset_blocks {
            let mut hasher = Blake3::new_keyed(&seed);
            hasher.update(&(index as u64).to_le_bytes());
            let mut block = [0u8; BLOCK_SIZE];
            hasher.finalize_xof().fill(&mut block);
            dataset.push(block);
        }

        Ok(ReferenceContext {
            epoch_number,
            dataset,
        })
    }

    fn hash_one(
        &self,
        ctx: &ReferenceContext,
        height: u64,
        header_hash: &Hash256,
        nonce: u64,
    ) -> PowOutput {
        let mut state: [u8; 32] = {
            let mut hasher = Blake3::new();
            hasher.update(MIX_DOMAIN);
            hasher.update(header_hash.as_bytes());
            hasher.update(&nonce.to_le_bytes());
            hasher.update(&height.to_le_bytes());
            hasher.finalize().into()
        };

        for round in 0..self.rounds {
            let index = block_index(&state, round, ctx.dataset.len());
            let mut hasher = Blake3::new();
            hasher.update(&state);
            hasher.update(&ctx.dataset[index]);
            state = hasher.finalize().into();
        }

        let mix = Hash256::from_bytes(state);
        let digest = finalize_digest(header_hash, nonce, &mix);
        PowOutput { mix, digest }
    }

    fn verify(
        &self,
        ctx: &ReferenceContext,
        height: u64,
        header_hash: &Hash256,
        mix: &Hash256,
        nonce: u64,
    ) -> VerifyOutcome {
        let recomputed = self.hash_one(ctx, height, header_hash, nonce);
        VerifyOutcome {
            valid: recomputed.mix == *mix,
            digest: recomputed.digest,
        }
    }
}

fn derive_epoch_seed(epoch_number: u64) -> [u8; 32] {
    let mut hasher = Blake3::new();
    hasher.update(SEED_DOMAIN);
    hasher.update(&epoch_number.to_le_bytes());
    hasher.finalize().into()
}

fn block_index(state: &[u8; 32], round: usize, blocks: usize) -> usize {
    let word = u64::from_le_bytes(state[..8].try_into().unwrap());
    ((word ^ (round as u64).rotate_left(13)) % blocks as u64) as usize
}

fn finalize_digest(header_hash: &Hash256, nonce: u64, mix: &Hash256) -> Hash256 {
    let mut hasher = Sha256::new();
    hasher.update(header_hash.as_bytes());
    hasher.update(nonce.to_le_bytes());
    hasher.update(mix.as_bytes());
    Hash256::from_bytes(hasher.finalize().into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_engine() -> ReferenceEngine {
        ReferenceEngineBuilder::default()
            .epoch_length(10)
            .dataset_blocks(32)
            .rounds(4)
            .build_validated()
            .expect("build engine")
    }

    #[test]
    fn context_is_tagged_with_requested_epoch() {
        let engine = tiny_engine();
        for epoch in [0u64, 1, 7, u64::MAX / 10] {
            let ctx = engine.build_context(epoch).expect("build");
            assert_eq!(ctx.epoch_number(), epoch);
            assert_eq!(ctx.blocks(), 32);
        }
    }

    #[test]
    fn same_epoch_builds_identical_datasets() {
        let engine = tiny_engine();
        let a = engine.build_context(3).expect("build");
        let b = engine.build_context(3).expect("rebuild");
        assert_eq!(a.dataset, b.dataset);
    }

    #[test]
    fn different_epochs_build_different_datasets() {
        let engine = tiny_engine();
        let a = engine.build_context(0).expect("epoch 0");
        let b = engine.build_context(1).expect("epoch 1");
        assert_ne!(a.dataset, b.dataset);
    }

    #[test]
    fn epoch_number_is_monotonic_in_height() {
        let engine = tiny_engine();
        let mut prev = engine.epoch_number_for(0);
        for height in 1..50 {
            let epoch = engine.epoch_number_for(height);
            assert!(epoch >= prev);
            prev = epoch;
        }
        assert_eq!(engine.epoch_number_for(9), engine.epoch_number_for(0));
        assert_ne!(engine.epoch_number_for(10), engine.epoch_number_for(9));
    }

    #[test]
    fn hash_depends_on_every_input() {
        let engine = tiny_engine();
        let ctx = engine.build_context(0).expect("build");
        let header = Hash256::from_bytes([9u8; 32]);

        let base = engine.hash_one(&ctx, 3, &header, 5);
        assert_ne!(
            base.mix,
            engine.hash_one(&ctx, 3, &header, 6).mix,
            "nonce must affect the mix"
        );
        assert_ne!(
            base.mix,
            engine.hash_one(&ctx, 4, &header, 5).mix,
            "height must affect the mix"
        );
        let other_header = Hash256::from_bytes([10u8; 32]);
        assert_ne!(
            base.mix,
            engine.hash_one(&ctx, 3, &other_header, 5).mix,
            "header must affect the mix"
        );
    }

    #[test]
    fn builder_rejects_zero_parameters() {
        let err = ReferenceEngineBuilder::default()
            .epoch_length(0)
            .build_validated()
            .expect_err("zero epoch_length should be rejected");
        assert!(matches!(err, Error::InvalidInput(_)));

        let err = ReferenceEngineBuilder::default()
            .dataset_blocks(0)
            .build_validated()
            .expect_err("zero dataset_blocks should be rejected");
        assert!(matches!(err, Error::InvalidInput(_)));

        let err = ReferenceEngineBuilder::default()
            .rounds(0)
            .build_validated()
            .expect_err("zero rounds should be rejected");
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn builder_defaults_validate() {
        let engine = ReferenceEngineBuilder::default()
            .build_validated()
            .expect("defaults should validate");
        assert_eq!(engine.epoch_length, 30_000);
        assert_eq!(engine.dataset_blocks, 8192);
        assert_eq!(engine.rounds, 64);
    }
}
