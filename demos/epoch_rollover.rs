//! Walk a few heights across an epoch boundary and show when the cached
//! dataset is rebuilt, then round-trip a verification.

use epochash::{Hash256, PowHasher, ReferenceEngineBuilder};

fn main() -> Result<(), epochash::Error> {
    let engine = ReferenceEngineBuilder::default()
        .epoch_length(50)
        .dataset_blocks(512)
        .rounds(16)
        .build_validated()?;
    let hasher = PowHasher::new(engine);

    let header = Hash256::from_bytes([7u8; 32]);
    for height in [0u64, 25, 49, 50, 75, 100] {
        let out = hasher.hash_one(&header, 0xdead_beef, height)?;
        let epoch = hasher.cached_epoch().expect("context resident after hashing");
        println!("height {height:>3} -> epoch {epoch} digest {}", out.digest);
    }

    let out = hasher.hash_one(&header, 42, 60)?;
    let check = hasher.verify(&header, 42, 60, &out.mix)?;
    println!("verify at height 60: valid={} digest={}", check.valid, check.digest);

    let mut tampered = *out.mix.as_bytes();
    tampered[0] ^= 1;
    let check = hasher.verify(&header, 42, 60, &Hash256::from_bytes(tampered))?;
    println!("verify tampered mix: valid={}", check.valid);

    Ok(())
}
