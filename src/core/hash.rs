// Hashing utilities for the ledger

use sha2::{Sha256, Digest};
use crate::core::Block;

/// Single SHA256 hash, lowercase hex encoded
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Digest of a block: SHA256 over its canonical string.
///
/// Two blocks with equal field values always produce the same digest,
/// whatever order their fields were declared or parsed in.
pub fn digest(block: &Block) -> String {
    sha256_hex(block.canonical_string().as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PreviousHash, Transfer};
    use chrono::NaiveDate;

    fn fixed_genesis() -> Block {
        Block {
            index: 1,
            timestamp: 1697461234.25,
            transactions: vec![],
            proof: 100,
            previous_hash: PreviousHash::genesis(),
        }
    }

    #[test]
    fn test_sha256_hex() {
        // Well-known vector for the empty input
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(sha256_hex(b"hello world").len(), 64);
    }

    #[test]
    fn test_genesis_digest_vector() {
        // Known-good digest for this exact block
        assert_eq!(
            digest(&fixed_genesis()),
            "f6b26c62658c7fc3043dddcd9e3254bf9e30da77115c22adb94e6be067ebb444"
        );
    }

    #[test]
    fn test_block_digest_vector() {
        let date = NaiveDate::from_ymd_opt(2023, 10, 16).unwrap();
        let block = Block {
            index: 2,
            timestamp: 1697461240.5,
            transactions: vec![
                Transfer::new("alice", "bob", date),
                Transfer::new("server", "miner-7", date),
            ],
            proof: 4182,
            previous_hash: PreviousHash::Digest(digest(&fixed_genesis())),
        };

        assert_eq!(
            digest(&block),
            "c0e8dada182708567d25cf574d6723d0a66da6c16d80551c42a8b55d585ac745"
        );
    }

    #[test]
    fn test_digest_is_deterministic() {
        let block = fixed_genesis();
        assert_eq!(digest(&block), digest(&block.clone()));
        assert_eq!(digest(&block), block.hash());
    }

    #[test]
    fn test_digest_ignores_field_order() {
        let a: Block = serde_json::from_str(
            r#"{"index":1,"timestamp":1697461234.25,"transactions":[],"proof":100,"previous_hash":1}"#,
        ).unwrap();
        let b: Block = serde_json::from_str(
            r#"{"previous_hash":1,"proof":100,"transactions":[],"timestamp":1697461234.25,"index":1}"#,
        ).unwrap();

        assert_eq!(digest(&a), digest(&b));
        assert_eq!(digest(&a), digest(&fixed_genesis()));
    }

    #[test]
    fn test_digest_changes_with_any_field() {
        let base = fixed_genesis();

        let mut other = base.clone();
        other.proof = 101;
        assert_ne!(digest(&base), digest(&other));

        let mut other = base.clone();
        other.timestamp += 1.0;
        assert_ne!(digest(&base), digest(&other));
    }
}
