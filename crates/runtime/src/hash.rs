// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 SQLVM Developers

//! Hash types and functions for the SQL VM.
//!
//! Block hashes and the randomness derivation both use Keccak-256, matching
//! the chain's own hashing convention.

use std::fmt::{self, Debug, Formatter};

use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};

pub const HASH_LENGTH: usize = 32;

#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hash256(pub [u8; HASH_LENGTH]);

impl Hash256 {
	pub const ZERO: Hash256 = Hash256([0u8; HASH_LENGTH]);

	pub fn as_bytes(&self) -> &[u8] {
		&self.0
	}
}

impl From<[u8; HASH_LENGTH]> for Hash256 {
	fn from(value: [u8; HASH_LENGTH]) -> Self {
		Hash256(value)
	}
}

impl From<Hash256> for [u8; HASH_LENGTH] {
	fn from(hash: Hash256) -> Self {
		hash.0
	}
}

impl Debug for Hash256 {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str("0x")?;
		for byte in self.0 {
			write!(f, "{:02x}", byte)?;
		}
		Ok(())
	}
}

/// Keccak-256 over the concatenation of `parts`.
pub fn keccak256<'a>(parts: impl IntoIterator<Item = &'a [u8]>) -> Hash256 {
	let mut hasher = Keccak256::new();
	for part in parts {
		hasher.update(part);
	}
	Hash256(hasher.finalize().into())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_empty_input() {
		let hash = keccak256([] as [&[u8]; 0]);
		assert_eq!(format!("{:?}", hash), "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470");
	}

	#[test]
	fn test_parts_are_concatenated() {
		let whole = keccak256([b"hello world".as_slice()]);
		let split = keccak256([b"hello".as_slice(), b" ".as_slice(), b"world".as_slice()]);
		assert_eq!(whole, split);
	}
}
