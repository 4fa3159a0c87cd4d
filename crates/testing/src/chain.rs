// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 SQLVM Developers

use std::{cell::RefCell, collections::HashMap};

use sqlvm_runtime::{Address, ChainState, Hash256, keccak256};

/// In-memory [`ChainState`] that records every block hash lookup.
///
/// Blocks without an explicit hash answer with `keccak256(number)`, so hashes
/// of different blocks differ without any setup.
#[derive(Debug, Default)]
pub struct MemoryChain {
	hashes: HashMap<u64, Hash256>,
	nonces: HashMap<Address, u64>,
	lookups: RefCell<Vec<u64>>,
}

impl MemoryChain {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_block_hash(mut self, number: u64, hash: Hash256) -> Self {
		self.hashes.insert(number, hash);
		self
	}

	pub fn with_nonce(mut self, address: Address, nonce: u64) -> Self {
		self.nonces.insert(address, nonce);
		self
	}

	/// Hash a lookup of block `number` resolves to.
	pub fn hash_of(&self, number: u64) -> Hash256 {
		self.hashes.get(&number).copied().unwrap_or_else(|| keccak256([number.to_be_bytes().as_slice()]))
	}

	/// Block numbers requested so far, in call order.
	pub fn lookups(&self) -> Vec<u64> {
		self.lookups.borrow().clone()
	}
}

impl ChainState for MemoryChain {
	fn block_hash(&self, number: u64) -> Hash256 {
		self.lookups.borrow_mut().push(number);
		self.hash_of(number)
	}

	fn nonce(&self, address: &Address) -> u64 {
		self.nonces.get(address).copied().unwrap_or(0)
	}
}
