// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 SQLVM Developers

use std::fmt::{self, Debug, Formatter};

use serde::{Deserialize, Serialize};
use sqlvm_type::ADDRESS_LENGTH;

use crate::hash::Hash256;

#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(pub [u8; ADDRESS_LENGTH]);

impl Address {
	pub fn as_bytes(&self) -> &[u8] {
		&self.0
	}
}

impl From<[u8; ADDRESS_LENGTH]> for Address {
	fn from(value: [u8; ADDRESS_LENGTH]) -> Self {
		Address(value)
	}
}

impl Debug for Address {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str("0x")?;
		for byte in self.0 {
			write!(f, "{:02x}", byte)?;
		}
		Ok(())
	}
}

/// Read access to chain state that lives outside the evaluator.
pub trait ChainState {
	/// Hash of the block with the given number.
	fn block_hash(&self, number: u64) -> Hash256;

	/// Current account nonce of `address`.
	fn nonce(&self, address: &Address) -> u64;
}

/// Execution context of one transaction or query.
///
/// `rand_call_index` is the only state evaluators write; it counts every
/// random value drawn during this execution and must never be shared with
/// another one.
pub struct Context<'a> {
	pub block_number: u64,
	pub time: u64,
	pub coinbase: Address,
	pub gas_limit: u64,
	pub caller: Address,
	pub input: Vec<u8>,
	pub origin: Address,
	pub randomness: Vec<u8>,
	pub rand_call_index: u64,
	chain: &'a dyn ChainState,
}

impl<'a> Context<'a> {
	pub fn builder(chain: &'a dyn ChainState) -> ContextBuilder<'a> {
		ContextBuilder::new(chain)
	}

	pub fn chain(&self) -> &dyn ChainState {
		self.chain
	}
}

impl Debug for Context<'_> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Context")
			.field("block_number", &self.block_number)
			.field("time", &self.time)
			.field("coinbase", &self.coinbase)
			.field("gas_limit", &self.gas_limit)
			.field("caller", &self.caller)
			.field("input", &self.input.len())
			.field("origin", &self.origin)
			.field("rand_call_index", &self.rand_call_index)
			.finish_non_exhaustive()
	}
}

pub struct ContextBuilder<'a> {
	context: Context<'a>,
}

impl<'a> ContextBuilder<'a> {
	pub fn new(chain: &'a dyn ChainState) -> Self {
		Self {
			context: Context {
				block_number: 0,
				time: 0,
				coinbase: Address::default(),
				gas_limit: 0,
				caller: Address::default(),
				input: Vec::new(),
				origin: Address::default(),
				randomness: Vec::new(),
				rand_call_index: 0,
				chain,
			},
		}
	}

	pub fn block_number(mut self, block_number: u64) -> Self {
		self.context.block_number = block_number;
		self
	}

	pub fn time(mut self, time: u64) -> Self {
		self.context.time = time;
		self
	}

	pub fn coinbase(mut self, coinbase: Address) -> Self {
		self.context.coinbase = coinbase;
		self
	}

	pub fn gas_limit(mut self, gas_limit: u64) -> Self {
		self.context.gas_limit = gas_limit;
		self
	}

	pub fn caller(mut self, caller: Address) -> Self {
		self.context.caller = caller;
		self
	}

	pub fn input(mut self, input: impl Into<Vec<u8>>) -> Self {
		self.context.input = input.into();
		self
	}

	pub fn origin(mut self, origin: Address) -> Self {
		self.context.origin = origin;
		self
	}

	pub fn randomness(mut self, randomness: impl Into<Vec<u8>>) -> Self {
		self.context.randomness = randomness.into();
		self
	}

	pub fn rand_call_index(mut self, rand_call_index: u64) -> Self {
		self.context.rand_call_index = rand_call_index;
		self
	}

	pub fn build(self) -> Context<'a> {
		self.context
	}
}
