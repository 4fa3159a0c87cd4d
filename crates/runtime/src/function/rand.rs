// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 SQLVM Developers

use bigdecimal::BigDecimal;
use sqlvm_type::{DataType, decimal_decode};
use tracing::debug;

use crate::{
	Context, FunctionError, Instruction, Operand, Raw, Result, context::Address, guard::expect_operands,
	hash::keccak256,
};

/// Longest unsigned LEB128 encoding of a `u64`.
pub const MAX_VARINT_LEN64: usize = 10;

fn uvarint(mut value: u64) -> [u8; MAX_VARINT_LEN64] {
	let mut buf = [0u8; MAX_VARINT_LEN64];
	let mut i = 0;
	while value >= 0x80 {
		buf[i] = value as u8 | 0x80;
		value >>= 7;
		i += 1;
	}
	buf[i] = value as u8;
	buf
}

/// Position in the per-execution random sequence.
///
/// Each value is `keccak256(seed ‖ origin ‖ uvarint(nonce) ‖ uvarint(index))`
/// read as a `uint256`; drawing a value yields the cursor for the next index.
#[derive(Debug, Clone)]
pub struct RandomnessCursor<'a> {
	seed: &'a [u8],
	origin: &'a Address,
	nonce: [u8; MAX_VARINT_LEN64],
	index: u64,
}

impl<'a> RandomnessCursor<'a> {
	pub fn new(seed: &'a [u8], origin: &'a Address, nonce: u64, index: u64) -> Self {
		Self {
			seed,
			origin,
			nonce: uvarint(nonce),
			index,
		}
	}

	pub fn index(&self) -> u64 {
		self.index
	}

	pub fn next(self) -> Result<(BigDecimal, Self)> {
		let index = uvarint(self.index);
		let hash = keccak256([self.seed, self.origin.as_bytes(), &self.nonce, &index]);
		let value = decimal_decode(DataType::uint(32), hash.as_bytes())?;

		let next = self.index.checked_add(1).ok_or_else(|| FunctionError::Evaluation {
			function: "RAND",
			reason: "randomness counter exhausted".to_string(),
		})?;

		Ok((
			value,
			Self {
				index: next,
				..self
			},
		))
	}
}

pub(crate) fn rand(ctx: &mut Context<'_>, instruction: &Instruction) -> Result<Operand> {
	expect_operands(instruction.function.name(), &instruction.input, 0)?;

	let nonce = ctx.chain().nonce(&ctx.origin);
	let start = ctx.rand_call_index;

	let mut cursor = RandomnessCursor::new(&ctx.randomness, &ctx.origin, nonce, start);
	let mut data = Vec::with_capacity(instruction.length);
	for _ in 0..instruction.length {
		let (value, next) = cursor.next()?;
		data.push(vec![Raw::Number(value)]);
		cursor = next;
	}
	let end = cursor.index();

	ctx.rand_call_index = end;
	debug!(start, end, "advanced randomness counter");

	Ok(Operand::new(vec![DataType::uint(32)], data))
}
