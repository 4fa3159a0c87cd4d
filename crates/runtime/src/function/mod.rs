// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 SQLVM Developers

//! Built-in function catalog and dispatch.
//!
//! Function identifiers are assigned by the compiler and form a wire
//! contract: the discriminants of [`FunctionId`] must never be renumbered.

mod bit;
mod block_hash;
mod bytes;
mod env;
mod rand;

pub use block_hash::BLOCK_HASH_WINDOW;
pub use rand::RandomnessCursor;

use tracing::{instrument, trace};

use crate::{Context, FunctionError, Instruction, Operand, Result, gas::GasCategory};

#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionId {
	BlockHash = 0,
	BlockNumber = 1,
	BlockTimestamp = 2,
	BlockCoinbase = 3,
	BlockGasLimit = 4,
	MsgSender = 5,
	MsgData = 6,
	TxOrigin = 7,
	Now = 8,
	Rand = 9,
	BitAnd = 10,
	BitOr = 11,
	BitXor = 12,
	BitNot = 13,
	OctetLength = 14,
	Substring = 15,
}

impl FunctionId {
	pub const ALL: [FunctionId; 16] = [
		FunctionId::BlockHash,
		FunctionId::BlockNumber,
		FunctionId::BlockTimestamp,
		FunctionId::BlockCoinbase,
		FunctionId::BlockGasLimit,
		FunctionId::MsgSender,
		FunctionId::MsgData,
		FunctionId::TxOrigin,
		FunctionId::Now,
		FunctionId::Rand,
		FunctionId::BitAnd,
		FunctionId::BitOr,
		FunctionId::BitXor,
		FunctionId::BitNot,
		FunctionId::OctetLength,
		FunctionId::Substring,
	];

	pub fn unit(self) -> &'static FunctionUnit {
		&FUNCTIONS[self as usize]
	}

	pub fn name(self) -> &'static str {
		self.unit().name
	}

	pub fn gas_category(self) -> GasCategory {
		self.unit().gas
	}
}

impl TryFrom<u16> for FunctionId {
	type Error = FunctionError;

	fn try_from(value: u16) -> std::result::Result<Self, Self::Error> {
		FunctionId::ALL.get(value as usize).copied().ok_or_else(|| FunctionError::Evaluation {
			function: "UNKNOWN",
			reason: format!("unknown function identifier {}", value),
		})
	}
}

impl From<FunctionId> for u16 {
	fn from(id: FunctionId) -> Self {
		id as u16
	}
}

pub type Evaluator = fn(&mut Context<'_>, &Instruction) -> Result<Operand>;

pub struct FunctionUnit {
	pub id: FunctionId,
	pub name: &'static str,
	pub evaluator: Evaluator,
	pub gas: GasCategory,
}

static FUNCTIONS: [FunctionUnit; 16] = [
	FunctionUnit {
		id: FunctionId::BlockHash,
		name: "BLOCK_HASH",
		evaluator: block_hash::block_hash,
		gas: GasCategory::MemAlloc,
	},
	FunctionUnit {
		id: FunctionId::BlockNumber,
		name: "BLOCK_NUMBER",
		evaluator: env::block_number,
		gas: GasCategory::MemAlloc,
	},
	FunctionUnit {
		id: FunctionId::BlockTimestamp,
		name: "BLOCK_TIMESTAMP",
		evaluator: env::block_timestamp,
		gas: GasCategory::MemAlloc,
	},
	FunctionUnit {
		id: FunctionId::BlockCoinbase,
		name: "BLOCK_COINBASE",
		evaluator: env::block_coinbase,
		gas: GasCategory::MemAlloc,
	},
	FunctionUnit {
		id: FunctionId::BlockGasLimit,
		name: "BLOCK_GAS_LIMIT",
		evaluator: env::block_gas_limit,
		gas: GasCategory::MemAlloc,
	},
	FunctionUnit {
		id: FunctionId::MsgSender,
		name: "MSG_SENDER",
		evaluator: env::msg_sender,
		gas: GasCategory::MemAlloc,
	},
	FunctionUnit {
		id: FunctionId::MsgData,
		name: "MSG_DATA",
		evaluator: env::msg_data,
		gas: GasCategory::MemAlloc,
	},
	FunctionUnit {
		id: FunctionId::TxOrigin,
		name: "TX_ORIGIN",
		evaluator: env::tx_origin,
		gas: GasCategory::MemAlloc,
	},
	FunctionUnit {
		id: FunctionId::Now,
		name: "NOW",
		evaluator: env::block_timestamp,
		gas: GasCategory::MemAlloc,
	},
	FunctionUnit {
		id: FunctionId::Rand,
		name: "RAND",
		evaluator: rand::rand,
		gas: GasCategory::MemAlloc,
	},
	FunctionUnit {
		id: FunctionId::BitAnd,
		name: "BIT_AND",
		evaluator: bit::bit_and,
		gas: GasCategory::BitCmp,
	},
	FunctionUnit {
		id: FunctionId::BitOr,
		name: "BIT_OR",
		evaluator: bit::bit_or,
		gas: GasCategory::BitCmp,
	},
	FunctionUnit {
		id: FunctionId::BitXor,
		name: "BIT_XOR",
		evaluator: bit::bit_xor,
		gas: GasCategory::BitCmp,
	},
	FunctionUnit {
		id: FunctionId::BitNot,
		name: "BIT_NOT",
		evaluator: bit::bit_not,
		gas: GasCategory::BitCmp,
	},
	FunctionUnit {
		id: FunctionId::OctetLength,
		name: "OCTET_LENGTH",
		evaluator: bytes::octet_length,
		gas: GasCategory::MemAlloc,
	},
	FunctionUnit {
		id: FunctionId::Substring,
		name: "SUBSTRING",
		evaluator: bytes::substring,
		gas: GasCategory::MemFree,
	},
];

/// Evaluates one instruction against `ctx`.
///
/// Calls sharing a context must be serialized: the randomness counter is
/// advanced in place.
#[instrument(
	name = "runtime::dispatch",
	level = "trace",
	skip(ctx, instruction),
	fields(function = instruction.function.name(), length = instruction.length)
)]
pub fn dispatch(ctx: &mut Context<'_>, instruction: &Instruction) -> Result<Operand> {
	let unit = instruction.function.unit();
	let result = (unit.evaluator)(ctx, instruction)?;
	trace!(rows = result.rows(), columns = result.columns(), "evaluated");
	Ok(result)
}
