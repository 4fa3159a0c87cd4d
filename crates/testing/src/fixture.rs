// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 SQLVM Developers

//! JSON case files for the function runtime.
//!
//! A case describes one execution context and a sequence of calls evaluated
//! against it in order. Types are written the way they display (`UINT256`,
//! `BYTES32`, `ADDRESS`, `DYNAMIC BYTES`, `UFIXED64X2`); values are decimal
//! strings for numeric columns and hex strings for byte columns.

use std::{collections::BTreeMap, str::FromStr};

use bigdecimal::BigDecimal;
use serde::Deserialize;
use sqlvm_runtime::{Address, Context, FunctionId, Hash256, Instruction, Operand, Raw, Result, dispatch, guard};
use sqlvm_type::{DataType, DataTypeMajor};

use crate::{MemoryChain, hex};

fn byte_count(bits: &str, s: &str) -> std::result::Result<u8, String> {
	let bits: u16 = bits.parse().map_err(|_| format!("invalid data type: {s}"))?;
	if bits == 0 || bits > 256 || bits % 8 != 0 {
		return Err(format!("invalid bit width in data type: {s}"));
	}
	Ok((bits / 8) as u8)
}

fn fixed_point(rest: &str, s: &str, major: fn(u8) -> DataTypeMajor) -> std::result::Result<DataType, String> {
	let (bits, minor) = rest.split_once('X').ok_or_else(|| format!("invalid data type: {s}"))?;
	let bytes = byte_count(bits, s)?;
	let minor: u8 = minor.parse().map_err(|_| format!("invalid data type: {s}"))?;
	Ok(DataType::compose(major(bytes - 1), minor))
}

/// Parses a type name as produced by `DataType`'s `Display`. A `0x` prefixed
/// hex number is taken as the raw descriptor.
pub fn parse_data_type(s: &str) -> std::result::Result<DataType, String> {
	let name = s.trim().to_ascii_uppercase();

	if let Some(raw) = name.strip_prefix("0X") {
		return u16::from_str_radix(raw, 16).map(DataType::from_raw).map_err(|_| format!("invalid data type: {s}"));
	}

	match name.as_str() {
		"ADDRESS" => return Ok(DataType::address()),
		"BYTES" | "DYNAMIC BYTES" => return Ok(DataType::dynamic_bytes()),
		_ => {}
	}

	if let Some(rest) = name.strip_prefix("UFIXED") {
		fixed_point(rest, s, DataTypeMajor::Ufixed)
	} else if let Some(rest) = name.strip_prefix("FIXED") {
		fixed_point(rest, s, DataTypeMajor::Fixed)
	} else if let Some(bits) = name.strip_prefix("UINT") {
		Ok(DataType::uint(byte_count(bits, s)?))
	} else if let Some(bits) = name.strip_prefix("INT") {
		Ok(DataType::int(byte_count(bits, s)?))
	} else if let Some(bytes) = name.strip_prefix("BYTES") {
		match bytes.parse::<u8>() {
			Ok(bytes @ 1..=32) => Ok(DataType::fixed_bytes(bytes)),
			_ => Err(format!("invalid data type: {s}")),
		}
	} else {
		Err(format!("unknown data type: {s}"))
	}
}

fn parse_raw(data_type: DataType, s: &str) -> std::result::Result<Raw, String> {
	if guard::is_byte_sequence(data_type) {
		Ok(Raw::Bytes(hex::decode(s)?))
	} else {
		BigDecimal::from_str(s).map(Raw::Number).map_err(|err| format!("invalid number {s}: {err}"))
	}
}

fn parse_address(s: &str) -> std::result::Result<Address, String> {
	if s.is_empty() {
		return Ok(Address::default());
	}
	hex::decode_array(s).map(Address)
}

fn parse_function(name: &str) -> std::result::Result<FunctionId, String> {
	FunctionId::ALL.into_iter().find(|id| id.name() == name).ok_or_else(|| format!("unknown function: {name}"))
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContextFixture {
	pub block_number: u64,
	pub time: u64,
	pub coinbase: String,
	pub gas_limit: u64,
	pub caller: String,
	pub input: String,
	pub origin: String,
	pub randomness: String,
	pub rand_call_index: u64,
	pub block_hashes: BTreeMap<u64, String>,
	pub nonces: BTreeMap<String, u64>,
}

impl ContextFixture {
	pub fn chain(&self) -> std::result::Result<MemoryChain, String> {
		let mut chain = MemoryChain::new();
		for (number, hash) in &self.block_hashes {
			chain = chain.with_block_hash(*number, Hash256(hex::decode_array(hash)?));
		}
		for (address, nonce) in &self.nonces {
			chain = chain.with_nonce(parse_address(address)?, *nonce);
		}
		Ok(chain)
	}

	pub fn context<'a>(&self, chain: &'a MemoryChain) -> std::result::Result<Context<'a>, String> {
		Ok(Context::builder(chain)
			.block_number(self.block_number)
			.time(self.time)
			.coinbase(parse_address(&self.coinbase)?)
			.gas_limit(self.gas_limit)
			.caller(parse_address(&self.caller)?)
			.input(hex::decode(&self.input)?)
			.origin(parse_address(&self.origin)?)
			.randomness(hex::decode(&self.randomness)?)
			.rand_call_index(self.rand_call_index)
			.build())
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OperandFixture {
	#[serde(default)]
	pub immediate: bool,
	pub meta: Vec<String>,
	#[serde(default)]
	pub rows: Vec<Vec<String>>,
}

impl OperandFixture {
	pub fn to_operand(&self) -> std::result::Result<Operand, String> {
		let meta = self.meta.iter().map(|name| parse_data_type(name)).collect::<std::result::Result<Vec<_>, _>>()?;

		let mut data = Vec::with_capacity(self.rows.len());
		for row in &self.rows {
			if row.len() != meta.len() {
				return Err(format!("row {row:?} does not match {} columns", meta.len()));
			}
			data.push(
				meta.iter()
					.zip(row)
					.map(|(dt, value)| parse_raw(*dt, value))
					.collect::<std::result::Result<Vec<_>, _>>()?,
			);
		}

		Ok(Operand {
			is_immediate: self.immediate,
			meta,
			data,
		})
	}
}

/// One call and its expected outcome: either an `output`, an `error` code
/// (`"Fault"` for faults), or just a row count.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CallFixture {
	pub function: String,
	#[serde(default)]
	pub length: usize,
	#[serde(default)]
	pub input: Vec<OperandFixture>,
	#[serde(default)]
	pub output: Option<OperandFixture>,
	#[serde(default)]
	pub rows: Option<usize>,
	#[serde(default)]
	pub error: Option<String>,
}

impl CallFixture {
	pub fn instruction(&self) -> std::result::Result<Instruction, String> {
		let input = self.input.iter().map(OperandFixture::to_operand).collect::<std::result::Result<Vec<_>, _>>()?;
		Ok(Instruction::new(parse_function(&self.function)?, input, self.length))
	}

	pub fn check(&self, result: Result<Operand>) -> std::result::Result<(), String> {
		match (result, &self.error) {
			(Ok(operand), None) => {
				if let Some(expected) = &self.output {
					let expected = expected.to_operand()?;
					if operand != expected {
						return Err(format!("{}: expected {expected:?}, got {operand:?}", self.function));
					}
				}
				if let Some(rows) = self.rows {
					if operand.rows() != rows {
						return Err(format!("{}: expected {rows} rows, got {}", self.function, operand.rows()));
					}
				}
				Ok(())
			}
			(Ok(operand), Some(code)) => {
				Err(format!("{}: expected error {code}, got {operand:?}", self.function))
			}
			(Err(err), Some(code)) => {
				let actual = err.code().map(|code| format!("{code:?}")).unwrap_or_else(|| "Fault".to_string());
				if &actual == code {
					Ok(())
				} else {
					Err(format!("{}: expected error {code}, got {actual}: {err}", self.function))
				}
			}
			(Err(err), None) => Err(format!("{}: unexpected error: {err}", self.function)),
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaseFixture {
	#[serde(default)]
	pub context: ContextFixture,
	pub calls: Vec<CallFixture>,
	/// Expected randomness counter after the last call.
	#[serde(default)]
	pub rand_call_index: Option<u64>,
}

impl CaseFixture {
	pub fn from_json(json: &str) -> std::result::Result<Self, String> {
		serde_json::from_str(json).map_err(|err| err.to_string())
	}

	/// Evaluates every call against one shared context.
	pub fn run(&self) -> std::result::Result<(), String> {
		let chain = self.context.chain()?;
		let mut ctx = self.context.context(&chain)?;

		for (index, call) in self.calls.iter().enumerate() {
			let instruction = call.instruction()?;
			call.check(dispatch(&mut ctx, &instruction)).map_err(|err| format!("call {index}: {err}"))?;
		}

		if let Some(expected) = self.rand_call_index {
			if ctx.rand_call_index != expected {
				return Err(format!("expected randomness counter {expected}, got {}", ctx.rand_call_index));
			}
		}
		Ok(())
	}
}
