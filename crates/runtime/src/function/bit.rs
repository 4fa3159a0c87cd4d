// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 SQLVM Developers

//! Bitwise operators. Values are combined byte by byte over their canonical
//! encoding, column by column.

use sqlvm_type::{DataType, internal_error};

use crate::{
	Context, Instruction, Operand, Raw, Result, Tuple,
	guard::{expect_all, expect_operands, invalid_data_type, is_bit_operable, schema_eq},
};

type BinaryOp = fn(u8, u8) -> u8;

fn binary_raw(left: &Raw, right: &Raw, data_type: DataType, op: BinaryOp) -> Result<Raw> {
	let left = left.encode(data_type)?;
	let right = right.encode(data_type)?;

	if left.len() != right.len() {
		return Err(internal_error!(
			"bitwise operands of {} encode to {} and {} bytes",
			data_type,
			left.len(),
			right.len()
		)
		.into());
	}

	let bytes: Vec<u8> = left.iter().zip(right.iter()).map(|(l, r)| op(*l, *r)).collect();
	Raw::decode(&bytes, data_type)
}

fn binary_tuple(left: &Tuple, right: &Tuple, meta: &[DataType], op: BinaryOp) -> Result<Tuple> {
	meta.iter().zip(left.iter().zip(right.iter())).map(|(dt, (l, r))| binary_raw(l, r, *dt, op)).collect()
}

fn binary(instruction: &Instruction, op: BinaryOp) -> Result<Operand> {
	let function = instruction.function.name();
	expect_operands(function, &instruction.input, 2)?;

	let (left, right) = (&instruction.input[0], &instruction.input[1]);
	if !schema_eq(left, right) {
		return Err(invalid_data_type(function, 1, right));
	}
	expect_all(function, &instruction.input, 0, is_bit_operable)?;

	let rows = Operand::batch_rows(instruction.function, &instruction.input, instruction.length)?;
	Operand::from_fn(left.meta.clone(), rows, |i| binary_tuple(left.row(i), right.row(i), &left.meta, op))
}

pub(crate) fn bit_and(_ctx: &mut Context<'_>, instruction: &Instruction) -> Result<Operand> {
	binary(instruction, |l, r| l & r)
}

pub(crate) fn bit_or(_ctx: &mut Context<'_>, instruction: &Instruction) -> Result<Operand> {
	binary(instruction, |l, r| l | r)
}

pub(crate) fn bit_xor(_ctx: &mut Context<'_>, instruction: &Instruction) -> Result<Operand> {
	binary(instruction, |l, r| l ^ r)
}

fn not_raw(raw: &Raw, data_type: DataType) -> Result<Raw> {
	let bytes: Vec<u8> = raw.encode(data_type)?.iter().map(|b| !b).collect();
	Raw::decode(&bytes, data_type)
}

pub(crate) fn bit_not(_ctx: &mut Context<'_>, instruction: &Instruction) -> Result<Operand> {
	let function = instruction.function.name();
	expect_operands(function, &instruction.input, 1)?;
	expect_all(function, &instruction.input, 0, is_bit_operable)?;

	let operand = &instruction.input[0];
	let rows = Operand::batch_rows(instruction.function, &instruction.input, instruction.length)?;
	Operand::from_fn(operand.meta.clone(), rows, |i| {
		operand.meta.iter().zip(operand.row(i).iter()).map(|(dt, raw)| not_raw(raw, *dt)).collect()
	})
}
