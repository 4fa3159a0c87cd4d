// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 SQLVM Developers

use bigdecimal::BigDecimal;
use sqlvm_type::{DataType, decimal_to_u64};

use crate::{
	Context, FunctionError, Instruction, Operand, Raw, Result,
	guard::{expect_all, expect_operands, invalid_data_type, is_numeric},
	hash::{HASH_LENGTH, Hash256},
};

/// Number of blocks before the current one whose hashes are available.
pub const BLOCK_HASH_WINDOW: u64 = 256;

/// Hash of block `number` seen from block `current`, or all zeros when
/// `number` lies outside `(current - 257, current)`.
fn block_hash_at(
	ctx: &Context<'_>,
	function: &'static str,
	number: &BigDecimal,
	current: &BigDecimal,
) -> Result<Hash256> {
	let lowest = current - BigDecimal::from(BLOCK_HASH_WINDOW + 1);
	if number > &lowest && number < current {
		let number = decimal_to_u64(number).map_err(|err| FunctionError::Evaluation {
			function,
			reason: err.to_string(),
		})?;
		Ok(ctx.chain().block_hash(number))
	} else {
		Ok(Hash256::ZERO)
	}
}

pub(crate) fn block_hash(ctx: &mut Context<'_>, instruction: &Instruction) -> Result<Operand> {
	let function = instruction.function.name();
	expect_operands(function, &instruction.input, 1)?;
	expect_all(function, &instruction.input, 0, is_numeric)?;

	let operand = &instruction.input[0];
	if operand.columns() != 1 {
		return Err(invalid_data_type(function, 0, operand));
	}

	let rows = Operand::batch_rows(instruction.function, &instruction.input, instruction.length)?;
	let ctx: &Context<'_> = ctx;
	let current = BigDecimal::from(ctx.block_number);
	let data_type = DataType::fixed_bytes(HASH_LENGTH as u8);

	let lookup = |index: usize| -> Result<Raw> {
		let number = operand.row(index)[0].as_number().ok_or_else(|| invalid_data_type(function, 0, operand))?;
		Ok(Raw::bytes(block_hash_at(ctx, function, number, &current)?.as_bytes()))
	};

	if operand.is_immediate {
		let value = lookup(0)?;
		Ok(Operand::broadcast(data_type, &value, rows))
	} else {
		Operand::from_fn(vec![data_type], rows, |index| Ok(vec![lookup(index)?]))
	}
}
