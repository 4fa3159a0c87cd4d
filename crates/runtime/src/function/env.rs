// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 SQLVM Developers

//! Accessors for block, message and transaction fields. Each one reads a
//! single context field and broadcasts it to every output row.

use bigdecimal::BigDecimal;
use sqlvm_type::DataType;

use crate::{Context, Instruction, Operand, Raw, Result, guard::expect_operands};

fn broadcast(instruction: &Instruction, data_type: DataType, value: Raw) -> Result<Operand> {
	expect_operands(instruction.function.name(), &instruction.input, 0)?;
	Ok(Operand::broadcast(data_type, &value, instruction.length))
}

pub(crate) fn block_number(ctx: &mut Context<'_>, instruction: &Instruction) -> Result<Operand> {
	broadcast(instruction, DataType::uint(32), Raw::Number(BigDecimal::from(ctx.block_number)))
}

pub(crate) fn block_timestamp(ctx: &mut Context<'_>, instruction: &Instruction) -> Result<Operand> {
	broadcast(instruction, DataType::uint(32), Raw::Number(BigDecimal::from(ctx.time)))
}

pub(crate) fn block_coinbase(ctx: &mut Context<'_>, instruction: &Instruction) -> Result<Operand> {
	broadcast(instruction, DataType::address(), Raw::bytes(ctx.coinbase.as_bytes()))
}

pub(crate) fn block_gas_limit(ctx: &mut Context<'_>, instruction: &Instruction) -> Result<Operand> {
	broadcast(instruction, DataType::uint(8), Raw::Number(BigDecimal::from(ctx.gas_limit)))
}

pub(crate) fn msg_sender(ctx: &mut Context<'_>, instruction: &Instruction) -> Result<Operand> {
	broadcast(instruction, DataType::address(), Raw::bytes(ctx.caller.as_bytes()))
}

pub(crate) fn msg_data(ctx: &mut Context<'_>, instruction: &Instruction) -> Result<Operand> {
	broadcast(instruction, DataType::dynamic_bytes(), Raw::bytes(ctx.input.as_slice()))
}

pub(crate) fn tx_origin(ctx: &mut Context<'_>, instruction: &Instruction) -> Result<Operand> {
	broadcast(instruction, DataType::address(), Raw::bytes(ctx.origin.as_bytes()))
}
