// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 SQLVM Developers

//! Operand type guards. A failed guard is always a user-facing
//! [`FunctionError`], never a fault.

use sqlvm_type::{DataType, DataTypeMajor};

use crate::{FunctionError, Operand, Result};

pub fn is_bit_operable(data_type: DataType) -> bool {
	matches!(data_type.major(), DataTypeMajor::Uint | DataTypeMajor::Int | DataTypeMajor::FixedBytes)
}

pub fn is_byte_sequence(data_type: DataType) -> bool {
	matches!(data_type.major(), DataTypeMajor::FixedBytes | DataTypeMajor::Address | DataTypeMajor::DynamicBytes)
}

pub fn is_numeric(data_type: DataType) -> bool {
	matches!(
		data_type.major(),
		DataTypeMajor::Int | DataTypeMajor::Uint | DataTypeMajor::Fixed(_) | DataTypeMajor::Ufixed(_)
	)
}

pub fn schema_eq(left: &Operand, right: &Operand) -> bool {
	left.meta == right.meta
}

pub fn expect_operands(function: &'static str, input: &[Operand], expected: usize) -> Result<()> {
	if input.len() != expected {
		return Err(FunctionError::InvalidOperandNum {
			function,
			expected,
			actual: input.len(),
		}
		.into());
	}
	Ok(())
}

/// Fails unless every column of operand `index` satisfies `predicate`.
pub fn expect_all(
	function: &'static str,
	input: &[Operand],
	index: usize,
	predicate: impl Fn(DataType) -> bool,
) -> Result<()> {
	let operand = &input[index];
	if operand.meta.iter().all(|data_type| predicate(*data_type)) {
		Ok(())
	} else {
		Err(invalid_data_type(function, index, operand))
	}
}

pub fn invalid_data_type(function: &'static str, index: usize, operand: &Operand) -> crate::Error {
	FunctionError::InvalidDataType {
		function,
		operand: index,
		actual: operand.meta.clone(),
	}
	.into()
}
