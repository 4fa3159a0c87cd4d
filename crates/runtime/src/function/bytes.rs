// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 SQLVM Developers

use bigdecimal::BigDecimal;
use sqlvm_type::{DataType, decimal_to_u64, internal_error};

use crate::{
	Context, FunctionError, Instruction, Operand, Raw, Result,
	guard::{expect_all, expect_operands, invalid_data_type, is_byte_sequence, is_numeric},
};

fn raw_bytes<'r>(raw: &'r Raw, data_type: DataType) -> Result<&'r [u8]> {
	raw.as_bytes().ok_or_else(|| internal_error!("{} column holds a number: {:?}", data_type, raw).into())
}

pub(crate) fn octet_length(_ctx: &mut Context<'_>, instruction: &Instruction) -> Result<Operand> {
	let function = instruction.function.name();
	expect_operands(function, &instruction.input, 1)?;
	expect_all(function, &instruction.input, 0, is_byte_sequence)?;

	let operand = &instruction.input[0];
	let rows = Operand::batch_rows(instruction.function, &instruction.input, instruction.length)?;
	let meta = vec![DataType::uint(32); operand.columns()];

	Operand::from_fn(meta, rows, |i| {
		operand.meta
			.iter()
			.zip(operand.row(i).iter())
			.map(|(dt, raw)| Ok(Raw::Number(BigDecimal::from(raw_bytes(raw, *dt)?.len() as u64))))
			.collect()
	})
}

/// The single value an index operand resolves to.
fn single_u64(function: &'static str, instruction: &Instruction, index: usize, what: &str) -> Result<u64> {
	let operand = &instruction.input[index];
	operand.check_width()?;
	let mut values = operand.data.iter().flatten();

	let (Some(value), None) = (values.next(), values.next()) else {
		return Err(FunctionError::IndexOutOfRange {
			function,
			reason: format!("{} must resolve to a single value, got {}", what, operand.data.iter().flatten().count()),
		}
		.into());
	};

	let value = value.as_number().ok_or_else(|| invalid_data_type(function, index, operand))?;
	Ok(decimal_to_u64(value)?)
}

pub(crate) fn substring(_ctx: &mut Context<'_>, instruction: &Instruction) -> Result<Operand> {
	let function = instruction.function.name();
	expect_operands(function, &instruction.input, 3)?;
	expect_all(function, &instruction.input, 0, is_byte_sequence)?;
	expect_all(function, &instruction.input, 1, is_numeric)?;
	expect_all(function, &instruction.input, 2, is_numeric)?;

	let start = single_u64(function, instruction, 1, "start")?;
	let length = single_u64(function, instruction, 2, "length")?;

	let source = &instruction.input[0];
	let rows = Operand::batch_rows(instruction.function, std::slice::from_ref(source), instruction.length)?;
	let meta = vec![DataType::dynamic_bytes(); source.columns()];

	let out_of_range = |len: usize| -> crate::Error {
		FunctionError::IndexOutOfRange {
			function,
			reason: format!("range [{}, {}+{}) exceeds value of {} bytes", start, start, length, len),
		}
		.into()
	};

	Operand::from_fn(meta, rows, |i| {
		source.meta
			.iter()
			.zip(source.row(i).iter())
			.map(|(dt, raw)| {
				let bytes = raw_bytes(raw, *dt)?;
				let end = start.checked_add(length).ok_or_else(|| out_of_range(bytes.len()))?;
				let (Ok(start), Ok(end)) = (usize::try_from(start), usize::try_from(end)) else {
					return Err(out_of_range(bytes.len()));
				};
				let slice = bytes.get(start..end).ok_or_else(|| out_of_range(bytes.len()))?;
				Ok(Raw::bytes(slice))
			})
			.collect()
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{ErrorCode, context::{Address, ChainState}, function::FunctionId, hash::Hash256};

	struct NoChain;

	impl ChainState for NoChain {
		fn block_hash(&self, _number: u64) -> Hash256 {
			Hash256::ZERO
		}

		fn nonce(&self, _address: &Address) -> u64 {
			0
		}
	}

	fn index(value: u64) -> Operand {
		Operand::immediate(vec![DataType::uint(8)], vec![Raw::number(value)])
	}

	fn text(values: &[&str]) -> Operand {
		Operand::new(vec![DataType::dynamic_bytes()], values.iter().map(|v| vec![Raw::bytes(v.as_bytes())]).collect())
	}

	fn call(input: Vec<Operand>, f: crate::function::Evaluator) -> Result<Operand> {
		let mut ctx = Context::builder(&NoChain).build();
		let length = input.first().map(Operand::rows).unwrap_or(0);
		f(&mut ctx, &Instruction::new(FunctionId::Substring, input, length))
	}

	#[test]
	fn test_substring_copies_range() {
		let result = call(vec![text(&["hello world", "0123456789ab"]), index(6), index(5)], substring).unwrap();
		assert_eq!(result, text(&["world", "6789a"]));
	}

	#[test]
	fn test_substring_empty_range() {
		let result = call(vec![text(&["abc"]), index(3), index(0)], substring).unwrap();
		assert_eq!(result, text(&[""]));
	}

	#[test]
	fn test_substring_out_of_range() {
		let err = call(vec![text(&["abc"]), index(2), index(2)], substring).unwrap_err();
		assert_eq!(err.code(), Some(ErrorCode::IndexOutOfRange));

		let err = call(vec![text(&["abc"]), index(u64::MAX), index(1)], substring).unwrap_err();
		assert_eq!(err.code(), Some(ErrorCode::IndexOutOfRange));
	}

	#[test]
	fn test_substring_start_must_be_single_value() {
		let start = Operand::new(vec![DataType::uint(8)], vec![vec![Raw::number(0)], vec![Raw::number(1)]]);
		let err = call(vec![text(&["abc", "def"]), start, index(1)], substring).unwrap_err();
		assert_eq!(err.code(), Some(ErrorCode::IndexOutOfRange));
	}

	#[test]
	fn test_substring_rejects_non_integer_start() {
		let start = Operand::immediate(
			vec![DataType::compose(sqlvm_type::DataTypeMajor::Ufixed(0), 1)],
			vec![Raw::number(BigDecimal::new(15.into(), 1))],
		);
		let err = call(vec![text(&["abc"]), start, index(1)], substring).unwrap_err();
		assert_eq!(err.code(), Some(ErrorCode::Evaluation));
	}

	#[test]
	fn test_octet_length() {
		let result = call(vec![text(&["", "hello"])], octet_length).unwrap();
		assert_eq!(result.meta, vec![DataType::uint(32)]);
		assert_eq!(result.data, vec![vec![Raw::number(0u64)], vec![Raw::number(5u64)]]);
	}

	#[test]
	fn test_octet_length_rejects_numbers() {
		let err = call(vec![index(1)], octet_length).unwrap_err();
		assert_eq!(err.code(), Some(ErrorCode::InvalidDataType));
	}
}
