// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 SQLVM Developers

use std::time::{Duration, Instant};

use bigdecimal::BigDecimal;
use sqlvm_runtime::{Context, ErrorCode, FunctionId, Instruction, Operand, Raw, dispatch};
use sqlvm_testing::{MemoryChain, init_tracing};
use sqlvm_type::DataType;

fn column(data_type: DataType, values: &[i64]) -> Operand {
	Operand::new(vec![data_type], values.iter().map(|v| vec![Raw::number(*v)]).collect())
}

fn eval(function: FunctionId, input: Vec<Operand>, length: usize) -> sqlvm_runtime::Result<Operand> {
	let chain = MemoryChain::new();
	let mut ctx = Context::builder(&chain).build();
	dispatch(&mut ctx, &Instruction::new(function, input, length))
}

#[test]
fn test_binary_operators() {
	init_tracing();
	let left = column(DataType::uint(1), &[0b1010, 0xff, 0]);
	let right = column(DataType::uint(1), &[0b1100, 0x0f, 0]);

	let cases: [(FunctionId, [i64; 3]); 3] = [
		(FunctionId::BitAnd, [0b1000, 0x0f, 0]),
		(FunctionId::BitOr, [0b1110, 0xff, 0]),
		(FunctionId::BitXor, [0b0110, 0xf0, 0]),
	];
	for (function, expected) in cases {
		let result = eval(function, vec![left.clone(), right.clone()], 3).unwrap();
		assert_eq!(result, column(DataType::uint(1), &expected), "{}", function.name());
	}
}

#[test]
fn test_signed_operands() {
	let left = column(DataType::int(2), &[-1, -256, 0x7fff]);
	let right = column(DataType::int(2), &[0x1234, 0xff, -1]);

	let result = eval(FunctionId::BitAnd, vec![left.clone(), right.clone()], 3).unwrap();
	assert_eq!(result, column(DataType::int(2), &[0x1234, 0, 0x7fff]));

	let result = eval(FunctionId::BitXor, vec![left, right], 3).unwrap();
	assert_eq!(result, column(DataType::int(2), &[-0x1235, -1, -0x8000]));
}

#[test]
fn test_fixed_bytes() {
	let dt = DataType::fixed_bytes(2);
	let left = Operand::new(vec![dt], vec![vec![Raw::bytes(vec![0xf0, 0xaa])]]);
	let right = Operand::new(vec![dt], vec![vec![Raw::bytes(vec![0x3c, 0x0f])]]);

	let result = eval(FunctionId::BitOr, vec![left, right], 1).unwrap();
	assert_eq!(result, Operand::new(vec![dt], vec![vec![Raw::bytes(vec![0xfc, 0xaf])]]));
}

#[test]
fn test_multiple_columns() {
	let meta = vec![DataType::uint(1), DataType::fixed_bytes(1)];
	let left = Operand::new(meta.clone(), vec![vec![Raw::number(6), Raw::bytes(vec![0x0f])]]);
	let right = Operand::new(meta.clone(), vec![vec![Raw::number(3), Raw::bytes(vec![0xf1])]]);

	let result = eval(FunctionId::BitAnd, vec![left, right], 1).unwrap();
	assert_eq!(result, Operand::new(meta, vec![vec![Raw::number(2), Raw::bytes(vec![0x01])]]));
}

#[test]
fn test_immediate_operand() {
	let left = column(DataType::uint(1), &[1, 2, 3]);
	let mask = Operand::immediate(vec![DataType::uint(1)], vec![Raw::number(1)]);

	let result = eval(FunctionId::BitAnd, vec![left.clone(), mask.clone()], 3).unwrap();
	assert_eq!(result, column(DataType::uint(1), &[1, 0, 1]));

	let result = eval(FunctionId::BitOr, vec![mask.clone(), left], 3).unwrap();
	assert_eq!(result, column(DataType::uint(1), &[1, 3, 3]));

	let result = eval(FunctionId::BitXor, vec![mask.clone(), mask], 4).unwrap();
	assert_eq!(result, column(DataType::uint(1), &[0, 0, 0, 0]));
}

#[test]
fn test_not() {
	let result = eval(FunctionId::BitNot, vec![column(DataType::uint(1), &[0, 0x0f])], 2).unwrap();
	assert_eq!(result, column(DataType::uint(1), &[0xff, 0xf0]));

	let result = eval(FunctionId::BitNot, vec![column(DataType::int(1), &[0, -128, 5])], 3).unwrap();
	assert_eq!(result, column(DataType::int(1), &[-1, 127, -6]));
}

#[test]
fn test_not_is_involution() {
	let operand = column(DataType::int(4), &[0, 1, -1, i32::MIN as i64, i32::MAX as i64, 123_456]);
	let once = eval(FunctionId::BitNot, vec![operand.clone()], 6).unwrap();
	let twice = eval(FunctionId::BitNot, vec![once], 6).unwrap();
	assert_eq!(twice, operand);
}

#[test]
fn test_rejects_non_bitwise_types() {
	let address = Operand::new(vec![DataType::address()], vec![vec![Raw::bytes(vec![0; 20])]]);
	let err = eval(FunctionId::BitAnd, vec![address.clone(), address.clone()], 1).unwrap_err();
	assert_eq!(err.code(), Some(ErrorCode::InvalidDataType));

	let dynamic = Operand::new(vec![DataType::dynamic_bytes()], vec![vec![Raw::bytes(vec![1])]]);
	let err = eval(FunctionId::BitNot, vec![dynamic], 1).unwrap_err();
	assert_eq!(err.code(), Some(ErrorCode::InvalidDataType));
}

#[test]
fn test_rejects_schema_mismatch() {
	let err = eval(
		FunctionId::BitOr,
		vec![column(DataType::uint(1), &[1]), column(DataType::uint(2), &[1])],
		1,
	)
	.unwrap_err();
	assert_eq!(err.code(), Some(ErrorCode::InvalidDataType));

	let err = eval(FunctionId::BitOr, vec![column(DataType::uint(1), &[1]), column(DataType::int(1), &[1])], 1)
		.unwrap_err();
	assert_eq!(err.code(), Some(ErrorCode::InvalidDataType));
}

#[test]
fn test_operand_count() {
	let operand = column(DataType::uint(1), &[1]);
	let err = eval(FunctionId::BitAnd, vec![operand.clone()], 1).unwrap_err();
	assert_eq!(err.code(), Some(ErrorCode::InvalidOperandNum));

	let err = eval(FunctionId::BitNot, vec![operand.clone(), operand], 1).unwrap_err();
	assert_eq!(err.code(), Some(ErrorCode::InvalidOperandNum));
}

#[test]
fn test_row_count_mismatch() {
	let err = eval(
		FunctionId::BitXor,
		vec![column(DataType::uint(1), &[1, 2]), column(DataType::uint(1), &[1, 2, 3])],
		2,
	)
	.unwrap_err();
	assert_eq!(err.code(), Some(ErrorCode::DataLengthNotMatch));
}

#[test]
fn test_out_of_range_value_is_user_error() {
	let err = eval(
		FunctionId::BitAnd,
		vec![column(DataType::uint(1), &[256]), column(DataType::uint(1), &[1])],
		1,
	)
	.unwrap_err();
	assert_eq!(err.code(), Some(ErrorCode::ValueOutOfRange));
	assert!(!err.is_fault());
}

#[test]
fn test_huge_exponent_is_out_of_range() {
	let started = Instant::now();
	let huge = Operand::new(vec![DataType::uint(8)], vec![vec![Raw::number(BigDecimal::new(1.into(), -1_000_000_000))]]);

	let err = eval(FunctionId::BitAnd, vec![huge.clone(), column(DataType::uint(8), &[1])], 1).unwrap_err();
	assert_eq!(err.code(), Some(ErrorCode::ValueOutOfRange));

	let err = eval(FunctionId::BitNot, vec![huge], 1).unwrap_err();
	assert_eq!(err.code(), Some(ErrorCode::ValueOutOfRange));

	assert!(started.elapsed() < Duration::from_secs(1));
}

#[test]
fn test_ragged_row_is_fault() {
	let short = Operand {
		is_immediate: false,
		meta: vec![DataType::uint(1), DataType::uint(1)],
		data: vec![vec![Raw::number(1)]],
	};
	let err = eval(FunctionId::BitNot, vec![short.clone()], 1).unwrap_err();
	assert!(err.is_fault());

	let err = eval(FunctionId::BitAnd, vec![short.clone(), short], 1).unwrap_err();
	assert!(err.is_fault());
}
