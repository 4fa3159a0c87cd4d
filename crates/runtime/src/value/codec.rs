// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 SQLVM Developers

use sqlvm_type::{DataType, DataTypeMajor, decimal_decode, decimal_encode, internal_error};

use super::Raw;
use crate::Result;

fn is_byte_like(major: DataTypeMajor) -> bool {
	matches!(major, DataTypeMajor::FixedBytes | DataTypeMajor::Address | DataTypeMajor::DynamicBytes)
}

fn is_numeric(major: DataTypeMajor) -> bool {
	matches!(major, DataTypeMajor::Int | DataTypeMajor::Uint | DataTypeMajor::Fixed(_) | DataTypeMajor::Ufixed(_))
}

impl Raw {
	/// Canonical byte encoding of this value under `data_type`.
	pub fn encode(&self, data_type: DataType) -> Result<Vec<u8>> {
		let major = data_type.major();
		match self {
			Raw::Bytes(bytes) if is_byte_like(major) => Ok(bytes.clone()),
			Raw::Number(value) if is_numeric(major) => Ok(decimal_encode(data_type, value)?),
			_ if !is_byte_like(major) && !is_numeric(major) => {
				Err(internal_error!("unrecognized data type {:?}", data_type).into())
			}
			_ => Err(internal_error!("value {:?} does not belong to {}", self, data_type).into()),
		}
	}

	pub fn decode(bytes: &[u8], data_type: DataType) -> Result<Raw> {
		let major = data_type.major();
		if is_byte_like(major) {
			Ok(Raw::Bytes(bytes.to_vec()))
		} else if is_numeric(major) {
			Ok(Raw::Number(decimal_decode(data_type, bytes)?))
		} else {
			Err(internal_error!("unrecognized data type {:?}", data_type).into())
		}
	}
}

#[cfg(test)]
mod tests {
	use std::str::FromStr;

	use bigdecimal::BigDecimal;

	use super::*;
	use crate::ErrorCode;

	#[test]
	fn test_bytes_pass_through() {
		let raw = Raw::bytes(vec![1, 2, 3]);
		for dt in [DataType::fixed_bytes(3), DataType::address(), DataType::dynamic_bytes()] {
			let encoded = raw.encode(dt).unwrap();
			assert_eq!(encoded, vec![1, 2, 3]);
			assert_eq!(Raw::decode(&encoded, dt).unwrap(), raw);
		}
	}

	#[test]
	fn test_numbers_round_trip() {
		for (dt, value) in [
			(DataType::uint(1), "200"),
			(DataType::int(1), "-100"),
			(DataType::uint(32), "123456789012345678901234567890"),
			(DataType::compose(DataTypeMajor::Fixed(3), 3), "-12.345"),
		] {
			let raw = Raw::number(BigDecimal::from_str(value).unwrap());
			let encoded = raw.encode(dt).unwrap();
			assert_eq!(Raw::decode(&encoded, dt).unwrap(), raw);
		}
	}

	#[test]
	fn test_unrepresentable_number_is_user_error() {
		let err = Raw::number(300).encode(DataType::uint(1)).unwrap_err();
		assert!(!err.is_fault());
		assert_eq!(err.code(), Some(ErrorCode::ValueOutOfRange));
	}

	#[test]
	fn test_unknown_major_is_fault() {
		let unknown = DataType::from_raw(0x0800);
		assert!(Raw::number(1).encode(unknown).unwrap_err().is_fault());
		assert!(Raw::decode(&[1], unknown).unwrap_err().is_fault());

		let boolean = DataType::compose(DataTypeMajor::Bool, 0);
		assert!(Raw::decode(&[1], boolean).unwrap_err().is_fault());
	}

	#[test]
	fn test_mismatched_representation_is_fault() {
		assert!(Raw::bytes(vec![1]).encode(DataType::uint(1)).unwrap_err().is_fault());
		assert!(Raw::number(1).encode(DataType::dynamic_bytes()).unwrap_err().is_fault());
	}
}
