// SPDX-License-Identifier: MIT
// Copyright (c) 2025 SQLVM Developers

//! Fixed-width codec for numeric values.
//!
//! Integers and fixed-point numbers are stored big-endian in exactly the
//! number of bytes their [`DataType`] declares; signed kinds use two's
//! complement. Fixed-point values are scaled by `10^minor` before encoding.

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, Sign};
use num_traits::{Signed, Zero};

use crate::{
	Result,
	data_type::{DataType, DataTypeMajor},
	error::TypeError,
};

struct NumericLayout {
	signed: bool,
	width: usize,
	scale: u8,
}

fn layout(data_type: DataType) -> Result<NumericLayout> {
	let (major, minor) = data_type.decompose();
	let (signed, width, scale) = match major {
		DataTypeMajor::Int => (true, minor as usize + 1, 0),
		DataTypeMajor::Uint => (false, minor as usize + 1, 0),
		DataTypeMajor::Fixed(width) => (true, width as usize + 1, minor),
		DataTypeMajor::Ufixed(width) => (false, width as usize + 1, minor),
		_ => {
			return Err(TypeError::NotNumeric {
				data_type,
			});
		}
	};
	Ok(NumericLayout {
		signed,
		width,
		scale,
	})
}

/// Decimal digits needed for any integer of `width` bytes.
const fn max_digits(width: usize) -> u64 {
	(width as u64 * 8 * 30103) / 100_000 + 1
}

/// Decimal digits of `u64::MAX`.
const U64_DIGITS: u64 = 20;

enum Scaling {
	Fractional,
	TooLarge,
}

/// Returns `value * 10^scale` as an integer.
///
/// Both bounds are checked before any power of ten is built, so the work is
/// proportional to the stored mantissa and never to the exponent.
fn scaled_integer(value: &BigDecimal, scale: u8, max_digits: u64) -> std::result::Result<BigInt, Scaling> {
	let (mantissa, exponent) = value.as_bigint_and_exponent();
	if mantissa.is_zero() {
		return Ok(mantissa);
	}

	let shift = i128::from(scale) - i128::from(exponent);
	if shift >= 0 {
		// a non-zero mantissa times 10^shift has more than `shift` digits
		if shift >= i128::from(max_digits) {
			return Err(Scaling::TooLarge);
		}
		Ok(mantissa * BigInt::from(10u8).pow(shift as u32))
	} else {
		// |mantissa| < 2^bits <= 10^bits, so a larger divisor leaves a remainder
		let shift = shift.unsigned_abs();
		if shift > u128::from(mantissa.bits()) {
			return Err(Scaling::Fractional);
		}
		let divisor = BigInt::from(10u8).pow(u32::try_from(shift).map_err(|_| Scaling::Fractional)?);
		if (&mantissa % &divisor).is_zero() {
			Ok(mantissa / divisor)
		} else {
			Err(Scaling::Fractional)
		}
	}
}

fn integer_to_bytes(value: &BigInt, width: usize, signed: bool) -> Option<Vec<u8>> {
	let (bytes, fill) = if signed {
		let fill = if value.is_negative() {
			0xff
		} else {
			0x00
		};
		(value.to_signed_bytes_be(), fill)
	} else {
		if value.is_negative() {
			return None;
		}
		(value.to_bytes_be().1, 0x00)
	};

	if bytes.len() > width {
		return None;
	}

	let mut result = vec![fill; width - bytes.len()];
	result.extend_from_slice(&bytes);
	Some(result)
}

pub fn decimal_encode(data_type: DataType, value: &BigDecimal) -> Result<Vec<u8>> {
	let layout = layout(data_type)?;

	let integer = scaled_integer(value, layout.scale, max_digits(layout.width)).map_err(|scaling| match scaling {
		Scaling::Fractional => TypeError::NotInteger {
			data_type,
			value: value.to_string(),
		},
		Scaling::TooLarge => TypeError::ValueOutOfRange {
			data_type,
			value: value.to_string(),
		},
	})?;

	integer_to_bytes(&integer, layout.width, layout.signed).ok_or_else(|| TypeError::ValueOutOfRange {
		data_type,
		value: value.to_string(),
	})
}

pub fn decimal_decode(data_type: DataType, bytes: &[u8]) -> Result<BigDecimal> {
	let layout = layout(data_type)?;

	if bytes.len() != layout.width {
		return Err(TypeError::WidthMismatch {
			data_type,
			expected: layout.width,
			actual: bytes.len(),
		});
	}

	let integer = if layout.signed {
		BigInt::from_signed_bytes_be(bytes)
	} else {
		BigInt::from_bytes_be(Sign::Plus, bytes)
	};

	Ok(BigDecimal::new(integer, layout.scale as i64))
}

pub fn decimal_to_u64(value: &BigDecimal) -> Result<u64> {
	scaled_integer(value, 0, U64_DIGITS).ok().and_then(|integer| u64::try_from(&integer).ok()).ok_or_else(|| {
		TypeError::NotUint64 {
			value: value.to_string(),
		}
	})
}
