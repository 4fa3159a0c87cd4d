// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 SQLVM Developers

use std::fmt::Write;

pub fn encode(bytes: &[u8]) -> String {
	let mut result = String::with_capacity(bytes.len() * 2 + 2);
	result.push_str("0x");
	for byte in bytes {
		let _ = write!(result, "{:02x}", byte);
	}
	result
}

/// Decodes a hex string with an optional `0x` prefix.
pub fn decode(s: &str) -> Result<Vec<u8>, String> {
	let digits = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
	if digits.len() % 2 != 0 {
		return Err(format!("odd length hex string: {s}"));
	}

	(0..digits.len())
		.step_by(2)
		.map(|i| {
			digits.get(i..i + 2)
				.and_then(|pair| u8::from_str_radix(pair, 16).ok())
				.ok_or_else(|| format!("invalid hex string: {s}"))
		})
		.collect()
}

/// Decodes exactly `N` bytes.
pub fn decode_array<const N: usize>(s: &str) -> Result<[u8; N], String> {
	let bytes = decode(s)?;
	let len = bytes.len();
	bytes.try_into().map_err(|_| format!("expected {N} bytes, got {len}"))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_encode() {
		assert_eq!(encode(b"Hello"), "0x48656c6c6f");
		assert_eq!(encode(&[]), "0x");
	}

	#[test]
	fn test_decode() {
		assert_eq!(decode("48656c6c6f").unwrap(), b"Hello");
		assert_eq!(decode("0x48656C6C6F").unwrap(), b"Hello");
		assert_eq!(decode("0x").unwrap(), b"");
	}

	#[test]
	fn test_decode_invalid() {
		assert!(decode("xyz").is_err());
		assert!(decode("48656c6c6").is_err());
		assert!(decode("zz").is_err());
	}

	#[test]
	fn test_decode_array() {
		assert_eq!(decode_array::<2>("0x0102").unwrap(), [1, 2]);
		assert!(decode_array::<3>("0x0102").is_err());
	}
}
