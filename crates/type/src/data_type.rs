// SPDX-License-Identifier: MIT
// Copyright (c) 2025 SQLVM Developers

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Byte length of an account address.
pub const ADDRESS_LENGTH: usize = 20;

const MAJOR_FIXED: u8 = 0x10;
const MAJOR_UFIXED: u8 = 0x30;
const MAJOR_UFIXED_END: u8 = 0x4f;

/// Major kind of a [`DataType`].
///
/// `Fixed` and `Ufixed` carry their width index: a width index `w` denotes a
/// `w + 1` byte representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataTypeMajor {
	Pending,
	Special,
	Bool,
	Address,
	Int,
	Uint,
	FixedBytes,
	DynamicBytes,
	Fixed(u8),
	Ufixed(u8),
	Unknown(u8),
}

impl From<u8> for DataTypeMajor {
	fn from(value: u8) -> Self {
		match value {
			0x00 => DataTypeMajor::Pending,
			0x01 => DataTypeMajor::Special,
			0x02 => DataTypeMajor::Bool,
			0x03 => DataTypeMajor::Address,
			0x04 => DataTypeMajor::Int,
			0x05 => DataTypeMajor::Uint,
			0x06 => DataTypeMajor::FixedBytes,
			0x07 => DataTypeMajor::DynamicBytes,
			MAJOR_FIXED..MAJOR_UFIXED => DataTypeMajor::Fixed(value - MAJOR_FIXED),
			MAJOR_UFIXED..=MAJOR_UFIXED_END => DataTypeMajor::Ufixed(value - MAJOR_UFIXED),
			other => DataTypeMajor::Unknown(other),
		}
	}
}

impl From<DataTypeMajor> for u8 {
	fn from(major: DataTypeMajor) -> Self {
		match major {
			DataTypeMajor::Pending => 0x00,
			DataTypeMajor::Special => 0x01,
			DataTypeMajor::Bool => 0x02,
			DataTypeMajor::Address => 0x03,
			DataTypeMajor::Int => 0x04,
			DataTypeMajor::Uint => 0x05,
			DataTypeMajor::FixedBytes => 0x06,
			DataTypeMajor::DynamicBytes => 0x07,
			DataTypeMajor::Fixed(width) => MAJOR_FIXED + (width & 0x1f),
			DataTypeMajor::Ufixed(width) => MAJOR_UFIXED + (width & 0x1f),
			DataTypeMajor::Unknown(value) => value,
		}
	}
}

impl Display for DataTypeMajor {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			DataTypeMajor::Pending => f.write_str("PENDING"),
			DataTypeMajor::Special => f.write_str("SPECIAL"),
			DataTypeMajor::Bool => f.write_str("BOOL"),
			DataTypeMajor::Address => f.write_str("ADDRESS"),
			DataTypeMajor::Int => f.write_str("INT"),
			DataTypeMajor::Uint => f.write_str("UINT"),
			DataTypeMajor::FixedBytes => f.write_str("BYTES"),
			DataTypeMajor::DynamicBytes => f.write_str("DYNAMIC BYTES"),
			DataTypeMajor::Fixed(width) => write!(f, "FIXED{}", (*width as u16 + 1) * 8),
			DataTypeMajor::Ufixed(width) => write!(f, "UFIXED{}", (*width as u16 + 1) * 8),
			DataTypeMajor::Unknown(value) => write!(f, "UNKNOWN(0x{:02x})", value),
		}
	}
}

/// A 16-bit type descriptor: the high byte is the major kind, the low byte
/// the minor size parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataType(u16);

impl DataType {
	pub const fn from_raw(raw: u16) -> Self {
		Self(raw)
	}

	pub const fn raw(self) -> u16 {
		self.0
	}

	pub fn compose(major: DataTypeMajor, minor: u8) -> Self {
		Self(((u8::from(major) as u16) << 8) | minor as u16)
	}

	pub fn decompose(self) -> (DataTypeMajor, u8) {
		(DataTypeMajor::from((self.0 >> 8) as u8), self.0 as u8)
	}

	pub fn major(self) -> DataTypeMajor {
		self.decompose().0
	}

	pub fn minor(self) -> u8 {
		self.decompose().1
	}

	pub fn uint(bytes: u8) -> Self {
		debug_assert!((1..=32).contains(&bytes));
		Self::compose(DataTypeMajor::Uint, bytes - 1)
	}

	pub fn int(bytes: u8) -> Self {
		debug_assert!((1..=32).contains(&bytes));
		Self::compose(DataTypeMajor::Int, bytes - 1)
	}

	pub fn fixed_bytes(bytes: u8) -> Self {
		debug_assert!((1..=32).contains(&bytes));
		Self::compose(DataTypeMajor::FixedBytes, bytes - 1)
	}

	pub fn address() -> Self {
		Self::compose(DataTypeMajor::Address, 0)
	}

	pub fn dynamic_bytes() -> Self {
		Self::compose(DataTypeMajor::DynamicBytes, 0)
	}

	/// Width in bytes of the canonical encoding, `None` for dynamically
	/// sized and non-value kinds.
	pub fn byte_width(self) -> Option<usize> {
		let (major, minor) = self.decompose();
		match major {
			DataTypeMajor::Int | DataTypeMajor::Uint | DataTypeMajor::FixedBytes => Some(minor as usize + 1),
			DataTypeMajor::Fixed(width) | DataTypeMajor::Ufixed(width) => Some(width as usize + 1),
			DataTypeMajor::Address => Some(ADDRESS_LENGTH),
			DataTypeMajor::Bool => Some(1),
			DataTypeMajor::DynamicBytes
			| DataTypeMajor::Pending
			| DataTypeMajor::Special
			| DataTypeMajor::Unknown(_) => None,
		}
	}
}

impl Display for DataType {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let (major, minor) = self.decompose();
		match major {
			DataTypeMajor::Int => write!(f, "INT{}", (minor as u16 + 1) * 8),
			DataTypeMajor::Uint => write!(f, "UINT{}", (minor as u16 + 1) * 8),
			DataTypeMajor::FixedBytes => write!(f, "BYTES{}", minor as u16 + 1),
			DataTypeMajor::Fixed(_) | DataTypeMajor::Ufixed(_) => write!(f, "{}X{}", major, minor),
			_ => write!(f, "{}", major),
		}
	}
}
