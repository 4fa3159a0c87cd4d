// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 SQLVM Developers

mod codec;

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// A single scalar value. Integer and fixed-point kinds hold a number, every
/// byte-like kind holds its bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Raw {
	Number(BigDecimal),
	Bytes(Vec<u8>),
}

impl Raw {
	pub fn number(value: impl Into<BigDecimal>) -> Self {
		Raw::Number(value.into())
	}

	pub fn bytes(value: impl Into<Vec<u8>>) -> Self {
		Raw::Bytes(value.into())
	}

	pub fn as_number(&self) -> Option<&BigDecimal> {
		match self {
			Raw::Number(value) => Some(value),
			Raw::Bytes(_) => None,
		}
	}

	pub fn as_bytes(&self) -> Option<&[u8]> {
		match self {
			Raw::Number(_) => None,
			Raw::Bytes(bytes) => Some(bytes),
		}
	}
}

/// One row; its length always equals the schema length of the owning
/// [`Operand`](crate::Operand).
pub type Tuple = Vec<Raw>;
