// SPDX-License-Identifier: MIT
// Copyright (c) 2025 SQLVM Developers

mod diagnostic;
mod fault;

pub use diagnostic::{Diagnostic, IntoDiagnostic};
pub use fault::{Fault, internal_with_context};

use crate::data_type::DataType;

/// Errors raised by the decimal codec.
///
/// These are user-facing: they report a value that the declared type cannot
/// represent, never a broken invariant.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TypeError {
	#[error("value {value} is out of range for {data_type}")]
	ValueOutOfRange {
		data_type: DataType,
		value: String,
	},

	#[error("value {value} has more fractional digits than {data_type} allows")]
	NotInteger {
		data_type: DataType,
		value: String,
	},

	#[error("{data_type} expects {expected} bytes, got {actual}")]
	WidthMismatch {
		data_type: DataType,
		expected: usize,
		actual: usize,
	},

	#[error("{data_type} is not a numeric type")]
	NotNumeric {
		data_type: DataType,
	},

	#[error("value {value} cannot be represented as a 64-bit unsigned integer")]
	NotUint64 {
		value: String,
	},
}

impl IntoDiagnostic for TypeError {
	fn into_diagnostic(self) -> Diagnostic {
		let message = self.to_string();
		match self {
			TypeError::ValueOutOfRange {
				data_type,
				..
			} => Diagnostic {
				code: "TYPE_001".to_string(),
				message,
				label: Some("value out of range".to_string()),
				help: Some(format!("Use a value that fits into {}", data_type)),
				notes: vec![],
			},
			TypeError::NotInteger {
				data_type,
				..
			} => Diagnostic {
				code: "TYPE_002".to_string(),
				message,
				label: Some("too many fractional digits".to_string()),
				help: Some(format!("Round the value to the precision of {}", data_type)),
				notes: vec![],
			},
			TypeError::WidthMismatch {
				..
			} => Diagnostic {
				code: "TYPE_003".to_string(),
				message,
				label: Some("encoded width mismatch".to_string()),
				help: None,
				notes: vec![],
			},
			TypeError::NotNumeric {
				..
			} => Diagnostic {
				code: "TYPE_004".to_string(),
				message,
				label: Some("not a numeric type".to_string()),
				help: None,
				notes: vec!["Only INT, UINT, FIXED and UFIXED values go through the decimal codec".to_string()],
			},
			TypeError::NotUint64 {
				..
			} => Diagnostic {
				code: "TYPE_005".to_string(),
				message,
				label: Some("not a uint64".to_string()),
				help: Some("Provide a non-negative integer below 2^64".to_string()),
				notes: vec![],
			},
		}
	}
}
