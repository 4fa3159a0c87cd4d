// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 SQLVM Developers

use std::fmt::{self, Display, Formatter};

use sqlvm_type::{DataType, Diagnostic, Fault, IntoDiagnostic, TypeError};

/// Error codes surfaced to the host. Faults never map to one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
	InvalidOperandNum,
	InvalidDataType,
	IndexOutOfRange,
	DataLengthNotMatch,
	ValueOutOfRange,
	Evaluation,
}

impl Display for ErrorCode {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			ErrorCode::InvalidOperandNum => f.write_str("invalid operand count"),
			ErrorCode::InvalidDataType => f.write_str("invalid data type"),
			ErrorCode::IndexOutOfRange => f.write_str("index out of range"),
			ErrorCode::DataLengthNotMatch => f.write_str("data length not match"),
			ErrorCode::ValueOutOfRange => f.write_str("value out of range"),
			ErrorCode::Evaluation => f.write_str("evaluation error"),
		}
	}
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FunctionError {
	#[error("function {function} expects {expected} operands, got {actual}")]
	InvalidOperandNum {
		function: &'static str,
		expected: usize,
		actual: usize,
	},

	#[error("function {function} operand {operand} has invalid types {actual:?}")]
	InvalidDataType {
		function: &'static str,
		operand: usize,
		actual: Vec<DataType>,
	},

	#[error("function {function}: {reason}")]
	IndexOutOfRange {
		function: &'static str,
		reason: String,
	},

	#[error("function {function} operands have {expected} and {actual} rows")]
	DataLengthMismatch {
		function: &'static str,
		expected: usize,
		actual: usize,
	},

	#[error("function {function} evaluation failed: {reason}")]
	Evaluation {
		function: &'static str,
		reason: String,
	},
}

impl FunctionError {
	pub fn code(&self) -> ErrorCode {
		match self {
			FunctionError::InvalidOperandNum {
				..
			} => ErrorCode::InvalidOperandNum,
			FunctionError::InvalidDataType {
				..
			} => ErrorCode::InvalidDataType,
			FunctionError::IndexOutOfRange {
				..
			} => ErrorCode::IndexOutOfRange,
			FunctionError::DataLengthMismatch {
				..
			} => ErrorCode::DataLengthNotMatch,
			FunctionError::Evaluation {
				..
			} => ErrorCode::Evaluation,
		}
	}
}

impl IntoDiagnostic for FunctionError {
	fn into_diagnostic(self) -> Diagnostic {
		let message = self.to_string();
		match self {
			FunctionError::InvalidOperandNum {
				function,
				expected,
				..
			} => Diagnostic {
				code: "FUNCTION_001".to_string(),
				message,
				label: Some("wrong number of operands".to_string()),
				help: Some(format!("Provide exactly {} operands to function {}", expected, function)),
				notes: vec![],
			},
			FunctionError::InvalidDataType {
				..
			} => Diagnostic {
				code: "FUNCTION_002".to_string(),
				message,
				label: Some("invalid operand type".to_string()),
				help: None,
				notes: vec![
					"Bitwise operators accept INT, UINT and BYTES columns of identical types".to_string(),
					"Byte functions accept BYTES, ADDRESS and DYNAMIC BYTES columns".to_string(),
				],
			},
			FunctionError::IndexOutOfRange {
				..
			} => Diagnostic {
				code: "FUNCTION_003".to_string(),
				message,
				label: Some("index out of range".to_string()),
				help: Some("Use a single constant start and length within the value".to_string()),
				notes: vec![],
			},
			FunctionError::DataLengthMismatch {
				..
			} => Diagnostic {
				code: "FUNCTION_004".to_string(),
				message,
				label: Some("row count mismatch".to_string()),
				help: None,
				notes: vec![],
			},
			FunctionError::Evaluation {
				..
			} => Diagnostic {
				code: "FUNCTION_005".to_string(),
				message,
				label: Some("evaluation failed".to_string()),
				help: None,
				notes: vec![],
			},
		}
	}
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Function(#[from] FunctionError),

	#[error(transparent)]
	Type(#[from] TypeError),

	#[error("{0}")]
	Fault(#[from] Fault),
}

impl Error {
	/// The host-facing code, `None` for faults.
	pub fn code(&self) -> Option<ErrorCode> {
		match self {
			Error::Function(err) => Some(err.code()),
			Error::Type(TypeError::ValueOutOfRange {
				..
			}) => Some(ErrorCode::ValueOutOfRange),
			Error::Type(_) => Some(ErrorCode::Evaluation),
			Error::Fault(_) => None,
		}
	}

	pub fn is_fault(&self) -> bool {
		matches!(self, Error::Fault(_))
	}

	pub fn diagnostic(self) -> Diagnostic {
		match self {
			Error::Function(err) => err.into_diagnostic(),
			Error::Type(err) => err.into_diagnostic(),
			Error::Fault(fault) => fault.0,
		}
	}
}

pub type Result<T> = std::result::Result<T, Error>;
