// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 SQLVM Developers

use serde::{Deserialize, Serialize};
use sqlvm_type::{DataType, internal_error};

use crate::{
	FunctionError, Result,
	function::FunctionId,
	value::{Raw, Tuple},
};

/// A columnar batch: the schema (`meta`) and one [`Tuple`] per row.
///
/// An immediate operand holds a single row that stands for every row of the
/// batch it takes part in.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Operand {
	pub is_immediate: bool,
	pub meta: Vec<DataType>,
	pub data: Vec<Tuple>,
}

impl Operand {
	pub fn new(meta: Vec<DataType>, data: Vec<Tuple>) -> Self {
		debug_assert!(data.iter().all(|tuple| tuple.len() == meta.len()));
		Self {
			is_immediate: false,
			meta,
			data,
		}
	}

	pub fn immediate(meta: Vec<DataType>, tuple: Tuple) -> Self {
		debug_assert_eq!(tuple.len(), meta.len());
		Self {
			is_immediate: true,
			meta,
			data: vec![tuple],
		}
	}

	/// Materializes `length` rows, calling `row` once per row in order.
	pub fn from_fn<F>(meta: Vec<DataType>, length: usize, mut row: F) -> Result<Self>
	where
		F: FnMut(usize) -> Result<Tuple>,
	{
		let mut data = Vec::with_capacity(length);
		for i in 0..length {
			data.push(row(i)?);
		}
		Ok(Self::new(meta, data))
	}

	/// Replicates a single-column value into `length` rows. Every row owns a
	/// copy of the value.
	pub fn broadcast(data_type: DataType, value: &Raw, length: usize) -> Self {
		Self::new(vec![data_type], (0..length).map(|_| vec![value.clone()]).collect())
	}

	pub fn columns(&self) -> usize {
		self.meta.len()
	}

	pub fn rows(&self) -> usize {
		self.data.len()
	}

	/// Row `index` of the batch; immediates answer with their only row.
	pub fn row(&self, index: usize) -> &Tuple {
		if self.is_immediate {
			&self.data[0]
		} else {
			&self.data[index]
		}
	}

	/// Every row must carry one value per column of `meta`.
	pub fn check_width(&self) -> Result<()> {
		match self.data.iter().position(|tuple| tuple.len() != self.meta.len()) {
			None => Ok(()),
			Some(index) => Err(internal_error!(
				"row {} has {} values for {} columns",
				index,
				self.data[index].len(),
				self.meta.len()
			)
			.into()),
		}
	}

	/// Output row count for a call over `operands`.
	///
	/// Non-immediate operands must agree on their row count; when every
	/// operand is immediate the instruction's batch length is used. A row
	/// narrower or wider than its schema is a fault.
	pub fn batch_rows(function: FunctionId, operands: &[Operand], length: usize) -> Result<usize> {
		let mut rows = None;
		for operand in operands {
			operand.check_width()?;
			let expected = if operand.is_immediate {
				1
			} else {
				match rows {
					Some(rows) => rows,
					None => {
						rows = Some(operand.rows());
						continue;
					}
				}
			};
			if operand.rows() != expected {
				return Err(FunctionError::DataLengthMismatch {
					function: function.name(),
					expected,
					actual: operand.rows(),
				}
				.into());
			}
		}
		Ok(rows.unwrap_or(length))
	}
}

/// One call site of a built-in function.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
	pub function: FunctionId,
	pub input: Vec<Operand>,
	pub length: usize,
}

impl Instruction {
	pub fn new(function: FunctionId, input: Vec<Operand>, length: usize) -> Self {
		Self {
			function,
			input,
			length,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ErrorCode;

	fn column(values: &[u8]) -> Operand {
		Operand::new(vec![DataType::uint(1)], values.iter().map(|v| vec![Raw::number(*v)]).collect())
	}

	#[test]
	fn test_broadcast_copies_value() {
		let operand = Operand::broadcast(DataType::dynamic_bytes(), &Raw::bytes(b"abc".to_vec()), 3);
		assert_eq!(operand.rows(), 3);
		assert!(!operand.is_immediate);
		assert!(operand.data.iter().all(|row| row == &vec![Raw::bytes(b"abc".to_vec())]));

		let mut operand = operand;
		if let Raw::Bytes(bytes) = &mut operand.data[0][0] {
			bytes[0] = b'x';
		}
		assert_eq!(operand.data[1][0], Raw::bytes(b"abc".to_vec()));
	}

	#[test]
	fn test_broadcast_zero_rows() {
		let operand = Operand::broadcast(DataType::uint(1), &Raw::number(1), 0);
		assert_eq!(operand.rows(), 0);
		assert_eq!(operand.columns(), 1);
	}

	#[test]
	fn test_immediate_row() {
		let operand = Operand::immediate(vec![DataType::uint(1)], vec![Raw::number(7)]);
		assert_eq!(operand.row(0), operand.row(41));
	}

	#[test]
	fn test_from_fn_order() {
		let operand = Operand::from_fn(vec![DataType::uint(1)], 3, |i| Ok(vec![Raw::number(i as u8)])).unwrap();
		assert_eq!(operand, column(&[0, 1, 2]));
	}

	#[test]
	fn test_batch_rows() {
		let immediate = Operand::immediate(vec![DataType::uint(1)], vec![Raw::number(1)]);

		assert_eq!(Operand::batch_rows(FunctionId::BitAnd, &[], 5).unwrap(), 5);
		assert_eq!(Operand::batch_rows(FunctionId::BitAnd, &[immediate.clone()], 5).unwrap(), 5);
		assert_eq!(Operand::batch_rows(FunctionId::BitAnd, &[immediate.clone(), column(&[1, 2])], 5).unwrap(), 2);
		assert_eq!(Operand::batch_rows(FunctionId::BitAnd, &[column(&[1, 2]), column(&[3, 4])], 5).unwrap(), 2);
	}

	#[test]
	fn test_batch_rows_mismatch() {
		let err = Operand::batch_rows(FunctionId::BitAnd, &[column(&[1, 2]), column(&[3])], 2).unwrap_err();
		assert_eq!(err.code(), Some(ErrorCode::DataLengthNotMatch));

		let empty_immediate = Operand {
			is_immediate: true,
			meta: vec![DataType::uint(1)],
			data: vec![],
		};
		let err = Operand::batch_rows(FunctionId::BitNot, &[empty_immediate], 2).unwrap_err();
		assert_eq!(err.code(), Some(ErrorCode::DataLengthNotMatch));
	}

	#[test]
	fn test_batch_rows_ragged_row_is_fault() {
		let short = Operand {
			is_immediate: false,
			meta: vec![DataType::uint(8)],
			data: vec![vec![Raw::number(1)], vec![]],
		};
		let err = Operand::batch_rows(FunctionId::BlockHash, &[short], 2).unwrap_err();
		assert!(err.is_fault());
		assert_eq!(err.code(), None);

		let wide = Operand {
			is_immediate: true,
			meta: vec![DataType::uint(1)],
			data: vec![vec![Raw::number(1), Raw::number(2)]],
		};
		let err = Operand::batch_rows(FunctionId::BitNot, &[wide], 1).unwrap_err();
		assert!(err.is_fault());
	}
}
