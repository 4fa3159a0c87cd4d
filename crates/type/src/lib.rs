// SPDX-License-Identifier: MIT
// Copyright (c) 2025 SQLVM Developers

//! Type descriptors and codecs shared by the SQL VM.
//!
//! A [`DataType`] is a compact 16-bit descriptor made of a major kind and a
//! minor size parameter. The [`decimal`] module converts numeric values to
//! and from their fixed-width big-endian encoding.

pub mod data_type;
pub mod decimal;
pub mod error;

pub use data_type::{ADDRESS_LENGTH, DataType, DataTypeMajor};
pub use decimal::{decimal_decode, decimal_encode, decimal_to_u64};
pub use error::{Diagnostic, Fault, IntoDiagnostic, TypeError};

pub type Result<T> = std::result::Result<T, TypeError>;
