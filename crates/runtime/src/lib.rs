// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 SQLVM Developers

//! Vectorized evaluation of the SQL VM's built-in functions.
//!
//! Every call takes an [`Instruction`] holding columnar [`Operand`]s and
//! produces a single output operand. Evaluators read chain state through the
//! [`Context`]; the only state they write is its randomness counter.

pub mod context;
pub mod error;
pub mod function;
pub mod gas;
pub mod guard;
pub mod hash;
pub mod operand;
pub mod value;

pub use context::{Address, ChainState, Context, ContextBuilder};
pub use error::{Error, ErrorCode, FunctionError, Result};
pub use function::{BLOCK_HASH_WINDOW, Evaluator, FunctionId, FunctionUnit, RandomnessCursor, dispatch};
pub use gas::GasCategory;
pub use hash::{HASH_LENGTH, Hash256, keccak256};
pub use operand::{Instruction, Operand};
pub use value::{Raw, Tuple};
