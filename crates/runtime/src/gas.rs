// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 SQLVM Developers

use std::fmt::{self, Display, Formatter};

/// Abstract cost class of a built-in function. The metering subsystem owns
/// the formula behind each category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GasCategory {
	MemAlloc,
	BitCmp,
	MemFree,
}

impl Display for GasCategory {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			GasCategory::MemAlloc => f.write_str("MEM_ALLOC"),
			GasCategory::BitCmp => f.write_str("BIT_CMP"),
			GasCategory::MemFree => f.write_str("MEM_FREE"),
		}
	}
}
