// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 SQLVM Developers

//! Fixtures shared by the runtime's integration tests: an in-memory chain,
//! JSON case files and tracing setup.

pub mod chain;
pub mod fixture;
pub mod hex;
pub mod logging;

pub use chain::MemoryChain;
pub use fixture::{CallFixture, CaseFixture, ContextFixture, OperandFixture, parse_data_type};
pub use logging::init_tracing;
