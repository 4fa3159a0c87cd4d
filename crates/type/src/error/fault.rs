// SPDX-License-Identifier: MIT
// Copyright (c) 2025 SQLVM Developers

use std::fmt::{self, Display, Formatter};

use super::Diagnostic;

/// An internal invariant was violated.
///
/// Faults are never the result of a well-typed input; they point at a defect
/// in an upstream guard and must abort the evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Fault(pub Diagnostic);

impl Fault {
	pub fn diagnostic(&self) -> &Diagnostic {
		&self.0
	}
}

impl Display for Fault {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		Display::fmt(&self.0, f)
	}
}

impl std::error::Error for Fault {}

/// Creates an internal error diagnostic with its source location
pub fn internal_with_context(
	reason: impl Into<String>,
	file: &str,
	line: u32,
	column: u32,
	function: &str,
	module_path: &str,
) -> Fault {
	let reason = reason.into();

	tracing::error!(file, line, function, "internal invariant violated: {}", reason);

	Fault(Diagnostic {
		code: "INTERNAL_ERROR".to_string(),
		message: format!("Internal error: {}", reason),
		label: Some(format!("Internal invariant violated at {}:{}:{}", file, line, column)),
		help: Some(
			"This is an internal error that should never occur in normal operation. Please report it."
				.to_string(),
		),
		notes: vec![format!("Error occurred in function: {}", function), format!("Module: {}", module_path)],
	})
}

/// Creates a [`Fault`] capturing the call site
#[macro_export]
macro_rules! internal_error {
    ($reason:expr) => {
        $crate::error::internal_with_context(
            $reason,
            file!(),
            line!(),
            column!(),
            {
                fn f() {}
                fn type_name_of<T>(_: T) -> &'static str {
                    std::any::type_name::<T>()
                }
                let name = type_name_of(f);
                &name[..name.len() - 3]
            },
            module_path!()
        )
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::internal_with_context(
            format!($fmt, $($arg)*),
            file!(),
            line!(),
            column!(),
            {
                fn f() {}
                fn type_name_of<T>(_: T) -> &'static str {
                    std::any::type_name::<T>()
                }
                let name = type_name_of(f);
                &name[..name.len() - 3]
            },
            module_path!()
        )
    };
}
