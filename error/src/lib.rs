/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains API and macros used by the library for error handling

--*/
#![cfg_attr(not(any(test, feature = "std")), no_std)]
use core::convert::From;
use core::num::{NonZeroU32, TryFromIntError};

/// Life cycle driver error type
///
/// Error codes are never zero so they can be reported through registers
/// where zero means "no error".
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct LcError(pub NonZeroU32);

/// Macro to define error constants ensuring uniqueness
///
/// This macro takes a list of (name, value, doc) tuples and generates
/// constant definitions for each error code.
#[macro_export]
macro_rules! define_error_constants {
    ($(($name:ident, $value:expr, $doc:expr)),* $(,)?) => {
        $(
            #[doc = $doc]
            pub const $name: LcError = LcError::new_const($value);
        )*

        #[cfg(test)]
        /// Returns a vector of all defined error constants for testing uniqueness
        pub fn all_constants() -> Vec<(&'static str, u32)> {
            vec![
                $(
                    (stringify!($name), $value),
                )*
            ]
        }
    };
}

impl LcError {
    /// Create an error code; intended to only be used from const contexts, as
    /// we don't want runtime panics if val is zero. The preferred way to get an
    /// LcError from a u32 is `LcError::try_from()` from the `TryFrom` trait
    /// impl.
    const fn new_const(val: u32) -> Self {
        match NonZeroU32::new(val) {
            Some(val) => Self(val),
            None => panic!("LcError cannot be 0"),
        }
    }

    define_error_constants![
        (
            ROM_CFI_PANIC_ASSERT_EQ_FAILURE,
            0x01040001,
            "CFI assert-equal check failed"
        ),
        (
            ROM_CFI_PANIC_ASSERT_NE_FAILURE,
            0x01040002,
            "CFI assert-not-equal check failed"
        ),
        (
            ROM_CFI_PANIC_UNEXPECTED_MATCH_BRANCH,
            0x01040003,
            "An enum match statement found an unexpected value"
        ),
        (ROM_CFI_PANIC_UNKNOWN, 0x0104000F, "Unknown CFI failure"),
        (
            ROM_LIFECYCLE_STATE_UNRECOGNIZED,
            0x01050001,
            "Life cycle state register held no valid codeword; callers gating \
             security decisions are expected to halt with this code"
        ),
    ];
}

impl From<NonZeroU32> for LcError {
    fn from(val: NonZeroU32) -> Self {
        LcError(val)
    }
}

impl From<LcError> for NonZeroU32 {
    fn from(val: LcError) -> Self {
        val.0
    }
}

impl From<LcError> for u32 {
    fn from(val: LcError) -> Self {
        NonZeroU32::from(val).get()
    }
}

impl TryFrom<u32> for LcError {
    type Error = TryFromIntError;
    fn try_from(val: u32) -> Result<Self, TryFromIntError> {
        match NonZeroU32::try_from(val) {
            Ok(val) => Ok(LcError(val)),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_try_from() {
        assert!(LcError::try_from(0).is_err());
        assert_eq!(
            Ok(LcError::ROM_CFI_PANIC_ASSERT_EQ_FAILURE),
            LcError::try_from(0x01040001)
        );
    }

    #[test]
    fn test_error_constants_uniqueness() {
        let constants = LcError::all_constants();
        let mut error_values = HashSet::new();
        let mut duplicates = Vec::new();

        for (name, value) in constants {
            if !error_values.insert(value) {
                duplicates.push((name, value));
            }
        }

        assert!(
            duplicates.is_empty(),
            "Found duplicate error codes: {:?}",
            duplicates
        );
    }
}
