/*++

Licensed under the Apache-2.0 license.

File Name:

    cfi.rs

Abstract:

    File contains CFI launder and assertion implementation.

References:
    https://github.com/lowRISC/opentitan/blob/7a61300cf7c409fa68fd892942c1d7b58a7cd4c0/sw/device/lib/base/hardened.h#L260

--*/

use lc_error::LcError;

use core::cfg;
use core::cmp::PartialEq;
use core::marker::Copy;

/// CFI Panic Information
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CfiPanicInfo {
    /// CFI Assert Equal failed
    AssertEqFail,

    /// CFI Assert Not Equal failed
    AssertNeFail,

    /// An enum match statement finds an unexpected value.
    UnexpectedMatchBranch,

    /// Unknown error
    UnknownError,
}

impl From<CfiPanicInfo> for LcError {
    /// Converts to this type from the input type.
    fn from(info: CfiPanicInfo) -> LcError {
        match info {
            CfiPanicInfo::AssertEqFail => LcError::ROM_CFI_PANIC_ASSERT_EQ_FAILURE,
            CfiPanicInfo::AssertNeFail => LcError::ROM_CFI_PANIC_ASSERT_NE_FAILURE,
            CfiPanicInfo::UnexpectedMatchBranch => {
                LcError::ROM_CFI_PANIC_UNEXPECTED_MATCH_BRANCH
            }
            _ => LcError::ROM_CFI_PANIC_UNKNOWN,
        }
    }
}

/// Launder the value to prevent compiler optimization
///
/// # Arguments
///
/// * `val` - Value to launder
///
/// # Returns
///
/// `T` - Same value
pub fn cfi_launder<T>(val: T) -> T {
    if cfg!(feature = "cfi") {
        // Note: The black box seems to be disabling more optimization
        // than necessary and results in larger binary size
        core::hint::black_box(val)
    } else {
        val
    }
}

/// Control flow integrity panic
///
/// This panic is raised when the control flow integrity error is detected
///
/// # Arguments
///
/// * `info` - Panic information
///
/// # Returns
///
/// `!` - Never returns
#[inline(never)]
pub fn cfi_panic(info: CfiPanicInfo) -> ! {
    // Prevent the compiler from optimizing the reason
    let _ = cfi_launder(info);

    #[cfg(feature = "cfi")]
    {
        #[cfg(feature = "cfi-test")]
        {
            panic!("CFI Panic = {:04x?}", info);
        }

        #[cfg(not(feature = "cfi-test"))]
        {
            extern "C" {
                fn cfi_panic_handler(code: u32) -> !;
            }
            unsafe {
                cfi_panic_handler(LcError::from(info).into());
            }
        }
    }

    #[cfg(not(feature = "cfi"))]
    {
        unimplemented!()
    }
}

macro_rules! cfi_assert_macro {
    ($name: ident, $op: tt, $trait1: path, $panic_info: ident) => {
        /// CFI Binary Condition Assertion
        ///
        /// # Arguments
        ///
        /// `a` - Left hand side
        /// `b` - Right hand side
        #[inline(always)]
        #[allow(unused)]
        pub fn $name<T>(lhs: T, rhs: T)
        where
            T: $trait1 + Copy,
        {
            if cfg!(feature = "cfi") {
                if !(lhs $op rhs) {
                    cfi_panic(CfiPanicInfo::$panic_info);
                }

                // Second check for glitch protection
                if !(cfi_launder(lhs) $op cfi_launder(rhs)) {
                    cfi_panic(CfiPanicInfo::$panic_info);
                }
            } else {
                lhs $op rhs;
            }
        }
    };
}

cfi_assert_macro!(cfi_assert_eq, ==, PartialEq, AssertEqFail);
cfi_assert_macro!(cfi_assert_ne, !=, PartialEq, AssertNeFail);

#[macro_export]
macro_rules! cfi_assert {
    ($cond: expr) => {
        cfi_assert_eq($cond, true)
    };
}

/// Comparison of 8 words
///
/// The whole-buffer compare is followed by per-word laundered asserts.
pub fn cfi_assert_eq_8_words(a: &[u32; 8], b: &[u32; 8]) {
    if a != b {
        cfi_panic(CfiPanicInfo::AssertEqFail)
    }
    for i in 0..8 {
        cfi_assert_eq(cfi_launder(a[i]), cfi_launder(b[i]));
    }
}
