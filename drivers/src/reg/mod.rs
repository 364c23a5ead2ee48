/*++

Licensed under the Apache-2.0 license.

File Name:

    mod.rs

Abstract:

    File contains register definitions for the life cycle controller

--*/

pub mod static_ref;

pub mod lc_ctrl_regs;
