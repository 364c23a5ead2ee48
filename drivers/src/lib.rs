/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the life cycle driver library.

--*/

#![cfg_attr(not(test), no_std)]

pub mod reg;

mod lifecycle;

pub use lifecycle::{
    decode_lc_state, DeviceId, LcState, Lifecycle, LC_DEVICE_ID_NUM_WORDS, LC_STATE_DEV,
    LC_STATE_PROD, LC_STATE_PROD_END, LC_STATE_RMA, LC_STATE_TEST,
};
pub use reg::lc_ctrl_regs::{LcCtrlRegisters, LC_CTRL_REGS};
pub use reg::static_ref::StaticRef;
