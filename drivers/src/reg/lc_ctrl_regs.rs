/*++

Licensed under the Apache-2.0 license.

File Name:

    lc_ctrl_regs.rs

Abstract:

    File contains register definitions for the Life Cycle Controller

--*/

use crate::reg::static_ref::StaticRef;
use tock_registers::registers::ReadOnly;
use tock_registers::{register_bitfields, register_structs};

register_structs! {
    /// Life Cycle Controller Registers
    ///
    /// Only the read-only portion of the block is mapped. The transition
    /// interface (claim, token, target and command registers) lives in the
    /// reserved spans; this driver never drives a state transition.
    pub LcCtrlRegisters {
        (0x000 => _reserved0),

        /// Status Register
        (0x004 => pub status: ReadOnly<u32, STATUS::Register>),

        (0x008 => _reserved1),

        /// Life Cycle State Register
        ///
        /// Holds one of the sparse 32-bit state codewords, or garbage if
        /// the device is in an invalid state.
        (0x038 => pub lc_state: ReadOnly<u32>),

        /// Life Cycle Transition Counter Register
        (0x03C => pub lc_transition_cnt: ReadOnly<u32>),

        /// Life Cycle Identity State Register
        (0x040 => pub lc_id_state: ReadOnly<u32>),

        (0x044 => _reserved2),

        /// Device Identifier
        ///
        /// Read-only window onto the 256-bit device identifier provisioned
        /// in the HW_CFG partition of OTP.
        (0x04C => pub device_id: [ReadOnly<u32>; 8]),

        (0x06C => @END),
    }
}

register_bitfields! [
    u32,

    /// Status Register Fields
    pub STATUS [
        INITIALIZED OFFSET(0) NUMBITS(1) [],
        READY OFFSET(1) NUMBITS(1) [],
        TRANSITION_SUCCESSFUL OFFSET(2) NUMBITS(1) [],
        TRANSITION_COUNT_ERROR OFFSET(3) NUMBITS(1) [],
        TRANSITION_ERROR OFFSET(4) NUMBITS(1) [],
        TOKEN_ERROR OFFSET(5) NUMBITS(1) [],
        OTP_ERROR OFFSET(6) NUMBITS(1) [],
        STATE_ERROR OFFSET(7) NUMBITS(1) [],
        BUS_INTEG_ERROR OFFSET(8) NUMBITS(1) [],
    ],
];

pub const LC_CTRL_REGS: StaticRef<LcCtrlRegisters> =
    unsafe { StaticRef::new(0x4014_0000 as *const LcCtrlRegisters) };
