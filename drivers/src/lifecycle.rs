/*++

Licensed under the Apache-2.0 license.

File Name:

    lifecycle.rs

Abstract:

    File contains API for reading the device life cycle state and the
    device identifier.

--*/

use crate::reg::lc_ctrl_regs::{LcCtrlRegisters, LC_CTRL_REGS};
use crate::reg::static_ref::StaticRef;
use lc_cfi_lib::{cfi_assert_eq, cfi_assert_eq_8_words, cfi_launder};
use tock_registers::interfaces::Readable;

/// Size of the device identifier in words.
pub const LC_DEVICE_ID_NUM_WORDS: usize = 8;

/// Canonical life cycle state.
///
/// This is a condensed version of the hardware life cycle where the
/// TEST_UNLOCKED_* states are mapped to `Test` and invalid states where
/// CPU execution is disabled are omitted.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LcState {
    /// Unlocked test state where debug functions are enabled.
    Test,

    /// Development state where limited debug functionality is available.
    Dev,

    /// Production state.
    Prod,

    /// Same as `Prod`, but transition into `Rma` is not possible from
    /// this state.
    ProdEnd,

    /// RMA failure-analysis state.
    Rma,

    /// The register value matched no codeword. Callers gating security
    /// decisions must treat this as fatal and halt, reporting
    /// `LcError::ROM_LIFECYCLE_STATE_UNRECOGNIZED` from `lc-error`;
    /// this driver never maps it to another state.
    Unrecognized,
}

// State codewords. The encoding is sparse by construction: minimum
// pairwise Hamming distance 13, Hamming weight 15..=20, so a few
// flipped bits can never turn one valid codeword into another.
//
// Encoding generated with
// $ ./util/design/sparse-fsm-encode.py -d 6 -m 5 -n 32 \
//     -s 2447090565 --language=c
pub const LC_STATE_TEST: u32 = 0xb286_5fbb;
pub const LC_STATE_DEV: u32 = 0x0b5a_75e0;
pub const LC_STATE_PROD: u32 = 0x65f2_520f;
pub const LC_STATE_PROD_END: u32 = 0x91b9_b68a;
pub const LC_STATE_RMA: u32 = 0xcf8c_faab;

/// Codeword table binding each codeword to its canonical state. Adding
/// or re-encoding a state is a single entry change here.
const LC_STATE_CODEWORDS: [(u32, LcState); 5] = [
    (LC_STATE_TEST, LcState::Test),
    (LC_STATE_DEV, LcState::Dev),
    (LC_STATE_PROD, LcState::Prod),
    (LC_STATE_PROD_END, LcState::ProdEnd),
    (LC_STATE_RMA, LcState::Rma),
];

impl LcState {
    /// The codeword bound to this state, `None` for `Unrecognized`.
    pub const fn codeword(self) -> Option<u32> {
        match self {
            LcState::Test => Some(LC_STATE_TEST),
            LcState::Dev => Some(LC_STATE_DEV),
            LcState::Prod => Some(LC_STATE_PROD),
            LcState::ProdEnd => Some(LC_STATE_PROD_END),
            LcState::Rma => Some(LC_STATE_RMA),
            LcState::Unrecognized => None,
        }
    }
}

/// Decode a raw life cycle state register value.
///
/// The raw value is compared for exact equality against every entry of
/// the codeword table on every call; a distance-based or early-exit
/// match would erode the sparse encoding. Anything other than exactly
/// one match decodes to `LcState::Unrecognized`.
pub fn decode_lc_state(raw: u32) -> LcState {
    let mut decoded = LcState::Unrecognized;
    let mut matches: u32 = 0;
    for &(codeword, state) in LC_STATE_CODEWORDS.iter() {
        // Laundering keeps the compiler from fusing the comparisons
        // into an early-exit lookup.
        if cfi_launder(raw) == codeword {
            decoded = state;
            matches += 1;
        }
    }
    if cfi_launder(matches) == 1 {
        decoded
    } else {
        LcState::Unrecognized
    }
}

/// 256-bit device identifier stored in the `HW_CFG` partition in OTP.
///
/// The content is opaque to this driver; word order is preserved
/// exactly as provisioned.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DeviceId(pub [u32; LC_DEVICE_ID_NUM_WORDS]);

impl DeviceId {
    /// The identifier as an ordered word array.
    pub fn words(&self) -> &[u32; LC_DEVICE_ID_NUM_WORDS] {
        &self.0
    }
}

/// Life Cycle Controller driver
///
/// Carries no state of its own; every accessor performs a fresh
/// hardware read so a cached value can never stand in for the register
/// content.
#[derive(Copy, Clone)]
pub struct Lifecycle {
    regs: StaticRef<LcCtrlRegisters>,
}

impl Lifecycle {
    /// Create a driver over the given register block.
    pub const fn new(regs: StaticRef<LcCtrlRegisters>) -> Self {
        Lifecycle { regs }
    }

    /// Driver bound to the life cycle controller at its SoC address.
    pub const fn hw() -> Self {
        Lifecycle::new(LC_CTRL_REGS)
    }

    /// Get the life cycle state.
    ///
    /// Reads the state register and decodes it against the codeword
    /// table. See [`LcState`] for the canonical states.
    pub fn state(&self) -> LcState {
        decode_lc_state(self.raw_state())
    }

    /// Get the life cycle state, decoded twice with an agreement check.
    ///
    /// Two independent register reads are decoded separately; the
    /// results must agree or the CFI panic path is taken. Intended for
    /// call sites that gate irreversible security decisions.
    pub fn state_redundant(&self) -> LcState {
        let first = decode_lc_state(self.raw_state());
        let second = decode_lc_state(cfi_launder(self.raw_state()));
        cfi_assert_eq(first, second);
        first
    }

    /// Get the unprocessed life cycle state value read from the
    /// hardware.
    pub fn raw_state(&self) -> u32 {
        self.regs.lc_state.get()
    }

    /// Get the device identifier.
    pub fn device_id(&self) -> DeviceId {
        let mut words = [0u32; LC_DEVICE_ID_NUM_WORDS];
        for (i, word) in words.iter_mut().enumerate() {
            *word = self.regs.device_id[i].get();
        }
        DeviceId(words)
    }

    /// Get the device identifier, read twice with an agreement check.
    ///
    /// Two independent reads of the identifier words must agree word
    /// for word or the CFI panic path is taken. Intended for call
    /// sites feeding the identifier into irreversible security
    /// decisions.
    pub fn device_id_redundant(&self) -> DeviceId {
        let first = self.device_id();
        let second = self.device_id();
        cfi_assert_eq_8_words(first.words(), second.words());
        first
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Lifecycle::hw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CODEWORDS: [u32; 5] = [
        LC_STATE_TEST,
        LC_STATE_DEV,
        LC_STATE_PROD,
        LC_STATE_PROD_END,
        LC_STATE_RMA,
    ];

    #[test]
    fn test_decode_codewords() {
        assert_eq!(decode_lc_state(LC_STATE_TEST), LcState::Test);
        assert_eq!(decode_lc_state(LC_STATE_DEV), LcState::Dev);
        assert_eq!(decode_lc_state(LC_STATE_PROD), LcState::Prod);
        assert_eq!(decode_lc_state(LC_STATE_PROD_END), LcState::ProdEnd);
        assert_eq!(decode_lc_state(LC_STATE_RMA), LcState::Rma);
    }

    #[test]
    fn test_decode_is_injective() {
        let mut states = Vec::new();
        for codeword in CODEWORDS {
            let state = decode_lc_state(codeword);
            assert_ne!(state, LcState::Unrecognized);
            assert!(!states.contains(&state), "{state:?} decoded twice");
            states.push(state);
        }
    }

    #[test]
    fn test_codeword_round_trip() {
        for codeword in CODEWORDS {
            assert_eq!(decode_lc_state(codeword).codeword(), Some(codeword));
        }
        assert_eq!(LcState::Unrecognized.codeword(), None);
    }

    #[test]
    fn test_min_pairwise_hamming_distance() {
        for (i, a) in CODEWORDS.iter().enumerate() {
            for b in CODEWORDS.iter().skip(i + 1) {
                let distance = (a ^ b).count_ones();
                assert!(
                    distance >= 13,
                    "distance({a:#010x}, {b:#010x}) = {distance}"
                );
            }
        }
    }

    #[test]
    fn test_hamming_weight_bounds() {
        for codeword in CODEWORDS {
            let weight = codeword.count_ones();
            assert!((15..=20).contains(&weight), "weight({codeword:#010x}) = {weight}");
        }
    }

    #[test]
    fn test_decode_boundary_values() {
        assert_eq!(decode_lc_state(0x0000_0000), LcState::Unrecognized);
        assert_eq!(decode_lc_state(0xffff_ffff), LcState::Unrecognized);
    }

    #[test]
    fn test_single_bit_flips_decode_to_unrecognized() {
        // Guaranteed by the distance-13 encoding; a flipped bit must
        // never land on another valid state.
        for codeword in CODEWORDS {
            for bit in 0..32 {
                let flipped = codeword ^ (1 << bit);
                assert_eq!(
                    decode_lc_state(flipped),
                    LcState::Unrecognized,
                    "flip of bit {bit} in {codeword:#010x}"
                );
            }
        }
    }

    #[test]
    fn test_decode_is_total_over_random_values() {
        // Deterministic xorshift sweep; decode must classify every
        // 32-bit input without panicking.
        let mut value = 0x2447_0905_u32;
        for _ in 0..100_000 {
            value ^= value << 13;
            value ^= value >> 17;
            value ^= value << 5;
            let state = decode_lc_state(value);
            if CODEWORDS.contains(&value) {
                assert_ne!(state, LcState::Unrecognized);
            } else {
                assert_eq!(state, LcState::Unrecognized);
            }
        }
    }

    #[test]
    fn test_device_id_words_accessor() {
        let id = DeviceId([1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(id.words(), &[1, 2, 3, 4, 5, 6, 7, 8]);
    }
}
