//! Single-channel transposed-form FIR engine.

use alloc::{vec, vec::Vec};
use core::mem;

use crate::fixed::Requantizer;

/// One channel of the filter: the accumulator chain of a transposed-form
/// FIR structure.
///
/// For `n` taps the core keeps `n - 1` wide partial sums. Each processed
/// sample is multiplied into every tap at once and the products are folded
/// into the chain, so the cost per sample is one multiply-accumulate per
/// tap regardless of history length, and the response to an input appears
/// in the same call that consumed it.
///
/// The product of two Q1.15 values fits in 31 bits, and the 64-bit slots
/// would need billions of taps to overflow, so chain arithmetic never
/// wraps for any supported configuration.
#[derive(Debug, Clone)]
pub struct FirCore {
    chain: Vec<i64>,
    scratch: Vec<i64>,
}

impl FirCore {
    /// Create a core for `tap_count` taps with a zeroed chain.
    pub fn new(tap_count: usize) -> Self {
        debug_assert!(tap_count >= 1);
        let slots = tap_count.saturating_sub(1);
        Self {
            chain: vec![0; slots],
            scratch: vec![0; slots],
        }
    }

    /// Number of taps this core was built for.
    #[inline]
    pub fn tap_count(&self) -> usize {
        self.chain.len() + 1
    }

    /// Process one sample and return the channel's response to it.
    ///
    /// `coeffs` must hold exactly [`tap_count`](Self::tap_count) weights.
    /// Tap 0 is applied to `input` in this same call, so the output already
    /// reflects the newest sample.
    #[inline]
    pub fn step(&mut self, input: i16, coeffs: &[i16], policy: &Requantizer) -> i16 {
        debug_assert_eq!(coeffs.len(), self.tap_count());

        let x = input as i64;
        let acc = self.chain.first().copied().unwrap_or(0) + x * coeffs[0] as i64;
        let out = policy.apply(acc) as i16;

        // New slot values read only the pre-update chain.
        let len = self.chain.len();
        for i in 0..len {
            let carry = if i + 1 < len { self.chain[i + 1] } else { 0 };
            self.scratch[i] = carry + x * coeffs[i + 1] as i64;
        }
        mem::swap(&mut self.chain, &mut self.scratch);

        out
    }

    /// Zero the accumulator chain, erasing all input history.
    pub fn clear(&mut self) {
        self.chain.fill(0);
    }
}
