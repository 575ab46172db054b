//! Lockstep stereo pairing of two FIR channels over one coefficient bank.

use crate::coeff_bank::CoeffBank;
use crate::control::{ControlState, Error};
use crate::fir_core::FirCore;
use crate::fixed::Requantizer;

/// Stereo FIR filter: two [`FirCore`] channels driven in lockstep.
///
/// Both channels read the same [`CoeffBank`] and the same output policy, so
/// they stay bit-identical mirrors of each other; only their sample streams
/// differ. A fresh instance is in its reset state: disabled, accumulators
/// zeroed, all coefficients zero.
///
/// All state lives behind `&mut self`, so no tick can ever interleave with
/// a control or coefficient operation. Wrap the filter in
/// [`SharedStereoFir`](crate::shared::SharedStereoFir) when the stream and
/// the control plane run on different threads.
#[derive(Debug, Clone)]
pub struct StereoFir {
    bank: CoeffBank,
    control: ControlState,
    policy: Requantizer,
    left: FirCore,
    right: FirCore,
}

impl StereoFir {
    /// Create a filter for `tap_count` taps with the reference Q1.15
    /// output policy.
    pub fn new(tap_count: usize) -> Result<Self, Error> {
        Self::with_policy(tap_count, Requantizer::q15())
    }

    /// Create a filter with an explicit output policy.
    pub fn with_policy(tap_count: usize, policy: Requantizer) -> Result<Self, Error> {
        if tap_count == 0 {
            return Err(Error::ZeroTaps);
        }
        Ok(Self {
            bank: CoeffBank::new(tap_count),
            control: ControlState::default(),
            policy,
            left: FirCore::new(tap_count),
            right: FirCore::new(tap_count),
        })
    }

    /// Number of taps per channel.
    #[inline]
    pub fn tap_count(&self) -> usize {
        self.bank.taps()
    }

    /// Current run/clear state.
    #[inline]
    pub fn control(&self) -> ControlState {
        self.control
    }

    /// Output policy both channels apply.
    #[inline]
    pub fn policy(&self) -> Requantizer {
        self.policy
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.control.enabled
    }

    /// Gate the sample stream on or off.
    ///
    /// Disabling freezes the accumulator chains in place; re-enabling
    /// resumes from the exact same state.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.control.enabled != enabled {
            log::debug!("stream {}", if enabled { "enabled" } else { "disabled" });
        }
        self.control.enabled = enabled;
    }

    /// Drive the level-held clear line.
    ///
    /// Asserting it zeroes both accumulator chains immediately; while it
    /// stays asserted every tick emits silence and discards its input.
    pub fn set_clear(&mut self, clear: bool) {
        if clear && !self.control.clear {
            self.left.clear();
            self.right.clear();
            log::debug!("accumulator clear asserted");
        }
        self.control.clear = clear;
    }

    /// Pulse the clear line: erase all input history, leaving the run
    /// state and the coefficients untouched.
    pub fn soft_reset(&mut self) {
        self.set_clear(true);
        self.set_clear(false);
    }

    /// Replace the whole coefficient set.
    ///
    /// The stream is held disabled for the duration of the write and the
    /// previous run state restored afterwards, so no tick can see a
    /// half-written bank. Extra source values are truncated, missing ones
    /// zero-filled.
    pub fn load_coefficients(&mut self, coeffs: &[i16]) {
        let was_enabled = self.control.enabled;
        self.control.enabled = false;
        self.bank.load(coeffs);
        self.control.enabled = was_enabled;
        log::debug!(
            "loaded {} of {} coefficients",
            coeffs.len().min(self.bank.taps()),
            self.bank.taps()
        );
    }

    /// Replace the whole coefficient set from float weights.
    pub fn load_coefficients_f32(&mut self, coeffs: &[f32]) {
        let was_enabled = self.control.enabled;
        self.control.enabled = false;
        self.bank.load_f32(coeffs);
        self.control.enabled = was_enabled;
    }

    /// Set a single tap weight. Out-of-range writes are dropped.
    pub fn set_coefficient(&mut self, index: usize, value: i16) {
        self.bank.set(index, value);
    }

    /// Tap weight at `index`, or zero when out of range.
    #[inline]
    pub fn coefficient(&self, index: usize) -> i16 {
        self.bank.get(index)
    }

    /// All tap weights, in index order.
    #[inline]
    pub fn coefficients(&self) -> &[i16] {
        self.bank.as_slice()
    }

    #[inline]
    fn tick(&mut self, left: i16, right: i16) -> (i16, i16) {
        if self.control.clear {
            return (0, 0);
        }
        let coeffs = self.bank.as_slice();
        (
            self.left.step(left, coeffs, &self.policy),
            self.right.step(right, coeffs, &self.policy),
        )
    }

    /// Process one stereo sample pair.
    ///
    /// Returns `None` while the stream is disabled; the inputs are not
    /// consumed and the filter state does not advance. The returned pair
    /// already reflects the new inputs.
    #[inline]
    pub fn step(&mut self, left: i16, right: i16) -> Option<(i16, i16)> {
        if !self.control.enabled {
            return None;
        }
        Some(self.tick(left, right))
    }

    /// Process one packed stereo word: left sample in the upper 16 bits,
    /// right in the lower, both signed Q1.15.
    #[inline]
    pub fn step_word(&mut self, word: u32) -> Option<u32> {
        let left = (word >> 16) as i16;
        let right = word as i16;
        self.step(left, right)
            .map(|(l, r)| ((l as u16 as u32) << 16) | r as u16 as u32)
    }

    /// Filter two channel buffers in place, lockstep.
    ///
    /// Processes `min(left.len(), right.len())` sample pairs and returns
    /// that count, or 0 with the buffers untouched while disabled.
    pub fn process(&mut self, left: &mut [i16], right: &mut [i16]) -> usize {
        if !self.control.enabled {
            return 0;
        }
        let n = left.len().min(right.len());
        for i in 0..n {
            let (l, r) = self.tick(left[i], right[i]);
            left[i] = l;
            right[i] = r;
        }
        n
    }
}
