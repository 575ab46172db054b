//! Shared coefficient bank for the filter channels.

use alloc::{vec, vec::Vec};

use crate::fixed::q15_from_f32;

/// One set of Q1.15 tap weights, shared by every channel of a filter.
///
/// The bank owns exactly `taps` slots, fixed at construction. Out-of-range
/// accesses never panic: writes are dropped and reads return zero, matching
/// the register file the bank models.
#[derive(Debug, Clone)]
pub struct CoeffBank {
    coeffs: Vec<i16>,
}

impl CoeffBank {
    /// Create a bank of `taps` zeroed coefficients.
    pub fn new(taps: usize) -> Self {
        Self {
            coeffs: vec![0; taps],
        }
    }

    /// Number of tap slots.
    #[inline]
    pub fn taps(&self) -> usize {
        self.coeffs.len()
    }

    /// Tap weight at `index`, or zero when out of range.
    #[inline]
    pub fn get(&self, index: usize) -> i16 {
        self.coeffs.get(index).copied().unwrap_or(0)
    }

    /// Set the tap weight at `index`. Out-of-range writes are dropped.
    #[inline]
    pub fn set(&mut self, index: usize, value: i16) {
        if let Some(slot) = self.coeffs.get_mut(index) {
            *slot = value;
        } else {
            log::debug!("dropping coefficient write out of range: {}", index);
        }
    }

    /// Replace the whole bank.
    ///
    /// Copies `min(coeffs.len(), taps)` values from the start of `coeffs`
    /// and zeroes the remaining slots, so a long source is truncated and a
    /// short one is zero-padded.
    pub fn load(&mut self, coeffs: &[i16]) {
        let n = coeffs.len().min(self.coeffs.len());
        self.coeffs[..n].copy_from_slice(&coeffs[..n]);
        self.coeffs[n..].fill(0);
    }

    /// Replace the whole bank from float weights, quantized to Q1.15.
    pub fn load_f32(&mut self, coeffs: &[f32]) {
        let n = coeffs.len().min(self.coeffs.len());
        for (slot, &c) in self.coeffs[..n].iter_mut().zip(coeffs) {
            *slot = q15_from_f32(c);
        }
        self.coeffs[n..].fill(0);
    }

    /// All tap weights, in index order.
    #[inline]
    pub fn as_slice(&self) -> &[i16] {
        &self.coeffs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_bank_is_zeroed() {
        let bank = CoeffBank::new(8);
        assert_eq!(bank.taps(), 8);
        assert!(bank.as_slice().iter().all(|&c| c == 0));
    }

    #[test]
    fn set_and_get() {
        let mut bank = CoeffBank::new(4);
        bank.set(0, 1000);
        bank.set(3, -2000);
        assert_eq!(bank.get(0), 1000);
        assert_eq!(bank.get(3), -2000);
        assert_eq!(bank.get(1), 0);
    }

    #[test]
    fn out_of_range_access_is_harmless() {
        let mut bank = CoeffBank::new(4);
        bank.set(4, 123);
        bank.set(usize::MAX, 123);
        assert_eq!(bank.get(4), 0);
        assert!(bank.as_slice().iter().all(|&c| c == 0));
    }

    #[test]
    fn load_truncates_long_source() {
        let mut bank = CoeffBank::new(3);
        bank.load(&[1, 2, 3, 4, 5]);
        assert_eq!(bank.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn load_zero_fills_short_source() {
        let mut bank = CoeffBank::new(7);
        bank.load(&[9; 7]);
        bank.load(&[1, 2, 3, 4, 5]);
        assert_eq!(bank.as_slice(), &[1, 2, 3, 4, 5, 0, 0]);
    }

    #[test]
    fn load_f32_quantizes() {
        let mut bank = CoeffBank::new(4);
        bank.load_f32(&[0.5, -0.25, 1.0]);
        assert_eq!(bank.as_slice(), &[16384, -8192, 32767, 0]);
    }
}
