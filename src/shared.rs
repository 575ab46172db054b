//! Cloneable handle for driving one filter from several threads.

use alloc::sync::Arc;

use spin::{Mutex, MutexGuard};

use crate::control::Error;
use crate::stereo_fir::StereoFir;

/// A [`StereoFir`] behind an `Arc<spin::Mutex<_>>`.
///
/// Clones are cheap and all refer to the same filter. Each operation takes
/// the lock for just that call, so a streaming thread and a control thread
/// can share one instance; every operation still sees a consistent filter.
/// A coefficient reload holds the lock across the whole disable, write,
/// restore sequence, so no tick anywhere can observe a half-written bank.
#[derive(Debug, Clone)]
pub struct SharedStereoFir {
    inner: Arc<Mutex<StereoFir>>,
}

impl SharedStereoFir {
    /// Create a shared filter with the reference Q1.15 output policy.
    pub fn new(tap_count: usize) -> Result<Self, Error> {
        Ok(StereoFir::new(tap_count)?.into())
    }

    /// Lock the filter for a multi-operation sequence.
    pub fn lock(&self) -> MutexGuard<'_, StereoFir> {
        self.inner.lock()
    }

    pub fn tap_count(&self) -> usize {
        self.inner.lock().tap_count()
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.lock().is_enabled()
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.inner.lock().set_enabled(enabled);
    }

    pub fn soft_reset(&self) {
        self.inner.lock().soft_reset();
    }

    pub fn load_coefficients(&self, coeffs: &[i16]) {
        self.inner.lock().load_coefficients(coeffs);
    }

    pub fn load_coefficients_f32(&self, coeffs: &[f32]) {
        self.inner.lock().load_coefficients_f32(coeffs);
    }

    pub fn set_coefficient(&self, index: usize, value: i16) {
        self.inner.lock().set_coefficient(index, value);
    }

    pub fn coefficient(&self, index: usize) -> i16 {
        self.inner.lock().coefficient(index)
    }

    pub fn step(&self, left: i16, right: i16) -> Option<(i16, i16)> {
        self.inner.lock().step(left, right)
    }

    pub fn step_word(&self, word: u32) -> Option<u32> {
        self.inner.lock().step_word(word)
    }

    pub fn process(&self, left: &mut [i16], right: &mut [i16]) -> usize {
        self.inner.lock().process(left, right)
    }

    pub fn write_register(&self, addr: u32, value: u32) {
        self.inner.lock().write_register(addr, value);
    }

    pub fn read_register(&self, addr: u32) -> u32 {
        self.inner.lock().read_register(addr)
    }
}

impl From<StereoFir> for SharedStereoFir {
    fn from(filter: StereoFir) -> Self {
        Self {
            inner: Arc::new(Mutex::new(filter)),
        }
    }
}
