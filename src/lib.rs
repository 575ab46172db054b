#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod coeff_bank;
pub mod control;
pub mod fir_core;
pub mod fixed;
pub mod regs;
pub mod shared;
pub mod stereo_fir;

/// Tap count of the reference build this crate models.
///
/// Any count from 1 upward works; this is the size the stock coefficient
/// sets are designed for.
pub const DEFAULT_TAP_COUNT: usize = 129;
