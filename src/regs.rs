//! Register-map view of the filter control plane.
//!
//! The map mirrors the memory layout the bare-metal driver programs: one
//! control word, then the coefficient file at a fixed stride. All decode
//! is deliberately forgiving; nothing in this module can panic or fault.

use crate::stereo_fir::StereoFir;

/// Control word: run/clear lines.
pub const REG_CTRL: u32 = 0x00;

/// Control bit 0: enable the sample stream.
pub const CTRL_ENABLE: u32 = 1 << 0;

/// Control bit 1: level-held accumulator clear.
pub const CTRL_CLEAR: u32 = 1 << 1;

/// First coefficient register; tap `i` lives at `REG_COEFF_BASE + 4 * i`.
pub const REG_COEFF_BASE: u32 = 0x10;

/// Byte stride between coefficient registers.
pub const REG_COEFF_STRIDE: u32 = 4;

/// Coefficient slots decoded by the reference address map. The software
/// decode below follows the configured tap count instead, so builds with
/// more taps are fully addressable.
pub const COEFF_WINDOW_TAPS: usize = 256;

impl StereoFir {
    /// Decode a control-plane register write.
    ///
    /// Addresses outside the map and unaligned coefficient addresses are
    /// ignored. Only the low 16 bits of a coefficient write are
    /// significant. Writing the control word drives both lines at once, so
    /// a clear pulse is two writes: bit 1 set, then bit 1 clear.
    pub fn write_register(&mut self, addr: u32, value: u32) {
        if addr == REG_CTRL {
            self.set_enabled(value & CTRL_ENABLE != 0);
            self.set_clear(value & CTRL_CLEAR != 0);
            return;
        }
        if let Some(index) = decode_coeff_addr(addr, self.tap_count()) {
            self.set_coefficient(index, value as i16);
            return;
        }
        log::trace!("ignoring write to {:#06x}", addr);
    }

    /// Decode a control-plane register read.
    ///
    /// Unmapped addresses read zero; coefficients read back zero-extended.
    pub fn read_register(&self, addr: u32) -> u32 {
        if addr == REG_CTRL {
            let mut value = 0;
            if self.is_enabled() {
                value |= CTRL_ENABLE;
            }
            if self.control().clear {
                value |= CTRL_CLEAR;
            }
            return value;
        }
        match decode_coeff_addr(addr, self.tap_count()) {
            Some(index) => self.coefficient(index) as u16 as u32,
            None => 0,
        }
    }
}

fn decode_coeff_addr(addr: u32, taps: usize) -> Option<usize> {
    let offset = addr.checked_sub(REG_COEFF_BASE)?;
    if offset % REG_COEFF_STRIDE != 0 {
        return None;
    }
    let index = (offset / REG_COEFF_STRIDE) as usize;
    (index < taps).then_some(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_word_drives_both_lines() {
        let mut fir = StereoFir::new(4).unwrap();

        fir.write_register(REG_CTRL, CTRL_ENABLE | CTRL_CLEAR);
        assert!(fir.is_enabled());
        assert!(fir.control().clear);
        assert_eq!(fir.read_register(REG_CTRL), 0x3);

        // Held clear: the stream runs but only silence comes out.
        fir.write_register(REG_COEFF_BASE, 20000);
        assert_eq!(fir.step(32767, 32767), Some((0, 0)));

        fir.write_register(REG_CTRL, CTRL_ENABLE);
        assert_eq!(fir.read_register(REG_CTRL), 0x1);
        assert_eq!(fir.step(32767, 32767), Some((19999, 19999)));

        fir.write_register(REG_CTRL, 0);
        assert_eq!(fir.step(0, 0), None);
    }

    #[test]
    fn clear_pulse_erases_history() {
        let mut fir = StereoFir::new(2).unwrap();
        fir.write_register(REG_COEFF_BASE + 4, 16384);
        fir.write_register(REG_CTRL, CTRL_ENABLE);
        fir.step(100, -100);

        fir.write_register(REG_CTRL, CTRL_ENABLE | CTRL_CLEAR);
        fir.write_register(REG_CTRL, CTRL_ENABLE);

        assert_eq!(fir.step(0, 0), Some((0, 0)));
    }

    #[test]
    fn coefficient_registers_truncate_and_zero_extend() {
        let mut fir = StereoFir::new(4).unwrap();

        fir.write_register(REG_COEFF_BASE, 0x1234);
        fir.write_register(REG_COEFF_BASE + 4, 0xFFFF_8000);
        assert_eq!(fir.coefficient(0), 0x1234);
        assert_eq!(fir.coefficient(1), -32768);

        // Readback of a negative tap is zero-extended, not sign-extended.
        assert_eq!(fir.read_register(REG_COEFF_BASE + 4), 0x0000_8000);
    }

    #[test]
    fn unaligned_and_unmapped_accesses_are_ignored() {
        let mut fir = StereoFir::new(4).unwrap();
        fir.write_register(REG_COEFF_BASE, 111);

        fir.write_register(REG_COEFF_BASE + 2, 999);
        fir.write_register(0x08, 999);
        fir.write_register(REG_COEFF_BASE + 4 * 4, 999);

        assert_eq!(fir.coefficients(), &[111, 0, 0, 0]);
        assert_eq!(fir.read_register(0x08), 0);
        assert_eq!(fir.read_register(REG_COEFF_BASE + 2), 0);
        assert_eq!(fir.read_register(REG_COEFF_BASE + 4 * 4), 0);
    }

    #[test]
    fn decode_window_follows_tap_count() {
        let taps = COEFF_WINDOW_TAPS + 8;
        let mut fir = StereoFir::new(taps).unwrap();
        let last = REG_COEFF_BASE + 4 * (taps as u32 - 1);

        fir.write_register(last, 77);
        assert_eq!(fir.coefficient(taps - 1), 77);
        assert_eq!(fir.read_register(last), 77);
    }
}
