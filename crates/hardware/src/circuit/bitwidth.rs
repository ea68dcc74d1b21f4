//! Bit-width matching.

use super::{Circuit, Signal};
use crate::common::width::check_width;
use crate::common::Result;

impl Circuit {
    /// Aligns two signals to the wider of their widths.
    ///
    /// The narrower signal is zero-extended through one new node; the wider
    /// one, or both when the widths are already equal, is returned as is.
    pub fn match_bitwidth(&mut self, a: Signal, b: Signal) -> Result<(Signal, Signal)> {
        let a = self.check(a)?;
        let b = self.check(b)?;
        let _ = check_width(a.width)?;
        let _ = check_width(b.width)?;
        let width = a.width.max(b.width);
        Ok((self.zero_extend(a, width)?, self.zero_extend(b, width)?))
    }

    /// Aligns any number of signals to the widest of them.
    pub fn match_bitwidths(&mut self, signals: &[Signal]) -> Result<Vec<Signal>> {
        for &signal in signals {
            let _ = check_width(self.check(signal)?.width)?;
        }
        let Some(width) = signals.iter().map(Signal::width).max() else {
            return Ok(Vec::new());
        };
        signals
            .iter()
            .map(|&signal| self.zero_extend(signal, width))
            .collect()
    }
}
