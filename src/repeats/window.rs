use crate::repeats::subpattern::Period;

pub const MAX_UNIT: usize = 4;

/// The last `capacity` symbols of a stream, addressed by absolute position.
///
/// Slot `i % capacity` holds the symbol most recently written at any position
/// congruent to `i`, so every index is valid.
#[derive(Debug, Clone)]
pub struct CircularWindow {
    slots: [u8; MAX_UNIT],
    capacity: usize,
}

impl CircularWindow {
    pub fn new(period: Period) -> Self {
        Self {
            slots: [0; MAX_UNIT],
            capacity: period.len(),
        }
    }

    #[inline(always)]
    pub fn write(&mut self, position: usize, symbol: u8) {
        self.slots[position % self.capacity] = symbol;
    }

    #[inline(always)]
    pub fn read(&self, position: usize) -> u8 {
        self.slots[position % self.capacity]
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Slot order, not stream order.
    pub fn slots(&self) -> &[u8] {
        &self.slots[..self.capacity]
    }

    /// Copies the window into `out` starting at the slot for `position`.
    pub fn rotated_into<'b>(&self, position: usize, out: &'b mut [u8; MAX_UNIT]) -> &'b [u8] {
        for (j, slot) in out.iter_mut().take(self.capacity).enumerate() {
            *slot = self.read(position + j);
        }
        &out[..self.capacity]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_wrap_modulo_capacity() {
        let mut window = CircularWindow::new(Period::Three);
        for (p, &c) in b"ACGT".iter().enumerate() {
            window.write(p, c);
        }
        assert_eq!(window.slots(), b"TCG");
        assert_eq!(window.read(3), b'T');
        assert_eq!(window.read(1), b'C');
        assert_eq!(window.read(301), b'C');
    }

    #[test]
    fn read_lags_write_by_one_cycle() {
        let mut window = CircularWindow::new(Period::Two);
        window.write(10, b'G');
        window.write(11, b'A');
        assert_eq!(window.read(12), b'G');
        assert_eq!(window.read(13), b'A');
    }

    #[test]
    fn rotation_starts_at_requested_phase() {
        let mut window = CircularWindow::new(Period::Four);
        for (p, &c) in b"AACT".iter().enumerate() {
            window.write(p, c);
        }
        let mut buf = [0; MAX_UNIT];
        assert_eq!(window.rotated_into(0, &mut buf), b"AACT");
        assert_eq!(window.rotated_into(2, &mut buf), b"CTAA");
        assert_eq!(window.rotated_into(7, &mut buf), b"TAAC");
        assert_eq!(window.capacity(), 4);
    }
}
