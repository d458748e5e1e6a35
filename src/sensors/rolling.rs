//! Rolling average over the last ten temperature samples.
//!
//! Until the window has been filled once, the average divides by the
//! number of samples written so far.  From then on it always divides by
//! the full window length; slots are overwritten in place as the cursor
//! wraps, so there are never any empty (zero) slots in the sum.

use heapless::Vec;

/// Samples kept in the window.
pub const WINDOW_LEN: usize = 10;

#[derive(Debug, Clone, Default)]
pub struct RollingAverage {
    window: Vec<f64, WINDOW_LEN>,
    cursor: usize,
    total: u64,
    average: f64,
}

impl RollingAverage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value`, returning the updated average.
    pub fn record(&mut self, value: f64) -> f64 {
        if self.window.is_full() {
            self.window[self.cursor] = value;
        } else {
            self.window
                .push(value)
                .unwrap_or_else(|_| unreachable!("window checked not full"));
        }
        self.cursor = (self.cursor + 1) % WINDOW_LEN;
        self.total += 1;

        let sum: f64 = self.window.iter().sum();
        self.average = sum / self.window.len() as f64;
        self.average
    }

    /// Current average; 0.0 before the first sample.
    pub fn average(&self) -> f64 {
        self.average
    }

    /// Samples recorded since startup.  Independent of the window cursor.
    pub fn count(&self) -> u64 {
        self.total
    }

    /// True once the window has held ten samples.
    pub fn is_filled(&self) -> bool {
        self.window.is_full()
    }

    /// Slot the next sample will be written to.
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}
