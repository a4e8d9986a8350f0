//! Incremental progress counter for long-running routines
//!
//! Purely observational: the counter never influences control flow.

use std::io::Write;

/// Counts processed sub-items against a known total on stderr.
pub struct Progress {
    done: usize,
    total: usize,
}

impl Progress {
    pub fn new(total: usize) -> Self {
        Self { done: 0, total }
    }

    /// Mark one sub-item processed (successfully or not).
    pub fn tick(&mut self) {
        self.done += 1;
        eprint!("\r  {}/{} pages", self.done, self.total);
        let _ = std::io::stderr().flush();
    }

    /// Terminate the counter line.
    pub fn finish(&self) {
        if self.done > 0 {
            eprintln!();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticks_accumulate() {
        let mut progress = Progress::new(3);
        progress.tick();
        progress.tick();
        assert_eq!(progress.done, 2);
        assert_eq!(progress.total, 3);
        progress.finish();
    }
}
