/// Randomness sources for template and fragment selection.

use rand::rngs::StdRng;
use rand::Rng;

/// A source of uniform choices.
///
/// The engine only ever asks for "an index below `n`", so anything that can
/// answer that question can drive generation. `n` is never zero.
pub trait PickSource {
    fn pick(&mut self, n: usize) -> usize;
}

impl PickSource for StdRng {
    fn pick(&mut self, n: usize) -> usize {
        self.gen_range(0..n)
    }
}

/// A scripted source that replays a fixed sequence of picks, cycling when
/// exhausted. Each scripted value is reduced modulo `n`.
#[derive(Debug, Clone)]
pub struct SequencePicks {
    script: Vec<usize>,
    cursor: usize,
}

impl SequencePicks {
    pub fn new(script: Vec<usize>) -> Self {
        Self { script, cursor: 0 }
    }

    /// Number of picks answered so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl PickSource for SequencePicks {
    fn pick(&mut self, n: usize) -> usize {
        if self.script.is_empty() {
            self.cursor += 1;
            return 0;
        }
        let value = self.script[self.cursor % self.script.len()];
        self.cursor += 1;
        value % n
    }
}
