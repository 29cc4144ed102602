//! Random emoji generation.
mod table;

use rand::rngs::ThreadRng;
use rand::Rng;

pub use table::{contains, EMOJI_RANGES};

/// A capability that yields one emoji per call.
pub trait EmojiSource {
    fn next_emoji(&mut self) -> char;
}

/// Picks emoji uniformly from [`EMOJI_RANGES`].
#[derive(Debug, Clone)]
pub struct RandomEmojiSource<R> {
    rng: R,
    total: u32,
}

impl RandomEmojiSource<ThreadRng> {
    /// Backed by the thread-local CSPRNG.
    pub fn new() -> Self {
        Self::with_rng(rand::rng())
    }
}

impl Default for RandomEmojiSource<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomEmojiSource<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            total: table::total(),
        }
    }
}

impl<R: Rng> EmojiSource for RandomEmojiSource<R> {
    fn next_emoji(&mut self) -> char {
        let index = self.rng.random_range(0..self.total);
        table::nth(index)
    }
}

/// Concatenate `count` emoji drawn from `source`.
pub fn generate(source: &mut impl EmojiSource, count: usize) -> String {
    (0..count).map(|_| source.next_emoji()).collect()
}
