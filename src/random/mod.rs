//! Seeded randomness: the generator and the sampler built on it

mod rng;
mod sampler;

pub use rng::{Seed, SeededRng};
pub use sampler::{sample, shuffle, SampleRequest, DEFAULT_COUNT};
