//! Deterministic seeded sampling

use serde_json::{Map, Value};

use super::rng::{Seed, SeededRng};
use crate::error::{Error, Result};

/// Number of records returned when the caller gives no count
pub const DEFAULT_COUNT: usize = 2;

/// Validated arguments of a sampling call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleRequest {
    pub count: usize,
    pub seed: Option<Seed>,
}

impl Default for SampleRequest {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            seed: None,
        }
    }
}

impl SampleRequest {
    pub fn new(count: usize, seed: Option<Seed>) -> Self {
        Self { count, seed }
    }

    /// Build a request from untyped query arguments.
    ///
    /// `count` must be a non-negative integer and `seed` a string or an
    /// integer that fits in 32 bits. `null` counts as absent for both.
    pub fn from_args(args: &Map<String, Value>) -> Result<Self> {
        let count = match args.get("count") {
            None | Some(Value::Null) => DEFAULT_COUNT,
            Some(Value::Number(n)) => match n.as_i64() {
                Some(c) if c >= 0 => c as usize,
                Some(c) => {
                    return Err(Error::InvalidArgument(format!(
                        "count must not be negative, got {}",
                        c
                    )))
                }
                None => {
                    return Err(Error::InvalidArgument(format!(
                        "count must be an integer, got {}",
                        n
                    )))
                }
            },
            Some(other) => {
                return Err(Error::InvalidArgument(format!(
                    "count must be an integer, got {}",
                    other
                )))
            }
        };

        let seed = match args.get("seed") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(Seed::Text(s.clone())),
            Some(Value::Number(n)) => {
                let n = n
                    .as_i64()
                    .and_then(|v| i32::try_from(v).ok())
                    .ok_or_else(|| {
                        Error::InvalidArgument(format!(
                            "numeric seed must be a 32-bit integer, got {}",
                            n
                        ))
                    })?;
                Some(Seed::Number(n))
            }
            Some(other) => {
                return Err(Error::InvalidArgument(format!(
                    "seed must be a string or a number, got {}",
                    other
                )))
            }
        };

        Ok(Self { count, seed })
    }

    /// Run the request against a collection
    pub fn apply<T: Clone>(&self, collection: &[T]) -> Vec<T> {
        sample(collection, self.seed.as_ref(), self.count)
    }
}

/// Select `count` distinct records from `collection`.
///
/// The same seed, collection and count always give the same output. The
/// generator's first draw is taken and dropped before the stream is reset,
/// and the shuffle then consumes the stream from its start; changing that
/// would change every seeded result.
pub fn sample<T: Clone>(collection: &[T], seed: Option<&Seed>, count: usize) -> Vec<T> {
    let mut rng = SeededRng::new(seed);
    let _pivot = rng.next();
    rng.reset();

    let mut shuffled = collection.to_vec();
    shuffle(&mut shuffled, &mut rng);
    shuffled.truncate(count);
    shuffled
}

/// In-place Fisher–Yates driven by `rng`
pub fn shuffle<T>(items: &mut [T], rng: &mut SeededRng) {
    for i in (1..items.len()).rev() {
        let j = (rng.next() * (i + 1) as f64) as usize;
        items.swap(i, j);
    }
}
