use crate::error::SequenceError;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Inclusive arithmetic progression of permissible post-response delays, ms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JitterSpec {
    pub min: u64,
    pub max: u64,
    pub step: u64,
}

/// The materialized delay table, built once at startup and immutable after.
#[derive(Debug, Clone, PartialEq)]
pub struct JitterTable {
    values: Vec<u64>,
}

impl JitterTable {
    /// Materializes `min, min+step, ..., <= max`. The upper bound is included
    /// only when the step grid reaches it exactly.
    pub fn build(spec: JitterSpec) -> Result<Self, SequenceError> {
        if spec.max < spec.min {
            return Err(SequenceError::JitterBounds {
                min: spec.min,
                max: spec.max,
            });
        }
        if spec.step == 0 {
            return Err(SequenceError::JitterStep);
        }

        let mut values = Vec::new();
        let mut v = spec.min;
        while v <= spec.max {
            values.push(v);
            v += spec.step;
        }
        Ok(Self { values })
    }

    pub fn values(&self) -> &[u64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Draws one delay using the original selection rule: the index is
    /// `floor(random * len / 10) * 10`, so only every tenth index is
    /// reachable. The quantization is kept as-is for compatibility with
    /// previously collected data.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> u64 {
        let sel = (rng.random::<f64>() * self.values.len() as f64 / 10.0).floor() as usize * 10;
        self.values[sel]
    }
}
