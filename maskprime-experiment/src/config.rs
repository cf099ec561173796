use crate::error::SequenceError;
use crate::jitter::JitterSpec;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Named durations, in milliseconds, for each presentation phase of a trial.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingProfile {
    pub mask: u64,
    pub mask2: u64,
    pub prime: u64,
    pub mask3: u64,
    pub target: u64,
    pub feedback: u64,
}

impl Default for TimingProfile {
    fn default() -> Self {
        Self {
            mask: 200,
            mask2: 200,
            prime: 300,
            mask3: 500,
            target: 300,
            feedback: 500,
        }
    }
}

/// Response and continue key bindings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub same: char,
    pub different: char,
    #[serde(rename = "continue")]
    pub cont: char,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            same: '2',
            different: '1',
            cont: ' ',
        }
    }
}

/// Experiment configuration parameters. Fixed at process start; nothing here
/// mutates at run time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentConfig {
    pub total_blocks: usize,
    pub trials_per_block: usize,
    pub timings: TimingProfile,
    pub jitter: JitterSpec,
    pub keys: KeyBindings,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            total_blocks: 8,
            trials_per_block: 25,
            timings: TimingProfile::default(),
            jitter: JitterSpec {
                min: 300,
                max: 700,
                step: 10,
            },
            keys: KeyBindings::default(),
        }
    }
}

impl ExperimentConfig {
    /// Loads a configuration from a JSON reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SequenceError> {
        let config: Self = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects un-runnable experiment definitions before any trial is built.
    pub fn validate(&self) -> Result<(), SequenceError> {
        if self.trials_per_block == 0 {
            return Err(SequenceError::ChunkSize);
        }
        if self.jitter.max < self.jitter.min {
            return Err(SequenceError::JitterBounds {
                min: self.jitter.min,
                max: self.jitter.max,
            });
        }
        if self.jitter.step == 0 {
            return Err(SequenceError::JitterStep);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(ExperimentConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_trials_per_block_is_fatal() {
        let mut config = ExperimentConfig::default();
        config.trials_per_block = 0;
        assert!(matches!(
            config.validate(),
            Err(SequenceError::ChunkSize)
        ));
    }

    #[test]
    fn inverted_jitter_bounds_are_fatal() {
        let mut config = ExperimentConfig::default();
        config.jitter.min = 700;
        config.jitter.max = 300;
        assert!(matches!(
            config.validate(),
            Err(SequenceError::JitterBounds { min: 700, max: 300 })
        ));
    }

    #[test]
    fn loads_from_json() {
        let json = r#"{
            "total_blocks": 4,
            "trials_per_block": 10,
            "timings": {"mask": 100, "mask2": 100, "prime": 250, "mask3": 400, "target": 250, "feedback": 500},
            "jitter": {"min": 200, "max": 600, "step": 10},
            "keys": {"same": "2", "different": "1", "continue": " "}
        }"#;
        let config = ExperimentConfig::from_reader(json.as_bytes()).unwrap();
        assert_eq!(config.total_blocks, 4);
        assert_eq!(config.timings.prime, 250);
        assert_eq!(config.keys.same, '2');
    }
}
