pub mod config;
pub mod error;
pub mod interleave;
pub mod jitter;
pub mod pool;
pub mod response;
pub mod runner;
pub mod sequence;
pub mod session;
pub mod timeline;

pub use config::{ExperimentConfig, KeyBindings, TimingProfile};
pub use error::SequenceError;
pub use interleave::interleave;
pub use jitter::{JitterSpec, JitterTable};
pub use pool::{load_pool, load_pool_from_path};
pub use response::{ResponseEvaluator, ResponseOutcome, ResponseState, expected_key};
pub use runner::{KeyEvent, Present, ResultSink, SessionRunner};
pub use sequence::Sequencer;
pub use session::SessionState;
