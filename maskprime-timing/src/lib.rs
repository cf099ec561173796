pub mod timer;

pub use timer::{PrecisionTimer, Timer};
