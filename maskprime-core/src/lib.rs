pub mod item;
pub mod screen;
pub mod stimulus;
pub mod trial;

pub use item::TrialItem;
pub use screen::ScreenKind;
pub use stimulus::{Stimulus, StimulusContent, TextStyle};
pub use trial::{Callback, KeySet, ResponseSpec, ResultFields, ResultRecord, TrialPlan, TrialStep};
