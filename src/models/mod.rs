pub mod feature;
pub mod loaders;
pub mod quiz_record;

pub use feature::{FeatureSet, Geometry, RawFeature};
pub use loaders::load_hunt_config;
pub use quiz_record::{PhotoCredits, Position, QuizRecord, RecordId};
