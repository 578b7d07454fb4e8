pub mod feature_client;

pub use feature_client::{ArcGisClient, FeatureService};
