pub mod extent;
pub mod record_builder;

pub use extent::{calibrate_tolerance, is_within_tolerance, BoundingExtent, MAX_TOLERANCE_RADIUS};
pub use record_builder::{build_records, fetch_records};
