pub mod constants;
pub mod coordinates;
pub mod dates;
pub mod progress;

pub use constants::*;
pub use coordinates::parse_dms;
pub use dates::resolve_observation_date;
pub use progress::ProgressReporter;
