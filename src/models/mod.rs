pub mod history;
pub mod iceberg;

pub use history::{DataFreshness, IcebergHistory};
pub use iceberg::IcebergRecord;
