pub mod daterange;
pub mod metadata;
pub mod product;
pub mod record;
pub mod rule;

pub use daterange::DateRange;
pub use metadata::ProductMetadata;
pub use product::ProductKind;
pub use record::{FieldValue, ProductDataset, TimestampedRecord};
pub use rule::{ScreenRule, StatusScreen};
