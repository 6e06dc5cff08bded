// Series normalizer: raw API records -> sorted series + domain
pub mod normalize;
pub mod record;

pub use normalize::{normalize, Domain, Series, SeriesRow, TimePoint};
pub use record::{records_from, RawRecord, Timestamp};
