//! Range math and segment planning.
//!
//! Splits a resource of known length into N contiguous byte ranges, one per
//! concurrent fetch, with the final range left open-ended so it absorbs the
//! division remainder.

mod range;

pub use range::{plan_segments, Segment};
