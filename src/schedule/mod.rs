// Deadline classification core: date codec, bucket resolution, countdown
// labels and the display ordering. Every function here is pure and takes an
// explicit `today`; production callers pass `dates::local_today()`.
pub mod bucket;
pub mod countdown;
pub mod dates;

pub use bucket::{Bucket, resolve_bucket};
pub use countdown::{compare_for_display, countdown_label};

use chrono::NaiveDate;

/// Read-only view of any record that can appear in a dated list.
///
/// Implementations hand out canonical values only: a present deadline is
/// always a valid calendar date (the adapter drops unparseable strings
/// before a record gets here) and a missing creation timestamp reads as 0.
pub trait TemporalRecord {
    fn is_done(&self) -> bool;
    fn deadline(&self) -> Option<NaiveDate>;
    fn explicit_bucket(&self) -> Option<Bucket>;
    fn created_at_millis(&self) -> i64;
    fn title(&self) -> &str;
}
