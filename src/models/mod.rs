// Model exports
pub mod domain;
pub mod events;

pub use domain::{ActionRecord, Candidate, Direction, Point, QuotaCounters, SwipeAction, Transform};
pub use events::{ActionReport, Severity};
