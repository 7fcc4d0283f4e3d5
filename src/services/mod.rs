// Service exports
pub mod candidates;
pub mod notify;
pub mod reporter;
pub mod surface;

pub use candidates::{CandidateSource, DemoCandidateSource, JsonFileSource, SourceError};
pub use notify::{NotificationSink, TracingNotifier};
pub use reporter::{ActionReporter, JsonLineReporter, ReporterError};
pub use surface::{RenderSurface, TracingSurface};
