use std::io::Write;

use thiserror::Error;

use crate::models::ActionReport;

/// Errors that can occur while forwarding a report to the host
#[derive(Debug, Error)]
pub enum ReporterError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outbound action reporter
///
/// Forwards committed actions to the host bot. Best-effort: the engine
/// catches and logs failures at the call site and never rolls back the
/// committed domain mutation.
pub trait ActionReporter {
    fn report(&mut self, report: &ActionReport) -> Result<(), ReporterError>;
}

/// Serializes reports as one JSON object per line into a writer
///
/// This is the `sendData` bridge of the mini app: the payload is handed to
/// the host as an opaque serialized record.
pub struct JsonLineReporter<W: Write> {
    sink: W,
}

impl<W: Write> JsonLineReporter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}

impl<W: Write> ActionReporter for JsonLineReporter<W> {
    fn report(&mut self, report: &ActionReport) -> Result<(), ReporterError> {
        serde_json::to_writer(&mut self.sink, report)?;
        self.sink.write_all(b"\n")?;
        self.sink.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SwipeAction;

    #[test]
    fn test_reports_are_newline_delimited_json() {
        let mut reporter = JsonLineReporter::new(Vec::new());
        reporter
            .report(&ActionReport::new(SwipeAction::Like, 1))
            .unwrap();
        reporter
            .report(&ActionReport::new(SwipeAction::Skip, 2))
            .unwrap();

        let out = String::from_utf8(reporter.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: ActionReport = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first.profile_id, 1);
        assert_eq!(first.action, SwipeAction::Like);
    }
}
