/// Events emitted while a workflow runs.
///
/// A phase brackets a named stage. During evaluation, `PointsEvaluated`
/// reports each finished block of q values; the counts sum to `points`.
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    EvaluationStart { points: u64 },
    PointsEvaluated { count: u64 },
    EvaluationFinish,

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }

    pub fn message(&self, text: impl Into<String>) {
        if self.callback.is_some() {
            self.report(Progress::Message(text.into()));
        }
    }

    /// Runs `f` between `PhaseStart` and `PhaseFinish`. The finish event is
    /// sent even when `f` returns an error.
    pub fn phase<T>(&self, name: &'static str, f: impl FnOnce() -> T) -> T {
        self.report(Progress::PhaseStart { name });
        let result = f();
        self.report(Progress::PhaseFinish);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn recording_reporter(events: &Mutex<Vec<Progress>>) -> ProgressReporter<'_> {
        ProgressReporter::with_callback(Box::new(move |event| {
            events.lock().unwrap().push(event);
        }))
    }

    #[test]
    fn reporter_without_callback_ignores_events() {
        let reporter = ProgressReporter::new();
        reporter.report(Progress::PointsEvaluated { count: 1 });
        reporter.message("ignored");
        assert_eq!(reporter.phase("Setup", || 7), 7);
    }

    #[test]
    fn phase_brackets_the_closure() {
        let events = Mutex::new(Vec::new());
        let reporter = recording_reporter(&events);
        let result: Result<(), &str> = reporter.phase("Evaluation", || {
            reporter.message("working");
            Err("failed")
        });
        drop(reporter);
        assert!(result.is_err());
        assert_eq!(
            events.into_inner().unwrap(),
            vec![
                Progress::PhaseStart { name: "Evaluation" },
                Progress::Message("working".to_string()),
                Progress::PhaseFinish,
            ]
        );
    }
}
