use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use sasmod::engine::progress::{Progress, ProgressCallback};

const POINTS_TEMPLATE: &str =
    "{msg:<12} [{bar:40.cyan/blue}] {pos}/{len} q points ({per_sec}, eta {eta})";

/// Counts evaluated q points on a single bar drawn to stderr, so CSV written
/// to stdout is never interleaved with progress output.
#[derive(Clone)]
pub struct EvalProgress {
    bar: ProgressBar,
}

impl EvalProgress {
    pub fn stderr() -> Self {
        Self::with_target(ProgressDrawTarget::stderr())
    }

    /// Tracks the same state without drawing; used with `--quiet`.
    pub fn hidden() -> Self {
        Self::with_target(ProgressDrawTarget::hidden())
    }

    fn with_target(target: ProgressDrawTarget) -> Self {
        let style = ProgressStyle::with_template(POINTS_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-");
        let bar = ProgressBar::with_draw_target(Some(0), target).with_style(style);
        Self { bar }
    }

    pub fn callback(&self) -> ProgressCallback<'static> {
        let bar = self.bar.clone();
        Box::new(move |event| match event {
            Progress::PhaseStart { name } => bar.set_message(name),
            Progress::PhaseFinish => {}
            Progress::EvaluationStart { points } => {
                bar.set_length(points);
                bar.set_position(0);
                bar.reset_eta();
            }
            Progress::PointsEvaluated { count } => bar.inc(count),
            Progress::EvaluationFinish => bar.finish_with_message("✓ Evaluated"),
            Progress::Message(msg) => bar.println(format!("  {}", msg)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn bar_counts_points_of_one_evaluation() {
        let progress = EvalProgress::hidden();
        let callback = progress.callback();

        callback(Progress::PhaseStart { name: "Evaluation" });
        callback(Progress::EvaluationStart { points: 600 });
        callback(Progress::PointsEvaluated { count: 256 });
        assert_eq!(progress.bar.length(), Some(600));
        assert_eq!(progress.bar.position(), 256);
        assert_eq!(progress.bar.message(), "Evaluation");

        callback(Progress::PointsEvaluated { count: 256 });
        callback(Progress::PointsEvaluated { count: 88 });
        callback(Progress::EvaluationFinish);
        callback(Progress::PhaseFinish);

        assert_eq!(progress.bar.position(), 600);
        assert!(progress.bar.is_finished());
        assert_eq!(progress.bar.message(), "✓ Evaluated");
    }

    #[test]
    fn preparation_phase_only_relabels_the_bar() {
        let progress = EvalProgress::hidden();
        let callback = progress.callback();
        callback(Progress::PhaseStart { name: "Preparation" });
        callback(Progress::Message("Resolved legacy name".to_string()));
        callback(Progress::PhaseFinish);

        assert_eq!(progress.bar.message(), "Preparation");
        assert_eq!(progress.bar.position(), 0);
        assert!(!progress.bar.is_finished());
    }

    #[test]
    fn callback_can_run_on_a_worker_thread() {
        let progress = EvalProgress::hidden();
        let callback = progress.callback();

        thread::spawn(move || {
            callback(Progress::EvaluationStart { points: 3 });
            callback(Progress::PointsEvaluated { count: 3 });
        })
        .join()
        .unwrap();

        assert_eq!(progress.bar.position(), 3);
    }
}
