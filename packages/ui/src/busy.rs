//! Per-view request guard and the busy label that goes with it.

use std::future::Future;

use api::{CancelScope, Cancelled, Watchdog};
use dioxus::prelude::*;

use crate::{use_cancel_scope, use_config};

pub const TAKING_LONGER: &str = "Taking longer than usual. Please wait...";

/// Runs a view's requests under its [`CancelScope`] and the shared
/// [`Watchdog`], counting how many of them are currently past the threshold.
#[derive(Clone)]
pub struct Requests {
    scope: CancelScope,
    watchdog: Watchdog,
    slow_runs: Signal<usize>,
}

impl Requests {
    /// A read the view can drop: aborted as soon as the view goes away.
    pub async fn fetch<F: Future>(&self, future: F) -> Result<F::Output, Cancelled> {
        self.scope.run(self.watched(future)).await
    }

    /// A write the server may commit: always runs to the end so session
    /// updates inside `future` land. `Err(Cancelled)` means the view is gone
    /// and nothing should be written to it. Spawn these with `spawn_forever`.
    pub async fn run<F: Future>(&self, future: F) -> Result<F::Output, Cancelled> {
        self.scope.run_to_completion(self.watched(future)).await
    }

    async fn watched<F: Future>(&self, future: F) -> F::Output {
        let scope = self.scope.clone();
        let mut slow_runs = self.slow_runs;
        let mut mark = SlowMark::default();
        self.watchdog.watch(future, move |slow| {
            if scope.is_cancelled() {
                return;
            }
            let current = *slow_runs.peek();
            if let Some(count) = mark.apply(slow, current) {
                slow_runs.set(count);
            }
        })
        .await
    }

    pub fn is_slow(&self) -> bool {
        (self.slow_runs)() > 0
    }
}

/// Whether one run is currently counted among the slow ones.
#[derive(Debug, Default)]
struct SlowMark {
    counted: bool,
}

impl SlowMark {
    /// New slow-run count after this run reports `slow`, if it changed.
    fn apply(&mut self, slow: bool, count: usize) -> Option<usize> {
        match (self.counted, slow) {
            (false, true) => {
                self.counted = true;
                Some(count + 1)
            }
            (true, false) => {
                self.counted = false;
                Some(count.saturating_sub(1))
            }
            _ => None,
        }
    }
}

pub fn use_requests() -> Requests {
    let config = use_config();
    let scope = use_cancel_scope();
    let slow_runs = use_signal(|| 0);
    Requests {
        scope,
        watchdog: Watchdog::new(config.slow_request_threshold()),
        slow_runs,
    }
}

/// Button text for a submit control: `idle`, then `working` while busy, then
/// the extended-wait message once the watchdog flips.
#[component]
pub fn BusyLabel(busy: bool, slow: bool, idle: String, working: String) -> Element {
    let text = match (busy, slow) {
        (false, _) => idle,
        (true, false) => working,
        (true, true) => TAKING_LONGER.to_string(),
    };
    rsx! { "{text}" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slow_count_outlives_first_settled_run() {
        let mut count = 0;
        let mut first = SlowMark::default();
        let mut second = SlowMark::default();

        assert_eq!(first.apply(false, count), None);
        assert_eq!(second.apply(false, count), None);
        count = first.apply(true, count).unwrap();
        count = second.apply(true, count).unwrap();
        assert_eq!(count, 2);

        count = first.apply(false, count).unwrap();
        assert_eq!(count, 1);
        assert_eq!(first.apply(false, count), None);

        count = second.apply(false, count).unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_repeated_slow_reports_count_once() {
        let mut mark = SlowMark::default();
        assert_eq!(mark.apply(true, 3), Some(4));
        assert_eq!(mark.apply(true, 4), None);
    }
}
