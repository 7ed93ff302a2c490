//! # Slow-request watchdog
//!
//! [`Watchdog::watch`] wraps any future and reports, through a callback, whether
//! it is taking longer than a threshold. The UI binds the callback to a flag
//! that swaps a busy label for "Taking longer than usual. Please wait...".
//!
//! Timeline of the callback for a single call:
//!
//! ```text
//! start ── on_slow(false)
//!   │
//!   ├─ settles before threshold ── on_slow(false)
//!   │
//!   └─ threshold elapses ── on_slow(true) ── settles ── on_slow(false)
//! ```
//!
//! The wrapped future is never cancelled or retried; the timer is dropped as
//! soon as the future settles so nothing fires afterwards. If the watch itself
//! is dropped mid-flight (the view went away) the callback is not called again.

use std::pin::pin;
use std::time::Duration;

use futures::future::{select, Either};

/// Advisory timer shared by every flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Watchdog {
    threshold: Duration,
}

impl Watchdog {
    pub fn new(threshold: Duration) -> Self {
        Self { threshold }
    }

    /// Await `future`, flipping `on_slow` while it outlives the threshold.
    pub async fn watch<F: std::future::Future>(
        &self,
        future: F,
        mut on_slow: impl FnMut(bool),
    ) -> F::Output {
        on_slow(false);

        let future = pin!(future);
        let timer = pin!(sleep(self.threshold));
        let output = match select(future, timer).await {
            Either::Left((output, _timer)) => output,
            Either::Right(((), future)) => {
                on_slow(true);
                future.await
            }
        };

        on_slow(false);
        output
    }
}

#[cfg(not(target_arch = "wasm32"))]
async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}

#[cfg(target_arch = "wasm32")]
async fn sleep(duration: Duration) {
    gloo_timers::future::sleep(duration).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[tokio::test(start_paused = true)]
    async fn test_fast_request_never_flags() {
        let log = RefCell::new(Vec::new());
        let watchdog = Watchdog::new(Duration::from_secs(5));

        let out = watchdog
            .watch(
                async {
                    tokio::time::sleep(Duration::from_secs(1)).await;
                    42
                },
                |slow| log.borrow_mut().push(slow),
            )
            .await;

        assert_eq!(out, 42);
        assert_eq!(*log.borrow(), vec![false, false]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_request_flags_then_resets() {
        let log = RefCell::new(Vec::new());
        let watchdog = Watchdog::new(Duration::from_secs(5));

        let out: Result<(), &str> = watchdog
            .watch(
                async {
                    tokio::time::sleep(Duration::from_secs(8)).await;
                    Err("boom")
                },
                |slow| log.borrow_mut().push(slow),
            )
            .await;

        assert_eq!(out, Err("boom"));
        assert_eq!(*log.borrow(), vec![false, true, false]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_flag_is_set_while_waiting() {
        let flag = RefCell::new(false);
        let watchdog = Watchdog::new(Duration::from_secs(5));

        let watched = watchdog.watch(
            tokio::time::sleep(Duration::from_secs(10)),
            |slow| *flag.borrow_mut() = slow,
        );
        let probe = async {
            tokio::time::sleep(Duration::from_secs(4)).await;
            let early = *flag.borrow();
            tokio::time::sleep(Duration::from_secs(2)).await;
            (early, *flag.borrow())
        };

        let ((), (at_4s, at_6s)) = tokio::join!(watched, probe);
        assert!(!at_4s);
        assert!(at_6s);
        assert!(!*flag.borrow());
    }
}
