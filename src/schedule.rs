//! Cancellable periodic task behind `backup auto --min <N>`.

use std::{future::Future, time::Duration};

use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;

/// Call `tick` right away and then once every `period` until `token` is
/// cancelled.  Returns the number of completed ticks.
///
/// The period is measured from one tick's start to the next, so a tick that
/// overruns delays the following one rather than triggering a catch-up burst.
/// Cancellation is observed between ticks, never in the middle of one.
///
/// # Panics
///
/// Panics if `period` is zero.
pub async fn run_periodic<F, Fut>(period: Duration, token: CancellationToken, mut tick: F) -> u64
where
    F: FnMut(u64) -> Fut,
    Fut: Future<Output = ()>,
{
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut runs = 0;
    loop {
        tokio::select! {
            biased;
            () = token.cancelled() => break,
            _ = ticker.tick() => {
                tick(runs).await;
                runs += 1;
            },
        }
    }
    tracing::debug!(runs, "periodic task stopped");
    runs
}
