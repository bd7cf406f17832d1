//! Retry driver shared by the extraction and auto-fill flows.
//!
//! The driver owns all of its state (attempt counter, interval, cooldown,
//! observation deadline) and walks `idle -> polling -> (filled |
//! exhausted)`. Scheduled attempts fire on a fixed interval; out-of-band
//! nudges model page-change callbacks and may schedule one extra attempt,
//! subject to a cooldown that manual nudges bypass. Nudges stop being
//! observed after a fixed absolute timeout regardless of state.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

/// One unit of work the driver retries. Implementations catch and log
/// their own errors; `false` simply means "nothing usable yet".
#[async_trait]
pub trait Probe {
    async fn attempt(&mut self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Polling,
    Filled,
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nudge {
    /// A page change that looked relevant. Honored at most once per
    /// cooldown window.
    Mutation,
    /// An explicit user request. Bypasses the cooldown.
    Manual,
}

#[derive(Debug, Clone)]
pub struct DriverConfig {
    pub max_attempts: u32,
    pub poll_interval: Duration,
    pub nudge_cooldown: Duration,
    pub observe_timeout: Duration,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            poll_interval: Duration::from_millis(500),
            nudge_cooldown: Duration::from_secs(2),
            observe_timeout: Duration::from_secs(30),
        }
    }
}

/// Handle for feeding out-of-band nudges into a running driver.
/// Sends are fire-and-forget; a torn-down driver just drops them.
#[derive(Debug, Clone)]
pub struct Nudger {
    tx: mpsc::UnboundedSender<Nudge>,
}

impl Nudger {
    pub fn nudge(&self, n: Nudge) {
        let _ = self.tx.send(n);
    }
}

pub struct RetryDriver<P> {
    probe: P,
    cfg: DriverConfig,
    state: DriverState,
    attempts: u32,
    nudge_tx: mpsc::UnboundedSender<Nudge>,
    nudge_rx: mpsc::UnboundedReceiver<Nudge>,
}

impl<P: Probe> RetryDriver<P> {
    pub fn new(probe: P, cfg: DriverConfig) -> Self {
        let (nudge_tx, nudge_rx) = mpsc::unbounded_channel();
        Self {
            probe,
            cfg,
            state: DriverState::Idle,
            attempts: 0,
            nudge_tx,
            nudge_rx,
        }
    }

    pub fn nudger(&self) -> Nudger {
        Nudger {
            tx: self.nudge_tx.clone(),
        }
    }

    pub fn probe_mut(&mut self) -> &mut P {
        &mut self.probe
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn is_exhausted(&self) -> bool {
        self.state == DriverState::Exhausted
    }

    /// Run until the probe succeeds or the attempt budget is gone.
    /// Invocations are strictly sequential; nothing here blocks the
    /// executor between them.
    pub async fn run(&mut self) -> DriverState {
        self.state = DriverState::Polling;

        let mut interval = tokio::time::interval(self.cfg.poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let observe_deadline = tokio::time::sleep(self.cfg.observe_timeout);
        tokio::pin!(observe_deadline);
        let mut observing = true;

        // Last *scheduled or mutation-driven* invocation; manual nudges
        // do not consult it.
        let mut last_invocation: Option<tokio::time::Instant> = None;

        while self.state == DriverState::Polling {
            tokio::select! {
                _ = interval.tick() => {
                    last_invocation = Some(tokio::time::Instant::now());
                    self.invoke().await;
                }
                nudge = self.nudge_rx.recv(), if observing => {
                    match nudge {
                        Some(Nudge::Manual) => self.invoke().await,
                        Some(Nudge::Mutation) => {
                            let cooled_down = last_invocation
                                .map(|at| at.elapsed() >= self.cfg.nudge_cooldown)
                                .unwrap_or(true);
                            if cooled_down {
                                last_invocation = Some(tokio::time::Instant::now());
                                self.invoke().await;
                            } else {
                                log::debug!("nudge ignored: cooldown active");
                            }
                        }
                        None => observing = false,
                    }
                }
                _ = &mut observe_deadline, if observing => {
                    log::debug!("observation window closed after {:?}", self.cfg.observe_timeout);
                    observing = false;
                }
            }
        }
        self.state
    }

    async fn invoke(&mut self) {
        self.attempts += 1;
        log::debug!("attempt {}/{}", self.attempts, self.cfg.max_attempts);

        if self.probe.attempt().await {
            self.state = DriverState::Filled;
            return;
        }
        if self.attempts >= self.cfg.max_attempts {
            log::debug!("attempt budget exhausted, stopping");
            self.state = DriverState::Exhausted;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    struct CountingProbe {
        calls: Arc<AtomicU32>,
        succeed_on: Option<u32>,
    }

    #[async_trait]
    impl Probe for CountingProbe {
        async fn attempt(&mut self) -> bool {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            self.succeed_on.map(|k| n >= k).unwrap_or(false)
        }
    }

    fn probe(succeed_on: Option<u32>) -> (CountingProbe, Arc<AtomicU32>) {
        let calls = Arc::new(AtomicU32::new(0));
        (
            CountingProbe {
                calls: calls.clone(),
                succeed_on,
            },
            calls,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn exhausts_after_max_attempts_and_freezes() {
        let (p, calls) = probe(None);
        let mut driver = RetryDriver::new(p, DriverConfig::default());
        assert_eq!(driver.state(), DriverState::Idle);

        let end = driver.run().await;
        assert_eq!(end, DriverState::Exhausted);
        assert!(driver.is_exhausted());
        assert_eq!(driver.attempts(), 10);
        assert_eq!(calls.load(Ordering::SeqCst), 10);

        // run() returned; advancing time further must not invoke again.
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn stops_on_first_success() {
        let (p, calls) = probe(Some(3));
        let mut driver = RetryDriver::new(p, DriverConfig::default());

        let end = driver.run().await;
        assert_eq!(end, DriverState::Filled);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(driver.attempts(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn mutation_nudges_respect_the_cooldown() {
        let (p, calls) = probe(None);
        // Huge poll interval so only nudges (and the immediate first
        // tick) can invoke the probe.
        let cfg = DriverConfig {
            max_attempts: 3,
            poll_interval: Duration::from_secs(3600),
            nudge_cooldown: Duration::from_secs(2),
            observe_timeout: Duration::from_secs(30),
        };
        let mut driver = RetryDriver::new(p, cfg);
        let nudger = driver.nudger();

        let handle = tokio::spawn(async move {
            // Within the cooldown of the first scheduled attempt.
            tokio::time::sleep(Duration::from_millis(100)).await;
            nudger.nudge(Nudge::Mutation);
            // Past the cooldown.
            tokio::time::sleep(Duration::from_secs(3)).await;
            nudger.nudge(Nudge::Mutation);
            // Again within cooldown, but manual bypasses it.
            tokio::time::sleep(Duration::from_millis(100)).await;
            nudger.nudge(Nudge::Manual);
        });

        let end = driver.run().await;
        handle.await.unwrap();
        // first tick + cooled-down mutation + manual = 3 = budget
        assert_eq!(end, DriverState::Exhausted);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn nudges_are_ignored_after_the_observation_window() {
        let (p, calls) = probe(None);
        let cfg = DriverConfig {
            max_attempts: 5,
            poll_interval: Duration::from_secs(3600),
            nudge_cooldown: Duration::from_secs(2),
            observe_timeout: Duration::from_secs(30),
        };
        let mut driver = RetryDriver::new(p, cfg);
        let nudger = driver.nudger();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(31)).await;
            nudger.nudge(Nudge::Mutation);
            nudger.nudge(Nudge::Manual);
        });

        let run = tokio::time::timeout(Duration::from_secs(120), driver.run());
        let _ = run.await; // the driver is still polling on its long interval
        handle.await.unwrap();
        // Only the immediate first tick and the post-timeout scheduled
        // tick can have fired; the nudges after teardown must not.
        assert!(calls.load(Ordering::SeqCst) <= 2);
    }
}
