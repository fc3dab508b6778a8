//! Named periodic tasks: clock, health polling, message refresh
//!
//! Each task runs its job immediately on start and then once per interval.
//! Tasks are independent: each gets a child of the service cancellation
//! token, so one can be stopped without touching the others.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::config::ScheduleConfig;
use crate::poller::ClientPoller;
use crate::state::StateHandle;

pub const CLOCK_TASK: &str = "clock";
pub const HEALTH_TASK: &str = "health";
pub const REFRESH_TASK: &str = "refresh";

/// Work performed on every tick of a periodic task
#[async_trait]
pub trait PeriodicJob: Send + Sync {
    fn name(&self) -> &str;

    async fn run(&self);
}

/// Updates the displayed timestamp
pub struct ClockJob {
    state: StateHandle,
}

impl ClockJob {
    pub fn new(state: StateHandle) -> Self {
        Self { state }
    }
}

#[async_trait]
impl PeriodicJob for ClockJob {
    fn name(&self) -> &str {
        CLOCK_TASK
    }

    async fn run(&self) {
        self.state.write().await.tick_clock(chrono::Local::now());
    }
}

/// Polls backend health
pub struct HealthJob {
    poller: Arc<ClientPoller>,
}

impl HealthJob {
    pub fn new(poller: Arc<ClientPoller>) -> Self {
        Self { poller }
    }
}

#[async_trait]
impl PeriodicJob for HealthJob {
    fn name(&self) -> &str {
        HEALTH_TASK
    }

    async fn run(&self) {
        self.poller.check_health().await;
    }
}

/// Re-fetches the message list and count
pub struct RefreshJob {
    poller: Arc<ClientPoller>,
}

impl RefreshJob {
    pub fn new(poller: Arc<ClientPoller>) -> Self {
        Self { poller }
    }
}

#[async_trait]
impl PeriodicJob for RefreshJob {
    fn name(&self) -> &str {
        REFRESH_TASK
    }

    async fn run(&self) {
        self.poller.refresh().await;
    }
}

/// The three standard jobs with their configured intervals
pub fn standard_jobs(
    poller: Arc<ClientPoller>,
    schedule: &ScheduleConfig,
) -> Vec<(Arc<dyn PeriodicJob>, Duration)> {
    vec![
        (
            Arc::new(ClockJob::new(Arc::clone(poller.state()))) as Arc<dyn PeriodicJob>,
            schedule.clock_interval(),
        ),
        (
            Arc::new(HealthJob::new(Arc::clone(&poller))) as Arc<dyn PeriodicJob>,
            schedule.health_interval(),
        ),
        (
            Arc::new(RefreshJob::new(poller)) as Arc<dyn PeriodicJob>,
            schedule.refresh_interval(),
        ),
    ]
}

/// A running periodic task
pub struct TaskHandle {
    name: String,
    interval: Duration,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl TaskHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn stop(&self) {
        self.cancel.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.handle.is_finished()
    }

    pub async fn join(self) {
        let _ = self.handle.await;
    }
}

/// Start a job on its own task. `interval` must be non-zero.
pub fn spawn_task(
    job: Arc<dyn PeriodicJob>,
    interval: Duration,
    parent: &CancellationToken,
) -> TaskHandle {
    let name = job.name().to_string();
    let cancel = parent.child_token();
    tracing::debug!("Starting task '{}' every {:?}", name, interval);
    let handle = tokio::spawn(run_loop(job, interval, cancel.clone()));
    TaskHandle {
        name,
        interval,
        cancel,
        handle,
    }
}

async fn run_loop(job: Arc<dyn PeriodicJob>, interval: Duration, cancel: CancellationToken) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = cancel.cancelled() => break,
        }
        // An in-flight run is abandoned on cancellation
        tokio::select! {
            _ = job.run() => {}
            _ = cancel.cancelled() => break,
        }
    }

    tracing::debug!("Task '{}' stopped", job.name());
}

/// Owns the running periodic tasks
pub struct Scheduler {
    cancel: CancellationToken,
    tasks: Vec<TaskHandle>,
}

impl Scheduler {
    pub fn new(cancel: CancellationToken) -> Self {
        Self {
            cancel,
            tasks: Vec::new(),
        }
    }

    pub fn start(&mut self, job: Arc<dyn PeriodicJob>, interval: Duration) {
        self.tasks.push(spawn_task(job, interval, &self.cancel));
    }

    /// Stop one task by name. Returns false if no such task is running.
    pub fn stop(&self, name: &str) -> bool {
        match self.tasks.iter().find(|t| t.name() == name) {
            Some(task) => {
                task.stop();
                true
            }
            None => false,
        }
    }

    pub fn tasks(&self) -> &[TaskHandle] {
        &self.tasks
    }

    /// Wait for every task to finish; returns once the service token is cancelled
    pub async fn join(self) {
        for task in self.tasks {
            task.join().await;
        }
    }
}
