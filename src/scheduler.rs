//! Work scheduler
//!
//! A single self-rescheduling job drives the node. The job is either armed
//! with a fire time or, only while its body runs, idle. Firing always arms
//! exactly one successor at `fired_at + interval` before [`WorkScheduler::run_due`]
//! returns, so once initialized there is never zero and never more than one
//! pending job.

use core::time::Duration;

/// Body of the work job
pub trait Work {
    /// Perform one work tick
    fn do_work(&mut self, now: Duration);
}

/// Work job state
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum JobState {
    /// No job pending
    Idle,
    /// Job pending
    Armed {
        /// Time the job becomes due, in milliseconds since start
        fire_at_ms: u64,
    },
}

/// Scheduler for the periodic work job
#[derive(Debug, Clone)]
pub struct WorkScheduler {
    /// Pending job
    state: JobState,
    /// Time between firings
    interval: Duration,
}

impl WorkScheduler {
    /// Create a scheduler with no job armed
    pub fn new(interval_secs: u32) -> Self {
        Self {
            state: JobState::Idle,
            interval: Duration::from_secs(interval_secs as u64),
        }
    }

    /// Arm the first job for immediate execution
    pub fn initialize(&mut self, now: Duration) {
        self.arm_at(now);
    }

    /// Cancel the pending job and arm it for immediate execution
    pub fn rearm_now(&mut self, now: Duration) {
        self.state = JobState::Idle;
        self.arm_at(now);
    }

    /// Run the job if it is due
    ///
    /// Returns `true` if the job fired.
    pub fn run_due<W: Work>(&mut self, now: Duration, work: &mut W) -> bool {
        if !self.is_due(now) {
            return false;
        }

        self.state = JobState::Idle;
        work.do_work(now);

        // The job always reschedules itself
        self.arm_at(now.saturating_add(self.interval));
        true
    }

    /// Check if the pending job is due
    pub fn is_due(&self, now: Duration) -> bool {
        match self.next_fire_time() {
            Some(fire_at) => fire_at <= now,
            None => false,
        }
    }

    /// Current job state
    pub fn state(&self) -> JobState {
        self.state
    }

    /// Check if a job is pending
    pub fn is_armed(&self) -> bool {
        matches!(self.state, JobState::Armed { .. })
    }

    /// Fire time of the pending job
    pub fn next_fire_time(&self) -> Option<Duration> {
        match self.state {
            JobState::Armed { fire_at_ms } => Some(Duration::from_millis(fire_at_ms)),
            JobState::Idle => None,
        }
    }

    /// Time between firings
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Change the interval, used from the next firing on
    pub fn set_interval_secs(&mut self, secs: u32) {
        self.interval = Duration::from_secs(secs as u64);
    }

    fn arm_at(&mut self, at: Duration) {
        // Saturates beyond u64 milliseconds
        self.state = JobState::Armed {
            fire_at_ms: u64::try_from(at.as_millis()).unwrap_or(u64::MAX),
        };
    }
}
