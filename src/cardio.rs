// ABOUTME: Real-time cardio simulation of elapsed time, heart rate, and calories
// ABOUTME: Start/pause controlled background ticker that never fires after being paused
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::cardio::{HEART_RATE_JITTER, RESTING_HEART_RATE, WARMUP_SECS};
use rand::Rng;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;
use workout_core::models::CardioProfile;

/// Snapshot of a cardio block
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CardioStats {
    /// Seconds of active time
    pub elapsed_seconds: u64,
    /// Simulated heart rate in bpm
    pub heart_rate: u32,
    /// Calories burned so far
    pub calories: f64,
}

#[derive(Debug)]
struct TimerState {
    elapsed: Duration,
    heart_rate: u32,
    generation: u64,
    running: bool,
}

struct Ticker {
    shutdown_tx: mpsc::Sender<()>,
    handle: JoinHandle<()>,
}

/// Cardio timer for one exercise.
///
/// Every `pause` bumps a generation counter under the state lock, and a tick
/// only applies while its generation is current, so no tick lands after a
/// pause returns.
pub struct CardioTimer {
    profile: CardioProfile,
    tick: Duration,
    state: Arc<Mutex<TimerState>>,
    ticker: Option<Ticker>,
}

impl CardioTimer {
    /// Stopped timer at zero
    #[must_use]
    pub fn new(profile: CardioProfile, tick: Duration) -> Self {
        Self {
            profile,
            tick,
            state: Arc::new(Mutex::new(TimerState {
                elapsed: Duration::ZERO,
                heart_rate: RESTING_HEART_RATE,
                generation: 0,
                running: false,
            })),
            ticker: None,
        }
    }

    /// Profile driving the simulation
    #[must_use]
    pub const fn profile(&self) -> &CardioProfile {
        &self.profile
    }

    /// Start ticking. Returns `false` if already running.
    pub fn start(&mut self) -> bool {
        let generation = {
            let mut state = lock(&self.state);
            if state.running {
                return false;
            }
            state.running = true;
            state.generation += 1;
            state.generation
        };

        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
        let state = Arc::clone(&self.state);
        let tick = self.tick;
        let target = self.profile.target_heart_rate;

        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + tick, tick);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        if !apply_tick(&state, generation, tick, target) {
                            break;
                        }
                    }
                    _ = shutdown_rx.recv() => break,
                }
            }
            debug!(generation, "Cardio ticker stopped");
        });

        debug!(cardio = %self.profile.kind, "Cardio timer started");
        self.ticker = Some(Ticker {
            shutdown_tx,
            handle,
        });
        true
    }

    /// Stop ticking, keeping the accumulated stats
    pub fn pause(&mut self) {
        {
            let mut state = lock(&self.state);
            if state.running {
                state.running = false;
                state.generation += 1;
            }
        }
        if let Some(ticker) = self.ticker.take() {
            if let Err(e) = ticker.shutdown_tx.try_send(()) {
                debug!(error = ?e, "Cardio ticker already gone");
            }
            ticker.handle.abort();
        }
    }

    /// Pause and zero the stats
    pub fn reset(&mut self) {
        self.pause();
        let mut state = lock(&self.state);
        state.elapsed = Duration::ZERO;
        state.heart_rate = RESTING_HEART_RATE;
    }

    /// Whether the ticker is active
    #[must_use]
    pub fn is_running(&self) -> bool {
        lock(&self.state).running
    }

    /// Current stats
    #[must_use]
    pub fn stats(&self) -> CardioStats {
        let state = lock(&self.state);
        CardioStats {
            elapsed_seconds: state.elapsed.as_secs(),
            heart_rate: state.heart_rate,
            calories: self.profile.kcal_per_minute * state.elapsed.as_secs_f64() / 60.0,
        }
    }
}

impl Drop for CardioTimer {
    fn drop(&mut self) {
        self.pause();
    }
}

impl std::fmt::Debug for CardioTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardioTimer")
            .field("profile", &self.profile.kind)
            .field("tick", &self.tick)
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}

fn lock(state: &Mutex<TimerState>) -> MutexGuard<'_, TimerState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Apply one tick if `generation` is still current
fn apply_tick(state: &Mutex<TimerState>, generation: u64, tick: Duration, target: u32) -> bool {
    let mut state = lock(state);
    if state.generation != generation || !state.running {
        return false;
    }
    state.elapsed += tick;
    state.heart_rate = simulated_heart_rate(state.elapsed, target);
    true
}

/// Linear ramp from resting to `target` over the warm-up, plus jitter
#[must_use]
pub fn simulated_heart_rate(elapsed: Duration, target: u32) -> u32 {
    let ramp = (elapsed.as_secs_f64() / WARMUP_SECS).min(1.0);
    let base = f64::from(target.saturating_sub(RESTING_HEART_RATE))
        .mul_add(ramp, f64::from(RESTING_HEART_RATE));
    let jitter = rand::thread_rng().gen_range(-HEART_RATE_JITTER..=HEART_RATE_JITTER);
    let reading = (base.round() as i64 + i64::from(jitter)).max(i64::from(RESTING_HEART_RATE));
    u32::try_from(reading).unwrap_or(RESTING_HEART_RATE)
}
