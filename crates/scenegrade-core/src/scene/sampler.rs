use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant, SystemTime};

use tracing::{debug, info, warn};

use crate::config::SamplerConfig;
use crate::error::Result;

use super::classifier::SceneClassifier;
use super::frame::{FrameEncoder, FrameSource};
use super::observation::{Classification, SceneObservation};

/// Where the sampler is in its cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SamplerPhase {
    Idle,
    /// A sample has been admitted and the frame is being captured.
    Sampling,
    /// The frame was sent and the classification is outstanding.
    AwaitingResult,
    Stopped,
}

/// Handle for one admitted sample. Completions are matched against it so a
/// result from an earlier run (or a stopped sampler) is never surfaced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SampleTicket {
    generation: u64,
    seq: u64,
}

/// Outcome of feeding a classification result back into [`SamplerState`].
#[derive(Clone, Debug, PartialEq)]
pub enum Completion {
    Observed(SceneObservation),
    /// The transport failed; no observation this cycle.
    Missed,
    /// The ticket no longer matches the outstanding request (stopped, or
    /// already completed). Nothing observable changes.
    Stale,
}

/// Throttling state machine: `Idle -> Sampling -> AwaitingResult -> Idle`.
///
/// A sample is admitted only when nothing is in flight and at least
/// `interval` has elapsed since the previous sample was *taken*. The clock is
/// injected so the machine can be driven deterministically.
#[derive(Debug)]
pub struct SamplerState {
    interval: Duration,
    phase: SamplerPhase,
    last_sample_at: Option<Instant>,
    generation: u64,
    seq: u64,
    outstanding: Option<u64>,
}

impl SamplerState {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            phase: SamplerPhase::Idle,
            last_sample_at: None,
            generation: 0,
            seq: 0,
            outstanding: None,
        }
    }

    pub fn phase(&self) -> SamplerPhase {
        self.phase
    }

    pub fn in_flight(&self) -> bool {
        self.outstanding.is_some()
    }

    pub fn last_sample_at(&self) -> Option<Instant> {
        self.last_sample_at
    }

    /// Admit a new sample if the guards allow it.
    pub fn try_begin(&mut self, now: Instant) -> Option<SampleTicket> {
        if self.phase == SamplerPhase::Stopped || self.outstanding.is_some() {
            return None;
        }
        if let Some(last) = self.last_sample_at {
            if now.saturating_duration_since(last) < self.interval {
                return None;
            }
        }
        self.seq += 1;
        self.outstanding = Some(self.seq);
        self.phase = SamplerPhase::Sampling;
        Some(SampleTicket {
            generation: self.generation,
            seq: self.seq,
        })
    }

    /// The sample could not be taken (no frame, encode failure). Does not count
    /// as a sample for throttling.
    pub fn abort(&mut self, ticket: SampleTicket) {
        if self.owns(ticket) {
            self.outstanding = None;
            self.phase = SamplerPhase::Idle;
        }
    }

    /// The frame for `ticket` was captured at `now` and handed to the transport.
    pub fn mark_taken(&mut self, ticket: SampleTicket, now: Instant) {
        if self.owns(ticket) {
            self.last_sample_at = Some(now);
            self.phase = SamplerPhase::AwaitingResult;
        }
    }

    /// Feed back a transport result.
    pub fn complete(
        &mut self,
        ticket: SampleTicket,
        result: Result<Classification>,
    ) -> Completion {
        if !self.owns(ticket) {
            debug!(seq = ticket.seq, "Discarding stale classification result");
            return Completion::Stale;
        }
        self.outstanding = None;
        self.phase = SamplerPhase::Idle;
        match result {
            Ok(c) => Completion::Observed(SceneObservation::from_classification(
                c,
                SystemTime::now(),
            )),
            Err(e) => {
                warn!(error = %e, "Scene classification failed");
                Completion::Missed
            }
        }
    }

    /// Stop for good. Any outstanding ticket becomes stale.
    pub fn stop(&mut self) {
        self.phase = SamplerPhase::Stopped;
        self.generation += 1;
        self.outstanding = None;
    }

    fn owns(&self, ticket: SampleTicket) -> bool {
        self.phase != SamplerPhase::Stopped
            && ticket.generation == self.generation
            && self.outstanding == Some(ticket.seq)
    }
}

/// One completed sampling cycle: an observation, or nothing this cycle.
#[derive(Clone, Debug, PartialEq)]
pub enum SamplerEvent {
    Observed(SceneObservation),
    Missed,
}

impl SamplerEvent {
    pub fn observation(&self) -> Option<&SceneObservation> {
        match self {
            Self::Observed(obs) => Some(obs),
            Self::Missed => None,
        }
    }
}

enum SamplerCommand {
    Stop,
    Completed {
        ticket: SampleTicket,
        result: Result<Classification>,
    },
}

struct SamplerContext {
    initial_delay: Duration,
    interval: Duration,
    encoder: FrameEncoder,
    source: Arc<dyn FrameSource>,
    classifier: Arc<dyn SceneClassifier>,
}

/// Periodic scene sampler bound to one frame source.
///
/// Runs on its own thread; each classification call runs on a short-lived
/// helper thread and reports back over the sampler's command channel.
/// Dropping the sampler (or calling [`stop`](Self::stop)) cancels both timers;
/// results that arrive afterwards are discarded.
pub struct SceneSampler {
    cmd_tx: mpsc::Sender<SamplerCommand>,
    handle: Option<JoinHandle<()>>,
}

impl SceneSampler {
    /// Start sampling. Events arrive on the returned receiver, one per
    /// completed cycle.
    pub fn spawn(
        config: &SamplerConfig,
        source: Arc<dyn FrameSource>,
        classifier: Arc<dyn SceneClassifier>,
    ) -> Result<(Self, mpsc::Receiver<SamplerEvent>)> {
        config.validate()?;
        let (cmd_tx, cmd_rx) = mpsc::channel::<SamplerCommand>();
        let (event_tx, event_rx) = mpsc::channel::<SamplerEvent>();

        let ctx = SamplerContext {
            initial_delay: config.initial_delay(),
            interval: config.interval(),
            encoder: config.encoder(),
            source,
            classifier,
        };
        let completion_tx = cmd_tx.clone();
        let handle = std::thread::Builder::new()
            .name("scenegrade-sampler".into())
            .spawn(move || sampler_loop(ctx, cmd_rx, completion_tx, event_tx))?;

        info!(
            interval_ms = config.interval_ms,
            initial_delay_ms = config.initial_delay_ms,
            "Scene sampler started"
        );
        Ok((
            Self {
                cmd_tx,
                handle: Some(handle),
            },
            event_rx,
        ))
    }

    /// Cancel sampling and wait for the sampler thread to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = self.cmd_tx.send(SamplerCommand::Stop);
            let _ = handle.join();
            info!("Scene sampler stopped");
        }
    }
}

impl Drop for SceneSampler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn sampler_loop(
    ctx: SamplerContext,
    cmd_rx: mpsc::Receiver<SamplerCommand>,
    completion_tx: mpsc::Sender<SamplerCommand>,
    event_tx: mpsc::Sender<SamplerEvent>,
) {
    let start = Instant::now();
    let mut state = SamplerState::new(ctx.interval);
    let mut initial_at = Some(start + ctx.initial_delay);
    let mut next_tick = start + ctx.interval;

    loop {
        let deadline = initial_at.map_or(next_tick, |t| t.min(next_tick));
        let wait = deadline.saturating_duration_since(Instant::now());

        match cmd_rx.recv_timeout(wait) {
            Ok(SamplerCommand::Stop) | Err(RecvTimeoutError::Disconnected) => break,
            Ok(SamplerCommand::Completed { ticket, result }) => {
                let event = match state.complete(ticket, result) {
                    Completion::Observed(obs) => {
                        debug!(label = %obs.label, confidence = %obs.confidence, "Scene observed");
                        SamplerEvent::Observed(obs)
                    }
                    Completion::Missed => SamplerEvent::Missed,
                    Completion::Stale => continue,
                };
                if event_tx.send(event).is_err() {
                    debug!("Sampler event receiver dropped");
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                let now = Instant::now();
                if initial_at.is_some_and(|t| now >= t) {
                    initial_at = None;
                    attempt_sample(&ctx, &mut state, &completion_tx);
                }
                if now >= next_tick {
                    while next_tick <= now {
                        next_tick += ctx.interval;
                    }
                    attempt_sample(&ctx, &mut state, &completion_tx);
                }
            }
        }
    }

    state.stop();
}

fn attempt_sample(
    ctx: &SamplerContext,
    state: &mut SamplerState,
    completion_tx: &mpsc::Sender<SamplerCommand>,
) {
    let now = Instant::now();
    let Some(ticket) = state.try_begin(now) else {
        debug!(in_flight = state.in_flight(), "Sample not admitted");
        return;
    };

    let Some(frame) = ctx.source.current_frame() else {
        debug!("Frame source not ready, skipping sample");
        state.abort(ticket);
        return;
    };

    let payload = match ctx.encoder.encode(&frame) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, "Failed to encode sampled frame");
            state.abort(ticket);
            return;
        }
    };
    state.mark_taken(ticket, now);
    debug!(bytes = payload.len(), "Submitting frame for classification");

    let classifier = Arc::clone(&ctx.classifier);
    let tx = completion_tx.clone();
    let spawned = std::thread::Builder::new()
        .name("scenegrade-classify".into())
        .spawn(move || {
            let result = classifier.classify(&payload);
            // The sampler may already be gone; that result is simply dropped.
            let _ = tx.send(SamplerCommand::Completed { ticket, result });
        });
    if let Err(e) = spawned {
        warn!(error = %e, "Failed to start classification");
        state.abort(ticket);
    }
}
