//! Periodic sampling of one sensor instance.
//!
//! Every [`SensorModule`] runs on its own task. A cycle reads the source,
//! classifies the sample, renders it and hands the [`Output`] to a
//! [`DisplaySink`]; the task then sleeps until the next interval. The first
//! cycle runs immediately. Dropping the [`PollerHandle`] wakes the task and
//! ends it without waiting out the current sleep.

use crate::source::{self, SensorSource};
use crate::{classify, render, Output, Result, SensorConfig};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Minimum time between repeated read-failure warnings.
const ERROR_LOG_INTERVAL: Duration = Duration::from_secs(60);

/// Receives one output per cycle. Owns all rendering state.
pub trait DisplaySink: Send + 'static {
    /// Called after every cycle, in cycle order.
    fn update(&mut self, output: Output);
}

impl<F> DisplaySink for F
where
    F: FnMut(Output) + Send + 'static,
{
    fn update(&mut self, output: Output) {
        self(output)
    }
}

/// A resolved sensor together with its configuration.
#[derive(Debug)]
pub struct SensorModule {
    config: SensorConfig,
    source: Box<dyn SensorSource>,
    tooltips: bool,
}

impl SensorModule {
    /// Resolves the platform source for `config`.
    ///
    /// Fails when no source can be found or it cannot be opened; no poller
    /// should be started in that case.
    pub fn new(config: SensorConfig, tooltips: bool) -> Result<Self> {
        let source = source::open(&config)?;
        Ok(Self::with_source(config, source, tooltips))
    }

    /// Resolves `config` with a specific backend.
    pub fn resolve_with<S: SensorSource + 'static>(
        config: SensorConfig,
        tooltips: bool,
    ) -> Result<Self> {
        let source = S::resolve(&config)?;
        Ok(Self::with_source(config, Box::new(source), tooltips))
    }

    /// Wraps an already resolved source.
    pub fn with_source(config: SensorConfig, source: Box<dyn SensorSource>, tooltips: bool) -> Self {
        Self {
            config,
            source,
            tooltips,
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SensorConfig {
        &self.config
    }

    /// Describes where samples come from.
    pub fn source_description(&self) -> String {
        self.source.describe()
    }

    /// Runs one read/classify/render cycle.
    pub fn poll_once(&self) -> Result<Output> {
        let reading = self.source.read()?;
        let classification = classify(reading.rounded(), &self.config);
        debug!(
            "{} sample {} -> {:?}",
            self.config.sensor_type, reading.value, classification
        );
        Ok(render(&reading, classification, &self.config, self.tooltips))
    }

    /// Starts polling on a dedicated task. Must be called within a Tokio runtime.
    pub fn spawn<S: DisplaySink>(self, interval: Duration, sink: S) -> PollerHandle {
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let task = tokio::spawn(poll_loop(Arc::new(self), interval, sink, shutdown_rx));

        PollerHandle {
            shutdown: Some(shutdown_tx),
            task: Some(task),
        }
    }
}

/// Handle to a running poller. Dropping it stops the poller.
#[derive(Debug)]
pub struct PollerHandle {
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    /// Returns true once the polling task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Stops the poller and waits for its task to exit.
    pub async fn shutdown(mut self) {
        self.signal();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!("Poller task ended abnormally: {}", e);
            }
        }
    }

    fn signal(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.signal();
    }
}

/// Folds repeated read failures into one warning per minute.
struct ErrorThrottle {
    consecutive: u32,
    last_log: Instant,
}

impl ErrorThrottle {
    fn new(now: Instant) -> Self {
        Self {
            consecutive: 0,
            last_log: now,
        }
    }

    /// Records a failure at `now`; returns true if a warning was logged.
    fn failed(&mut self, source: &str, error: &dyn std::fmt::Display, now: Instant) -> bool {
        self.consecutive += 1;
        if self.consecutive == 1 {
            warn!("Sensor {} unavailable: {}", source, error);
        } else if now.saturating_duration_since(self.last_log) >= ERROR_LOG_INTERVAL {
            warn!(
                "Sensor {} unavailable (failed {} times in a row): {}",
                source, self.consecutive, error
            );
        } else {
            return false;
        }
        self.last_log = now;
        true
    }

    fn succeeded(&mut self, source: &str) {
        if self.consecutive > 0 {
            info!(
                "Sensor {} recovered after {} failed reads",
                source, self.consecutive
            );
        }
        self.consecutive = 0;
    }
}

async fn poll_loop<S: DisplaySink>(
    module: Arc<SensorModule>,
    interval: Duration,
    mut sink: S,
    mut shutdown: oneshot::Receiver<()>,
) {
    let source = module.source_description();
    let mut errors = ErrorThrottle::new(Instant::now());
    debug!("Polling {} every {:?}", source, interval);

    loop {
        // Reads may block on slow kernel interfaces, keep them off the runtime.
        let cycle = {
            let module = Arc::clone(&module);
            tokio::task::spawn_blocking(move || module.poll_once())
        };

        let output = tokio::select! {
            biased;
            _ = &mut shutdown => break,
            joined = cycle => match joined {
                Ok(Ok(output)) => {
                    errors.succeeded(&source);
                    output
                }
                Ok(Err(e)) => {
                    errors.failed(&source, &e, Instant::now());
                    Output::unavailable(&e.to_string(), module.tooltips)
                }
                Err(e) => {
                    errors.failed(&source, &e, Instant::now());
                    Output::unavailable("sensor read aborted", module.tooltips)
                }
            },
        };

        sink.update(output);

        tokio::select! {
            biased;
            _ = &mut shutdown => break,
            _ = tokio::time::sleep(interval) => {}
        }
    }

    debug!("Stopped polling {}", source);
}
