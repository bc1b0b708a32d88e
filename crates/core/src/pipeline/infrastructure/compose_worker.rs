use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use image::DynamicImage;

use crate::landmarks::domain::landmark_detector::LandmarkDetector;
use crate::pipeline::compose_error::ComposeError;
use crate::pipeline::feature_scales::FeatureScales;
use crate::pipeline::warp_compositor::WarpCompositor;
use crate::shared::photo::Photo;

/// Result of one compose request, tagged with the generation that asked for it.
pub enum ComposeMessage {
    Complete { generation: u64, image: DynamicImage },
    Failed { generation: u64, error: ComposeError },
}

impl ComposeMessage {
    pub fn generation(&self) -> u64 {
        match self {
            ComposeMessage::Complete { generation, .. } => *generation,
            ComposeMessage::Failed { generation, .. } => *generation,
        }
    }
}

struct ComposeRequest {
    generation: u64,
    scales: FeatureScales,
}

/// Background compositor for interactive hosts.
///
/// Requests queued while a compose is running collapse to the newest one,
/// and results from superseded generations are dropped on receipt, so only
/// the latest scale settings ever reach the caller.
pub struct ComposeWorker {
    requests: Option<Sender<ComposeRequest>>,
    results: Receiver<ComposeMessage>,
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

impl ComposeWorker {
    pub fn spawn(
        photo: Arc<Photo>,
        detector: Box<dyn LandmarkDetector>,
        compositor: WarpCompositor,
    ) -> Self {
        let (request_tx, request_rx) = crossbeam_channel::unbounded::<ComposeRequest>();
        let (result_tx, result_rx) = crossbeam_channel::unbounded::<ComposeMessage>();

        let handle = thread::spawn(move || {
            run_worker(&photo, detector, &compositor, &request_rx, &result_tx);
        });

        Self {
            requests: Some(request_tx),
            results: result_rx,
            generation: 0,
            handle: Some(handle),
        }
    }

    /// Queues a compose with `scales` and returns its generation.
    pub fn submit(&mut self, scales: FeatureScales) -> u64 {
        self.generation += 1;
        if let Some(tx) = &self.requests {
            let _ = tx.send(ComposeRequest {
                generation: self.generation,
                scales,
            });
        }
        self.generation
    }

    /// Generation of the most recent submission (0 before any).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Non-blocking poll for the result of the latest submission.
    pub fn try_latest(&self) -> Option<ComposeMessage> {
        self.results
            .try_iter()
            .filter(|m| m.generation() == self.generation)
            .last()
    }

    /// Blocks until the latest submission finishes or `timeout` elapses.
    ///
    /// A timeout too large to represent as a deadline waits indefinitely.
    pub fn wait_latest(&self, timeout: Duration) -> Option<ComposeMessage> {
        let deadline = Instant::now().checked_add(timeout);
        loop {
            let received = match deadline {
                Some(deadline) => {
                    let remaining = deadline.saturating_duration_since(Instant::now());
                    match self.results.recv_timeout(remaining) {
                        Ok(message) => message,
                        Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                            return None
                        }
                    }
                }
                None => self.results.recv().ok()?,
            };

            if received.generation() == self.generation {
                return Some(received);
            }
            log::debug!(
                "Dropping stale compose result (generation {})",
                received.generation()
            );
        }
    }
}

impl Drop for ComposeWorker {
    fn drop(&mut self) {
        self.requests.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn run_worker(
    photo: &Photo,
    mut detector: Box<dyn LandmarkDetector>,
    compositor: &WarpCompositor,
    requests: &Receiver<ComposeRequest>,
    results: &Sender<ComposeMessage>,
) {
    while let Ok(mut request) = requests.recv() {
        for newer in requests.try_iter() {
            request = newer;
        }

        let generation = request.generation;
        let message =
            match compositor.compose_detected(photo, detector.as_mut(), &request.scales) {
                Ok(image) => ComposeMessage::Complete { generation, image },
                Err(error) => {
                    log::warn!("Compose generation {generation} failed: {error}");
                    ComposeMessage::Failed { generation, error }
                }
            };

        if results.send(message).is_err() {
            break;
        }
    }
}
