// THEORY:
// The `shared_pipeline` module is the concurrency boundary around a
// WavePipeline. A detection session is a strict read-modify-write loop; two
// interleaved ticks could both read the same baseline, double-decrement the
// cooldown, or fire two waves from one gesture. Wrapping the pipeline in an
// async mutex serializes every mutation while letting any number of tasks
// hold cheap cloneable handles. One SharedPipeline guards exactly one camera
// stream; the registry hands out one session per stream id.

use crate::error::WaveError;
use crate::pipeline::{TickOutcome, WaveConfig, WavePipeline, WaveState};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::warn;

/// A cloneable, task-safe handle to a single detection session.
#[derive(Clone)]
pub struct SharedPipeline {
    inner: Arc<Mutex<WavePipeline>>,
}

impl SharedPipeline {
    pub fn new(config: WaveConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(WavePipeline::new(config))),
        }
    }

    /// Serialized tick. Ticks from concurrent tasks queue on the lock and
    /// observe the session one at a time.
    pub async fn tick(&self, frame_bytes: &[u8]) -> Result<TickOutcome, WaveError> {
        self.inner.lock().await.tick(frame_bytes)
    }

    /// Lossy tick for transports that cannot do anything useful with a frame
    /// error. Failures are logged and reported as no wave.
    pub async fn tick_or_idle(&self, frame_bytes: &[u8]) -> TickOutcome {
        match self.tick(frame_bytes).await {
            Ok(outcome) => outcome,
            Err(error) => {
                warn!("Tick failed, treating as no wave: {}", error);
                TickOutcome::NoWave
            }
        }
    }

    pub async fn reset(&self) {
        self.inner.lock().await.reset();
    }

    pub async fn state(&self) -> WaveState {
        self.inner.lock().await.get_state()
    }

    pub async fn motion_score(&self) -> u32 {
        self.inner.lock().await.get_motion_score()
    }
}

/// Hands out one SharedPipeline per camera stream, creating sessions on
/// first sight of a stream id.
pub struct PipelineRegistry {
    config: WaveConfig,
    streams: Mutex<HashMap<String, SharedPipeline>>,
}

impl PipelineRegistry {
    pub fn new(config: WaveConfig) -> Self {
        Self {
            config,
            streams: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the session for `stream_id`, creating it on first use.
    /// Handles for the same id always refer to the same session.
    pub async fn stream(&self, stream_id: &str) -> SharedPipeline {
        let mut streams = self.streams.lock().await;
        streams
            .entry(stream_id.to_string())
            .or_insert_with(|| SharedPipeline::new(self.config.clone()))
            .clone()
    }

    /// Re-arms every registered session.
    pub async fn reset_all(&self) {
        let handles: Vec<SharedPipeline> = {
            let streams = self.streams.lock().await;
            streams.values().cloned().collect()
        };
        futures::future::join_all(handles.iter().map(|handle| handle.reset())).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_modules::test_frames::{solid_frame, square_frame};

    async fn drive_to_wave(shared: &SharedPipeline) {
        let a = square_frame(320, 240, 40, 60, 120);
        let b = square_frame(320, 240, 180, 60, 120);
        assert_eq!(shared.tick(&a).await.expect("valid frame"), TickOutcome::NoWave);
        for frame in [&b, &a, &b] {
            assert_eq!(shared.tick(frame).await.expect("valid frame"), TickOutcome::NoWave);
        }
        assert_eq!(shared.tick(&a).await.expect("valid frame"), TickOutcome::Wave);
    }

    #[tokio::test]
    async fn test_concurrent_ticks_serialize() {
        let shared = SharedPipeline::new(WaveConfig::default());
        let frame = Arc::new(solid_frame(320, 240, 40));

        let mut tasks = Vec::new();
        for _ in 0..8 {
            let handle = shared.clone();
            let frame = Arc::clone(&frame);
            tasks.push(tokio::spawn(async move {
                for _ in 0..5 {
                    let outcome = handle.tick(&frame).await.expect("valid frame");
                    assert_eq!(outcome, TickOutcome::NoWave);
                }
            }));
        }
        for task in tasks {
            task.await.expect("task panicked");
        }

        // 40 identical frames: one bootstrap, then still ticks. Whatever the
        // interleaving, the score stays pinned at zero.
        assert_eq!(shared.state().await, WaveState::Armed);
        assert_eq!(shared.motion_score().await, 0);
    }

    #[tokio::test]
    async fn test_lossy_tick_preserves_state() {
        let shared = SharedPipeline::new(WaveConfig::default());
        assert_eq!(shared.tick_or_idle(b"not a png").await, TickOutcome::NoWave);
        assert_eq!(shared.state().await, WaveState::Bootstrap);

        let frame = solid_frame(320, 240, 40);
        assert_eq!(shared.tick_or_idle(&frame).await, TickOutcome::NoWave);
        assert_eq!(shared.state().await, WaveState::Armed);
    }

    #[tokio::test]
    async fn test_streams_are_isolated() {
        let registry = PipelineRegistry::new(WaveConfig::default());
        let entrance = registry.stream("entrance").await;
        let lobby = registry.stream("lobby").await;

        drive_to_wave(&entrance).await;
        assert_eq!(entrance.state().await, WaveState::Busy);
        assert_eq!(lobby.state().await, WaveState::Bootstrap);

        // Re-fetching an id returns the same session, not a fresh one.
        let entrance_again = registry.stream("entrance").await;
        assert_eq!(entrance_again.state().await, WaveState::Busy);
    }

    #[tokio::test]
    async fn test_reset_all() {
        let registry = PipelineRegistry::new(WaveConfig::default());
        let entrance = registry.stream("entrance").await;
        let lobby = registry.stream("lobby").await;

        drive_to_wave(&entrance).await;
        let frame = solid_frame(320, 240, 40);
        lobby.tick(&frame).await.expect("valid frame");
        assert_eq!(lobby.state().await, WaveState::Armed);

        registry.reset_all().await;
        assert_eq!(entrance.state().await, WaveState::Cooldown);
        assert_eq!(lobby.state().await, WaveState::Bootstrap);
    }
}
