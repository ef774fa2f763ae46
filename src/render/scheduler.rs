use std::ops::Range;
use std::sync::atomic::{AtomicU64, Ordering};

use rayon::prelude::*;

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{FrameIndex, Timeline};
use crate::foundation::error::{TilewipeError, TilewipeResult};
use crate::render::compositor::FrameRenderer;

/// Completion snapshot passed to progress callbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Progress {
    /// Frames rendered and handed to the sink so far.
    pub done: u64,
    /// Frames in the run.
    pub total: u64,
}

/// Aggregated counters for one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames in the timeline.
    pub frames_total: u64,
    /// Frames rendered and handed off.
    pub frames_rendered: u64,
    /// Batches executed.
    pub batches: u64,
}

/// Renders a timeline in consecutive batches of at most `workers` concurrent frames.
///
/// Every frame gets its own [`FrameContext`](crate::FrameContext) and freshly allocated
/// buffer, which is moved into the sink as soon as it is filled. A batch must finish
/// completely before the next one starts, so at most `workers` buffers are alive at once.
pub struct RenderScheduler {
    workers: usize,
    pool: rayon::ThreadPool,
}

impl RenderScheduler {
    /// Create a scheduler backed by a dedicated pool of `workers` threads.
    pub fn new(workers: usize) -> TilewipeResult<Self> {
        if workers == 0 {
            return Err(TilewipeError::validation("workers must be >= 1"));
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("tilewipe-render-{i}"))
            .build()
            .map_err(|e| TilewipeError::render(format!("failed to build worker pool: {e}")))?;
        Ok(Self { workers, pool })
    }

    /// Maximum frames in flight.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Split `[0, total)` into consecutive ranges of at most `workers` frames.
    pub fn batches(&self, total: u64) -> impl Iterator<Item = Range<u64>> + use<> {
        let step = self.workers as u64;
        (0..total)
            .step_by(self.workers)
            .map(move |start| start..(start + step).min(total))
    }

    /// Render every frame of `timeline` into `sink`.
    pub fn run(
        &self,
        timeline: &Timeline,
        renderer: &dyn FrameRenderer,
        sink: &dyn FrameSink,
    ) -> TilewipeResult<RenderStats> {
        self.run_with_progress(timeline, renderer, sink, |_| {})
    }

    /// Like [`RenderScheduler::run`], calling `on_progress` from the worker that just
    /// finished a frame.
    ///
    /// The first failing frame aborts the run once its batch has drained; nothing is retried.
    #[tracing::instrument(
        skip_all,
        fields(frames = timeline.frame_count(), workers = self.workers)
    )]
    pub fn run_with_progress<P>(
        &self,
        timeline: &Timeline,
        renderer: &dyn FrameRenderer,
        sink: &dyn FrameSink,
        on_progress: P,
    ) -> TilewipeResult<RenderStats>
    where
        P: Fn(Progress) + Sync,
    {
        let total = timeline.frame_count();
        sink.begin(&SinkConfig {
            canvas: timeline.canvas(),
            fps: timeline.fps(),
            frame_count: total,
        })?;

        let done = AtomicU64::new(0);
        let mut stats = RenderStats {
            frames_total: total,
            ..RenderStats::default()
        };

        for batch in self.batches(total) {
            tracing::debug!(start = batch.start, end = batch.end, "rendering batch");
            self.pool.install(|| {
                batch.clone().into_par_iter().try_for_each(|f| {
                    render_one(timeline, renderer, sink, FrameIndex(f))?;
                    let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
                    on_progress(Progress {
                        done: finished,
                        total,
                    });
                    Ok::<_, TilewipeError>(())
                })
            })?;
            stats.batches += 1;
        }

        sink.end()?;
        stats.frames_rendered = done.into_inner();
        tracing::info!(
            frames = stats.frames_rendered,
            batches = stats.batches,
            "render finished"
        );
        Ok(stats)
    }

    /// Render a single frame of `timeline` on the calling thread.
    pub fn render_single(
        &self,
        timeline: &Timeline,
        renderer: &dyn FrameRenderer,
        sink: &dyn FrameSink,
        frame: FrameIndex,
    ) -> TilewipeResult<()> {
        if frame.0 >= timeline.frame_count() {
            return Err(TilewipeError::validation(format!(
                "frame {} is outside the run (0..{})",
                frame.0,
                timeline.frame_count()
            )));
        }
        sink.begin(&SinkConfig {
            canvas: timeline.canvas(),
            fps: timeline.fps(),
            frame_count: 1,
        })?;
        render_one(timeline, renderer, sink, frame)?;
        sink.end()
    }
}

fn render_one(
    timeline: &Timeline,
    renderer: &dyn FrameRenderer,
    sink: &dyn FrameSink,
    frame: FrameIndex,
) -> TilewipeResult<()> {
    let ctx = timeline.context(frame);
    let buffer = renderer.render_frame(&ctx)?;
    sink.write_frame(frame, buffer)
}

#[cfg(test)]
#[path = "../../tests/unit/render/scheduler.rs"]
mod tests;
