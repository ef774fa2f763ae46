use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::AtomicUsize;

use super::*;
use crate::color::ColorSample;
use crate::encode::sink::InMemorySink;
use crate::foundation::core::{Canvas, Fps, FrameContext};
use crate::render::frame::FrameBuffer;

/// Stamps the frame index into every pixel and tracks how many frames render at once.
#[derive(Default)]
struct StampRenderer {
    frames: u64,
    active: AtomicUsize,
    peak: AtomicUsize,
}

impl StampRenderer {
    fn new(frames: u64) -> Self {
        Self {
            frames,
            ..Self::default()
        }
    }
}

impl FrameRenderer for StampRenderer {
    fn duration_secs(&self, _canvas: Canvas) -> TilewipeResult<f64> {
        Ok(self.frames as f64 / 10.0)
    }

    fn render_into(&self, ctx: &FrameContext, frame: &mut FrameBuffer) -> TilewipeResult<()> {
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        std::thread::sleep(std::time::Duration::from_millis(2));
        let v = ctx.frame.0 as u8;
        for row in frame.rows_mut() {
            row.fill(ColorSample::new(v, v, v, 255));
        }
        self.active.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Counts writes per index and fails on one chosen frame.
#[derive(Default)]
struct CountingSink {
    writes: Mutex<BTreeMap<u64, u32>>,
    fail_on: Option<u64>,
}

impl FrameSink for CountingSink {
    fn write_frame(&self, idx: FrameIndex, frame: FrameBuffer) -> TilewipeResult<()> {
        if self.fail_on == Some(idx.0) {
            return Err(TilewipeError::encode("disk full"));
        }
        assert_eq!(frame.pixels()[0].r, idx.0 as u8);
        *self.writes.lock().unwrap().entry(idx.0).or_default() += 1;
        Ok(())
    }
}

fn timeline(renderer: &dyn FrameRenderer) -> Timeline {
    renderer
        .timeline(Fps::new(10.0).unwrap(), Canvas::new(4, 3).unwrap())
        .unwrap()
}

#[test]
fn zero_workers_is_rejected() {
    assert!(matches!(
        RenderScheduler::new(0),
        Err(TilewipeError::Validation(_))
    ));
}

#[test]
fn batches_are_consecutive_and_bounded() {
    let sched = RenderScheduler::new(4).unwrap();
    let batches: Vec<_> = sched.batches(10).collect();
    assert_eq!(batches, vec![0..4, 4..8, 8..10]);
    assert_eq!(sched.batches(0).count(), 0);
    assert_eq!(sched.batches(4).collect::<Vec<_>>(), vec![0..4]);
}

#[test]
fn every_frame_renders_exactly_once_with_its_own_index() {
    for (frames, workers) in [(1u64, 1usize), (10, 3), (17, 4), (8, 8), (5, 16)] {
        let renderer = StampRenderer::new(frames);
        let tl = timeline(&renderer);
        assert_eq!(tl.frame_count(), frames);

        let sink = CountingSink::default();
        let sched = RenderScheduler::new(workers).unwrap();
        let stats = sched.run(&tl, &renderer, &sink).unwrap();

        assert_eq!(stats.frames_total, frames);
        assert_eq!(stats.frames_rendered, frames);
        assert_eq!(stats.batches, frames.div_ceil(workers as u64));

        let writes = sink.writes.into_inner().unwrap();
        assert_eq!(writes.len() as u64, frames);
        for (i, (idx, count)) in writes.into_iter().enumerate() {
            assert_eq!(idx, i as u64);
            assert_eq!(count, 1);
        }
        assert!(renderer.peak.load(Ordering::SeqCst) <= workers);
    }
}

#[test]
fn progress_reaches_the_total() {
    let renderer = StampRenderer::new(9);
    let tl = timeline(&renderer);
    let seen = Mutex::new(Vec::new());
    let sched = RenderScheduler::new(2).unwrap();
    sched
        .run_with_progress(&tl, &renderer, &InMemorySink::new(), |p| {
            assert_eq!(p.total, 9);
            seen.lock().unwrap().push(p.done);
        })
        .unwrap();

    let mut seen = seen.into_inner().unwrap();
    seen.sort_unstable();
    assert_eq!(seen, (1..=9).collect::<Vec<_>>());
}

#[test]
fn sink_receives_config_and_all_frames() {
    let renderer = StampRenderer::new(6);
    let tl = timeline(&renderer);
    let sink = InMemorySink::new();
    RenderScheduler::new(3)
        .unwrap()
        .run(&tl, &renderer, &sink)
        .unwrap();

    let cfg = sink.config().unwrap();
    assert_eq!(cfg.frame_count, 6);
    assert_eq!(cfg.canvas, Canvas::new(4, 3).unwrap());
    let frames = sink.into_frames();
    assert_eq!(frames.len(), 6);
    for (i, (idx, frame)) in frames.iter().enumerate() {
        assert_eq!(idx.0, i as u64);
        assert_eq!(frame.pixels()[0].g, i as u8);
    }
}

#[test]
fn sink_failure_aborts_the_run() {
    let renderer = StampRenderer::new(12);
    let tl = timeline(&renderer);
    let sink = CountingSink {
        fail_on: Some(5),
        ..CountingSink::default()
    };
    let err = RenderScheduler::new(2)
        .unwrap()
        .run(&tl, &renderer, &sink)
        .unwrap_err();
    assert!(matches!(err, TilewipeError::Encode(_)));

    let writes = sink.writes.into_inner().unwrap();
    assert!(!writes.contains_key(&5));
    assert!(writes.keys().all(|&k| k < 6));
}

#[test]
fn single_frame_renders_on_demand() {
    let renderer = StampRenderer::new(5);
    let tl = timeline(&renderer);
    let sched = RenderScheduler::new(1).unwrap();
    let sink = InMemorySink::new();
    sched
        .render_single(&tl, &renderer, &sink, FrameIndex(3))
        .unwrap();
    let frames = sink.into_frames();
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].0, FrameIndex(3));

    assert!(
        sched
            .render_single(&tl, &renderer, &InMemorySink::new(), FrameIndex(5))
            .is_err()
    );
}
