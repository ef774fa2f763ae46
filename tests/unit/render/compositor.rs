use super::*;
use crate::foundation::core::FrameIndex;

fn timeline(renderer: &TileTransition, width: u32, height: u32) -> Timeline {
    renderer
        .timeline(Fps::new(30.0).unwrap(), Canvas::new(width, height).unwrap())
        .unwrap()
}

#[test]
fn duration_is_fixed_by_the_animation() {
    let renderer = TileTransition::default();
    let tl = timeline(&renderer, 1920, 1080);
    assert!((tl.duration() - 3.76).abs() < 1e-9);
    assert_eq!(tl.frame_count(), 113);
}

#[test]
fn first_frame_is_pure_background() {
    let renderer = TileTransition::default();
    let tl = timeline(&renderer, 256, 256);
    let frame = renderer.render_frame(&tl.context(FrameIndex(0))).unwrap();
    assert!(frame.pixels().iter().all(|p| *p == ColorSample::TRANSPARENT));
}

#[test]
fn custom_background_seeds_every_pixel() {
    let bg = ColorSample::opaque(0, 0, 0);
    let renderer = TileTransition::new(TileTransitionOpts {
        background: bg,
        ..TileTransitionOpts::default()
    });
    let tl = timeline(&renderer, 64, 36);
    let frame = renderer.render_frame(&tl.context(FrameIndex(0))).unwrap();
    assert!(frame.pixels().iter().all(|p| *p == bg));
}

#[test]
fn second_frame_only_touches_the_first_tile() {
    let renderer = TileTransition::default();
    let tl = timeline(&renderer, 256, 256);
    let frame = renderer.render_frame(&tl.context(FrameIndex(1))).unwrap();

    let key = GradientRamp::diagonal_key(256, 256, 14, 14);
    let [r, g, b] = GradientRamp::sunset().sample(key);
    assert_eq!(frame.get(14, 14), Some(ColorSample::new(r, g, b, 21)));

    for y in 0..256 {
        for x in 0..256 {
            if x >= 28 || y >= 28 {
                assert_eq!(frame.get(x, y), Some(ColorSample::TRANSPARENT), "({x}, {y})");
            }
        }
    }
    let touched = frame
        .pixels()
        .iter()
        .filter(|p| **p != ColorSample::TRANSPARENT)
        .count();
    assert!(touched > 0 && touched < 28 * 28);
}

#[test]
fn hold_phase_paints_the_ramp_opaquely() {
    let renderer = TileTransition::default();
    let tl = timeline(&renderer, 64, 36);
    let anim = renderer.animation(&tl.context(FrameIndex(0))).unwrap();
    let t = anim.appear_span() + anim.timing().hold_mid / 2.0;
    let ctx = FrameContext {
        time: t,
        ..tl.context(FrameIndex(0))
    };

    let frame = renderer.render_frame(&ctx).unwrap();
    let ramp = GradientRamp::sunset();
    for y in 0..36 {
        for x in 0..64 {
            let [r, g, b] = ramp.sample(GradientRamp::diagonal_key(64, 36, x, y));
            assert_eq!(frame.get(x, y), Some(ColorSample::opaque(r, g, b)), "({x}, {y})");
        }
    }
}

#[test]
fn shade_pixel_matches_the_full_frame() {
    let renderer = TileTransition::default();
    let tl = timeline(&renderer, 64, 36);
    for f in [5, 20, 40, 70] {
        let ctx = tl.context(FrameIndex(f));
        let frame = renderer.render_frame(&ctx).unwrap();
        for y in 0..36 {
            for x in 0..64 {
                let px = renderer
                    .shade_pixel(&ctx, x, y, ColorSample::TRANSPARENT)
                    .unwrap();
                assert_eq!(frame.get(x, y), Some(px), "frame {f} ({x}, {y})");
            }
        }
    }
}

#[test]
fn rendering_is_deterministic() {
    let renderer = TileTransition::default();
    let tl = timeline(&renderer, 64, 36);
    let ctx = tl.context(FrameIndex(33));
    assert_eq!(
        renderer.render_frame(&ctx).unwrap(),
        renderer.render_frame(&ctx).unwrap()
    );
}

#[test]
fn last_frame_time_has_no_visible_tiles_left() {
    let renderer = TileTransition::default();
    let tl = timeline(&renderer, 256, 256);
    let ctx = FrameContext {
        time: tl.duration(),
        ..tl.context(FrameIndex(0))
    };
    let frame = renderer.render_frame(&ctx).unwrap();
    assert!(frame.pixels().iter().all(|p| *p == ColorSample::TRANSPARENT));
}

#[test]
fn wide_canvases_also_end_fully_transparent() {
    let renderer = TileTransition::default();
    for (w, h) in [(2048, 1080), (1920, 1000)] {
        let tl = timeline(&renderer, w, h);
        let ctx = FrameContext {
            time: tl.duration(),
            ..tl.context(FrameIndex(0))
        };
        let anim = renderer.animation(&ctx).unwrap();
        assert!(anim.visible_tiles(ctx.time).is_empty(), "{w}x{h}");
        let frame = renderer.render_frame(&ctx).unwrap();
        assert!(frame.pixels().iter().all(|p| *p == ColorSample::TRANSPARENT));
    }
}

#[test]
fn faded_tile_corners_leave_transparent_white_under_screen() {
    let renderer = TileTransition::default();
    let tl = timeline(&renderer, 256, 256);
    let ctx = tl.context(FrameIndex(1));
    let frame = renderer.render_frame(&ctx).unwrap();

    let anim = renderer.animation(&ctx).unwrap();
    let tile = anim.tile_state(0, 0, ctx.time).unwrap();
    let mut corners = 0;
    for y in 0..28 {
        for x in 0..28 {
            let Some(hit) = anim.sample(&tile, x, y, OpacityProfile::Round) else {
                continue;
            };
            if byte_from_unit(hit.opacity as f32) == 0 {
                corners += 1;
                assert_eq!(frame.get(x, y), Some(ColorSample::new(255, 255, 255, 0)));
            }
        }
    }
    assert!(corners > 0);
}
