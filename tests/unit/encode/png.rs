use super::*;
use crate::color::ColorSample;
use crate::foundation::core::{Canvas, Fps};

#[test]
fn file_names_are_zero_padded_to_six_digits() {
    assert_eq!(frame_file_name("out_", FrameIndex(0)), "out_000000.png");
    assert_eq!(frame_file_name("", FrameIndex(7)), "000007.png");
    assert_eq!(frame_file_name("f", FrameIndex(123456)), "f123456.png");
    assert_eq!(frame_file_name("f", FrameIndex(1234567)), "f1234567.png");
}

#[test]
fn writes_rgba_png_per_frame() {
    let dir = PathBuf::from("target").join("unit_png_sink");
    let _ = std::fs::remove_dir_all(&dir);

    let sink = PngSequenceSink::new(&dir, "out_");
    let canvas = Canvas::new(3, 2).unwrap();
    sink.begin(&SinkConfig {
        canvas,
        fps: Fps::new(30.0).unwrap(),
        frame_count: 1,
    })
    .unwrap();
    assert!(dir.is_dir());

    let px = ColorSample::new(10, 20, 30, 40);
    sink.write_frame(FrameIndex(7), FrameBuffer::filled(canvas, px))
        .unwrap();
    sink.end().unwrap();

    let path = dir.join("out_000007.png");
    assert_eq!(sink.path_for(FrameIndex(7)), path);
    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (3, 2));
    assert_eq!(img.get_pixel(2, 1).0, [10, 20, 30, 40]);
}

#[test]
fn missing_directory_is_an_encode_error() {
    let dir = PathBuf::from("target").join("unit_png_sink_missing");
    let _ = std::fs::remove_dir_all(&dir);
    let sink = PngSequenceSink::new(&dir, "x");
    let canvas = Canvas::new(1, 1).unwrap();
    let err = sink
        .write_frame(FrameIndex(0), FrameBuffer::filled(canvas, ColorSample::TRANSPARENT))
        .unwrap_err();
    assert!(matches!(err, TilewipeError::Encode(_)));
}
