use eframe_sketchpad::export::ExportJob;
use eframe_sketchpad::{
    Drawable, ExportArtifact, Exporter, Renderer, SketchConfig, SketchError, Sketchpad, Stamp,
};
use egui::Pos2;
use std::path::PathBuf;
use std::time::Duration;

fn is_dark(image: &image::RgbaImage, x: u32, y: u32) -> bool {
    let [r, g, b, _] = image.get_pixel(x, y).0;
    r < 128 && g < 128 && b < 128
}

fn is_white(image: &image::RgbaImage, x: u32, y: u32) -> bool {
    image.get_pixel(x, y).0 == [255, 255, 255, 255]
}

fn decode(artifact: &ExportArtifact) -> image::RgbaImage {
    image::load_from_memory(&artifact.bytes)
        .expect("export is a valid image")
        .to_rgba8()
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("sketchpad-test-{}-{name}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Stroke A from (0,0) to (10,10) at thickness 2, pointer left hovering at (100,100)
fn sketch_with_stroke() -> Sketchpad {
    let mut pad = Sketchpad::default();
    pad.select_marker(2.0).unwrap();
    pad.pointer_enter(Pos2::new(0.0, 0.0));
    pad.pointer_down(Pos2::new(0.0, 0.0));
    pad.pointer_move(Pos2::new(10.0, 10.0));
    pad.pointer_up(Pos2::new(10.0, 10.0));
    pad.pointer_move(Pos2::new(100.0, 100.0));
    pad
}

#[test]
fn test_export_is_upscaled_png_without_preview() {
    let pad = sketch_with_stroke();
    assert!(pad.preview().is_some());

    let artifact = pad.export().unwrap();
    assert_eq!((artifact.width, artifact.height), (1024, 1024));
    assert_eq!(artifact.file_name, "sketchpad.png");
    assert_eq!(&artifact.bytes[..8], b"\x89PNG\r\n\x1a\n");

    let image = decode(&artifact);
    assert_eq!(image.dimensions(), (1024, 1024));

    // (5,5) on the stroke lands at (20,20) after the 4x upscale
    assert!(is_dark(&image, 20, 20));
    // Far from the stroke
    assert!(is_white(&image, 20, 200));
    // Where the hover ghost sits on screen
    assert!(is_white(&image, 400, 400));
}

#[test]
fn test_export_includes_stamps() {
    let mut pad = Sketchpad::default();
    pad.set_stamp_symbol("⭐").unwrap();
    pad.pointer_down(Pos2::new(128.0, 128.0));
    pad.pointer_up(Pos2::new(128.0, 128.0));

    let image = decode(&pad.export().unwrap());

    // A 32px sticker becomes 128px tall around (512,512)
    let inked = (448..576)
        .flat_map(|y| (448..576).map(move |x| (x, y)))
        .filter(|&(x, y)| !is_white(&image, x, y))
        .count();
    assert!(inked > 0);
    assert!(is_white(&image, 100, 100));
}

#[test]
fn test_export_of_empty_canvas_is_blank() {
    let pad = Sketchpad::default();
    let image = decode(&pad.export().unwrap());
    assert!(image.pixels().all(|p| p.0 == [255, 255, 255, 255]));
}

#[test]
fn test_export_allocation_failure_is_resource_error() {
    let mut pad = sketch_with_stroke();
    pad.set_exporter(Exporter::new(4.0, 0, "empty.png"));

    assert!(matches!(pad.export(), Err(SketchError::Resource(_))));
    // The session survives
    assert_eq!(pad.history().committed().len(), 1);
}

#[test]
fn test_save_to_renames_into_place() {
    let dir = scratch_dir("save");
    let mut pad = sketch_with_stroke();
    pad.set_exporter(Exporter::new(1.0, 64, "small.png"));
    let artifact = pad.export().unwrap();

    let path = artifact.save_to(&dir).unwrap();

    assert_eq!(path, dir.join("small.png"));
    assert_eq!(std::fs::read(&path).unwrap(), artifact.bytes);
    assert!(!dir.join("small.png.part").exists());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_save_to_missing_dir_leaves_nothing_behind() {
    let dir = scratch_dir("missing").join("does-not-exist");
    let artifact = ExportArtifact {
        file_name: "lost.png".to_owned(),
        width: 1,
        height: 1,
        bytes: vec![1, 2, 3],
    };

    assert!(matches!(artifact.save_to(&dir), Err(SketchError::Io(_))));
    assert!(!dir.join("lost.png").exists());
    assert!(!dir.join("lost.png.part").exists());
}

#[test]
fn test_background_export_uses_snapshot() {
    let mut pad = sketch_with_stroke();
    let job = ExportJob::spawn(
        pad.history().snapshot(),
        pad.exporter().clone(),
        pad.renderer().clone(),
    );

    // Later edits don't reach the worker
    pad.clear();

    let image = decode(&job.wait().unwrap());
    assert!(is_dark(&image, 20, 20));
}

#[test]
fn test_background_export_can_be_polled() {
    let pad = sketch_with_stroke();
    let mut job = ExportJob::spawn(
        pad.history().snapshot(),
        pad.exporter().clone(),
        pad.renderer().clone(),
    );

    let mut result = None;
    for _ in 0..2000 {
        result = job.poll();
        if result.is_some() {
            break;
        }
        std::thread::sleep(Duration::from_millis(5));
    }

    let artifact = result.expect("export finished").unwrap();
    assert!(is_dark(&decode(&artifact), 20, 20));
    // Once reported, the job has nothing left to give
    assert!(matches!(job.poll(), Some(Err(SketchError::WorkerLost))));
}

#[test]
fn test_background_export_reports_errors() {
    let pad = sketch_with_stroke();
    let mut job = ExportJob::spawn(
        pad.history().snapshot(),
        Exporter::new(4.0, 0, "empty.png"),
        pad.renderer().clone(),
    );

    let mut result = None;
    for _ in 0..2000 {
        result = job.poll();
        if result.is_some() {
            break;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    assert!(matches!(result, Some(Err(SketchError::Resource(_)))));
}

#[test]
fn test_unusable_scale_is_rejected() {
    let pad = sketch_with_stroke();
    for scale in [0.0, -2.0, f32::NAN, f32::INFINITY] {
        let exporter = Exporter::new(scale, 64, "scaled.png");
        let result = exporter.export(pad.history().committed(), pad.renderer());
        assert!(
            matches!(result, Err(SketchError::InvalidScale(_))),
            "scale {scale} accepted"
        );
    }
}

#[test]
fn test_oversized_sticker_fails_instead_of_aborting() {
    let giant = Drawable::from(Stamp::place("A", Pos2::new(8.0, 8.0), 0.0, 1.0e6)).into_ref();
    let result = Exporter::new(1.0, 64, "giant.png").export(&[giant], &Renderer::default());
    assert!(matches!(result, Err(SketchError::Resource(_))));
}

#[test]
fn test_stored_config_cannot_break_export() {
    let config = SketchConfig {
        stamp_size: 1.0e6,
        export_scale: f32::NAN,
        ..Default::default()
    };
    let mut pad = Sketchpad::new(&config);
    pad.set_stamp_symbol("A").unwrap();
    pad.pointer_down(Pos2::new(128.0, 128.0));
    pad.pointer_up(Pos2::new(128.0, 128.0));

    // Falls back to the default sticker size and 4x scale
    assert_eq!(pad.exporter(), &Exporter::default());
    match pad.history().committed()[0].as_ref() {
        Drawable::Stamp(stamp) => assert_eq!(stamp.size(), 32.0),
        other => panic!("expected stamp, got {other:?}"),
    }

    let image = decode(&pad.export().unwrap());
    assert!(is_white(&image, 0, 0));
    let inked = (448..576)
        .flat_map(|y| (448..576).map(move |x| (x, y)))
        .filter(|&(x, y)| !is_white(&image, x, y))
        .count();
    assert!(inked > 0);
}
