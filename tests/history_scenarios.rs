use eframe_sketchpad::{Drawable, DrawableRef, Sketchpad, SketchEvent};
use egui::Pos2;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

// Helper: draw a stroke through `points` with the current marker
fn draw(pad: &mut Sketchpad, points: &[(f32, f32)]) {
    let (first, rest) = points.split_first().unwrap();
    pad.pointer_down(Pos2::new(first.0, first.1));
    for &(x, y) in rest {
        pad.pointer_move(Pos2::new(x, y));
    }
    let &(x, y) = points.last().unwrap();
    pad.pointer_up(Pos2::new(x, y));
}

fn record_events(pad: &Sketchpad) -> Rc<RefCell<Vec<SketchEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    pad.on_change(move |event| sink.borrow_mut().push(*event));
    events
}

fn same_items(a: &[DrawableRef], b: &[DrawableRef]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| Arc::ptr_eq(x, y))
}

#[test]
fn test_stroke_then_stamp_undo_redo_scenario() {
    let mut pad = Sketchpad::default();

    // Stroke A: (0,0) -> (10,10), thickness 2
    pad.select_marker(2.0).unwrap();
    draw(&mut pad, &[(0.0, 0.0), (10.0, 10.0)]);

    // Stamp B: star at (5,5), angle 0, committed on pointer down
    pad.set_stamp_symbol("⭐").unwrap();
    pad.set_rotation(0.0).unwrap();
    pad.pointer_down(Pos2::new(5.0, 5.0));

    let committed = pad.history().committed().to_vec();
    assert_eq!(committed.len(), 2);
    match committed[0].as_ref() {
        Drawable::Stroke(a) => {
            assert_eq!(a.points(), &[Pos2::new(0.0, 0.0), Pos2::new(10.0, 10.0)]);
            assert_eq!(a.thickness(), 2.0);
        }
        other => panic!("expected stroke, got {other:?}"),
    }
    match committed[1].as_ref() {
        Drawable::Stamp(b) => {
            assert_eq!(b.symbol(), "⭐");
            assert_eq!(b.anchor(), Pos2::new(5.0, 5.0));
            assert_eq!(b.angle(), 0.0);
        }
        other => panic!("expected stamp, got {other:?}"),
    }
    pad.pointer_up(Pos2::new(5.0, 5.0));
    assert_eq!(pad.history().committed().len(), 2);

    assert!(pad.undo());
    assert!(same_items(pad.history().committed(), &committed[..1]));
    assert!(same_items(pad.history().redo_buffer(), &committed[1..]));

    assert!(pad.redo());
    assert!(same_items(pad.history().committed(), &committed));
    assert!(pad.history().redo_buffer().is_empty());
}

#[test]
fn test_clear_empties_both_stacks() {
    let mut pad = Sketchpad::default();
    draw(&mut pad, &[(0.0, 0.0), (10.0, 10.0)]);
    draw(&mut pad, &[(20.0, 20.0), (30.0, 10.0)]);
    pad.undo();

    let events = record_events(&pad);
    pad.clear();

    assert!(pad.history().committed().is_empty());
    assert!(pad.history().redo_buffer().is_empty());
    assert_eq!(*events.borrow(), vec![SketchEvent::DrawingChanged]);
}

#[test]
fn test_undo_redo_round_trip_restores_log() {
    let mut pad = Sketchpad::default();
    for i in 0..4 {
        let offset = i as f32 * 10.0;
        draw(&mut pad, &[(offset, 0.0), (offset, 20.0)]);
    }
    pad.set_stamp_symbol("🌮").unwrap();
    pad.pointer_down(Pos2::new(50.0, 50.0));
    pad.pointer_up(Pos2::new(50.0, 50.0));

    let before = pad.history().snapshot();
    for n in 0..=before.len() {
        for _ in 0..n {
            pad.undo();
        }
        for _ in 0..n {
            pad.redo();
        }
        assert!(same_items(pad.history().committed(), &before));
    }
}

#[test]
fn test_new_input_discards_redo() {
    let mut pad = Sketchpad::default();
    draw(&mut pad, &[(0.0, 0.0), (5.0, 5.0)]);
    draw(&mut pad, &[(10.0, 0.0), (15.0, 5.0)]);
    pad.undo();
    assert_eq!(pad.history().redo_buffer().len(), 1);

    // Beginning a stroke already invalidates forward history
    pad.pointer_down(Pos2::new(40.0, 40.0));
    assert!(pad.history().redo_buffer().is_empty());
    pad.pointer_up(Pos2::new(40.0, 40.0));

    pad.undo();
    assert_eq!(pad.history().redo_buffer().len(), 1);

    // So does placing a sticker
    pad.set_stamp_symbol("🐸").unwrap();
    pad.pointer_down(Pos2::new(1.0, 1.0));
    assert!(pad.history().redo_buffer().is_empty());
    assert!(!pad.redo());
}

#[test]
fn test_empty_history_operations_are_silent() {
    let mut pad = Sketchpad::default();
    let events = record_events(&pad);

    assert!(!pad.undo());
    assert!(!pad.redo());
    assert!(events.borrow().is_empty());
}
