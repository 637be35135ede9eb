use image::{Rgba, RgbaImage};
use raster_paint::{Canvas, CanvasEvent, DevicePoint, PaintSettings, RasterPoint, Shape, Tool};

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

// Helper to create a canvas that already has a raster
fn sized_canvas(width: u32, height: u32) -> Canvas {
    let mut canvas = Canvas::default();
    canvas.ensure_size(width, height);
    canvas
}

fn at(x: f32, y: f32) -> DevicePoint {
    DevicePoint::new(x, y)
}

fn drag(canvas: &mut Canvas, from: (f32, f32), to: (f32, f32)) {
    canvas.handle_event(CanvasEvent::PointerDown(at(from.0, from.1)));
    canvas.handle_event(CanvasEvent::PointerMove(at(to.0, to.1)));
    canvas.handle_event(CanvasEvent::PointerUp(at(to.0, to.1)));
}

fn pixels(canvas: &Canvas) -> RgbaImage {
    canvas.raster().unwrap().snapshot()
}

fn pixel(canvas: &Canvas, x: i32, y: i32) -> Rgba<u8> {
    canvas.raster().unwrap().pixel(x, y).unwrap()
}

// Strokes are anti-aliased, so the default black ink only has to dominate the pixel
fn is_inked(pixel: Rgba<u8>) -> bool {
    pixel[0] < 128 && pixel[3] == 255
}

#[test]
fn test_raster_created_lazily_with_background() {
    let mut canvas = Canvas::default();
    assert!(!canvas.is_initialized());
    assert!(canvas.compose().is_none());

    canvas.ensure_size(64, 32);
    assert_eq!(canvas.size(), Some((64, 32)));
    assert!(pixels(&canvas).pixels().all(|p| *p == WHITE));
    assert!(!canvas.can_undo());
}

#[test]
fn test_pointer_before_sizing_is_ignored() {
    let mut canvas = Canvas::default();
    canvas.handle_event(CanvasEvent::PointerDown(at(5.0, 5.0)));
    assert!(!canvas.is_drawing());
}

#[test]
fn test_freehand_dab_lands_immediately() {
    let mut canvas = sized_canvas(40, 40);
    canvas.handle_event(CanvasEvent::PointerDown(at(10.0, 10.0)));

    assert!(canvas.is_drawing());
    assert!(is_inked(pixel(&canvas, 10, 10)));
    // Nothing is committed until release
    assert_eq!(canvas.changes_made(), 0);
}

#[test]
fn test_freehand_stroke_commits_on_release() {
    let mut canvas = sized_canvas(60, 40);
    canvas.handle_event(CanvasEvent::PointerDown(at(5.0, 20.0)));
    canvas.handle_event(CanvasEvent::PointerMove(at(30.0, 20.0)));
    assert!(is_inked(pixel(&canvas, 18, 20)));

    canvas.handle_event(CanvasEvent::PointerMove(at(50.0, 20.0)));
    canvas.handle_event(CanvasEvent::PointerUp(at(50.0, 20.0)));

    assert!(!canvas.is_drawing());
    assert!(is_inked(pixel(&canvas, 40, 20)));
    assert_eq!(pixel(&canvas, 40, 30), WHITE);
    assert_eq!(canvas.changes_made(), 1);
    assert!(!canvas.can_redo());
}

#[test]
fn test_zoom_maps_device_to_raster_coordinates() {
    let mut canvas = sized_canvas(40, 40);
    canvas.set_zoom(2.0);
    assert_eq!(canvas.to_raster_point(at(21.0, 9.0)), RasterPoint::new(10, 4));

    canvas.handle_event(CanvasEvent::PointerDown(at(60.0, 60.0)));
    canvas.handle_event(CanvasEvent::PointerUp(at(60.0, 60.0)));
    assert!(is_inked(pixel(&canvas, 30, 30)));
    assert_eq!(pixel(&canvas, 20, 20), WHITE);
}

#[test]
fn test_huge_device_coordinates_saturate() {
    let mut canvas = sized_canvas(40, 40);
    assert_eq!(
        canvas.to_raster_point(at(f32::MAX, -f32::MAX)),
        RasterPoint::new(i32::MAX, i32::MIN)
    );
    assert_eq!(canvas.to_raster_point(at(f32::NAN, f32::INFINITY)), RasterPoint::new(0, i32::MAX));

    canvas.handle_event(CanvasEvent::PointerDown(at(f32::MAX, f32::MAX)));
    canvas.handle_event(CanvasEvent::PointerMove(at(-f32::MAX, 20.0)));
    canvas.handle_event(CanvasEvent::PointerUp(at(1.0e30, -1.0e30)));
    assert_eq!(canvas.size(), Some((40, 40)));
    assert_eq!(canvas.changes_made(), 1);

    for tool in [Tool::Rectangle, Tool::Oval, Tool::Triangle] {
        canvas.set_tool(tool);
        drag(&mut canvas, (-f32::MAX, -f32::MAX), (f32::MAX, f32::MAX));
    }
    assert_eq!(canvas.changes_made(), 4);
}

#[test]
fn test_zoom_is_clamped() {
    let mut canvas = Canvas::default();
    canvas.set_zoom(10.0);
    assert_eq!(canvas.zoom(), 2.0);
    canvas.set_zoom(0.1);
    assert_eq!(canvas.zoom(), 0.5);
}

#[test]
fn test_rectangle_commit() {
    let mut canvas = sized_canvas(80, 60);
    canvas.set_tool(Tool::Rectangle);
    canvas.set_brush_size(2);
    drag(&mut canvas, (10.0, 10.0), (50.0, 30.0));

    // All four edges of the 40x20 box
    assert!(is_inked(pixel(&canvas, 30, 10)));
    assert!(is_inked(pixel(&canvas, 30, 30)));
    assert!(is_inked(pixel(&canvas, 10, 20)));
    assert!(is_inked(pixel(&canvas, 50, 20)));
    // Outline only, nothing outside
    assert_eq!(pixel(&canvas, 30, 20), WHITE);
    assert_eq!(pixel(&canvas, 5, 5), WHITE);
    assert_eq!(pixel(&canvas, 55, 35), WHITE);
    assert_eq!(canvas.changes_made(), 1);
}

#[test]
fn test_line_commit_is_antialiased() {
    let mut canvas = sized_canvas(40, 40);
    canvas.set_tool(Tool::Line);
    canvas.set_brush_size(3);
    drag(&mut canvas, (2.0, 5.0), (37.0, 30.0));

    let raster = pixels(&canvas);
    let solid = raster.pixels().filter(|p| p[0] == 0).count();
    let partial = raster.pixels().filter(|p| p[0] > 0 && p[0] < 255).count();
    assert!(solid > 0);
    assert!(partial > 0);
    assert_eq!(canvas.changes_made(), 1);
}

#[test]
fn test_triangle_commit() {
    let mut canvas = sized_canvas(40, 60);
    canvas.set_tool(Tool::Triangle);
    canvas.set_brush_size(2);
    drag(&mut canvas, (0.0, 0.0), (20.0, 40.0));

    assert!(is_inked(pixel(&canvas, 10, 0)));
    assert!(is_inked(pixel(&canvas, 0, 40)));
    assert!(is_inked(pixel(&canvas, 20, 40)));
    assert!(is_inked(pixel(&canvas, 10, 40)));
    assert_eq!(pixel(&canvas, 10, 30), WHITE);
    assert_eq!(pixel(&canvas, 30, 10), WHITE);
}

#[test]
fn test_oval_commit_touches_box_edges() {
    let mut canvas = sized_canvas(60, 60);
    canvas.set_tool(Tool::Oval);
    canvas.set_brush_size(2);
    drag(&mut canvas, (10.0, 10.0), (50.0, 30.0));

    assert!(is_inked(pixel(&canvas, 30, 10)));
    assert!(is_inked(pixel(&canvas, 10, 20)));
    assert!(is_inked(pixel(&canvas, 50, 20)));
    // Corners of the bounding box stay clear
    assert_eq!(pixel(&canvas, 10, 10), WHITE);
    assert_eq!(pixel(&canvas, 30, 20), WHITE);
}

#[test]
fn test_shape_preview_does_not_touch_raster() {
    let mut canvas = sized_canvas(60, 40);
    canvas.set_tool(Tool::Line);
    let before = pixels(&canvas);

    canvas.handle_event(CanvasEvent::PointerDown(at(5.0, 5.0)));
    canvas.handle_event(CanvasEvent::PointerMove(at(40.0, 5.0)));

    assert_eq!(pixels(&canvas), before);
    assert_eq!(
        canvas.pending_shape(),
        Some(Shape::Line {
            from: RasterPoint::new(5, 5),
            to: RasterPoint::new(40, 5),
        })
    );
    let composed = canvas.compose().unwrap();
    assert!(is_inked(*composed.get_pixel(20, 5)));
}

#[test]
fn test_cancel_shape_leaves_no_residue() {
    let mut canvas = sized_canvas(60, 40);
    canvas.set_tool(Tool::Rectangle);
    let before = pixels(&canvas);

    canvas.handle_event(CanvasEvent::PointerDown(at(5.0, 5.0)));
    canvas.handle_event(CanvasEvent::PointerMove(at(40.0, 30.0)));
    canvas.handle_event(CanvasEvent::PointerCancel);

    assert!(!canvas.is_drawing());
    assert!(canvas.pending_shape().is_none());
    assert_eq!(pixels(&canvas), before);
    assert_eq!(canvas.changes_made(), 0);

    // A stray release after the cancel commits nothing
    canvas.handle_event(CanvasEvent::PointerUp(at(40.0, 30.0)));
    assert_eq!(canvas.changes_made(), 0);
}

#[test]
fn test_cancel_freehand_restores_last_commit() {
    let mut canvas = sized_canvas(40, 40);
    let before = pixels(&canvas);

    canvas.handle_event(CanvasEvent::PointerDown(at(5.0, 5.0)));
    canvas.handle_event(CanvasEvent::PointerMove(at(30.0, 30.0)));
    assert_ne!(pixels(&canvas), before);

    canvas.handle_event(CanvasEvent::PointerCancel);
    assert_eq!(pixels(&canvas), before);
}

#[test]
fn test_tool_is_latched_for_the_gesture() {
    let mut canvas = sized_canvas(60, 40);
    canvas.set_tool(Tool::Line);
    canvas.handle_event(CanvasEvent::PointerDown(at(5.0, 20.0)));
    canvas.set_tool(Tool::Freehand);
    canvas.handle_event(CanvasEvent::PointerMove(at(50.0, 20.0)));

    // Still a line preview, not a freehand stroke
    assert_eq!(pixel(&canvas, 25, 20), WHITE);
    canvas.handle_event(CanvasEvent::PointerUp(at(50.0, 20.0)));
    assert!(is_inked(pixel(&canvas, 25, 20)));
    assert_eq!(canvas.tool(), Tool::Freehand);
}

#[test]
fn test_commits_then_undos_restore_initial_raster() {
    let mut canvas = sized_canvas(120, 60);
    let initial = pixels(&canvas);
    let capacity = canvas.history().capacity();

    for i in 0..capacity {
        let x = (i * 4) as f32 + 5.0;
        drag(&mut canvas, (x, 10.0), (x, 50.0));
    }
    assert_eq!(canvas.changes_made(), capacity);
    assert_ne!(pixels(&canvas), initial);

    for _ in 0..capacity {
        assert!(canvas.undo());
    }
    assert_eq!(pixels(&canvas), initial);
    assert!(!canvas.undo());
}

#[test]
fn test_undo_then_redo_is_identity() {
    let mut canvas = sized_canvas(60, 40);
    drag(&mut canvas, (5.0, 5.0), (30.0, 30.0));
    canvas.set_tool(Tool::Oval);
    drag(&mut canvas, (10.0, 10.0), (50.0, 35.0));
    let after = pixels(&canvas);

    assert!(canvas.undo());
    assert_ne!(pixels(&canvas), after);
    assert!(canvas.redo());
    assert_eq!(pixels(&canvas), after);
    assert_eq!(canvas.changes_made(), 2);
    assert_eq!(canvas.changes_reverted(), 0);
}

#[test]
fn test_redo_disabled_after_fresh_commit() {
    let mut canvas = sized_canvas(60, 40);
    drag(&mut canvas, (5.0, 5.0), (30.0, 5.0));
    drag(&mut canvas, (5.0, 15.0), (30.0, 15.0));
    assert!(canvas.undo());
    assert!(canvas.undo());
    assert!(canvas.can_redo());

    drag(&mut canvas, (5.0, 30.0), (30.0, 30.0));
    assert!(!canvas.can_redo());
    let after = pixels(&canvas);
    assert!(!canvas.redo());
    assert_eq!(pixels(&canvas), after);
}

#[test]
fn test_undo_with_nothing_to_undo_is_noop() {
    let mut canvas = sized_canvas(20, 20);
    let before = pixels(&canvas);
    assert!(!canvas.undo());
    assert!(!canvas.redo());
    assert_eq!(pixels(&canvas), before);
}

#[test]
fn test_history_capacity_from_settings() {
    let settings = PaintSettings {
        history_capacity: 2,
        ..Default::default()
    };
    let mut canvas = Canvas::new(&settings);
    canvas.ensure_size(60, 40);

    for y in [5.0, 15.0, 25.0] {
        drag(&mut canvas, (5.0, y), (50.0, y));
    }
    assert_eq!(canvas.changes_made(), 2);
    assert!(canvas.undo());
    assert!(canvas.undo());
    assert!(!canvas.undo());
    // The oldest stroke was evicted and stays on the canvas
    assert!(is_inked(pixel(&canvas, 25, 5)));
    assert_eq!(pixel(&canvas, 25, 15), WHITE);
}

#[test]
fn test_resize_preserves_content_and_history() {
    let mut canvas = sized_canvas(40, 40);
    drag(&mut canvas, (10.0, 10.0), (10.0, 10.0));
    let revision = canvas.revision();

    canvas.ensure_size(80, 20);
    assert_eq!(canvas.size(), Some((80, 20)));
    assert!(canvas.revision() > revision);
    assert!(is_inked(pixel(&canvas, 10, 10)));
    assert_eq!(pixel(&canvas, 70, 10), WHITE);
    assert_eq!(canvas.changes_made(), 1);

    // Undo restores the base snapshot at the new size
    assert!(canvas.undo());
    assert_eq!(canvas.size(), Some((80, 20)));
    assert_eq!(pixel(&canvas, 10, 10), WHITE);
}

#[test]
fn test_new_image_clears_and_resets_history() {
    let mut canvas = sized_canvas(40, 40);
    drag(&mut canvas, (10.0, 10.0), (30.0, 30.0));
    canvas.new_image();

    assert!(pixels(&canvas).pixels().all(|p| *p == WHITE));
    assert!(!canvas.can_undo());
    assert!(!canvas.can_redo());
}

#[test]
fn test_replace_image_fits_and_resets_history() {
    let mut canvas = sized_canvas(100, 100);
    drag(&mut canvas, (90.0, 90.0), (95.0, 95.0));

    let loaded = RgbaImage::from_pixel(400, 200, Rgba([0, 0, 255, 255]));
    canvas.replace_image(&loaded).unwrap();

    assert_eq!(canvas.size(), Some((100, 100)));
    assert_eq!(pixel(&canvas, 50, 25), Rgba([0, 0, 255, 255]));
    assert_eq!(pixel(&canvas, 50, 75), WHITE);
    assert_eq!(pixel(&canvas, 92, 92), WHITE);
    assert!(!canvas.can_undo());
}

#[test]
fn test_replace_image_within_clamps_bounds_to_raster() {
    let mut canvas = sized_canvas(100, 100);
    let loaded = RgbaImage::from_pixel(400, 400, Rgba([0, 0, 255, 255]));

    canvas.replace_image_within(&loaded, (50, 1000)).unwrap();
    assert_eq!(canvas.size(), Some((100, 100)));
    assert_eq!(pixel(&canvas, 25, 25), Rgba([0, 0, 255, 255]));
    assert_eq!(pixel(&canvas, 75, 25), WHITE);

    canvas.replace_image_within(&loaded, (1000, 1000)).unwrap();
    assert_eq!(pixel(&canvas, 99, 99), Rgba([0, 0, 255, 255]));
}

#[test]
fn test_brush_settings_are_clamped() {
    let mut canvas = Canvas::default();
    canvas.set_brush_size(100);
    assert_eq!(canvas.brush_size(), 18);
    canvas.set_brush_size(0);
    assert_eq!(canvas.brush_size(), 2);

    canvas.set_color(Rgba([10, 20, 30, 255]));
    assert_eq!(canvas.settings().color, [10, 20, 30, 255]);
}
