use std::{sync::Arc, thread};

use presize_engine::{
    Context, Display, Placer, Point, Preset, Rect, RequestQueue, Size,
    testing::{FakeDisplays, FakeWindow, PortCall, StaticExclusions, StaticPermission},
};

fn laptop() -> Display {
    let frame = Rect::new(0.0, 0.0, 1440.0, 900.0);
    Display::new(1, frame, Rect::new(0.0, 0.0, 1440.0, 875.0), true)
}

fn external_right() -> Display {
    let frame = Rect::new(1440.0, -300.0, 2560.0, 1440.0);
    Display::new(2, frame, Rect::new(1440.0, -300.0, 2560.0, 1415.0), false)
}

#[test]
fn hotkey_thread_requests_are_applied_in_order() {
    let win = FakeWindow::new(Point::new(1600.0, 200.0), Size::new(800.0, 600.0));
    let displays = Arc::new(FakeDisplays::new(vec![laptop(), external_right()]));
    let placer = Placer::new(Context::new(
        win.clone(),
        displays,
        Arc::new(StaticPermission(true)),
        Arc::new(StaticExclusions::default()),
    ));
    let (tx, queue) = RequestQueue::new();

    let producer = thread::spawn(move || {
        for preset in [Preset::ReasonableSize, Preset::Larger, Preset::Taller] {
            assert!(tx.apply(preset));
        }
        assert!(tx.shutdown());
    });
    let applied = queue.run(&placer);
    producer.join().expect("producer thread");

    assert_eq!(applied, 3);
    let sets: Vec<Size> = win
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            PortCall::SetGeometry { size, .. } => Some(size),
            _ => None,
        })
        .collect();
    assert_eq!(sets.len(), 3);
    // ReasonableSize on the 2560x1415 external caps to 1024x849.
    assert!(sets[0].approx_eq(&Size::new(1024.0, 849.0), 1e-9), "{:?}", sets[0]);
    // Larger grows by 256; Taller grows by 141.5.
    assert!(sets[1].approx_eq(&Size::new(1280.0, 849.0), 1e-9), "{:?}", sets[1]);
    assert!(sets[2].approx_eq(&Size::new(1280.0, 990.5), 1e-9), "{:?}", sets[2]);
}

#[test]
fn display_list_is_read_fresh_for_each_request() {
    let win = FakeWindow::new(Point::new(1600.0, 200.0), Size::new(800.0, 600.0));
    let displays = Arc::new(FakeDisplays::new(vec![laptop(), external_right()]));
    let placer = Placer::new(Context::new(
        win.clone(),
        displays.clone(),
        Arc::new(StaticPermission(true)),
        Arc::new(StaticExclusions::default()),
    ));
    let (tx, queue) = RequestQueue::new();

    tx.apply(Preset::Center);
    assert_eq!(queue.drain(&placer), 1);
    let on_external = win.frame().expect("frame");
    assert!(on_external.x >= 1440.0, "{on_external:?}");

    // External unplugged: the window is now off-screen and should be pulled
    // back onto the laptop display.
    displays.set(vec![laptop()]);
    tx.apply(Preset::Center);
    assert_eq!(queue.drain(&placer), 1);
    let on_laptop = win.frame().expect("frame");
    assert!(on_laptop.x + on_laptop.w <= 1440.0 + 1e-9, "{on_laptop:?}");
    assert!(on_laptop.y >= 25.0 - 1e-9, "{on_laptop:?}");
}
