//! Property tests for the resolver, coordinate laws and the locator.
use proptest::prelude::*;

use crate::{
    coords::{ax_to_cocoa, centered_origin, cocoa_to_ax, rect_to_ax},
    display::{Display, locate},
    geom::{Ax, Cocoa, Point, Rect, Size},
    preset::{MAX_FRACTION, MIN_HEIGHT, MIN_WIDTH, Preset, resolve},
};

const EPS: f64 = 1e-6;

fn usable_strategy() -> impl Strategy<Value = Size> {
    (1.0f64..8000.0, 1.0f64..5000.0).prop_map(|(w, h)| Size::new(w, h))
}

fn preset_strategy() -> impl Strategy<Value = Preset> {
    prop::sample::select(Preset::ALL.to_vec())
}

fn cocoa_rect_strategy() -> impl Strategy<Value = Rect<Cocoa>> {
    (
        -5000.0f64..5000.0,
        -3000.0f64..3000.0,
        1.0f64..4000.0,
        1.0f64..3000.0,
    )
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

proptest! {
    #[test]
    fn resolved_sizes_fit_usable_area(
        preset in preset_strategy(),
        usable in usable_strategy(),
        fw in 0.0f64..1.0,
        fh in 0.0f64..1.0,
    ) {
        let current = Size::new(fw * usable.width, fh * usable.height);
        let got = resolve(preset, Some(current), usable).expect("resolve");
        prop_assert!(got.width >= 0.0 && got.width <= usable.width + EPS);
        prop_assert!(got.height >= 0.0 && got.height <= usable.height + EPS);
    }

    #[test]
    fn width_nudges_are_monotonic_and_clamped(
        usable in usable_strategy(),
        fw in 0.0f64..1.0,
        h in 1.0f64..500.0,
    ) {
        let cur = Size::new(fw * usable.width, h.min(usable.height));
        let larger = resolve(Preset::Larger, Some(cur), usable).expect("larger");
        let smaller = resolve(Preset::Smaller, Some(cur), usable).expect("smaller");
        prop_assert!(larger.width >= cur.width);
        prop_assert!(larger.width <= (MAX_FRACTION * usable.width).max(cur.width) + EPS);
        prop_assert!(smaller.width <= cur.width);
        prop_assert!(smaller.width >= MIN_WIDTH.min(cur.width) - EPS);
        prop_assert_eq!(larger.height, cur.height);
        prop_assert_eq!(smaller.height, cur.height);
    }

    #[test]
    fn height_nudges_are_monotonic_and_clamped(
        usable in usable_strategy(),
        fh in 0.0f64..1.0,
        w in 1.0f64..500.0,
    ) {
        let cur = Size::new(w.min(usable.width), fh * usable.height);
        let taller = resolve(Preset::Taller, Some(cur), usable).expect("taller");
        let shorter = resolve(Preset::Shorter, Some(cur), usable).expect("shorter");
        prop_assert!(taller.height >= cur.height);
        prop_assert!(taller.height <= (MAX_FRACTION * usable.height).max(cur.height) + EPS);
        prop_assert!(shorter.height <= cur.height);
        prop_assert!(shorter.height >= MIN_HEIGHT.min(cur.height) - EPS);
        prop_assert_eq!(taller.width, cur.width);
        prop_assert_eq!(shorter.width, cur.width);
    }

    #[test]
    fn ax_cocoa_round_trip(
        x in -10_000.0f64..10_000.0,
        y in -10_000.0f64..10_000.0,
        primary_h in 100.0f64..5000.0,
    ) {
        let p = Point::<Ax>::new(x, y);
        let back = cocoa_to_ax(ax_to_cocoa(p, primary_h), primary_h);
        prop_assert!(back.approx_eq(&p, EPS), "{:?} -> {:?}", p, back);
    }

    #[test]
    fn full_size_centers_onto_usable_top_left(
        usable in cocoa_rect_strategy(),
        primary_h in 100.0f64..5000.0,
    ) {
        let origin = centered_origin(usable.size(), &usable, primary_h);
        let want = rect_to_ax(&usable, primary_h).origin();
        prop_assert!(origin.approx_eq(&want, EPS), "{:?} vs {:?}", origin, want);
    }

    #[test]
    fn centered_window_stays_centered(
        usable in cocoa_rect_strategy(),
        fw in 0.0f64..1.0,
        fh in 0.0f64..1.0,
        primary_h in 100.0f64..5000.0,
    ) {
        let size = Size::new(fw * usable.w, fh * usable.h);
        let origin = centered_origin(size, &usable, primary_h);
        let usable_ax = rect_to_ax(&usable, primary_h);
        let placed = Rect::<Ax>::from_parts(origin, size);
        prop_assert!(placed.center().approx_eq(&usable_ax.center(), EPS));
    }

    #[test]
    fn point_inside_single_display_selects_it(
        fx in 0.01f64..0.99,
        fy in 0.01f64..0.99,
        idx in 0usize..3,
    ) {
        // Three side-by-side displays of different heights, bottom-aligned.
        let frames = [
            Rect::<Cocoa>::new(0.0, 0.0, 1920.0, 1080.0),
            Rect::<Cocoa>::new(1920.0, 0.0, 1280.0, 800.0),
            Rect::<Cocoa>::new(-2560.0, 0.0, 2560.0, 1440.0),
        ];
        let displays: Vec<Display> = frames
            .iter()
            .enumerate()
            .map(|(i, f)| Display::new(i as u32, *f, *f, i == 0))
            .collect();
        let f = frames[idx];
        let cocoa = Point::<Cocoa>::new(f.x + fx * f.w, f.y + fy * f.h);
        let ax = cocoa_to_ax(cocoa, 1080.0);
        let got = locate(Some(ax), &displays).expect("display");
        prop_assert_eq!(got.id, idx as u32);
    }

    #[test]
    fn point_outside_all_displays_selects_nearest_center(
        x in -20_000.0f64..20_000.0,
        y in -20_000.0f64..20_000.0,
    ) {
        let frames = [
            Rect::<Cocoa>::new(0.0, 0.0, 1920.0, 1080.0),
            Rect::<Cocoa>::new(1920.0, 200.0, 1280.0, 800.0),
        ];
        let displays: Vec<Display> = frames
            .iter()
            .enumerate()
            .map(|(i, f)| Display::new(i as u32, *f, *f, i == 0))
            .collect();
        let cocoa = Point::<Cocoa>::new(x, y);
        prop_assume!(frames.iter().all(|f| !f.contains(cocoa)));
        let got = locate(Some(cocoa_to_ax(cocoa, 1080.0)), &displays).expect("display");
        let d0 = cocoa.distance(&frames[0].center());
        let d1 = cocoa.distance(&frames[1].center());
        let want = if d1 < d0 { 1 } else { 0 };
        prop_assert_eq!(got.id, want);
    }
}
