//! Property-based invariant tests for the overlay engine.
//!
//! Verifies:
//! 1. Tick monotonicity: a running countdown loses exactly one second per tick and stops at 0
//! 2. Duration clamp: any integer input is stored as clamp(1, 3600, x)
//! 3. Drag containment: every drag step keeps the whole element inside the container
//! 4. Resize floor: no resize produces a box below 100x50
//! 5. Style merge purity: a font-size patch leaves the other fields alone
//! 6. Duration input: any number snaps to a 5-second step inside 5..=3600

use countdown_overlay::{
    api::{commands::DURATION_STEP_SECONDS, quantize_duration_input, Command},
    overlay::{
        fit_font,
        interaction::{drag_to, resize_to},
        FontBounds, GestureAnchor, Point, Rect, ResizeDirection, Size, MIN_ELEMENT_SIZE,
    },
    state::{
        StylePatch, TickOutcome, TimerPhase, TimerSession, TimerStyle, MAX_DURATION_SECONDS,
        MIN_DURATION_SECONDS,
    },
};
use proptest::prelude::*;

const EPSILON: f64 = 1e-9;

// ── Strategy helpers ──────────────────────────────────────────────────

fn arb_direction() -> impl Strategy<Value = ResizeDirection> {
    (0usize..ResizeDirection::ALL.len()).prop_map(|i| ResizeDirection::ALL[i])
}

fn arb_container() -> impl Strategy<Value = Size> {
    (200.0f64..2000.0, 120.0f64..1200.0).prop_map(|(w, h)| Size::new(w, h))
}

/// A container plus an element that fits inside it
fn arb_placed_element() -> impl Strategy<Value = (Size, Rect)> {
    arb_container().prop_flat_map(|container| {
        (
            Just(container),
            MIN_ELEMENT_SIZE.width..container.width,
            MIN_ELEMENT_SIZE.height..container.height,
        )
            .prop_flat_map(|(container, w, h)| {
                (
                    Just(container),
                    Just(w),
                    Just(h),
                    0.0..=(container.width - w),
                    0.0..=(container.height - h),
                )
            })
            .prop_map(|(container, w, h, x, y)| (container, Rect::new(x, y, w, h)))
    })
}

fn arb_pointer() -> impl Strategy<Value = Point> {
    (-5000.0f64..5000.0, -5000.0f64..5000.0).prop_map(|(x, y)| Point::new(x, y))
}

fn anchor(element: Rect) -> GestureAnchor {
    GestureAnchor {
        pointer_start: element.center(),
        element_start: element,
        font_start: fit_font(element.size(), FontBounds::DEFAULT),
    }
}

fn inside(rect: Rect, container: Size) -> bool {
    rect.x >= -EPSILON
        && rect.y >= -EPSILON
        && rect.right() <= container.width + EPSILON
        && rect.bottom() <= container.height + EPSILON
}

proptest! {
    #[test]
    fn tick_decrements_by_exactly_one(duration in 1i64..=3600, ticks in 0usize..4000) {
        let mut session = TimerSession::new(duration);
        prop_assert!(session.play());
        for _ in 0..ticks {
            let before = session.remaining_seconds();
            let was_running = session.is_running();
            let outcome = session.tick();
            if was_running {
                prop_assert_eq!(session.remaining_seconds(), before.saturating_sub(1));
            } else {
                prop_assert_eq!(outcome, TickOutcome::Ignored);
                prop_assert_eq!(session.remaining_seconds(), before);
            }
            if session.remaining_seconds() == 0 {
                prop_assert!(!session.is_running());
                prop_assert_eq!(session.phase(), TimerPhase::Completed);
            }
        }
    }

    #[test]
    fn duration_is_clamped(input in any::<i64>()) {
        let mut session = TimerSession::default();
        let stored = session.set_duration(input);
        let expected = input.clamp(MIN_DURATION_SECONDS as i64, MAX_DURATION_SECONDS as i64) as u32;
        prop_assert_eq!(stored, expected);
        prop_assert_eq!(session.duration_seconds(), expected);
        prop_assert_eq!(session.remaining_seconds(), expected);
    }

    #[test]
    fn drag_keeps_element_inside(
        (container, element) in arb_placed_element(),
        path in prop::collection::vec(arb_pointer(), 1..20),
    ) {
        let anchor = anchor(element);
        for pointer in path {
            let rect = drag_to(&anchor, pointer, container);
            prop_assert!(inside(rect, container), "{:?} escapes {:?}", rect, container);
            prop_assert_eq!(rect.size(), element.size());
        }
    }

    #[test]
    fn resize_never_collapses(
        (container, element) in arb_placed_element(),
        direction in arb_direction(),
        pointer in arb_pointer(),
    ) {
        let rect = resize_to(&anchor(element), direction, pointer, container);
        prop_assert!(rect.width >= MIN_ELEMENT_SIZE.width);
        prop_assert!(rect.height >= MIN_ELEMENT_SIZE.height);
        prop_assert!(inside(rect, container), "{:?} escapes {:?}", rect, container);
    }

    #[test]
    fn font_patch_only_touches_font(
        font in 0u32..400,
        family in "[A-Za-z ]{1,24}",
        opacity in 0u8..=100,
    ) {
        let style = TimerStyle {
            font_size_px: 48,
            font_family: family.clone(),
            background_opacity_percent: opacity,
        };
        let merged = style.merge(&StylePatch::font_size(font));
        prop_assert_eq!(merged.font_family, family);
        prop_assert_eq!(merged.background_opacity_percent, opacity);
        prop_assert_eq!(merged.font_size_px, FontBounds::DEFAULT.clamp(font as i64));
    }
}

proptest! {
    #[test]
    fn duration_input_snaps_inside_the_control_range(input in any::<i64>()) {
        let snapped = quantize_duration_input(input);
        prop_assert!((DURATION_STEP_SECONDS..=MAX_DURATION_SECONDS as i64).contains(&snapped));
        prop_assert_eq!(snapped % DURATION_STEP_SECONDS, 0);
    }

    #[test]
    fn duration_command_never_fails_on_finite_numbers(input in any::<f64>().prop_filter("finite", |n| n.is_finite())) {
        let command = Command::parse(&format!("duration {}", input));
        prop_assert!(
            matches!(command, Ok(Command::Duration(d)) if (DURATION_STEP_SECONDS..=MAX_DURATION_SECONDS as i64).contains(&d)),
            "{:?}",
            command
        );
    }
}
