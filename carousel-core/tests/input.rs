use carousel_core::testing::{Harness, mount};
use carousel_core::{CarouselOptions, Disposition, InputEvent};

fn autoplaying() -> CarouselOptions {
    CarouselOptions::default()
}

fn swipe(h: &mut Harness, dx: f32, dy: f32) -> Disposition {
    h.carousel
        .handle_input(InputEvent::PointerDown { x: 200.0, y: 100.0 });
    h.carousel.handle_input(InputEvent::PointerMove {
        x: 200.0 + dx / 2.0,
        y: 100.0 + dy / 2.0,
    });
    h.carousel.handle_input(InputEvent::PointerUp {
        x: 200.0 + dx,
        y: 100.0 + dy,
    })
}

#[test]
fn leftward_swipe_advances_exactly_once() {
    let mut h = Harness::with_slides(4);

    h.carousel
        .handle_input(InputEvent::PointerDown { x: 200.0, y: 100.0 });
    assert_eq!(
        h.carousel
            .handle_input(InputEvent::PointerMove { x: 150.0, y: 105.0 }),
        Disposition::PreventDefault
    );
    assert_eq!(
        h.carousel
            .handle_input(InputEvent::PointerUp { x: 120.0, y: 110.0 }),
        Disposition::Handled
    );

    assert_eq!(h.events.before_changes(), 1);
    h.settle();
    assert_eq!(h.carousel.current_slide(), 1);
    assert_eq!(h.events.changes(), 1);
}

#[test]
fn rightward_swipe_goes_back() {
    let mut h = Harness::with_slides(4);
    swipe(&mut h, 90.0, 0.0);
    h.settle();
    assert_eq!(h.carousel.current_slide(), 3);
}

#[test]
fn short_swipe_is_discarded() {
    let mut h = Harness::with_slides(4);
    assert_eq!(swipe(&mut h, 20.0, 0.0), Disposition::Handled);
    assert_eq!(h.events.before_changes(), 0);
    assert!(!h.carousel.is_in_transition());
}

#[test]
fn vertical_drag_scrolls_the_page() {
    let mut h = Harness::with_slides(4);
    h.carousel
        .handle_input(InputEvent::PointerDown { x: 200.0, y: 100.0 });
    assert_eq!(
        h.carousel
            .handle_input(InputEvent::PointerMove { x: 190.0, y: 160.0 }),
        Disposition::Handled
    );
    h.carousel
        .handle_input(InputEvent::PointerUp { x: 140.0, y: 200.0 });
    assert_eq!(h.events.before_changes(), 0);
}

#[test]
fn cancelled_gesture_never_navigates() {
    let mut h = Harness::with_slides(4);
    h.carousel
        .handle_input(InputEvent::PointerDown { x: 200.0, y: 100.0 });
    assert_eq!(
        h.carousel.handle_input(InputEvent::PointerCancel),
        Disposition::Handled
    );
    assert_eq!(
        h.carousel
            .handle_input(InputEvent::PointerUp { x: 100.0, y: 100.0 }),
        Disposition::Ignored
    );
    assert_eq!(h.events.before_changes(), 0);
}

#[test]
fn swipe_disabled_leaves_pointer_events_alone() {
    let options = CarouselOptions {
        swipe_enabled: false,
        auto_play: false,
        ..CarouselOptions::default()
    };
    let mut h = Harness::new(mount(4), options);
    assert_eq!(swipe(&mut h, -120.0, 0.0), Disposition::Ignored);
    assert_eq!(h.events.before_changes(), 0);
}

#[test]
fn swipe_during_transition_is_dropped() {
    let mut h = Harness::with_slides(4);
    assert!(h.carousel.next_slide());
    swipe(&mut h, -120.0, 0.0);
    h.settle();
    assert_eq!(h.carousel.current_slide(), 1);
    assert_eq!(h.events.before_changes(), 1);
}

#[test]
fn gesture_pauses_autoplay_until_it_ends() {
    let mut h = Harness::new(mount(4), autoplaying());
    assert!(h.carousel.is_autoplaying());

    h.carousel
        .handle_input(InputEvent::PointerDown { x: 200.0, y: 100.0 });
    assert!(!h.carousel.is_autoplaying());

    h.advance_ms(6000);
    assert_eq!(h.events.before_changes(), 0);

    h.carousel
        .handle_input(InputEvent::PointerUp { x: 205.0, y: 100.0 });
    assert!(h.carousel.is_autoplaying());
}

#[test]
fn gesture_end_stops_autoplay_when_resume_is_off() {
    let options = CarouselOptions {
        resume_after_interaction: false,
        ..autoplaying()
    };
    let mut h = Harness::new(mount(4), options);
    swipe(&mut h, -80.0, 0.0);
    assert!(!h.carousel.is_autoplaying());

    // leaving hover does not bring it back either
    h.carousel.handle_input(InputEvent::PointerEnter);
    h.carousel.handle_input(InputEvent::PointerLeave);
    assert!(!h.carousel.is_autoplaying());
}

#[test]
fn hover_pauses_and_resumes_autoplay() {
    let mut h = Harness::new(mount(4), autoplaying());

    h.advance_ms(3000);
    assert_eq!(
        h.carousel.handle_input(InputEvent::PointerEnter),
        Disposition::Handled
    );
    assert!(!h.carousel.is_autoplaying());
    h.advance_ms(10_000);
    assert_eq!(h.events.before_changes(), 0);

    h.carousel.handle_input(InputEvent::PointerLeave);
    assert!(h.carousel.is_autoplaying());

    // the interval restarts from the moment the pointer left
    h.advance_ms(4999);
    assert_eq!(h.events.before_changes(), 0);
    h.advance_ms(1);
    assert_eq!(h.events.before_changes(), 1);
}

#[test]
fn hover_is_ignored_without_pause_on_hover() {
    let options = CarouselOptions {
        pause_on_hover: false,
        ..autoplaying()
    };
    let mut h = Harness::new(mount(4), options);
    assert_eq!(
        h.carousel.handle_input(InputEvent::PointerEnter),
        Disposition::Ignored
    );
    assert!(h.carousel.is_autoplaying());
}

#[test]
fn autoplay_resumes_only_after_every_pause_reason_clears() {
    let mut h = Harness::new(mount(4), autoplaying());

    h.carousel.handle_input(InputEvent::PointerEnter);
    h.carousel
        .handle_input(InputEvent::VisibilityChanged { hidden: true });
    assert!(!h.carousel.is_autoplaying());

    h.carousel
        .handle_input(InputEvent::VisibilityChanged { hidden: false });
    assert!(!h.carousel.is_autoplaying());

    h.carousel.handle_input(InputEvent::PointerLeave);
    assert!(h.carousel.is_autoplaying());
}

#[test]
fn explicit_pause_is_not_undone_by_hover_or_visibility() {
    let mut h = Harness::new(mount(4), autoplaying());
    h.carousel.pause_autoplay();

    h.carousel.handle_input(InputEvent::PointerEnter);
    h.carousel.handle_input(InputEvent::PointerLeave);
    h.carousel
        .handle_input(InputEvent::VisibilityChanged { hidden: true });
    h.carousel
        .handle_input(InputEvent::VisibilityChanged { hidden: false });
    assert!(!h.carousel.is_autoplaying());

    assert!(h.carousel.start_autoplay());
    assert!(h.carousel.is_autoplaying());
}
