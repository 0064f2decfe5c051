use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use carousel_core::testing::{Harness, mount};
use carousel_core::{CarouselEvent, CarouselOptions};

const FRAME: Duration = Duration::from_millis(16);

#[test]
fn three_advances_in_fifteen_seconds() {
    let mut h = Harness::new(mount(4), CarouselOptions::default());

    // timestamps of every accepted advance, read off the shared clock
    let accepted = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&accepted);
    let clock = h.clock.clone();
    h.carousel.subscribe(move |event| {
        if let CarouselEvent::BeforeChange { .. } = event {
            sink.borrow_mut().push(clock.elapsed());
        }
        Ok(())
    });

    h.run_for(Duration::from_millis(15_050), FRAME);

    let accepted = accepted.borrow();
    assert_eq!(accepted.len(), 3);
    let window = h.carousel.options().settlement_window();
    for pair in accepted.windows(2) {
        assert!(pair[1] - pair[0] >= window);
    }
    assert_eq!(h.events.before_changes(), 3);
    assert_eq!(h.events.changes(), 2);
    assert_eq!(h.carousel.current_slide(), 2);
    assert!(h.carousel.is_in_transition());
}

#[test]
fn one_large_clock_step_matches_frame_by_frame_ticking() {
    let mut stepped = Harness::new(mount(4), CarouselOptions::default());
    stepped.run_for(Duration::from_millis(15_050), FRAME);

    let mut jumped = Harness::new(mount(4), CarouselOptions::default());
    jumped.advance_ms(15_050);

    assert_eq!(jumped.events.events(), stepped.events.events());
    assert_eq!(jumped.carousel.current_slide(), 2);
    assert_eq!(
        jumped.carousel.renderer().offset(),
        stepped.carousel.renderer().offset()
    );
}

#[test]
fn autoplay_tick_during_a_transition_is_dropped() {
    let options = CarouselOptions {
        auto_play_interval: Duration::from_millis(400),
        ..CarouselOptions::default()
    };
    let mut h = Harness::new(mount(4), options);

    // ticks at 400 (accepted, settles at 1050) and 800 (locked out), then
    // 1200 is accepted again
    h.advance_ms(1_000);
    assert_eq!(h.events.before_changes(), 1);
    h.advance_ms(200);
    assert_eq!(h.events.before_changes(), 2);
    assert_eq!(h.carousel.current_slide(), 1);
}

#[test]
fn autoplay_stops_at_the_last_slide_without_looping() {
    let options = CarouselOptions {
        looping: false,
        ..CarouselOptions::default()
    };
    let mut h = Harness::new(mount(3), options);

    h.advance_ms(16_000);

    assert_eq!(h.events.before_changes(), 2);
    assert_eq!(h.carousel.current_slide(), 2);
    // the timer keeps running; it just has nowhere to go
    assert!(h.carousel.is_autoplaying());
}

#[test]
fn manual_navigation_does_not_reset_the_interval() {
    let mut h = Harness::new(mount(5), CarouselOptions::default());

    h.advance_ms(2_000);
    assert!(h.carousel.next_slide());
    h.advance_ms(3_000);

    // the manual move settled at 2650 and autoplay still fired at 5000
    assert_eq!(h.events.before_changes(), 2);
    assert_eq!(h.carousel.current_slide(), 1);
    assert!(h.carousel.is_in_transition());
}

#[test]
fn toggling_restarts_the_interval() {
    let mut h = Harness::new(mount(3), CarouselOptions::default());
    h.advance_ms(4_000);

    assert!(!h.carousel.toggle_autoplay());
    assert!(!h.carousel.is_autoplaying());
    h.advance_ms(2_000);
    assert_eq!(h.events.before_changes(), 0);

    assert!(h.carousel.toggle_autoplay());
    h.advance_ms(4_999);
    assert_eq!(h.events.before_changes(), 0);
    h.advance_ms(1);
    assert_eq!(h.events.before_changes(), 1);
}
