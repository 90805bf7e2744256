// SPDX-License-Identifier: MPL-2.0
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tempfile::tempdir;
use toaster::config::{self, Config, DEFAULT_TOP_OFFSET};
use toaster::gesture::PointerEvent;
use toaster::lifecycle::{HideMode, LifecycleState};
use toaster::motion::{MotionCommand, MotionTarget, Recorder};
use toaster::timer::ManualTimer;
use toaster::{Message, NotificationRequest, Toaster};

type Log = Rc<RefCell<Vec<String>>>;
type TestToaster = Toaster<Recorder, ManualTimer>;

fn toaster() -> TestToaster {
    Toaster::new(Recorder::new(), ManualTimer::new())
}

fn tracked(title: &str, log: &Log) -> NotificationRequest {
    let hook = |event: &str| {
        let log = Rc::clone(log);
        let entry = format!("{title}:{event}");
        move || log.borrow_mut().push(entry.clone())
    };
    NotificationRequest::new(title)
        .on_will_show(hook("will_show"))
        .on_did_show(hook("did_show"))
        .on_will_hide(hook("will_hide"))
        .on_did_hide(hook("did_hide"))
        .on_press(hook("press"))
}

fn count(log: &Log, entry: &str) -> usize {
    log.borrow().iter().filter(|e| e.as_str() == entry).count()
}

/// Completes the most recent animation command.
fn finish_animation(toaster: &mut TestToaster) {
    let (id, _, _) = toaster
        .motion()
        .last_animation()
        .expect("an animation was requested");
    toaster
        .handle_message(Message::AnimationComplete { id, finished: true })
        .expect("completion is always accepted");
}

fn pointer(toaster: &mut TestToaster, event: PointerEvent) {
    toaster
        .handle_message(Message::Pointer(event))
        .expect("pointer input is always accepted");
}

#[test]
fn toasts_display_one_at_a_time_in_submission_order() {
    let log = Log::default();
    let mut toaster = toaster();
    for title in ["a", "b", "c"] {
        toaster.show(tracked(title, &log)).unwrap();
    }
    assert_eq!(toaster.snapshot().titles(), ["a", "b", "c"]);

    for _ in 0..3 {
        finish_animation(&mut toaster);
        toaster.tick(Duration::from_millis(5000));
        finish_animation(&mut toaster);
    }

    let shows: Vec<String> = log
        .borrow()
        .iter()
        .filter(|e| e.ends_with(":will_show"))
        .cloned()
        .collect();
    assert_eq!(shows, ["a:will_show", "b:will_show", "c:will_show"]);
    assert!(toaster.snapshot().is_empty());
    assert_eq!(toaster.state(), LifecycleState::Hidden);
}

#[test]
fn second_toast_waits_for_first_to_hide() {
    let log = Log::default();
    let mut toaster = toaster();
    toaster.show(tracked("A", &log)).unwrap();
    finish_animation(&mut toaster);
    toaster.show(tracked("B", &log)).unwrap();

    let snapshot = toaster.snapshot();
    assert_eq!(snapshot.active().map(|s| s.title.as_str()), Some("A"));
    assert_eq!(snapshot.titles(), ["A", "B"]);
    assert_eq!(count(&log, "B:will_show"), 0);

    toaster.hide();
    finish_animation(&mut toaster);

    let entries = log.borrow();
    let did_hide = entries.iter().position(|e| e == "A:did_hide").unwrap();
    let will_show = entries.iter().position(|e| e == "B:will_show").unwrap();
    assert!(did_hide < will_show);
    drop(entries);
    assert_eq!(toaster.snapshot().titles(), ["B"]);
}

#[test]
fn toast_without_auto_dismiss_stays_until_hidden() {
    let mut toaster = toaster();
    toaster
        .show(NotificationRequest::new("X").auto_dismiss(false))
        .unwrap();
    finish_animation(&mut toaster);
    assert_eq!(toaster.timers().pending_count(), 0);

    toaster.tick(Duration::from_secs(600));
    assert_eq!(toaster.state(), LifecycleState::Visible);

    toaster.hide();
    assert_eq!(toaster.state(), LifecycleState::Hiding(HideMode::Timed));
}

#[test]
fn short_delay_hides_automatically_and_empties_queue() {
    let log = Log::default();
    let mut toaster = toaster();
    toaster
        .show(tracked("Y", &log).delay(Duration::from_millis(100)))
        .unwrap();
    finish_animation(&mut toaster);

    toaster.tick(Duration::from_millis(99));
    assert_eq!(count(&log, "Y:will_hide"), 0);
    toaster.tick(Duration::from_millis(1));
    assert_eq!(count(&log, "Y:will_hide"), 1);

    finish_animation(&mut toaster);
    assert_eq!(count(&log, "Y:did_hide"), 1);
    assert!(toaster.snapshot().is_empty());
}

#[test]
fn small_downward_drag_snaps_back_without_hiding() {
    let log = Log::default();
    let mut toaster = toaster();
    toaster.show(tracked("drag", &log)).unwrap();
    finish_animation(&mut toaster);

    pointer(&mut toaster, PointerEvent::Down { y: 200.0 });
    pointer(&mut toaster, PointerEvent::Move { y: 250.0 });
    let dragged = toaster.view().unwrap().offset;
    assert!(dragged > DEFAULT_TOP_OFFSET);
    assert!(dragged < DEFAULT_TOP_OFFSET + 50.0);

    pointer(
        &mut toaster,
        PointerEvent::Up {
            y: 250.0,
            velocity: 0.0,
        },
    );
    let (_, target, _) = toaster.motion().last_animation().unwrap();
    assert_eq!(target.offset, DEFAULT_TOP_OFFSET);
    finish_animation(&mut toaster);

    assert_eq!(toaster.state(), LifecycleState::Visible);
    assert_eq!(count(&log, "drag:will_hide"), 0);
    assert_eq!(toaster.view().unwrap().offset, DEFAULT_TOP_OFFSET);
}

#[test]
fn callbacks_fire_once_despite_interrupted_animations() {
    let log = Log::default();
    let mut toaster = toaster();
    toaster.show(tracked("once", &log)).unwrap();
    let (show_id, _, _) = toaster.motion().last_animation().unwrap();
    finish_animation(&mut toaster);

    // Drag a few times; every snap back issues a new spring.
    for y in [30.0, 60.0] {
        pointer(&mut toaster, PointerEvent::Down { y: 0.0 });
        pointer(&mut toaster, PointerEvent::Move { y });
        pointer(&mut toaster, PointerEvent::Up { y, velocity: 0.0 });
    }
    // Replayed entry completion must not fire did_show again.
    toaster
        .handle_message(Message::AnimationComplete {
            id: show_id,
            finished: true,
        })
        .unwrap();
    finish_animation(&mut toaster);

    toaster.hide();
    let (exit_id, _, _) = toaster.motion().last_animation().unwrap();
    finish_animation(&mut toaster);
    toaster
        .handle_message(Message::AnimationComplete {
            id: exit_id,
            finished: true,
        })
        .unwrap();

    assert_eq!(count(&log, "once:did_show"), 1);
    assert_eq!(count(&log, "once:did_hide"), 1);
}

#[test]
fn interrupted_hide_does_not_advance_queue() {
    let log = Log::default();
    let mut toaster = toaster();
    toaster.show(tracked("A", &log)).unwrap();
    toaster.show(tracked("B", &log)).unwrap();
    finish_animation(&mut toaster);

    toaster.hide();
    let (exit_id, _, _) = toaster.motion().last_animation().unwrap();
    toaster
        .handle_message(Message::AnimationComplete {
            id: exit_id,
            finished: false,
        })
        .unwrap();

    assert_eq!(toaster.snapshot().titles(), ["A", "B"]);
    assert_eq!(count(&log, "A:did_hide"), 0);
    assert_eq!(count(&log, "B:will_show"), 0);
}

#[test]
fn grabbing_a_hiding_toast_keeps_it_active() {
    let log = Log::default();
    let mut toaster = toaster();
    toaster.show(tracked("A", &log)).unwrap();
    toaster.show(tracked("B", &log)).unwrap();
    finish_animation(&mut toaster);

    toaster.hide();
    let (exit_id, _, _) = toaster.motion().last_animation().unwrap();
    pointer(&mut toaster, PointerEvent::Down { y: 10.0 });
    toaster
        .handle_message(Message::AnimationComplete {
            id: exit_id,
            finished: true,
        })
        .unwrap();

    assert_eq!(toaster.state(), LifecycleState::Visible);
    assert_eq!(toaster.snapshot().titles(), ["A", "B"]);
    assert_eq!(
        toaster.motion().commands().last(),
        Some(&MotionCommand::Jump(MotionTarget::at(
            DEFAULT_TOP_OFFSET,
            DEFAULT_TOP_OFFSET
        )))
    );
}

#[test]
fn cancelled_grab_on_hiding_toast_still_advances_queue() {
    let log = Log::default();
    let mut toaster = toaster();
    toaster.show(tracked("A", &log)).unwrap();
    toaster.show(tracked("B", &log)).unwrap();
    finish_animation(&mut toaster);

    toaster.hide();
    pointer(&mut toaster, PointerEvent::Down { y: 10.0 });
    pointer(&mut toaster, PointerEvent::Cancel);
    finish_animation(&mut toaster);

    assert_eq!(toaster.snapshot().titles(), ["B"]);
    assert_eq!(count(&log, "A:will_hide"), 1);
    assert_eq!(count(&log, "A:did_hide"), 1);
    assert_eq!(count(&log, "B:will_show"), 1);
}

#[test]
fn tap_on_hiding_toast_finishes_the_exit_once() {
    let log = Log::default();
    let mut toaster = toaster();
    toaster.show(tracked("A", &log)).unwrap();
    toaster.show(tracked("B", &log)).unwrap();
    finish_animation(&mut toaster);

    toaster.hide();
    pointer(&mut toaster, PointerEvent::Down { y: 10.0 });
    pointer(
        &mut toaster,
        PointerEvent::Up {
            y: 10.0,
            velocity: 0.0,
        },
    );
    finish_animation(&mut toaster);

    assert_eq!(toaster.snapshot().titles(), ["B"]);
    assert_eq!(count(&log, "A:press"), 0);
    assert_eq!(count(&log, "A:will_hide"), 1);
    assert_eq!(count(&log, "A:did_hide"), 1);
}

#[test]
fn rescued_toast_is_dismissed_later_by_its_timer() {
    let log = Log::default();
    let mut toaster = toaster();
    toaster
        .show(tracked("A", &log).delay(Duration::from_millis(400)))
        .unwrap();
    toaster.show(tracked("B", &log)).unwrap();
    finish_animation(&mut toaster);

    toaster.hide();
    pointer(&mut toaster, PointerEvent::Down { y: 10.0 });
    pointer(&mut toaster, PointerEvent::Move { y: 40.0 });
    pointer(
        &mut toaster,
        PointerEvent::Up {
            y: 40.0,
            velocity: 0.0,
        },
    );
    finish_animation(&mut toaster);
    assert_eq!(toaster.state(), LifecycleState::Visible);

    toaster.tick(Duration::from_millis(400));
    finish_animation(&mut toaster);
    assert_eq!(toaster.snapshot().titles(), ["B"]);
    assert_eq!(count(&log, "A:will_hide"), 1);
    assert_eq!(count(&log, "A:did_hide"), 1);
}

#[test]
fn fling_that_stops_on_screen_uses_timed_exit() {
    let log = Log::default();
    let mut toaster = toaster();
    toaster.show(tracked("A", &log)).unwrap();
    toaster.show(tracked("B", &log)).unwrap();
    finish_animation(&mut toaster);

    pointer(&mut toaster, PointerEvent::Down { y: 100.0 });
    pointer(&mut toaster, PointerEvent::Move { y: 70.0 });
    pointer(
        &mut toaster,
        PointerEvent::Up {
            y: 70.0,
            velocity: -50.0,
        },
    );
    toaster
        .handle_message(Message::PositionSample(10.0))
        .unwrap();
    finish_animation(&mut toaster);
    toaster.tick(Duration::from_millis(75));

    assert_eq!(count(&log, "A:did_hide"), 0);
    assert_eq!(toaster.state(), LifecycleState::Hiding(HideMode::Timed));
    assert_eq!(toaster.motion().timed_exit_count(), 1);

    finish_animation(&mut toaster);
    assert_eq!(count(&log, "A:did_hide"), 1);
    assert_eq!(toaster.snapshot().titles(), ["B"]);
}

#[test]
fn dismissed_toast_timer_never_hides_the_next_one() {
    let mut toaster = toaster();
    toaster
        .show(NotificationRequest::new("A").delay(Duration::from_millis(1000)))
        .unwrap();
    toaster
        .show(NotificationRequest::new("B").delay(Duration::from_millis(1000)))
        .unwrap();
    finish_animation(&mut toaster);

    toaster.tick(Duration::from_millis(500));
    toaster.hide();
    finish_animation(&mut toaster);
    finish_animation(&mut toaster);
    assert_eq!(toaster.view().unwrap().title, "B");

    // A's deadline passes; only B's own timer may hide B.
    toaster.tick(Duration::from_millis(500));
    assert_eq!(toaster.state(), LifecycleState::Visible);
    toaster.tick(Duration::from_millis(500));
    assert_eq!(toaster.state(), LifecycleState::Hiding(HideMode::Timed));
}

#[test]
fn dragging_holds_off_auto_dismiss() {
    let mut toaster = toaster();
    toaster
        .show(NotificationRequest::new("held").delay(Duration::from_millis(200)))
        .unwrap();
    finish_animation(&mut toaster);

    pointer(&mut toaster, PointerEvent::Down { y: 0.0 });
    for step in 1..=20 {
        pointer(&mut toaster, PointerEvent::Move { y: step as f32 });
        toaster.tick(Duration::from_millis(50));
    }
    assert_eq!(toaster.state(), LifecycleState::Visible);

    pointer(
        &mut toaster,
        PointerEvent::Up {
            y: 20.0,
            velocity: 0.0,
        },
    );
    toaster.tick(Duration::from_millis(199));
    assert_eq!(toaster.state(), LifecycleState::Visible);
    toaster.tick(Duration::from_millis(1));
    assert_eq!(toaster.state(), LifecycleState::Hiding(HideMode::Timed));
}

#[test]
fn fling_dismiss_skips_timed_exit_and_promotes_next() {
    let log = Log::default();
    let mut toaster = toaster();
    toaster.show(tracked("A", &log)).unwrap();
    toaster.show(tracked("B", &log)).unwrap();
    finish_animation(&mut toaster);

    pointer(&mut toaster, PointerEvent::Down { y: 100.0 });
    pointer(&mut toaster, PointerEvent::Move { y: 60.0 });
    pointer(
        &mut toaster,
        PointerEvent::Up {
            y: 20.0,
            velocity: -1500.0,
        },
    );
    assert_eq!(toaster.state(), LifecycleState::Hiding(HideMode::Fling));

    toaster
        .handle_message(Message::PositionSample(-40.0))
        .unwrap();
    toaster
        .handle_message(Message::PositionSample(-75.0))
        .unwrap();
    toaster.tick(Duration::from_millis(75));

    assert_eq!(toaster.motion().timed_exit_count(), 0);
    assert_eq!(count(&log, "A:did_hide"), 1);
    assert_eq!(count(&log, "B:will_show"), 1);
    assert_eq!(toaster.snapshot().titles(), ["B"]);
}

#[test]
fn tap_fires_press_and_hides() {
    let log = Log::default();
    let mut toaster = toaster();
    toaster.show(tracked("tap", &log)).unwrap();
    finish_animation(&mut toaster);

    pointer(&mut toaster, PointerEvent::Down { y: 5.0 });
    pointer(
        &mut toaster,
        PointerEvent::Up {
            y: 5.0,
            velocity: 0.0,
        },
    );
    assert_eq!(count(&log, "tap:press"), 1);
    assert_eq!(toaster.state(), LifecycleState::Hiding(HideMode::Timed));
}

#[test]
fn hide_while_hidden_changes_nothing() {
    let log = Log::default();
    let mut toaster = toaster();
    toaster.hide();
    toaster.handle_message(Message::Hide).unwrap();

    assert_eq!(toaster.state(), LifecycleState::Hidden);
    assert!(toaster.motion().commands().is_empty());
    assert!(log.borrow().is_empty());
}

#[test]
fn snapshot_is_detached_from_live_queue() {
    let mut toaster = toaster();
    toaster.show(NotificationRequest::new("A")).unwrap();
    toaster.show(NotificationRequest::new("B")).unwrap();
    let before = toaster.snapshot();

    toaster.show(NotificationRequest::new("C")).unwrap();
    toaster.dangerously_get_queue_mut().swap(1, 2);

    assert_eq!(before.titles(), ["A", "B"]);
    assert_eq!(toaster.snapshot().titles(), ["A", "C", "B"]);
}

#[test]
fn duplicate_requests_are_not_deduplicated() {
    let mut toaster = toaster();
    for _ in 0..3 {
        toaster
            .show(NotificationRequest::new("same").id("dup"))
            .unwrap();
    }
    assert_eq!(toaster.snapshot().len(), 3);
}

#[test]
fn saved_config_drives_new_toaster() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("toaster.toml");

    let mut saved = Config::default();
    saved.toast.top_offset = Some(40.0);
    saved.toast.delay_ms = Some(300);
    config::save_to_path(&saved, &path).expect("Failed to write config file");

    let loaded = config::load_from_path(&path).expect("Failed to load config from path");
    let mut toaster = Toaster::with_config(Recorder::new(), ManualTimer::new(), &loaded)
        .expect("config is valid");
    toaster.show(NotificationRequest::new("configured")).unwrap();
    finish_animation(&mut toaster);

    assert_eq!(toaster.view().unwrap().offset, 40.0);
    toaster.tick(Duration::from_millis(300));
    assert_eq!(toaster.state(), LifecycleState::Hiding(HideMode::Timed));

    dir.close().expect("Failed to close temporary directory");
}
