// ABOUTME: Tests for the session clock pause, resume, stop, and reset semantics
// ABOUTME: Verifies paused intervals are excluded and mm:ss formatting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(missing_docs)]

use repcount::session::SessionClock;

fn tick_n(clock: &mut SessionClock, ticks: usize) {
    for _ in 0..ticks {
        clock.tick();
    }
}

#[test]
fn test_new_clock_is_stopped_at_zero() {
    let clock = SessionClock::new();
    assert_eq!(clock.elapsed(), 0);
    assert!(!clock.is_running());
    assert_eq!(clock.format_elapsed(), "00:00");
}

#[test]
fn test_ticks_before_start_are_ignored() {
    let mut clock = SessionClock::new();
    assert!(!clock.tick());
    assert_eq!(clock.elapsed(), 0);
}

#[test]
fn test_each_running_tick_adds_one_second() {
    let mut clock = SessionClock::new();
    clock.start();
    assert!(clock.tick());
    tick_n(&mut clock, 4);
    assert_eq!(clock.elapsed(), 5);
}

#[test]
fn test_paused_ticks_are_noops() {
    let mut clock = SessionClock::new();
    clock.start();
    tick_n(&mut clock, 3);
    clock.pause();
    assert!(!clock.tick());
    tick_n(&mut clock, 100);
    assert_eq!(clock.elapsed(), 3);
}

#[test]
fn test_pause_resume_excludes_paused_interval() {
    let mut interrupted = SessionClock::new();
    interrupted.start();
    tick_n(&mut interrupted, 10);
    interrupted.pause();
    tick_n(&mut interrupted, 45);
    interrupted.resume();
    tick_n(&mut interrupted, 5);

    let mut continuous = SessionClock::new();
    continuous.start();
    tick_n(&mut continuous, 15);

    assert_eq!(interrupted.elapsed(), continuous.elapsed());
}

#[test]
fn test_pause_resume_without_ticks_changes_nothing() {
    let mut clock = SessionClock::new();
    clock.start();
    tick_n(&mut clock, 7);
    clock.pause();
    clock.resume();
    assert_eq!(clock.elapsed(), 7);
    assert!(clock.is_running());
}

#[test]
fn test_stop_keeps_accumulated_time() {
    let mut clock = SessionClock::new();
    clock.start();
    tick_n(&mut clock, 12);
    clock.stop();
    tick_n(&mut clock, 3);
    assert_eq!(clock.elapsed(), 12);

    clock.start();
    clock.tick();
    assert_eq!(clock.elapsed(), 13);
}

#[test]
fn test_reset_zeroes_time_and_keeps_running_state() {
    let mut clock = SessionClock::new();
    clock.start();
    tick_n(&mut clock, 9);
    clock.reset();
    assert_eq!(clock.elapsed(), 0);
    assert!(clock.is_running());

    clock.pause();
    clock.reset();
    clock.reset();
    assert_eq!(clock.elapsed(), 0);
    assert!(!clock.is_running());
}

#[test]
fn test_format_elapsed_as_minutes_and_seconds() {
    let mut clock = SessionClock::new();
    clock.start();
    tick_n(&mut clock, 75);
    assert_eq!(clock.format_elapsed(), "01:15");

    tick_n(&mut clock, 3600 - 75 + 5);
    assert_eq!(clock.format_elapsed(), "60:05");
}
