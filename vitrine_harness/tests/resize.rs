// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Debounced resize notifications on a simulated page.

use vitrine_core::config::ReactorConfig;
use vitrine_core::time::{Duration, HostTime};
use vitrine_core::trace::ResizePhase;
use vitrine_debug::recorder::RecorderSink;
use vitrine_harness::SimPage;

const STEP: Duration = Duration::from_millis(50);

fn burst(page: &mut SimPage<RecorderSink>, count: usize) {
    for i in 0..count {
        if i > 0 {
            page.advance(STEP);
        }
        page.resize();
    }
}

#[test]
fn burst_of_ten_fires_once_after_quiet_window() {
    let mut page = SimPage::with_sink(ReactorConfig::portfolio(), RecorderSink::new());
    burst(&mut page, 10);
    // Last trigger at 450ms.
    assert_eq!(page.now(), HostTime::from_millis_f64(450.0));
    assert_eq!(page.pending_timers(), 1, "each trigger cancels the previous timer");

    page.advance(Duration::from_millis(249));
    assert!(page.resize_notifications().is_empty());

    page.advance(Duration::from_millis(1));
    assert_eq!(
        page.resize_notifications(),
        [HostTime::from_millis_f64(700.0)]
    );

    page.advance(Duration::from_millis(1000));
    assert_eq!(page.resize_notifications().len(), 1);
    assert_eq!(page.sink().resize_count(ResizePhase::Triggered), 10);
    assert_eq!(page.sink().resize_count(ResizePhase::Fired), 1);
}

#[test]
fn separated_bursts_fire_separately() {
    let mut page = SimPage::with_sink(ReactorConfig::portfolio(), RecorderSink::new());
    burst(&mut page, 3);
    page.advance(Duration::from_millis(300));
    burst(&mut page, 3);
    page.advance(Duration::from_millis(300));
    assert_eq!(page.resize_notifications().len(), 2);
    assert_eq!(page.pending_timers(), 0);
}

#[test]
fn gap_longer_than_window_fires_between_triggers() {
    let mut page = SimPage::new(ReactorConfig::portfolio());
    page.resize();
    page.advance(Duration::from_millis(260));
    page.resize();
    page.advance(Duration::from_millis(260));
    assert_eq!(
        page.resize_notifications(),
        [
            HostTime::from_millis_f64(250.0),
            HostTime::from_millis_f64(510.0)
        ]
    );
}
