// heartbeat-rs: Repository activity simulator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Random draws for a run: commit count, commit stamps, pauses.
//!
//! ```text
//! window 09:00 ─────────────── 22:30      end >  start: same day
//! window 20:00 ──── 24:00 ──── 02:00      end <= start: end += 24h
//!        [start ............... end)      uniform, whole seconds
//! ```

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::Rng;
use std::ops::RangeInclusive;

use crate::config::types::TimeOfDay;

/// Draw the number of commits for this run, uniformly in `range`.
pub fn sample_commit_count<R: Rng + ?Sized>(rng: &mut R, range: RangeInclusive<u32>) -> u32 {
    rng.gen_range(range)
}

/// Draw the pause before the next commit, uniformly in `range` seconds.
pub fn sample_delay<R: Rng + ?Sized>(
    rng: &mut R,
    range: RangeInclusive<u64>,
) -> std::time::Duration {
    std::time::Duration::from_secs(rng.gen_range(range))
}

/// Pick a uniformly random second in `[start, end)` on `date`.
///
/// If `end` is not after `start` the window runs past midnight into the next
/// day; equal bounds therefore cover a full 24 hours.
pub fn random_timestamp<R: Rng + ?Sized>(
    rng: &mut R,
    start: TimeOfDay,
    end: TimeOfDay,
    date: NaiveDate,
) -> NaiveDateTime {
    let (from, to) = window_bounds(start, end, date);
    let span = (to - from).num_seconds();
    from + Duration::seconds(rng.gen_range(0..span))
}

/// Absolute bounds of the window anchored on `date`.
#[must_use]
pub fn window_bounds(
    start: TimeOfDay,
    end: TimeOfDay,
    date: NaiveDate,
) -> (NaiveDateTime, NaiveDateTime) {
    let from = date.and_time(start.time());
    let mut to = date.and_time(end.time());
    if to <= from {
        to += Duration::days(1);
    }
    (from, to)
}
