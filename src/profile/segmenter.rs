//! Run segmentation and distance integration.
//!
//! [`RunSegmenter`] is a single-pass accumulator: feed it the sorted, joined
//! samples one at a time and it returns one [`RunProfilePoint`] per sample.
//! It remembers just enough of the previous sample to evaluate run
//! boundaries and integrate speed, and never looks ahead.

use crate::error::{Ceiling, ProfileError, Result};
use crate::limits::{FEET_PER_METRE, MAX_RUNS, RUN_GAP_SECS};
use crate::telemetry::TrainSample;

use super::point::RunProfilePoint;

/// Why a sample opened a new run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunTrigger {
    /// First sample of the stream.
    First,
    /// Controller id text differs from the previous sample.
    ControllerChanged,
    /// Gap longer than the run gap after standing still, on another block.
    Discontinuity,
    /// Doors opened at a platform other than the run's departure block.
    DoorsOpened,
    /// Previous sample passed a platform with skip-stop set.
    SkippedStop,
}

/// Diagnostic milestones of the current run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunFlags {
    pub departure_complete: bool,
    pub arrival_complete: bool,
    pub stopped: bool,
    pub interrupted: bool,
}

impl RunFlags {
    pub fn run_complete(&self) -> bool {
        self.departure_complete && self.arrival_complete
    }
}

/// What the segmenter keeps of the previous sample.
#[derive(Debug, Clone)]
struct Previous {
    cc: String,
    timestamp: i64,
    block: String,
    is_motion: bool,
    is_platform: bool,
    doors_open: Option<char>,
    skip_stop: bool,
    speed_ms: f64,
}

impl Previous {
    fn of(sample: &TrainSample) -> Self {
        Self {
            cc: sample.cc.clone(),
            timestamp: sample.timestamp,
            block: sample.block.clone(),
            is_motion: sample.is_motion,
            is_platform: sample.is_platform(),
            doors_open: sample.doors_open_flag(),
            skip_stop: sample.skip_stop_set(),
            speed_ms: sample.signed_speed_ms(),
        }
    }
}

/// State of the run currently being built.
#[derive(Debug, Clone)]
struct Run {
    id: u32,
    time_origin: i64,
    travel_origin: i64,
    departed: bool,
    displacement_m: f64,
    travelled_m: f64,
    departure_block: String,
    arrival_block: Option<String>,
    flags: RunFlags,
    points: usize,
}

impl Run {
    fn open(id: u32, sample: &TrainSample) -> Self {
        Self {
            id,
            time_origin: sample.timestamp,
            travel_origin: sample.timestamp,
            departed: false,
            displacement_m: 0.0,
            travelled_m: 0.0,
            departure_block: sample.block.clone(),
            arrival_block: None,
            flags: RunFlags::default(),
            points: 1,
        }
    }
}

/// Decide whether `current` opens a new run.
pub fn new_run_trigger(
    previous: Option<&TrainSample>,
    current: &TrainSample,
    departure_block: &str,
) -> Option<RunTrigger> {
    trigger(previous.map(Previous::of).as_ref(), current, departure_block)
}

fn trigger(
    previous: Option<&Previous>,
    current: &TrainSample,
    departure_block: &str,
) -> Option<RunTrigger> {
    let Some(prev) = previous else {
        return Some(RunTrigger::First);
    };

    if prev.cc != current.cc {
        return Some(RunTrigger::ControllerChanged);
    }
    if current.timestamp - prev.timestamp > RUN_GAP_SECS
        && !prev.is_motion
        && prev.block != current.block
    {
        return Some(RunTrigger::Discontinuity);
    }
    if current.is_platform()
        && prev.doors_open == Some('0')
        && current.doors_open_flag() == Some('1')
        && current.block != departure_block
    {
        return Some(RunTrigger::DoorsOpened);
    }
    if prev.skip_stop && prev.is_platform && !current.is_platform() {
        return Some(RunTrigger::SkippedStop);
    }
    None
}

/// Trapezoidal integral of speed over `[t0, t1]`.
pub fn trapezoid(t0: i64, v0: f64, t1: i64, v1: f64) -> f64 {
    (v0 + v1) * (t1 - t0) as f64 / 2.0
}

/// Streaming run segmentation engine.
#[derive(Debug)]
pub struct RunSegmenter {
    max_runs: u32,
    next_run: u32,
    previous: Option<Previous>,
    run: Option<Run>,
}

impl Default for RunSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl RunSegmenter {
    pub fn new() -> Self {
        Self::with_max_runs(MAX_RUNS)
    }

    /// Segmenter that fails when run `max_runs` would be opened.
    pub fn with_max_runs(max_runs: u32) -> Self {
        Self {
            max_runs,
            next_run: 0,
            previous: None,
            run: None,
        }
    }

    /// Runs opened so far.
    pub fn runs_started(&self) -> u32 {
        self.next_run
    }

    /// Milestones of the run in progress, if any.
    pub fn flags(&self) -> Option<RunFlags> {
        self.run.as_ref().map(|run| run.flags)
    }

    /// Net signed displacement of the run in progress (m).
    pub fn net_displacement_m(&self) -> Option<f64> {
        self.run.as_ref().map(|run| run.displacement_m)
    }

    /// Process the next sample.
    pub fn push(&mut self, sample: &TrainSample) -> Result<RunProfilePoint> {
        let departure_block = self
            .run
            .as_ref()
            .map_or("", |run| run.departure_block.as_str());
        let reason = trigger(self.previous.as_ref(), sample, departure_block);

        if reason.is_none() {
            if let (Some(run), Some(prev)) = (self.run.as_mut(), self.previous.as_ref()) {
                let point = continue_run(run, prev, sample);
                self.previous = Some(Previous::of(sample));
                return Ok(point);
            }
        }

        let point = self.open_run(sample, reason.unwrap_or(RunTrigger::First))?;
        self.previous = Some(Previous::of(sample));
        Ok(point)
    }

    /// Close the last run.
    pub fn finish(mut self) {
        if let Some(run) = self.run.take() {
            log_closed(&run);
        }
    }

    fn open_run(&mut self, sample: &TrainSample, reason: RunTrigger) -> Result<RunProfilePoint> {
        if self.next_run >= self.max_runs {
            return Err(ProfileError::limit(Ceiling::Runs, self.max_runs.into()));
        }
        let id = self.next_run;
        self.next_run += 1;

        if let Some(closed) = self.run.take() {
            log_closed(&closed);
        }
        tracing::debug!(run = id, ?reason, "Run opened at sample {}", sample.id);

        self.run = Some(Run::open(id, sample));
        Ok(RunProfilePoint::from_sample(sample, id))
    }
}

fn continue_run(run: &mut Run, prev: &Previous, sample: &TrainSample) -> RunProfilePoint {
    run.points += 1;

    let mut point = RunProfilePoint::from_sample(sample, run.id);
    point.log_time_s = (sample.timestamp - run.time_origin) as f64;

    if !run.departed {
        if sample.is_motion {
            run.departed = true;
        } else {
            run.travel_origin = sample.timestamp;
        }
    }
    point.travel_time_s = (sample.timestamp - run.travel_origin) as f64;

    let displacement = trapezoid(
        prev.timestamp,
        prev.speed_ms,
        sample.timestamp,
        sample.signed_speed_ms(),
    );
    point.distance_0_m = displacement;
    point.distance_1_m = displacement;
    run.displacement_m += displacement;
    run.travelled_m += displacement.abs();
    point.accum_distance_ft = FEET_PER_METRE * run.travelled_m;

    let flags = &mut run.flags;
    if prev.is_motion
        && !sample.is_motion
        && sample.is_platform()
        && sample.block != run.departure_block
        && run.arrival_block.is_none()
    {
        flags.arrival_complete = true;
        run.arrival_block = Some(sample.block.clone());
    }
    if !flags.departure_complete && sample.is_motion && sample.is_platform() {
        flags.departure_complete = true;
    }
    if prev.is_motion && !sample.is_motion {
        flags.stopped = true;
    }
    if !prev.is_motion && sample.is_motion && flags.stopped {
        flags.interrupted = true;
    }

    point
}

fn log_closed(run: &Run) {
    tracing::debug!(
        run = run.id,
        points = run.points,
        departure = %run.departure_block,
        arrival = run.arrival_block.as_deref().unwrap_or("-"),
        departure_complete = run.flags.departure_complete,
        arrival_complete = run.flags.arrival_complete,
        stopped = run.flags.stopped,
        interrupted = run.flags.interrupted,
        complete = run.flags.run_complete(),
        "Run closed after {:.1} m",
        run.travelled_m
    );
}

/// Segment a whole sorted sample sequence.
pub fn segment_runs(samples: &[TrainSample], max_runs: u32) -> Result<Vec<RunProfilePoint>> {
    let mut segmenter = RunSegmenter::with_max_runs(max_runs);
    let mut points = Vec::with_capacity(samples.len());
    for sample in samples {
        let point = segmenter.push(sample)?;
        tracing::trace!("Point {point}");
        points.push(point);
    }
    segmenter.finish();
    Ok(points)
}
