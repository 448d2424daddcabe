//! Run profiles: segmentation of the sample stream into runs and the
//! per-sample output points.

mod point;
mod segmenter;

pub use point::{RunProfilePoint, PLACEHOLDER_SIGNAL, PLACEHOLDER_SPEED, PLACEHOLDER_TAG};
pub use segmenter::{new_run_trigger, segment_runs, trapezoid, RunFlags, RunSegmenter, RunTrigger};
