//! Default configuration constants for signtype.
//!
//! Shared across configuration types and the pipeline so thresholds and
//! resource paths are defined in exactly one place.

/// Number of tracked keypoints per detected hand.
///
/// The upstream landmark extractor emits the standard 21-point hand topology
/// (wrist, plus four joints per finger). A landmark set is only valid with
/// exactly this many points.
pub const LANDMARK_COUNT: usize = 21;

/// Length of the flattened feature vector fed to the scoring model.
///
/// Each landmark contributes its normalized x and y coordinate, in order.
pub const FEATURE_LEN: usize = LANDMARK_COUNT * 2;

/// Minimum confidence (percent) a classification needs to commit a symbol.
///
/// High by design: a sign should be held deliberately before it types.
/// Anything below this is still displayed as live feedback but never
/// appended to the text buffer.
pub const MIN_CONFIDENCE: f32 = 95.0;

/// Minimum gap between any two committed symbols, in milliseconds.
///
/// Applies across different labels too, so rapidly alternating between two
/// confident signs cannot re-trigger faster than this.
pub const COOLDOWN_MS: u64 = 1000;

/// Reserved label that types a literal space character.
///
/// Compared case-insensitively against the trimmed committed label.
pub const SPACE_LABEL: &str = "Space";

/// Display text shown when no sign is detected or classified this frame.
pub const NO_SIGN_PLACEHOLDER: &str = "No sign detected";

/// Default path to the scoring model resource.
pub const MODEL_PATH: &str = "models/hand_sign.safetensors";

/// Default path to the newline-delimited label table resource.
pub const LABELS_PATH: &str = "models/labels.txt";

/// Default capacity of the frame input channel.
///
/// Small on purpose: a frame that cannot be queued is dropped, since the
/// extractor already coalesces frames under load and a stale frame is worth
/// less than a fresh one.
pub const FRAME_BUFFER: usize = 8;

/// Default capacity of the display state channel between the recognizer and
/// the display sink.
pub const DISPLAY_BUFFER: usize = 16;

/// Default frame replay interval for file/stdin sources (~30 fps).
pub const REPLAY_INTERVAL_MS: u64 = 33;
