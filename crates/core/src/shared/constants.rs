pub const PLAY_WINDOW_TITLE: &str = "Video Playback";
pub const BLUR_WINDOW_TITLE: &str = "Face Blur";
pub const CLASSIFY_WINDOW_TITLE: &str = "Face Classify";

/// Key-poll waits (ms) per pipeline; also the effective frame pacing.
pub const PLAY_KEY_WAIT_MS: i32 = 25;
pub const BLUR_KEY_WAIT_MS: i32 = 24;
pub const CLASSIFY_KEY_WAIT_MS: i32 = 1;

/// Gaussian kernel size used to obscure detected faces.
pub const FACE_BLUR_KERNEL_SIZE: usize = 75;

/// Label drawn above every face in the blur pipeline.
pub const HUMAN_LABEL: &str = "Human";

/// Horizontal label offset divisors (`min_x / divisor`) per pipeline.
pub const BLUR_LABEL_DIVISOR: i32 = 2;
pub const CLASSIFY_LABEL_DIVISOR: i32 = 9;

/// Status shown before the first face has been classified.
pub const INITIAL_STATUS: &str = "Ready";

/// Shown when the classifier picks an index the catalog doesn't have.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Fallback classifier input resolution when the model leaves it dynamic.
pub const DEFAULT_CLASSIFIER_INPUT_SIZE: u32 = 224;

/// Progress log throttle for the stdout pipeline logger.
pub const PROGRESS_THROTTLE_FRAMES: usize = 100;
