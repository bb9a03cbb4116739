// DOM wiring and frame-loop tuning for the web frontend.

// Element lookups
pub const CANVAS_ID: &str = "gallery-canvas";
pub const PROGRESS_BAR_ID: &str = "progress";
pub const LOADING_SELECTOR: &str = ".loading";
pub const HIDDEN_CLASS: &str = "hidden";

// Query parameter selecting the scene version (?version=classic)
pub const VERSION_QUERY_KEY: &str = "version";

// Loading overlay stays up this long after window load (ms)
pub const LOADING_HIDE_DELAY_MS: i32 = 2200;

// Canvas backing store follows CSS size * min(devicePixelRatio, this)
pub const MAX_PIXEL_RATIO: f64 = 2.0;

// Progress bar is rewritten only when progress moves more than this
pub const PROGRESS_BAR_EPSILON: f32 = 1e-4;

// Scene pass multisampling; resolved into the HDR target before post
pub const SCENE_SAMPLE_COUNT: u32 = 4;

// Frame statistics are logged at debug level every N frames
pub const STATS_INTERVAL_FRAMES: u64 = 600;
