// Single source of truth for all default values.

// --- Population ---
pub const DEFAULT_EDGES_PER_RECORD: usize = 10;
pub const DEFAULT_ORDER: usize = 2;
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.1;

// --- Refinement ---
pub const DEFAULT_REPLACEMENT_ITERATIONS: usize = 10;
pub const DEFAULT_INITIAL_REPLACE_RATE: f64 = 0.3;
pub const REPLACE_RATE_DECAY: f64 = 0.9;

// --- Weight training ---
pub const DEFAULT_GRADIENT_ITERATIONS: usize = 10;
pub const DEFAULT_LEARN_RATE: f64 = 0.01;
pub const DEFAULT_LABEL_THRESHOLD: f64 = 0.5;

// --- Prediction ---
pub const DEFAULT_ALPHA: f64 = 0.5;

// --- Runtime ---
pub const DEFAULT_SEED: u64 = 1;
pub const DEFAULT_PARALLEL: bool = true;
pub const DEFAULT_LOG_FILTER: &str = "mlhn=info";
pub const LOG_ENV_VAR: &str = "MLHN_LOG";
