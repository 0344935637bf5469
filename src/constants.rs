// Grid limits
pub const DEFAULT_MAX_WIDTH: usize = 64;
pub const DEFAULT_MAX_HEIGHT: usize = 64;

// Retry budget: each attempt restarts the whole pipeline with a fresh seed
pub const DEFAULT_MAX_ATTEMPTS: u32 = 16;

// Enrichment chances
pub const DEFAULT_BRANCH_CHANCE: f64 = 0.3;
pub const DEFAULT_MAX_BRANCH_DEPTH: u32 = 3;
pub const DEFAULT_LOOP_CHANCE: f64 = 0.15; // per unconnected adjacent pair

// Config file name inside the platform config directory
pub const CONFIG_FILE_NAME: &str = "config.json";

// Version magic hashed ahead of the topology in fingerprints
pub const FINGERPRINT_MAGIC: u64 = 0x4C4142595249_4E54; // "LABYRINT"
