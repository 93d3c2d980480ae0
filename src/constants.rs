// Player timing and step defaults. Config values fall back to these.

// === Overlay visibility ===
pub const CONTROLS_HIDE_DELAY_MS: u64 = 3000;
pub const POINTER_LEAVE_HIDE_DELAY_MS: u64 = 1000;

// === Center indicator flashes ===
pub const INDICATOR_FLASH_MS: u64 = 1000;
pub const END_INDICATOR_MS: u64 = 2000;

// === Keyboard steps ===
pub const SEEK_STEP_SECS: f64 = 10.0;
pub const VOLUME_STEP: i32 = 10;

// === Volume ===
pub const MAX_VOLUME: u8 = 100;
pub const DEFAULT_VOLUME: u8 = MAX_VOLUME;
