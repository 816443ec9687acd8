/// Days in one planning cycle.
pub const CYCLE_LENGTH: u32 = 28;

/// Batch size used when neither an override nor the catalog gives one.
pub const DEFAULT_SERVING_SIZE: u32 = 4;

// ─────────────────────────────────────────────────────────────────────────────
// Display labels
// ─────────────────────────────────────────────────────────────────────────────

/// Label shown for a day that only eats banked servings.
pub const LEFTOVER_LABEL: &str = "Use Leftovers";

/// Fuzzy-match score a meal name must reach to be offered as a suggestion.
pub const FUZZY_MATCH_THRESHOLD: f64 = 0.7;

/// Maximum suggestions shown for an ambiguous meal name.
pub const MAX_SUGGESTIONS: usize = 5;
