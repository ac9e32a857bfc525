/// Upper bound (inclusive) on the number of sub-flows a split produces
pub const MAX_SPLIT_COUNT: u32 = 99;

/// Upper bound (inclusive) on the raw magnitude drawn for each sub-flow weight
pub const MAX_SPLIT_MAGNITUDE: u32 = 9;

/// Lower end of the survival draw; failure rates are `1 - U(MIN_SURVIVAL, 1)`
pub const MIN_SURVIVAL: f64 = 0.8;

/// Highest failure rate the uniform failure source can produce
pub const MAX_FAILURE_RATE: f64 = 1.0 - MIN_SURVIVAL;

/// Stream offset separating failure draws from partition draws under a shared seed
pub const FAILURE_STREAM: u64 = 0x9E37_79B9_7F4A_7C15;
