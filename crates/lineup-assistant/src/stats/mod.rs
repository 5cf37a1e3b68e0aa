// Statistical engine: weekly series construction, descriptive stats,
// volatility profiles, and projection ranges.

pub mod describe;
pub mod range;
pub mod series;
pub mod volatility;
