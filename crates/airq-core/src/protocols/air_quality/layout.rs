pub const CO2_RANGE: std::ops::Range<usize> = 0..2;

pub const NH3_HIGH_OFFSET: usize = 2;
pub const NH3_LOW_OFFSET: usize = 3;
pub const NH3_HIGH_SHIFT: u32 = 7;
pub const NH3_LOW_SHIFT: u32 = 1;
pub const NH3_SCALE: f64 = 0.1;

pub const MIN_LEN: usize = NH3_LOW_OFFSET + 1;

pub const DEVICE_TYPE: &str = "air-quality";
