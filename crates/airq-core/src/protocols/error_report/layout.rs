pub const CODE_OFFSET: usize = 0;
pub const CODE_SHIFT: u32 = 6;
pub const MAX_CODE: u8 = u8::MAX >> CODE_SHIFT;

pub const MIN_LEN: usize = CODE_OFFSET + 1;

pub const DEVICE_TYPE: &str = "air-quality-error";
