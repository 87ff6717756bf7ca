use super::error::AirQualityParseError;
use super::layout;

pub struct AirQualityReader<'a> {
    payload: &'a [u8],
}

impl<'a> AirQualityReader<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload }
    }

    pub fn require_len(&self, needed: usize) -> Result<(), AirQualityParseError> {
        if self.payload.len() < needed {
            return Err(AirQualityParseError::TooShort {
                needed,
                actual: self.payload.len(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, AirQualityParseError> {
        self.payload
            .get(offset)
            .copied()
            .ok_or(AirQualityParseError::TooShort {
                needed: offset + 1,
                actual: self.payload.len(),
            })
    }

    pub fn read_u16_be(&self, range: std::ops::Range<usize>) -> Result<u16, AirQualityParseError> {
        let bytes = self.read_slice(range)?;
        if bytes.len() != 2 {
            return Err(AirQualityParseError::TooShort {
                needed: 2,
                actual: bytes.len(),
            });
        }
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_slice(
        &self,
        range: std::ops::Range<usize>,
    ) -> Result<&'a [u8], AirQualityParseError> {
        self.payload
            .get(range.clone())
            .ok_or(AirQualityParseError::TooShort {
                needed: range.end,
                actual: self.payload.len(),
            })
    }

    /// Unpack the cross-byte NH3 field: all of the high byte, then the upper
    /// seven bits of the low byte.
    pub fn read_packed_nh3(&self) -> Result<u16, AirQualityParseError> {
        let high = u16::from(self.read_u8(layout::NH3_HIGH_OFFSET)?);
        let low = u16::from(self.read_u8(layout::NH3_LOW_OFFSET)?);
        Ok((high << layout::NH3_HIGH_SHIFT) | (low >> layout::NH3_LOW_SHIFT))
    }
}
