use super::error::ErrorReportParseError;
use super::layout;

pub struct ErrorReportReader<'a> {
    payload: &'a [u8],
}

impl<'a> ErrorReportReader<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload }
    }

    pub fn require_len(&self, needed: usize) -> Result<(), ErrorReportParseError> {
        if self.payload.len() < needed {
            return Err(ErrorReportParseError::TooShort {
                needed,
                actual: self.payload.len(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, ErrorReportParseError> {
        self.payload
            .get(offset)
            .copied()
            .ok_or(ErrorReportParseError::TooShort {
                needed: offset + 1,
                actual: self.payload.len(),
            })
    }

    /// Raw error code held in the top two bits of the status byte.
    pub fn read_code(&self) -> Result<u8, ErrorReportParseError> {
        Ok(self.read_u8(layout::CODE_OFFSET)? >> layout::CODE_SHIFT)
    }
}
