/* Reading side of the wire runtime */

use crate::error::{DecodeError, DecodeResult};
use crate::wire::{MAX_VARINT_SIZE, WireType, tag_field_number};

/// Cursor over an encoded message with a stack-like length limit.
#[derive(Debug, Clone)]
pub struct CodedInputStream<'a> {
    buffer: &'a [u8],
    pos: usize,
    /* Absolute offset reads may not cross */
    limit: usize,
}

impl<'a> CodedInputStream<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            pos: 0,
            limit: buffer.len(),
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn bytes_until_limit(&self) -> usize {
        self.limit - self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos == self.limit
    }

    /* Move back to an offset previously returned by position() */
    pub fn rewind_to_position(&mut self, position: usize) {
        debug_assert!(position <= self.pos);
        self.pos = position;
    }

    /// Reads the next tag, or returns 0 once the current limit is reached.
    pub fn read_tag(&mut self) -> DecodeResult<u32> {
        if self.is_at_end() {
            return Ok(0);
        }
        let tag = self.read_raw_varint32()?;
        if tag_field_number(tag) == 0 {
            return Err(DecodeError::InvalidTag(tag));
        }
        Ok(tag)
    }

    pub fn read_raw_byte(&mut self) -> DecodeResult<u8> {
        if self.pos >= self.limit {
            return Err(DecodeError::Truncated {
                needed: 1,
                available: 0,
            });
        }
        let byte = self.buffer[self.pos];
        self.pos += 1;
        Ok(byte)
    }

    pub fn read_raw_varint64(&mut self) -> DecodeResult<u64> {
        let start = self.pos;
        let mut result: u64 = 0;
        for index in 0..MAX_VARINT_SIZE {
            let byte = self.read_raw_byte()?;
            result |= u64::from(byte & 0x7f) << (7 * index);
            if byte & 0x80 == 0 {
                return Ok(result);
            }
        }
        Err(DecodeError::MalformedVarint { offset: start })
    }

    /* Upper bits of over-long encodings are discarded */
    pub fn read_raw_varint32(&mut self) -> DecodeResult<u32> {
        Ok(self.read_raw_varint64()? as u32)
    }

    pub fn read_int32(&mut self) -> DecodeResult<i32> {
        Ok(self.read_raw_varint64()? as i32)
    }

    pub fn skip_raw_bytes(&mut self, count: usize) -> DecodeResult<()> {
        let available = self.bytes_until_limit();
        if count > available {
            return Err(DecodeError::Truncated {
                needed: count,
                available,
            });
        }
        self.pos += count;
        Ok(())
    }

    /// Skips the value that follows `tag`.
    pub fn skip_field(&mut self, tag: u32) -> DecodeResult<()> {
        match WireType::from_tag(tag) {
            Some(WireType::Varint) => self.read_raw_varint64().map(|_| ()),
            Some(WireType::Fixed64) => self.skip_raw_bytes(8),
            Some(WireType::LengthDelimited) => {
                let length = self.read_raw_varint32()? as usize;
                self.skip_raw_bytes(length)
            }
            Some(WireType::Fixed32) => self.skip_raw_bytes(4),
            _ => Err(DecodeError::UnsupportedWireType {
                tag,
                wire_type: tag & crate::wire::TAG_TYPE_MASK,
            }),
        }
    }

    /// Restricts reads to the next `length` bytes; returns the limit to restore.
    pub fn push_limit(&mut self, length: usize) -> DecodeResult<usize> {
        let available = self.bytes_until_limit();
        if length > available {
            return Err(DecodeError::LimitExceeded { length, available });
        }
        let old_limit = self.limit;
        self.limit = self.pos + length;
        Ok(old_limit)
    }

    pub fn pop_limit(&mut self, old_limit: usize) {
        debug_assert!(old_limit >= self.limit);
        self.limit = old_limit;
    }
}
