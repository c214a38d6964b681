/* Writing side of the wire runtime */

use crate::wire::{WireType, make_tag};

/// Growable output buffer. Writes never fail.
#[derive(Debug, Default, Clone)]
pub struct CodedOutputStream {
    buffer: Vec<u8>,
}

impl CodedOutputStream {
    pub fn new() -> Self {
        Self::default()
    }

    /* Size the buffer from a prior compute_size() pass */
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buffer
    }

    pub fn write_raw_byte(&mut self, value: u8) {
        self.buffer.push(value);
    }

    pub fn write_raw_varint32(&mut self, value: u32) {
        self.write_raw_varint64(u64::from(value));
    }

    pub fn write_raw_varint64(&mut self, mut value: u64) {
        while value >= 0x80 {
            self.buffer.push((value as u8 & 0x7f) | 0x80);
            value >>= 7;
        }
        self.buffer.push(value as u8);
    }

    /// Negative values are sign-extended, matching `compute_int32_size_no_tag`.
    pub fn write_int32_no_tag(&mut self, value: i32) {
        if value >= 0 {
            self.write_raw_varint32(value as u32);
        } else {
            self.write_raw_varint64(value as i64 as u64);
        }
    }

    pub fn write_tag(&mut self, field_number: u32, wire_type: WireType) {
        self.write_raw_varint32(make_tag(field_number, wire_type));
    }

    pub fn write_int32(&mut self, field_number: u32, value: i32) {
        self.write_tag(field_number, WireType::Varint);
        self.write_int32_no_tag(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::compute_int32_size_no_tag;

    #[test]
    fn int32_encoding_matches_prost() {
        for value in [0, 1, 127, 128, 300, i32::MAX, -1, -3, i32::MIN] {
            let mut output = CodedOutputStream::new();
            output.write_int32(5, value);

            let mut expected = Vec::new();
            prost::encoding::int32::encode(5, &value, &mut expected);
            assert_eq!(output.as_slice(), expected.as_slice(), "value {value}");
        }
    }

    #[test]
    fn written_length_matches_computed_size() {
        for value in [0, 99, 1 << 20, -7] {
            let mut output = CodedOutputStream::new();
            output.write_int32_no_tag(value);
            assert_eq!(output.len(), compute_int32_size_no_tag(value));
        }
    }
}
