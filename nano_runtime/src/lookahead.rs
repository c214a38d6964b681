/* Element counting ahead of allocation. Both helpers leave the stream where they found it. */

use crate::error::DecodeResult;
use crate::input::CodedInputStream;

/// Counts how many consecutive values of the field identified by `tag` start
/// at the current position. The caller has already consumed the first tag,
/// so the result is always at least one.
pub fn repeated_field_array_length(
    input: &mut CodedInputStream<'_>,
    tag: u32,
) -> DecodeResult<usize> {
    let start = input.position();
    let mut array_length = 1;
    let counted = (|| -> DecodeResult<()> {
        input.skip_field(tag)?;
        while !input.is_at_end() {
            if input.read_tag()? != tag {
                break;
            }
            input.skip_field(tag)?;
            array_length += 1;
        }
        Ok(())
    })();
    input.rewind_to_position(start);
    counted.map(|()| array_length)
}

/// Counts the varints left before the current limit, as pushed for a packed run.
pub fn packed_repeated_field_array_length(input: &mut CodedInputStream<'_>) -> DecodeResult<usize> {
    let start = input.position();
    let mut array_length = 0;
    let counted = (|| -> DecodeResult<()> {
        while !input.is_at_end() {
            input.read_raw_varint64()?;
            array_length += 1;
        }
        Ok(())
    })();
    input.rewind_to_position(start);
    counted.map(|()| array_length)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::{WireType, make_tag};

    #[test]
    fn counts_consecutive_tagged_values() {
        let tag = make_tag(3, WireType::Varint);
        let mut bytes = Vec::new();
        prost::encoding::int32::encode_repeated(3, &[7, -3, 0], &mut bytes);
        prost::encoding::int32::encode(4, &1, &mut bytes);

        let mut input = CodedInputStream::new(&bytes);
        assert_eq!(input.read_tag().unwrap(), tag);
        let start = input.position();
        assert_eq!(repeated_field_array_length(&mut input, tag).unwrap(), 3);
        assert_eq!(input.position(), start);
    }

    #[test]
    fn single_value_counts_as_one() {
        let tag = make_tag(1, WireType::Varint);
        let bytes = [0x08, 0x05];
        let mut input = CodedInputStream::new(&bytes);
        input.read_tag().unwrap();
        assert_eq!(repeated_field_array_length(&mut input, tag).unwrap(), 1);
    }

    #[test]
    fn counts_packed_values_within_limit() {
        let values = [1, 300, -2, 0];
        let mut bytes = Vec::new();
        prost::encoding::int32::encode_packed(2, &values, &mut bytes);
        bytes.push(0x7f);

        let mut input = CodedInputStream::new(&bytes);
        input.read_tag().unwrap();
        let length = input.read_raw_varint32().unwrap() as usize;
        let old = input.push_limit(length).unwrap();
        let start = input.position();
        assert_eq!(packed_repeated_field_array_length(&mut input).unwrap(), 4);
        assert_eq!(input.position(), start);
        input.pop_limit(old);
    }

    #[test]
    fn truncated_run_reports_error_and_rewinds() {
        let bytes = [0x08, 0x05, 0x08];
        let mut input = CodedInputStream::new(&bytes);
        input.read_tag().unwrap();
        let start = input.position();
        assert!(repeated_field_array_length(&mut input, 8).is_err());
        assert_eq!(input.position(), start);
    }
}
