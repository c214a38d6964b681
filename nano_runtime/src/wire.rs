/* Wire-format constants, tag construction and varint sizing */

pub const TAG_TYPE_BITS: u32 = 3;
pub const TAG_TYPE_MASK: u32 = (1 << TAG_TYPE_BITS) - 1;

/* Largest encoding of a 64-bit varint */
pub const MAX_VARINT_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum WireType {
    Varint = 0,
    Fixed64 = 1,
    LengthDelimited = 2,
    StartGroup = 3,
    EndGroup = 4,
    Fixed32 = 5,
}

impl WireType {
    pub fn from_tag(tag: u32) -> Option<Self> {
        match tag & TAG_TYPE_MASK {
            0 => Some(WireType::Varint),
            1 => Some(WireType::Fixed64),
            2 => Some(WireType::LengthDelimited),
            3 => Some(WireType::StartGroup),
            4 => Some(WireType::EndGroup),
            5 => Some(WireType::Fixed32),
            _ => None,
        }
    }
}

/* Pair a field number with its wire type */
pub const fn make_tag(field_number: u32, wire_type: WireType) -> u32 {
    (field_number << TAG_TYPE_BITS) | wire_type as u32
}

pub const fn tag_field_number(tag: u32) -> u32 {
    tag >> TAG_TYPE_BITS
}

/* The wire type never changes the byte length of a tag */
pub const fn tag_size(field_number: u32) -> usize {
    compute_raw_varint32_size(make_tag(field_number, WireType::Varint))
}

pub const fn compute_raw_varint32_size(value: u32) -> usize {
    if value & (0xffff_ffff << 7) == 0 {
        1
    } else if value & (0xffff_ffff << 14) == 0 {
        2
    } else if value & (0xffff_ffff << 21) == 0 {
        3
    } else if value & (0xffff_ffff << 28) == 0 {
        4
    } else {
        5
    }
}

pub const fn compute_raw_varint64_size(value: u64) -> usize {
    let mut size = 1;
    let mut rest = value >> 7;
    while rest != 0 {
        size += 1;
        rest >>= 7;
    }
    size
}

/// Negative values are sign-extended to ten bytes on the wire.
pub const fn compute_int32_size_no_tag(value: i32) -> usize {
    if value >= 0 {
        compute_raw_varint32_size(value as u32)
    } else {
        MAX_VARINT_SIZE
    }
}
