mod enum_field;
pub mod enums;
pub mod field;
pub mod message;
pub mod naming;

pub use enum_field::{EnumFieldGenerator, RepeatedEnumFieldGenerator};
pub use enums::{Alias, EnumGenerator, EnumPartition};
pub use field::{FieldGenerator, make_field_generator};
pub use message::MessageGenerator;
