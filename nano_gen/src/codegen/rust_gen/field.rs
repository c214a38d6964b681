/* Per-field emission entry points, one generator per field */

use super::enum_field::{EnumFieldGenerator, RepeatedEnumFieldGenerator};
use crate::codegen::printer::Printer;
use crate::params::GeneratorParams;
use crate::schema::resolved::FieldDescriptor;

/// Fragments a field contributes to its message.
///
/// Each method targets a different region of the generated message and may
/// be called in any order. Generated fragments assume these bindings:
/// `self` (the message), `other` in merge, `input` in parse, `output` and
/// `size_cache` in serialize, `size` and `size_cache` in size.
pub trait FieldGenerator {
  /* Tag that routes a parsed field to generate_parsing_code */
  fn parse_tag(&self) -> u32;

  fn generate_members(&self, printer: &mut Printer);

  /* Field initializer inside the message's Default impl */
  fn generate_initialization_code(&self, printer: &mut Printer);

  fn generate_merging_code(&self, printer: &mut Printer);

  fn generate_parsing_code(&self, printer: &mut Printer);

  /* Second tag routed to this field, for fields that accept two encodings */
  fn alternate_parse_tag(&self) -> Option<u32> {
    None
  }

  fn generate_alternate_parsing_code(&self, _printer: &mut Printer) {}

  fn generate_serialization_code(&self, printer: &mut Printer);

  fn generate_serialized_size_code(&self, printer: &mut Printer);

  /* Whether the field keeps a payload length in the message's size cache */
  fn has_size_cache(&self) -> bool {
    false
  }

  fn generate_size_cache_members(&self, _printer: &mut Printer) {}

  fn generate_size_cache_initialization_code(&self, _printer: &mut Printer) {}

  fn generate_size_cache_accessors(&self, _printer: &mut Printer) {}
}

pub fn make_field_generator<'a>(
  field: &'a FieldDescriptor,
  params: &'a GeneratorParams,
) -> Box<dyn FieldGenerator + 'a> {
  if field.is_repeated() {
    Box::new(RepeatedEnumFieldGenerator::new(field, params))
  } else {
    Box::new(EnumFieldGenerator::new(field, params))
  }
}
