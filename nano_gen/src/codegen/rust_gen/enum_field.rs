/* Singular and repeated enum-typed fields, stored as i32 */

use super::field::FieldGenerator;
use super::naming::{default_value, field_name, presence_accessor_name, underscores_to_capitalized_camel_case};
use crate::codegen::printer::{Printer, Variables};
use crate::params::GeneratorParams;
use crate::schema::resolved::FieldDescriptor;
use nano_runtime::{WireType, make_tag};

fn set_enum_variables(params: &GeneratorParams, descriptor: &FieldDescriptor) -> Variables {
  let mut variables = Variables::new();
  variables.insert("name", field_name(descriptor));
  variables.insert("has_name", presence_accessor_name(descriptor));
  variables.insert(
    "capitalized_name",
    underscores_to_capitalized_camel_case(&descriptor.name),
  );
  variables.insert("number", descriptor.number.to_string());
  variables.insert("type", "i32".to_string());
  variables.insert("default", default_value(params, descriptor));
  variables.insert("tag", descriptor.tag().to_string());
  variables.insert(
    "unpacked_tag",
    make_tag(descriptor.number, WireType::Varint).to_string(),
  );
  variables.insert("tag_size", descriptor.tag_size().to_string());
  variables.insert("message_name", descriptor.message_name.clone());
  variables
}

// ===================================================================

pub struct EnumFieldGenerator<'a> {
  descriptor: &'a FieldDescriptor,
  variables: Variables,
}

impl<'a> EnumFieldGenerator<'a> {
  pub fn new(descriptor: &'a FieldDescriptor, params: &GeneratorParams) -> Self {
    Self {
      descriptor,
      variables: set_enum_variables(params, descriptor),
    }
  }

  pub fn variables(&self) -> &Variables {
    &self.variables
  }
}

impl FieldGenerator for EnumFieldGenerator<'_> {
  fn parse_tag(&self) -> u32 {
    self.descriptor.tag()
  }

  fn generate_members(&self, printer: &mut Printer) {
    printer.print(&self.variables, "/* $message_name$.$capitalized_name$ = $number$ */\n");
    printer.print(&self.variables, "pub $name$: $type$,\n");
  }

  fn generate_initialization_code(&self, printer: &mut Printer) {
    printer.print(&self.variables, "$name$: $default$,\n");
  }

  fn generate_merging_code(&self, printer: &mut Printer) {
    printer.print(
      &self.variables,
      "if other.$has_name$() {\n\
       \x20   self.$name$ = other.$name$;\n\
       }\n",
    );
  }

  /* Unknown numbers are kept as read */
  fn generate_parsing_code(&self, printer: &mut Printer) {
    printer.print(&self.variables, "self.$name$ = input.read_int32()?;\n");
  }

  fn generate_serialization_code(&self, printer: &mut Printer) {
    printer.print(
      &self.variables,
      "if self.$name$ != $default$ {\n\
       \x20   output.write_raw_varint32($tag$);\n\
       \x20   output.write_int32_no_tag(self.$name$);\n\
       }\n",
    );
  }

  fn generate_serialized_size_code(&self, printer: &mut Printer) {
    printer.print(
      &self.variables,
      "if self.$name$ != $default$ {\n\
       \x20   size += $tag_size$ + nano::compute_int32_size_no_tag(self.$name$);\n\
       }\n",
    );
  }
}

// ===================================================================

pub struct RepeatedEnumFieldGenerator<'a> {
  descriptor: &'a FieldDescriptor,
  variables: Variables,
}

impl<'a> RepeatedEnumFieldGenerator<'a> {
  pub fn new(descriptor: &'a FieldDescriptor, params: &GeneratorParams) -> Self {
    Self {
      descriptor,
      variables: set_enum_variables(params, descriptor),
    }
  }

  pub fn variables(&self) -> &Variables {
    &self.variables
  }

  /* On a packed field a run replaces prior content; on an unpacked one it extends it */
  fn generate_packed_parsing_code(&self, printer: &mut Printer, replace: bool) {
    printer.print(
      &self.variables,
      "let length = input.read_raw_varint32()? as usize;\n\
       let limit = input.push_limit(length)?;\n\
       let array_length = nano::packed_repeated_field_array_length(input)?;\n",
    );
    if replace {
      printer.print(&self.variables, "self.$name$.clear();\n");
    }
    printer.print(
      &self.variables,
      "self.$name$.reserve_exact(array_length);\n\
       for _ in 0..array_length {\n\
       \x20   self.$name$.push(input.read_int32()?);\n\
       }\n\
       input.pop_limit(limit);\n",
    );
  }

  /* The tag already read accounts for the first element */
  fn generate_unpacked_parsing_code(&self, printer: &mut Printer) {
    printer.print(
      &self.variables,
      "let array_length = nano::repeated_field_array_length(input, $unpacked_tag$)?;\n\
       self.$name$.reserve_exact(array_length);\n\
       for _ in 1..array_length {\n\
       \x20   self.$name$.push(input.read_int32()?);\n\
       \x20   input.read_tag()?;\n\
       }\n\
       // Last one without read_tag.\n\
       self.$name$.push(input.read_int32()?);\n",
    );
  }
}

impl FieldGenerator for RepeatedEnumFieldGenerator<'_> {
  fn parse_tag(&self) -> u32 {
    self.descriptor.tag()
  }

  fn generate_members(&self, printer: &mut Printer) {
    printer.print(&self.variables, "/* $message_name$.$capitalized_name$ = $number$ */\n");
    printer.print(&self.variables, "pub $name$: Vec<$type$>,\n");
  }

  fn generate_initialization_code(&self, printer: &mut Printer) {
    printer.print(&self.variables, "$name$: Vec::new(),\n");
  }

  fn generate_merging_code(&self, printer: &mut Printer) {
    printer.print(&self.variables, "self.$name$.extend_from_slice(&other.$name$);\n");
  }

  fn generate_parsing_code(&self, printer: &mut Printer) {
    if self.descriptor.is_packed() {
      self.generate_packed_parsing_code(printer, true);
    } else {
      self.generate_unpacked_parsing_code(printer);
    }
  }

  /* Writers may pick either encoding for a repeated field, so accept the other one too */
  fn alternate_parse_tag(&self) -> Option<u32> {
    let wire_type = if self.descriptor.is_packed() {
      WireType::Varint
    } else {
      WireType::LengthDelimited
    };
    Some(make_tag(self.descriptor.number, wire_type))
  }

  fn generate_alternate_parsing_code(&self, printer: &mut Printer) {
    if self.descriptor.is_packed() {
      self.generate_unpacked_parsing_code(printer);
    } else {
      self.generate_packed_parsing_code(printer, false);
    }
  }

  fn generate_serialization_code(&self, printer: &mut Printer) {
    printer.print(&self.variables, "if !self.$name$.is_empty() {\n");
    printer.indent();

    if self.descriptor.is_packed() {
      printer.print(
        &self.variables,
        "output.write_raw_varint32($tag$);\n\
         output.write_raw_varint32(size_cache.$name$ as u32);\n\
         for &element in &self.$name$ {\n\
         \x20   output.write_int32_no_tag(element);\n\
         }\n",
      );
    } else {
      printer.print(
        &self.variables,
        "for &element in &self.$name$ {\n\
         \x20   output.write_raw_varint32($tag$);\n\
         \x20   output.write_int32_no_tag(element);\n\
         }\n",
      );
    }

    printer.outdent();
    printer.print_raw("}\n");
  }

  fn generate_serialized_size_code(&self, printer: &mut Printer) {
    printer.print(&self.variables, "if !self.$name$.is_empty() {\n");
    printer.indent();

    printer.print(
      &self.variables,
      "let data_size: usize = self\n\
       \x20   .$name$\n\
       \x20   .iter()\n\
       \x20   .map(|&element| nano::compute_int32_size_no_tag(element))\n\
       \x20   .sum();\n\
       size += data_size;\n",
    );
    if self.descriptor.is_packed() {
      // Keep the payload length for write_to.
      printer.print(
        &self.variables,
        "size += $tag_size$;\n\
         size += nano::compute_raw_varint32_size(data_size as u32);\n\
         size_cache.$name$ = data_size;\n",
      );
    } else {
      printer.print(&self.variables, "size += $tag_size$ * self.$name$.len();\n");
    }

    printer.outdent();

    // An empty packed field must not leave a stale payload length behind.
    if self.descriptor.is_packed() {
      printer.print(
        &self.variables,
        "} else {\n\
         \x20   size_cache.$name$ = 0;\n\
         }\n",
      );
    } else {
      printer.print_raw("}\n");
    }
  }

  fn has_size_cache(&self) -> bool {
    self.descriptor.is_packed()
  }

  fn generate_size_cache_members(&self, printer: &mut Printer) {
    if self.descriptor.is_packed() {
      printer.print(&self.variables, "$name$: usize,\n");
    }
  }

  fn generate_size_cache_initialization_code(&self, printer: &mut Printer) {
    if self.descriptor.is_packed() {
      printer.print(&self.variables, "$name$: 0,\n");
    }
  }

  fn generate_size_cache_accessors(&self, printer: &mut Printer) {
    if self.descriptor.is_packed() {
      printer.print(
        &self.variables,
        "/* Encoded payload length of $name$, without tag and length prefix */\n\
         pub fn $name$(&self) -> usize {\n\
         \x20   self.$name$\n\
         }\n",
      );
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::schema::resolved::EnumValueDescriptor;
  use crate::schema::types::Label;

  fn field(name: &str, number: u32, label: Label, packed: bool) -> FieldDescriptor {
    FieldDescriptor {
      name: name.to_string(),
      number,
      label,
      packed,
      enum_name: "Color".to_string(),
      default_value: EnumValueDescriptor {
        name: "RED".to_string(),
        number: 0,
        index: 0,
        enum_name: "Color".to_string(),
      },
      message_name: "Shirt".to_string(),
    }
  }

  fn emit(generator: &dyn FieldGenerator, op: fn(&dyn FieldGenerator, &mut Printer)) -> String {
    let mut printer = Printer::new();
    op(generator, &mut printer);
    printer.into_string()
  }

  #[test]
  fn context_carries_every_placeholder() {
    let descriptor = field("favorite_color", 17, Label::Optional, false);
    let params = GeneratorParams::default();
    let generator = EnumFieldGenerator::new(&descriptor, &params);
    let vars = generator.variables();
    assert_eq!(vars["name"], "favorite_color");
    assert_eq!(vars["capitalized_name"], "FavoriteColor");
    assert_eq!(vars["number"], "17");
    assert_eq!(vars["default"], "Color::RED");
    assert_eq!(vars["tag"], "136");
    assert_eq!(vars["tag_size"], "2");
    assert_eq!(vars["message_name"], "Shirt");
  }

  #[test]
  fn singular_storage_is_plain_integer() {
    let descriptor = field("color", 1, Label::Optional, false);
    let params = GeneratorParams::default();
    let generator = EnumFieldGenerator::new(&descriptor, &params);
    assert_eq!(
      emit(&generator, |g, p| g.generate_members(p)),
      "/* Shirt.Color = 1 */\npub color: i32,\n"
    );
    assert_eq!(
      emit(&generator, |g, p| g.generate_initialization_code(p)),
      "color: Color::RED,\n"
    );
  }

  #[test]
  fn singular_merge_uses_presence_accessor() {
    let descriptor = field("color", 1, Label::Optional, false);
    let params = GeneratorParams::default();
    let generator = EnumFieldGenerator::new(&descriptor, &params);
    assert_eq!(
      emit(&generator, |g, p| g.generate_merging_code(p)),
      "if other.has_color() {\n    self.color = other.color;\n}\n"
    );
  }

  #[test]
  fn singular_serialize_and_size_elide_default() {
    let descriptor = field("color", 1, Label::Optional, false);
    let params = GeneratorParams::default();
    let generator = EnumFieldGenerator::new(&descriptor, &params);
    assert_eq!(
      emit(&generator, |g, p| g.generate_serialization_code(p)),
      "if self.color != Color::RED {\n    output.write_raw_varint32(8);\n    output.write_int32_no_tag(self.color);\n}\n"
    );
    assert_eq!(
      emit(&generator, |g, p| g.generate_serialized_size_code(p)),
      "if self.color != Color::RED {\n    size += 1 + nano::compute_int32_size_no_tag(self.color);\n}\n"
    );
    assert!(!generator.has_size_cache());
  }

  #[test]
  fn repeated_merge_appends() {
    let descriptor = field("sizes", 2, Label::Repeated, false);
    let params = GeneratorParams::default();
    let generator = RepeatedEnumFieldGenerator::new(&descriptor, &params);
    assert_eq!(
      emit(&generator, |g, p| g.generate_merging_code(p)),
      "self.sizes.extend_from_slice(&other.sizes);\n"
    );
  }

  #[test]
  fn unpacked_parse_reads_tag_between_elements_only() {
    let descriptor = field("sizes", 2, Label::Repeated, false);
    let params = GeneratorParams::default();
    let generator = RepeatedEnumFieldGenerator::new(&descriptor, &params);
    assert_eq!(generator.parse_tag(), 16);
    let code = emit(&generator, |g, p| g.generate_parsing_code(p));
    assert!(code.starts_with("let array_length = nano::repeated_field_array_length(input, 16)?;\n"));
    assert!(code.contains("for _ in 1..array_length {\n    self.sizes.push(input.read_int32()?);\n    input.read_tag()?;\n}\n"));
    assert!(code.ends_with("// Last one without read_tag.\nself.sizes.push(input.read_int32()?);\n"));
  }

  #[test]
  fn packed_parse_reads_one_delimited_run() {
    let descriptor = field("sizes", 2, Label::Repeated, true);
    let params = GeneratorParams::default();
    let generator = RepeatedEnumFieldGenerator::new(&descriptor, &params);
    assert_eq!(generator.parse_tag(), 18);
    let code = emit(&generator, |g, p| g.generate_parsing_code(p));
    assert!(code.contains("let limit = input.push_limit(length)?;"));
    assert!(code.contains("nano::packed_repeated_field_array_length(input)?"));
    assert!(code.contains("self.sizes.clear();\nself.sizes.reserve_exact(array_length);"));
    assert!(!code.contains("read_tag"));
    assert!(code.ends_with("input.pop_limit(limit);\n"));
  }

  #[test]
  fn repeated_fields_accept_the_other_encoding() {
    let params = GeneratorParams::default();

    let packed = field("sizes", 2, Label::Repeated, true);
    let generator = RepeatedEnumFieldGenerator::new(&packed, &params);
    assert_eq!(generator.alternate_parse_tag(), Some(16));
    let code = emit(&generator, |g, p| g.generate_alternate_parsing_code(p));
    assert!(code.starts_with("let array_length = nano::repeated_field_array_length(input, 16)?;\n"));

    let unpacked = field("sizes", 2, Label::Repeated, false);
    let generator = RepeatedEnumFieldGenerator::new(&unpacked, &params);
    assert_eq!(generator.alternate_parse_tag(), Some(18));
    let code = emit(&generator, |g, p| g.generate_alternate_parsing_code(p));
    assert!(code.contains("nano::packed_repeated_field_array_length(input)?"));
    assert!(!code.contains("clear()"));

    let singular = field("color", 1, Label::Optional, false);
    assert_eq!(EnumFieldGenerator::new(&singular, &params).alternate_parse_tag(), None);
  }

  #[test]
  fn keyword_field_gets_plain_presence_accessor() {
    let descriptor = field("type", 1, Label::Optional, false);
    let params = GeneratorParams::default();
    let generator = EnumFieldGenerator::new(&descriptor, &params);
    assert_eq!(generator.variables()["name"], "r#type");
    assert_eq!(generator.variables()["has_name"], "has_type");
    assert_eq!(
      emit(&generator, |g, p| g.generate_merging_code(p)),
      "if other.has_type() {\n    self.r#type = other.r#type;\n}\n"
    );
  }

  #[test]
  fn unpacked_serialize_tags_every_element() {
    let descriptor = field("sizes", 2, Label::Repeated, false);
    let params = GeneratorParams::default();
    let generator = RepeatedEnumFieldGenerator::new(&descriptor, &params);
    assert_eq!(
      emit(&generator, |g, p| g.generate_serialization_code(p)),
      "if !self.sizes.is_empty() {\n    for &element in &self.sizes {\n        output.write_raw_varint32(16);\n        output.write_int32_no_tag(element);\n    }\n}\n"
    );
  }

  #[test]
  fn packed_serialize_reads_length_from_size_cache() {
    let descriptor = field("sizes", 2, Label::Repeated, true);
    let params = GeneratorParams::default();
    let generator = RepeatedEnumFieldGenerator::new(&descriptor, &params);
    let code = emit(&generator, |g, p| g.generate_serialization_code(p));
    assert!(code.contains("output.write_raw_varint32(18);\n    output.write_raw_varint32(size_cache.sizes as u32);\n"));
    assert!(!code.contains("compute_int32_size_no_tag"));
  }

  #[test]
  fn unpacked_size_counts_one_tag_per_element() {
    let descriptor = field("sizes", 2, Label::Repeated, false);
    let params = GeneratorParams::default();
    let generator = RepeatedEnumFieldGenerator::new(&descriptor, &params);
    let code = emit(&generator, |g, p| g.generate_serialized_size_code(p));
    assert!(code.contains("size += 1 * self.sizes.len();"));
    assert!(!code.contains("size_cache"));
    assert!(code.ends_with("}\n"));
    assert!(!generator.has_size_cache());
  }

  #[test]
  fn packed_size_fills_and_resets_cache() {
    let descriptor = field("sizes", 2, Label::Repeated, true);
    let params = GeneratorParams::default();
    let generator = RepeatedEnumFieldGenerator::new(&descriptor, &params);
    let code = emit(&generator, |g, p| g.generate_serialized_size_code(p));
    assert!(code.contains("size += nano::compute_raw_varint32_size(data_size as u32);\n    size_cache.sizes = data_size;\n"));
    assert!(code.ends_with("} else {\n    size_cache.sizes = 0;\n}\n"));
    assert!(generator.has_size_cache());
    assert_eq!(emit(&generator, |g, p| g.generate_size_cache_members(p)), "sizes: usize,\n");
    assert_eq!(
      emit(&generator, |g, p| g.generate_size_cache_initialization_code(p)),
      "sizes: 0,\n"
    );
  }

  #[test]
  fn packed_flag_ignored_on_singular_field() {
    let descriptor = field("color", 3, Label::Optional, true);
    let params = GeneratorParams::default();
    let generator = EnumFieldGenerator::new(&descriptor, &params);
    assert_eq!(generator.variables()["tag"], "24");
  }
}
