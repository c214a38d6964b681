/* Message shell around enum field fragments */

use super::field::{FieldGenerator, make_field_generator};
use super::naming::{
  default_value, escape_rust_keyword, field_name, presence_accessor_name, size_cache_type_name,
};
use crate::codegen::printer::{Printer, Variables};
use crate::params::GeneratorParams;
use crate::schema::resolved::MessageDescriptor;

pub struct MessageGenerator<'a> {
  params: &'a GeneratorParams,
  descriptor: &'a MessageDescriptor,
  fields: Vec<Box<dyn FieldGenerator + 'a>>,
  variables: Variables,
}

impl<'a> MessageGenerator<'a> {
  pub fn new(descriptor: &'a MessageDescriptor, params: &'a GeneratorParams) -> Self {
    let fields = descriptor
      .fields
      .iter()
      .map(|field| make_field_generator(field, params))
      .collect();

    let mut variables = Variables::new();
    variables.insert("classname", escape_rust_keyword(&descriptor.name));
    variables.insert("size_cache", size_cache_type_name(&descriptor.name));

    Self {
      params,
      descriptor,
      fields,
      variables,
    }
  }

  fn has_size_cache(&self) -> bool {
    self.fields.iter().any(|field| field.has_size_cache())
  }

  pub fn generate(&self, printer: &mut Printer) {
    tracing::debug!(
      message = %self.descriptor.name,
      fields = self.fields.len(),
      "emitting message"
    );

    self.generate_struct(printer);
    self.generate_default(printer);
    self.generate_size_cache(printer);

    printer.print(&self.variables, "impl $classname$ {\n");
    printer.indent();
    self.generate_presence_accessors(printer);
    self.generate_merge_from(printer);
    self.generate_merge_from_input(printer);
    self.generate_compute_size(printer);
    self.generate_write_to(printer);
    self.generate_codec_helpers(printer);
    printer.outdent();
    printer.print_raw("}\n\n");
  }

  fn generate_struct(&self, printer: &mut Printer) {
    printer.print(
      &self.variables,
      "/* message $classname$ */\n\
       #[derive(Debug, Clone, PartialEq, Eq)]\n\
       pub struct $classname$ {\n",
    );
    printer.indent();
    for field in &self.fields {
      field.generate_members(printer);
    }
    printer.outdent();
    printer.print_raw("}\n\n");
  }

  fn generate_default(&self, printer: &mut Printer) {
    printer.print(
      &self.variables,
      "impl Default for $classname$ {\n\
       \x20   fn default() -> Self {\n\
       \x20       Self {\n",
    );
    printer.indent();
    printer.indent();
    printer.indent();
    for field in &self.fields {
      field.generate_initialization_code(printer);
    }
    printer.outdent();
    printer.outdent();
    printer.outdent();
    printer.print_raw("        }\n    }\n}\n\n");
  }

  /* Only compute_size can build one, so write_to always sees fresh lengths */
  fn generate_size_cache(&self, printer: &mut Printer) {
    printer.print(
      &self.variables,
      "/// Packed payload lengths computed by `$classname$::compute_size`.\n\
       #[derive(Debug, Clone, Copy, PartialEq, Eq)]\n\
       pub struct $size_cache$ {\n",
    );
    printer.indent();
    for field in &self.fields {
      field.generate_size_cache_members(printer);
    }
    printer.outdent();
    printer.print_raw("}\n\n");

    if self.has_size_cache() {
      printer.print(&self.variables, "impl $size_cache$ {\n");
      printer.indent();
      for field in &self.fields {
        field.generate_size_cache_accessors(printer);
      }
      printer.outdent();
      printer.print_raw("}\n\n");
    }
  }

  /* Presence is "differs from the default"; merge_from relies on these */
  fn generate_presence_accessors(&self, printer: &mut Printer) {
    for field in self.descriptor.fields.iter().filter(|field| !field.is_repeated()) {
      let mut vars = Variables::new();
      vars.insert("name", field_name(field));
      vars.insert("has_name", presence_accessor_name(field));
      vars.insert("default", default_value(self.params, field));
      printer.print(
        &vars,
        "pub fn $has_name$(&self) -> bool {\n\
         \x20   self.$name$ != $default$\n\
         }\n\n",
      );
    }
  }

  fn generate_merge_from(&self, printer: &mut Printer) {
    let other = if self.fields.is_empty() { "_other" } else { "other" };
    printer.print_raw(&format!("pub fn merge_from(&mut self, {other}: &Self) {{\n"));
    printer.indent();
    for field in &self.fields {
      field.generate_merging_code(printer);
    }
    printer.outdent();
    printer.print_raw("}\n\n");
  }

  fn generate_merge_from_input(&self, printer: &mut Printer) {
    printer.print_raw(
      "pub fn merge_from_input(&mut self, input: &mut nano::CodedInputStream<'_>) -> nano::DecodeResult<()> {\n\
       \x20   loop {\n\
       \x20       let tag = input.read_tag()?;\n\
       \x20       match tag {\n\
       \x20           0 => return Ok(()),\n",
    );
    printer.indent();
    printer.indent();
    printer.indent();
    for field in &self.fields {
      printer.print_raw(&format!("{} => {{\n", field.parse_tag()));
      printer.indent();
      field.generate_parsing_code(printer);
      printer.outdent();
      printer.print_raw("}\n");
      if let Some(alternate_tag) = field.alternate_parse_tag() {
        printer.print_raw(&format!("{} => {{\n", alternate_tag));
        printer.indent();
        field.generate_alternate_parsing_code(printer);
        printer.outdent();
        printer.print_raw("}\n");
      }
    }
    printer.print_raw("_ => input.skip_field(tag)?,\n");
    printer.outdent();
    printer.outdent();
    printer.outdent();
    printer.print_raw("        }\n    }\n}\n\n");
  }

  fn generate_compute_size(&self, printer: &mut Printer) {
    printer.print(
      &self.variables,
      "/// Returns the encoded length and the payload lengths `write_to` needs.\n\
       pub fn compute_size(&self) -> (usize, $size_cache$) {\n\
       \x20   let mut size = 0;\n\
       \x20   let mut size_cache = $size_cache$ {\n",
    );
    printer.indent();
    printer.indent();
    for field in &self.fields {
      field.generate_size_cache_initialization_code(printer);
    }
    printer.outdent();
    printer.print_raw("};\n");
    for field in &self.fields {
      field.generate_serialized_size_code(printer);
    }
    printer.print_raw("(size, size_cache)\n");
    printer.outdent();
    printer.print_raw("}\n\n");
  }

  fn generate_write_to(&self, printer: &mut Printer) {
    let size_cache = if self.has_size_cache() { "size_cache" } else { "_size_cache" };
    let output = if self.fields.is_empty() { "_output" } else { "output" };
    let mut vars = self.variables.clone();
    vars.insert("size_cache_arg", size_cache.to_string());
    vars.insert("output_arg", output.to_string());
    printer.print(
      &vars,
      "/// Serializes with payload lengths from the `compute_size` call made on this unchanged message.\n\
       pub fn write_to(&self, $output_arg$: &mut nano::CodedOutputStream, $size_cache_arg$: &$size_cache$) {\n",
    );
    printer.indent();
    for field in &self.fields {
      field.generate_serialization_code(printer);
    }
    printer.outdent();
    printer.print_raw("}\n\n");
  }

  fn generate_codec_helpers(&self, printer: &mut Printer) {
    printer.print_raw(
      "pub fn encode_to_vec(&self) -> Vec<u8> {\n\
       \x20   let (size, size_cache) = self.compute_size();\n\
       \x20   let mut output = nano::CodedOutputStream::with_capacity(size);\n\
       \x20   self.write_to(&mut output, &size_cache);\n\
       \x20   debug_assert_eq!(output.len(), size);\n\
       \x20   output.into_inner()\n\
       }\n\
       \n\
       pub fn decode(bytes: &[u8]) -> nano::DecodeResult<Self> {\n\
       \x20   let mut message = Self::default();\n\
       \x20   message.merge_from_input(&mut nano::CodedInputStream::new(bytes))?;\n\
       \x20   Ok(message)\n\
       }\n",
    );
  }
}
