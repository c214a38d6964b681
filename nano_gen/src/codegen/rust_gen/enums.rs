/* Enumeration constants: canonical values carry numbers, aliases reference them */

use super::naming::{enum_type_name, enum_value_name, enum_value_ref};
use crate::codegen::printer::{Printer, Variables};
use crate::params::{EnumStyle, GeneratorParams};
use crate::schema::resolved::{EnumDescriptor, EnumValueDescriptor};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alias<'a> {
  pub value: &'a EnumValueDescriptor,
  /* Always canonical itself, never another alias */
  pub canonical_value: &'a EnumValueDescriptor,
}

/// Split of an enumeration's values into canonical values and aliases.
///
/// For each number the value declared first is canonical; every later value
/// with that number is an alias pointing straight at it.
#[derive(Debug, Clone)]
pub struct EnumPartition<'a> {
  pub canonical_values: Vec<&'a EnumValueDescriptor>,
  pub aliases: Vec<Alias<'a>>,
}

impl<'a> EnumPartition<'a> {
  pub fn new(descriptor: &'a EnumDescriptor) -> Self {
    let values = descriptor.values();

    /* number -> index of the first value declaring it */
    let mut first_by_number: HashMap<i32, usize> = HashMap::with_capacity(values.len());
    for (index, value) in values.iter().enumerate() {
      first_by_number.entry(value.number).or_insert(index);
    }

    let mut canonical_values = Vec::new();
    let mut aliases = Vec::new();
    for (index, value) in values.iter().enumerate() {
      let canonical_index = first_by_number[&value.number];
      if canonical_index == index {
        canonical_values.push(value);
      } else {
        aliases.push(Alias {
          value,
          canonical_value: &values[canonical_index],
        });
      }
    }

    Self {
      canonical_values,
      aliases,
    }
  }

  pub fn is_canonical(&self, value: &EnumValueDescriptor) -> bool {
    self.canonical_values.iter().any(|canonical| canonical.index == value.index)
  }

  /* Canonical value standing for `value`; a canonical value maps to itself */
  pub fn canonical_of(&self, value: &'a EnumValueDescriptor) -> &'a EnumValueDescriptor {
    self
      .aliases
      .iter()
      .find(|alias| alias.value.index == value.index)
      .map(|alias| alias.canonical_value)
      .unwrap_or(value)
  }
}

pub struct EnumGenerator<'a> {
  params: &'a GeneratorParams,
  descriptor: &'a EnumDescriptor,
  partition: EnumPartition<'a>,
}

impl<'a> EnumGenerator<'a> {
  pub fn new(descriptor: &'a EnumDescriptor, params: &'a GeneratorParams) -> Self {
    Self {
      params,
      descriptor,
      partition: EnumPartition::new(descriptor),
    }
  }

  pub fn partition(&self) -> &EnumPartition<'a> {
    &self.partition
  }

  pub fn generate(&self, printer: &mut Printer) {
    tracing::debug!(
      enum_name = %self.descriptor.name,
      canonical = self.partition.canonical_values.len(),
      aliases = self.partition.aliases.len(),
      "emitting enum"
    );

    let mut vars = Variables::new();
    vars.insert("classname", enum_type_name(self.descriptor));
    printer.print(&vars, "/* enum $classname$ */\n");

    let use_shell = self.params.enum_style == EnumStyle::Shell;
    if use_shell {
      printer.print(
        &vars,
        "#[derive(Debug, Clone, Copy, PartialEq, Eq)]\n\
         pub struct $classname$;\n\
         \n\
         impl $classname$ {\n",
      );
      printer.indent();
    }

    for value in &self.partition.canonical_values {
      let mut value_vars = Variables::new();
      value_vars.insert("name", enum_value_name(self.params, value));
      value_vars.insert("canonical_value", value.number.to_string());
      printer.print(&value_vars, "pub const $name$: i32 = $canonical_value$;\n");
    }

    for alias in &self.partition.aliases {
      let canonical_name = if use_shell {
        format!("Self::{}", enum_value_name(self.params, alias.canonical_value))
      } else {
        enum_value_ref(self.params, alias.canonical_value)
      };
      let mut value_vars = Variables::new();
      value_vars.insert("name", enum_value_name(self.params, alias.value));
      value_vars.insert("canonical_name", canonical_name);
      printer.print(&value_vars, "pub const $name$: i32 = $canonical_name$;\n");
    }

    if use_shell {
      printer.outdent();
      printer.print_raw("}\n");
    }
    printer.print_raw("\n");
  }
}
