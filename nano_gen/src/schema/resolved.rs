/* Descriptors resolved from a parsed schema file.
 *
 * Resolution only links names: field types to enumerations and declared
 * defaults to enum values. Everything else about the schema is trusted. */

use crate::schema::types::{EnumDef, FieldDef, Label, MessageDef, SchemaFile};
use indexmap::IndexMap;
use nano_runtime::{WireType, make_tag, tag_size};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
  #[error("field '{message}.{field}' references unknown enum '{type_name}'")]
  UnknownEnum {
    message: String,
    field: String,
    type_name: String,
  },

  #[error("field '{message}.{field}' defaults to '{value}', which is not a value of enum '{enum_name}'")]
  UnknownDefault {
    message: String,
    field: String,
    value: String,
    enum_name: String,
  },

  #[error("field '{message}.{field}' has enum type '{enum_name}' with no values to default to")]
  EmptyEnum {
    message: String,
    field: String,
    enum_name: String,
  },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValueDescriptor {
  pub name: String,
  pub number: i32,
  /* Position in the declaring enum's value list */
  pub index: usize,
  /* Name of the owning enumeration */
  pub enum_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDescriptor {
  pub name: String,
  values: Vec<EnumValueDescriptor>,
}

impl EnumDescriptor {
  pub fn from_def(def: &EnumDef) -> Self {
    let values = def
      .values
      .iter()
      .enumerate()
      .map(|(index, value)| EnumValueDescriptor {
        name: value.name.clone(),
        number: value.number,
        index,
        enum_name: def.name.clone(),
      })
      .collect();
    Self { name: def.name.clone(), values }
  }

  /* Values in declaration order */
  pub fn values(&self) -> &[EnumValueDescriptor] {
    &self.values
  }

  /* First declared value carrying `number` */
  pub fn find_value_by_number(&self, number: i32) -> Option<&EnumValueDescriptor> {
    self.values.iter().find(|value| value.number == number)
  }

  pub fn find_value_by_name(&self, name: &str) -> Option<&EnumValueDescriptor> {
    self.values.iter().find(|value| value.name == name)
  }

  pub fn first_value(&self) -> Option<&EnumValueDescriptor> {
    self.values.first()
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
  pub name: String,
  pub number: u32,
  pub label: Label,
  /* As declared; only honored for repeated fields */
  pub packed: bool,
  pub enum_name: String,
  pub default_value: EnumValueDescriptor,
  pub message_name: String,
}

impl FieldDescriptor {
  pub fn is_repeated(&self) -> bool {
    self.label == Label::Repeated
  }

  pub fn is_packed(&self) -> bool {
    self.is_repeated() && self.packed
  }

  pub fn wire_type(&self) -> WireType {
    if self.is_packed() {
      WireType::LengthDelimited
    } else {
      WireType::Varint
    }
  }

  pub fn tag(&self) -> u32 {
    make_tag(self.number, self.wire_type())
  }

  pub fn tag_size(&self) -> usize {
    tag_size(self.number)
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDescriptor {
  pub name: String,
  pub fields: Vec<FieldDescriptor>,
}

/* All descriptors of one package, in declaration order */
#[derive(Debug, Clone, Default)]
pub struct DescriptorPool {
  pub package: String,
  enums: IndexMap<String, EnumDescriptor>,
  messages: Vec<MessageDescriptor>,
}

impl DescriptorPool {
  pub fn new(package: impl Into<String>) -> Self {
    Self {
      package: package.into(),
      enums: IndexMap::new(),
      messages: Vec::new(),
    }
  }

  /* Resolve every definition of a schema file */
  pub fn from_schema(file: &SchemaFile) -> Result<Self, ResolveError> {
    let mut pool = Self::new(file.package());
    for def in &file.enums {
      pool.add_enum(def);
    }
    for def in &file.messages {
      pool.add_message(def)?;
    }
    Ok(pool)
  }

  pub fn add_enum(&mut self, def: &EnumDef) {
    self.enums.insert(def.name.clone(), EnumDescriptor::from_def(def));
  }

  pub fn add_message(&mut self, def: &MessageDef) -> Result<(), ResolveError> {
    let fields = def
      .fields
      .iter()
      .map(|field| self.resolve_field(&def.name, field))
      .collect::<Result<Vec<_>, _>>()?;
    self.messages.push(MessageDescriptor {
      name: def.name.clone(),
      fields,
    });
    Ok(())
  }

  fn resolve_field(&self, message_name: &str, field: &FieldDef) -> Result<FieldDescriptor, ResolveError> {
    let enum_type = self.find_enum(&field.type_name).ok_or_else(|| ResolveError::UnknownEnum {
      message: message_name.to_string(),
      field: field.name.clone(),
      type_name: field.type_name.clone(),
    })?;

    let default_value = match &field.default {
      Some(name) => enum_type.find_value_by_name(name).ok_or_else(|| ResolveError::UnknownDefault {
        message: message_name.to_string(),
        field: field.name.clone(),
        value: name.clone(),
        enum_name: enum_type.name.clone(),
      })?,
      /* The first declared value is always canonical */
      None => enum_type.first_value().ok_or_else(|| ResolveError::EmptyEnum {
        message: message_name.to_string(),
        field: field.name.clone(),
        enum_name: enum_type.name.clone(),
      })?,
    };

    Ok(FieldDescriptor {
      name: field.name.clone(),
      number: field.number,
      label: field.label,
      packed: field.packed,
      enum_name: enum_type.name.clone(),
      default_value: default_value.clone(),
      message_name: message_name.to_string(),
    })
  }

  pub fn find_enum(&self, name: &str) -> Option<&EnumDescriptor> {
    self.enums.get(name)
  }

  pub fn enums(&self) -> impl Iterator<Item = &EnumDescriptor> {
    self.enums.values()
  }

  pub fn messages(&self) -> &[MessageDescriptor] {
    &self.messages
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::schema::types::{EnumValueDef, SchemaMetadata};

  fn color_enum() -> EnumDef {
    EnumDef {
      name: "Color".to_string(),
      values: vec![
        EnumValueDef::new("RED", 0),
        EnumValueDef::new("GREEN", 1),
        EnumValueDef::new("CRIMSON", 0),
      ],
    }
  }

  fn field(name: &str, number: u32, type_name: &str) -> FieldDef {
    FieldDef {
      name: name.to_string(),
      number,
      type_name: type_name.to_string(),
      label: Label::Optional,
      packed: false,
      default: None,
    }
  }

  fn schema(fields: Vec<FieldDef>) -> SchemaFile {
    SchemaFile {
      schema: SchemaMetadata {
        package: "test.pkg".to_string(),
        description: None,
      },
      enums: vec![color_enum()],
      messages: vec![MessageDef {
        name: "Shirt".to_string(),
        fields,
      }],
    }
  }

  #[test]
  fn value_lookup_by_number_returns_first_declared() {
    let descriptor = EnumDescriptor::from_def(&color_enum());
    let found = descriptor.find_value_by_number(0).unwrap();
    assert_eq!(found.name, "RED");
    assert_eq!(found.index, 0);
    assert_eq!(descriptor.values()[2].enum_name, "Color");
    assert!(descriptor.find_value_by_number(9).is_none());
  }

  #[test]
  fn default_falls_back_to_first_value() {
    let pool = DescriptorPool::from_schema(&schema(vec![field("color", 1, "Color")])).unwrap();
    let resolved = &pool.messages()[0].fields[0];
    assert_eq!(resolved.default_value.name, "RED");
    assert_eq!(resolved.message_name, "Shirt");
    assert_eq!(resolved.tag(), 8);
    assert_eq!(resolved.tag_size(), 1);
  }

  #[test]
  fn declared_default_is_looked_up_by_name() {
    let mut color = field("color", 1, "Color");
    color.default = Some("CRIMSON".to_string());
    let pool = DescriptorPool::from_schema(&schema(vec![color])).unwrap();
    assert_eq!(pool.messages()[0].fields[0].default_value.index, 2);
  }

  #[test]
  fn packed_repeated_field_uses_length_delimited_tag() {
    let mut sizes = field("sizes", 2, "Color");
    sizes.label = Label::Repeated;
    sizes.packed = true;
    let mut flag = field("flag", 3, "Color");
    flag.packed = true;

    let pool = DescriptorPool::from_schema(&schema(vec![sizes, flag])).unwrap();
    let fields = &pool.messages()[0].fields;
    assert!(fields[0].is_packed());
    assert_eq!(fields[0].tag(), 18);
    assert!(!fields[1].is_packed());
    assert_eq!(fields[1].tag(), 24);
  }

  #[test]
  fn unknown_enum_is_reported() {
    let err = DescriptorPool::from_schema(&schema(vec![field("size", 1, "Size")])).unwrap_err();
    assert_eq!(
      err,
      ResolveError::UnknownEnum {
        message: "Shirt".to_string(),
        field: "size".to_string(),
        type_name: "Size".to_string(),
      }
    );
  }

  #[test]
  fn unknown_default_is_reported() {
    let mut color = field("color", 1, "Color");
    color.default = Some("BLUE".to_string());
    let err = DescriptorPool::from_schema(&schema(vec![color])).unwrap_err();
    assert!(matches!(err, ResolveError::UnknownDefault { ref value, .. } if value == "BLUE"));
  }

  #[test]
  fn field_of_empty_enum_has_no_default() {
    let mut file = schema(vec![field("mood", 1, "Mood")]);
    file.enums.push(EnumDef {
      name: "Mood".to_string(),
      values: Vec::new(),
    });
    let err = DescriptorPool::from_schema(&file).unwrap_err();
    assert!(matches!(err, ResolveError::EmptyEnum { .. }));
  }
}
