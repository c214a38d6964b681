/* Identifier and literal formatting for generated Rust */

use crate::params::{EnumStyle, GeneratorParams};
use crate::schema::resolved::{EnumDescriptor, EnumValueDescriptor, FieldDescriptor};

/* Escape Rust keywords to valid identifiers */
pub fn escape_rust_keyword(name: &str) -> String {
  const RUST_KEYWORDS: &[&str] = &[
    "as", "break", "const", "continue", "else", "enum", "extern", "false", "fn", "for", "if",
    "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return", "static",
    "struct", "trait", "true", "type", "unsafe", "use", "where", "while", "async", "await", "dyn",
    "abstract", "become", "box", "do", "final", "macro", "override", "priv", "typeof", "unsized",
    "virtual", "yield", "try", "gen",
  ];
  /* These cannot be raw identifiers */
  const PATH_KEYWORDS: &[&str] = &["crate", "self", "Self", "super"];

  if RUST_KEYWORDS.contains(&name) {
    format!("r#{}", name)
  } else if PATH_KEYWORDS.contains(&name) {
    format!("{}_", name)
  } else {
    name.to_string()
  }
}

/* fooBar, FooBar and foo_bar all become foo_bar */
pub fn to_snake_case(name: &str) -> String {
  let mut out = String::with_capacity(name.len() + 4);
  let mut prev_lower = false;
  for ch in name.chars() {
    if ch.is_ascii_uppercase() {
      if prev_lower {
        out.push('_');
      }
      out.push(ch.to_ascii_lowercase());
      prev_lower = false;
    } else {
      out.push(ch);
      prev_lower = ch.is_ascii_lowercase() || ch.is_ascii_digit();
    }
  }
  out
}

pub fn underscores_to_capitalized_camel_case(name: &str) -> String {
  let mut out = String::with_capacity(name.len());
  let mut capitalize_next = true;
  for ch in name.chars() {
    if ch == '_' {
      capitalize_next = true;
    } else if capitalize_next {
      out.push(ch.to_ascii_uppercase());
      capitalize_next = false;
    } else {
      out.push(ch);
    }
  }
  out
}

pub fn field_name(field: &FieldDescriptor) -> String {
  escape_rust_keyword(&to_snake_case(&field.name))
}

/* Built from the unescaped name: `type` gets `has_type`, not `has_r#type` */
pub fn presence_accessor_name(field: &FieldDescriptor) -> String {
  format!("has_{}", to_snake_case(&field.name))
}

pub fn enum_type_name(descriptor: &EnumDescriptor) -> String {
  escape_rust_keyword(&descriptor.name)
}

/* Color -> COLOR, HTTPStatus -> HTTPSTATUS, fontWeight -> FONT_WEIGHT */
pub fn to_screaming_snake_case(name: &str) -> String {
  to_snake_case(name).to_ascii_uppercase()
}

/// Name of the constant declared for `value`.
///
/// Shell constants live inside the enum's own impl and keep the value name.
/// Flat constants share the module namespace, so they carry the enum's name
/// as a prefix: `Color.RED` becomes `COLOR_RED`.
pub fn enum_value_name(params: &GeneratorParams, value: &EnumValueDescriptor) -> String {
  match params.enum_style {
    EnumStyle::Shell => escape_rust_keyword(&value.name),
    EnumStyle::Flat => format!("{}_{}", to_screaming_snake_case(&value.enum_name), value.name),
  }
}

/* Expression naming an enum constant from anywhere in the generated module */
pub fn enum_value_ref(params: &GeneratorParams, value: &EnumValueDescriptor) -> String {
  match params.enum_style {
    EnumStyle::Shell => format!(
      "{}::{}",
      escape_rust_keyword(&value.enum_name),
      enum_value_name(params, value)
    ),
    EnumStyle::Flat => enum_value_name(params, value),
  }
}

pub fn default_value(params: &GeneratorParams, field: &FieldDescriptor) -> String {
  enum_value_ref(params, &field.default_value)
}

pub fn size_cache_type_name(message_name: &str) -> String {
  format!("{}SizeCache", escape_rust_keyword(message_name))
}
