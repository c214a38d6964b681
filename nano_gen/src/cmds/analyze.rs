/* Analyze command - report enum partitions and field encoding contexts */

use super::common::load_and_resolve;
use crate::codegen::rust_gen::EnumPartition;
use crate::codegen::rust_gen::naming::{default_value, enum_value_name};
use crate::params::{EnumStyle, GeneratorParams};
use crate::schema::resolved::{DescriptorPool, FieldDescriptor};
use crate::schema::types::Label;
use clap::ValueEnum;
use serde_derive::Serialize;
use std::path::PathBuf;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default)]
pub enum ReportFormat {
  #[default]
  Text,
  Json,
  Yaml,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AliasReport {
  pub name: String,
  pub canonical: String,
}

/* A constant as the generator declares it under the selected enum style */
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstantReport {
  pub name: String,
  pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumReport {
  pub name: String,
  pub canonical_values: Vec<String>,
  pub aliases: Vec<AliasReport>,
  pub constants: Vec<ConstantReport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
  Singular,
  Repeated,
  Packed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldReport {
  pub name: String,
  pub number: u32,
  pub kind: FieldKind,
  pub enum_name: String,
  pub tag: u32,
  pub tag_size: usize,
  pub default: String,
  /* Expression the generated code compares against */
  pub default_ref: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageReport {
  pub name: String,
  pub fields: Vec<FieldReport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageReport {
  pub package: String,
  pub enum_style: EnumStyle,
  pub enums: Vec<EnumReport>,
  pub messages: Vec<MessageReport>,
}

impl FieldReport {
  fn from_descriptor(field: &FieldDescriptor, params: &GeneratorParams) -> Self {
    let kind = match (field.label, field.is_packed()) {
      (Label::Optional, _) => FieldKind::Singular,
      (Label::Repeated, false) => FieldKind::Repeated,
      (Label::Repeated, true) => FieldKind::Packed,
    };
    Self {
      name: field.name.clone(),
      number: field.number,
      kind,
      enum_name: field.enum_name.clone(),
      tag: field.tag(),
      tag_size: field.tag_size(),
      default: field.default_value.name.clone(),
      default_ref: default_value(params, field),
    }
  }
}

/* Build the report for one resolved package */
pub fn build_report(pool: &DescriptorPool, params: &GeneratorParams) -> PackageReport {
  let enums = pool
    .enums()
    .map(|descriptor| {
      let partition = EnumPartition::new(descriptor);
      let canonical_constants = partition.canonical_values.iter().map(|value| ConstantReport {
        name: enum_value_name(params, value),
        value: value.number.to_string(),
      });
      let alias_constants = partition.aliases.iter().map(|alias| {
        let canonical = enum_value_name(params, alias.canonical_value);
        ConstantReport {
          name: enum_value_name(params, alias.value),
          value: match params.enum_style {
            EnumStyle::Shell => format!("Self::{}", canonical),
            EnumStyle::Flat => canonical,
          },
        }
      });
      let constants = canonical_constants.chain(alias_constants).collect();
      EnumReport {
        name: descriptor.name.clone(),
        canonical_values: partition.canonical_values.iter().map(|v| v.name.clone()).collect(),
        aliases: partition
          .aliases
          .iter()
          .map(|alias| AliasReport {
            name: alias.value.name.clone(),
            canonical: alias.canonical_value.name.clone(),
          })
          .collect(),
        constants,
      }
    })
    .collect();

  let messages = pool
    .messages()
    .iter()
    .map(|message| MessageReport {
      name: message.name.clone(),
      fields: message
        .fields
        .iter()
        .map(|field| FieldReport::from_descriptor(field, params))
        .collect(),
    })
    .collect();

  PackageReport {
    package: pool.package.clone(),
    enum_style: params.enum_style,
    enums,
    messages,
  }
}

/* Execute the analyze command */
pub fn run(files: Vec<PathBuf>, format: ReportFormat, params: &GeneratorParams) -> anyhow::Result<()> {
  let reports: Vec<PackageReport> = load_and_resolve(&files)?
    .iter()
    .map(|pool| build_report(pool, params))
    .collect();

  match format {
    ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
    ReportFormat::Yaml => print!("{}", serde_yml::to_string(&reports)?),
    ReportFormat::Text => {
      println!("Nano Generator - Schema Analysis");
      println!("================================\n");
      for report in &reports {
        print!("{}", render_text(report));
      }
    }
  }

  Ok(())
}

pub fn render_text(report: &PackageReport) -> String {
  let mut out = format!("[~] Package '{}' ({:?} constants)\n", report.package, report.enum_style);

  for e in &report.enums {
    out.push_str(&format!("  enum {}\n", e.name));
    out.push_str(&format!("    canonical: {}\n", e.canonical_values.join(", ")));
    for alias in &e.aliases {
      out.push_str(&format!("    alias: {} -> {}\n", alias.name, alias.canonical));
    }
    for constant in &e.constants {
      out.push_str(&format!("    const {} = {}\n", constant.name, constant.value));
    }
  }

  for message in &report.messages {
    out.push_str(&format!("  message {}\n", message.name));
    for field in &message.fields {
      out.push_str(&format!(
        "    {} = {} ({:?} {}) tag={} tag_size={} default={} ({})\n",
        field.name,
        field.number,
        field.kind,
        field.enum_name,
        field.tag,
        field.tag_size,
        field.default,
        field.default_ref
      ));
    }
  }

  out.push('\n');
  out
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::schema::types::SchemaFile;

  const SCHEMA: &str = r#"
schema:
  package: shop
enums:
  - name: Size
    values:
      - { name: SMALL, number: 1 }
      - { name: S, number: 1 }
      - { name: LARGE, number: 3 }
      - { name: L, number: 3 }
      - { name: BIG, number: 3 }
messages:
  - name: Order
    fields:
      - { name: size, number: 1, type: Size, default: LARGE }
      - { name: extra, number: 17, type: Size, label: repeated, packed: true }
"#;

  fn report_with(params: &GeneratorParams) -> PackageReport {
    let pool = DescriptorPool::from_schema(&SchemaFile::from_yaml(SCHEMA).unwrap()).unwrap();
    build_report(&pool, params)
  }

  fn report() -> PackageReport {
    report_with(&GeneratorParams::default())
  }

  #[test]
  fn aliases_point_at_first_declared_value() {
    let report = report();
    let size = &report.enums[0];
    assert_eq!(size.canonical_values, ["SMALL", "LARGE"]);
    let aliases: Vec<_> = size.aliases.iter().map(|a| (a.name.as_str(), a.canonical.as_str())).collect();
    assert_eq!(aliases, [("S", "SMALL"), ("L", "LARGE"), ("BIG", "LARGE")]);
  }

  #[test]
  fn field_contexts_carry_wire_details() {
    let report = report();
    let fields = &report.messages[0].fields;
    assert_eq!(fields[0].kind, FieldKind::Singular);
    assert_eq!(fields[0].tag, 8);
    assert_eq!(fields[0].default, "LARGE");
    assert_eq!(fields[1].kind, FieldKind::Packed);
    assert_eq!(fields[1].tag, (17 << 3) | 2);
    assert_eq!(fields[1].tag_size, 2);
  }

  #[test]
  fn json_report_uses_kebab_case_kinds() {
    let json = serde_json::to_value(report()).unwrap();
    assert_eq!(json["messages"][0]["fields"][1]["kind"], "packed");
    assert_eq!(json["enums"][0]["aliases"][2]["canonical"], "LARGE");
  }

  #[test]
  fn text_report_lists_aliases() {
    let text = render_text(&report());
    assert!(text.contains("    alias: BIG -> LARGE\n"));
    assert!(text.contains("    extra = 17 (Packed Size) tag=138 tag_size=2 default=SMALL (Size::SMALL)\n"));
    assert!(text.contains("    const BIG = Self::LARGE\n"));
  }

  #[test]
  fn enum_style_shapes_reported_constants() {
    let flat = GeneratorParams::parse("enum_style=flat").unwrap();
    let report = report_with(&flat);
    let constants: Vec<_> = report.enums[0]
      .constants
      .iter()
      .map(|c| (c.name.as_str(), c.value.as_str()))
      .collect();
    assert_eq!(
      constants,
      [
        ("SIZE_SMALL", "1"),
        ("SIZE_LARGE", "3"),
        ("SIZE_S", "SIZE_SMALL"),
        ("SIZE_L", "SIZE_LARGE"),
        ("SIZE_BIG", "SIZE_LARGE"),
      ]
    );
    assert_eq!(report.messages[0].fields[0].default_ref, "SIZE_LARGE");

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["enum_style"], "flat");
    assert_eq!(json["enums"][0]["constants"][2]["value"], "SIZE_SMALL");
  }
}
