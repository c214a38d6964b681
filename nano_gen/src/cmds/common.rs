/* Common utilities shared between analyze and codegen commands */

use crate::schema::resolved::DescriptorPool;
use crate::schema::types::SchemaFile;
use anyhow::Context;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

/* Read and parse every schema file */
pub fn load_schema_files(files: &[PathBuf]) -> anyhow::Result<Vec<SchemaFile>> {
  files
    .iter()
    .map(|path| {
      let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
      let file = SchemaFile::from_yaml(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?;
      tracing::debug!(
        path = %path.display(),
        package = %file.package(),
        enums = file.enums.len(),
        messages = file.messages.len(),
        "loaded schema file"
      );
      Ok(file)
    })
    .collect()
}

/* Merge files declaring the same package, keeping declaration order */
pub fn group_by_package(files: Vec<SchemaFile>) -> BTreeMap<String, SchemaFile> {
  let mut packages: BTreeMap<String, SchemaFile> = BTreeMap::new();
  for file in files {
    match packages.get_mut(file.package()) {
      Some(merged) => {
        merged.enums.extend(file.enums);
        merged.messages.extend(file.messages);
      }
      None => {
        packages.insert(file.package().to_string(), file);
      }
    }
  }
  packages
}

/* Load, group and resolve; one descriptor pool per package */
pub fn load_and_resolve(files: &[PathBuf]) -> anyhow::Result<Vec<DescriptorPool>> {
  if files.is_empty() {
    anyhow::bail!("no schema files given");
  }

  let packages = group_by_package(load_schema_files(files)?);
  packages
    .values()
    .map(|file| {
      DescriptorPool::from_schema(file)
        .with_context(|| format!("failed to resolve package '{}'", file.package()))
    })
    .collect()
}
