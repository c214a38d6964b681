/* Codegen command - generate Rust modules from schema files */

use super::common::load_and_resolve;
use crate::codegen::rust::{RustCodeGenerator, RustCodeGeneratorOptions};
use crate::params::GeneratorParams;
use anyhow::Context;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/* Execute the codegen command */
pub fn run(
  files: Vec<PathBuf>,
  output_dir: PathBuf,
  params: GeneratorParams,
  verbose: bool,
) -> anyhow::Result<()> {
  if verbose {
    println!("Nano Generator - Code Generation Tool");
    println!("=====================================\n");
    println!("[~] Configuration:");
    println!("  Output directory: {}", output_dir.display());
    println!("  Enum style: {:?}", params.enum_style);
    println!("  Runtime crate: {}", params.runtime_crate);
    println!("  Emit messages: {}", params.emit_messages);
    println!("  Input files: {}", files.len());
    for file in &files {
      println!("    - {}", file.display());
    }
    println!();
  }

  let pools = load_and_resolve(&files)?;

  std::fs::create_dir_all(&output_dir)
    .with_context(|| format!("failed to create {}", output_dir.display()))?;

  let mut packages = Vec::with_capacity(pools.len());
  for pool in &pools {
    /* "shop.apparel" -> shop/apparel */
    let package_dir = output_dir.join(pool.package.replace('.', "/"));
    if verbose {
      println!("[~] Generating code for package '{}' in {}", pool.package, package_dir.display());
    }

    let options = RustCodeGeneratorOptions {
      output_dir: package_dir,
      params: params.clone(),
    };
    RustCodeGenerator::new(options).emit_code(pool)?;
    packages.push(pool.package.clone());
  }

  generate_rust_mod_files(&output_dir, &packages)?;

  if verbose {
    println!("[✓] Generated Rust code in package directories:");
    for package in &packages {
      println!("    - {}/{}/types.rs", output_dir.display(), package.replace('.', "/"));
    }
  }
  println!("[✓] Code generation complete!");
  Ok(())
}

/* Generate mod.rs files so the package tree is a module tree */
pub fn generate_rust_mod_files(output_dir: &Path, packages: &[String]) -> anyhow::Result<()> {
  /* parent package ("" for the root) -> child module names */
  let mut package_tree: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
  for package in packages {
    let parts: Vec<&str> = package.split('.').collect();
    for i in 0..parts.len() {
      let parent_path = parts[0..i].join(".");
      package_tree.entry(parent_path).or_default().insert(parts[i].to_string());
    }
  }

  let leaves: BTreeSet<&str> = packages.iter().map(String::as_str).collect();
  let mut all_dirs: BTreeSet<String> = package_tree.keys().cloned().collect();
  all_dirs.extend(packages.iter().cloned());

  for package in &all_dirs {
    let mut mod_content = String::new();

    if let Some(children) = package_tree.get(package) {
      for child in children {
        mod_content.push_str(&format!("pub mod {};\n", child));
      }
    }

    /* A package with types re-exports them */
    if leaves.contains(package.as_str()) {
      if !mod_content.is_empty() {
        mod_content.push('\n');
      }
      mod_content.push_str("pub mod types;\npub use types::*;\n");
    }

    let dir = if package.is_empty() {
      output_dir.to_path_buf()
    } else {
      output_dir.join(package.replace('.', "/"))
    };
    std::fs::create_dir_all(&dir).with_context(|| format!("failed to create {}", dir.display()))?;
    let mod_path = dir.join("mod.rs");
    std::fs::write(&mod_path, mod_content)
      .with_context(|| format!("failed to write {}", mod_path.display()))?;
  }

  Ok(())
}
