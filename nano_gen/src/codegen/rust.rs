use crate::codegen::printer::{Printer, Variables};
use crate::codegen::rust_gen::{EnumGenerator, MessageGenerator};
use crate::params::GeneratorParams;
use crate::schema::resolved::DescriptorPool;
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

pub const TYPES_FILE_NAME: &str = "types.rs";

pub struct RustCodeGenerator {
  options: RustCodeGeneratorOptions,
}

#[derive(Debug, Clone)]
pub struct RustCodeGeneratorOptions {
  pub output_dir: PathBuf,
  pub params: GeneratorParams,
}

impl Default for RustCodeGeneratorOptions {
  fn default() -> Self {
    Self {
      output_dir: PathBuf::from("."),
      params: GeneratorParams::default(),
    }
  }
}

impl RustCodeGenerator {
  pub fn new(options: RustCodeGeneratorOptions) -> Self {
    Self { options }
  }

  pub fn options(&self) -> &RustCodeGeneratorOptions {
    &self.options
  }

  /* Build the whole generated module for one package, enums first */
  pub fn generate(&self, pool: &DescriptorPool) -> String {
    let params = &self.options.params;
    let emit_messages = params.emit_messages && !pool.messages().is_empty();
    let mut printer = Printer::new();

    let mut vars = Variables::new();
    vars.insert("package", pool.package.clone());
    vars.insert("runtime", params.runtime_crate.clone());
    printer.print(
      &vars,
      "// Generated by nano-gen from package `$package$`. Do not edit.\n\
       #![allow(dead_code, non_upper_case_globals, unused_mut, clippy::identity_op)]\n\
       \n",
    );
    if emit_messages {
      printer.print(&vars, "use $runtime$ as nano;\n\n");
    }

    for descriptor in pool.enums() {
      EnumGenerator::new(descriptor, params).generate(&mut printer);
    }

    if emit_messages {
      for descriptor in pool.messages() {
        MessageGenerator::new(descriptor, params).generate(&mut printer);
      }
    }

    printer.into_string()
  }

  /* Write types.rs into the output directory; returns the written path */
  pub fn emit_code(&self, pool: &DescriptorPool) -> anyhow::Result<PathBuf> {
    let code = self.generate(pool);
    let dir: &Path = &self.options.output_dir;
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let types_path = dir.join(TYPES_FILE_NAME);
    fs::write(&types_path, code)
      .with_context(|| format!("failed to write types to {}", types_path.display()))?;
    tracing::info!(package = %pool.package, path = %types_path.display(), "wrote generated module");
    Ok(types_path)
  }
}
