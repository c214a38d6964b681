/* Text sink for generated code: `$name$` placeholder substitution with indent scoping */

use indexmap::IndexMap;

/* Placeholder name -> substitution. "$$" prints a literal '$'. */
pub type Variables = IndexMap<&'static str, String>;

const INDENT: &str = "    ";

#[derive(Debug)]
pub struct Printer {
  output: String,
  indent: String,
  at_line_start: bool,
}

impl Printer {
  pub fn new() -> Self {
    Self {
      output: String::new(),
      indent: String::new(),
      at_line_start: true,
    }
  }

  /* Print a template without placeholders */
  pub fn print_raw(&mut self, text: &str) {
    for chunk in text.split_inclusive('\n') {
      if self.at_line_start && chunk != "\n" {
        self.output.push_str(&self.indent);
      }
      self.output.push_str(chunk);
      self.at_line_start = chunk.ends_with('\n');
    }
  }

  /// Substitutes every `$key$` from `variables` and prints the result.
  ///
  /// Panics on a placeholder with no variable: templates and the variables
  /// feeding them live side by side, so a miss is a generator bug.
  pub fn print(&mut self, variables: &Variables, template: &str) {
    let mut expanded = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('$') {
      expanded.push_str(&rest[..start]);
      let after = &rest[start + 1..];
      let end = after
        .find('$')
        .unwrap_or_else(|| panic!("unterminated placeholder in template: {template:?}"));
      let key = &after[..end];
      if key.is_empty() {
        expanded.push('$');
      } else {
        match variables.get(key) {
          Some(value) => expanded.push_str(value),
          None => panic!("undefined template variable '{key}'"),
        }
      }
      rest = &after[end + 1..];
    }
    expanded.push_str(rest);
    self.print_raw(&expanded);
  }

  pub fn indent(&mut self) {
    self.indent.push_str(INDENT);
  }

  pub fn outdent(&mut self) {
    let new_len = self.indent.len().saturating_sub(INDENT.len());
    self.indent.truncate(new_len);
  }

  pub fn as_str(&self) -> &str {
    &self.output
  }

  pub fn into_string(self) -> String {
    self.output
  }
}

impl Default for Printer {
  fn default() -> Self {
    Self::new()
  }
}
