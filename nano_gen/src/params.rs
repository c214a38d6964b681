/* Generator parameters, passed as `key=value[,key=value]` */

use serde_derive::Serialize;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamError {
  #[error("parameter '{0}' is missing a value (expected key=value)")]
  MissingValue(String),

  #[error("unknown generator parameter '{0}'")]
  UnknownKey(String),

  #[error("invalid value '{value}' for parameter '{key}'")]
  InvalidValue { key: String, value: String },
}

/* How enumeration constants are laid out in generated code */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnumStyle {
  /* Associated consts on a unit struct named after the enum */
  #[default]
  Shell,
  /* Module-level consts named after the values */
  Flat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratorParams {
  pub enum_style: EnumStyle,
  pub runtime_crate: String,
  pub emit_messages: bool,
}

impl Default for GeneratorParams {
  fn default() -> Self {
    Self {
      enum_style: EnumStyle::Shell,
      runtime_crate: "nano_runtime".to_string(),
      emit_messages: true,
    }
  }
}

impl GeneratorParams {
  pub fn parse(text: &str) -> Result<Self, ParamError> {
    let mut params = Self::default();
    for pair in text.split(',').map(str::trim).filter(|pair| !pair.is_empty()) {
      let (key, value) = pair
        .split_once('=')
        .map(|(key, value)| (key.trim(), value.trim()))
        .ok_or_else(|| ParamError::MissingValue(pair.to_string()))?;

      let invalid = || ParamError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
      };

      match key {
        "enum_style" => {
          params.enum_style = match value {
            "shell" => EnumStyle::Shell,
            "flat" => EnumStyle::Flat,
            _ => return Err(invalid()),
          };
        }
        "runtime_crate" => {
          if value.is_empty() {
            return Err(invalid());
          }
          params.runtime_crate = value.to_string();
        }
        "emit_messages" => {
          params.emit_messages = value.parse::<bool>().map_err(|_| invalid())?;
        }
        _ => return Err(ParamError::UnknownKey(key.to_string())),
      }
    }
    Ok(params)
  }
}

impl FromStr for GeneratorParams {
  type Err = ParamError;

  fn from_str(text: &str) -> Result<Self, Self::Err> {
    Self::parse(text)
  }
}
