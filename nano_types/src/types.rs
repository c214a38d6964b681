use serde_derive::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Label {
    #[default]
    Optional,
    Repeated,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct EnumValueDef {
    pub name: String,
    pub number: i32,
    #[serde(default)]
    pub comment: Option<String>,
}

impl EnumValueDef {
    pub fn new(name: impl Into<String>, number: i32) -> Self {
        Self {
            name: name.into(),
            number,
            comment: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct EnumDef {
    pub name: String,
    /// Declaration order is the order of this list.
    #[serde(default)]
    pub values: Vec<EnumValueDef>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct FieldDef {
    pub name: String,
    pub number: u32,
    /// Name of the enumeration this field holds.
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub label: Label,
    /// Only meaningful for repeated fields.
    #[serde(default)]
    pub packed: bool,
    /// Name of an enum value; the enum's first value when absent.
    #[serde(default)]
    pub default: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct MessageDef {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDef>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct SchemaMetadata {
    pub package: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct SchemaFile {
    /* Schema file metadata */
    pub schema: SchemaMetadata,

    #[serde(default)]
    pub enums: Vec<EnumDef>,

    #[serde(default)]
    pub messages: Vec<MessageDef>,
}

impl SchemaFile {
    /* Parse a schema file from YAML text */
    pub fn from_yaml(content: &str) -> Result<Self, serde_yml::Error> {
        serde_yml::from_str(content)
    }

    /* Get the package identifier */
    pub fn package(&self) -> &str {
        &self.schema.package
    }
}
