// Re-export from nano_types so generators depend on one path
pub use nano_types::{EnumDef, EnumValueDef, FieldDef, Label, MessageDef, SchemaFile, SchemaMetadata};
