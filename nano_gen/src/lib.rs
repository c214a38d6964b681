pub mod cmds;
pub mod codegen;
pub mod params;
pub mod schema;
