pub mod printer;
pub mod rust;
pub mod rust_gen;
