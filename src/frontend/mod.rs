//! Frontend module - Position stream, Lexer, Grouping, Rendering

pub mod chars;
pub mod token;
pub mod lexer;
pub mod grouping;
pub mod render;
