mod compiler;

pub use compiler::{compile_session, compile_to_html, CompileError, CompileOptions, Theme};
