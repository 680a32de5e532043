pub mod compiler;
pub mod emitter;
pub mod error;
pub mod process;
pub mod reader;
pub mod types;
pub mod wrap;
pub mod writer;

pub use compiler::{CompileOptions, Compiler, Outcome, State, compile_str};
pub use emitter::{Emitter, ScriptBuilder};
pub use error::{DialogueError, Result};
pub use reader::classify_line;
pub use types::{Block, Entry, LineKind, Script};
pub use wrap::{WrapOptions, fragments};
pub use writer::CodeWriter;
