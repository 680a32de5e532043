use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::emitter::Emitter;
use crate::error::{DialogueError, Result};
use crate::reader::classify_line;
use crate::types::{LineKind, block_ident};
use crate::wrap::{WrapOptions, fragments};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(default)]
pub struct CompileOptions {
    pub wrap: WrapOptions,
    /// Fail when the stream ends inside a block instead of dropping it.
    pub strict: bool,
    /// Restart block numbering at every file boundary.
    pub reset_per_file: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    AwaitingBlockStart,
    InBlock,
}

/// How the input stream ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Complete { blocks: u32 },
    /// The stream ended inside `open_block`, which was never emitted in full.
    Truncated { blocks: u32, open_block: String },
}

/// The dialogue state machine. Fold it over every line of every input
/// source with [`Compiler::feed`], calling [`Compiler::end_file`] at each
/// source boundary and [`Compiler::finish`] once at the end.
#[derive(Debug)]
pub struct Compiler {
    state: State,
    counter: u32,
    total: u32,
    options: CompileOptions,
    open_ident: Option<String>,
    file_blocks: Vec<String>,
    /// Pointer arrays of sources that ended while a block was open.
    /// They are written once that block closes, so they never land
    /// inside its initializer.
    deferred: Vec<(String, Vec<String>)>,
    reset_pending: bool,
}

impl Compiler {
    pub fn new(options: CompileOptions) -> Self {
        Self {
            state: State::AwaitingBlockStart,
            counter: 0,
            total: 0,
            options,
            open_ident: None,
            file_blocks: Vec::new(),
            deferred: Vec::new(),
            reset_pending: false,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Index the next block will receive.
    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Feeds one line read from the source named `name`.
    pub fn feed<E: Emitter>(&mut self, name: &str, line: &str, emitter: &mut E) -> Result<()> {
        let kind = classify_line(line);
        match (self.state, kind) {
            (_, LineKind::Comment) => {}
            (State::AwaitingBlockStart, LineKind::Directive(tag)) => {
                emitter.open_block(name, self.counter)?;
                emitter.open_entry(tag)?;
                self.open_ident = Some(block_ident(name, self.counter));
                self.state = State::InBlock;
            }
            (State::AwaitingBlockStart, LineKind::End | LineKind::Text(_)) => {}
            (State::InBlock, LineKind::End) => {
                emitter.close_entry()?;
                emitter.close_block()?;
                if let Some(ident) = self.open_ident.take() {
                    debug!("Closed block {}", ident);
                    // A block belongs to the source it was opened in.
                    match self.deferred.first_mut() {
                        Some((_, blocks)) => blocks.push(ident),
                        None => self.file_blocks.push(ident),
                    }
                }
                self.counter += 1;
                self.total += 1;
                if std::mem::take(&mut self.reset_pending) {
                    self.counter = 0;
                }
                self.state = State::AwaitingBlockStart;
                for (file, blocks) in std::mem::take(&mut self.deferred) {
                    emitter.end_file(&file, &blocks)?;
                }
            }
            (State::InBlock, LineKind::Directive(tag)) => {
                emitter.close_entry()?;
                emitter.open_entry(tag)?;
            }
            (State::InBlock, LineKind::Text(text)) => {
                for fragment in fragments(text, &self.options.wrap) {
                    emitter.fragment(&fragment)?;
                }
            }
        }
        Ok(())
    }

    /// Emits the pointer array for the blocks closed in source `name`.
    /// If a block is still open the array is held back until it closes.
    pub fn end_file<E: Emitter>(&mut self, name: &str, emitter: &mut E) -> Result<()> {
        let blocks = std::mem::take(&mut self.file_blocks);
        match self.state {
            State::AwaitingBlockStart => {
                emitter.end_file(name, &blocks)?;
                if self.options.reset_per_file {
                    self.counter = 0;
                }
            }
            State::InBlock => {
                debug!("Deferring pointer array for {} until block closes", name);
                self.deferred.push((name.to_string(), blocks));
                self.reset_pending |= self.options.reset_per_file;
            }
        }
        Ok(())
    }

    pub fn finish(self) -> Result<Outcome> {
        if self.state == State::AwaitingBlockStart {
            return Ok(Outcome::Complete { blocks: self.total });
        }
        let open_block = self.open_ident.unwrap_or_default();
        if self.options.strict {
            return Err(DialogueError::UnterminatedBlock { block: open_block });
        }
        warn!("Input ended inside block {} (missing !END); block dropped", open_block);
        for (file, _) in &self.deferred {
            warn!("Pointer array for {} not written", file);
        }
        Ok(Outcome::Truncated {
            blocks: self.total,
            open_block,
        })
    }
}

/// Runs one in-memory source through a fresh compiler.
pub fn compile_str<E: Emitter>(
    name: &str,
    text: &str,
    options: CompileOptions,
    emitter: &mut E,
) -> Result<Outcome> {
    let mut compiler = Compiler::new(options);
    for line in text.lines() {
        compiler.feed(name, line, emitter)?;
    }
    compiler.end_file(name, emitter)?;
    compiler.finish()
}
