use crate::Result;
use crate::types::{Block, Entry, Script};

/// Receives the structural events produced by the compiler, in input order.
pub trait Emitter {
    fn open_block(&mut self, name: &str, index: u32) -> Result<()>;
    fn open_entry(&mut self, tag: &str) -> Result<()>;
    fn fragment(&mut self, text: &str) -> Result<()>;
    fn close_entry(&mut self) -> Result<()>;
    fn close_block(&mut self) -> Result<()>;
    /// `blocks` lists the identifiers of every block closed since the
    /// previous file boundary.
    fn end_file(&mut self, name: &str, blocks: &[String]) -> Result<()>;
}

/// Collects events into [`Script`] values, one per input source.
#[derive(Debug, Default)]
pub struct ScriptBuilder {
    scripts: Vec<Script>,
    pending: Vec<Block>,
    block: Option<Block>,
}

impl ScriptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_scripts(self) -> Vec<Script> {
        self.scripts
    }

    fn current_entry(&mut self) -> Option<&mut Entry> {
        self.block.as_mut().and_then(|b| b.entries.last_mut())
    }
}

impl Emitter for ScriptBuilder {
    fn open_block(&mut self, name: &str, index: u32) -> Result<()> {
        self.block = Some(Block {
            name: name.to_string(),
            index,
            entries: Vec::new(),
        });
        Ok(())
    }

    fn open_entry(&mut self, tag: &str) -> Result<()> {
        if let Some(block) = self.block.as_mut() {
            block.entries.push(Entry {
                tag: tag.to_string(),
                text: Vec::new(),
            });
        }
        Ok(())
    }

    fn fragment(&mut self, text: &str) -> Result<()> {
        if let Some(entry) = self.current_entry() {
            entry.text.push(text.to_string());
        }
        Ok(())
    }

    fn close_entry(&mut self) -> Result<()> {
        Ok(())
    }

    fn close_block(&mut self) -> Result<()> {
        if let Some(block) = self.block.take() {
            self.pending.push(block);
        }
        Ok(())
    }

    fn end_file(&mut self, name: &str, _blocks: &[String]) -> Result<()> {
        self.scripts.push(Script {
            name: name.to_string(),
            blocks: std::mem::take(&mut self.pending),
        });
        Ok(())
    }
}
