use std::io::Write;

use crate::Result;
use crate::emitter::Emitter;
use crate::types::block_ident;

// --- Writing Logic (Events -> C initializers) ---

/// Renders compiler events as C array initializers of `Dialogue`
/// records, matching the declarations in the game's `Dialogue.h`.
pub struct CodeWriter<W: Write> {
    out: W,
}

impl<W: Write> CodeWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Emitter for CodeWriter<W> {
    fn open_block(&mut self, name: &str, index: u32) -> Result<()> {
        writeln!(self.out, "static Dialogue {}[] = {{", block_ident(name, index))?;
        Ok(())
    }

    fn open_entry(&mut self, tag: &str) -> Result<()> {
        writeln!(self.out, "    {{DIALOGUE_{},", tag)?;
        Ok(())
    }

    fn fragment(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "        \"{}\\n\"", text)?;
        Ok(())
    }

    fn close_entry(&mut self) -> Result<()> {
        writeln!(self.out, "    }},\n")?;
        Ok(())
    }

    fn close_block(&mut self) -> Result<()> {
        writeln!(self.out, "    {{DIALOGUE_END, NULL}}\n}};\n")?;
        Ok(())
    }

    fn end_file(&mut self, name: &str, blocks: &[String]) -> Result<()> {
        write!(self.out, "Dialogue* {}[] = {{", name)?;
        for ident in blocks {
            write!(self.out, "{}, ", ident)?;
        }
        writeln!(self.out, "NULL}};")?;
        Ok(())
    }
}
