use serde::{Deserialize, Serialize};

/// One tagged run of dialogue text inside a block.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub tag: String,
    /// Escaped fragments, one per emitted string literal. An empty
    /// fragment stands for a blank line.
    pub text: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub name: String,
    pub index: u32,
    pub entries: Vec<Entry>,
}

impl Block {
    /// Identifier used for the generated array, e.g. `npc0`.
    pub fn ident(&self) -> String {
        block_ident(&self.name, self.index)
    }
}

/// All blocks closed while reading one input source.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Script {
    pub name: String,
    pub blocks: Vec<Block>,
}

pub fn block_ident(name: &str, index: u32) -> String {
    format!("{}{}", name, index)
}

/// How a single input line is treated by the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Comment,
    End,
    Directive(&'a str),
    Text(&'a str),
}
