use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::compiler::{CompileOptions, Compiler, Outcome};
use crate::emitter::{Emitter, ScriptBuilder};
use crate::error::Result;
use crate::writer::CodeWriter;

/// Name prefix used when reading stdin without an explicit name.
pub const STDIN_NAME: &str = "dialogue";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// `-` selects stdin, anything else is a file path.
    pub fn from_arg(arg: &Path) -> Self {
        if arg.as_os_str() == "-" {
            InputSource::Stdin
        } else {
            InputSource::File(arg.to_path_buf())
        }
    }

    /// Identifier prefix for generated code: the file stem, or
    /// [`STDIN_NAME`] for stdin.
    pub fn name(&self) -> String {
        match self {
            InputSource::Stdin => STDIN_NAME.to_string(),
            InputSource::File(path) => path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| STDIN_NAME.to_string()),
        }
    }

    fn open(&self) -> Result<Box<dyn BufRead>> {
        Ok(match self {
            InputSource::Stdin => Box::new(BufReader::new(io::stdin())),
            InputSource::File(path) => Box::new(BufReader::new(File::open(path)?)),
        })
    }
}

/// Maps command-line arguments to sources; no arguments means stdin.
pub fn input_sources(args: &[PathBuf]) -> Vec<InputSource> {
    if args.is_empty() {
        vec![InputSource::Stdin]
    } else {
        args.iter().map(|a| InputSource::from_arg(a)).collect()
    }
}

/// Streams every source, in order, through a single compiler.
pub fn compile_sources<E: Emitter>(
    sources: &[InputSource],
    name: Option<&str>,
    options: CompileOptions,
    emitter: &mut E,
) -> Result<Outcome> {
    let mut compiler = Compiler::new(options);
    for source in sources {
        let prefix = name.map(str::to_string).unwrap_or_else(|| source.name());
        debug!("Reading {:?} as {}", source, prefix);
        compile_reader(&mut compiler, &prefix, source.open()?, emitter)?;
    }
    compiler.finish()
}

pub fn compile_reader<R: BufRead, E: Emitter>(
    compiler: &mut Compiler,
    name: &str,
    reader: R,
    emitter: &mut E,
) -> Result<()> {
    for line in reader.lines() {
        compiler.feed(name, &line?, emitter)?;
    }
    compiler.end_file(name, emitter)
}

fn open_output(output: &Option<PathBuf>) -> Result<Box<dyn Write>> {
    Ok(match output {
        Some(p) => Box::new(BufWriter::new(File::create(p)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

pub fn dialogue_compile(
    inputs: &[PathBuf],
    output: &Option<PathBuf>,
    name: Option<&str>,
    options: CompileOptions,
) -> Result<Outcome> {
    // Compile dialogue scripts -> C initializers
    let sources = input_sources(inputs);
    let mut writer = CodeWriter::new(open_output(output)?);
    let outcome = compile_sources(&sources, name, options, &mut writer)?;
    writer.into_inner().flush()?;
    report(&outcome, output);
    Ok(outcome)
}

pub fn dialogue_decode(
    inputs: &[PathBuf],
    output: &Option<PathBuf>,
    name: Option<&str>,
    options: CompileOptions,
) -> Result<Outcome> {
    // Decode dialogue scripts -> JSON
    let sources = input_sources(inputs);
    let mut builder = ScriptBuilder::new();
    let outcome = compile_sources(&sources, name, options, &mut builder)?;

    let json = serde_json::to_string_pretty(&builder.into_scripts())?;
    match output {
        Some(p) => fs::write(p, json)?,
        None => {
            let mut out = io::stdout().lock();
            writeln!(out, "{}", json)?;
            out.flush()?;
        }
    }
    report(&outcome, output);
    Ok(outcome)
}

fn report(outcome: &Outcome, output: &Option<PathBuf>) {
    let blocks = match outcome {
        Outcome::Complete { blocks } | Outcome::Truncated { blocks, .. } => *blocks,
    };
    match output {
        Some(p) => info!("Wrote {} dialogue blocks to {:?}", blocks, p),
        None => info!("Wrote {} dialogue blocks", blocks),
    }
}
