use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use tracing::Level;

use dialogue::process::{dialogue_compile, dialogue_decode};
use dialogue::CompileOptions;

#[derive(Parser)]
#[command(name = "dialogue-cli")]
#[command(about = "Compile dialogue scripts into C array initializers", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,
    /// Used as `compile` arguments when no subcommand is given
    #[command(flatten)]
    args: ScriptArgs,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile dialogue scripts to C initializers
    Compile(ScriptArgs),
    /// Decode dialogue scripts to JSON
    Decode(ScriptArgs),
}

#[derive(Args)]
struct ScriptArgs {
    /// Input script files, `-` for stdin (defaults to stdin)
    inputs: Vec<PathBuf>,
    /// Output file (optional, defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Identifier prefix (optional, defaults to each input's file stem)
    #[arg(short, long)]
    name: Option<String>,
    /// JSON file with compile options; flags below override it
    #[arg(long)]
    options: Option<PathBuf>,
    /// Keep each input line as a single string literal
    #[arg(long)]
    no_wrap: bool,
    /// Wrap column for dialogue text
    #[arg(short, long)]
    width: Option<usize>,
    /// Fail if the input ends inside a block
    #[arg(long)]
    strict: bool,
    /// Restart block numbering for every input file
    #[arg(long)]
    reset_per_file: bool,
}

impl ScriptArgs {
    fn compile_options(&self) -> anyhow::Result<CompileOptions> {
        let mut options = match &self.options {
            Some(path) => {
                let content = fs::read_to_string(path)
                    .with_context(|| format!("reading options file {:?}", path))?;
                serde_json::from_str(&content)
                    .with_context(|| format!("parsing options file {:?}", path))?
            }
            None => CompileOptions::default(),
        };
        if self.no_wrap {
            options.wrap.enabled = false;
        }
        if let Some(width) = self.width {
            options.wrap.width = width;
        }
        options.strict |= self.strict;
        options.reset_per_file |= self.reset_per_file;
        Ok(options)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout carries the generated code
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.quiet { Level::WARN } else { Level::INFO })
        .init();

    match &cli.command {
        None => dialogue_compile(
            &cli.args.inputs,
            &cli.args.output,
            cli.args.name.as_deref(),
            cli.args.compile_options()?,
        )?,
        Some(Commands::Compile(args)) => dialogue_compile(
            &args.inputs,
            &args.output,
            args.name.as_deref(),
            args.compile_options()?,
        )?,
        Some(Commands::Decode(args)) => dialogue_decode(
            &args.inputs,
            &args.output,
            args.name.as_deref(),
            args.compile_options()?,
        )?,
    };

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "dialogue-cli",
            "compile",
            "npc.txt",
            "--no-wrap",
            "--width",
            "40",
            "--strict",
        ]);
        let Some(Commands::Compile(args)) = cli.command else {
            panic!("expected compile");
        };
        assert_eq!(args.inputs, vec![PathBuf::from("npc.txt")]);
        let options = args.compile_options().unwrap();
        assert!(!options.wrap.enabled);
        assert_eq!(options.wrap.width, 40);
        assert!(options.strict);
        assert!(!options.reset_per_file);
    }

    #[test]
    fn test_no_inputs_means_stdin() {
        let cli = Cli::parse_from(["dialogue-cli", "decode"]);
        let Some(Commands::Decode(args)) = cli.command else {
            panic!("expected decode");
        };
        assert!(args.inputs.is_empty());
        assert_eq!(args.compile_options().unwrap(), CompileOptions::default());
    }

    #[test]
    fn test_bare_paths_compile() {
        let cli = Cli::parse_from(["dialogue-cli", "npc.txt", "hint.txt", "--no-wrap"]);
        assert!(cli.command.is_none());
        assert_eq!(
            cli.args.inputs,
            vec![PathBuf::from("npc.txt"), PathBuf::from("hint.txt")]
        );
        assert!(!cli.args.compile_options().unwrap().wrap.enabled);
    }

    #[test]
    fn test_bare_invocation_reads_stdin() {
        let cli = Cli::parse_from(["dialogue-cli"]);
        assert!(cli.command.is_none());
        assert!(cli.args.inputs.is_empty());

        let dash = Cli::parse_from(["dialogue-cli", "-"]);
        assert!(dash.command.is_none());
        assert_eq!(dash.args.inputs, vec![PathBuf::from("-")]);
    }
}
