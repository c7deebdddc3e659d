//! Command-line interface for IRIS.
//!
//! Usage:
//!   iris `<input.iris>` [-o `<output>`] [--watch]   - Compile a file (default output: sibling .jsx)
//!   iris compile [`<code>`] [-o `<output>`]         - Compile an argument, or stdin when omitted

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use iris::CompileOptions;

mod watch;

#[derive(Parser)]
#[command(name = "iris")]
#[command(version, about = "Compile IRIS layouts to JSX with Tailwind classes")]
#[command(args_conflicts_with_subcommands = true, arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to the .iris file to compile
    input: Option<PathBuf>,

    /// Where to write the result (default: next to the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Recompile whenever the input changes
    #[arg(short, long)]
    watch: bool,

    #[command(flatten)]
    emit: EmitArgs,
}

#[derive(Subcommand)]
enum Command {
    /// Compile source given on the command line or piped through stdin
    Compile {
        /// Layout source; read from stdin when omitted
        code: Option<String>,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        emit: EmitArgs,
    },
}

#[derive(Args, Debug, Clone)]
struct EmitArgs {
    /// Print everything on one line
    #[arg(long)]
    minify: bool,

    /// Spaces per nesting level
    #[arg(long, default_value_t = 2)]
    indent: usize,

    /// Wrap several top-level elements in a flex column instead of a fragment
    #[arg(long)]
    no_fragment: bool,

    /// Keep repeated classes in className attributes
    #[arg(long)]
    keep_duplicates: bool,

    /// Reject out-of-range values before generating
    #[arg(long)]
    validate: bool,

    /// What to produce
    #[arg(long, value_enum, default_value_t = Emit::Markup)]
    emit: Emit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Emit {
    /// JSX markup
    Markup,
    /// The parsed tree as JSON
    Ast,
}

impl Emit {
    fn extension(self) -> &'static str {
        match self {
            Emit::Markup => "jsx",
            Emit::Ast => "json",
        }
    }
}

impl EmitArgs {
    fn compile_options(&self) -> CompileOptions {
        CompileOptions::default()
            .with_fragment(!self.no_fragment)
            .with_pretty(!self.minify)
            .with_indent_size(self.indent)
            .with_remove_duplicates(!self.keep_duplicates)
    }

    fn render(&self, source: &str) -> Result<String> {
        match self.emit {
            Emit::Markup => {
                let program = iris::parse_program(source)?;
                if self.validate {
                    iris::validate_program(&program)?;
                }
                Ok(iris::generate_program(&program, &self.compile_options()))
            }
            Emit::Ast => {
                let node = iris::parse(source)?;
                if self.validate {
                    iris::validate(&node)?;
                }
                Ok(iris::tree_to_json(&node, !self.minify)?)
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Some(Command::Compile { code, output, emit }) => compile_source(code, output, &emit),
        None => {
            let Some(input) = cli.input else {
                bail!("No input file given");
            };
            if input.extension().and_then(|ext| ext.to_str()) != Some("iris") {
                bail!("Input file must have a .iris extension: {}", input.display());
            }
            let output = cli
                .output
                .unwrap_or_else(|| input.with_extension(cli.emit.emit.extension()));

            if cli.watch {
                if let Err(err) = compile_file(&input, &output, &cli.emit) {
                    log::error!("{err:#}");
                }
                watch::watch(&input, || compile_file(&input, &output, &cli.emit))
            } else {
                compile_file(&input, &output, &cli.emit)
            }
        }
    }
}

fn compile_file(input: &Path, output: &Path, emit: &EmitArgs) -> Result<()> {
    let source = fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let rendered = emit
        .render(&source)
        .with_context(|| format!("Failed to compile {}", input.display()))?;
    write_output(output, &rendered)?;
    log::info!("compiled {} -> {}", input.display(), output.display());
    Ok(())
}

fn compile_source(code: Option<String>, output: Option<PathBuf>, emit: &EmitArgs) -> Result<()> {
    let source = match code {
        Some(code) => code,
        None => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .context("Failed to read stdin")?;
            source
        }
    };

    let rendered = emit.render(&source)?;
    match output {
        Some(path) => {
            write_output(&path, &rendered)?;
            log::info!("wrote {}", path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

fn write_output(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, format!("{contents}\n"))
        .with_context(|| format!("Failed to write {}", path.display()))
}
