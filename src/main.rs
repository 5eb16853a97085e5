//! svgfmt CLI
//!
//! Usage:
//!   svgfmt [OPTIONS] [INFILE] [OUTFILE]
//!   echo "<svg></svg>" | svgfmt [OPTIONS] [OUTFILE]
//!
//! Options:
//!   -i, --in-place                 Rewrite <INFILE> in place
//!   -s, --shiftwidth <VALUE>       Indent per nesting level
//!   -a, --attr-extra-indent <VALUE>  Extra indent for attribute lines
//!   -c, --config <FILE>            Options file (TOML)
//!   -h, --help                     Print help

use std::fs;
use std::io::{self, IsTerminal, Read, Write};
use std::path::PathBuf;

use clap::{CommandFactory, Parser};

use svgfmt::{format, FormatError, FormatOptions, IndentSpec};

#[derive(Parser)]
#[command(name = "svgfmt")]
#[command(about = "Reformat SVG/XML into a diff-friendly, one-unit-per-line layout")]
struct Cli {
    /// Input file (when input is piped, this names the output file instead)
    input: Option<PathBuf>,

    /// Output file; overwritten if it exists (stdout if omitted)
    output: Option<PathBuf>,

    /// Rewrite the input file in place
    #[arg(short = 'i', long)]
    in_place: bool,

    /// Indent per nesting level: an integer, a string of spaces, or "t"
    /// characters for tabs (default 2)
    #[arg(short, long)]
    shiftwidth: Option<String>,

    /// Extra indent added to one shiftwidth for attribute lines (default 1)
    #[arg(short, long)]
    attr_extra_indent: Option<String>,

    /// Options file (TOML) with shiftwidth / attr-extra-indent defaults
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    let piped = !io::stdin().is_terminal();

    // When stdin is piped, the first positional names the output file.
    let (infile, outfile) = if piped {
        if cli.output.is_some() {
            fail("do not specify <INFILE> when piping to stdin");
        }
        (None, cli.input.clone())
    } else {
        (cli.input.clone(), cli.output.clone())
    };

    if cli.in_place {
        if infile.is_none() {
            fail("<INFILE> is required when using --in-place");
        }
        if outfile.is_some() {
            fail("<OUTFILE> is not allowed when using --in-place");
        }
    }

    // Read input
    let (source, source_name) = match &infile {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => fail(&format!("error reading '{}': {}", path.display(), e)),
        },
        None if piped => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => fail(&format!("error reading from stdin: {e}")),
            }
        }
        // Interactive and no file given: nothing to format, show help.
        None => {
            let _ = Cli::command().print_help();
            println!();
            return;
        }
    };

    // Assemble options: file defaults first, explicit flags override.
    let mut options = match &cli.config {
        Some(path) => match FormatOptions::from_file(path) {
            Ok(o) => o,
            Err(e) => fail(&format!(
                "error loading options '{}': {}",
                path.display(),
                e
            )),
        },
        None => FormatOptions::default(),
    };
    if let Some(arg) = &cli.shiftwidth {
        options = options.with_shiftwidth(IndentSpec::from_cli_arg(arg));
    }
    if let Some(arg) = &cli.attr_extra_indent {
        options = options.with_attr_extra_indent(IndentSpec::from_cli_arg(arg));
    }

    let output = match format(&source, &options) {
        Ok(text) => text,
        Err(FormatError::Parse(err)) => {
            eprintln!("{}", err.format(&source, &source_name));
            std::process::exit(1);
        }
        Err(err) => fail(&err.to_string()),
    };

    // Write output
    let target = if cli.in_place { infile } else { outfile };
    match target {
        Some(path) => {
            if let Err(e) = fs::write(&path, &output) {
                fail(&format!("error writing '{}': {}", path.display(), e));
            }
        }
        None => {
            // The output already ends in a newline; write it raw.
            if let Err(e) = io::stdout().write_all(output.as_bytes()) {
                fail(&format!("error writing to stdout: {e}"));
            }
        }
    }
}

fn fail(message: &str) -> ! {
    eprintln!("svgfmt: {message}");
    std::process::exit(1);
}
