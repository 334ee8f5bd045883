use std::env;
use std::fs;
use std::io;
use std::io::{Read, Write};
use std::process;
use std::rc::Rc;

use rnng_oracle::{read_trees, DiscOracle, Err, GenOracle, Oracle, OracleDataset, SynTree};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn usage(prog_name: &str) -> String {
  format!(
    r"Usage: {} FILE [options]

Reads bracketed trees from FILE (- for stdin) and prints one oracle per tree,
separated by blank lines.

Options:
  -h, --help    Print this message
  -g, --gen     Print generative oracles (defaults to discriminative)
  -v, --vocab   Print vocabulary sizes after the oracles (to stderr)

Set RUST_LOG (e.g. RUST_LOG=debug) for progress logging.",
    prog_name
  )
}

struct Args {
  filename: String,
  generative: bool,
  print_vocab: bool,
}

impl Args {
  fn make_error_message(msg: &str, prog_name: impl AsRef<str>) -> String {
    format!("argument error: {}.\n\n{}", msg, usage(prog_name.as_ref()))
  }

  fn parse(v: Vec<String>) -> Result<Self, String> {
    let mut iter = v.into_iter();
    let prog_name = match iter.next() {
      Some(name) => name,
      None => {
        return Err(Self::make_error_message(
          "bad argument vector",
          "rnng-oracle",
        ));
      }
    };

    let mut filename: Option<String> = None;
    let mut generative = false;
    let mut print_vocab = false;

    for o in iter {
      if o == "-h" || o == "--help" {
        println!("{}", usage(&prog_name));
        process::exit(0);
      } else if o == "-g" || o == "--gen" {
        generative = true;
      } else if o == "-v" || o == "--vocab" {
        print_vocab = true;
      } else if filename.is_none() && (o == "-" || !o.starts_with('-')) {
        filename = Some(o);
      } else {
        return Err(Self::make_error_message(
          &format!("invalid argument {}", o),
          prog_name,
        ));
      }
    }

    if let Some(filename) = filename {
      Ok(Self {
        filename,
        generative,
        print_vocab,
      })
    } else {
      Err(Self::make_error_message("missing filename", prog_name))
    }
  }
}

fn read_input(filename: &str) -> Result<String, Err> {
  if filename == "-" {
    let mut src = String::new();
    io::stdin().read_to_string(&mut src)?;
    Ok(src)
  } else {
    fs::read_to_string(filename).map_err(|e| format!("couldn't read {}: {}", filename, e).into())
  }
}

fn print_oracles<O>(trees: &[SynTree], derive: fn(&SynTree) -> O, print_vocab: bool) -> Result<(), Err>
where
  O: Oracle,
{
  let dataset = OracleDataset::new(trees.iter().map(|t| Rc::new(derive(t))).collect());

  let stdout = io::stdout();
  let mut out = stdout.lock();
  for (idx, oracle) in dataset.iter().enumerate() {
    if idx > 0 {
      writeln!(out)?;
    }
    writeln!(out, "{}", oracle)?;
  }
  out.flush()?;

  if print_vocab {
    eprintln!("oracles:      {}", dataset.len());
    eprintln!("words:        {}", dataset.word2id.len());
    eprintln!("pos tags:     {}", dataset.pos2id.len());
    eprintln!("nonterminals: {}", dataset.nt2id.len());
    eprintln!("actions:      {}", dataset.action2id.len());
  }

  Ok(())
}

fn main() -> Result<(), Err> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
    .with_writer(io::stderr)
    .init();

  let opts = match Args::parse(env::args().collect()) {
    Ok(opts) => opts,
    Err(msg) => {
      eprintln!("{}", msg);
      process::exit(255);
    }
  };

  let src = read_input(&opts.filename)?;
  let trees = read_trees(&src)?;
  info!(trees = trees.len(), file = %opts.filename, "read treebank");

  if opts.generative {
    print_oracles(&trees, GenOracle::from_tree, opts.print_vocab)
  } else {
    print_oracles(&trees, DiscOracle::from_tree, opts.print_vocab)
  }
}
