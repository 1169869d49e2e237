use clap::Parser;
use scan_js::loc::line_col;
use std::fs;
use std::io::stdin;
use std::io::stdout;
use std::io::Read;
use std::io::Write;
use std::path::PathBuf;
use std::process;
use trim_js::minify;
use trim_js::TrimError;
use trim_js::TrimOptions;

#[derive(Parser)]
#[command(name = "trim-js", about = "JavaScript minifier")]
struct Cli {
  /// File to minify; omit for stdin.
  #[arg(short, long)]
  input: Option<PathBuf>,

  /// Output destination; omit for stdout.
  #[arg(short, long)]
  output: Option<PathBuf>,

  /// Rename local variables and function names to short generated names.
  #[arg(short, long)]
  mangle: bool,

  /// Also rename top-level declarations. Unsafe when other scripts refer to them.
  #[arg(long, requires = "mangle")]
  mangle_toplevel: bool,

  /// Emit one statement per line with indentation instead of a single line.
  #[arg(short, long)]
  pretty: bool,

  /// Print the parsed program as JSON instead of minifying.
  #[arg(long)]
  dump_ast: bool,
}

fn exit_with_error(message: impl AsRef<str>) -> ! {
  eprintln!("error: {}", message.as_ref());
  process::exit(1);
}

fn read_source(input: Option<&PathBuf>) -> String {
  let mut raw = Vec::new();
  match input {
    Some(path) => match fs::read(path) {
      Ok(bytes) => raw = bytes,
      Err(err) => exit_with_error(format!("failed to read {}: {err}", path.display())),
    },
    None => {
      if let Err(err) = stdin().read_to_end(&mut raw) {
        exit_with_error(format!("failed to read stdin: {err}"));
      }
    }
  }
  match String::from_utf8(raw) {
    Ok(source) => source,
    Err(err) => exit_with_error(format!("input is not valid UTF-8: {err}")),
  }
}

fn write_output(output: Option<&PathBuf>, text: &str) {
  let result = match output {
    Some(path) => fs::write(path, text)
      .map_err(|err| format!("failed to write {}: {err}", path.display())),
    None => stdout()
      .write_all(text.as_bytes())
      .map_err(|err| format!("failed to write stdout: {err}")),
  };
  if let Err(message) = result {
    exit_with_error(message);
  }
}

fn main() {
  let args = Cli::parse();
  let input_name = args
    .input
    .as_ref()
    .map(|p| p.to_string_lossy().into_owned())
    .unwrap_or_else(|| "<stdin>".to_string());
  let source = read_source(args.input.as_ref());

  if args.dump_ast {
    let program = match scan_js::parse(&source) {
      Ok(program) => program,
      Err(err) => {
        let (line, col) = line_col(&source, err.loc.0);
        exit_with_error(format!("{input_name}:{line}:{col}: {err}"));
      }
    };
    let json = match serde_json::to_string_pretty(&program) {
      Ok(json) => json,
      Err(err) => exit_with_error(format!("failed to serialize program: {err}")),
    };
    write_output(args.output.as_ref(), &json);
    return;
  }

  let options = TrimOptions {
    mangle: args.mangle,
    mangle_toplevel: args.mangle_toplevel,
    pretty: args.pretty,
  };
  match minify(&source, &options) {
    Ok(minified) => write_output(args.output.as_ref(), &minified),
    Err(TrimError::Syntax(err)) => {
      let (line, col) = line_col(&source, err.loc.0);
      exit_with_error(format!("{input_name}:{line}:{col}: {err}"));
    }
  }
}
