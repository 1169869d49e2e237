use std::error::Error;
use std::fmt;

use scan_js::error::SyntaxError;

use crate::emit::EmitMode;

pub mod emit;

#[cfg(test)]
mod tests;

#[derive(Clone, Copy, Debug, Default)]
pub struct TrimOptions {
  /// Rename local variables and function names to short generated names.
  pub mangle: bool,
  /// Also rename top-level declarations. Unsafe when other scripts on the page refer to them.
  pub mangle_toplevel: bool,
  /// Emit one statement per line with indentation instead of a single minified line.
  pub pretty: bool,
}

#[derive(Debug)]
pub enum TrimError {
  Syntax(SyntaxError),
}

impl fmt::Display for TrimError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      TrimError::Syntax(err) => write!(f, "syntax error: {:?}", err),
    }
  }
}

impl Error for TrimError {}

impl From<SyntaxError> for TrimError {
  fn from(err: SyntaxError) -> TrimError {
    TrimError::Syntax(err)
  }
}

/// Parses `source`, optionally renames symbols, and serializes the result.
pub fn minify(source: &str, options: &TrimOptions) -> Result<String, TrimError> {
  let mut program = scan_js::parse(source)?;
  if options.mangle {
    scope_js::mangle(&mut program, options.mangle_toplevel);
  }
  let mode = if options.pretty {
    EmitMode::Pretty
  } else {
    EmitMode::Minified
  };
  Ok(emit::emit(&program, mode))
}
