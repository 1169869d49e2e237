use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::token::TT;
use serde::Serialize;

/// A half-open UTF-8 byte range within the current source file.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct Loc(pub usize, pub usize);

impl Loc {
  pub fn is_empty(&self) -> bool {
    self.0 >= self.1
  }

  pub fn len(&self) -> usize {
    self.1 - self.0
  }

  /// An empty location at the start of `self`, used for synthesized tokens.
  pub fn at_start(&self) -> Loc {
    Loc(self.0, self.0)
  }

  pub fn error(self, typ: SyntaxErrorType, actual_token: Option<TT>) -> SyntaxError {
    SyntaxError::new(typ, self, actual_token)
  }
}

/// Computes the 1-based line and column of a byte offset.
///
/// Intended for error reporting, where a single O(n) scan is acceptable.
pub fn line_col(source: &str, pos: usize) -> (u32, u32) {
  let pos = pos.min(source.len());
  let mut line = 1u32;
  let mut line_start = 0usize;
  let bytes = source.as_bytes();
  let mut i = 0;
  while i < pos {
    match bytes[i] {
      b'\n' => {
        line += 1;
        line_start = i + 1;
      }
      b'\r' => {
        line += 1;
        if bytes.get(i + 1) == Some(&b'\n') {
          i += 1;
        }
        line_start = i + 1;
      }
      _ => {}
    }
    i += 1;
  }
  (line, (pos - line_start) as u32 + 1)
}
