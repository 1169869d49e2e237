use ast::Program;
use error::SyntaxResult;
use parse::Parser;

pub mod ast;
pub mod char;
pub mod error;
pub mod lex;
pub mod loc;
pub mod parse;
pub mod token;

pub fn parse(source: &str) -> SyntaxResult<Program> {
  let mut parser = Parser::new(source);
  parser.parse_program()
}
