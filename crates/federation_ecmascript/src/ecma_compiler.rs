use arcstr::ArcStr;
use federation_error::BuildResult;
use oxc::{parser::Parser, span::SourceType};

use crate::ecma_ast::{
  EcmaAst,
  program_cell::{ProgramCell, ProgramCellDependent, ProgramCellOwner},
};

pub struct EcmaCompiler;

impl EcmaCompiler {
  pub fn parse(source: impl Into<ArcStr>, source_type: SourceType) -> BuildResult<EcmaAst> {
    let allocator = oxc::allocator::Allocator::default();
    let owner = ProgramCellOwner { source: source.into(), allocator };
    let program = ProgramCell::try_new(owner, |owner| {
      let ret = Parser::new(&owner.allocator, &owner.source, source_type).parse();
      if ret.errors.is_empty() && !ret.panicked {
        Ok(ProgramCellDependent { program: ret.program })
      } else {
        Err(anyhow::anyhow!("{:?}", ret.errors))
      }
    })?;

    Ok(EcmaAst { program, source_type })
  }

  /// Parses an emitted ES module chunk.
  pub fn parse_module(source: impl Into<ArcStr>) -> BuildResult<EcmaAst> {
    Self::parse(source, SourceType::mjs())
  }
}

#[test]
fn basic_test() {
  let ast = EcmaCompiler::parse_module("export const a = import.meta.url;").unwrap();
  assert_eq!(ast.program().body.len(), 1);
  assert_eq!(ast.source().as_str(), "export const a = import.meta.url;");
}

#[test]
fn syntax_error() {
  assert!(EcmaCompiler::parse_module("const = ;").is_err());
}
