use arcstr::ArcStr;

#[derive(Debug, Clone)]
pub struct OutputAsset {
  pub filename: ArcStr,
  pub name: Option<ArcStr>,
  pub source: String,
}
