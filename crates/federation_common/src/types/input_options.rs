/// The part of the host's input options the federation engine adjusts.
#[derive(Debug, Default, Clone)]
pub struct InputOptions {
  pub external: Vec<String>,
}
