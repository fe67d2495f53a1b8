pub use rayon::iter::{IntoParallelIterator, ParallelIterator};
