pub mod artifact;

pub use artifact::{load_dataset, load_daterange, load_metadata, ArtifactWriter};
