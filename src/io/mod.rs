mod local;

pub use local::{LocalArchive, write_archive};
