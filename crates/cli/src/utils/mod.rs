pub mod file;

pub use file::{write_atomically, write_stdout};
