pub mod generate;
pub mod list;

pub use generate::generate_command;
pub use list::list_command;
