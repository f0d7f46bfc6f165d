pub mod types;

pub use types::EditError;
