pub mod issue;
pub mod tag;
