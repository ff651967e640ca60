use thiserror::Error;

/// Errors produced while validating caller input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("project name is empty")]
    EmptyName,

    #[error("project name is too long: {len} characters (max {max})")]
    NameTooLong { len: usize, max: usize },
}
