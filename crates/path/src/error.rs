use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    #[error("Path parse error in '{0}': {1}")]
    Parse(String, String),

    #[error("Path must start at the document root ('$')")]
    MissingRoot,

    #[error("Operator not allowed at this point in the path: {0}")]
    UnsupportedOperator(String),

    #[error("Path has no operators")]
    Empty,
}
