use super::ParameterKind;

/// Rejected parameter assignment. The staged value is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParameterError {
    #[error("shader program has no parameter named `{0}`")]
    UnknownParameter(String),

    #[error("parameter `{name}` is declared as {declared:?}, got {provided:?}")]
    KindMismatch {
        name: String,
        declared: ParameterKind,
        provided: ParameterKind,
    },
}
