/// Caller input rejected before any processing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("required text is empty: {field}")]
    EmptyText { field: String },

    #[error("invalid argument {name}: {reason}")]
    InvalidArgument { name: String, reason: String },
}
