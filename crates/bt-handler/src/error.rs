/// Errors when building handlers from user definitions.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HandlerError {
    #[error("handler name is empty")]
    EmptyName,

    #[error("condition {index} of handler {name:?} has neither tag nor predicate")]
    EmptyCondition { name: String, index: usize },

    #[error("handler {0:?} renders into neither html nor bbcode")]
    NoRender(String),

    #[error("handler name {0:?} contains brackets, whitespace or '='")]
    InvalidName(String),
}
