use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GalaxyError {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: &'static str,
    },
}
