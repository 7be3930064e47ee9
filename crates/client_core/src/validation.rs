use std::fmt::Display;

/// Validity flag and user-visible message of one validator, replaced as a whole on every
/// recomputation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationState {
    valid: bool,
    message: Option<String>,
}

impl Default for ValidationState {
    fn default() -> Self {
        Self::valid()
    }
}

impl ValidationState {
    pub fn valid() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    pub fn from_result<E: Display>(result: &Result<(), E>) -> Self {
        match result {
            Ok(()) => Self::valid(),
            Err(err) => Self {
                valid: false,
                message: Some(err.to_string()),
            },
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Banner text; `None` means the error banner is hidden.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}
