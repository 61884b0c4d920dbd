/// Exit code for usage, configuration, and filter-validation faults.
pub const EXIT_USAGE: u8 = 2;
/// Exit code for network and data faults.
pub const EXIT_DATA: u8 = 4;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    /// An unmet query precondition. Recovered locally: the user is warned and
    /// no request is issued.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(EXIT_USAGE, message)
    }

    /// A network, status, or body-parse fault. Terminal for the attempt; the
    /// user re-triggers.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(EXIT_DATA, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    /// Front-ends route validation faults to a warning and everything else to
    /// the generic failure path.
    pub fn is_validation(&self) -> bool {
        self.exit_code == EXIT_USAGE
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_and_transport_are_distinguishable() {
        let v = AppError::validation("missing facet");
        let t = AppError::transport("status 500");
        assert!(v.is_validation());
        assert!(!t.is_validation());
        assert_eq!(v.exit_code(), EXIT_USAGE);
        assert_eq!(t.exit_code(), EXIT_DATA);
    }
}
