//! Domain error types.

/// Top-level error type for baskettrack.
///
/// The performance engine itself never fails; these cover the configuration,
/// data access and report layers around it.
#[derive(Debug, thiserror::Error)]
pub enum BasketError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("unknown basket: {id}")]
    BasketNotFound { id: String },

    #[error("price data error: {reason}")]
    Data { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&BasketError> for std::process::ExitCode {
    fn from(err: &BasketError) -> Self {
        let code: u8 = match err {
            BasketError::Io(_) => 1,
            BasketError::ConfigParse { .. }
            | BasketError::ConfigMissing { .. }
            | BasketError::ConfigInvalid { .. } => 2,
            BasketError::Data { .. } => 3,
            BasketError::BasketNotFound { .. } => 6,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::ExitCode;

    #[test]
    fn display_includes_section_and_key() {
        let err = BasketError::ConfigInvalid {
            section: "basket.tech".into(),
            key: "mode".into(),
            reason: "unknown weight mode".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid config value [basket.tech] mode: unknown weight mode"
        );
    }

    #[test]
    fn exit_codes_by_kind() {
        let missing = BasketError::ConfigMissing {
            section: "data".into(),
            key: "dir".into(),
        };
        assert_eq!(ExitCode::from(&missing), ExitCode::from(2));

        let data = BasketError::Data {
            reason: "bad row".into(),
        };
        assert_eq!(ExitCode::from(&data), ExitCode::from(3));

        let unknown = BasketError::BasketNotFound { id: "tech".into() };
        assert_eq!(ExitCode::from(&unknown), ExitCode::from(6));
    }
}
