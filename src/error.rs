use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("I/O error while {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON parse error while {context}: {source}")]
    Json {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("malformed alignment: {message}")]
    MalformedAlignment { message: String },
    #[error("unknown phone '{phone}'")]
    UnknownPhone { phone: String },
    #[error("no {dimension} rule matches feature bundle {features}")]
    UnclassifiableSegment {
        dimension: &'static str,
        features: String,
    },
    #[error("accuracy undefined: alignment has no target segments")]
    DivisionUndefined,
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
}

impl ScoringError {
    pub(crate) fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }

    pub(crate) fn json(context: &'static str, source: serde_json::Error) -> Self {
        Self::Json { context, source }
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedAlignment {
            message: message.into(),
        }
    }

    pub(crate) fn unknown_phone(phone: impl Into<String>) -> Self {
        Self::UnknownPhone {
            phone: phone.into(),
        }
    }

    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Stable tag written to the error column of batch reports.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "io",
            Self::Json { .. } => "json",
            Self::MalformedAlignment { .. } => "malformed_alignment",
            Self::UnknownPhone { .. } => "unknown_phone",
            Self::UnclassifiableSegment { .. } => "unclassifiable_segment",
            Self::DivisionUndefined => "division_undefined",
            Self::InvalidInput { .. } => "invalid_input",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct_per_domain_failure() {
        let errors = [
            ScoringError::malformed("x"),
            ScoringError::unknown_phone("Q"),
            ScoringError::UnclassifiableSegment {
                dimension: "place",
                features: "[]".to_string(),
            },
            ScoringError::DivisionUndefined,
        ];
        let codes: Vec<&str> = errors.iter().map(ScoringError::code).collect();
        assert_eq!(
            codes,
            [
                "malformed_alignment",
                "unknown_phone",
                "unclassifiable_segment",
                "division_undefined"
            ]
        );
    }

    #[test]
    fn messages_name_the_offending_value() {
        let err = ScoringError::unknown_phone("ʧ");
        assert_eq!(err.to_string(), "unknown phone 'ʧ'");
        let err = ScoringError::malformed("token 'sp' has no link separator");
        assert!(err.to_string().contains("'sp'"));
    }
}
