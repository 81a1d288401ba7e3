use super::{Error, ErrorKind};
use serde::{Deserialize, Serialize};

/// Serializable snapshot of an [`Error`] and its cause chain.
///
/// Causes are recorded by their `Display` text, outermost first, excluding
/// the error itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Kind of the outermost error.
    pub kind: ErrorKind,
    /// Message of the outermost error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Display text of each cause.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub chain: Vec<String>,
}

impl From<&Error> for ErrorReport {
    fn from(err: &Error) -> Self {
        Self {
            kind: err.kind(),
            message: err.message().map(str::to_owned),
            chain: err.chain().skip(1).map(|e| e.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_report_lists_causes() {
        let io = std::io::Error::other("socket closed");
        let err = Error::wrap(
            ErrorKind::Provisioning,
            Error::with_cause(ErrorKind::Initialization, "pool", io),
        );

        let report = err.report();
        assert_eq!(report.kind, ErrorKind::Provisioning);
        assert_eq!(report.message, None);
        assert_eq!(
            report.chain,
            vec![
                "initialization failed: pool".to_string(),
                "socket closed".to_string()
            ]
        );
    }

    #[test]
    fn test_report_json_shape() {
        let err = Error::new(ErrorKind::Creation, "out of stock");
        let value = serde_json::to_value(err.report()).unwrap();

        assert_eq!(value, json!({ "kind": "creation", "message": "out of stock" }));

        let back: ErrorReport = serde_json::from_value(value).unwrap();
        assert!(back.chain.is_empty());
    }
}
