use thiserror::Error;

/// A problem with the submission itself. Answered with `400`, never treated
/// as an operator fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientInputError {
    #[error("missing required fields: {}", .missing.join(", "))]
    MissingRequiredFields { missing: Vec<&'static str> },
}

/// Failure reported by a mail transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MailTransportError {
    #[error("failed to build mail request: {0}")]
    Build(String),

    #[error("failed to send email: {0}")]
    Send(String),
}

/// Anything that is not the caller's fault. Answered with a generic `500`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnexpectedFault {
    #[error("request body is missing")]
    MissingBody,

    #[error("request body is not valid base64: {0}")]
    InvalidBase64(String),

    #[error("request body is not valid UTF-8")]
    InvalidUtf8,

    #[error("malformed JSON body: {0}")]
    MalformedJson(String),

    #[error("request body decoded to null")]
    NullBody,

    #[error(transparent)]
    Transport(#[from] MailTransportError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    #[error(transparent)]
    Client(#[from] ClientInputError),

    #[error(transparent)]
    Fault(#[from] UnexpectedFault),
}

impl From<MailTransportError> for RelayError {
    fn from(error: MailTransportError) -> Self {
        Self::Fault(UnexpectedFault::Transport(error))
    }
}
