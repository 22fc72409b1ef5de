use std::env;
use std::fmt::{self, Debug, Display};

#[derive(Clone, Debug, PartialEq)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        reqwest_error(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        decode_error(err)
    }
}

impl Error {
    /// Infrastructure failures (network, upstream, decoding) as opposed to bad input.
    pub fn is_transport(&self) -> bool {
        matches!(self.code, 1..=99)
    }
}

pub fn invalid_input_error() -> Error {
    Error {
        code: 101,
        message: "invalid input".into(),
    }
}

pub fn env_var_error(_: env::VarError) -> Error {
    Error {
        code: 1,
        message: "environment variable error".into(),
    }
}

pub fn reqwest_error(err: reqwest::Error) -> Error {
    tracing::error!("request failed: {:?}", err);

    if err.is_decode() {
        return decode_error(err);
    }

    transport_error()
}

pub fn transport_error() -> Error {
    Error {
        code: 3,
        message: "transport error".into(),
    }
}

pub fn upstream_error() -> Error {
    Error {
        code: 4,
        message: "upstream error".into(),
    }
}

pub fn unexpected_error() -> Error {
    Error {
        code: 5,
        message: "unexpected error".into(),
    }
}

pub fn decode_error<T: Debug>(_: T) -> Error {
    Error {
        code: 6,
        message: "decode error".into(),
    }
}
