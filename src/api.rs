use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorMessage {
    pub message: String,
}

/// The `{ "error": { "message": ... } }` envelope used for every 4xx reply
/// except 401, and for redacted 500s.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorMessage,
}

impl ErrorResponse {
    pub fn new(msg: &str) -> Self {
        ErrorResponse {
            error: ErrorMessage {
                message: msg.to_owned(),
            },
        }
    }
}

/// Unredacted 500 body: the top-level message plus the full error chain.
#[derive(Debug, Serialize)]
pub struct FaultResponse {
    pub message: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn new_from_msg(msg: &str) -> Self {
        StatusResponse {
            status: msg.to_owned(),
        }
    }
}
