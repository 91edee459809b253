use std::any::Any;

use axum::{
    Json,
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::{ErrorResponse, FaultResponse};
use crate::error::InternalFault;
use crate::handler::AppState;

/// How much of an internal failure a client gets to see. Decided once at
/// startup from the config.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorPolicy {
    pub expose_internal_errors: bool,
}

impl ErrorPolicy {
    pub fn render(&self, status: axum::http::StatusCode, fault: InternalFault) -> Response {
        if self.expose_internal_errors {
            let body = FaultResponse {
                message: fault.message,
                error: fault.detail,
            };
            (status, Json(body)).into_response()
        } else {
            (status, Json(ErrorResponse::new("server error"))).into_response()
        }
    }
}

/// Outermost error mapper: any response carrying an `InternalFault` gets its
/// body written here, according to the configured policy.
pub async fn render_faults(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;

    match response.extensions_mut().remove::<InternalFault>() {
        Some(fault) => state.errors.render(response.status(), fault),
        None => response,
    }
}

/// Turns a handler panic into a fault so it is rendered like any other 500.
pub fn panic_fault(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    tracing::error!(panic = %detail, "handler panicked");
    InternalFault {
        message: "handler panicked".to_string(),
        detail,
    }
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn panics_become_faults() {
        let response = panic_fault(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let fault = response.extensions().get::<InternalFault>().unwrap();
        assert_eq!(fault.detail, "boom");
    }
}
