use poem::http::{header, StatusCode};
use poem::{Body, Endpoint, IntoResponse, Middleware, Request, Response, Result};

use crate::errors::ErrorBody;

const PRODUCTION_500_MESSAGE: &str = "Internal Server Error";

/// Wraps every 4xx/5xx response in the `{success:false, message, stack?}` envelope
///
/// Handler errors already arrive as JSON `ErrorBody`. Framework errors (unknown
/// route, unparsable body or query) arrive as plain text and are rewrapped.
/// In production a 500 loses its message and every error loses its stack.
#[derive(Debug, Clone, Copy)]
pub struct ErrorFormatter {
    production: bool,
}

impl ErrorFormatter {
    pub fn new(production: bool) -> Self {
        Self { production }
    }
}

impl<E: Endpoint> Middleware<E> for ErrorFormatter {
    type Output = ErrorFormatterEndpoint<E>;

    fn transform(&self, ep: E) -> Self::Output {
        ErrorFormatterEndpoint {
            inner: ep,
            production: self.production,
        }
    }
}

pub struct ErrorFormatterEndpoint<E> {
    inner: E,
    production: bool,
}

impl<E: Endpoint> Endpoint for ErrorFormatterEndpoint<E> {
    type Output = Response;

    async fn call(&self, req: Request) -> Result<Self::Output> {
        let resp = match self.inner.call(req).await {
            Ok(resp) => resp.into_response(),
            Err(err) => err.into_response(),
        };

        let status = resp.status();
        if !status.is_client_error() && !status.is_server_error() {
            return Ok(resp);
        }

        let is_json = resp
            .content_type()
            .map(|ct| ct.starts_with("application/json"))
            .unwrap_or(false);
        let (mut parts, body) = resp.into_parts();

        let parsed = if is_json {
            body.into_json::<ErrorBody>().await.ok()
        } else {
            let text = body.into_string().await.unwrap_or_default();
            Some(ErrorBody::new(framework_message(status, &text)))
        };
        let mut error = parsed.unwrap_or_else(|| ErrorBody::new(default_message(status)));
        error.success = false;

        if self.production {
            error.stack = None;
            if status == StatusCode::INTERNAL_SERVER_ERROR {
                error.message = PRODUCTION_500_MESSAGE.to_string();
            }
        }

        let bytes = serde_json::to_vec(&error).unwrap_or_default();
        parts.headers.remove(header::CONTENT_LENGTH);
        parts.headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json; charset=utf-8"),
        );
        Ok(Response::from_parts(parts, Body::from_vec(bytes)))
    }
}

fn framework_message(status: StatusCode, text: &str) -> String {
    if status == StatusCode::NOT_FOUND {
        return "Not found".to_string();
    }
    let text = text.trim();
    if text.is_empty() {
        default_message(status)
    } else {
        text.to_string()
    }
}

fn default_message(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("Error")
        .to_string()
}
