// src/webhook.rs
use std::sync::Arc;

use axum::{
    body::to_bytes,
    extract::{Request, State},
    http::{HeaderMap, Method, StatusCode},
    routing::any,
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

use crate::{
    config::{Config, Secret},
    error::WebhookError,
    signature::{self, SignatureHeader, SIGNATURE_HEADER},
    types::{Delivery, Payload},
};

pub const WEBHOOK_PATH: &str = "/webhook";
pub const EVENT_HEADER: &str = "x-github-event";
pub const DELIVERY_HEADER: &str = "x-github-delivery";

/// Receives every verified delivery.
pub trait EventSink: Send + Sync {
    fn report(&self, delivery: &Delivery);
}

/// Writes each delivery's action to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn report(&self, delivery: &Delivery) {
        info!(
            event = ?delivery.event,
            delivery_id = ?delivery.delivery_id,
            "Received event: {}",
            delivery.payload.action
        );
    }
}

pub struct WebhookReceiver {
    secret: Option<Secret>,
    max_body_bytes: usize,
    sink: Arc<dyn EventSink>,
}

impl WebhookReceiver {
    pub fn new(config: &Config, sink: Arc<dyn EventSink>) -> Self {
        Self {
            secret: config.secret.clone(),
            max_body_bytes: config.max_body_bytes,
            sink,
        }
    }

    /// Runs one delivery to completion or the first failing step.
    pub async fn handle(&self, request: Request) -> Result<(), WebhookError> {
        if request.method() != Method::POST {
            return Err(WebhookError::MethodNotAllowed);
        }

        let secret = self.secret.as_ref().ok_or(WebhookError::SecretNotSet)?;

        let (parts, body) = request.into_parts();
        let body = to_bytes(body, self.max_body_bytes)
            .await
            .map_err(|e| WebhookError::BodyUnreadable(e.to_string()))?;

        let raw = parts
            .headers
            .get(SIGNATURE_HEADER)
            .ok_or(WebhookError::SignatureMissing)?
            .to_str()
            .map_err(|_| WebhookError::SignatureMalformed)?;
        let header = SignatureHeader::parse(raw)?;
        signature::verify(&header, &body, secret)?;
        debug!(algorithm = header.algorithm, bytes = body.len(), "signature verified");

        // Only decoded once the MAC over the raw bytes has matched.
        let payload: Payload = serde_json::from_slice(&body)?;

        self.sink.report(&Delivery {
            payload,
            event: header_string(&parts.headers, EVENT_HEADER),
            delivery_id: header_string(&parts.headers, DELIVERY_HEADER),
        });
        Ok(())
    }
}

fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub fn router(receiver: Arc<WebhookReceiver>) -> Router {
    Router::new()
        .route(WEBHOOK_PATH, any(handle_webhook))
        .with_state(receiver)
        .layer(TraceLayer::new_for_http())
}

async fn handle_webhook(
    State(receiver): State<Arc<WebhookReceiver>>,
    request: Request,
) -> Result<StatusCode, WebhookError> {
    match receiver.handle(request).await {
        Ok(()) => Ok(StatusCode::OK),
        Err(e) => {
            match &e {
                WebhookError::SecretNotSet => error!("rejecting delivery: {e}"),
                WebhookError::SignatureMismatch => warn!("rejecting delivery: {e}"),
                _ => debug!("rejecting delivery: {e}"),
            }
            Err(e)
        }
    }
}
