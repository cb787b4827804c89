//! Notification service routes

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::Method,
    response::IntoResponse,
    routing::{any, get},
};
use common::models::ReportNotification;
use serde_json::json;
use tracing::{error, info};

use crate::{
    email::OutboundEmail,
    error::{NotifyError, NotifyResult},
    state::AppState,
    template,
};

/// Create the router for the notification service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", any(send_report_notification))
        .route("/health", get(health_check))
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "notify-service"
    }))
}

/// Email the administrator about a newly filed report
pub async fn send_report_notification(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> NotifyResult<impl IntoResponse> {
    if method != Method::POST {
        return Err(NotifyError::MethodNotAllowed);
    }

    let report: ReportNotification = serde_json::from_slice(&body).map_err(|e| {
        error!("Error sending report notification: {}", e);
        NotifyError::Delivery(e.to_string())
    })?;

    let (Some(listing), Some(reporter)) = (&report.listing, &report.reporter) else {
        return Err(NotifyError::MissingData);
    };
    if report.id.is_empty() {
        return Err(NotifyError::MissingData);
    }

    let Some(sender) = &state.sender else {
        error!("RESEND_API_KEY not configured");
        return Err(NotifyError::NotConfigured);
    };

    info!("Sending notification for report {}", report.id);
    let email = OutboundEmail {
        from: state.from.clone(),
        to: vec![state.admin_email.clone()],
        subject: template::render_subject(&listing.title),
        html: template::render_html(&report, listing, reporter, &state.site_url),
    };

    let sent = sender.send(&email).await.map_err(|e| {
        error!("Error sending report notification: {}", e);
        NotifyError::Delivery(e.to_string())
    })?;

    Ok(Json(json!({
        "success": true,
        "message": "Report notification sent successfully",
        "emailId": sent.id,
    })))
}
