use crate::infra::AppState;
use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use job_board::board::{board_router, ActorId, Dispatcher, EntityStore, Notification, Notifier};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub(crate) struct NotificationsResponse {
    pub(crate) session_id: ActorId,
    pub(crate) notifications: Vec<Notification>,
}

pub(crate) fn with_board_routes<S, N>(dispatcher: Arc<Dispatcher<S, N>>) -> axum::Router
where
    S: EntityStore + 'static,
    N: Notifier + 'static,
{
    board_router(dispatcher)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/sessions/:session_id/notifications",
            axum::routing::get(notifications_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Hands queued notifications for one actor to the transport.
pub(crate) async fn notifications_endpoint(
    Extension(state): Extension<AppState>,
    Path(session_id): Path<i64>,
) -> Json<NotificationsResponse> {
    let session_id = ActorId(session_id);
    let notifications = state.outbox.drain(session_id);
    if !notifications.is_empty() {
        tracing::debug!(%session_id, count = notifications.len(), "notifications drained");
    }
    Json(NotificationsResponse {
        session_id,
        notifications,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::OutboxNotifier;
    use job_board::board::{BoardSettings, InMemoryEntityStore};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn state(ready: bool) -> AppState {
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
            outbox: Arc::new(OutboxNotifier::new(10)),
        }
    }

    #[tokio::test]
    async fn readiness_reports_initializing_until_bound() {
        let response = readiness_endpoint(Extension(state(false)))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = readiness_endpoint(Extension(state(true)))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn notifications_endpoint_drains_the_outbox() {
        let state = state(true);
        state
            .outbox
            .notify(Notification::new(ActorId(7), "New application"))
            .expect("queued");

        let Json(body) = notifications_endpoint(Extension(state.clone()), Path(7)).await;
        assert_eq!(body.notifications.len(), 1);
        assert_eq!(body.notifications[0].text, "New application");

        let Json(again) = notifications_endpoint(Extension(state), Path(7)).await;
        assert!(again.notifications.is_empty());
    }

    #[tokio::test]
    async fn application_notice_reaches_the_employer_outbox() {
        let state = state(true);
        let store = Arc::new(InMemoryEntityStore::new());
        let dispatcher = Arc::new(Dispatcher::new(
            Arc::clone(&store),
            Arc::clone(&state.outbox),
            BoardSettings::default(),
        ));
        let app = with_board_routes(Arc::clone(&dispatcher)).layer(Extension(state.clone()));

        let mut employer = job_board::board::Account::new(
            ActorId(10),
            "Olena",
            job_board::board::Role::Employer,
        );
        employer.phone = Some("0501234567".to_string());
        store.save_account(employer.clone()).expect("employer saved");
        let vacancy = store
            .insert_vacancy(job_board::board::domain::NewVacancy {
                title: "Rust developer".to_string(),
                company: "Ferrous".to_string(),
                salary: None,
                description: "Services".to_string(),
                requirements: "Rust".to_string(),
                contacts: employer.contact_line(),
                category: None,
                employer_id: employer.external_id,
            })
            .expect("vacancy saved");
        store
            .upsert_resume(job_board::board::domain::NewResume {
                user_id: ActorId(20),
                position: "Developer".to_string(),
                salary: None,
                experience: "2 years".to_string(),
                education: "KPI".to_string(),
                skills: "Rust".to_string(),
                about: None,
                contacts: "Ivan, 0671234567, ivan@gmail.com".to_string(),
            })
            .expect("resume saved");

        let response = app
            .clone()
            .oneshot(
                axum::http::Request::post("/api/v1/events/button")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(axum::body::Body::from(
                        json!({ "session_id": 20, "callback_id": format!("apply_{}", vacancy.id) })
                            .to_string(),
                    ))
                    .expect("valid request"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(
                axum::http::Request::get("/api/v1/sessions/10/notifications")
                    .body(axum::body::Body::empty())
                    .expect("valid request"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        let payload: serde_json::Value = serde_json::from_slice(&body).expect("json payload");
        let notifications = payload["notifications"].as_array().expect("array");
        assert_eq!(notifications.len(), 1);
        assert!(notifications[0]["text"]
            .as_str()
            .expect("text")
            .contains("Rust developer"));
    }
}
