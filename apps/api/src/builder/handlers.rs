use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::builder::drafts::SkillDraft;
use crate::builder::outline::EditorSection;
use crate::builder::session::{BuilderSession, SessionView};
use crate::errors::AppError;
use crate::export::Readiness;
use crate::models::resume::{
    Collection, Education, EntryId, Experience, PersonalField, Project, SkillKind,
};
use crate::models::user::SessionUser;
use crate::render::RenderMode;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateSessionRequest {
    pub user: Option<SessionUser>,
}

#[derive(Debug, Deserialize)]
pub struct FieldValue {
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct SectionRequest {
    pub section: EditorSection,
}

/// Result of an add action. `committed` is false when the draft was incomplete;
/// the draft is then left as submitted.
#[derive(Debug, Serialize)]
pub struct CommitResponse {
    pub committed: bool,
    pub id: Option<EntryId>,
    pub session: SessionView,
}

#[derive(Debug, Serialize)]
pub struct RemoveResponse {
    pub removed: bool,
    pub session: SessionView,
}

#[derive(Debug, Serialize)]
pub struct ExportResponse {
    pub title: String,
    pub readiness: Readiness,
    pub content_type: Option<String>,
}

/// Runs `f` on the session or fails with 404.
async fn on_session<R>(
    state: &AppState,
    id: Uuid,
    f: impl FnOnce(&mut BuilderSession) -> R,
) -> Result<R, AppError> {
    state
        .sessions
        .with_session(id, f)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Builder session {id}")))
}

fn parse_segment<T>(segment: &str) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    segment
        .parse()
        .map_err(|e: T::Err| AppError::Validation(e.to_string()))
}

/// POST /api/v1/sessions
///
/// The body is optional; without one the session starts anonymous and empty.
pub async fn handle_create_session(
    State(state): State<AppState>,
    body: Option<Json<CreateSessionRequest>>,
) -> (StatusCode, Json<SessionView>) {
    let user = body.and_then(|Json(req)| req.user);
    let view = state.sessions.create(user.as_ref()).await;
    (StatusCode::CREATED, Json(view))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    Ok(Json(on_session(&state, id, |s| s.view()).await?))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_end_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.remove(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Builder session {id}")))
    }
}

/// PUT /api/v1/sessions/:id/user
pub async fn handle_reseed(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(user): Json<SessionUser>,
) -> Result<Json<SessionView>, AppError> {
    let view = on_session(&state, id, |s| {
        s.store.reseed(&user);
        s.view()
    })
    .await?;
    Ok(Json(view))
}

/// PUT /api/v1/sessions/:id/personal/:field
pub async fn handle_set_personal_field(
    State(state): State<AppState>,
    Path((id, field)): Path<(Uuid, String)>,
    Json(body): Json<FieldValue>,
) -> Result<Json<SessionView>, AppError> {
    let field: PersonalField = parse_segment(&field)?;
    let view = on_session(&state, id, |s| {
        s.store.set_personal_field(field, body.value);
        s.view()
    })
    .await?;
    Ok(Json(view))
}

/// PUT /api/v1/sessions/:id/drafts/:entity
///
/// Replaces the whole draft; missing fields become empty.
pub async fn handle_put_draft(
    State(state): State<AppState>,
    Path((id, entity)): Path<(Uuid, String)>,
    Json(body): Json<Value>,
) -> Result<Json<SessionView>, AppError> {
    let invalid =
        |e: serde_json::Error| AppError::Validation(format!("Invalid {entity} draft: {e}"));

    enum Draft {
        Experience(Experience),
        Education(Education),
        Project(Project),
        Skill(SkillDraft),
    }

    let draft = match entity.as_str() {
        "experience" => Draft::Experience(serde_json::from_value(body).map_err(invalid)?),
        "education" => Draft::Education(serde_json::from_value(body).map_err(invalid)?),
        "project" | "projects" => Draft::Project(serde_json::from_value(body).map_err(invalid)?),
        "skill" | "skills" => Draft::Skill(serde_json::from_value(body).map_err(invalid)?),
        other => return Err(AppError::Validation(format!("Unknown draft type '{other}'"))),
    };

    let view = on_session(&state, id, |s| {
        match draft {
            Draft::Experience(d) => s.drafts.experience = d,
            Draft::Education(d) => s.drafts.education = d,
            Draft::Project(d) => s.drafts.project = d,
            Draft::Skill(d) => s.drafts.skill = d,
        }
        s.view()
    })
    .await?;
    Ok(Json(view))
}

/// POST /api/v1/sessions/:id/entries/:collection
pub async fn handle_commit_entry(
    State(state): State<AppState>,
    Path((id, collection)): Path<(Uuid, String)>,
) -> Result<Json<CommitResponse>, AppError> {
    let collection: Collection = parse_segment(&collection)?;
    let (entry_id, session) = on_session(&state, id, |s| {
        let entry_id = s.drafts.commit(collection, &mut s.store);
        (entry_id, s.view())
    })
    .await?;

    if entry_id.is_none() {
        info!("Session {id}: {collection:?} draft incomplete, nothing committed");
    }
    Ok(Json(CommitResponse {
        committed: entry_id.is_some(),
        id: entry_id,
        session,
    }))
}

/// DELETE /api/v1/sessions/:id/entries/:collection/:entry_id
pub async fn handle_remove_entry(
    State(state): State<AppState>,
    Path((id, collection, entry_id)): Path<(Uuid, String, String)>,
) -> Result<Json<RemoveResponse>, AppError> {
    let collection: Collection = parse_segment(&collection)?;
    let entry_id: EntryId = parse_segment(&entry_id)?;
    let (removed, session) = on_session(&state, id, |s| {
        let removed = s.store.remove_entry(collection, entry_id);
        (removed, s.view())
    })
    .await?;
    Ok(Json(RemoveResponse { removed, session }))
}

/// POST /api/v1/sessions/:id/skills
pub async fn handle_commit_skill(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CommitResponse>, AppError> {
    let (committed, session) = on_session(&state, id, |s| {
        let committed = s.drafts.commit_skill(&mut s.store);
        (committed, s.view())
    })
    .await?;
    Ok(Json(CommitResponse {
        committed,
        id: None,
        session,
    }))
}

/// DELETE /api/v1/sessions/:id/skills/:kind/:value
pub async fn handle_remove_skill(
    State(state): State<AppState>,
    Path((id, kind, value)): Path<(Uuid, String, String)>,
) -> Result<Json<RemoveResponse>, AppError> {
    let kind: SkillKind = parse_segment(&kind)?;
    let (removed, session) = on_session(&state, id, |s| {
        let removed = s.store.remove_skill(kind, &value);
        (removed, s.view())
    })
    .await?;
    Ok(Json(RemoveResponse { removed, session }))
}

/// PUT /api/v1/sessions/:id/section
pub async fn handle_set_section(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SectionRequest>,
) -> Result<Json<SessionView>, AppError> {
    let view = on_session(&state, id, |s| {
        s.active_section = req.section;
        s.view()
    })
    .await?;
    Ok(Json(view))
}

/// POST /api/v1/sessions/:id/preview
pub async fn handle_toggle_preview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let view = on_session(&state, id, |s| {
        s.toggle_preview();
        s.view()
    })
    .await?;
    Ok(Json(view))
}

/// GET /api/v1/sessions/:id/preview
pub async fn handle_preview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let doc = on_session(&state, id, |s| s.render(RenderMode::Embedded)).await?;
    Ok(Html(doc.into_string()))
}

/// GET /api/v1/sessions/:id/document
pub async fn handle_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let doc = on_session(&state, id, |s| s.render(RenderMode::Standalone)).await?;
    Ok(Html(doc.into_string()))
}

/// POST /api/v1/sessions/:id/export
///
/// Responds with the printed artifact when the surface returns one, otherwise
/// with a JSON summary of the print.
pub async fn handle_export(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    // Render under the session lock, print without it.
    let doc = on_session(&state, id, |s| s.render(RenderMode::Standalone)).await?;
    let outcome = state.exporter.export(&doc).await?;

    let receipt = outcome.receipt;
    match receipt.artifact {
        Some(artifact) => {
            let content_type = receipt
                .content_type
                .unwrap_or_else(|| "application/pdf".to_string());
            let disposition = format!("attachment; filename=\"{}\"", download_name(doc.title()));
            Ok((
                [
                    (header::CONTENT_TYPE, content_type),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                artifact,
            )
                .into_response())
        }
        None => Ok(Json(ExportResponse {
            title: doc.title().to_string(),
            readiness: outcome.readiness,
            content_type: receipt.content_type,
        })
        .into_response()),
    }
}

/// File name for a downloaded export, e.g. "Asha Rao - Resume.pdf".
fn download_name(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .filter(|c| !c.is_control() && !matches!(c, '"' | '\\' | '/'))
        .collect();
    format!("{}.pdf", cleaned.trim())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use axum::Router;
    use tower::ServiceExt;

    use super::*;
    use crate::builder::SessionStore;
    use crate::export::testing::{Behaviour, FakeSurface};
    use crate::export::ExportTrigger;
    use crate::routes::build_router;

    fn app(behaviour: Behaviour) -> Router {
        build_router(AppState {
            sessions: SessionStore::new(),
            exporter: ExportTrigger::new(
                Arc::new(FakeSurface::new(behaviour)),
                Duration::from_millis(50),
            ),
        })
    }

    async fn call(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Vec<u8>) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    async fn start_session(app: &Router) -> String {
        let (status, body) = call(
            app,
            "POST",
            "/api/v1/sessions",
            Some(serde_json::json!({
                "user": { "name": "Asha Rao", "email": "asha@example.com" }
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let view: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(view["resume"]["personal"]["fullName"], "Asha Rao");
        view["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_session_without_body_starts_empty() {
        let app = app(Behaviour::ReadyImmediately);
        let (status, body) = call(&app, "POST", "/api/v1/sessions", None).await;

        assert_eq!(status, StatusCode::CREATED);
        let view: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(view["resume"]["personal"]["fullName"], "");
        assert_eq!(view["resume"]["personal"]["email"], "");
        assert_eq!(view["resume"]["experience"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_experience_draft_commit_flow() {
        let app = app(Behaviour::ReadyImmediately);
        let id = start_session(&app).await;

        let (status, _) = call(
            &app,
            "PUT",
            &format!("/api/v1/sessions/{id}/drafts/experience"),
            Some(serde_json::json!({
                "company": "Acme", "position": "Engineer",
                "startDate": "2022-01", "current": true
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) =
            call(&app, "POST", &format!("/api/v1/sessions/{id}/entries/experience"), None).await;
        assert_eq!(status, StatusCode::OK);
        let resp: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(resp["committed"], true);
        assert_eq!(resp["session"]["resume"]["experience"][0]["company"], "Acme");
        assert_eq!(resp["session"]["drafts"]["experience"]["company"], "");

        let (_, html) = call(&app, "GET", &format!("/api/v1/sessions/{id}/document"), None).await;
        let html = String::from_utf8(html).unwrap();
        assert!(html.contains("2022-01 - Present"));
    }

    #[tokio::test]
    async fn test_incomplete_project_not_committed_and_draft_kept() {
        let app = app(Behaviour::ReadyImmediately);
        let id = start_session(&app).await;

        call(
            &app,
            "PUT",
            &format!("/api/v1/sessions/{id}/drafts/project"),
            Some(serde_json::json!({ "name": "X" })),
        )
        .await;
        let (status, body) =
            call(&app, "POST", &format!("/api/v1/sessions/{id}/entries/projects"), None).await;

        assert_eq!(status, StatusCode::OK);
        let resp: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(resp["committed"], false);
        assert_eq!(resp["session"]["resume"]["projects"].as_array().unwrap().len(), 0);
        assert_eq!(resp["session"]["drafts"]["project"]["name"], "X");
    }

    #[tokio::test]
    async fn test_skill_commit_and_remove() {
        let app = app(Behaviour::ReadyImmediately);
        let id = start_session(&app).await;

        call(
            &app,
            "PUT",
            &format!("/api/v1/sessions/{id}/drafts/skill"),
            Some(serde_json::json!({ "value": "  React  ", "kind": "technical" })),
        )
        .await;
        let (_, body) = call(&app, "POST", &format!("/api/v1/sessions/{id}/skills"), None).await;
        let resp: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(resp["committed"], true);
        assert_eq!(resp["session"]["resume"]["skills"]["technical"][0], "React");

        let (_, body) = call(
            &app,
            "DELETE",
            &format!("/api/v1/sessions/{id}/skills/technical/React"),
            None,
        )
        .await;
        let resp: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(resp["removed"], true);
    }

    #[tokio::test]
    async fn test_personal_field_and_escaped_preview() {
        let app = app(Behaviour::ReadyImmediately);
        let id = start_session(&app).await;

        let (status, _) = call(
            &app,
            "PUT",
            &format!("/api/v1/sessions/{id}/personal/summary"),
            Some(serde_json::json!({ "value": "<b>bold</b>" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, html) = call(&app, "GET", &format!("/api/v1/sessions/{id}/preview"), None).await;
        let html = String::from_utf8(html).unwrap();
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(html.contains("class=\"resume-preview\""));
    }

    #[tokio::test]
    async fn test_unknown_personal_field_is_bad_request() {
        let app = app(Behaviour::ReadyImmediately);
        let id = start_session(&app).await;
        let (status, _) = call(
            &app,
            "PUT",
            &format!("/api/v1/sessions/{id}/personal/nickname"),
            Some(serde_json::json!({ "value": "A" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_export_returns_pdf() {
        let app = app(Behaviour::ReadyImmediately);
        let id = start_session(&app).await;
        let request = Request::builder()
            .method("POST")
            .uri(format!("/api/v1/sessions/{id}/export"))
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Asha Rao - Resume.pdf\""
        );
    }

    #[tokio::test]
    async fn test_blocked_export_is_actionable_and_leaves_resume_unchanged() {
        let app = app(Behaviour::Blocked);
        let id = start_session(&app).await;
        let (_, before) = call(&app, "GET", &format!("/api/v1/sessions/{id}"), None).await;

        let (status, body) =
            call(&app, "POST", &format!("/api/v1/sessions/{id}/export"), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        let err: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(err["error"]["code"], "EXPORT_SURFACE_BLOCKED");

        let (_, after) = call(&app, "GET", &format!("/api/v1/sessions/{id}"), None).await;
        let before: Value = serde_json::from_slice(&before).unwrap();
        let after: Value = serde_json::from_slice(&after).unwrap();
        assert_eq!(before["resume"], after["resume"]);
    }

    #[tokio::test]
    async fn test_ended_session_is_not_found() {
        let app = app(Behaviour::ReadyImmediately);
        let id = start_session(&app).await;
        let (status, _) = call(&app, "DELETE", &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = call(&app, "GET", &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_download_name_strips_header_breaking_characters() {
        assert_eq!(download_name("A \"B\" / C - Resume"), "A B  C - Resume.pdf");
    }
}
