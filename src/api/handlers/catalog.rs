//! Pass-through catalog endpoints for projects, courses, professors, and
//! tasks. Creation echoes the validated payload back; listing answers with
//! a liveness marker. Persistence for these resources lives elsewhere.

use axum::response::{IntoResponse, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    // Wire value keeps the historical misspelling
    #[serde(rename = "planing")]
    Planning,
    Active,
    Complete,
    Overdue,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProjectCreate {
    pub name: String,
    pub course: String,
    pub professor: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: Status,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CourseCreate {
    pub name: String,
    pub department: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProfessorCreate {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TaskCreate {
    pub pid: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub sid: i64,
    pub end: DateTime<Utc>,
    pub status: Status,
}

#[utoipa::path(
    post,
    path = "/projects",
    request_body = ProjectCreate,
    responses((status = 200, description = "Echo of the accepted project payload")),
    tag = "catalog"
)]
pub async fn create_project(Json(project): Json<ProjectCreate>) -> impl IntoResponse {
    Json(json!({ "stored_data": project }))
}

#[utoipa::path(
    get,
    path = "/projects",
    responses((status = 200, description = "Liveness marker")),
    tag = "catalog"
)]
pub async fn get_projects() -> impl IntoResponse {
    Json(json!({ "status": "working" }))
}

#[utoipa::path(
    post,
    path = "/courses",
    request_body = CourseCreate,
    responses((status = 200, description = "Echo of the accepted course payload")),
    tag = "catalog"
)]
pub async fn create_course(Json(course): Json<CourseCreate>) -> impl IntoResponse {
    Json(json!({ "stored_data": course }))
}

#[utoipa::path(
    get,
    path = "/courses",
    responses((status = 200, description = "Liveness marker")),
    tag = "catalog"
)]
pub async fn get_courses() -> impl IntoResponse {
    Json(json!({ "status": "working" }))
}

#[utoipa::path(
    post,
    path = "/professors",
    request_body = ProfessorCreate,
    responses((status = 200, description = "Echo of the accepted professor payload")),
    tag = "catalog"
)]
pub async fn create_professor(Json(professor): Json<ProfessorCreate>) -> impl IntoResponse {
    Json(json!({ "stored_data": professor }))
}

#[utoipa::path(
    get,
    path = "/professors",
    responses((status = 200, description = "Liveness marker")),
    tag = "catalog"
)]
pub async fn get_professors() -> impl IntoResponse {
    Json(json!({ "status": "professor received" }))
}

#[utoipa::path(
    post,
    path = "/tasks",
    request_body = TaskCreate,
    responses((status = 200, description = "Echo of the accepted task payload")),
    tag = "catalog"
)]
pub async fn create_task(Json(task): Json<TaskCreate>) -> impl IntoResponse {
    Json(json!({ "stored_data": task }))
}

#[utoipa::path(
    get,
    path = "/tasks",
    responses((status = 200, description = "Liveness marker")),
    tag = "catalog"
)]
pub async fn get_tasks() -> impl IntoResponse {
    Json(json!({ "status": "task received" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_historical_wire_values() -> anyhow::Result<()> {
        assert_eq!(serde_json::to_value(Status::Planning)?, "planing");
        assert_eq!(serde_json::to_value(Status::Active)?, "active");
        assert_eq!(serde_json::to_value(Status::Complete)?, "complete");
        assert_eq!(serde_json::to_value(Status::Overdue)?, "overdue");
        Ok(())
    }

    #[test]
    fn project_round_trips_with_optional_description() -> anyhow::Result<()> {
        let payload = json!({
            "name": "capstone",
            "course": "CS401",
            "professor": "Knuth",
            "start": "2024-09-01T00:00:00Z",
            "end": "2024-12-15T00:00:00Z",
            "status": "planing"
        });
        let project: ProjectCreate = serde_json::from_value(payload)?;
        assert_eq!(project.description, None);
        assert_eq!(project.status, Status::Planning);
        Ok(())
    }
}
