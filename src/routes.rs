use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{Request, State};
use serde::{Deserialize, Serialize};

use crate::db::Store;
use crate::error::StoreError;
use crate::models::{Author, BlogPost, BlogPostResponse, NewBlogPost, PostPatch};

type ApiResult<T> = Result<T, (Status, Json<ApiError>)>;

// ─── Models ───

#[derive(Serialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

fn err(status: Status, msg: &str, code: &str) -> (Status, Json<ApiError>) {
    (status, Json(ApiError { error: msg.to_string(), code: code.to_string() }))
}

fn missing(field: &str) -> (Status, Json<ApiError>) {
    tracing::warn!(field, "rejected request with missing field");
    err(Status::BadRequest, &format!("Missing `{}` in request body", field), "VALIDATION_ERROR")
}

impl From<StoreError> for (Status, Json<ApiError>) {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(_) => err(Status::NotFound, "Post not found", "NOT_FOUND"),
            other => {
                tracing::error!(error = %other, "store failure");
                err(Status::InternalServerError, &other.to_string(), "DB_ERROR")
            }
        }
    }
}

// ─── Request bodies ───

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorReq {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Deserialize)]
pub struct CreatePostReq {
    pub author: Option<AuthorReq>,
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdatePostReq {
    pub id: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
}

// ─── Helpers ───

/// Returns the value as sent, or `None` when absent or blank.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

impl CreatePostReq {
    fn validate(&self) -> ApiResult<NewBlogPost> {
        let title = present(&self.title).ok_or_else(|| missing("title"))?;
        let content = present(&self.content).ok_or_else(|| missing("content"))?;
        let author = self.author.as_ref().ok_or_else(|| missing("author"))?;
        let first = present(&author.first_name).ok_or_else(|| missing("author.firstName"))?;
        let last = present(&author.last_name).ok_or_else(|| missing("author.lastName"))?;
        Ok(NewBlogPost {
            author: Author::new(first, last),
            title: title.to_string(),
            content: content.to_string(),
        })
    }
}

impl UpdatePostReq {
    fn validate(&self, path_id: &str) -> ApiResult<PostPatch> {
        if self.id.as_deref() != Some(path_id) {
            tracing::warn!(path_id, body_id = ?self.id, "rejected update with mismatched id");
            return Err(err(
                Status::BadRequest,
                &format!(
                    "Request path id ({}) and request body id ({}) must match",
                    path_id,
                    self.id.as_deref().unwrap_or("")
                ),
                "ID_MISMATCH",
            ));
        }
        Ok(PostPatch {
            title: supplied("title", &self.title)?,
            content: supplied("content", &self.content)?,
        })
    }
}

/// An optional update field: absent is fine, present-but-blank is not.
fn supplied(field: &str, value: &Option<String>) -> ApiResult<Option<String>> {
    match value {
        None => Ok(None),
        Some(_) => present(value)
            .map(|v| Some(v.to_string()))
            .ok_or_else(|| err(Status::BadRequest, &format!("`{}` must not be empty", field), "VALIDATION_ERROR")),
    }
}

// ─── Routes ───

#[get("/health")]
pub fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok", "version": env!("CARGO_PKG_VERSION")}))
}

#[get("/posts")]
pub fn list_posts(store: &State<Store>) -> ApiResult<Json<Vec<BlogPostResponse>>> {
    let posts = store.find_all()?;
    Ok(Json(posts.iter().map(BlogPost::to_response).collect()))
}

#[get("/posts/<id>")]
pub fn get_post(id: &str, store: &State<Store>) -> ApiResult<Json<BlogPostResponse>> {
    store
        .find_by_id(id)?
        .map(|post| Json(post.to_response()))
        .ok_or_else(|| err(Status::NotFound, "Post not found", "NOT_FOUND"))
}

#[post("/posts", data = "<req>")]
pub fn create_post(req: Json<CreatePostReq>, store: &State<Store>) -> ApiResult<(Status, Json<BlogPostResponse>)> {
    let new = req.validate()?;
    let post = store.create(new)?;
    Ok((Status::Created, Json(post.to_response())))
}

#[put("/posts/<id>", data = "<req>")]
pub fn update_post(id: &str, req: Json<UpdatePostReq>, store: &State<Store>) -> ApiResult<Status> {
    let patch = req.validate(id)?;
    store.update(id, &patch)?;
    Ok(Status::NoContent)
}

#[delete("/posts/<id>")]
pub fn delete_post(id: &str, store: &State<Store>) -> ApiResult<Status> {
    store.delete(id)?;
    Ok(Status::NoContent)
}

// ─── Catchers ───

#[catch(400)]
pub fn bad_request() -> Json<ApiError> {
    Json(ApiError { error: "Malformed request body".to_string(), code: "BAD_REQUEST".to_string() })
}

#[catch(404)]
pub fn not_found() -> Json<ApiError> {
    Json(ApiError { error: "Not found".to_string(), code: "NOT_FOUND".to_string() })
}

#[catch(422)]
pub fn unprocessable_entity() -> Json<ApiError> {
    Json(ApiError { error: "Request body has the wrong shape".to_string(), code: "UNPROCESSABLE_ENTITY".to_string() })
}

#[catch(500)]
pub fn internal_error() -> Json<ApiError> {
    Json(ApiError { error: "Internal server error".to_string(), code: "INTERNAL_ERROR".to_string() })
}

#[catch(default)]
pub fn default_catcher(status: Status, _req: &Request) -> (Status, Json<ApiError>) {
    err(status, status.reason().unwrap_or("Unknown error"), "HTTP_ERROR")
}
