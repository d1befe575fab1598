//! HTTP handlers

use actix_web::error::JsonPayloadError;
use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::core::branch_type::{self, BranchTag};
use crate::core::generator::GenerationRequest;
use crate::error::{FlownameError, Result};
use crate::server::AppState;

/// The form page, embedded at build time
const INDEX_HTML: &str = include_str!("../../static/index.html");

/// Paths accepting generation requests; the second is the one the form posts to
pub const GENERATE_PATHS: [&str; 2] = ["/generate-branch-name", "/api/generate-branch-name"];

/// Inbound body of `POST /generate-branch-name`
///
/// Every field is optional at this level so that a missing description is
/// reported as a validation error rather than a JSON error.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateBranchNameBody {
    pub description: Option<String>,
    pub branch_type: Option<String>,
    pub work_item_id: Option<String>,
}

impl GenerateBranchNameBody {
    /// Validate into a generation request
    ///
    /// Only the description is checked. The branch type is passed through as
    /// given (see [`BranchTag::parse`]); a missing one defaults to `feature`.
    pub fn into_request(self) -> Result<GenerationRequest> {
        let description = self.description.unwrap_or_default();
        if description.trim().is_empty() {
            return Err(description_required());
        }

        let branch_type = self
            .branch_type
            .as_deref()
            .map(BranchTag::parse)
            .unwrap_or_default();
        if branch_type.known().is_none() {
            debug!(branch_type = %branch_type, "Branch type is not in the registry, using it as given");
        }

        GenerationRequest::new(&description, branch_type, self.work_item_id.as_deref())
    }
}

fn description_required() -> FlownameError {
    FlownameError::InvalidInput("Description is required".to_string())
}

/// Generate a branch name
pub async fn generate_branch_name(
    state: web::Data<AppState>,
    body: web::Json<GenerateBranchNameBody>,
) -> Result<HttpResponse> {
    let request = body.into_inner().into_request()?;
    let result = state.generator.generate(&request).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// Any method other than POST on a generation path
pub async fn method_not_allowed() -> HttpResponse {
    let mut response = FlownameError::MethodNotAllowed.error_response();
    response
        .headers_mut()
        .insert(header::ALLOW, header::HeaderValue::from_static("POST"));
    response
}

/// List the branch type registry
pub async fn branch_types() -> HttpResponse {
    HttpResponse::Ok().json(branch_type::registry())
}

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

/// Serve the form
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML)
}

/// Report unreadable JSON bodies in the API's error format
///
/// A request without any body is a request without a description.
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!("Rejected request body: {}", err);
    if is_missing_body(&err, req) {
        return description_required().into();
    }
    FlownameError::InvalidInput(format!("Invalid JSON body: {}", err)).into()
}

fn is_missing_body(err: &JsonPayloadError, req: &HttpRequest) -> bool {
    if let JsonPayloadError::Deserialize(e) = err {
        // EOF before the first byte
        return e.is_eof() && e.line() == 1 && e.column() == 0;
    }

    let headers = req.headers();
    match headers.get(header::CONTENT_LENGTH) {
        Some(length) => length == "0",
        None => !headers.contains_key(header::TRANSFER_ENCODING),
    }
}
