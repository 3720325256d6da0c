//! Claims handlers

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use tracing::info;

use core_kernel::SubmissionId;
use domain_claims::{Claim, ClaimStatus};

use crate::dto::claims::{
    ClaimDto, ClaimEnvelope, ClaimListResponse, PractitionerReviewRequest,
    PractitionerReviewResponse, SubmitClaimResponse,
};
use crate::error::ApiError;
use crate::AppState;

/// Submits a new claim with one or more report files
///
/// Multipart form: repeated `reports` file parts plus an optional `comments`
/// text part. Files are persisted under a fresh per-claim directory and the
/// claim starts `awaiting-processing`.
pub async fn submit_claim(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<SubmitClaimResponse>), ApiError> {
    let mut comments = String::new();
    let mut files: Vec<(String, Vec<u8>)> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::BadRequest(format!("malformed multipart body: {err}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("reports") => {
                let filename = field.file_name().map(str::to_string).unwrap_or_default();
                if filename.is_empty() {
                    continue;
                }
                let bytes = field.bytes().await.map_err(|err| {
                    ApiError::BadRequest(format!("failed to read report upload: {err}"))
                })?;
                files.push((filename, bytes.to_vec()));
            }
            Some("comments") => {
                comments = field.text().await.map_err(|err| {
                    ApiError::BadRequest(format!("failed to read comments: {err}"))
                })?;
            }
            _ => {}
        }
    }

    if files.is_empty() {
        return Err(ApiError::BadRequest(
            "At least one report file is required under 'reports'.".to_string(),
        ));
    }

    let id = SubmissionId::new_v7();
    let mut reports = Vec::with_capacity(files.len());
    for (filename, bytes) in &files {
        let report = state.store.vault().store_report(&id, filename, bytes)?;
        reports.push(report);
    }

    let claim = Claim::submit(id, comments, reports)
        .map_err(|err| ApiError::BadRequest(err.to_string()))?;
    state.store.insert(claim).await?;
    info!(claim = %id, files = files.len(), "claim submitted");

    Ok((
        StatusCode::CREATED,
        Json(SubmitClaimResponse {
            submission_id: id.to_string(),
            status: ClaimStatus::AwaitingProcessing,
        }),
    ))
}

/// Lists all claims, newest first
pub async fn list_claims(
    State(state): State<AppState>,
) -> Result<Json<ClaimListResponse>, ApiError> {
    let mut claims = state.store.list().await?;
    claims.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(Json(ClaimListResponse {
        claims: claims.iter().map(ClaimDto::from).collect(),
    }))
}

/// Lists claims currently awaiting practitioner review, newest first
pub async fn list_uncertain_claims(
    State(state): State<AppState>,
) -> Result<Json<ClaimListResponse>, ApiError> {
    let mut claims = state.store.list().await?;
    claims.retain(|claim| claim.status == ClaimStatus::Uncertain);
    claims.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(Json(ClaimListResponse {
        claims: claims.iter().map(ClaimDto::from).collect(),
    }))
}

/// Gets a claim by submission id
pub async fn get_claim(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ClaimEnvelope>, ApiError> {
    let id = parse_submission_id(&id)?;
    let claim = state.store.get(&id).await?;

    Ok(Json(ClaimEnvelope {
        claim: ClaimDto::from(&claim),
    }))
}

/// Serves one stored report file
///
/// The resolved path must stay within the submissions root; an escaping path
/// is rejected before any read happens.
pub async fn get_report_file(
    State(state): State<AppState>,
    Path((id, filename)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_submission_id(&id)?;
    let path = state.store.report_file_path(&id, &filename).await?;
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|err| ApiError::Internal(format!("failed to read report file: {err}")))?;

    Ok((
        [(header::CONTENT_TYPE, "application/octet-stream")],
        bytes,
    ))
}

/// Applies a practitioner review to an uncertain claim
pub async fn practitioner_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<PractitionerReviewRequest>,
) -> Result<Json<PractitionerReviewResponse>, ApiError> {
    let id = parse_submission_id(&id)?;
    let target = parse_review_status(&request.status)?;

    state
        .store
        .update(&id, move |claim| {
            claim.practitioner_review(target, request.comment)
        })
        .await?;
    info!(claim = %id, status = %target, "practitioner review applied");

    Ok(Json(PractitionerReviewResponse {
        submission_id: id.to_string(),
        status: target,
    }))
}

fn parse_submission_id(raw: &str) -> Result<SubmissionId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::NotFound(format!("Claim not found: {raw}")))
}

fn parse_review_status(raw: &str) -> Result<ClaimStatus, ApiError> {
    match raw {
        "accept" => Ok(ClaimStatus::Accept),
        "reject" => Ok(ClaimStatus::Reject),
        "uncertain" => Ok(ClaimStatus::Uncertain),
        _ => Err(ApiError::Validation(
            "Status must be one of: accept, reject, uncertain.".to_string(),
        )),
    }
}
