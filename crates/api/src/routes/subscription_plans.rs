//! Subscription plan route handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use domain::models::{
    CreatePlanRequest, CreatePlanResponse, FeatureValueInput, ListPlansResponse, PriceRecord,
    SubscriptionPlan, UpdatePlanRequest,
};
use domain::services::{PlanEditorSession, SubmitError, SubmitOutcome};
use shared::validation::validate_currency_code;
use std::collections::BTreeMap;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AdminAuth;
use crate::middleware::metrics::record_plan_submission;
use crate::routes::plan_editor::load_snapshot;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_plans).post(create_plan))
        .route("/:plan_id", get(get_plan).patch(update_plan))
}

/// Merges price records per currency; unlisted currencies keep their price.
fn apply_pricing(
    session: &mut PlanEditorSession,
    pricing: &BTreeMap<String, PriceRecord>,
) -> Result<(), ApiError> {
    for (currency, price) in pricing {
        validate_currency_code(currency).map_err(|_| {
            ApiError::Validation(format!("Invalid currency code '{}'", currency))
        })?;
        session.set_price(currency.clone(), price.amount);
    }
    Ok(())
}

fn apply_feature_values(
    session: &mut PlanEditorSession,
    values: &[FeatureValueInput],
) -> Result<(), ApiError> {
    for input in values {
        session.set_value(&input.feature_id, input.value)?;
    }
    Ok(())
}

async fn submit(
    state: &AppState,
    session: &mut PlanEditorSession,
    actor_id: Uuid,
    save_as_draft: bool,
) -> Result<SubmitOutcome, ApiError> {
    let result = session
        .submit(state.plans.as_ref(), actor_id, save_as_draft)
        .await;

    record_plan_submission(match &result {
        Ok(SubmitOutcome::Created(_)) => "created",
        Ok(SubmitOutcome::Updated(_)) => "updated",
        Err(SubmitError::Invalid(_)) => "invalid",
        Err(SubmitError::Persistence(_)) => "failed",
    });

    Ok(result?)
}

async fn find_plan(state: &AppState, plan_id: Uuid) -> Result<SubscriptionPlan, ApiError> {
    state
        .plans
        .find_by_id(plan_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Subscription plan {} not found", plan_id)))
}

/// List all plans, oldest first.
///
/// GET /api/admin/v1/subscription-plans
#[axum::debug_handler(state = AppState)]
async fn list_plans(
    State(state): State<AppState>,
    _admin: AdminAuth,
) -> Result<Json<ListPlansResponse>, ApiError> {
    let plans = state.plans.list().await?;

    Ok(Json(ListPlansResponse {
        total: plans.len(),
        data: plans,
    }))
}

/// GET /api/admin/v1/subscription-plans/:plan_id
#[axum::debug_handler(state = AppState)]
async fn get_plan(
    State(state): State<AppState>,
    _admin: AdminAuth,
    Path(plan_id): Path<Uuid>,
) -> Result<Json<SubscriptionPlan>, ApiError> {
    Ok(Json(find_plan(&state, plan_id).await?))
}

/// Create a plan from fields and feature values.
///
/// POST /api/admin/v1/subscription-plans
///
/// Feature values are applied through a fresh catalog snapshot; only
/// assignable features are accepted. `saveAsDraft` stores the plan inactive.
#[axum::debug_handler(state = AppState)]
async fn create_plan(
    State(state): State<AppState>,
    admin: AdminAuth,
    Json(request): Json<CreatePlanRequest>,
) -> Result<(StatusCode, Json<CreatePlanResponse>), ApiError> {
    request.validate()?;

    let snapshot = load_snapshot(&state).await;
    let mut session = PlanEditorSession::new(snapshot);

    session.set_name(request.name.trim())?;
    session.set_display_name(request.display_name.trim());
    session.set_description(request.description.clone());
    apply_pricing(&mut session, &request.pricing)?;
    apply_feature_values(&mut session, &request.feature_values)?;

    let outcome = submit(&state, &mut session, admin.admin_id, request.save_as_draft).await?;

    info!(
        plan_id = %outcome.plan_id(),
        plan_name = %session.draft().name,
        admin_id = %admin.admin_id,
        save_as_draft = request.save_as_draft,
        "Subscription plan created via API"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreatePlanResponse {
            id: outcome.plan_id(),
            active: !request.save_as_draft,
        }),
    ))
}

/// Partially update a plan.
///
/// PATCH /api/admin/v1/subscription-plans/:plan_id
///
/// The request is merged into the stored plan, the result is validated, and
/// only changed fields are written back. A blank `description` clears it.
#[axum::debug_handler(state = AppState)]
async fn update_plan(
    State(state): State<AppState>,
    admin: AdminAuth,
    Path(plan_id): Path<Uuid>,
    Json(request): Json<UpdatePlanRequest>,
) -> Result<Json<SubscriptionPlan>, ApiError> {
    request.validate()?;

    let plan = find_plan(&state, plan_id).await?;
    let snapshot = load_snapshot(&state).await;
    let mut session = PlanEditorSession::edit(snapshot, &plan);

    if let Some(display_name) = &request.display_name {
        session.set_display_name(display_name.trim());
    }
    if let Some(description) = &request.description {
        let description = description.trim();
        session.set_description((!description.is_empty()).then(|| description.to_string()));
    }
    if let Some(pricing) = &request.pricing {
        apply_pricing(&mut session, pricing)?;
    }
    if let Some(values) = &request.feature_values {
        apply_feature_values(&mut session, values)?;
    }

    let save_as_draft = !request.active.unwrap_or(plan.active);
    submit(&state, &mut session, admin.admin_id, save_as_draft).await?;

    info!(
        plan_id = %plan_id,
        admin_id = %admin.admin_id,
        "Subscription plan updated via API"
    );

    Ok(Json(find_plan(&state, plan_id).await?))
}
