// /properties - listing endpoints

use super::error::{parse_id, parse_limit, ApiError, OrInternal};
use super::AppState;
use crate::entities::{NewProperty, Property, PropertyPatch, PropertyType};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;
use tracing::instrument;

const INVALID_ID: &str = "Invalid property ID";
const NOT_FOUND: &str = "Property not found";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_properties).post(create_property))
        .route("/type/:type", get(properties_by_type))
        .route("/featured", get(featured_properties))
        .route("/featured/:limit", get(featured_properties))
        .route(
            "/:id",
            get(get_property).put(update_property).delete(delete_property),
        )
}

/// GET /properties
async fn list_properties(State(state): State<AppState>) -> Result<Json<Vec<Property>>, ApiError> {
    let properties = state
        .storage
        .get_all_properties()
        .or_internal("Failed to fetch properties")?;
    Ok(Json(properties))
}

/// GET /properties/:id
async fn get_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Property>, ApiError> {
    let Some(id) = parse_id(&id, INVALID_ID)? else {
        return Err(ApiError::NotFound(NOT_FOUND));
    };

    state
        .storage
        .get_property(id)
        .or_internal("Failed to fetch property")?
        .map(Json)
        .ok_or(ApiError::NotFound(NOT_FOUND))
}

/// GET /properties/type/:type - 400 for a type outside the enumeration
async fn properties_by_type(
    State(state): State<AppState>,
    Path(property_type): Path<String>,
) -> Result<Json<Vec<Property>>, ApiError> {
    let property_type: PropertyType = property_type
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid property type".to_string()))?;

    let properties = state
        .storage
        .get_properties_by_type(property_type)
        .or_internal("Failed to fetch properties by type")?;
    Ok(Json(properties))
}

/// GET /properties/featured[/:limit]
async fn featured_properties(
    State(state): State<AppState>,
    limit: Option<Path<String>>,
) -> Result<Json<Vec<Property>>, ApiError> {
    let limit = parse_limit(limit.as_ref().map(|Path(raw)| raw.as_str()))?;

    let properties = state
        .storage
        .get_featured_properties(limit)
        .or_internal("Failed to fetch featured properties")?;
    Ok(Json(properties))
}

/// POST /properties
#[instrument(skip_all)]
async fn create_property(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Property>), ApiError> {
    let Json(input) = payload?;
    let new = NewProperty::from_json(&input)?;

    let property = state
        .storage
        .create_property(new)
        .or_internal("Failed to create property")?;
    tracing::info!(id = property.id, "property listed");
    Ok((StatusCode::CREATED, Json(property)))
}

/// PUT /properties/:id - partial update
#[instrument(skip(state, payload))]
async fn update_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Property>, ApiError> {
    let id = parse_id(&id, INVALID_ID)?;
    let Json(input) = payload?;
    let patch = PropertyPatch::from_json(&input)?;
    let Some(id) = id else {
        return Err(ApiError::NotFound(NOT_FOUND));
    };

    state
        .storage
        .update_property(id, patch)
        .or_internal("Failed to update property")?
        .map(Json)
        .ok_or(ApiError::NotFound(NOT_FOUND))
}

/// DELETE /properties/:id
#[instrument(skip(state))]
async fn delete_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let Some(id) = parse_id(&id, INVALID_ID)? else {
        return Err(ApiError::NotFound(NOT_FOUND));
    };

    let removed = state
        .storage
        .delete_property(id)
        .or_internal("Failed to delete property")?;
    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(NOT_FOUND))
    }
}
