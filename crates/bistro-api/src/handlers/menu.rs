use std::sync::Arc;

use axum::{extract::State, Json};
use bistro_core::models::MenuEntry;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

pub const MENU_ERROR: &str = "Error fetching menu";

/// List menu entries
///
/// Relays the `items` of the content service verbatim.
#[utoipa::path(
    get,
    path = "/menu",
    tag = "menu",
    responses(
        (status = 200, description = "Menu entries as returned by the content service", body = Vec<MenuEntry>),
        (status = 500, description = "Content service unavailable", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(content_type = %state.menu_content_type))]
pub async fn get_menu(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<MenuEntry>>, HttpAppError> {
    let entries = state
        .content
        .list_entries(&state.menu_content_type)
        .await
        .map_err(|e| {
            HttpAppError::from(e)
                .context(MENU_ERROR)
                .for_environment(state.production)
        })?;

    Ok(Json(entries))
}
