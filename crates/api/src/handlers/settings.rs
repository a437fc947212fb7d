//! Handlers for `/admin/settings`.

use axum::extract::State;
use axum::Json;
use pita_core::error::CoreError;
use pita_core::settings::{validate_update, SettingGroup, SettingKey, SiteSettings};
use pita_db::models::setting::UpdateSettings;
use pita_db::repositories::SettingRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// One setting as shown to the admin.
#[derive(Debug, Serialize)]
pub struct SettingView {
    pub key: &'static str,
    pub value: String,
    pub default: &'static str,
    pub help: &'static str,
    pub group: SettingGroup,
}

fn views(settings: &SiteSettings) -> Vec<SettingView> {
    SettingKey::ALL
        .into_iter()
        .map(|key| SettingView {
            key: key.as_str(),
            value: settings.get(key).to_string(),
            default: key.default_value(),
            help: key.help(),
            group: key.group(),
        })
        .collect()
}

/// GET /admin/settings
pub async fn list(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<SettingView>>>> {
    let settings = SettingRepo::load(&state.pool).await?;
    Ok(Json(DataResponse {
        data: views(&settings),
    }))
}

/// PUT /admin/settings
///
/// Body is an object of key name to value; `null` restores the default.
/// Nothing is saved unless every key is valid.
pub async fn update(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Json(UpdateSettings(input)): Json<UpdateSettings>,
) -> AppResult<Json<DataResponse<Vec<SettingView>>>> {
    let mut changes = Vec::with_capacity(input.len());
    for (name, value) in input {
        let key = match &value {
            Some(value) => validate_update(&name, value)?,
            None => SettingKey::from_name(&name)
                .ok_or_else(|| CoreError::Validation(format!("Unknown setting '{name}'")))?,
        };
        changes.push((key, value.map(|v| v.trim().to_string())));
    }
    SettingRepo::apply(&state.pool, &changes).await?;

    let settings = SettingRepo::load(&state.pool).await?;
    Ok(Json(DataResponse {
        data: views(&settings),
    }))
}
