//! Downloadable artifacts: config archive and deployment script.

use axum::{
    Json,
    extract::State,
    extract::rejection::JsonRejection,
    http::header,
    response::{IntoResponse, Response},
};
use leakward_core::bundle::{self, ARCHIVE_FILE_NAME, SCRIPT_FILE_NAME, ScriptFlavor};
use serde::Deserialize;

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ScriptRequest {
    #[serde(rename = "type", default)]
    pub flavor: Option<String>,
}

pub async fn download_config(State(state): State<AppState>) -> ServerResult<Response> {
    let archive = bundle::config_archive(&state.templates)?;
    Ok(attachment("application/zip", ARCHIVE_FILE_NAME, archive))
}

pub async fn generate_script(
    State(state): State<AppState>,
    payload: Result<Json<ScriptRequest>, JsonRejection>,
) -> ServerResult<Response> {
    let Json(request) = payload?;
    let flavor = match request.flavor {
        Some(raw) => raw
            .parse::<ScriptFlavor>()
            .map_err(|_| ServerError::bad_request("Invalid script type"))?,
        None => ScriptFlavor::default(),
    };

    let script = bundle::deploy_script(&state.templates, flavor);
    Ok(attachment(
        "text/x-shellscript",
        SCRIPT_FILE_NAME,
        script.into_bytes(),
    ))
}

fn attachment(content_type: &'static str, file_name: &str, body: Vec<u8>) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", file_name);
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response()
}
