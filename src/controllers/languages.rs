use axum::Json;
use serde::Serialize;

use crate::domain::language::{supported_languages, LanguageOption};

#[derive(Debug, Serialize)]
pub struct LanguagesResponse {
    pub languages: &'static [LanguageOption],
}

/// GET /api/languages - Languages offered for input and output
pub async fn list_languages() -> Json<LanguagesResponse> {
    Json(LanguagesResponse {
        languages: supported_languages(),
    })
}
