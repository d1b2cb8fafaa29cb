use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, OpenApi, ToSchema};

/// Directory record as stored. Extra client fields are passed through.
#[derive(Serialize, ToSchema)]
pub struct DirectoryDoc {
    pub id: i64,
    pub name: String,
    pub emails: String,
}

/// Body accepted by create, replace and patch. Any JSON object is accepted.
#[derive(Serialize, ToSchema)]
pub struct DirectoryInputDoc {
    pub name: Option<String>,
    pub emails: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryPageDoc {
    pub count: usize,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
    pub next: Option<i64>,
    pub previous: Option<i64>,
    pub results: Vec<DirectoryDoc>,
}

#[derive(Serialize, ToSchema)]
pub struct MessageDoc { pub message: String }

/// Query parameters of the listing. Non-numeric values fall back to defaults.
#[derive(Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// 1-based page number, default 1
    pub page: Option<i64>,
    /// items per page, default 5
    pub page_size: Option<i64>,
}

#[derive(OpenApi)]
#[openapi(
    info(title = "directory_api", version = "1.0.0"),
    paths(
        crate::routes::status,
        crate::routes::directories::list,
        crate::routes::directories::create,
        crate::routes::directories::get,
        crate::routes::directories::replace,
        crate::routes::directories::patch,
        crate::routes::directories::delete,
    ),
    components(
        schemas(
            DirectoryDoc,
            DirectoryInputDoc,
            DirectoryPageDoc,
            MessageDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "directories")
    )
)]
pub struct ApiDoc;
