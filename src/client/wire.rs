//! REST request/response bodies that never leave the client

use product_search_common::{ImageContext, ProductSearchResults, ProductSet};
use serde::{Deserialize, Serialize};

pub const PRODUCT_SEARCH_FEATURE: &str = "PRODUCT_SEARCH";

#[derive(Serialize)]
pub struct BatchAnnotateImagesRequest<'a> {
    pub requests: Vec<AnnotateImageRequest<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotateImageRequest<'a> {
    pub image: Image,
    pub features: Vec<Feature>,
    pub image_context: &'a ImageContext,
}

#[derive(Serialize)]
pub struct Image {
    /// base64
    pub content: String,
}

#[derive(Serialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: &'static str,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct BatchAnnotateImagesResponse {
    pub responses: Vec<AnnotateImageResponse>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AnnotateImageResponse {
    pub product_search_results: Option<ProductSearchResults>,
    pub error: Option<RpcStatus>,
}

/// `google.rpc.Status` as embedded in a 200 annotate response
#[derive(Deserialize, Default, Debug)]
#[serde(default)]
pub struct RpcStatus {
    pub code: i32,
    pub message: String,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ListProductSetsResponse {
    pub product_sets: Vec<ProductSet>,
    pub next_page_token: String,
}

/// Error body returned with non-2xx statuses
#[derive(Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct ErrorBody {
    pub message: String,
    pub status: String,
}

/// Canonical name of a `google.rpc.Code`
pub fn code_name(code: i32) -> &'static str {
    match code {
        0 => "OK",
        1 => "CANCELLED",
        3 => "INVALID_ARGUMENT",
        4 => "DEADLINE_EXCEEDED",
        5 => "NOT_FOUND",
        6 => "ALREADY_EXISTS",
        7 => "PERMISSION_DENIED",
        8 => "RESOURCE_EXHAUSTED",
        9 => "FAILED_PRECONDITION",
        10 => "ABORTED",
        11 => "OUT_OF_RANGE",
        12 => "UNIMPLEMENTED",
        13 => "INTERNAL",
        14 => "UNAVAILABLE",
        15 => "DATA_LOSS",
        16 => "UNAUTHENTICATED",
        _ => "UNKNOWN",
    }
}
