use utoipa::OpenApi;

use crate::errors::{ErrorKind, ErrorResponse};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Toolbox Errors",
        version = "0.1.0",
        description = "Response body shared by every structured error: a base message, a stable code and message groups keyed by field or topic.",
    ),
    components(schemas(ErrorResponse, ErrorKind)),
    tags((name = "errors", description = "Structured error responses"))
)]
pub struct ApiDoc;
