#![forbid(unsafe_code)]

use poem::Request;
use poem_openapi::{ OpenApi, payload::Json, Object, param::Path };

use crate::utils::server_utils::{self, RequestDebug};

// ***************************************************************************
//                          Request/Response Definitions
// ***************************************************************************
pub struct ItemsApi;

struct ReqGetItem
{
    item_id: i64,
}

#[derive(Object)]
struct RespGetItem
{
    item_id: i64,
}

// Implement the debug record trait for logging.
impl RequestDebug for ReqGetItem {
    fn get_request_info(&self) -> String {
        let mut s = String::with_capacity(255);
        s.push_str("  Request body:");
        s.push_str("\n    item_id: ");
        s.push_str(&self.item_id.to_string());
        s
    }
}

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl ItemsApi {
    // -----------------------------------------------------------------------
    // Echo the item id given in the path.  Non-integer path segments are
    // rejected by the parameter parser before this handler runs.
    #[oai(path = "/items/:item_id", method = "get")]
    async fn get_item(&self, http_req: &Request, item_id: Path<i64>) -> Json<RespGetItem> {
        // Package the request parameters.
        let req = ReqGetItem { item_id: *item_id };
        Json(RespGetItem::process(http_req, &req))
    }
}

// ***************************************************************************
//                          Request/Response Methods
// ***************************************************************************
impl RespGetItem {
    fn new(item_id: i64) -> Self {
        Self { item_id }
    }

    /// Process the request.
    fn process(http_req: &Request, req: &ReqGetItem) -> RespGetItem {
        // Conditional logging depending on log level.
        server_utils::debug_request(http_req, req);

        Self::new(req.item_id)
    }
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use poem::http::StatusCode;
    use poem::test::TestClient;
    use poem::Route;
    use poem_openapi::OpenApiService;

    use super::ItemsApi;

    fn client() -> TestClient<Route> {
        let service = OpenApiService::new(ItemsApi, "test", "0.0.0");
        TestClient::new(Route::new().nest("/", service))
    }

    #[tokio::test]
    async fn get_item_echoes_the_id() {
        let cli = client();
        let resp = cli.get("/items/42").send().await;
        resp.assert_status_is_ok();
        resp.assert_text(r#"{"item_id":42}"#).await;
    }

    #[tokio::test]
    async fn get_item_accepts_negative_ids() {
        let cli = client();
        let resp = cli.get("/items/-42").send().await;
        resp.assert_status_is_ok();
        resp.assert_text(r#"{"item_id":-42}"#).await;
    }

    #[tokio::test]
    async fn get_item_preserves_large_ids_exactly() {
        // Larger than 2^53, so any float round trip would corrupt it.
        let cli = client();
        let resp = cli.get("/items/9007199254740993").send().await;
        resp.assert_status_is_ok();
        resp.assert_text(r#"{"item_id":9007199254740993}"#).await;
    }

    #[tokio::test]
    async fn get_item_rejects_non_integer_ids() {
        let cli = client();
        let resp = cli.get("/items/3.14").send().await;
        resp.assert_status(StatusCode::BAD_REQUEST);
    }
}
