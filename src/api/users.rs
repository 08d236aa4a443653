#![forbid(unsafe_code)]

use poem::Request;
use poem_openapi::{ OpenApi, payload::Json, Object, param::Path };
use serde_json::Value;

use crate::utils::server_utils::{self, RequestDebug};

// ***************************************************************************
//                          Request/Response Definitions
// ***************************************************************************
pub struct UsersApi;

struct ReqGetUser
{
    user_id: i64,
}

struct ReqCreateUser
{
    user: Value,
}

#[derive(Object)]
struct RespGetUser
{
    user_id: i64,
}

#[derive(Object)]
struct RespCreateUser
{
    message: String,
}

// Implement the debug record trait for logging.
impl RequestDebug for ReqGetUser {
    fn get_request_info(&self) -> String {
        let mut s = String::with_capacity(255);
        s.push_str("  Request body:");
        s.push_str("\n    user_id: ");
        s.push_str(&self.user_id.to_string());
        s
    }
}

impl RequestDebug for ReqCreateUser {
    fn get_request_info(&self) -> String {
        let mut s = String::with_capacity(255);
        s.push_str("  Request body:");
        s.push_str("\n    user: ");
        s.push_str(&self.user.to_string());
        s
    }
}

// ***************************************************************************
//                             OpenAPI Endpoints
// ***************************************************************************
#[OpenApi]
impl UsersApi {
    // -----------------------------------------------------------------------
    // Echo the user id given in the path.  Non-integer path segments are
    // rejected by the parameter parser before this handler runs.
    #[oai(path = "/users/:user_id", method = "get")]
    async fn get_user(&self, http_req: &Request, user_id: Path<i64>) -> Json<RespGetUser> {
        // Package the request parameters.
        let req = ReqGetUser { user_id: *user_id };
        Json(RespGetUser::process(http_req, &req))
    }

    // -----------------------------------------------------------------------
    // Acknowledge a user creation request.  The submitted document is
    // accepted as-is and not retained.
    #[oai(path = "/users", method = "post")]
    async fn create_user(&self, http_req: &Request, user: Json<Value>) -> Json<RespCreateUser> {
        // Package the request parameters.
        let req = ReqCreateUser { user: user.0 };
        Json(RespCreateUser::process(http_req, &req))
    }
}

// ***************************************************************************
//                          Request/Response Methods
// ***************************************************************************
impl RespGetUser {
    fn new(user_id: i64) -> Self {
        Self { user_id }
    }

    /// Process the request.
    fn process(http_req: &Request, req: &ReqGetUser) -> RespGetUser {
        // Conditional logging depending on log level.
        server_utils::debug_request(http_req, req);

        Self::new(req.user_id)
    }
}

impl RespCreateUser {
    fn new() -> Self {
        Self { message: "User created".to_string() }
    }

    /// Process the request.
    fn process(http_req: &Request, req: &ReqCreateUser) -> RespCreateUser {
        // Conditional logging depending on log level.
        server_utils::debug_request(http_req, req);

        Self::new()
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

    use super::UsersApi;

    fn client() -> TestClient<Route> {
        let service = OpenApiService::new(UsersApi, "test", "0.0.0");
        TestClient::new(Route::new().nest("/", service))
    }

    #[tokio::test]
    async fn get_user_echoes_the_id() {
        let cli = client();
        let resp = cli.get("/users/7").send().await;
        resp.assert_status_is_ok();
        resp.assert_text(r#"{"user_id":7}"#).await;
    }

    #[tokio::test]
    async fn get_user_accepts_negative_ids() {
        let cli = client();
        let resp = cli.get("/users/-3").send().await;
        resp.assert_status_is_ok();
        resp.assert_text(r#"{"user_id":-3}"#).await;
    }

    #[tokio::test]
    async fn get_user_rejects_non_integer_ids() {
        let cli = client();
        let resp = cli.get("/users/abc").send().await;
        resp.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_user_acknowledges_the_request() {
        let cli = client();
        let resp = cli
            .post("/users")
            .header("content-type", "application/json")
            .body(r#"{"username": "ada", "email": "ada@example.com"}"#)
            .send()
            .await;
        resp.assert_status_is_ok();
        resp.assert_text(r#"{"message":"User created"}"#).await;
    }

    #[tokio::test]
    async fn create_user_ignores_the_document_contents() {
        let cli = client();
        for body in [r#"{}"#, r#"{"anything": [1, 2, 3]}"#] {
            let resp = cli
                .post("/users")
                .header("content-type", "application/json")
                .body(body)
                .send()
                .await;
            resp.assert_status_is_ok();
            resp.assert_text(r#"{"message":"User created"}"#).await;
        }
    }
}
