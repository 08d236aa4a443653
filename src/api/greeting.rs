#![forbid(unsafe_code)]

use poem::Request;
use poem_openapi::{ OpenApi, payload::Json, Object, param::Path };

use crate::utils::server_utils::{self, RequestDebug};

// The fixed greeting returned from the root path.
const ROOT_GREETING : &str = "Hello World";

// ***************************************************************************
//                          Request/Response Definitions
// ***************************************************************************
pub struct GreetingApi;

struct ReqSayHello
{
    name: String,
}

#[derive(Object)]
struct RespGreeting
{
    message: String,
}

// Implement the debug record trait for logging.
impl RequestDebug for ReqSayHello {
    fn get_request_info(&self) -> String {
        let mut s = String::with_capacity(255);
        s.push_str("  Request body:");
        s.push_str("\n    name: ");
        s.push_str(&self.name);
        s
    }
}

// ***************************************************************************
//                             OpenAPI Endpoints
// ***************************************************************************
#[OpenApi]
impl GreetingApi {
    // -----------------------------------------------------------------------
    // The root greeting never varies.
    #[oai(path = "/", method = "get")]
    async fn say_hello_world(&self) -> Json<RespGreeting> {
        Json(RespGreeting::new(ROOT_GREETING.to_string()))
    }

    // -----------------------------------------------------------------------
    // Greet the caller using the name given in the path.  The path segment
    // arrives percent-decoded.
    #[oai(path = "/hello/:name", method = "get")]
    async fn say_hello(&self, http_req: &Request, name: Path<String>) -> Json<RespGreeting> {
        // Package the request parameters.
        let req = ReqSayHello { name: name.0 };
        Json(RespGreeting::process(http_req, &req))
    }
}

// ***************************************************************************
//                          Request/Response Methods
// ***************************************************************************
impl RespGreeting {
    fn new(message: String) -> Self {
        Self { message }
    }

    /// Process the request.
    fn process(http_req: &Request, req: &ReqSayHello) -> RespGreeting {
        // Conditional logging depending on log level.
        server_utils::debug_request(http_req, req);

        // Greet the caller by name.
        Self::new(format!("Hello, {}!", req.name))
    }
}
