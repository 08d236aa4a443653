#![forbid(unsafe_code)]

use lazy_static::lazy_static;
use log::info;
use poem::{listener::TcpListener, Route};
use poem_openapi::OpenApiService;

// Server utilities
use crate::api::greeting::GreetingApi;
use crate::api::health::HealthApi;
use crate::api::items::ItemsApi;
use crate::api::users::UsersApi;
use crate::utils::config::{init_log, init_runtime_context, Config, RuntimeCtx};
use crate::utils::errors::Errors;

// Modules
mod api;
mod utils;

// ***************************************************************************
//                                Constants
// ***************************************************************************
const SERVER_NAME : &str = "HelloServer"; // for poem logging

// ***************************************************************************
//                             Static Variables
// ***************************************************************************
// Lazily initialize the parameters variable so that is has a 'static lifetime.
// We exit if we can't read our parameters.
lazy_static! {
    static ref RUNTIME_CTX: RuntimeCtx = init_runtime_context();
}

// ---------------------------------------------------------------------------
// main:
// ---------------------------------------------------------------------------
#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    // --------------- Initialize Server --------------
    // Announce ourselves.
    println!("Starting hello_server!");

    // Initialize the server.
    server_init();

    // --------------- Main Loop Set Up ---------------
    // Create the routes.
    let app = build_app(&RUNTIME_CTX.parms.config);

    // Assign the bind address.
    let addr = format!("{}:{}",
        RUNTIME_CTX.parms.config.http_addr,
        RUNTIME_CTX.parms.config.http_port);
    info!("Accepting requests at http://{}/", addr);

    // ------------------ Main Loop -------------------
    poem::Server::new(TcpListener::bind(addr))
        .name(SERVER_NAME)
        .run(app)
        .await
}

// ---------------------------------------------------------------------------
// build_app:
// ---------------------------------------------------------------------------
/** Assemble the complete route table. The endpoint groups are gathered into
 * a single OpenAPI service, the two documentation UIs are rendered from the
 * generated specification, and the specification itself is served in both
 * JSON and YAML form.
 */
fn build_app(config: &Config) -> Route {
    // Create a tuple with all the endpoint groups.
    let endpoints = (GreetingApi, HealthApi, UsersApi, ItemsApi);
    let api_service =
        OpenApiService::new(endpoints, config.title.clone(), env!("CARGO_PKG_VERSION"))
            .description(config.description.clone())
            .server(format!("http://{}:{}", config.http_addr, config.http_port));

    // Allow the generated openapi specs to be retrieved from the server.
    let spec = api_service.spec_endpoint();
    let spec_yaml = api_service.spec_endpoint_yaml();

    // Two renderings of the same generated specification.
    let docs_ui = api_service.swagger_ui();
    let redoc_ui = api_service.redoc();

    Route::new()
        .nest("/docs", docs_ui)
        .nest("/redoc", redoc_ui)
        .at("/spec", spec)
        .at("/spec_yaml", spec_yaml)
        .nest("/", api_service)
}

// ***************************************************************************
//                             Private Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// server_init:
// ---------------------------------------------------------------------------
/** Initialize all subsystems and data structures other than those needed
 * to configure the main loop processor.
 */
fn server_init() {
    // Configure our log.
    init_log();

    // Force the reading of input parameters and initialization of runtime context.
    info!("{}", Errors::InputParms(format!("{:#?}", *RUNTIME_CTX)));

    // Log build info.
    print_version_info();
}

// ---------------------------------------------------------------------------
// print_version_info:
// ---------------------------------------------------------------------------
fn print_version_info() {
    // Log build info.
    info!("{}.", format!("\n*** Running {}={}, BRANCH={}, COMMIT={}, DIRTY={}, SRC_TS={}, RUSTC={}",
                        SERVER_NAME,
                        option_env!("CARGO_PKG_VERSION").unwrap_or("unknown"),
                        env!("GIT_BRANCH"),
                        env!("GIT_COMMIT_SHORT"),
                        env!("GIT_DIRTY"),
                        env!("SOURCE_TIMESTAMP"),
                        env!("RUSTC_VERSION")),
    );
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use poem::http::StatusCode;
    use poem::test::TestClient;
    use poem::Route;

    use super::build_app;
    use crate::utils::config::Config;

    fn client() -> TestClient<Route> {
        TestClient::new(build_app(&Config::default()))
    }

    #[tokio::test]
    async fn docs_page_is_served() {
        let cli = client();
        let resp = cli.get("/docs").send().await;
        resp.assert_status_is_ok();
    }

    #[tokio::test]
    async fn redoc_page_is_served() {
        let cli = client();
        let resp = cli.get("/redoc").send().await;
        resp.assert_status_is_ok();
    }

    #[tokio::test]
    async fn spec_lists_every_documented_route() {
        let cli = client();
        let resp = cli.get("/spec").send().await;
        resp.assert_status_is_ok();

        let json = resp.json().await;
        let spec = json.value().object();
        spec.get("info").object().get("title").assert_string("Hello World API");

        let paths = spec.get("paths").object();
        for path in [
            "/",
            "/hello/{name}",
            "/health",
            "/users/{user_id}",
            "/users",
            "/items/{item_id}",
        ] {
            paths.get(path).object();
        }
    }

    #[tokio::test]
    async fn spec_yaml_is_served() {
        let cli = client();
        let resp = cli.get("/spec_yaml").send().await;
        resp.assert_status_is_ok();
    }

    #[tokio::test]
    async fn endpoints_are_reachable_through_the_full_route_table() {
        let cli = client();

        let resp = cli.get("/").send().await;
        resp.assert_status_is_ok();
        resp.assert_text(r#"{"message":"Hello World"}"#).await;

        let resp = cli.get("/health").send().await;
        resp.assert_status_is_ok();
        resp.assert_text(r#"{"status":"healthy"}"#).await;
    }

    #[tokio::test]
    async fn unknown_route_returns_not_found() {
        let cli = client();
        let resp = cli.get("/missing").send().await;
        resp.assert_status(StatusCode::NOT_FOUND);
    }
}
