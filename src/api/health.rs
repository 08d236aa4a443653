#![forbid(unsafe_code)]

use poem_openapi::{ OpenApi, payload::Json, Object };

pub struct HealthApi;

#[derive(Object)]
struct RespHealth
{
    status: String,
}

#[OpenApi]
impl HealthApi {
    /// Report server liveness for monitoring probes.
    #[oai(path = "/health", method = "get")]
    async fn get_health(&self) -> Json<RespHealth> {
        Json(RespHealth { status: "healthy".to_string() })
    }
}

#[cfg(test)]
mod tests {
    use poem::test::TestClient;
    use poem::Route;
    use poem_openapi::OpenApiService;

    use super::HealthApi;

    fn client() -> TestClient<Route> {
        let service = OpenApiService::new(HealthApi, "test", "0.0.0");
        TestClient::new(Route::new().nest("/", service))
    }

    #[tokio::test]
    async fn health_reports_healthy() {
        let cli = client();
        let resp = cli.get("/health").send().await;
        resp.assert_status_is_ok();
        resp.assert_text(r#"{"status":"healthy"}"#).await;
    }

    #[tokio::test]
    async fn health_is_stable_across_requests() {
        let cli = client();
        for _ in 0..3 {
            let resp = cli.get("/health").send().await;
            resp.assert_status_is_ok();
            resp.assert_text(r#"{"status":"healthy"}"#).await;
        }
    }
}
