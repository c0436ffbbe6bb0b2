pub mod mock;

use actix_web::web;
use mock_api::{Config, MockStore, telemetry};
use reqwest::StatusCode;
use tracing_log::LogTracer;
use tracing_subscriber::util::SubscriberInitExt;

pub use mock_api::{Route, Seed};

pub struct TestApp {
    pub port: u16,
    /// Shared with the running server; inspect or script it directly.
    pub store: web::Data<MockStore>,
    pub client: payloads::APIClient,
}

impl TestApp {
    /// Base url of the api, including the `/api` prefix.
    pub fn address(&self) -> String {
        format!("http://127.0.0.1:{}/api", self.port)
    }

    /// Make the next request to `route` fail with `status` and
    /// `{"error": message}`.
    pub fn fail_next(&self, route: Route, status: StatusCode, message: &str) {
        self.store.fail_next(route, status.as_u16(), message);
    }

    /// Number of requests `route` has served so far.
    pub fn requests(&self, route: Route) -> usize {
        self.store.requests(route)
    }
}

/// Start the mock api on `port`, seeded with `seed`.
pub async fn spawn_app_on_port(port: u16, seed: Seed) -> TestApp {
    let subscriber = telemetry::get_subscriber("error".into());
    let _ = LogTracer::init();
    let _ = subscriber.try_init();

    let mut config = Config {
        port,
        ..Config::default()
    };
    let store = web::Data::new(MockStore::new(seed));

    let server = mock_api::build(&mut config, store.clone())
        .expect("Failed to bind mock api");
    tokio::spawn(server);

    TestApp {
        port: config.port,
        store,
        client: payloads::APIClient::new(format!(
            "http://127.0.0.1:{}/api",
            config.port
        )),
    }
}

/// Use OS-assigned port for parallel testing.
pub async fn spawn_app() -> TestApp {
    spawn_app_on_port(0, mock::seed()).await
}

pub async fn spawn_app_with(seed: Seed) -> TestApp {
    spawn_app_on_port(0, seed).await
}

/// Assert that the result of an API action results in a specific status code.
pub fn assert_status_code<T>(
    result: Result<T, payloads::ClientError>,
    expected: StatusCode,
) {
    match result {
        Err(payloads::ClientError::APIError { status, .. }) => {
            assert_eq!(status, expected)
        }
        _ => panic!("Expected APIError"),
    };
}
