//! BDD step definitions for the service lifecycle

use std::sync::Arc;
use std::time::Duration;

use cucumber::{given, then, when};
use demo_portal::config::{BackendConfig, Config, PageConfig};
use demo_portal::io::HttpClient;

use crate::world::PortalWorld;

fn test_config() -> Config {
    Config {
        backend: BackendConfig {
            host: "portal.test".to_string(),
            ..BackendConfig::default()
        },
        page: PageConfig {
            enabled: false,
            ..PageConfig::default()
        },
        ..Config::default()
    }
}

async fn run_portal(world: &mut PortalWorld, config: Config) {
    let http = Arc::clone(&world.backend) as Arc<dyn HttpClient>;
    let result = demo_portal::run_with_client(config, http, async {
        tokio::time::sleep(Duration::from_millis(200)).await;
    })
    .await;
    world.run_result = Some(result);
}

#[given("a healthy backend with no messages")]
fn healthy_backend(world: &mut PortalWorld) {
    world.backend.respond(
        "GET /health",
        200,
        r#"{"status": "healthy", "checks": {"database": "ok", "redis": "ok"}}"#,
    );
    world.backend.respond("GET /api/messages", 200, "[]");
    world
        .backend
        .respond("GET /api/stats", 200, r#"{"total_messages": 0}"#);
}

#[when("the portal runs for a moment and is shut down")]
async fn run_and_shutdown(world: &mut PortalWorld) {
    run_portal(world, test_config()).await;
}

#[when(expr = "the portal is started with a health interval of {int} seconds")]
async fn start_with_interval(world: &mut PortalWorld, seconds: u64) {
    let mut config = test_config();
    config.schedule.health_interval_seconds = seconds;
    run_portal(world, config).await;
}

#[then("the portal stopped cleanly")]
fn stopped_cleanly(world: &mut PortalWorld) {
    match world.run_result.as_ref().expect("portal was not run") {
        Ok(()) => {}
        Err(e) => panic!("portal failed: {e}"),
    }
}

#[then(expr = "the backend received {string}")]
fn backend_received_request(world: &mut PortalWorld, request: String) {
    let requests = world.backend.requests();
    assert!(
        requests.contains(&request),
        "Expected '{}' in {:?}",
        request,
        requests
    );
}

#[then(expr = "the portal refused to start with {string}")]
fn refused_to_start(world: &mut PortalWorld, message: String) {
    match world.run_result.as_ref().expect("portal was not run") {
        Ok(()) => panic!("portal started"),
        Err(e) => assert!(e.to_string().contains(&message), "{e}"),
    }
}
