//! BDD test world for the demo portal

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cucumber::World;
use demo_portal::api::BackendApi;
use demo_portal::io::{HttpClient, HttpResponse};
use demo_portal::poller::ClientPoller;
use demo_portal::state::new_state_handle;
use demo_portal::PortalError;

pub const BASE_URL: &str = "http://backend:5000";

/// Canned behaviour for one backend route
#[derive(Debug, Clone)]
pub enum Reply {
    Respond { status: u16, body: String },
    Unreachable,
}

/// In-memory stand-in for the demo backend
#[derive(Debug, Default)]
pub struct FakeBackend {
    routes: Mutex<HashMap<String, Reply>>,
    requests: Mutex<Vec<String>>,
    posted: Mutex<Vec<serde_json::Value>>,
}

impl FakeBackend {
    pub fn set(&self, route: &str, reply: Reply) {
        self.routes
            .lock()
            .unwrap()
            .insert(route.to_string(), reply);
    }

    pub fn respond(&self, route: &str, status: u16, body: &str) {
        self.set(
            route,
            Reply::Respond {
                status,
                body: body.to_string(),
            },
        );
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn posted(&self) -> Vec<serde_json::Value> {
        self.posted.lock().unwrap().clone()
    }

    fn handle(&self, method: &str, url: &str) -> demo_portal::Result<HttpResponse> {
        let path = url.strip_prefix(BASE_URL).unwrap_or(url);
        let route = format!("{} {}", method, path);
        self.requests.lock().unwrap().push(route.clone());

        let reply = self.routes.lock().unwrap().get(&route).cloned();
        match reply {
            Some(Reply::Respond { status, body }) => Ok(HttpResponse { status, body }),
            Some(Reply::Unreachable) | None => Err(PortalError::Network(format!(
                "{} failed: connection refused",
                route
            ))),
        }
    }
}

#[async_trait]
impl HttpClient for FakeBackend {
    async fn get(&self, url: &str) -> demo_portal::Result<HttpResponse> {
        self.handle("GET", url)
    }

    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> demo_portal::Result<HttpResponse> {
        self.posted.lock().unwrap().push(body.clone());
        self.handle("POST", url)
    }
}

#[derive(Debug, Default, World)]
pub struct PortalWorld {
    pub backend: Arc<FakeBackend>,
    pub poller: Option<Arc<ClientPoller>>,
    /// Last page returned to the visitor under test
    pub page: Option<String>,
    pub requests_before_submit: usize,
    pub run_result: Option<demo_portal::Result<()>>,
}

impl PortalWorld {
    /// The poller under test, created on first use against the fake backend
    pub fn poller(&mut self) -> Arc<ClientPoller> {
        let backend = Arc::clone(&self.backend);
        self.poller
            .get_or_insert_with(|| {
                let api = BackendApi::new(BASE_URL, backend as Arc<dyn HttpClient>);
                Arc::new(ClientPoller::new(api, new_state_handle()))
            })
            .clone()
    }
}
