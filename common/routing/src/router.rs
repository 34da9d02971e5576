use std::fmt::Display;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    handler::Handler,
    http::StatusCode,
    middleware,
    routing::{MethodRouter, delete, get, post, put},
};
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::debug;
use utoipa::openapi::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::{AuthState, PrincipalStore, metrics, require_principal};

const METRICS_PATH: &str = "/metrics";

struct Route {
    method: &'static str,
    root_path: &'static str,
    relative_path: &'static str,
    gated: bool,
}

impl Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}{}",
            self.method, self.root_path, self.relative_path
        )?;

        if self.gated {
            write!(f, " (requires token)")?;
        }

        Ok(())
    }
}

/// Collects the routes of the api. `gated_*` routes are wrapped in
/// [`require_principal`], everything else is open.
pub struct RouterBuilder<S, P> {
    inner: OpenApiRouter<S>,
    root_path: &'static str,
    routes: Vec<Route>,
    auth: AuthState<P>,
}

impl<S, P> RouterBuilder<S, P>
where
    S: Send + Sync + Clone + 'static,
    P: PrincipalStore,
{
    pub fn new(root_path: &'static str, auth: AuthState<P>) -> Self {
        Self {
            inner: OpenApiRouter::new(),
            root_path,
            routes: Vec::new(),
            auth,
        }
    }

    fn open(
        mut self,
        method: &'static str,
        path: &'static str,
        method_router: MethodRouter<S>,
    ) -> Self {
        self.inner = self.inner.route(path, method_router);
        self.routes.push(Route {
            method,
            root_path: self.root_path,
            relative_path: path,
            gated: false,
        });
        self
    }

    fn gated(
        mut self,
        method: &'static str,
        path: &'static str,
        method_router: MethodRouter<S>,
    ) -> Self {
        self.inner = self.inner.route(
            path,
            method_router.layer(middleware::from_fn_with_state(
                self.auth.clone(),
                require_principal::<P>,
            )),
        );
        self.routes.push(Route {
            method,
            root_path: self.root_path,
            relative_path: path,
            gated: true,
        });
        self
    }

    pub fn get<T, F>(self, path: &'static str, handler: F) -> Self
    where
        F: Handler<T, S>,
        T: 'static,
    {
        self.open("GET", path, get(handler))
    }

    pub fn gated_get<T, F>(self, path: &'static str, handler: F) -> Self
    where
        F: Handler<T, S>,
        T: 'static,
    {
        self.gated("GET", path, get(handler))
    }

    pub fn post<T, F>(self, path: &'static str, handler: F) -> Self
    where
        F: Handler<T, S>,
        T: 'static,
    {
        self.open("POST", path, post(handler))
    }

    pub fn gated_post<T, F>(self, path: &'static str, handler: F) -> Self
    where
        F: Handler<T, S>,
        T: 'static,
    {
        self.gated("POST", path, post(handler))
    }

    /// A gated POST whose body may be up to `max_bytes` long instead of the
    /// default 2 MB.
    pub fn gated_post_limited<T, F>(self, path: &'static str, handler: F, max_bytes: usize) -> Self
    where
        F: Handler<T, S>,
        T: 'static,
    {
        self.gated(
            "POST",
            path,
            post(handler).layer(DefaultBodyLimit::max(max_bytes)),
        )
    }

    pub fn put<T, F>(self, path: &'static str, handler: F) -> Self
    where
        F: Handler<T, S>,
        T: 'static,
    {
        self.open("PUT", path, put(handler))
    }

    pub fn gated_put<T, F>(self, path: &'static str, handler: F) -> Self
    where
        F: Handler<T, S>,
        T: 'static,
    {
        self.gated("PUT", path, put(handler))
    }

    pub fn delete<T, F>(self, path: &'static str, handler: F) -> Self
    where
        F: Handler<T, S>,
        T: 'static,
    {
        self.open("DELETE", path, delete(handler))
    }

    pub fn gated_delete<T, F>(self, path: &'static str, handler: F) -> Self
    where
        F: Handler<T, S>,
        T: 'static,
    {
        self.gated("DELETE", path, delete(handler))
    }

    pub fn build_no_metrics(self, app_state: S, api_doc: OpenApi) -> Router {
        self.log_routes();
        let root_path = self.root_path;
        build(root_path, self.inner, app_state, api_doc).route(
            METRICS_PATH,
            get(|| async {
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Metrics endpoint is disabled. Metrics must be enabled and the service restarted",
                )
            }),
        )
    }

    pub fn build_with_metrics(
        self,
        app_state: S,
        api_doc: OpenApi,
        metrics_handle: PrometheusHandle,
    ) -> Router {
        self.log_routes();
        let root_path = self.root_path;
        let main_router = self
            .inner
            .route_layer(middleware::from_fn(metrics::track_http));

        build(root_path, main_router, app_state, api_doc).route(
            METRICS_PATH,
            get(|| async move { metrics_handle.render() }),
        )
    }

    fn log_routes(&self) {
        for route in &self.routes {
            debug!("Building route - {route}")
        }
    }
}

fn build<S>(
    root_path: &'static str,
    main_router: OpenApiRouter<S>,
    app_state: S,
    api_doc: OpenApi,
) -> Router
where
    S: Send + Sync + Clone + 'static,
{
    let main_routes = OpenApiRouter::new()
        .nest(root_path, main_router)
        .with_state(app_state);
    let (router, api) = OpenApiRouter::with_openapi(api_doc)
        .merge(main_routes)
        .split_for_parts();

    router.merge(
        SwaggerUi::new(format!("{root_path}/swagger-ui"))
            .url(format!("{root_path}/api-docs/openapi.json"), api),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{PrincipalLookupError, TokenKeys};
    use axum_test::TestServer;
    use chrono::Duration;
    use error_stack::Report;

    #[derive(Debug, Clone)]
    struct Everyone;

    impl PrincipalStore for Everyone {
        type Principal = ();

        async fn principal(&self, _id: String) -> Result<Option<()>, Report<PrincipalLookupError>> {
            Ok(Some(()))
        }
    }

    fn server() -> (TestServer, TokenKeys) {
        let keys = TokenKeys::from_secret(b"router-test", Duration::hours(1));
        let router = RouterBuilder::<(), _>::new("/api", AuthState::new(keys.clone(), Everyone))
            .get("/open", || async { "open" })
            .gated_put("/open", || async { "gated" })
            .build_no_metrics((), utoipa::openapi::OpenApiBuilder::new().build());
        (TestServer::new(router).unwrap(), keys)
    }

    #[tokio::test]
    async fn open_and_gated_methods_share_a_path() {
        let (server, keys) = server();

        server.get("/api/open").await.assert_text("open");
        server.put("/api/open").await.assert_status_unauthorized();
        server
            .put("/api/open")
            .authorization_bearer(keys.issue("anyone").unwrap())
            .await
            .assert_text("gated");
    }

    #[tokio::test]
    async fn limited_post_reads_bodies_past_the_default_limit() {
        let keys = TokenKeys::from_secret(b"router-test", Duration::hours(1));
        let router = RouterBuilder::<(), _>::new("/api", AuthState::new(keys.clone(), Everyone))
            .gated_post_limited(
                "/big",
                |body: axum::body::Bytes| async move { body.len().to_string() },
                4 * 1024 * 1024,
            )
            .gated_post("/small", |body: axum::body::Bytes| async move {
                body.len().to_string()
            })
            .build_no_metrics((), utoipa::openapi::OpenApiBuilder::new().build());
        let server = TestServer::new(router).unwrap();
        let token = keys.issue("anyone").unwrap();
        let body = vec![7u8; 3 * 1024 * 1024];

        server
            .post("/api/big")
            .authorization_bearer(&token)
            .bytes(body.clone().into())
            .await
            .assert_text((3 * 1024 * 1024).to_string());
        server
            .post("/api/small")
            .authorization_bearer(&token)
            .bytes(body.into())
            .await
            .assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn metrics_unavailable_without_recorder() {
        let (server, _) = server();

        server
            .get("/metrics")
            .await
            .assert_status(StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn route_display_marks_gated_routes() {
        let route = Route {
            method: "PUT",
            root_path: "/api",
            relative_path: "/events/order",
            gated: true,
        };

        assert_eq!("PUT: /api/events/order (requires token)", route.to_string());
    }
}
