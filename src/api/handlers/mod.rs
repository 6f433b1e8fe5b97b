//! REST API handlers.

pub mod analytics;
pub mod health;
pub mod redirect;
pub mod shorten;

pub use analytics::analytics_handler;
pub use health::health_handler;
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;

#[cfg(test)]
pub(crate) mod test_support {
    use std::net::SocketAddr;
    use std::sync::Arc;

    use tokio::sync::mpsc;

    use crate::application::services::{AnalyticsService, LinkService};
    use crate::domain::click_event::ClickEvent;
    use crate::domain::repositories::{MockAnalyticsRepository, MockLinkRepository};
    use crate::infrastructure::cache::CacheService;
    use crate::state::AppState;

    /// Builds an [`AppState`] over mock repositories and the given cache,
    /// returning the receiving end of the click channel for assertions.
    pub fn state_with(
        link_repository: MockLinkRepository,
        analytics_repository: MockAnalyticsRepository,
        cache: Arc<dyn CacheService>,
    ) -> (AppState, mpsc::Receiver<ClickEvent>) {
        let link_repository = Arc::new(link_repository);
        let (click_tx, click_rx) = mpsc::channel(100);

        let state = AppState {
            link_service: Arc::new(LinkService::new(link_repository.clone())),
            analytics_service: Arc::new(AnalyticsService::new(
                link_repository,
                Arc::new(analytics_repository),
            )),
            cache,
            click_sender: click_tx,
            base_url: "http://localhost:3000".to_string(),
        };

        (state, click_rx)
    }

    /// Injects a fixed `ConnectInfo` so handlers depending on the peer
    /// address can be exercised without a real socket.
    #[derive(Clone)]
    pub struct MockConnectInfoLayer;

    impl<S> tower::Layer<S> for MockConnectInfoLayer {
        type Service = MockConnectInfoService<S>;

        fn layer(&self, inner: S) -> Self::Service {
            MockConnectInfoService { inner }
        }
    }

    #[derive(Clone)]
    pub struct MockConnectInfoService<S> {
        inner: S,
    }

    impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
    where
        S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
        S::Future: Send + 'static,
        B: Send + 'static,
    {
        type Response = S::Response;
        type Error = S::Error;
        type Future = S::Future;

        fn poll_ready(
            &mut self,
            cx: &mut std::task::Context<'_>,
        ) -> std::task::Poll<Result<(), Self::Error>> {
            self.inner.poll_ready(cx)
        }

        fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
            let addr: SocketAddr = "203.0.113.9:12345".parse().unwrap();
            req.extensions_mut()
                .insert(axum::extract::ConnectInfo(addr));
            self.inner.call(req)
        }
    }
}
