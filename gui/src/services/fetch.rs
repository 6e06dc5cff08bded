// Runs widget fetches on the Dioxus executor and hands results back to the widget's feed.
use dioxus::prelude::*;
use engine::feed::{Resolution, WidgetFeed};
use engine::EngineError;
use std::future::Future;

/// Starts a fetch for `params`. The result is applied only if no newer fetch
/// started on the same feed in the meantime.
pub fn launch<P, T, E, Fut>(mut feed: Signal<WidgetFeed<P, T>>, params: P, fetch: impl FnOnce(P) -> Fut)
where
    P: Clone + 'static,
    T: 'static,
    E: Into<EngineError> + 'static,
    Fut: Future<Output = Result<T, E>> + 'static,
{
    let ticket = feed.write().begin(params.clone());
    let pending = fetch(params);
    spawn(async move {
        let result = pending.await;
        if feed.write().resolve(ticket, result) == Resolution::Applied {
            tracing::debug!(generation = ticket.generation(), "Widget data updated");
        }
    });
}

/// Manual retry with the parameters of the last fetch. No-op before the first fetch.
pub fn retry<P, T, E, Fut>(mut feed: Signal<WidgetFeed<P, T>>, fetch: impl FnOnce(P) -> Fut)
where
    P: Clone + 'static,
    T: 'static,
    E: Into<EngineError> + 'static,
    Fut: Future<Output = Result<T, E>> + 'static,
{
    let retried = feed.write().retry();
    if let Some((ticket, params)) = retried {
        let pending = fetch(params);
        spawn(async move {
            let result = pending.await;
            feed.write().resolve(ticket, result);
        });
    }
}
