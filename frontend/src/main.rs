//! Frontend application entry point.

use frontend::app::App;

fn main() {
    #[cfg(not(feature = "server"))]
    dioxus::launch(App);

    #[cfg(feature = "server")]
    dioxus::serve(|| async move {
        use axum::{extract::Request, middleware::Next};
        use backend::server_extra::ApiState;
        use dioxus::server::axum;

        let dataset = backend::data_utils::dataset_store::get_dataset().await?;
        let api = backend::server_extra::router(ApiState {
            dataset,
            default_k: backend::config::get_config().default_k,
        });

        Ok(dioxus::server::router(App)
            .merge(api)
            .layer(axum::middleware::from_fn(
                |request: Request, next: Next| async move {
                    let method = request.method().clone();
                    let path = request.uri().path().to_string();
                    let res = next.run(request).await;
                    dioxus::logger::tracing::debug!("{} {} -> {}", method, path, res.status());
                    res
                },
            )))
    });
}
