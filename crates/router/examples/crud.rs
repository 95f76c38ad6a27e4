//! Runs a few requests through a router with users CRUD routes and prints the responses.
//!
//! `cargo run -p micro-router --example crud`

use futures::future::join_all;
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use micro_router::{AllowedMethodsOptions, Controller, Router, RouterError, RouterOptions};
use micro_web::{HttpError, Pipeline, middleware_fn};
use std::error::Error;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

type BoxError = Box<dyn Error + Send + Sync>;

fn users_router() -> Result<Router, BoxError> {
    let options: RouterOptions =
        serde_json::from_str(r#"{ "prefix": "/users", "methods": ["GET", "HEAD", "POST", "PUT", "DELETE", "OPTIONS"] }"#)?;

    let mut router = Router::with_options(options);
    router
        .get("", middleware_fn(|_ctx, _next| Box::pin(async move { Ok(Some(r#"[{"id":42}]"#.into())) })))?
        .post(
            "",
            middleware_fn(|ctx, _next| {
                Box::pin(async move {
                    ctx.res_mut().set_status(StatusCode::CREATED);
                    Ok(Some("created".into()))
                })
            }),
        )?
        .get(
            "/{id:[0-9]+}",
            middleware_fn(|ctx, _next| {
                Box::pin(async move {
                    match ctx.req().slugs().get("id") {
                        Some("42") => Ok(Some(r#"{"id":42}"#.into())),
                        _ => Err(HttpError::new(StatusCode::NOT_FOUND).with_message("no such user").into()),
                    }
                })
            }),
        )?
        .delete("/:id", middleware_fn(|_ctx, _next| Box::pin(async move { Ok(Some("deleted".into())) })))?;

    Ok(router)
}

fn about_router() -> Result<Router, RouterError> {
    let about = Controller::new()
        .action("GET /about", middleware_fn(|_ctx, _next| Box::pin(async move { Ok(Some("micro-router demo".into())) })))
        .action("/health", middleware_fn(|_ctx, _next| Box::pin(async move { Ok(Some("ok".into())) })));

    let mut router = Router::new();
    router.controllers([about])?;
    Ok(router)
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::DEBUG).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let users = users_router()?;
    let allowed_methods = users.allowed_methods(AllowedMethodsOptions::default());
    let router = Router::merge([users, about_router()?]);
    info!(router = ?router, "router ready");

    let pipeline = Pipeline::builder().add_last(router.routes()).add_last(allowed_methods).build();

    let requests = [
        (Method::GET, "/users"),
        (Method::POST, "/users"),
        (Method::GET, "/users/42"),
        (Method::GET, "/users/7"),
        (Method::DELETE, "/users/42"),
        (Method::PATCH, "/users/42"),
        (Method::PUT, "/users/42"),
        (Method::OPTIONS, "/users/42"),
        (Method::GET, "/about?lang=en"),
        (Method::GET, "/health"),
        (Method::GET, "/missing"),
    ];

    let responses = join_all(requests.iter().map(|(method, uri)| {
        let pipeline = &pipeline;
        async move {
            let request = Request::builder().method(method.clone()).uri(*uri).body(())?;
            Ok::<_, http::Error>((method, uri, pipeline.dispatch(request).await))
        }
    }))
    .await;

    for response in responses {
        let (method, uri, response) = response?;
        let response = response.into_http();
        let allow = response.headers().get(http::header::ALLOW).cloned();
        let status = response.status();
        let body = response.into_body().collect().await?.to_bytes();
        info!(%method, uri, %status, ?allow, body = %String::from_utf8_lossy(&body), "response");
    }

    Ok(())
}
