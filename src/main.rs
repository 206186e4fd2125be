//src/main.rs

use axum::{middleware as axum_middleware, routing::get, Router};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::{AppState, Config};
use crate::docs::ApiDoc;
use crate::middleware::auth::auth_guard;

/// Rotas da API. Separado do `main` para os testes chamarem o Router direto.
fn app(app_state: AppState) -> Router {
    // Rotas de relatório (protegidas pelo middleware)
    let report_routes = Router::new()
        .route("/", get(handlers::reports::get_report))
        .route("/types", get(handlers::reports::list_report_types))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/reports", report_routes)
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .compact()
        .init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let config = Config::from_env()?;
    let (app_state, db_pool) = AppState::connect(&config).await?;

    sqlx::migrate!().run(&db_pool).await?;
    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let listener = TcpListener::bind(&config.server_addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);

    axum::serve(listener, app(app_state)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use chrono::Duration;
    use rust_decimal_macros::dec;
    use serde_json::Value;
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::models::stock::{MovementType, StockTarget};
    use crate::services::{
        auth::TokenService,
        reports::{
            cost_model::fixtures::ingredient,
            fixtures::{FailingSource, InMemorySource},
            inventory::fixtures::movement,
        },
    };

    const SECRET: &str = "segredo-de-teste";

    fn state_with(source: impl crate::db::ReportDataSource + 'static) -> AppState {
        AppState::with_source(Arc::new(source), SECRET.to_string())
    }

    fn bearer() -> String {
        let token = TokenService::new(SECRET.to_string())
            .create_token(Uuid::new_v4(), Duration::hours(1))
            .unwrap();
        format!("Bearer {token}")
    }

    async fn call(app: Router, uri: &str, auth: Option<String>, lang: Option<&str>) -> (StatusCode, Value) {
        let mut request = Request::builder().uri(uri);
        if let Some(auth) = auth {
            request = request.header(header::AUTHORIZATION, auth);
        }
        if let Some(lang) = lang {
            request = request.header(header::ACCEPT_LANGUAGE, lang);
        }

        let response = app.oneshot(request.body(Body::empty()).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let response = app(state_with(InMemorySource::default()))
            .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_reports_require_a_valid_token() {
        let (status, _) = call(app(state_with(InMemorySource::default())), "/api/reports?type=custos", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = call(
            app(state_with(InMemorySource::default())),
            "/api/reports?type=custos",
            Some("Bearer invalido".into()),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unknown_or_missing_type_is_rejected() {
        for uri in ["/api/reports?type=vendas", "/api/reports"] {
            let (status, body) = call(app(state_with(InMemorySource::default())), uri, Some(bearer()), None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, serde_json::json!({ "error": "Invalid report type" }));
        }

        let (_, body) = call(
            app(state_with(InMemorySource::default())),
            "/api/reports?type=vendas",
            Some(bearer()),
            Some("pt-BR"),
        )
        .await;
        assert_eq!(body["error"], "Tipo de relatório inválido");
    }

    #[tokio::test]
    async fn test_inventory_report_over_http() {
        let queijo = ingredient("Queijo", dec!(40), dec!(1000));
        let source = InMemorySource {
            ingredient_movements: vec![movement(StockTarget::Ingredient(queijo.id), MovementType::Entrada, dec!(500))],
            ingredients: vec![queijo],
            ..Default::default()
        };

        let (status, body) = call(app(state_with(source)), "/api/reports?type=estoque", Some(bearer()), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["type"], "estoque");
        assert_eq!(body["data"]["insumos"][0]["nome"], "Queijo");
        assert_eq!(body["data"]["insumos"][0]["valorEstoque"].as_f64(), Some(20.0));
        assert_eq!(body["summary"]["totalInsumos"], 1);
    }

    #[tokio::test]
    async fn test_generation_failure_returns_empty_report() {
        let (status, body) = call(app(state_with(FailingSource)), "/api/reports?type=abc-insumos", Some(bearer()), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            serde_json::json!({ "type": "abc-insumos", "data": {}, "summary": { "message": "no data available" } })
        );
    }

    #[tokio::test]
    async fn test_lists_report_types() {
        let (status, body) = call(app(state_with(InMemorySource::default())), "/api/reports/types", Some(bearer()), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(7));
        assert_eq!(body[5]["key"], "abc-insumos");
    }
}
