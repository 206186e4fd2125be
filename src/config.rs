// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    common::i18n::I18nStore,
    db::{ReportDataSource, ReportRepository},
    services::{auth::TokenService, reports::ReportService},
};

const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Variáveis de ambiente (com `.env` opcional).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_addr: String,
    pub max_connections: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;
        let server_addr = env::var("SERVER_ADDR").unwrap_or_else(|_| DEFAULT_SERVER_ADDR.to_string());
        let max_connections = match env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("DATABASE_MAX_CONNECTIONS inválido: '{raw}'"))?,
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self { database_url, jwt_secret, server_addr, max_connections })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub report_service: ReportService,
    pub token_service: TokenService,
    pub i18n_store: Arc<I18nStore>,
}

impl AppState {
    /// Monta o estado a partir de qualquer fonte de dados.
    pub fn with_source(source: Arc<dyn ReportDataSource>, jwt_secret: String) -> Self {
        Self {
            report_service: ReportService::new(source),
            token_service: TokenService::new(jwt_secret),
            i18n_store: Arc::new(I18nStore::new()),
        }
    }

    pub async fn connect(config: &Config) -> anyhow::Result<(Self, PgPool)> {
        let db_pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let repository = ReportRepository::new(db_pool.clone());
        let state = Self::with_source(Arc::new(repository), config.jwt_secret.clone());

        Ok((state, db_pool))
    }
}
