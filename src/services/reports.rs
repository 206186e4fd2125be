// src/services/reports.rs

//! Motor de relatórios: despacha o tipo pedido para o gerador certo.
//!
//! Os geradores são funções puras sobre os grafos já carregados;
//! este módulo só busca os dados (em paralelo) e monta o envelope.

pub mod abc;
pub mod cost;
pub mod cost_model;
pub mod grouping;
pub mod inventory;
pub mod production;
pub mod profitability;
pub mod recipe_usage;
pub mod waste;

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ReportDataSource,
    models::report::{Report, ReportBody, ReportType, ReportTypeEntry},
};

#[derive(Clone)]
pub struct ReportService {
    source: Arc<dyn ReportDataSource>,
}

impl ReportService {
    pub fn new(source: Arc<dyn ReportDataSource>) -> Self {
        Self { source }
    }

    pub fn report_types(&self) -> Vec<ReportTypeEntry> {
        ReportType::ALL
            .into_iter()
            .map(|kind| ReportTypeEntry {
                key: kind.key().to_string(),
                label: kind.label().to_string(),
            })
            .collect()
    }

    /// Gera o relatório propagando qualquer falha de leitura, cálculo ou serialização.
    pub async fn build(&self, kind: ReportType, user_id: Uuid) -> Result<Report, AppError> {
        let source = self.source.as_ref();

        match kind {
            ReportType::Costs => {
                let (recipes, products) = source.recipes_and_products(user_id).await?;
                run_generator(kind, move || cost::generate(&products, &recipes)).await
            }
            ReportType::Production => {
                let (recipe_productions, product_productions) = tokio::try_join!(
                    source.recipe_productions(user_id),
                    source.product_productions(user_id)
                )?;
                run_generator(kind, move || production::generate(&recipe_productions, &product_productions)).await
            }
            ReportType::Inventory => {
                let (ingredients, products, ingredient_movements, product_movements) = tokio::try_join!(
                    source.ingredients(user_id),
                    source.products(user_id),
                    source.ingredient_movements(user_id),
                    source.product_movements(user_id)
                )?;
                run_generator(kind, move || {
                    inventory::generate(&ingredients, &products, &ingredient_movements, &product_movements)
                })
                .await
            }
            ReportType::RecipeUsage => {
                let (recipes, productions) =
                    tokio::try_join!(source.recipes(user_id), source.recipe_productions(user_id))?;
                run_generator(kind, move || recipe_usage::generate(&recipes, &productions)).await
            }
            ReportType::Profitability => {
                let (products, productions, movements) = tokio::try_join!(
                    source.products(user_id),
                    source.product_productions(user_id),
                    source.product_movements(user_id)
                )?;
                run_generator(kind, move || profitability::generate(&products, &productions, &movements)).await
            }
            ReportType::AbcIngredients => {
                let (ingredients, recipes, productions) = tokio::try_join!(
                    source.ingredients(user_id),
                    source.recipes(user_id),
                    source.recipe_productions(user_id)
                )?;
                run_generator(kind, move || abc::generate(&ingredients, &recipes, &productions)).await
            }
            ReportType::Waste => {
                let (ingredients, products, ingredient_movements, product_movements) = tokio::try_join!(
                    source.ingredients(user_id),
                    source.products(user_id),
                    source.ingredient_movements(user_id),
                    source.product_movements(user_id)
                )?;
                let now = Utc::now();
                run_generator(kind, move || {
                    waste::generate(&ingredients, &products, &ingredient_movements, &product_movements, now)
                })
                .await
            }
        }
    }

    /// Ponto de entrada da API: nunca falha.
    /// Um erro vira o relatório vazio do mesmo tipo (e fica no log).
    pub async fn dispatch(&self, kind: ReportType, user_id: Uuid) -> Report {
        match self.build(kind, user_id).await {
            Ok(report) => {
                tracing::info!(target: "audit", %user_id, report_type = %kind, outcome = "ok", "Relatório gerado");
                report
            }
            Err(err) => {
                tracing::error!(%user_id, report_type = %kind, "Falha ao gerar relatório: {:?}", err);
                tracing::info!(target: "audit", %user_id, report_type = %kind, outcome = "fallback", "Relatório vazio entregue");
                Report::empty(kind)
            }
        }
    }
}

// Roda o gerador fora do runtime assíncrono. Um pânico lá dentro
// (estouro de Decimal, por exemplo) volta como erro comum.
async fn run_generator<F, D, S>(kind: ReportType, generator: F) -> Result<Report, AppError>
where
    F: FnOnce() -> ReportBody<D, S> + Send + 'static,
    D: Serialize + Send + 'static,
    S: Serialize + Send + 'static,
{
    let body = tokio::task::spawn_blocking(generator)
        .await
        .map_err(|err| anyhow::anyhow!("Gerador do relatório '{kind}' abortou: {err}"))?;
    Report::from_body(kind, body)
}
