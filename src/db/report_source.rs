// src/db/report_source.rs

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        production::ProductionRecord,
        recipe::{Ingredient, Product, Recipe},
        stock::StockMovement,
    },
};

/// Tudo o que os geradores de relatório leem do banco.
///
/// Todas as consultas são escopadas pelo usuário dono dos cadastros.
/// Produções e movimentações chegam da mais recente para a mais antiga.
#[async_trait]
pub trait ReportDataSource: Send + Sync {
    async fn ingredients(&self, user_id: Uuid) -> Result<Vec<Ingredient>, AppError>;

    /// Fichas com as linhas já ligadas aos insumos.
    async fn recipes(&self, user_id: Uuid) -> Result<Vec<Recipe>, AppError>;

    /// Produtos com as composições já ligadas às fichas (e estas aos insumos).
    async fn products(&self, user_id: Uuid) -> Result<Vec<Product>, AppError>;

    /// Fichas e produtos juntos, para quem precisa dos dois grafos.
    /// Implementações com banco devem carregar as fichas uma vez só.
    async fn recipes_and_products(&self, user_id: Uuid) -> Result<(Vec<Recipe>, Vec<Product>), AppError> {
        tokio::try_join!(self.recipes(user_id), self.products(user_id))
    }

    async fn recipe_productions(&self, user_id: Uuid) -> Result<Vec<ProductionRecord>, AppError>;

    async fn product_productions(&self, user_id: Uuid) -> Result<Vec<ProductionRecord>, AppError>;

    async fn ingredient_movements(&self, user_id: Uuid) -> Result<Vec<StockMovement>, AppError>;

    async fn product_movements(&self, user_id: Uuid) -> Result<Vec<StockMovement>, AppError>;
}
