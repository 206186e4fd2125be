// src/db/report_repo.rs

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ReportDataSource,
    models::{
        production::{ProductionRecord, ProductionTarget},
        recipe::{Ingredient, Product, ProductComposition, Recipe, RecipeLine},
        stock::{MovementType, StockMovement, StockTarget},
    },
};

// ---
// Linhas "planas" vindas do banco. Os grafos são montados aqui em Rust.
// ---

#[derive(Debug, sqlx::FromRow)]
struct IngredientRow {
    id: Uuid,
    name: String,
    unit_price: Decimal,
    net_weight_grams: Option<Decimal>,
}

impl From<IngredientRow> for Ingredient {
    fn from(row: IngredientRow) -> Self {
        Ingredient {
            id: row.id,
            name: row.name,
            unit_price: row.unit_price,
            net_weight_grams: row.net_weight_grams,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct RecipeRow {
    id: Uuid,
    name: String,
    category: Option<String>,
    final_yield_grams: Decimal,
    portions: i32,
}

// Linha da ficha já com o insumo (JOIN)
#[derive(Debug, sqlx::FromRow)]
struct RecipeLineRow {
    recipe_id: Uuid,
    ingredient_id: Uuid,
    ingredient_name: String,
    unit_price: Decimal,
    net_weight_grams: Option<Decimal>,
    quantity_grams: Decimal,
}

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    sale_price: Decimal,
    profit_margin: Decimal,
}

#[derive(Debug, sqlx::FromRow)]
struct CompositionRow {
    product_id: Uuid,
    recipe_id: Uuid,
    quantity_grams: Decimal,
}

#[derive(Debug, sqlx::FromRow)]
struct ProductionRow {
    id: Uuid,
    recipe_id: Option<Uuid>,
    product_id: Option<Uuid>,
    target_name: String,
    produced_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
    quantity: Decimal,
    lot: String,
}

impl TryFrom<ProductionRow> for ProductionRecord {
    type Error = AppError;

    fn try_from(row: ProductionRow) -> Result<Self, Self::Error> {
        let target = match (row.recipe_id, row.product_id) {
            (Some(recipe_id), None) => ProductionTarget::Recipe(recipe_id),
            (None, Some(product_id)) => ProductionTarget::Product(product_id),
            _ => {
                return Err(anyhow::anyhow!(
                    "Produção {} deve apontar para exatamente uma ficha ou um produto",
                    row.id
                )
                .into());
            }
        };

        Ok(ProductionRecord {
            id: row.id,
            target,
            target_name: row.target_name,
            produced_at: row.produced_at,
            expires_at: row.expires_at,
            quantity: row.quantity,
            lot: row.lot,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MovementRow {
    id: Uuid,
    target_id: Uuid,
    kind: MovementType,
    quantity: Decimal,
    lot: Option<String>,
    expires_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl MovementRow {
    fn into_movement(self, target: fn(Uuid) -> StockTarget) -> StockMovement {
        StockMovement {
            id: self.id,
            target: target(self.target_id),
            kind: self.kind,
            quantity: self.quantity,
            lot: self.lot,
            expires_at: self.expires_at,
            created_at: self.created_at,
        }
    }
}

// ---
// Consultas. Toda tabela que entra num JOIN também é filtrada pelo usuário,
// para um vínculo quebrado nunca trazer cadastro de outro tenant.
// ---

const INGREDIENTS_SQL: &str = r#"
    SELECT id, name, unit_price, net_weight_grams
    FROM ingredients
    WHERE user_id = $1
    ORDER BY name
"#;

const RECIPES_SQL: &str = r#"
    SELECT id, name, category, final_yield_grams, portions
    FROM recipes
    WHERE user_id = $1
    ORDER BY name
"#;

const RECIPE_LINES_SQL: &str = r#"
    SELECT
        ri.recipe_id,
        i.id AS ingredient_id,
        i.name AS ingredient_name,
        i.unit_price,
        i.net_weight_grams,
        ri.quantity_grams
    FROM recipe_ingredients ri
    JOIN recipes r ON r.id = ri.recipe_id
    JOIN ingredients i ON i.id = ri.ingredient_id
    WHERE r.user_id = $1
      AND i.user_id = $1
    ORDER BY ri.position
"#;

const PRODUCTS_SQL: &str = r#"
    SELECT id, name, sale_price, profit_margin
    FROM products
    WHERE user_id = $1
    ORDER BY name
"#;

const COMPOSITIONS_SQL: &str = r#"
    SELECT pr.product_id, pr.recipe_id, pr.quantity_grams
    FROM product_recipes pr
    JOIN products p ON p.id = pr.product_id
    JOIN recipes r ON r.id = pr.recipe_id
    WHERE p.user_id = $1
      AND r.user_id = $1
    ORDER BY pr.position
"#;

// `target_column` vem só de `recipe_productions`/`product_productions`, nunca do usuário.
fn productions_sql(target_column: &str) -> String {
    format!(
        r#"
        SELECT
            pr.id, pr.recipe_id, pr.product_id,
            COALESCE(r.name, p.name) AS target_name,
            pr.produced_at, pr.expires_at, pr.quantity, pr.lot
        FROM productions pr
        LEFT JOIN recipes r ON r.id = pr.recipe_id AND r.user_id = pr.user_id
        LEFT JOIN products p ON p.id = pr.product_id AND p.user_id = pr.user_id
        WHERE pr.user_id = $1
          AND pr.{target_column} IS NOT NULL
          AND COALESCE(r.id, p.id) IS NOT NULL
        ORDER BY pr.produced_at DESC
        "#
    )
}

fn movements_sql(table: &str, target_column: &str) -> String {
    format!(
        r#"
        SELECT id, {target_column} AS target_id, kind, quantity, lot, expires_at, created_at
        FROM {table}
        WHERE user_id = $1
        ORDER BY created_at DESC
        "#
    )
}

// ---
// Montagem dos grafos a partir das linhas planas
// ---

fn assemble_recipes(recipe_rows: Vec<RecipeRow>, line_rows: Vec<RecipeLineRow>) -> Vec<Recipe> {
    let mut lines: HashMap<Uuid, Vec<RecipeLine>> = HashMap::new();
    for row in line_rows {
        lines.entry(row.recipe_id).or_default().push(RecipeLine {
            ingredient: Ingredient {
                id: row.ingredient_id,
                name: row.ingredient_name,
                unit_price: row.unit_price,
                net_weight_grams: row.net_weight_grams,
            },
            quantity_grams: row.quantity_grams,
        });
    }

    recipe_rows
        .into_iter()
        .map(|row| Recipe {
            lines: lines.remove(&row.id).unwrap_or_default(),
            id: row.id,
            name: row.name,
            category: row.category,
            final_yield_grams: row.final_yield_grams,
            portions: row.portions,
        })
        .collect()
}

fn assemble_products(
    product_rows: Vec<ProductRow>,
    composition_rows: Vec<CompositionRow>,
    recipes: &[Recipe],
) -> Vec<Product> {
    let by_id: HashMap<Uuid, &Recipe> = recipes.iter().map(|recipe| (recipe.id, recipe)).collect();

    let mut compositions: HashMap<Uuid, Vec<ProductComposition>> = HashMap::new();
    for row in composition_rows {
        let Some(recipe) = by_id.get(&row.recipe_id) else {
            tracing::warn!(product_id = %row.product_id, recipe_id = %row.recipe_id, "Composição aponta para ficha fora do usuário; ignorada");
            continue;
        };
        compositions.entry(row.product_id).or_default().push(ProductComposition {
            recipe: (*recipe).clone(),
            quantity_grams: row.quantity_grams,
        });
    }

    product_rows
        .into_iter()
        .map(|row| Product {
            compositions: compositions.remove(&row.id).unwrap_or_default(),
            id: row.id,
            name: row.name,
            sale_price: row.sale_price,
            profit_margin: row.profit_margin,
        })
        .collect()
}

// ---
// Repositório
// ---

#[derive(Clone)]
pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Produtos ligados às fichas já carregadas.
    async fn products_from(&self, user_id: Uuid, recipes: &[Recipe]) -> Result<Vec<Product>, AppError> {
        let (product_rows, composition_rows) = tokio::try_join!(
            sqlx::query_as::<_, ProductRow>(PRODUCTS_SQL).bind(user_id).fetch_all(&self.pool),
            sqlx::query_as::<_, CompositionRow>(COMPOSITIONS_SQL).bind(user_id).fetch_all(&self.pool)
        )?;

        Ok(assemble_products(product_rows, composition_rows, recipes))
    }

    async fn productions(&self, user_id: Uuid, target_column: &str) -> Result<Vec<ProductionRecord>, AppError> {
        sqlx::query_as::<_, ProductionRow>(&productions_sql(target_column))
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(ProductionRecord::try_from)
            .collect()
    }

    async fn movements(
        &self,
        user_id: Uuid,
        table: &str,
        target_column: &str,
        target: fn(Uuid) -> StockTarget,
    ) -> Result<Vec<StockMovement>, AppError> {
        let rows = sqlx::query_as::<_, MovementRow>(&movements_sql(table, target_column))
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|row| row.into_movement(target)).collect())
    }
}

#[async_trait]
impl ReportDataSource for ReportRepository {
    async fn ingredients(&self, user_id: Uuid) -> Result<Vec<Ingredient>, AppError> {
        let rows = sqlx::query_as::<_, IngredientRow>(INGREDIENTS_SQL)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Ingredient::from).collect())
    }

    async fn recipes(&self, user_id: Uuid) -> Result<Vec<Recipe>, AppError> {
        let (recipe_rows, line_rows) = tokio::try_join!(
            sqlx::query_as::<_, RecipeRow>(RECIPES_SQL).bind(user_id).fetch_all(&self.pool),
            sqlx::query_as::<_, RecipeLineRow>(RECIPE_LINES_SQL).bind(user_id).fetch_all(&self.pool)
        )?;

        Ok(assemble_recipes(recipe_rows, line_rows))
    }

    async fn products(&self, user_id: Uuid) -> Result<Vec<Product>, AppError> {
        let recipes = self.recipes(user_id).await?;
        self.products_from(user_id, &recipes).await
    }

    async fn recipes_and_products(&self, user_id: Uuid) -> Result<(Vec<Recipe>, Vec<Product>), AppError> {
        let recipes = self.recipes(user_id).await?;
        let products = self.products_from(user_id, &recipes).await?;
        Ok((recipes, products))
    }

    async fn recipe_productions(&self, user_id: Uuid) -> Result<Vec<ProductionRecord>, AppError> {
        self.productions(user_id, "recipe_id").await
    }

    async fn product_productions(&self, user_id: Uuid) -> Result<Vec<ProductionRecord>, AppError> {
        self.productions(user_id, "product_id").await
    }

    async fn ingredient_movements(&self, user_id: Uuid) -> Result<Vec<StockMovement>, AppError> {
        self.movements(user_id, "ingredient_movements", "ingredient_id", StockTarget::Ingredient)
            .await
    }

    async fn product_movements(&self, user_id: Uuid) -> Result<Vec<StockMovement>, AppError> {
        self.movements(user_id, "product_movements", "product_id", StockTarget::Product)
            .await
    }
}
