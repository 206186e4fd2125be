// src/services/reports/inventory.rs

use std::collections::HashMap;

use rust_decimal::Decimal;
use uuid::Uuid;

use super::grouping::OrderedGroups;
use crate::models::{
    recipe::{Ingredient, Product},
    report::{InventoryData, InventorySummary, ReportBody, StockEntry},
    stock::{MovementType, StockMovement, StockTarget},
};

// Saldos de insumo são guardados em gramas e o preço é por quilo.
const GRAMS_PER_KILO: Decimal = Decimal::ONE_THOUSAND;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StockBalance {
    pub entradas: Decimal,
    pub saidas: Decimal,
    pub saldo: Decimal,
}

impl StockBalance {
    fn apply(&mut self, movement: &StockMovement) {
        match movement.kind {
            MovementType::Entrada => self.entradas += movement.quantity,
            MovementType::Saida => self.saidas += movement.quantity,
        }
        self.saldo += movement.kind.signed(movement.quantity);
    }
}

/// Dobra as movimentações em saldos por entidade (ordem de primeira aparição).
pub fn fold_balances<'a>(
    movements: impl IntoIterator<Item = &'a StockMovement>,
) -> OrderedGroups<StockTarget, StockBalance> {
    let mut balances = OrderedGroups::new();
    for movement in movements {
        balances
            .entry_or_insert_with(movement.target, StockBalance::default)
            .apply(movement);
    }
    balances
}

/// Índice por id dos cadastros do tenant, para nomear e valorar saldos.
pub struct StockCatalog<'a> {
    ingredients: HashMap<Uuid, &'a Ingredient>,
    products: HashMap<Uuid, &'a Product>,
}

impl<'a> StockCatalog<'a> {
    pub fn new(ingredients: &'a [Ingredient], products: &'a [Product]) -> Self {
        Self {
            ingredients: ingredients.iter().map(|i| (i.id, i)).collect(),
            products: products.iter().map(|p| (p.id, p)).collect(),
        }
    }

    pub fn ingredient(&self, id: Uuid) -> Option<&'a Ingredient> {
        self.ingredients.get(&id).copied()
    }

    pub fn product(&self, id: Uuid) -> Option<&'a Product> {
        self.products.get(&id).copied()
    }
}

pub fn ingredient_stock_value(balance_grams: Decimal, ingredient: &Ingredient) -> Decimal {
    balance_grams / GRAMS_PER_KILO * ingredient.unit_price
}

pub fn product_stock_value(balance: Decimal, product: &Product) -> Decimal {
    balance * product.sale_price
}

fn stock_entry(id: Uuid, nome: &str, balance: &StockBalance, valor_estoque: Decimal) -> StockEntry {
    StockEntry {
        id,
        nome: nome.to_string(),
        entradas: balance.entradas,
        saidas: balance.saidas,
        saldo: balance.saldo,
        valor_estoque,
    }
}

/// Relatório de estoque: saldo corrente e valor por insumo e por produto.
///
/// Saldos negativos são mantidos (alimentam o relatório de perdas).
pub fn generate(
    ingredients: &[Ingredient],
    products: &[Product],
    ingredient_movements: &[StockMovement],
    product_movements: &[StockMovement],
) -> ReportBody<InventoryData, InventorySummary> {
    let catalog = StockCatalog::new(ingredients, products);
    let balances = fold_balances(ingredient_movements.iter().chain(product_movements));

    let mut insumos = Vec::new();
    let mut produtos = Vec::new();

    for (target, balance) in balances.iter() {
        match *target {
            StockTarget::Ingredient(id) => match catalog.ingredient(id) {
                Some(ingredient) => insumos.push(stock_entry(
                    id,
                    &ingredient.name,
                    balance,
                    ingredient_stock_value(balance.saldo, ingredient),
                )),
                None => tracing::warn!(ingredient_id = %id, "Movimentação de insumo fora do cadastro; ignorada"),
            },
            StockTarget::Product(id) => match catalog.product(id) {
                Some(product) => produtos.push(stock_entry(
                    id,
                    &product.name,
                    balance,
                    product_stock_value(balance.saldo, product),
                )),
                None => tracing::warn!(product_id = %id, "Movimentação de produto fora do cadastro; ignorada"),
            },
        }
    }

    let valor_total_insumos: Decimal = insumos.iter().map(|e| e.valor_estoque).sum();
    let valor_total_produtos: Decimal = produtos.iter().map(|e| e.valor_estoque).sum();

    let summary = InventorySummary {
        total_insumos: insumos.len(),
        total_produtos: produtos.len(),
        valor_total_insumos,
        valor_total_produtos,
        valor_total_estoque: valor_total_insumos + valor_total_produtos,
        itens_saldo_negativo: insumos
            .iter()
            .chain(&produtos)
            .filter(|e| e.saldo < Decimal::ZERO)
            .count(),
    };

    ReportBody { data: InventoryData { insumos, produtos }, summary }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{DateTime, Utc};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use crate::models::stock::{MovementType, StockMovement, StockTarget};

    pub fn movement(target: StockTarget, kind: MovementType, quantity: Decimal) -> StockMovement {
        StockMovement {
            id: Uuid::new_v4(),
            target,
            kind,
            quantity,
            lot: None,
            expires_at: None,
            created_at: Utc::now(),
        }
    }

    pub fn expiring(
        target: StockTarget,
        quantity: Decimal,
        lot: &str,
        expires_at: DateTime<Utc>,
    ) -> StockMovement {
        StockMovement {
            lot: Some(lot.to_string()),
            expires_at: Some(expires_at),
            ..movement(target, MovementType::Entrada, quantity)
        }
    }
}
