// src/services/reports/waste.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::{
    cost_model::{ingredient_cost_per_gram_or_zero, percent_of},
    inventory::{fold_balances, StockCatalog},
};
use crate::models::{
    recipe::{Ingredient, Product},
    report::{EntityKind, LossEntry, LossReason, ReportBody, WasteData, WasteSummary},
    stock::{MovementType, StockMovement, StockTarget},
};

// Nome e valor unitário de uma entidade para cada tipo de perda.
struct Valued<'a> {
    id: uuid::Uuid,
    nome: &'a str,
    tipo: EntityKind,
    unit_value: Decimal,
}

fn lookup<'a>(catalog: &StockCatalog<'a>, target: StockTarget, reason: LossReason) -> Option<Valued<'a>> {
    let valued = match target {
        StockTarget::Ingredient(id) => catalog.ingredient(id).map(|ingredient| Valued {
            id,
            nome: &ingredient.name,
            tipo: EntityKind::Insumo,
            unit_value: match reason {
                LossReason::SaldoNegativo => ingredient.unit_price,
                LossReason::Vencimento => ingredient_cost_per_gram_or_zero(ingredient),
            },
        }),
        StockTarget::Product(id) => catalog.product(id).map(|product| Valued {
            id,
            nome: &product.name,
            tipo: EntityKind::Produto,
            unit_value: product.sale_price,
        }),
    };

    if valued.is_none() {
        tracing::warn!(?target, "Movimentação fora do cadastro; perda não valorada");
    }
    valued
}

/// Perdas por saldo negativo: |saldo| × preço unitário.
pub fn negative_balance_losses<'m>(
    catalog: &StockCatalog<'_>,
    movements: impl IntoIterator<Item = &'m StockMovement>,
) -> Vec<LossEntry> {
    fold_balances(movements)
        .iter()
        .filter(|(_, balance)| balance.saldo < Decimal::ZERO)
        .filter_map(|(target, balance)| {
            let valued = lookup(catalog, *target, LossReason::SaldoNegativo)?;
            let quantidade = balance.saldo.abs();
            Some(LossEntry {
                id: valued.id,
                nome: valued.nome.to_string(),
                tipo: valued.tipo,
                motivo: LossReason::SaldoNegativo,
                quantidade,
                valor_perda: quantidade * valued.unit_value,
                lote: None,
                data_validade: None,
            })
        })
        .collect()
}

/// Perdas por vencimento: entradas cuja validade é estritamente anterior a `now`.
pub fn expiry_losses<'m>(
    catalog: &StockCatalog<'_>,
    movements: impl IntoIterator<Item = &'m StockMovement>,
    now: DateTime<Utc>,
) -> Vec<LossEntry> {
    movements
        .into_iter()
        .filter(|m| m.kind == MovementType::Entrada)
        .filter(|m| m.expires_at.is_some_and(|expires_at| expires_at < now))
        .filter_map(|m| {
            let valued = lookup(catalog, m.target, LossReason::Vencimento)?;
            Some(LossEntry {
                id: valued.id,
                nome: valued.nome.to_string(),
                tipo: valued.tipo,
                motivo: LossReason::Vencimento,
                quantidade: m.quantity,
                valor_perda: m.quantity * valued.unit_value,
                lote: m.lot.clone(),
                data_validade: m.expires_at,
            })
        })
        .collect()
}

/// Relatório de perdas: saldo negativo seguido de vencimento.
pub fn generate(
    ingredients: &[Ingredient],
    products: &[Product],
    ingredient_movements: &[StockMovement],
    product_movements: &[StockMovement],
    now: DateTime<Utc>,
) -> ReportBody<WasteData, WasteSummary> {
    let catalog = StockCatalog::new(ingredients, products);
    let movements = || ingredient_movements.iter().chain(product_movements);

    let mut perdas = negative_balance_losses(&catalog, movements());
    perdas.extend(expiry_losses(&catalog, movements(), now));

    let of_reason = |reason: LossReason| perdas.iter().filter(move |p| p.motivo == reason);
    let valor_vencimento: Decimal = of_reason(LossReason::Vencimento).map(|p| p.valor_perda).sum();
    let valor_saldo_negativo: Decimal = of_reason(LossReason::SaldoNegativo).map(|p| p.valor_perda).sum();
    let valor_total_perdas = valor_vencimento + valor_saldo_negativo;

    let summary = WasteSummary {
        total_perdas: perdas.len(),
        valor_total_perdas,
        perdas_vencimento: of_reason(LossReason::Vencimento).count(),
        perdas_saldo_negativo: of_reason(LossReason::SaldoNegativo).count(),
        valor_vencimento,
        valor_saldo_negativo,
        percentual_vencimento: percent_of(valor_vencimento, valor_total_perdas),
        percentual_saldo_negativo: percent_of(valor_saldo_negativo, valor_total_perdas),
    };

    ReportBody { data: WasteData { perdas }, summary }
}
