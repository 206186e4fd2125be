// src/services/reports/production.rs

use rust_decimal::Decimal;
use uuid::Uuid;

use super::grouping::OrderedGroups;
use crate::models::{
    production::{ProductionRecord, ProductionTarget},
    report::{ProductionData, ProductionEntry, ProductionSummary, ReportBody},
};

/// Acumula os lotes por entidade, na ordem da primeira ocorrência.
/// O primeiro nome visto é o que vale para exibição.
pub fn accumulate<'a>(records: impl IntoIterator<Item = &'a ProductionRecord>) -> Vec<ProductionEntry> {
    let mut groups: OrderedGroups<ProductionTarget, ProductionEntry> = OrderedGroups::new();

    for record in records {
        let entry = groups.entry_or_insert_with(record.target, || ProductionEntry {
            id: target_id(record.target),
            nome: record.target_name.clone(),
            quantidade_total: Decimal::ZERO,
            numero_producoes: 0,
        });
        entry.quantidade_total += record.quantity;
        entry.numero_producoes += 1;
    }

    groups.into_values().collect()
}

fn target_id(target: ProductionTarget) -> Uuid {
    match target {
        ProductionTarget::Recipe(id) | ProductionTarget::Product(id) => id,
    }
}

/// Relatório de produção acumulada por ficha e por produto.
///
/// Espera os registros já ordenados do mais recente para o mais antigo;
/// a lista resultante segue essa ordem de primeira aparição.
pub fn generate(
    recipe_productions: &[ProductionRecord],
    product_productions: &[ProductionRecord],
) -> ReportBody<ProductionData, ProductionSummary> {
    let fichas = accumulate(recipe_productions.iter().filter(|r| r.recipe_id().is_some()));
    let produtos = accumulate(product_productions.iter().filter(|r| r.product_id().is_some()));

    let summary = ProductionSummary {
        total_producoes: fichas.iter().chain(&produtos).map(|e| e.numero_producoes).sum(),
        total_fichas_produzidas: fichas.len(),
        total_produtos_produzidos: produtos.len(),
        quantidade_total_fichas: fichas.iter().map(|e| e.quantidade_total).sum(),
        quantidade_total_produtos: produtos.iter().map(|e| e.quantidade_total).sum(),
    };

    ReportBody { data: ProductionData { fichas, produtos }, summary }
}
