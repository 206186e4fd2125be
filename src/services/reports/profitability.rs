// src/services/reports/profitability.rs

use std::collections::HashMap;

use rust_decimal::Decimal;
use uuid::Uuid;

use super::cost_model::{mean, percent_of, product_cost_total};
use crate::models::{
    production::ProductionRecord,
    recipe::Product,
    report::{ProfitabilityData, ProfitabilityEntry, ProfitabilitySummary, ProfitabilityTier, ReportBody},
    stock::{MovementType, StockMovement, StockTarget},
};

pub const RANKING_LIMIT: usize = 5;

// Abaixo de 80% da margem configurada o produto é "Baixa".
const LOW_MARGIN_FACTOR: Decimal = Decimal::from_parts(8, 0, 0, false, 1);

/// Cascata de três faixas: Alta / Média / Baixa.
pub fn classify(realized_margin: Decimal, configured_margin: Decimal) -> ProfitabilityTier {
    if realized_margin >= configured_margin {
        ProfitabilityTier::Alta
    } else if realized_margin >= configured_margin * LOW_MARGIN_FACTOR {
        ProfitabilityTier::Media
    } else {
        ProfitabilityTier::Baixa
    }
}

fn profitability_entry(product: &Product, produced: Decimal, sold: Decimal) -> ProfitabilityEntry {
    let custo_producao = product_cost_total(product);
    let receita_total = sold * product.sale_price;
    let custo_total = sold * custo_producao;
    let lucro_total = receita_total - custo_total;
    let margem_lucro_real = if receita_total > Decimal::ZERO {
        percent_of(lucro_total, receita_total)
    } else {
        Decimal::ZERO
    };

    ProfitabilityEntry {
        id: product.id,
        nome: product.name.clone(),
        custo_producao,
        preco_venda: product.sale_price,
        quantidade_produzida: produced,
        quantidade_vendida: sold,
        receita_total,
        custo_total,
        lucro_total,
        margem_lucro_real,
        margem_lucro_configurada: product.profit_margin,
        classificacao: classify(margem_lucro_real, product.profit_margin),
    }
}

/// Relatório de rentabilidade: margem realizada a partir das vendas (saídas).
pub fn generate(
    products: &[Product],
    productions: &[ProductionRecord],
    movements: &[StockMovement],
) -> ReportBody<ProfitabilityData, ProfitabilitySummary> {
    let mut produced: HashMap<Uuid, Decimal> = HashMap::new();
    for record in productions {
        if let Some(product_id) = record.product_id() {
            *produced.entry(product_id).or_default() += record.quantity;
        }
    }

    let mut sold: HashMap<Uuid, Decimal> = HashMap::new();
    for movement in movements {
        if let (StockTarget::Product(product_id), MovementType::Saida) = (movement.target, movement.kind) {
            *sold.entry(product_id).or_default() += movement.quantity;
        }
    }

    let mut produtos: Vec<ProfitabilityEntry> = products
        .iter()
        .map(|product| {
            profitability_entry(
                product,
                produced.get(&product.id).copied().unwrap_or_default(),
                sold.get(&product.id).copied().unwrap_or_default(),
            )
        })
        .collect();

    produtos.sort_by(|a, b| b.margem_lucro_real.cmp(&a.margem_lucro_real));

    let mais_rentaveis = produtos.iter().take(RANKING_LIMIT).cloned().collect();
    let menos_rentaveis = produtos.iter().rev().take(RANKING_LIMIT).cloned().collect();

    let receita_total: Decimal = produtos.iter().map(|p| p.receita_total).sum();
    let custo_total: Decimal = produtos.iter().map(|p| p.custo_total).sum();
    let count_tier = |tier| produtos.iter().filter(|p| p.classificacao == tier).count();

    let summary = ProfitabilitySummary {
        total_produtos: produtos.len(),
        receita_total,
        custo_total,
        lucro_total: receita_total - custo_total,
        margem_media: mean(produtos.iter().map(|p| p.margem_lucro_real).sum(), produtos.len()),
        alta: count_tier(ProfitabilityTier::Alta),
        media: count_tier(ProfitabilityTier::Media),
        baixa: count_tier(ProfitabilityTier::Baixa),
    };

    ReportBody { data: ProfitabilityData { produtos, mais_rentaveis, menos_rentaveis }, summary }
}
