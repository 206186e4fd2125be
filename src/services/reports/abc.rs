// src/services/reports/abc.rs

//! Curva ABC (Pareto) dos insumos pelo valor de consumo.

use std::collections::HashMap;

use rust_decimal::Decimal;
use uuid::Uuid;

use super::cost_model::{ingredient_cost_per_gram_or_zero, percent_of, safe_div};
use crate::models::{
    production::ProductionRecord,
    recipe::{Ingredient, Recipe},
    report::{AbcClass, AbcData, AbcEntry, AbcSummary, ReportBody},
};

const CLASS_A_LIMIT: Decimal = Decimal::from_parts(80, 0, 0, false, 0);
const CLASS_B_LIMIT: Decimal = Decimal::from_parts(95, 0, 0, false, 0);

pub fn classify(cumulative_percent: Decimal) -> AbcClass {
    if cumulative_percent <= CLASS_A_LIMIT {
        AbcClass::A
    } else if cumulative_percent <= CLASS_B_LIMIT {
        AbcClass::B
    } else {
        AbcClass::C
    }
}

/// Gramas consumidos de cada insumo em toda a produção registrada.
///
/// Cada lote contribui com a fração `linha / rendimento` do que foi produzido.
/// Um insumo presente em duas linhas da mesma ficha soma as duas.
pub fn consumption_by_ingredient(recipes: &[Recipe], productions: &[ProductionRecord]) -> HashMap<Uuid, Decimal> {
    let mut batches: HashMap<Uuid, Vec<Decimal>> = HashMap::new();
    for record in productions {
        if let Some(recipe_id) = record.recipe_id() {
            batches.entry(recipe_id).or_default().push(record.quantity);
        }
    }

    let mut consumed: HashMap<Uuid, Decimal> = HashMap::new();
    for recipe in recipes {
        let Some(recipe_batches) = batches.get(&recipe.id) else { continue };
        for line in &recipe.lines {
            let slot = consumed.entry(line.ingredient.id).or_default();
            for produced in recipe_batches {
                *slot += safe_div(line.quantity_grams * *produced, recipe.final_yield_grams);
            }
        }
    }
    consumed
}

/// Classifica em ordem decrescente de valor com um único acumulador:
/// a classe de cada insumo depende de todos os que vêm antes dele.
pub fn generate(
    ingredients: &[Ingredient],
    recipes: &[Recipe],
    productions: &[ProductionRecord],
) -> ReportBody<AbcData, AbcSummary> {
    let consumed = consumption_by_ingredient(recipes, productions);

    let mut ranked: Vec<(&Ingredient, Decimal, Decimal)> = ingredients
        .iter()
        .map(|ingredient| {
            let grams = consumed.get(&ingredient.id).copied().unwrap_or_default();
            (ingredient, grams, grams * ingredient_cost_per_gram_or_zero(ingredient))
        })
        .collect();
    ranked.sort_by(|a, b| b.2.cmp(&a.2));

    let valor_total: Decimal = ranked.iter().map(|(_, _, value)| *value).sum();

    let mut acumulado = Decimal::ZERO;
    let insumos: Vec<AbcEntry> = ranked
        .into_iter()
        .map(|(ingredient, grams, value)| {
            acumulado += value;
            let percentual_acumulado = percent_of(acumulado, valor_total);
            AbcEntry {
                id: ingredient.id,
                nome: ingredient.name.clone(),
                quantidade_consumida: grams,
                valor_total: value,
                percentual: percent_of(value, valor_total),
                percentual_acumulado,
                classe: classify(percentual_acumulado),
            }
        })
        .collect();

    let band = |class: AbcClass| insumos.iter().filter(move |entry| entry.classe == class);
    let summary = AbcSummary {
        total_insumos: insumos.len(),
        valor_total,
        classe_a: band(AbcClass::A).count(),
        classe_b: band(AbcClass::B).count(),
        classe_c: band(AbcClass::C).count(),
        valor_classe_a: band(AbcClass::A).map(|e| e.valor_total).sum(),
        valor_classe_b: band(AbcClass::B).map(|e| e.valor_total).sum(),
        valor_classe_c: band(AbcClass::C).map(|e| e.valor_total).sum(),
    };

    ReportBody { data: AbcData { insumos }, summary }
}
