// src/services/reports/recipe_usage.rs

use std::collections::HashMap;

use rust_decimal::Decimal;
use uuid::Uuid;

use super::{
    cost_model::{recipe_cost_per_portion, recipe_cost_total},
    grouping::OrderedGroups,
};
use crate::models::{
    production::ProductionRecord,
    recipe::Recipe,
    report::{CategoryCount, RecipeUsageData, RecipeUsageEntry, RecipeUsageSummary, ReportBody},
};

pub const MOST_USED_LIMIT: usize = 10;
pub const UNCATEGORIZED: &str = "Sem categoria";

/// Relatório de uso das fichas: ranking por número de produções.
pub fn generate(
    recipes: &[Recipe],
    productions: &[ProductionRecord],
) -> ReportBody<RecipeUsageData, RecipeUsageSummary> {
    // (quantidade, lotes) por ficha
    let mut usage: HashMap<Uuid, (Decimal, usize)> = HashMap::new();
    for record in productions {
        if let Some(recipe_id) = record.recipe_id() {
            let slot = usage.entry(recipe_id).or_insert((Decimal::ZERO, 0));
            slot.0 += record.quantity;
            slot.1 += 1;
        }
    }

    let mut fichas: Vec<RecipeUsageEntry> = recipes
        .iter()
        .map(|recipe| {
            let (quantidade_total, numero_producoes) =
                usage.get(&recipe.id).copied().unwrap_or((Decimal::ZERO, 0));
            RecipeUsageEntry {
                id: recipe.id,
                nome: recipe.name.clone(),
                categoria: recipe.category.clone(),
                quantidade_total,
                numero_producoes,
                custo_total: recipe_cost_total(recipe),
                custo_por_porcao: recipe_cost_per_portion(recipe),
            }
        })
        .collect();

    // sort_by é estável: empates mantêm a ordem de entrada
    fichas.sort_by(|a, b| b.numero_producoes.cmp(&a.numero_producoes));

    let mais_usadas = fichas.iter().take(MOST_USED_LIMIT).cloned().collect();

    let mut categorias: OrderedGroups<String, usize> = OrderedGroups::new();
    for recipe in recipes {
        let name = recipe.category.clone().unwrap_or_else(|| UNCATEGORIZED.to_string());
        *categorias.entry_or_insert_with(name, || 0) += 1;
    }
    let por_categoria = categorias
        .iter()
        .map(|(categoria, quantidade)| CategoryCount { categoria: categoria.clone(), quantidade: *quantidade })
        .collect();

    let fichas_utilizadas = fichas.iter().filter(|f| f.numero_producoes > 0).count();
    let summary = RecipeUsageSummary {
        total_fichas: fichas.len(),
        fichas_utilizadas,
        fichas_sem_producao: fichas.len() - fichas_utilizadas,
        total_producoes: fichas.iter().map(|f| f.numero_producoes).sum(),
    };

    ReportBody { data: RecipeUsageData { fichas, mais_usadas, por_categoria }, summary }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::production::ProductionTarget;
    use crate::services::reports::cost_model::fixtures::{ingredient, recipe};
    use crate::services::reports::production::fixtures::production;
    use rust_decimal_macros::dec;

    fn categorized(name: &str, category: Option<&str>) -> Recipe {
        let mut r = recipe(name, dec!(1000), 10, vec![(ingredient("Base", dec!(20), dec!(1000)), dec!(500))]);
        r.category = category.map(str::to_string);
        r
    }

    #[test]
    fn test_ranks_recipes_by_production_count() {
        let arroz = categorized("Arroz", Some("Acompanhamentos"));
        let feijao = categorized("Feijão", Some("Acompanhamentos"));
        let pudim = categorized("Pudim", Some("Sobremesas"));

        let productions = vec![
            production(ProductionTarget::Recipe(feijao.id), "Feijão", dec!(3)),
            production(ProductionTarget::Recipe(pudim.id), "Pudim", dec!(1)),
            production(ProductionTarget::Recipe(feijao.id), "Feijão", dec!(2)),
            production(ProductionTarget::Product(arroz.id), "produto com mesmo id", dec!(9)),
        ];

        let report = generate(&[arroz.clone(), feijao.clone(), pudim.clone()], &productions);
        let names: Vec<_> = report.data.fichas.iter().map(|f| f.nome.as_str()).collect();
        assert_eq!(names, vec!["Feijão", "Pudim", "Arroz"]);

        let first = &report.data.fichas[0];
        assert_eq!(first.numero_producoes, 2);
        assert_eq!(first.quantidade_total, dec!(5));
        assert_eq!(first.custo_total, dec!(10));
        assert_eq!(first.custo_por_porcao, dec!(1));

        assert_eq!(report.summary.total_fichas, 3);
        assert_eq!(report.summary.fichas_utilizadas, 2);
        assert_eq!(report.summary.fichas_sem_producao, 1);
        assert_eq!(report.summary.total_producoes, 3);
    }

    #[test]
    fn test_category_histogram_in_first_seen_order() {
        let recipes = vec![
            categorized("Pudim", Some("Sobremesas")),
            categorized("Arroz", Some("Acompanhamentos")),
            categorized("Mousse", Some("Sobremesas")),
            categorized("Teste", None),
        ];

        let report = generate(&recipes, &[]);
        let histogram: Vec<_> = report
            .data
            .por_categoria
            .iter()
            .map(|c| (c.categoria.as_str(), c.quantidade))
            .collect();
        assert_eq!(histogram, vec![("Sobremesas", 2), ("Acompanhamentos", 1), (UNCATEGORIZED, 1)]);
    }

    #[test]
    fn test_most_used_is_capped_at_ten() {
        let recipes: Vec<_> = (0..14).map(|i| categorized(&format!("Ficha {i}"), None)).collect();
        let productions: Vec<_> = recipes
            .iter()
            .enumerate()
            .flat_map(|(i, r)| (0..i).map(move |_| production(ProductionTarget::Recipe(r.id), &r.name, dec!(1))))
            .collect();

        let report = generate(&recipes, &productions);
        assert_eq!(report.data.mais_usadas.len(), MOST_USED_LIMIT);
        assert_eq!(report.data.mais_usadas[0].nome, "Ficha 13");
        assert_eq!(report.data.fichas.len(), 14);
    }
}
