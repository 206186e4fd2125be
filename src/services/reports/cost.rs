// src/services/reports/cost.rs

use rust_decimal::Decimal;

use super::cost_model::{
    mean, percent_of, product_cost_total, product_total_weight, recipe_cost_per_gram,
    recipe_cost_per_portion, recipe_cost_total, safe_div,
};
use crate::models::{
    recipe::{Product, Recipe},
    report::{CostData, CostSummary, ProductCostEntry, RecipeCostEntry, ReportBody},
};

/// Margem realizada (%) para um preço de venda; preço zero dá margem zero.
pub fn realized_margin(sale_price: Decimal, production_cost: Decimal) -> Decimal {
    if sale_price > Decimal::ZERO {
        percent_of(sale_price - production_cost, sale_price)
    } else {
        Decimal::ZERO
    }
}

pub fn product_cost_entry(product: &Product) -> ProductCostEntry {
    let custo_producao = product_cost_total(product);
    let peso_total = product_total_weight(product);

    ProductCostEntry {
        id: product.id,
        nome: product.name.clone(),
        custo_producao,
        preco_venda: product.sale_price,
        margem_configurada: product.profit_margin,
        margem_real: realized_margin(product.sale_price, custo_producao),
        peso_total,
        custo_por_grama: safe_div(custo_producao, peso_total),
    }
}

pub fn recipe_cost_entry(recipe: &Recipe) -> RecipeCostEntry {
    RecipeCostEntry {
        id: recipe.id,
        nome: recipe.name.clone(),
        categoria: recipe.category.clone(),
        custo_total: recipe_cost_total(recipe),
        peso_final: recipe.final_yield_grams,
        custo_por_grama: recipe_cost_per_gram(recipe),
        custo_por_porcao: recipe_cost_per_portion(recipe),
    }
}

/// Relatório de custos: quebra por produto e por ficha técnica.
pub fn generate(products: &[Product], recipes: &[Recipe]) -> ReportBody<CostData, CostSummary> {
    let produtos: Vec<ProductCostEntry> = products.iter().map(product_cost_entry).collect();
    let fichas: Vec<RecipeCostEntry> = recipes.iter().map(recipe_cost_entry).collect();

    let soma_produtos: Decimal = produtos.iter().map(|p| p.custo_producao).sum();
    let soma_fichas: Decimal = fichas.iter().map(|f| f.custo_total).sum();

    let summary = CostSummary {
        total_produtos: produtos.len(),
        total_fichas: fichas.len(),
        custo_medio_produtos: mean(soma_produtos, produtos.len()),
        custo_medio_fichas: mean(soma_fichas, fichas.len()),
    };

    ReportBody { data: CostData { produtos, fichas }, summary }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::reports::cost_model::fixtures::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_cost_report_for_reference_product() {
        let farinha = ingredient("Farinha", dec!(10.00), dec!(1000));
        let massa = recipe("Massa", dec!(500), 5, vec![(farinha, dec!(500))]);
        let pao = product("Pão", dec!(4.00), dec!(40), vec![(massa.clone(), dec!(200))]);

        let report = generate(&[pao.clone()], &[massa.clone()]);

        let entry = &report.data.produtos[0];
        assert_eq!(entry.id, pao.id);
        assert_eq!(entry.custo_producao, dec!(2.00));
        assert_eq!(entry.margem_real, dec!(50));
        assert_eq!(entry.margem_configurada, dec!(40));
        assert_eq!(entry.peso_total, dec!(200));
        assert_eq!(entry.custo_por_grama, dec!(0.01));

        let ficha = &report.data.fichas[0];
        assert_eq!(ficha.custo_total, dec!(5.00));
        assert_eq!(ficha.peso_final, dec!(500));
        assert_eq!(ficha.custo_por_grama, dec!(0.01));
        assert_eq!(ficha.custo_por_porcao, dec!(1.00));

        assert_eq!(report.summary.total_produtos, 1);
        assert_eq!(report.summary.total_fichas, 1);
        assert_eq!(report.summary.custo_medio_produtos, dec!(2.00));
        assert_eq!(report.summary.custo_medio_fichas, dec!(5.00));
    }

    #[test]
    fn test_zero_sale_price_gives_zero_margin() {
        let acucar = ingredient("Açúcar", dec!(5), dec!(1000));
        let calda = recipe("Calda", dec!(100), 2, vec![(acucar, dec!(100))]);
        let brinde = product("Brinde", Decimal::ZERO, dec!(30), vec![(calda, dec!(50))]);

        let entry = product_cost_entry(&brinde);
        assert_eq!(entry.custo_producao, dec!(0.25));
        assert_eq!(entry.margem_real, Decimal::ZERO);
    }

    #[test]
    fn test_product_without_compositions_has_zero_cost_per_gram() {
        let vazio = product("Vazio", dec!(10), dec!(30), vec![]);
        let entry = product_cost_entry(&vazio);
        assert_eq!(entry.peso_total, Decimal::ZERO);
        assert_eq!(entry.custo_por_grama, Decimal::ZERO);
        assert_eq!(entry.margem_real, dec!(100));
    }

    #[test]
    fn test_empty_catalog_has_zero_means() {
        let report = generate(&[], &[]);
        assert!(report.data.produtos.is_empty());
        assert_eq!(report.summary.custo_medio_produtos, Decimal::ZERO);
        assert_eq!(report.summary.custo_medio_fichas, Decimal::ZERO);
    }
}
