// src/services/reports/cost_model.rs

//! Aritmética de custo compartilhada pelos geradores.
//!
//! Insumo -> custo por grama -> custo da ficha -> custo do produto.
//! Nenhum arredondamento é feito aqui; isso é problema da apresentação.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::recipe::{Ingredient, Product, Recipe};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CostError {
    #[error("Peso líquido zerado ou ausente no insumo '{ingredient}'")]
    DivisionByZero { ingredient: String },
}

/// Divisão que devolve zero quando o divisor é zero (ou quando estoura).
pub fn safe_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
}

/// `parte / total * 100`, com o mesmo tratamento de divisor zero.
pub fn percent_of(part: Decimal, total: Decimal) -> Decimal {
    safe_div(part, total) * Decimal::ONE_HUNDRED
}

/// Média aritmética; conjunto vazio tem média zero.
pub fn mean(total: Decimal, count: usize) -> Decimal {
    safe_div(total, Decimal::from(count.max(1)))
}

pub fn ingredient_cost_per_gram(ingredient: &Ingredient) -> Result<Decimal, CostError> {
    ingredient
        .net_weight_grams
        .filter(|weight| *weight > Decimal::ZERO)
        .and_then(|weight| ingredient.unit_price.checked_div(weight))
        .ok_or_else(|| CostError::DivisionByZero { ingredient: ingredient.name.clone() })
}

/// Versão usada pelos relatórios: um insumo mal cadastrado vale zero,
/// mas nunca derruba o relatório inteiro.
pub fn ingredient_cost_per_gram_or_zero(ingredient: &Ingredient) -> Decimal {
    ingredient_cost_per_gram(ingredient).unwrap_or_else(|err| {
        tracing::warn!(ingredient_id = %ingredient.id, "{}; custo considerado zero", err);
        Decimal::ZERO
    })
}

pub fn recipe_cost_total(recipe: &Recipe) -> Decimal {
    recipe
        .lines
        .iter()
        .map(|line| ingredient_cost_per_gram_or_zero(&line.ingredient) * line.quantity_grams)
        .sum()
}

pub fn recipe_cost_per_gram(recipe: &Recipe) -> Decimal {
    safe_div(recipe_cost_total(recipe), recipe.final_yield_grams)
}

pub fn recipe_cost_per_portion(recipe: &Recipe) -> Decimal {
    safe_div(recipe_cost_total(recipe), Decimal::from(recipe.portions))
}

pub fn product_cost_total(product: &Product) -> Decimal {
    product
        .compositions
        .iter()
        .map(|composition| recipe_cost_per_gram(&composition.recipe) * composition.quantity_grams)
        .sum()
}

/// Peso de uma unidade do produto (soma dos gramas de cada ficha).
pub fn product_total_weight(product: &Product) -> Decimal {
    product.compositions.iter().map(|composition| composition.quantity_grams).sum()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use crate::models::recipe::{Ingredient, Product, ProductComposition, Recipe, RecipeLine};

    pub fn ingredient(name: &str, unit_price: Decimal, net_weight: Decimal) -> Ingredient {
        Ingredient {
            id: Uuid::new_v4(),
            name: name.to_string(),
            unit_price,
            net_weight_grams: Some(net_weight),
        }
    }

    pub fn recipe(name: &str, yield_grams: Decimal, portions: i32, lines: Vec<(Ingredient, Decimal)>) -> Recipe {
        Recipe {
            id: Uuid::new_v4(),
            name: name.to_string(),
            category: None,
            final_yield_grams: yield_grams,
            portions,
            lines: lines
                .into_iter()
                .map(|(ingredient, quantity_grams)| RecipeLine { ingredient, quantity_grams })
                .collect(),
        }
    }

    pub fn product(name: &str, sale_price: Decimal, margin: Decimal, parts: Vec<(Recipe, Decimal)>) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: name.to_string(),
            sale_price,
            profit_margin: margin,
            compositions: parts
                .into_iter()
                .map(|(recipe, quantity_grams)| ProductComposition { recipe, quantity_grams })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_end_to_end_cost_chain() {
        let farinha = ingredient("Farinha", dec!(10.00), dec!(1000));
        assert_eq!(ingredient_cost_per_gram(&farinha), Ok(dec!(0.01)));

        let massa = recipe("Massa", dec!(500), 4, vec![(farinha, dec!(500))]);
        assert_eq!(recipe_cost_total(&massa), dec!(5.00));
        assert_eq!(recipe_cost_per_gram(&massa), dec!(0.01));
        assert_eq!(recipe_cost_per_portion(&massa), dec!(1.25));

        let pao = product("Pão", dec!(4.00), dec!(50), vec![(massa, dec!(200))]);
        assert_eq!(product_cost_total(&pao), dec!(2.00));
        assert_eq!(product_total_weight(&pao), dec!(200));
    }

    #[test]
    fn test_zero_or_missing_weight_is_an_error_but_reports_use_zero() {
        let mut sal = ingredient("Sal", dec!(3), dec!(0));
        assert_eq!(
            ingredient_cost_per_gram(&sal),
            Err(CostError::DivisionByZero { ingredient: "Sal".into() })
        );
        assert_eq!(ingredient_cost_per_gram_or_zero(&sal), Decimal::ZERO);

        sal.net_weight_grams = None;
        assert!(ingredient_cost_per_gram(&sal).is_err());

        let salmoura = recipe("Salmoura", dec!(100), 1, vec![(sal, dec!(50))]);
        assert_eq!(recipe_cost_total(&salmoura), Decimal::ZERO);
    }

    #[test]
    fn test_zero_yield_and_portions_degrade_to_zero() {
        let oleo = ingredient("Óleo", dec!(9), dec!(900));
        let vazia = recipe("Vazia", Decimal::ZERO, 0, vec![(oleo, dec!(90))]);

        assert_eq!(recipe_cost_total(&vazia), dec!(0.9));
        assert_eq!(recipe_cost_per_gram(&vazia), Decimal::ZERO);
        assert_eq!(recipe_cost_per_portion(&vazia), Decimal::ZERO);
    }

    #[test]
    fn test_helpers_guard_empty_denominators() {
        assert_eq!(mean(dec!(10), 0), dec!(10));
        assert_eq!(mean(Decimal::ZERO, 0), Decimal::ZERO);
        assert_eq!(mean(dec!(9), 3), dec!(3));
        assert_eq!(percent_of(dec!(1), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(percent_of(dec!(1), dec!(4)), dec!(25));
    }

    proptest! {
        #[test]
        fn prop_recipe_cost_ignores_line_order(
            lines in prop::collection::vec((1i64..100_000, 1i64..5_000, 1i64..2_000), 1..12),
            rotation in 0usize..12,
        ) {
            let lines: Vec<_> = lines
                .into_iter()
                .enumerate()
                .map(|(i, (price, weight, qty))| {
                    (
                        ingredient(&format!("insumo-{i}"), Decimal::new(price, 2), Decimal::from(weight)),
                        Decimal::from(qty),
                    )
                })
                .collect();

            let mut reordered = lines.clone();
            reordered.reverse();
            let len = reordered.len();
            reordered.rotate_left(rotation % len);

            let original = recipe("original", dec!(1000), 10, lines);
            let shuffled = recipe("shuffled", dec!(1000), 10, reordered);

            // Decimal tem 28 dígitos; a soma em outra ordem pode diferir só no último.
            let diff = (recipe_cost_total(&original) - recipe_cost_total(&shuffled)).abs();
            prop_assert!(diff < dec!(0.000000001));
        }
    }
}
