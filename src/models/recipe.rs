// src/models/recipe.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---
// Grafos de entrada do motor de relatórios.
// ---
// Montados pela camada de persistência (db/) e passados por valor.
// O motor nunca navega relações sob demanda: tudo o que ele precisa já vem aqui.

// --- 1. Insumo ---
// Comprado numa embalagem de peso líquido conhecido (em gramas).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub id: Uuid,
    pub name: String,
    pub unit_price: Decimal,              // Preço de compra da embalagem
    pub net_weight_grams: Option<Decimal>, // Peso líquido; ausente em cadastros antigos
}

// --- 2. Linha da Ficha Técnica ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeLine {
    pub ingredient: Ingredient,
    pub quantity_grams: Decimal,
}

// --- 3. Ficha Técnica ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: Uuid,
    pub name: String,
    pub category: Option<String>,
    pub final_yield_grams: Decimal, // Peso final do rendimento
    pub portions: i32,
    pub lines: Vec<RecipeLine>,
}

// --- 4. Composição do Produto ---
// Quantos gramas de uma ficha entram em uma unidade do produto.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductComposition {
    pub recipe: Recipe,
    pub quantity_grams: Decimal,
}

// --- 5. Produto ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub sale_price: Decimal,
    pub profit_margin: Decimal, // Margem de lucro configurada (%)
    pub compositions: Vec<ProductComposition>,
}
