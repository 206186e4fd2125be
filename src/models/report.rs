// src/models/report.rs

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::common::error::AppError;

// ---
// 1. Tipos de Relatório (a chave do `?type=`)
// ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum ReportType {
    #[serde(rename = "custos")]
    Costs,
    #[serde(rename = "producao")]
    Production,
    #[serde(rename = "estoque")]
    Inventory,
    #[serde(rename = "fichas")]
    RecipeUsage,
    #[serde(rename = "rentabilidade")]
    Profitability,
    #[serde(rename = "abc-insumos")]
    AbcIngredients,
    #[serde(rename = "desperdicio")]
    Waste,
}

impl ReportType {
    pub const ALL: [ReportType; 7] = [
        ReportType::Costs,
        ReportType::Production,
        ReportType::Inventory,
        ReportType::RecipeUsage,
        ReportType::Profitability,
        ReportType::AbcIngredients,
        ReportType::Waste,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ReportType::Costs => "custos",
            ReportType::Production => "producao",
            ReportType::Inventory => "estoque",
            ReportType::RecipeUsage => "fichas",
            ReportType::Profitability => "rentabilidade",
            ReportType::AbcIngredients => "abc-insumos",
            ReportType::Waste => "desperdicio",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReportType::Costs => "Custos de Produtos e Fichas",
            ReportType::Production => "Produção Acumulada",
            ReportType::Inventory => "Saldo e Valor de Estoque",
            ReportType::RecipeUsage => "Uso de Fichas Técnicas",
            ReportType::Profitability => "Rentabilidade de Produtos",
            ReportType::AbcIngredients => "Curva ABC de Insumos",
            ReportType::Waste => "Perdas e Desperdício",
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ReportType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportType::ALL
            .into_iter()
            .find(|kind| kind.key() == s)
            .ok_or_else(|| AppError::InvalidReportType(s.to_string()))
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportTypeEntry {
    #[schema(example = "abc-insumos")]
    pub key: String,
    #[schema(example = "Curva ABC de Insumos")]
    pub label: String,
}

// ---
// 2. O Envelope `{ type, data, summary }`
// ---
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Report {
    #[serde(rename = "type")]
    pub report_type: ReportType,
    #[schema(value_type = Object)]
    pub data: serde_json::Value,
    #[schema(value_type = Object)]
    pub summary: serde_json::Value,
}

impl Report {
    /// Relatório substituto quando a geração falha.
    pub fn empty(report_type: ReportType) -> Self {
        Self {
            report_type,
            data: json!({}),
            summary: json!({ "message": "no data available" }),
        }
    }

    pub fn from_body<D, S>(report_type: ReportType, body: ReportBody<D, S>) -> Result<Self, AppError>
    where
        D: Serialize,
        S: Serialize,
    {
        Ok(Self {
            report_type,
            data: serde_json::to_value(body.data).map_err(anyhow::Error::from)?,
            summary: serde_json::to_value(body.summary).map_err(anyhow::Error::from)?,
        })
    }
}

// Saída tipada de cada gerador, antes de virar JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportBody<D, S> {
    pub data: D,
    pub summary: S,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Insumo,
    Produto,
}

// ---
// 3. Custos
// ---
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductCostEntry {
    pub id: Uuid,
    pub nome: String,
    pub custo_producao: Decimal,
    pub preco_venda: Decimal,
    pub margem_configurada: Decimal,
    pub margem_real: Decimal,
    pub peso_total: Decimal,
    pub custo_por_grama: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeCostEntry {
    pub id: Uuid,
    pub nome: String,
    pub categoria: Option<String>,
    pub custo_total: Decimal,
    pub peso_final: Decimal,
    pub custo_por_grama: Decimal,
    pub custo_por_porcao: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CostData {
    pub produtos: Vec<ProductCostEntry>,
    pub fichas: Vec<RecipeCostEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CostSummary {
    pub total_produtos: usize,
    pub total_fichas: usize,
    pub custo_medio_produtos: Decimal,
    pub custo_medio_fichas: Decimal,
}

// ---
// 4. Produção
// ---
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductionEntry {
    pub id: Uuid,
    pub nome: String,
    pub quantidade_total: Decimal,
    pub numero_producoes: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProductionData {
    pub fichas: Vec<ProductionEntry>,
    pub produtos: Vec<ProductionEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductionSummary {
    pub total_producoes: usize,
    pub total_fichas_produzidas: usize,
    pub total_produtos_produzidos: usize,
    pub quantidade_total_fichas: Decimal,
    pub quantidade_total_produtos: Decimal,
}

// ---
// 5. Estoque
// ---
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockEntry {
    pub id: Uuid,
    pub nome: String,
    pub entradas: Decimal,
    pub saidas: Decimal,
    pub saldo: Decimal,
    pub valor_estoque: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct InventoryData {
    pub insumos: Vec<StockEntry>,
    pub produtos: Vec<StockEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    pub total_insumos: usize,
    pub total_produtos: usize,
    pub valor_total_insumos: Decimal,
    pub valor_total_produtos: Decimal,
    pub valor_total_estoque: Decimal,
    pub itens_saldo_negativo: usize,
}

// ---
// 6. Uso de Fichas
// ---
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeUsageEntry {
    pub id: Uuid,
    pub nome: String,
    pub categoria: Option<String>,
    pub quantidade_total: Decimal,
    pub numero_producoes: usize,
    pub custo_total: Decimal,
    pub custo_por_porcao: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CategoryCount {
    pub categoria: String,
    pub quantidade: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeUsageData {
    pub fichas: Vec<RecipeUsageEntry>,
    pub mais_usadas: Vec<RecipeUsageEntry>,
    pub por_categoria: Vec<CategoryCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeUsageSummary {
    pub total_fichas: usize,
    pub fichas_utilizadas: usize,
    pub fichas_sem_producao: usize,
    pub total_producoes: usize,
}

// ---
// 7. Rentabilidade
// ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ProfitabilityTier {
    Alta,
    #[serde(rename = "Média")]
    Media,
    Baixa,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfitabilityEntry {
    pub id: Uuid,
    pub nome: String,
    pub custo_producao: Decimal,
    pub preco_venda: Decimal,
    pub quantidade_produzida: Decimal,
    pub quantidade_vendida: Decimal,
    pub receita_total: Decimal,
    pub custo_total: Decimal,
    pub lucro_total: Decimal,
    pub margem_lucro_real: Decimal,
    pub margem_lucro_configurada: Decimal,
    pub classificacao: ProfitabilityTier,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfitabilityData {
    pub produtos: Vec<ProfitabilityEntry>,
    pub mais_rentaveis: Vec<ProfitabilityEntry>,
    pub menos_rentaveis: Vec<ProfitabilityEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfitabilitySummary {
    pub total_produtos: usize,
    pub receita_total: Decimal,
    pub custo_total: Decimal,
    pub lucro_total: Decimal,
    pub margem_media: Decimal,
    pub alta: usize,
    pub media: usize,
    pub baixa: usize,
}

// ---
// 8. Curva ABC de Insumos
// ---
// A ordem das variantes é a ordem de "qualidade": A < B < C.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub enum AbcClass {
    A,
    B,
    C,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AbcEntry {
    pub id: Uuid,
    pub nome: String,
    pub quantidade_consumida: Decimal,
    pub valor_total: Decimal,
    pub percentual: Decimal,
    pub percentual_acumulado: Decimal,
    pub classe: AbcClass,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AbcData {
    pub insumos: Vec<AbcEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AbcSummary {
    pub total_insumos: usize,
    pub valor_total: Decimal,
    pub classe_a: usize,
    pub classe_b: usize,
    pub classe_c: usize,
    pub valor_classe_a: Decimal,
    pub valor_classe_b: Decimal,
    pub valor_classe_c: Decimal,
}

// ---
// 9. Desperdício / Perdas
// ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum LossReason {
    #[serde(rename = "Saldo Negativo")]
    SaldoNegativo,
    Vencimento,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LossEntry {
    pub id: Uuid,
    pub nome: String,
    pub tipo: EntityKind,
    pub motivo: LossReason,
    pub quantidade: Decimal,
    pub valor_perda: Decimal,
    pub lote: Option<String>,
    pub data_validade: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct WasteData {
    pub perdas: Vec<LossEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WasteSummary {
    pub total_perdas: usize,
    pub valor_total_perdas: Decimal,
    pub perdas_vencimento: usize,
    pub perdas_saldo_negativo: usize,
    pub valor_vencimento: Decimal,
    pub valor_saldo_negativo: Decimal,
    pub percentual_vencimento: Decimal,
    pub percentual_saldo_negativo: Decimal,
}
