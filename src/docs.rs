// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Reports ---
        handlers::reports::get_report,
        handlers::reports::list_report_types,
    ),
    components(
        schemas(
            // --- Envelope ---
            models::report::ReportType,
            models::report::ReportTypeEntry,
            models::report::Report,
            models::report::EntityKind,

            // --- Custos ---
            models::report::CostData,
            models::report::CostSummary,
            models::report::ProductCostEntry,
            models::report::RecipeCostEntry,

            // --- Produção ---
            models::report::ProductionData,
            models::report::ProductionSummary,
            models::report::ProductionEntry,

            // --- Estoque ---
            models::stock::MovementType,
            models::report::InventoryData,
            models::report::InventorySummary,
            models::report::StockEntry,

            // --- Fichas ---
            models::report::RecipeUsageData,
            models::report::RecipeUsageSummary,
            models::report::RecipeUsageEntry,
            models::report::CategoryCount,

            // --- Rentabilidade ---
            models::report::ProfitabilityTier,
            models::report::ProfitabilityData,
            models::report::ProfitabilitySummary,
            models::report::ProfitabilityEntry,

            // --- Curva ABC ---
            models::report::AbcClass,
            models::report::AbcData,
            models::report::AbcSummary,
            models::report::AbcEntry,

            // --- Desperdício ---
            models::report::LossReason,
            models::report::WasteData,
            models::report::WasteSummary,
            models::report::LossEntry,
        )
    ),
    tags(
        (name = "Reports", description = "Relatórios gerenciais da cozinha (custos, estoque, perdas...)")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
