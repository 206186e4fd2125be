// src/models/production.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Uma produção aponta para uma Ficha OU para um Produto, nunca os dois.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "camelCase")]
pub enum ProductionTarget {
    Recipe(Uuid),
    Product(Uuid),
}

// Registro de produção (lote). Imutável depois de criado.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionRecord {
    pub id: Uuid,
    pub target: ProductionTarget,
    pub target_name: String,
    pub produced_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub quantity: Decimal,
    pub lot: String,
}

impl ProductionRecord {
    pub fn recipe_id(&self) -> Option<Uuid> {
        match self.target {
            ProductionTarget::Recipe(id) => Some(id),
            ProductionTarget::Product(_) => None,
        }
    }

    pub fn product_id(&self) -> Option<Uuid> {
        match self.target {
            ProductionTarget::Product(id) => Some(id),
            ProductionTarget::Recipe(_) => None,
        }
    }
}
