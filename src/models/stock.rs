// src/models/stock.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// "entrada" soma ao saldo, "saida" subtrai.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[sqlx(type_name = "movement_type", rename_all = "lowercase")] // Banco
#[serde(rename_all = "lowercase")] // API
pub enum MovementType {
    Entrada,
    Saida,
}

impl MovementType {
    /// Quantidade com o sinal da movimentação.
    pub fn signed(self, quantity: Decimal) -> Decimal {
        match self {
            MovementType::Entrada => quantity,
            MovementType::Saida => -quantity,
        }
    }
}

// Uma movimentação aponta para um Insumo OU para um Produto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "camelCase")]
pub enum StockTarget {
    Ingredient(Uuid),
    Product(Uuid),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockMovement {
    pub id: Uuid,
    pub target: StockTarget,
    pub kind: MovementType,
    pub quantity: Decimal,
    pub lot: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
