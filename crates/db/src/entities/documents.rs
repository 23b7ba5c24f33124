//! `SeaORM` Entity for the `boekhoud_documents` table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Row shape of one ingested bookkeeping document.
///
/// `kind` and `status` are text columns constrained by CHECK clauses; they
/// are parsed into the core enums on read, never trusted silently.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "boekhoud_documents")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub kind: String,
    pub status: String,
    pub counterparty: Option<String>,
    pub invoice_number: Option<String>,
    pub invoice_date: Option<Date>,
    pub due_date: Option<Date>,
    pub period_start: Option<Date>,
    pub period_end: Option<Date>,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))", nullable)]
    pub amount_excl_vat: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))", nullable)]
    pub vat_amount: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))", nullable)]
    pub amount_incl_vat: Option<Decimal>,
    pub currency: String,
    pub booked_date: Option<Date>,
    pub tags: Json,
    pub notes: Option<String>,
    pub vat_lines: Json,
    pub file_url: Option<String>,
    pub storage_path: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
