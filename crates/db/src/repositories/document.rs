//! Document repository for database operations.
//!
//! Implements the core document persistence trait using SeaORM. Row shapes
//! coming back from the store are parsed strictly: an unknown kind or status
//! is a repository error, never silently defaulted.

use chrono::Utc;
use sea_orm::sea_query::NullOrdering;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use boekhoud_core::document::{
    DocumentError, DocumentKind, DocumentRepository as DocumentRepoTrait, DocumentStatus,
    DocumentUpdate, FinancialDocument,
};
use boekhoud_shared::types::DocumentId;

use crate::entities::documents;

/// Document repository implementation.
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    db: DatabaseConnection,
}

impl DocumentRepository {
    /// Create a new document repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn ordered_query() -> sea_orm::Select<documents::Entity> {
        documents::Entity::find()
            .order_by_with_nulls(
                documents::Column::InvoiceDate,
                Order::Desc,
                NullOrdering::Last,
            )
            .order_by_desc(documents::Column::CreatedAt)
    }
}

impl DocumentRepoTrait for DocumentRepository {
    async fn create(
        &self,
        document: FinancialDocument,
    ) -> Result<FinancialDocument, DocumentError> {
        let active_model = documents::ActiveModel {
            id: Set(document.id.into_inner()),
            kind: Set(document.kind.as_str().to_string()),
            status: Set(document.status.as_str().to_string()),
            counterparty: Set(document.counterparty.clone()),
            invoice_number: Set(document.invoice_number.clone()),
            invoice_date: Set(document.invoice_date),
            due_date: Set(document.due_date),
            period_start: Set(document.period_start),
            period_end: Set(document.period_end),
            amount_excl_vat: Set(document.amount_excl_vat),
            vat_amount: Set(document.vat_amount),
            amount_incl_vat: Set(document.amount_incl_vat),
            currency: Set(document.currency.clone()),
            booked_date: Set(document.booked_date),
            tags: Set(to_json(&document.tags)?),
            notes: Set(document.notes.clone()),
            vat_lines: Set(to_json(&document.vat_lines)?),
            file_url: Set(document.file_url.clone()),
            storage_path: Set(document.storage_path.clone()),
            created_at: Set(document.created_at.into()),
            updated_at: Set(Utc::now().into()),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| DocumentError::repository(e.to_string()))?;

        to_domain(model)
    }

    async fn find_by_id(
        &self,
        id: DocumentId,
    ) -> Result<Option<FinancialDocument>, DocumentError> {
        let model = documents::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(|e| DocumentError::repository(e.to_string()))?;

        model.map(to_domain).transpose()
    }

    async fn list_by_status(
        &self,
        status: DocumentStatus,
    ) -> Result<Vec<FinancialDocument>, DocumentError> {
        let models = Self::ordered_query()
            .filter(documents::Column::Status.eq(status.as_str()))
            .all(&self.db)
            .await
            .map_err(|e| DocumentError::repository(e.to_string()))?;

        models.into_iter().map(to_domain).collect()
    }

    async fn list_all(&self) -> Result<Vec<FinancialDocument>, DocumentError> {
        let models = Self::ordered_query()
            .all(&self.db)
            .await
            .map_err(|e| DocumentError::repository(e.to_string()))?;

        models.into_iter().map(to_domain).collect()
    }

    async fn update_review(
        &self,
        id: DocumentId,
        update: DocumentUpdate,
    ) -> Result<FinancialDocument, DocumentError> {
        // Single UPDATE by primary key; last write wins, no conflict
        // detection between concurrent reviewers.
        let active_model = documents::ActiveModel {
            id: Set(id.into_inner()),
            kind: Set(update.kind.as_str().to_string()),
            status: Set(update.status.as_str().to_string()),
            counterparty: Set(update.counterparty.clone()),
            invoice_number: Set(update.invoice_number.clone()),
            invoice_date: Set(update.invoice_date),
            due_date: Set(update.due_date),
            booked_date: Set(update.booked_date),
            amount_excl_vat: Set(update.amount_excl_vat),
            vat_amount: Set(update.vat_amount),
            amount_incl_vat: Set(update.amount_incl_vat),
            tags: Set(to_json(&update.tags)?),
            notes: Set(update.notes.clone()),
            vat_lines: Set(to_json(&update.vat_lines)?),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        };

        let model = active_model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => DocumentError::NotFound(id),
            other => DocumentError::repository(other.to_string()),
        })?;

        to_domain(model)
    }

    async fn count_by_status(&self, status: DocumentStatus) -> Result<u64, DocumentError> {
        documents::Entity::find()
            .filter(documents::Column::Status.eq(status.as_str()))
            .count(&self.db)
            .await
            .map_err(|e| DocumentError::repository(e.to_string()))
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, DocumentError> {
    serde_json::to_value(value).map_err(|e| DocumentError::repository(e.to_string()))
}

/// Convert a database row into the domain type, validating enums and JSON.
fn to_domain(model: documents::Model) -> Result<FinancialDocument, DocumentError> {
    let kind = DocumentKind::parse(&model.kind)
        .ok_or_else(|| DocumentError::repository(format!("unknown document kind '{}'", model.kind)))?;
    let status = DocumentStatus::parse(&model.status).ok_or_else(|| {
        DocumentError::repository(format!("unknown document status '{}'", model.status))
    })?;
    let tags: Vec<String> = serde_json::from_value(model.tags)
        .map_err(|e| DocumentError::repository(format!("invalid tags payload: {e}")))?;
    let vat_lines = serde_json::from_value(model.vat_lines)
        .map_err(|e| DocumentError::repository(format!("invalid vat_lines payload: {e}")))?;

    Ok(FinancialDocument {
        id: DocumentId::from_uuid(model.id),
        kind,
        counterparty: model.counterparty,
        invoice_number: model.invoice_number,
        invoice_date: model.invoice_date,
        due_date: model.due_date,
        period_start: model.period_start,
        period_end: model.period_end,
        amount_excl_vat: model.amount_excl_vat,
        vat_amount: model.vat_amount,
        amount_incl_vat: model.amount_incl_vat,
        currency: model.currency,
        status,
        booked_date: model.booked_date,
        tags,
        notes: model.notes,
        vat_lines,
        file_url: model.file_url,
        storage_path: model.storage_path,
        created_at: model.created_at.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn row() -> documents::Model {
        documents::Model {
            id: Uuid::now_v7(),
            kind: "purchase_invoice".to_string(),
            status: "approved".to_string(),
            counterparty: Some("Leverancier".to_string()),
            invoice_number: Some("L-42".to_string()),
            invoice_date: chrono::NaiveDate::from_ymd_opt(2025, 3, 1),
            due_date: None,
            period_start: None,
            period_end: None,
            amount_excl_vat: Some(dec!(400.00)),
            vat_amount: Some(dec!(84.00)),
            amount_incl_vat: Some(dec!(484.00)),
            currency: "EUR".to_string(),
            booked_date: None,
            tags: serde_json::json!(["inkoop"]),
            notes: None,
            vat_lines: serde_json::json!([
                { "rate": "21", "base": "400.00", "tax": "84.00" }
            ]),
            file_url: Some("http://cdn/files/1-l42.pdf".to_string()),
            storage_path: Some("1-l42.pdf".to_string()),
            created_at: chrono::Utc::now().into(),
            updated_at: chrono::Utc::now().into(),
        }
    }

    #[test]
    fn test_to_domain_parses_row() {
        let doc = to_domain(row()).expect("valid row");
        assert_eq!(doc.kind, DocumentKind::PurchaseInvoice);
        assert_eq!(doc.status, DocumentStatus::Approved);
        assert_eq!(doc.tags, vec!["inkoop".to_string()]);
        assert_eq!(doc.vat_lines.len(), 1);
        assert_eq!(doc.vat_lines[0].rate, dec!(21));
        assert_eq!(doc.vat_lines[0].tax, dec!(84.00));
    }

    #[test]
    fn test_to_domain_rejects_unknown_kind() {
        let mut model = row();
        model.kind = "credit_note".to_string();
        let err = to_domain(model).unwrap_err();
        assert!(err.to_string().contains("credit_note"));
    }

    #[test]
    fn test_to_domain_rejects_unknown_status() {
        let mut model = row();
        model.status = "archived".to_string();
        assert!(to_domain(model).is_err());
    }

    #[test]
    fn test_to_domain_rejects_malformed_vat_lines() {
        let mut model = row();
        model.vat_lines = serde_json::json!({ "rate": 21 });
        assert!(to_domain(model).is_err());
    }
}
