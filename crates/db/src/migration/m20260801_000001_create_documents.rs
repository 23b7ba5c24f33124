//! Initial migration: the `boekhoud_documents` table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DOCUMENTS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS boekhoud_documents CASCADE;")
            .await?;
        Ok(())
    }
}

const DOCUMENTS_SQL: &str = r"
-- Ingested bookkeeping documents
CREATE TABLE boekhoud_documents (
    id UUID PRIMARY KEY,
    kind VARCHAR(32) NOT NULL
        CHECK (kind IN ('sales_invoice', 'purchase_invoice', 'receipt', 'bank_statement')),
    status VARCHAR(32) NOT NULL DEFAULT 'needs_review'
        CHECK (status IN ('needs_review', 'approved', 'rejected')),
    counterparty TEXT,
    invoice_number TEXT,
    invoice_date DATE,
    due_date DATE,
    period_start DATE,
    period_end DATE,
    amount_excl_vat NUMERIC(14, 2),
    vat_amount NUMERIC(14, 2),
    amount_incl_vat NUMERIC(14, 2),
    currency VARCHAR(3) NOT NULL DEFAULT 'EUR',
    booked_date DATE,
    tags JSONB NOT NULL DEFAULT '[]'::jsonb,
    notes TEXT,
    vat_lines JSONB NOT NULL DEFAULT '[]'::jsonb,
    file_url TEXT,
    storage_path TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    -- Incl = excl + vat whenever all three are present
    CONSTRAINT chk_totals_reconcile CHECK (
        amount_excl_vat IS NULL OR vat_amount IS NULL OR amount_incl_vat IS NULL
        OR amount_incl_vat = amount_excl_vat + vat_amount
    )
);

-- Review queue and aggregation queries filter by status
CREATE INDEX idx_boekhoud_documents_status ON boekhoud_documents(status);

-- Period filtering reads approved documents ordered by invoice date
CREATE INDEX idx_boekhoud_documents_status_invoice_date
    ON boekhoud_documents(status, invoice_date DESC);
";
