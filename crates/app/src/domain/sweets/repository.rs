//! Sweets Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::sweets::{
    data::{NewSweet, SweetFilter, SweetUpdate},
    records::{SweetRecord, SweetUuid},
};

const LIST_SWEETS_SQL: &str = include_str!("sql/list_sweets.sql");
const GET_SWEET_SQL: &str = include_str!("sql/get_sweet.sql");
const CREATE_SWEET_SQL: &str = include_str!("sql/create_sweet.sql");
const UPDATE_SWEET_SQL: &str = include_str!("sql/update_sweet.sql");
const DELETE_SWEET_SQL: &str = include_str!("sql/delete_sweet.sql");
const PURCHASE_SWEET_SQL: &str = include_str!("sql/purchase_sweet.sql");
const RESTOCK_SWEET_SQL: &str = include_str!("sql/restock_sweet.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgSweetsRepository;

impl PgSweetsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_sweets(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &SweetFilter,
    ) -> Result<Vec<SweetRecord>, sqlx::Error> {
        query_as::<Postgres, SweetRecord>(LIST_SWEETS_SQL)
            .bind(filter.category.as_deref())
            .bind(filter.search.as_deref())
            .bind(filter.min_price)
            .bind(filter.max_price)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_sweet(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        sweet: SweetUuid,
    ) -> Result<SweetRecord, sqlx::Error> {
        query_as::<Postgres, SweetRecord>(GET_SWEET_SQL)
            .bind(sweet.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_sweet(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        sweet: &NewSweet,
    ) -> Result<SweetRecord, sqlx::Error> {
        query_as::<Postgres, SweetRecord>(CREATE_SWEET_SQL)
            .bind(sweet.uuid.into_uuid())
            .bind(&sweet.name)
            .bind(&sweet.category)
            .bind(sweet.price)
            .bind(try_into_db_quantity(sweet.quantity)?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_sweet(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        sweet: SweetUuid,
        update: &SweetUpdate,
    ) -> Result<SweetRecord, sqlx::Error> {
        query_as::<Postgres, SweetRecord>(UPDATE_SWEET_SQL)
            .bind(sweet.into_uuid())
            .bind(&update.name)
            .bind(&update.category)
            .bind(update.price)
            .bind(try_into_db_quantity(update.quantity)?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_sweet(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        sweet: SweetUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_SWEET_SQL)
            .bind(sweet.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Decrement stock if and only if `amount` units are on hand.
    ///
    /// The sufficiency check and the write are one conditional statement, so
    /// concurrent purchases against the same row serialize on the row lock
    /// and `None` means either "no such sweet" or "not enough stock".
    pub(crate) async fn purchase_sweet(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        sweet: SweetUuid,
        amount: i64,
    ) -> Result<Option<SweetRecord>, sqlx::Error> {
        query_as::<Postgres, SweetRecord>(PURCHASE_SWEET_SQL)
            .bind(sweet.into_uuid())
            .bind(amount)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn restock_sweet(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        sweet: SweetUuid,
        amount: i64,
    ) -> Result<Option<SweetRecord>, sqlx::Error> {
        query_as::<Postgres, SweetRecord>(RESTOCK_SWEET_SQL)
            .bind(sweet.into_uuid())
            .bind(amount)
            .fetch_optional(&mut **tx)
            .await
    }
}

fn try_into_db_quantity(quantity: u64) -> Result<i64, sqlx::Error> {
    i64::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
        index: "quantity".to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for SweetRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let quantity_i64: i64 = row.try_get("quantity")?;

        let quantity = u64::try_from(quantity_i64).map_err(|e| sqlx::Error::ColumnDecode {
            index: "quantity".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: SweetUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            category: row.try_get("category")?,
            price: row.try_get::<Decimal, _>("price")?,
            quantity,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
