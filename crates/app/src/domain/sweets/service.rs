//! Sweets service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::sweets::{
        data::{NewSweet, SweetFilter, SweetUpdate},
        errors::SweetsServiceError,
        records::{SweetRecord, SweetUuid},
        repository::PgSweetsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgSweetsService {
    db: Db,
    repository: PgSweetsRepository,
}

impl PgSweetsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgSweetsRepository::new(),
        }
    }
}

#[async_trait]
impl SweetsService for PgSweetsService {
    async fn list_sweets(&self, filter: SweetFilter) -> Result<Vec<SweetRecord>, SweetsServiceError> {
        let mut tx = self.db.begin().await?;

        let sweets = self.repository.list_sweets(&mut tx, &filter).await?;

        tx.commit().await?;

        Ok(sweets)
    }

    async fn get_sweet(&self, sweet: SweetUuid) -> Result<SweetRecord, SweetsServiceError> {
        let mut tx = self.db.begin().await?;

        let sweet = self.repository.get_sweet(&mut tx, sweet).await?;

        tx.commit().await?;

        Ok(sweet)
    }

    async fn create_sweet(&self, sweet: NewSweet) -> Result<SweetRecord, SweetsServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_sweet(&mut tx, &sweet).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_sweet(
        &self,
        sweet: SweetUuid,
        update: SweetUpdate,
    ) -> Result<SweetRecord, SweetsServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self.repository.update_sweet(&mut tx, sweet, &update).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_sweet(&self, sweet: SweetUuid) -> Result<(), SweetsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_sweet(&mut tx, sweet).await?;

        if rows_affected == 0 {
            return Err(SweetsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn purchase_sweet(
        &self,
        sweet: SweetUuid,
        amount: i64,
    ) -> Result<SweetRecord, SweetsServiceError> {
        if amount <= 0 {
            return Err(SweetsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin().await?;

        let Some(updated) = self.repository.purchase_sweet(&mut tx, sweet, amount).await? else {
            // The conditional update matched nothing: either the sweet does
            // not exist, or stock is short. A read inside the same
            // transaction tells the two apart.
            return match self.repository.get_sweet(&mut tx, sweet).await {
                Ok(_) => Err(SweetsServiceError::InsufficientStock),
                Err(sqlx::Error::RowNotFound) => Err(SweetsServiceError::NotFound),
                Err(error) => Err(error.into()),
            };
        };

        tx.commit().await?;

        Ok(updated)
    }

    async fn restock_sweet(
        &self,
        sweet: SweetUuid,
        amount: i64,
    ) -> Result<SweetRecord, SweetsServiceError> {
        if amount <= 0 {
            return Err(SweetsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin().await?;

        let Some(updated) = self.repository.restock_sweet(&mut tx, sweet, amount).await? else {
            return Err(SweetsServiceError::NotFound);
        };

        tx.commit().await?;

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait SweetsService: Send + Sync {
    /// Retrieves sweets matching the filter, newest first.
    async fn list_sweets(&self, filter: SweetFilter) -> Result<Vec<SweetRecord>, SweetsServiceError>;

    /// Retrieve a single sweet.
    async fn get_sweet(&self, sweet: SweetUuid) -> Result<SweetRecord, SweetsServiceError>;

    /// Creates a new sweet.
    async fn create_sweet(&self, sweet: NewSweet) -> Result<SweetRecord, SweetsServiceError>;

    /// Replaces the mutable fields of a sweet.
    async fn update_sweet(
        &self,
        sweet: SweetUuid,
        update: SweetUpdate,
    ) -> Result<SweetRecord, SweetsServiceError>;

    /// Deletes a sweet with the given UUID.
    async fn delete_sweet(&self, sweet: SweetUuid) -> Result<(), SweetsServiceError>;

    /// Decrement stock by `amount`, failing when it would cross zero.
    async fn purchase_sweet(
        &self,
        sweet: SweetUuid,
        amount: i64,
    ) -> Result<SweetRecord, SweetsServiceError>;

    /// Increment stock by `amount`. No upper bound.
    async fn restock_sweet(
        &self,
        sweet: SweetUuid,
        amount: i64,
    ) -> Result<SweetRecord, SweetsServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    fn new_sweet(name: &str, category: &str, price: Decimal, quantity: u64) -> NewSweet {
        NewSweet {
            uuid: SweetUuid::new(),
            name: name.to_string(),
            category: category.to_string(),
            price,
            quantity,
        }
    }

    #[tokio::test]
    async fn create_sweet_returns_given_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let price: Decimal = "10.50".parse()?;

        let sweet = ctx
            .sweets
            .create_sweet(new_sweet("Ladoo", "Indian", price, 5))
            .await?;

        assert_eq!(sweet.name, "Ladoo");
        assert_eq!(sweet.category, "Indian");
        assert_eq!(sweet.price, price);
        assert_eq!(sweet.quantity, 5);

        Ok(())
    }

    #[tokio::test]
    async fn create_sweet_negative_price_returns_invalid_data() -> TestResult {
        let ctx = TestContext::new().await;
        let price: Decimal = "-1.00".parse()?;

        let result = ctx
            .sweets
            .create_sweet(new_sweet("Ladoo", "Indian", price, 5))
            .await;

        assert!(
            matches!(result, Err(SweetsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_sweet_empty_name_returns_invalid_data() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx
            .sweets
            .create_sweet(new_sweet("", "Indian", "1.00".parse()?, 5))
            .await;

        assert!(
            matches!(result, Err(SweetsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn get_sweet_returns_created_sweet() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .sweets
            .create_sweet(new_sweet("Barfi", "Indian", "4.25".parse()?, 12))
            .await?;

        let fetched = ctx.sweets.get_sweet(created.uuid).await?;

        assert_eq!(fetched.uuid, created.uuid);
        assert_eq!(fetched.quantity, 12);

        Ok(())
    }

    #[tokio::test]
    async fn get_sweet_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.sweets.get_sweet(SweetUuid::new()).await;

        assert!(
            matches!(result, Err(SweetsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_sweets_returns_newest_first() -> TestResult {
        let ctx = TestContext::new().await;

        let first = ctx
            .sweets
            .create_sweet(new_sweet("Fudge", "Western", "2.00".parse()?, 3))
            .await?;

        let second = ctx
            .sweets
            .create_sweet(new_sweet("Toffee", "Western", "1.50".parse()?, 9))
            .await?;

        let sweets = ctx.sweets.list_sweets(SweetFilter::default()).await?;
        let uuids: Vec<SweetUuid> = sweets.iter().map(|s| s.uuid).collect();

        assert!(uuids.contains(&first.uuid), "first sweet should be listed");
        assert!(uuids.contains(&second.uuid), "second sweet should be listed");

        Ok(())
    }

    #[tokio::test]
    async fn list_sweets_filters_by_category_and_search() -> TestResult {
        let ctx = TestContext::new().await;

        let ladoo = ctx
            .sweets
            .create_sweet(new_sweet("Ladoo", "Indian", "10.50".parse()?, 5))
            .await?;

        ctx.sweets
            .create_sweet(new_sweet("Toffee", "Western", "1.50".parse()?, 9))
            .await?;

        let by_category = ctx
            .sweets
            .list_sweets(SweetFilter {
                category: Some("Indian".to_string()),
                ..SweetFilter::default()
            })
            .await?;

        assert_eq!(by_category.len(), 1);
        assert_eq!(by_category[0].uuid, ladoo.uuid);

        let by_search = ctx
            .sweets
            .list_sweets(SweetFilter {
                search: Some("lad".to_string()),
                ..SweetFilter::default()
            })
            .await?;

        assert_eq!(by_search.len(), 1);
        assert_eq!(by_search[0].uuid, ladoo.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn list_sweets_filters_by_price_range() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.sweets
            .create_sweet(new_sweet("Ladoo", "Indian", "10.50".parse()?, 5))
            .await?;

        let toffee = ctx
            .sweets
            .create_sweet(new_sweet("Toffee", "Western", "1.50".parse()?, 9))
            .await?;

        let cheap = ctx
            .sweets
            .list_sweets(SweetFilter {
                max_price: Some("5.00".parse()?),
                ..SweetFilter::default()
            })
            .await?;

        assert_eq!(cheap.len(), 1);
        assert_eq!(cheap[0].uuid, toffee.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn update_sweet_replaces_fields() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .sweets
            .create_sweet(new_sweet("Barfi", "Indian", "4.25".parse()?, 12))
            .await?;

        let updated = ctx
            .sweets
            .update_sweet(
                created.uuid,
                SweetUpdate {
                    name: "Kaju Barfi".to_string(),
                    category: "Indian".to_string(),
                    price: "5.00".parse()?,
                    quantity: 20,
                },
            )
            .await?;

        assert_eq!(updated.uuid, created.uuid);
        assert_eq!(updated.name, "Kaju Barfi");
        assert_eq!(updated.quantity, 20);
        assert_eq!(updated.created_at, created.created_at);

        Ok(())
    }

    #[tokio::test]
    async fn update_sweet_unknown_uuid_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx
            .sweets
            .update_sweet(
                SweetUuid::new(),
                SweetUpdate {
                    name: "Ghost".to_string(),
                    category: "None".to_string(),
                    price: "1.00".parse()?,
                    quantity: 1,
                },
            )
            .await;

        assert!(
            matches!(result, Err(SweetsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_sweet_makes_it_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .sweets
            .create_sweet(new_sweet("Fudge", "Western", "2.00".parse()?, 3))
            .await?;

        ctx.sweets.delete_sweet(created.uuid).await?;

        let result = ctx.sweets.get_sweet(created.uuid).await;

        assert!(
            matches!(result, Err(SweetsServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_sweet_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.sweets.delete_sweet(SweetUuid::new()).await;

        assert!(
            matches!(result, Err(SweetsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn purchase_decrements_quantity() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .sweets
            .create_sweet(new_sweet("Ladoo", "Indian", "10.50".parse()?, 5))
            .await?;

        let updated = ctx.sweets.purchase_sweet(created.uuid, 2).await?;

        assert_eq!(updated.quantity, 3);

        Ok(())
    }

    #[tokio::test]
    async fn purchase_entire_stock_leaves_zero() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .sweets
            .create_sweet(new_sweet("Fudge", "Western", "2.00".parse()?, 4))
            .await?;

        let updated = ctx.sweets.purchase_sweet(created.uuid, 4).await?;

        assert_eq!(updated.quantity, 0);

        Ok(())
    }

    #[tokio::test]
    async fn purchase_beyond_stock_fails_and_leaves_quantity_unchanged() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .sweets
            .create_sweet(new_sweet("Ladoo", "Indian", "10.50".parse()?, 3))
            .await?;

        let result = ctx.sweets.purchase_sweet(created.uuid, 10).await;

        assert!(
            matches!(result, Err(SweetsServiceError::InsufficientStock)),
            "expected InsufficientStock, got {result:?}"
        );

        let fetched = ctx.sweets.get_sweet(created.uuid).await?;

        assert_eq!(fetched.quantity, 3, "failed purchase must not mutate stock");

        Ok(())
    }

    #[tokio::test]
    async fn purchase_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.sweets.purchase_sweet(SweetUuid::new(), 1).await;

        assert!(
            matches!(result, Err(SweetsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn purchase_non_positive_amount_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .sweets
            .create_sweet(new_sweet("Fudge", "Western", "2.00".parse()?, 4))
            .await?;

        for amount in [0, -1] {
            let result = ctx.sweets.purchase_sweet(created.uuid, amount).await;

            assert!(
                matches!(result, Err(SweetsServiceError::InvalidQuantity)),
                "expected InvalidQuantity for {amount}, got {result:?}"
            );
        }

        let fetched = ctx.sweets.get_sweet(created.uuid).await?;

        assert_eq!(fetched.quantity, 4);

        Ok(())
    }

    #[tokio::test]
    async fn restock_increments_quantity() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .sweets
            .create_sweet(new_sweet("Toffee", "Western", "1.50".parse()?, 9))
            .await?;

        let updated = ctx.sweets.restock_sweet(created.uuid, 6).await?;

        assert_eq!(updated.quantity, 15);

        Ok(())
    }

    #[tokio::test]
    async fn restock_non_positive_amount_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .sweets
            .create_sweet(new_sweet("Toffee", "Western", "1.50".parse()?, 9))
            .await?;

        for amount in [0, -5] {
            let result = ctx.sweets.restock_sweet(created.uuid, amount).await;

            assert!(
                matches!(result, Err(SweetsServiceError::InvalidQuantity)),
                "expected InvalidQuantity for {amount}, got {result:?}"
            );
        }

        Ok(())
    }

    #[tokio::test]
    async fn restock_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.sweets.restock_sweet(SweetUuid::new(), 5).await;

        assert!(
            matches!(result, Err(SweetsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn purchase_then_overdraw_scenario() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .sweets
            .create_sweet(new_sweet("Ladoo", "Indian", "10.50".parse()?, 5))
            .await?;

        let after_first = ctx.sweets.purchase_sweet(created.uuid, 2).await?;

        assert_eq!(after_first.quantity, 3);

        let overdraw = ctx.sweets.purchase_sweet(created.uuid, 10).await;

        assert!(
            matches!(overdraw, Err(SweetsServiceError::InsufficientStock)),
            "expected InsufficientStock, got {overdraw:?}"
        );

        let fetched = ctx.sweets.get_sweet(created.uuid).await?;

        assert_eq!(fetched.quantity, 3);

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_purchases_never_oversell() -> TestResult {
        let ctx = TestContext::new().await;

        // Stock of 5 with two concurrent purchases of 3: each passes the
        // check in isolation, together they would overdraw. At most one may
        // win.
        let created = ctx
            .sweets
            .create_sweet(new_sweet("Ladoo", "Indian", "10.50".parse()?, 5))
            .await?;

        let (a, b) = tokio::join!(
            ctx.sweets.purchase_sweet(created.uuid, 3),
            ctx.sweets.purchase_sweet(created.uuid, 3),
        );

        let successes = [&a, &b].iter().filter(|r| r.is_ok()).count();

        assert_eq!(successes, 1, "exactly one purchase should win, got {a:?} / {b:?}");

        let fetched = ctx.sweets.get_sweet(created.uuid).await?;

        assert_eq!(fetched.quantity, 2, "5 - 3 with one winner leaves 2");

        Ok(())
    }
}
