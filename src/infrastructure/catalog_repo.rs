use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::ports::ProductRepository;
use crate::domain::product::{NewProduct, Product, ProductUpdate};
use crate::schema::products;

use super::models::{NewProductRow, ProductChangeset, ProductRow};

pub struct DieselProductRepository {
    pool: DbPool,
}

impl DieselProductRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl ProductRepository for DieselProductRepository {
    fn insert(&self, new: &NewProduct) -> Result<Product, DomainError> {
        let mut conn = self.pool.get()?;

        let row: ProductRow = diesel::insert_into(products::table)
            .values(&NewProductRow {
                id: Uuid::new_v4(),
                name: new.name.clone(),
                description: new.description.clone(),
                price: new.price.clone(),
                original_price: new.original_price.clone(),
                discount: new.discount,
                image_url: new.image_url.clone(),
                category: new.category.clone(),
                stock: new.stock,
                featured: new.featured,
            })
            .returning(ProductRow::as_returning())
            .get_result(&mut conn)?;

        Ok(row.into())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = products::table
            .find(id)
            .select(ProductRow::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(row.map(Into::into))
    }

    fn list(&self) -> Result<Vec<Product>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = products::table
            .order(products::created_at.desc())
            .select(ProductRow::as_select())
            .load(&mut conn)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn featured(&self, limit: i64) -> Result<Vec<Product>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = products::table
            .filter(products::featured.eq(true))
            .order(products::created_at.desc())
            .limit(limit)
            .select(ProductRow::as_select())
            .load(&mut conn)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn by_category(&self, category: &str) -> Result<Vec<Product>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = products::table
            .filter(products::category.eq(category))
            .order(products::created_at.desc())
            .select(ProductRow::as_select())
            .load(&mut conn)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn search(&self, term: &str) -> Result<Vec<Product>, DomainError> {
        let mut conn = self.pool.get()?;

        let pattern = format!(
            "%{}%",
            term.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
        );
        let rows = products::table
            .filter(
                products::name
                    .ilike(pattern.clone())
                    .or(products::description.ilike(pattern.clone()))
                    .or(products::category.ilike(pattern)),
            )
            .order(products::created_at.desc())
            .select(ProductRow::as_select())
            .load(&mut conn)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn update(&self, id: Uuid, changes: &ProductUpdate) -> Result<Product, DomainError> {
        let mut conn = self.pool.get()?;

        let changeset = ProductChangeset {
            name: changes.name.clone(),
            description: changes.description.clone(),
            price: changes.price.clone(),
            original_price: changes.original_price.clone(),
            discount: changes.discount,
            image_url: changes.image_url.clone(),
            category: changes.category.clone(),
            stock: changes.stock,
            featured: changes.featured,
        };

        let row: Option<ProductRow> = diesel::update(products::table.find(id))
            .set((changeset, products::updated_at.eq(diesel::dsl::now)))
            .returning(ProductRow::as_returning())
            .get_result(&mut conn)
            .optional()?;

        row.map(Into::into).ok_or(DomainError::NotFound)
    }

    fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        let deleted = diesel::delete(products::table.find(id)).execute(&mut conn)?;
        if deleted == 0 {
            return Err(DomainError::NotFound);
        }
        Ok(())
    }

    fn adjust_stock(&self, id: Uuid, delta: i32) -> Result<Product, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let row = products::table
                .filter(products::id.eq(id))
                .select(ProductRow::as_select())
                .for_update()
                .load(conn)?
                .into_iter()
                .next()
                .ok_or(DomainError::NotFound)?;

            let next = row.stock + delta;
            if next < 0 {
                return Err(DomainError::Validation("insufficient stock".to_string()));
            }

            let updated: ProductRow = diesel::update(products::table.find(id))
                .set((
                    products::stock.eq(next),
                    products::updated_at.eq(diesel::dsl::now),
                ))
                .returning(ProductRow::as_returning())
                .get_result(conn)?;

            Ok(updated.into())
        })
    }
}
