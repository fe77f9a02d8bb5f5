use diesel::prelude::*;

use crate::{
    domain::product::{
        NewProduct as DomainNewProduct, Product as DomainProduct, ProductListQuery,
        UpdateProduct as DomainUpdateProduct,
    },
    models::product::{
        NewProduct as DbNewProduct, Product as DbProduct, UpdateProduct as DbUpdateProduct,
    },
    repository::{DieselRepository, ProductReader, ProductWriter, RepositoryError, RepositoryResult},
};

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<DomainProduct>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let product = products::table
            .filter(products::id.eq(id))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        Ok(product.map(DomainProduct::from))
    }

    fn list_products(
        &self,
        query: ProductListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainProduct>)> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let ProductListQuery {
            search,
            category,
            featured_only,
            include_archived,
            pagination,
        } = query;

        let search_pattern = search.as_ref().map(|term| format!("%{term}%"));

        let mut count_query = products::table.into_boxed::<diesel::sqlite::Sqlite>();

        if !include_archived {
            count_query = count_query.filter(products::is_archived.eq(false));
        }

        if featured_only {
            count_query = count_query.filter(products::is_featured.eq(true));
        }

        if let Some(ref category_value) = category {
            count_query = count_query.filter(products::category.eq(category_value.as_str()));
        }

        if let Some(ref pattern) = search_pattern {
            count_query = count_query.filter(
                products::name
                    .like(pattern.clone())
                    .or(products::description.like(pattern.clone()))
                    .or(products::category.like(pattern.clone())),
            );
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = products::table.into_boxed::<diesel::sqlite::Sqlite>();

        if !include_archived {
            items = items.filter(products::is_archived.eq(false));
        }

        if featured_only {
            items = items.filter(products::is_featured.eq(true));
        }

        if let Some(ref category_value) = category {
            items = items.filter(products::category.eq(category_value.as_str()));
        }

        if let Some(ref pattern) = search_pattern {
            items = items.filter(
                products::name
                    .like(pattern.clone())
                    .or(products::description.like(pattern.clone()))
                    .or(products::category.like(pattern.clone())),
            );
        }

        items = items.order(products::name.asc());

        if let Some(pagination) = pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            let limit = pagination.per_page as i64;
            items = items.offset(offset).limit(limit);
        }

        let db_products = items.load::<DbProduct>(&mut conn)?;

        Ok((
            total,
            db_products.into_iter().map(DomainProduct::from).collect(),
        ))
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &DomainNewProduct) -> RepositoryResult<DomainProduct> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let created = diesel::insert_into(products::table)
            .values(&DbNewProduct::from(new_product))
            .get_result::<DbProduct>(&mut conn)?;

        Ok(created.into())
    }

    fn update_product(
        &self,
        product_id: i32,
        updates: &DomainUpdateProduct,
    ) -> RepositoryResult<DomainProduct> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let updated = diesel::update(products::table.filter(products::id.eq(product_id)))
            .set(&DbUpdateProduct::from(updates))
            .get_result::<DbProduct>(&mut conn)?;

        Ok(updated.into())
    }

    fn archive_product(&self, product_id: i32) -> RepositoryResult<()> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let archived = diesel::update(products::table.filter(products::id.eq(product_id)))
            .set((
                products::is_archived.eq(true),
                products::updated_at.eq(chrono::Utc::now().naive_utc()),
            ))
            .execute(&mut conn)?;

        if archived == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
