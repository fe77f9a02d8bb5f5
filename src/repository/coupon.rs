use chrono::Utc;
use diesel::prelude::*;

use crate::{
    domain::coupon::{Coupon as DomainCoupon, NewCoupon as DomainNewCoupon},
    models::coupon::{Coupon as DbCoupon, NewCoupon as DbNewCoupon, NewCouponUsage},
    repository::{CouponReader, CouponWriter, DieselRepository, RepositoryError, RepositoryResult},
};

impl CouponReader for DieselRepository {
    fn get_coupon_by_code(&self, code: &str) -> RepositoryResult<Option<DomainCoupon>> {
        use crate::schema::coupons;

        let mut conn = self.conn()?;
        let coupon = coupons::table
            .filter(coupons::code.eq(code))
            .first::<DbCoupon>(&mut conn)
            .optional()?;

        Ok(coupon.map(DomainCoupon::from))
    }
}

impl CouponWriter for DieselRepository {
    fn create_coupon(&self, new_coupon: &DomainNewCoupon) -> RepositoryResult<DomainCoupon> {
        use crate::schema::coupons;

        let mut conn = self.conn()?;
        let created = diesel::insert_into(coupons::table)
            .values(&DbNewCoupon::from(new_coupon))
            .get_result::<DbCoupon>(&mut conn)?;

        Ok(created.into())
    }

    fn deactivate_coupon(&self, coupon_id: i32) -> RepositoryResult<()> {
        use crate::schema::coupons;

        let mut conn = self.conn()?;
        let updated = diesel::update(coupons::table.filter(coupons::id.eq(coupon_id)))
            .set((
                coupons::is_active.eq(false),
                coupons::updated_at.eq(Utc::now().naive_utc()),
            ))
            .execute(&mut conn)?;

        if updated == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    fn redeem_coupon(&self, coupon_id: i32, user_id: i32) -> RepositoryResult<bool> {
        use crate::schema::{coupon_usages, coupons};

        let mut conn = self.conn()?;

        conn.transaction::<bool, RepositoryError, _>(|conn| {
            // Conditional increment: the WHERE clause guards the limit, so
            // two concurrent redemptions of the last use cannot both pass.
            let redeemed = diesel::update(
                coupons::table
                    .filter(coupons::id.eq(coupon_id))
                    .filter(coupons::usage_count.lt(coupons::max_usage)),
            )
            .set((
                coupons::usage_count.eq(coupons::usage_count + 1),
                coupons::updated_at.eq(Utc::now().naive_utc()),
            ))
            .execute(conn)?;

            if redeemed == 0 {
                return Ok(false);
            }

            let usage = NewCouponUsage {
                coupon_id,
                user_id,
                used_at: Utc::now().naive_utc(),
            };

            diesel::insert_into(coupon_usages::table)
                .values(&usage)
                .execute(conn)?;

            Ok(true)
        })
    }
}
