use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::coupon::{Coupon as DomainCoupon, NewCoupon as DomainNewCoupon};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::coupons)]
pub struct Coupon {
    pub id: i32,
    pub code: String,
    pub discount_percent: i32,
    pub expires_at: NaiveDateTime,
    pub is_active: bool,
    pub usage_count: i32,
    pub max_usage: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::coupons)]
pub struct NewCoupon<'a> {
    pub code: &'a str,
    pub discount_percent: i32,
    pub expires_at: NaiveDateTime,
    pub max_usage: i32,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::coupon_usages)]
pub struct NewCouponUsage {
    pub coupon_id: i32,
    pub user_id: i32,
    pub used_at: NaiveDateTime,
}

impl From<Coupon> for DomainCoupon {
    fn from(value: Coupon) -> Self {
        Self {
            id: value.id,
            code: value.code,
            discount_percent: value.discount_percent,
            expires_at: value.expires_at,
            is_active: value.is_active,
            usage_count: value.usage_count,
            max_usage: value.max_usage,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewCoupon> for NewCoupon<'a> {
    fn from(value: &'a DomainNewCoupon) -> Self {
        Self {
            code: value.code.as_str(),
            discount_percent: value.discount_percent,
            expires_at: value.expires_at,
            max_usage: value.max_usage,
            updated_at: value.updated_at,
        }
    }
}
