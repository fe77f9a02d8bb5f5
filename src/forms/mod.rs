pub mod cart;
pub mod checkout;
pub mod coupons;
pub mod orders;
pub mod products;

/// Collapse internal whitespace and trim the ends of a single-line value.
pub(crate) fn sanitize_inline_text(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Trim a multi-line value without collapsing its interior.
pub(crate) fn sanitize_multiline_text(value: &str) -> String {
    value.trim().to_string()
}
