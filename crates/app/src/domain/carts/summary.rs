//! Cart totals and vendor grouping.

use rust_decimal::Decimal;

use crate::domain::{
    carts::records::{CartItem, Checkout, VendorCartGroup},
    users::records::UserId,
};

#[must_use]
pub fn total_quantity(items: &[CartItem]) -> u64 {
    items.iter().map(|item| u64::from(item.quantity)).sum()
}

/// Sum of line totals. Saturates at `Decimal::MAX`; carts read through
/// [`CartService`](crate::domain::carts::CartService) never get that far.
#[must_use]
pub fn total_price(items: &[CartItem]) -> Decimal {
    items.iter().fold(Decimal::ZERO, |total, item| {
        total.saturating_add(item.line_total().unwrap_or(Decimal::MAX))
    })
}

/// Partition lines by vendor, in the order each vendor first appears.
#[must_use]
pub fn group_by_vendor(items: &[CartItem]) -> Vec<VendorCartGroup> {
    let mut groups: Vec<VendorCartGroup> = Vec::new();

    for item in items {
        match groups
            .iter_mut()
            .find(|group| group.vendor.id == item.vendor.id)
        {
            Some(group) => group.items.push(item.clone()),
            None => groups.push(VendorCartGroup {
                vendor: item.vendor.clone(),
                items: vec![item.clone()],
                total_quantity: 0,
                total_price: Decimal::ZERO,
            }),
        }
    }

    for group in &mut groups {
        group.total_quantity = total_quantity(&group.items);
        group.total_price = total_price(&group.items);
    }

    groups
}

/// The grouped cart limited to one vendor, or all of them. `None` when nothing matches.
#[must_use]
pub fn checkout(items: &[CartItem], vendor: Option<UserId>) -> Option<Checkout> {
    let groups: Vec<VendorCartGroup> = group_by_vendor(items)
        .into_iter()
        .filter(|group| vendor.is_none_or(|vendor| group.vendor.id == vendor))
        .collect();

    if groups.is_empty() {
        return None;
    }

    Some(Checkout {
        total_quantity: groups.iter().map(|group| group.total_quantity).sum(),
        total_price: groups
            .iter()
            .fold(Decimal::ZERO, |total, group| total.saturating_add(group.total_price)),
        groups,
    })
}
