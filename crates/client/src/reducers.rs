//! Pure cache reducers: `(old state, mutation result) -> new state`.
//!
//! Hooks hand these to [`QueryCache::set_query_data`](crate::cache::QueryCache::set_query_data);
//! none of them touch the network or the cache.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use domain::{Identified, Listing};

/// Add a created item to the end of a cached collection.
pub fn append<L: Listing>(old: Option<L>, item: L::Item) -> Option<L> {
    let mut listing = old.unwrap_or_default();
    listing.items_mut().push(item);
    Some(listing)
}

/// Swap the item with the same id; the collection is left alone when absent.
pub fn replace_by_id<L: Listing>(old: Option<L>, item: L::Item) -> Option<L> {
    let mut listing = old?;
    if let Some(slot) = listing
        .items_mut()
        .iter_mut()
        .find(|existing| existing.id() == item.id())
    {
        *slot = item;
    }
    Some(listing)
}

pub fn remove_by_id<L: Listing>(old: Option<L>, id: &str) -> Option<L> {
    let mut listing = old?;
    listing.items_mut().retain(|item| item.id() != id);
    Some(listing)
}

pub fn remove_many<L: Listing>(old: Option<L>, ids: &[String]) -> Option<L> {
    let mut listing = old?;
    listing
        .items_mut()
        .retain(|item| !ids.iter().any(|id| id == item.id()));
    Some(listing)
}

/// Shallow-merge the fields of `update` into a cached single item.
///
/// Null fields in the update keep the cached value. Falls back to the update
/// itself when nothing is cached or the merge does not decode.
pub fn merge_item<T>(old: Option<T>, update: T) -> Option<T>
where
    T: Serialize + DeserializeOwned,
{
    let Some(old) = old else {
        return Some(update);
    };

    let merged = match (serde_json::to_value(&old), serde_json::to_value(&update)) {
        (Ok(Value::Object(mut base)), Ok(Value::Object(patch))) => {
            base.extend(patch.into_iter().filter(|(_, v)| !v.is_null()));
            serde_json::from_value(Value::Object(base)).ok()
        }
        _ => None,
    };
    Some(merged.unwrap_or(update))
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{PaymentResponse, PaymentStatus, Payments};

    fn payment(id: &str, amount: f64) -> PaymentResponse {
        PaymentResponse {
            id: id.to_string(),
            property: "prop-1".into(),
            appointment: None,
            user: Some("acc-1".into()),
            amount,
            status: PaymentStatus::Pending,
            created_at: Some("2024-01-01T00:00:00.000Z".into()),
            updated_at: None,
        }
    }

    fn listing(items: Vec<PaymentResponse>) -> Option<Payments> {
        Some(Payments { payments: items })
    }

    #[test]
    fn test_append_starts_empty_collection() {
        let result = append::<Payments>(None, payment("a", 1.0)).unwrap();
        assert_eq!(result.payments.len(), 1);

        let result = append(Some(result), payment("b", 2.0)).unwrap();
        let ids: Vec<_> = result.payments.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn test_replace_by_id_keeps_order() {
        let old = listing(vec![payment("a", 1.0), payment("b", 2.0)]);
        let result = replace_by_id(old, payment("a", 9.0)).unwrap();
        assert_eq!(result.payments[0].amount, 9.0);
        assert_eq!(result.payments[1].id, "b");
    }

    #[test]
    fn test_replace_unknown_id_changes_nothing() {
        let old = listing(vec![payment("a", 1.0)]);
        assert_eq!(replace_by_id(old.clone(), payment("z", 5.0)), old);
        assert_eq!(replace_by_id::<Payments>(None, payment("z", 5.0)), None);
    }

    #[test]
    fn test_remove_by_id_and_many() {
        let old = listing(vec![payment("a", 1.0), payment("b", 2.0), payment("c", 3.0)]);
        let result = remove_by_id(old.clone(), "b").unwrap();
        assert!(result.payments.iter().all(|p| p.id != "b"));

        let result = remove_many(old, &["a".to_string(), "c".to_string()]).unwrap();
        assert_eq!(result.payments, vec![payment("b", 2.0)]);
    }

    #[test]
    fn test_merge_item_keeps_cached_fields_on_null() {
        let cached = payment("a", 1.0);
        let mut update = payment("a", 4.0);
        update.created_at = None;
        update.status = PaymentStatus::Paid;

        let merged = merge_item(Some(cached), update).unwrap();
        assert_eq!(merged.amount, 4.0);
        assert_eq!(merged.status, PaymentStatus::Paid);
        assert_eq!(merged.created_at.as_deref(), Some("2024-01-01T00:00:00.000Z"));
    }
}
