//! Client-side search, pagination and row selection over cached lists.

use std::collections::BTreeSet;

use domain::{Account, AppointmentResponse, Identified, PaymentResponse, PaymentStatus, PropertyResponse};

/// Rows that can be matched against a lowercase search needle.
pub trait Searchable {
    fn haystack(&self) -> Vec<&str>;

    fn matches(&self, needle: &str) -> bool {
        self.haystack()
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

impl Searchable for PropertyResponse {
    fn haystack(&self) -> Vec<&str> {
        vec![self.category.as_str(), self.location.as_str(), self.status.as_str()]
    }
}

impl Searchable for Account {
    fn haystack(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str(), self.role.as_str()]
    }
}

impl Searchable for AppointmentResponse {
    fn haystack(&self) -> Vec<&str> {
        vec![self.user.as_str(), self.description.as_str()]
    }
}

impl Searchable for PaymentResponse {
    fn haystack(&self) -> Vec<&str> {
        let status = match self.status {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Cancelled => "cancelled",
        };
        vec![self.property.as_str(), status]
    }
}

#[derive(Debug, Clone)]
pub struct DataTable<T> {
    rows: Vec<T>,
    query: String,
    page_index: usize,
    page_size: usize,
    selected: BTreeSet<String>,
}

impl<T: Searchable + Identified> DataTable<T> {
    pub fn new(rows: Vec<T>, page_size: usize) -> Self {
        Self {
            rows,
            query: String::new(),
            page_index: 0,
            page_size: page_size.max(1),
            selected: BTreeSet::new(),
        }
    }

    /// Replace the rows, e.g. after the cache changed; stale selections are dropped.
    pub fn set_rows(&mut self, rows: Vec<T>) {
        self.rows = rows;
        let rows = &self.rows;
        self.selected.retain(|id| rows.iter().any(|row| row.id() == id));
        self.page_index = self.page_index.min(self.page_count().saturating_sub(1));
    }

    pub fn search(&mut self, query: &str) {
        self.query = query.trim().to_lowercase();
        self.page_index = 0;
    }

    pub fn filtered(&self) -> Vec<&T> {
        self.rows
            .iter()
            .filter(|row| self.query.is_empty() || row.matches(&self.query))
            .collect()
    }

    pub fn page(&self) -> Vec<&T> {
        self.filtered()
            .into_iter()
            .skip(self.page_index * self.page_size)
            .take(self.page_size)
            .collect()
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// At least one page, even when empty.
    pub fn page_count(&self) -> usize {
        self.filtered().len().div_ceil(self.page_size).max(1)
    }

    pub fn can_next_page(&self) -> bool {
        self.page_index + 1 < self.page_count()
    }

    pub fn can_previous_page(&self) -> bool {
        self.page_index > 0
    }

    pub fn next_page(&mut self) {
        if self.can_next_page() {
            self.page_index += 1;
        }
    }

    pub fn previous_page(&mut self) {
        self.page_index = self.page_index.saturating_sub(1);
    }

    pub fn toggle(&mut self, id: &str) {
        if !self.selected.remove(id) {
            self.selected.insert(id.to_string());
        }
    }

    /// Ids handed to a bulk delete.
    pub fn selected_ids(&self) -> Vec<String> {
        self.selected.iter().cloned().collect()
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::Role;

    fn account(id: &str, name: &str) -> Account {
        Account {
            id: id.to_string(),
            name: name.to_string(),
            email: format!("{}@example.com", id),
            role: Role::Client,
            address: None,
            contact_number: None,
        }
    }

    fn accounts(count: usize) -> Vec<Account> {
        (0..count)
            .map(|i| account(&format!("a{}", i), &format!("Client {}", i)))
            .collect()
    }

    #[test]
    fn test_pagination_walks_pages() {
        let mut table = DataTable::new(accounts(7), 3);
        assert_eq!(table.page_count(), 3);
        assert!(!table.can_previous_page());

        table.next_page();
        table.next_page();
        table.next_page();
        assert_eq!(table.page_index(), 2);
        assert_eq!(table.page().len(), 1);
    }

    #[test]
    fn test_search_resets_to_first_page() {
        let mut table = DataTable::new(accounts(7), 3);
        table.next_page();
        table.search("Client 6");

        assert_eq!(table.page_index(), 0);
        let ids: Vec<_> = table.page().iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["a6"]);
    }

    #[test]
    fn test_selection_survives_only_for_existing_rows() {
        let mut table = DataTable::new(accounts(3), 10);
        table.toggle("a0");
        table.toggle("a2");
        table.toggle("a0");
        assert_eq!(table.selected_ids(), vec!["a2".to_string()]);

        table.set_rows(accounts(2));
        assert!(table.selected_ids().is_empty());
    }

    #[test]
    fn test_empty_table_has_one_page() {
        let table: DataTable<Account> = DataTable::new(Vec::new(), 10);
        assert_eq!(table.page_count(), 1);
        assert!(table.page().is_empty());
    }
}
