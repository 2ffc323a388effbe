//! In-memory filtering and pagination of fetched lists

use serde::Deserialize;

use super::models::Transaction;
use super::types::{TransactionStatus, TransactionType};

/// One page of an already fetched list
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number after clamping
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// 1-based position of the first item on this page, 0 when empty
    pub fn first_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.page - 1) * self.per_page + 1
        }
    }

    pub fn last_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            self.first_index() + self.items.len() - 1
        }
    }
}

/// Cut one page out of `items`
///
/// Page numbers are clamped into `1..=total_pages`; an empty list still has
/// one (empty) page. A zero page size is treated as one.
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total = items.len();
    let total_pages = total.div_ceil(per_page).max(1);
    let page = page.clamp(1, total_pages);

    let items = items
        .into_iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .collect();

    Page {
        items,
        page,
        per_page,
        total,
        total_pages,
    }
}

/// Query of the transaction list
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TransactionFilter {
    /// `pending`, `approved`, `rejected` or empty for all
    pub status: String,
    /// `income`, `expense` or empty for all
    #[serde(rename = "type")]
    pub tx_type: String,
    /// Free text matched against event name, category and description
    pub q: String,
    pub page: Option<usize>,
}

impl TransactionFilter {
    pub fn matches(&self, tx: &Transaction) -> bool {
        if let Ok(status) = self.status.parse::<TransactionStatus>() {
            if tx.status != status {
                return false;
            }
        }
        if let Ok(tx_type) = self.tx_type.parse::<TransactionType>() {
            if tx.tx_type != tx_type {
                return false;
            }
        }

        let needle = self.q.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [&tx.event_name, &tx.category, &tx.description]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    pub fn apply(&self, transactions: Vec<Transaction>) -> Vec<Transaction> {
        transactions.into_iter().filter(|tx| self.matches(tx)).collect()
    }

    /// Query string for links that keep the filter and change the page
    pub fn query_for_page(&self, page: usize) -> String {
        let mut parts = Vec::new();
        if !self.status.is_empty() {
            parts.push(format!("status={}", urlencoding::encode(&self.status)));
        }
        if !self.tx_type.is_empty() {
            parts.push(format!("type={}", urlencoding::encode(&self.tx_type)));
        }
        if !self.q.is_empty() {
            parts.push(format!("q={}", urlencoding::encode(&self.q)));
        }
        parts.push(format!("page={}", page));
        parts.join("&")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate_basic() {
        let page = paginate((1..=45).collect::<Vec<_>>(), 2, 20);
        assert_eq!(page.items.first(), Some(&21));
        assert_eq!(page.items.len(), 20);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_prev());
        assert!(page.has_next());
        assert_eq!((page.first_index(), page.last_index()), (21, 40));
    }

    #[test]
    fn test_paginate_last_page_size() {
        let page = paginate((1..=45).collect::<Vec<_>>(), 3, 20);
        assert_eq!(page.items, vec![41, 42, 43, 44, 45]);
        assert!(!page.has_next());
    }

    #[test]
    fn test_paginate_clamps_page() {
        let items: Vec<u32> = (1..=10).collect();
        assert_eq!(paginate(items.clone(), 0, 4).page, 1);
        assert_eq!(paginate(items.clone(), 99, 4).page, 3);
        assert_eq!(paginate(items, 99, 4).items, vec![9, 10]);
    }

    #[test]
    fn test_paginate_empty() {
        let page = paginate(Vec::<u32>::new(), 5, 20);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());
        assert_eq!(page.first_index(), 0);
        assert!(!page.has_prev() && !page.has_next());
    }

    fn sample() -> Vec<Transaction> {
        vec![
            Transaction {
                id: "1".to_string(),
                tx_type: TransactionType::Income,
                event_name: "Ibadah Minggu".to_string(),
                category: "Persembahan".to_string(),
                status: TransactionStatus::Approved,
                ..Default::default()
            },
            Transaction {
                id: "2".to_string(),
                tx_type: TransactionType::Expense,
                event_name: "Rapat Pengurus".to_string(),
                category: "Konsumsi".to_string(),
                description: "Snack rapat".to_string(),
                status: TransactionStatus::Pending,
                ..Default::default()
            },
            Transaction {
                id: "3".to_string(),
                tx_type: TransactionType::Expense,
                event_name: "Retreat".to_string(),
                category: "Transport".to_string(),
                status: TransactionStatus::Rejected,
                ..Default::default()
            },
        ]
    }

    fn ids(txs: &[Transaction]) -> Vec<&str> {
        txs.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_filter_by_status_and_type() {
        let filter = TransactionFilter {
            status: "pending".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(sample())), ["2"]);

        let filter = TransactionFilter {
            tx_type: "expense".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(sample())), ["2", "3"]);
    }

    #[test]
    fn test_filter_text_is_case_insensitive() {
        let filter = TransactionFilter {
            q: "SNACK".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(sample())), ["2"]);

        let filter = TransactionFilter {
            q: "transport".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(sample())), ["3"]);
    }

    #[test]
    fn test_empty_filter_keeps_all() {
        assert_eq!(TransactionFilter::default().apply(sample()).len(), 3);
    }

    #[test]
    fn test_query_for_page() {
        let filter = TransactionFilter {
            status: "pending".to_string(),
            q: "rapat pengurus".to_string(),
            ..Default::default()
        };
        assert_eq!(filter.query_for_page(2), "status=pending&q=rapat%20pengurus&page=2");
    }
}
