use crate::core::category::Category;
use crate::core::participant::ParticipantName;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// A cost fronted by one participant and shared by a split set.
///
/// The balance aggregator reads only `amount`, `paid_by` and `split_with`.
/// An empty split set means "everyone on the roster". The remaining fields
/// are bookkeeping for display, filtering and statistics.
///
/// Expenses are immutable once created.
///
/// # Examples
///
/// ```
/// use share_ledger::core::expense::Expense;
/// use share_ledger::core::participant::ParticipantName;
///
/// let dinner = Expense::new(ParticipantName::new("Alice"), 90.0, vec![])
///     .with_description("Dinner");
///
/// assert_eq!(dinner.amount(), 90.0);
/// assert!(dinner.splits_with_everyone());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    #[serde(default = "Uuid::new_v4", deserialize_with = "deserialize_id")]
    id: Uuid,
    #[serde(default)]
    description: String,
    /// Not validated here; callers decide what amounts they accept.
    amount: f64,
    #[serde(alias = "paidBy")]
    paid_by: ParticipantName,
    #[serde(default, alias = "splitWith")]
    split_with: Vec<ParticipantName>,
    #[serde(default)]
    category: Category,
    #[serde(default = "today")]
    date: NaiveDate,
    #[serde(default = "Utc::now")]
    created_at: DateTime<Utc>,
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Ids are UUIDs, but documents saved by the mobile app carry a
/// millisecond timestamp instead.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredId {
    Uuid(Uuid),
    Timestamp(u64),
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<Uuid, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StoredId::deserialize(deserializer)? {
        StoredId::Uuid(id) => id,
        StoredId::Timestamp(millis) => Uuid::from_u128(u128::from(millis)),
    })
}

impl Expense {
    pub fn new(paid_by: ParticipantName, amount: f64, split_with: Vec<ParticipantName>) -> Self {
        let created_at = Utc::now();
        Self {
            id: Uuid::new_v4(),
            description: String::new(),
            amount,
            paid_by,
            split_with,
            category: Category::default(),
            date: created_at.date_naive(),
            created_at,
        }
    }

    /// Replace the generated id (useful for testing / determinism).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    // --- Accessors ---

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn paid_by(&self) -> &ParticipantName {
        &self.paid_by
    }

    pub fn split_with(&self) -> &[ParticipantName] {
        &self.split_with
    }

    pub fn splits_with_everyone(&self) -> bool {
        self.split_with.is_empty()
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Expenses in insertion order.
///
/// Order matters: aggregation sums in this order, which keeps results
/// reproducible bit for bit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseSet {
    expenses: Vec<Expense>,
}

impl ExpenseSet {
    pub fn new() -> Self {
        Self {
            expenses: Vec::new(),
        }
    }

    pub fn add(&mut self, expense: Expense) {
        self.expenses.push(expense);
    }

    /// Remove the expense with the given id.
    pub fn remove(&mut self, id: Uuid) -> Option<Expense> {
        let idx = self.expenses.iter().position(|e| e.id() == id)?;
        Some(self.expenses.remove(idx))
    }

    pub fn get(&self, id: Uuid) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id() == id)
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Sum of all expense amounts.
    pub fn gross_total(&self) -> f64 {
        self.expenses.iter().map(|e| e.amount()).sum()
    }
}

impl FromIterator<Expense> for ExpenseSet {
    fn from_iter<T: IntoIterator<Item = Expense>>(iter: T) -> Self {
        Self {
            expenses: iter.into_iter().collect(),
        }
    }
}

impl AsRef<[Expense]> for ExpenseSet {
    fn as_ref(&self) -> &[Expense] {
        &self.expenses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<ParticipantName> {
        list.iter().map(|n| ParticipantName::new(*n)).collect()
    }

    #[test]
    fn test_expense_creation() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let expense = Expense::new(ParticipantName::new("Alice"), 42.5, names(&["Bob"]))
            .with_description("Internet bill")
            .with_category(Category::new("Internet"))
            .with_date(date);

        assert_eq!(expense.paid_by().as_str(), "Alice");
        assert_eq!(expense.amount(), 42.5);
        assert_eq!(expense.split_with(), names(&["Bob"]).as_slice());
        assert_eq!(expense.category().as_str(), "Internet");
        assert_eq!(expense.date(), date);
        assert!(!expense.splits_with_everyone());
    }

    #[test]
    fn test_amount_not_validated() {
        let expense = Expense::new(ParticipantName::new("Alice"), -5.0, vec![]);
        assert_eq!(expense.amount(), -5.0);
    }

    #[test]
    fn test_set_remove_by_id() {
        let first = Expense::new(ParticipantName::new("A"), 10.0, vec![]);
        let second = Expense::new(ParticipantName::new("B"), 20.0, vec![]);
        let id = first.id();
        let mut set: ExpenseSet = vec![first, second].into_iter().collect();

        assert_eq!(set.gross_total(), 30.0);
        let removed = set.remove(id).unwrap();
        assert_eq!(removed.amount(), 10.0);
        assert_eq!(set.len(), 1);
        assert!(set.remove(id).is_none());
    }

    #[test]
    fn test_deserialize_mobile_app_expense() {
        let json = r#"{
            "id": 1717171717171,
            "description": "Milk",
            "amount": 3.5,
            "paidBy": "Alice",
            "splitWith": ["Alice", "Bob"],
            "date": "2024-05-31",
            "time": "4:08:37 PM",
            "category": "Groceries"
        }"#;
        let expense: Expense = serde_json::from_str(json).unwrap();

        assert_eq!(expense.id(), Uuid::from_u128(1717171717171));
        assert_eq!(expense.paid_by().as_str(), "Alice");
        assert_eq!(expense.split_with(), names(&["Alice", "Bob"]).as_slice());
        assert_eq!(expense.date(), NaiveDate::from_ymd_opt(2024, 5, 31).unwrap());
    }

    #[test]
    fn test_deserialize_minimal_expense() {
        let expense: Expense =
            serde_json::from_str(r#"{ "amount": 12.0, "paid_by": "Alice" }"#).unwrap();
        assert!(expense.splits_with_everyone());
        assert_eq!(expense.category(), &Category::default());
        assert!(expense.description().is_empty());
    }
}
