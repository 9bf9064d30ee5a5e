use crate::core::participant::ParticipantName;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A participant's position: what they fronted, what they consumed, and the
/// difference.
///
/// A positive `balance` means the participant is owed money (creditor).
/// A negative `balance` means they owe money (debtor).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    pub paid: f64,
    pub owes: f64,
    pub balance: f64,
}

impl Balance {
    pub fn new(paid: f64, owes: f64) -> Self {
        Self {
            paid,
            owes,
            balance: paid - owes,
        }
    }

    pub fn is_creditor(&self) -> bool {
        self.balance > 0.0
    }

    pub fn is_debtor(&self) -> bool {
        self.balance < 0.0
    }
}

/// Per-participant balances laid out in roster order.
///
/// Produced wholesale by the aggregator and never patched afterwards.
/// Serializes as a JSON object keyed by participant name, keeping roster
/// order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BalanceTable {
    entries: Vec<(ParticipantName, Balance)>,
    index: HashMap<ParticipantName, usize>,
}

impl BalanceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// A zeroed table with one row per participant. Repeated names keep
    /// their first row.
    pub fn with_participants<'a, I>(participants: I) -> Self
    where
        I: IntoIterator<Item = &'a ParticipantName>,
    {
        Self::from_entries(
            participants
                .into_iter()
                .map(|name| (name.clone(), Balance::default())),
        )
    }

    /// Build a table from explicit rows. Repeated names keep their first row.
    pub fn from_entries<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (ParticipantName, Balance)>,
    {
        let mut table = Self::new();
        for (name, balance) in rows {
            if table.index.contains_key(&name) {
                continue;
            }
            table.index.insert(name.clone(), table.entries.len());
            table.entries.push((name, balance));
        }
        table
    }

    pub fn get(&self, name: &ParticipantName) -> Option<&Balance> {
        self.index.get(name).map(|&i| &self.entries[i].1)
    }

    pub(crate) fn get_mut(&mut self, name: &ParticipantName) -> Option<&mut Balance> {
        match self.index.get(name) {
            Some(&i) => Some(&mut self.entries[i].1),
            None => None,
        }
    }

    pub(crate) fn entries_mut(&mut self) -> impl Iterator<Item = &mut Balance> {
        self.entries.iter_mut().map(|(_, b)| b)
    }

    /// Net balance of a participant, zero for unknown names.
    pub fn net(&self, name: &ParticipantName) -> f64 {
        self.get(name).map(|b| b.balance).unwrap_or(0.0)
    }

    pub fn contains(&self, name: &ParticipantName) -> bool {
        self.index.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ParticipantName, &Balance)> {
        self.entries.iter().map(|(n, b)| (n, b))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of every net balance. Zero up to floating-point drift.
    pub fn total_balance(&self) -> f64 {
        self.entries.iter().map(|(_, b)| b.balance).sum()
    }

    /// Whether net balances sum to zero within `tolerance`.
    pub fn is_balanced(&self, tolerance: f64) -> bool {
        self.total_balance().abs() <= tolerance
    }

    /// Total owed to creditors (sum of positive balances).
    pub fn total_outstanding(&self) -> f64 {
        self.entries
            .iter()
            .map(|(_, b)| b.balance)
            .filter(|v| *v > 0.0)
            .sum()
    }
}

impl Serialize for BalanceTable {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, balance) in &self.entries {
            map.serialize_entry(name, balance)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for BalanceTable {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::{MapAccess, Visitor};

        struct V;
        impl<'de> Visitor<'de> for V {
            type Value = BalanceTable;
            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a map of participant name to balance")
            }
            fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<Self::Value, M::Error> {
                let mut rows = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(row) = access.next_entry::<ParticipantName, Balance>()? {
                    rows.push(row);
                }
                Ok(BalanceTable::from_entries(rows))
            }
        }
        deserializer.deserialize_map(V)
    }
}

impl std::fmt::Display for BalanceTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Balances ===")?;
        for (name, b) in &self.entries {
            let status = if b.is_creditor() {
                "CREDITOR"
            } else if b.is_debtor() {
                "DEBTOR"
            } else {
                "SETTLED"
            };
            writeln!(
                f,
                "  {:<15} paid {:>10.2}  owes {:>10.2}  balance {:>10.2}  [{}]",
                name, b.paid, b.owes, b.balance, status
            )?;
        }
        Ok(())
    }
}
