use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Display name identifying a participant in an expense-sharing group.
///
/// Names are the identity: payer and split-set lookups are exact,
/// case-sensitive string matches.
///
/// # Examples
///
/// ```
/// use share_ledger::core::participant::ParticipantName;
///
/// let alice = ParticipantName::new("Alice");
/// let bob = ParticipantName::new("Bob");
/// assert_ne!(alice, bob);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantName(String);

impl ParticipantName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the string representation of this name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for ParticipantName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ParticipantName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Errors raised while editing a roster.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RosterError {
    #[error("participant name must not be empty")]
    EmptyName,
    #[error("participant {0} is already on the roster")]
    Duplicate(ParticipantName),
}

/// Ordered roster of participants with distinct names.
///
/// Roster order is significant: balance tables are laid out in it and the
/// settlement optimizer uses it to break ties between equal balances.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ParticipantName>", into = "Vec<ParticipantName>")]
pub struct Roster {
    participants: Vec<ParticipantName>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a roster from names, rejecting blanks and duplicates.
    pub fn from_names<I, N>(names: I) -> Result<Self, RosterError>
    where
        I: IntoIterator<Item = N>,
        N: Into<ParticipantName>,
    {
        let mut roster = Self::new();
        for name in names {
            roster.add(name.into())?;
        }
        Ok(roster)
    }

    /// Append a participant. Surrounding whitespace is trimmed first.
    pub fn add(&mut self, name: ParticipantName) -> Result<(), RosterError> {
        let name = ParticipantName::new(name.as_str().trim());
        if name.is_blank() {
            return Err(RosterError::EmptyName);
        }
        if self.contains(&name) {
            return Err(RosterError::Duplicate(name));
        }
        self.participants.push(name);
        Ok(())
    }

    /// Remove a participant, returning whether they were present.
    pub fn remove(&mut self, name: &ParticipantName) -> bool {
        let before = self.participants.len();
        self.participants.retain(|p| p != name);
        self.participants.len() != before
    }

    pub fn contains(&self, name: &ParticipantName) -> bool {
        self.participants.contains(name)
    }

    pub fn as_slice(&self) -> &[ParticipantName] {
        &self.participants
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParticipantName> {
        self.participants.iter()
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}

impl TryFrom<Vec<ParticipantName>> for Roster {
    type Error = RosterError;

    fn try_from(names: Vec<ParticipantName>) -> Result<Self, Self::Error> {
        Self::from_names(names)
    }
}

impl From<Roster> for Vec<ParticipantName> {
    fn from(roster: Roster) -> Self {
        roster.participants
    }
}

impl AsRef<[ParticipantName]> for Roster {
    fn as_ref(&self) -> &[ParticipantName] {
        &self.participants
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_equality() {
        let a = ParticipantName::new("Alice");
        let b = ParticipantName::new("Alice");
        let c = ParticipantName::new("alice");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_name_display() {
        let p = ParticipantName::new("Bob");
        assert_eq!(format!("{}", p), "Bob");
    }

    #[test]
    fn test_roster_preserves_insertion_order() {
        let roster = Roster::from_names(["Carol", "Alice", "Bob"]).unwrap();
        let names: Vec<&str> = roster.iter().map(|p| p.as_str()).collect();
        assert_eq!(names, vec!["Carol", "Alice", "Bob"]);
    }

    #[test]
    fn test_roster_trims_names() {
        let mut roster = Roster::new();
        roster.add(ParticipantName::new("  Dana ")).unwrap();
        assert!(roster.contains(&ParticipantName::new("Dana")));
    }

    #[test]
    fn test_roster_rejects_duplicate() {
        let mut roster = Roster::from_names(["Alice"]).unwrap();
        let err = roster.add(ParticipantName::new("Alice ")).unwrap_err();
        assert_eq!(err, RosterError::Duplicate(ParticipantName::new("Alice")));
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_roster_rejects_blank() {
        let mut roster = Roster::new();
        assert_eq!(
            roster.add(ParticipantName::new("   ")),
            Err(RosterError::EmptyName)
        );
        assert!(roster.is_empty());
    }

    #[test]
    fn test_roster_remove() {
        let mut roster = Roster::from_names(["Alice", "Bob"]).unwrap();
        assert!(roster.remove(&ParticipantName::new("Alice")));
        assert!(!roster.remove(&ParticipantName::new("Alice")));
        assert_eq!(roster.as_slice(), &[ParticipantName::new("Bob")]);
    }

    #[test]
    fn test_roster_deserialize_rejects_duplicates() {
        let result: Result<Roster, _> = serde_json::from_str(r#"["Alice", "Alice"]"#);
        assert!(result.is_err());
    }
}
