use crate::core::balance::BalanceTable;
use crate::core::participant::ParticipantName;
use crate::settlement::rounding::{round_to_cents, SETTLEMENT_EPSILON};
use log::debug;
use serde::{Deserialize, Serialize};

/// Headline placed at the front of every settlement plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementMarker {
    /// At least one creditor and one debtor exist.
    Recommended,
    /// Nobody needs to pay anybody.
    NoneNeeded,
}

impl SettlementMarker {
    pub fn text(&self) -> &'static str {
        match self {
            SettlementMarker::Recommended => "Recommended Settlements",
            SettlementMarker::NoneNeeded => "No settlements needed at this time",
        }
    }

    /// Display key of the marker row.
    pub fn key(&self) -> &'static str {
        match self {
            SettlementMarker::Recommended => "header",
            SettlementMarker::NoneNeeded => "no-settlements",
        }
    }
}

/// `from` pays `to` the given amount, already rounded to cents.
///
/// `debtor_index` and `creditor_index` are the positions of both sides in
/// the optimizer's sorted debtor and creditor lists when the transfer was
/// made.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementInstruction {
    pub from: ParticipantName,
    pub to: ParticipantName,
    pub amount: f64,
    pub debtor_index: usize,
    pub creditor_index: usize,
}

impl SettlementInstruction {
    /// Display key, unique within a plan: `payment-{debtor}-{creditor}`.
    pub fn key(&self) -> String {
        format!("payment-{}-{}", self.debtor_index, self.creditor_index)
    }
}

impl std::fmt::Display for SettlementInstruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} pays {} ${:.2}", self.from, self.to, self.amount)
    }
}

/// One entry of a settlement plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SettlementItem {
    Marker {
        marker: SettlementMarker,
        text: String,
    },
    Transfer(SettlementInstruction),
}

impl SettlementItem {
    /// Stable key for list rendering.
    pub fn key(&self) -> String {
        match self {
            SettlementItem::Marker { marker, .. } => marker.key().to_string(),
            SettlementItem::Transfer(instruction) => instruction.key(),
        }
    }
}

/// Ordered output of the optimizer: a marker, then zero or more transfers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementPlan {
    marker: SettlementMarker,
    instructions: Vec<SettlementInstruction>,
}

impl SettlementPlan {
    fn settled() -> Self {
        Self {
            marker: SettlementMarker::NoneNeeded,
            instructions: Vec::new(),
        }
    }

    pub fn marker(&self) -> SettlementMarker {
        self.marker
    }

    pub fn instructions(&self) -> &[SettlementInstruction] {
        &self.instructions
    }

    pub fn is_settled(&self) -> bool {
        self.marker == SettlementMarker::NoneNeeded
    }

    /// The plan as a flat sequence: marker first, then transfers in order.
    pub fn items(&self) -> Vec<SettlementItem> {
        let mut items = Vec::with_capacity(self.instructions.len() + 1);
        items.push(SettlementItem::Marker {
            marker: self.marker,
            text: self.marker.text().to_string(),
        });
        items.extend(
            self.instructions
                .iter()
                .cloned()
                .map(SettlementItem::Transfer),
        );
        items
    }

    /// Sum of all rounded transfer amounts.
    pub fn total_transferred(&self) -> f64 {
        self.instructions.iter().map(|i| i.amount).sum()
    }

    /// Total a participant pays out under this plan.
    pub fn paid_by(&self, name: &ParticipantName) -> f64 {
        self.instructions
            .iter()
            .filter(|i| &i.from == name)
            .map(|i| i.amount)
            .sum()
    }

    /// Total a participant receives under this plan.
    pub fn received_by(&self, name: &ParticipantName) -> f64 {
        self.instructions
            .iter()
            .filter(|i| &i.to == name)
            .map(|i| i.amount)
            .sum()
    }
}

impl std::fmt::Display for SettlementPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== {} ===", self.marker.text())?;
        for instruction in &self.instructions {
            writeln!(f, "  {}", instruction)?;
        }
        Ok(())
    }
}

/// Remaining amount a creditor is owed or a debtor owes.
#[derive(Debug)]
struct OpenPosition<'a> {
    name: &'a ParticipantName,
    amount: f64,
}

/// Greedy largest-creditor / largest-debtor matcher.
///
/// The result is not guaranteed to be the minimum number of transfers
/// (that is a subset-sum problem), but it zeroes every balance down to
/// [`SETTLEMENT_EPSILON`] using at most `creditors + debtors - 1`
/// instructions.
pub struct SettlementOptimizer;

impl SettlementOptimizer {
    /// Turn a balance table into a settlement plan.
    ///
    /// # Algorithm
    ///
    /// 1. Walk the roster; positive balances become creditors, negative
    ///    balances become debtors (by magnitude).
    /// 2. Stable-sort both descending, so equal amounts keep roster order.
    /// 3. With no creditors or no debtors, stop with
    ///    [`SettlementMarker::NoneNeeded`].
    /// 4. Match the current creditor and debtor for `min` of the two,
    ///    emit it rounded to cents if that is positive, subtract the
    ///    unrounded amount from both, and move past whichever side has less
    ///    than [`SETTLEMENT_EPSILON`] left. Repeat until a side runs out.
    ///
    /// Residuals under the epsilon are dropped.
    pub fn compute_settlements(
        roster: &[ParticipantName],
        balances: &BalanceTable,
    ) -> SettlementPlan {
        let mut creditors: Vec<OpenPosition<'_>> = Vec::new();
        let mut debtors: Vec<OpenPosition<'_>> = Vec::new();

        for name in roster {
            let Some(balance) = balances.get(name) else {
                continue;
            };
            if balance.balance > 0.0 {
                creditors.push(OpenPosition {
                    name,
                    amount: balance.balance,
                });
            } else if balance.balance < 0.0 {
                debtors.push(OpenPosition {
                    name,
                    amount: -balance.balance,
                });
            }
        }

        if creditors.is_empty() || debtors.is_empty() {
            return SettlementPlan::settled();
        }

        // sort_by is stable: equal amounts stay in roster order.
        creditors.sort_by(|a, b| b.amount.total_cmp(&a.amount));
        debtors.sort_by(|a, b| b.amount.total_cmp(&a.amount));

        let mut instructions = Vec::new();
        let mut c = 0;
        let mut d = 0;
        while c < creditors.len() && d < debtors.len() {
            let transfer = creditors[c].amount.min(debtors[d].amount);
            let rounded = round_to_cents(transfer);
            if rounded > 0.0 {
                instructions.push(SettlementInstruction {
                    from: debtors[d].name.clone(),
                    to: creditors[c].name.clone(),
                    amount: rounded,
                    debtor_index: d,
                    creditor_index: c,
                });
            }

            creditors[c].amount -= transfer;
            debtors[d].amount -= transfer;

            // Negated comparison so a NaN remainder also advances.
            if !(creditors[c].amount >= SETTLEMENT_EPSILON) {
                c += 1;
            }
            if !(debtors[d].amount >= SETTLEMENT_EPSILON) {
                d += 1;
            }
        }

        let plan = SettlementPlan {
            marker: SettlementMarker::Recommended,
            instructions,
        };
        debug!(
            "settlement plan: {} creditors, {} debtors, {} transfers, {:.2} of {:.2} moved",
            creditors.len(),
            debtors.len(),
            plan.instructions.len(),
            plan.total_transferred(),
            balances.total_outstanding()
        );
        plan
    }
}
