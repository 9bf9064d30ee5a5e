//! How roster order breaks ties and how sub-cent residuals disappear.

use share_ledger::core::balance::{Balance, BalanceTable};
use share_ledger::core::participant::ParticipantName;
use share_ledger::settlement::optimizer::SettlementOptimizer;
use share_ledger::settlement::rounding::SETTLEMENT_EPSILON;

fn table(rows: &[(&str, f64)]) -> (Vec<ParticipantName>, BalanceTable) {
    let roster: Vec<ParticipantName> = rows
        .iter()
        .map(|(n, _)| ParticipantName::new(*n))
        .collect();
    let balances = BalanceTable::from_entries(rows.iter().map(|(n, v)| {
        let balance = if *v >= 0.0 {
            Balance::new(*v, 0.0)
        } else {
            Balance::new(0.0, -*v)
        };
        (ParticipantName::new(*n), balance)
    }));
    (roster, balances)
}

fn main() {
    println!("╔═══════════════════════════════════════════════╗");
    println!("║  share-ledger: Tie-breaks and Residuals       ║");
    println!("╚═══════════════════════════════════════════════╝\n");

    println!("━━━ Equal creditors, roster order A, B ━━━\n");
    let (roster, balances) = table(&[("A", 10.0), ("B", 10.0), ("C", -20.0)]);
    print!("{}", SettlementOptimizer::compute_settlements(&roster, &balances));

    println!("\n━━━ Same balances, roster order B, A ━━━\n");
    let reordered: Vec<ParticipantName> = ["B", "A", "C"]
        .iter()
        .map(|n| ParticipantName::new(*n))
        .collect();
    print!("{}", SettlementOptimizer::compute_settlements(&reordered, &balances));

    println!("\n━━━ Residuals under {} are dropped ━━━\n", SETTLEMENT_EPSILON);
    let (roster, balances) = table(&[("A", 10.004), ("B", 0.006), ("C", -10.01)]);
    print!("{}", SettlementOptimizer::compute_settlements(&roster, &balances));
    println!("\n  B's 0.006 is below one cent, so no transfer is proposed for it.");
}
