//! A month in a four-person flat share.
//!
//! Records a handful of expenses, prints everyone's balance, then the
//! payments that square things up.

use share_ledger::analysis::filter::ExpenseFilter;
use share_ledger::core::category::Category;
use share_ledger::core::expense::Expense;
use share_ledger::core::participant::ParticipantName;
use share_ledger::group::expense_group::ExpenseGroup;

fn main() {
    println!("╔══════════════════════════════════════════╗");
    println!("║  share-ledger: House Share Example       ║");
    println!("╚══════════════════════════════════════════╝\n");

    let mut group = ExpenseGroup::new();
    for name in ["Alice", "Bob", "Carol", "Dan"] {
        group.add_participant(name).expect("names are distinct");
    }

    let expenses = [
        ("Alice", 1200.0, vec![], "Rent", "Rent"),
        ("Bob", 84.60, vec![], "Broadband", "Internet"),
        ("Carol", 63.30, vec!["Carol", "Dan"], "Takeaway", "Entertainment"),
        ("Dan", 17.25, vec!["Alice", "Bob"], "Cleaning supplies", "Household Items"),
        ("Carol", 142.87, vec![], "Big shop", "Groceries"),
    ];

    for (payer, amount, split, description, category) in expenses {
        let split_with = split.into_iter().map(|n| ParticipantName::new(n)).collect();
        group
            .add_expense(
                Expense::new(ParticipantName::new(payer), amount, split_with)
                    .with_description(description)
                    .with_category(Category::new(category)),
            )
            .expect("demo expenses are valid");
    }

    let summary = group.summary();
    println!("{}", summary.balances);
    println!("{}", summary.settlements);

    println!("{}", group.stats());

    let groceries = ExpenseFilter::new().with_category(Category::new("Groceries"));
    println!("━━━ Groceries only ━━━\n");
    for expense in group.filtered(&groceries) {
        println!(
            "  {:<20} {:>8.2}  paid by {}",
            expense.description(),
            expense.amount(),
            expense.paid_by()
        );
    }
}
