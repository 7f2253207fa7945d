//! Savings-goal forecast command

use anyhow::Result;

use spendcoach_core::months::{latest_month, month_key};
use spendcoach_core::{
    context, goal_forecast, suggest_cuts, SuggestionConfig, Transaction,
};

use super::truncate;

pub fn cmd_forecast(rows: &[Transaction], income: f64, goal: f64, months: u32) -> Result<()> {
    let (_, expense) = context::prepare(rows);

    let expense_monthly = match latest_month(&expense) {
        Some(current) => expense
            .iter()
            .filter(|tx| month_key(tx.date) == current)
            .map(|tx| tx.amount)
            .sum(),
        None => 0.0,
    };

    let forecast = goal_forecast(income, expense_monthly, goal, months);

    println!();
    println!("🎯 Goal Forecast");
    println!("   Goal: ${:.0} in {} months", goal, months);
    println!(
        "   Income ${:.2}/mo, spending ${:.2}/mo, surplus ${:.2}/mo",
        income, expense_monthly, forecast.surplus
    );
    println!("   {}", forecast.message);

    if forecast.on_track {
        return Ok(());
    }

    let suggestions = suggest_cuts(
        &expense,
        forecast.need_per_month,
        &SuggestionConfig::default(),
    );
    if suggestions.is_empty() {
        return Ok(());
    }

    println!();
    println!("   Suggested cuts to close the gap:");
    println!(
        "   {:25} │ {:>10} │ {:>10}",
        "Category", "Current", "Cut"
    );
    println!("   {:─<25}─┼─{:─<10}─┼─{:─<10}", "", "", "");
    for s in &suggestions {
        println!(
            "   {:25} │ {:>10.2} │ {:>10.2}",
            truncate(&s.category, 25),
            s.current,
            s.suggested_cut
        );
    }

    Ok(())
}
