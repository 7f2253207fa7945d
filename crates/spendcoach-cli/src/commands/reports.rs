//! Analytics report commands

use anyhow::Result;

use spendcoach_core::{
    context, detect_anomalies, detect_subscriptions, health_score, spending_summary,
    AnomalyConfig, SubscriptionConfig, Transaction,
};

use super::truncate;

pub fn cmd_summary(rows: &[Transaction], privacy: bool) -> Result<()> {
    let summary = spending_summary(rows, privacy);

    println!();
    println!("📊 Spending Summary");
    match &summary.period {
        Some(period) => println!("   Month: {}", period),
        None => {
            println!("   No expense data.");
            return Ok(());
        }
    }
    println!("   Total: ${:.2}", summary.total_expense_month);
    println!();

    println!("   {:25} │ {:>10}", "Category", "Amount");
    println!("   {:─<25}─┼─{:─<10}", "", "");
    for cat in &summary.by_category {
        println!("   {:25} │ {:>10.2}", truncate(&cat.category, 25), cat.amount);
    }

    println!();
    println!("   {:25} │ {:>10}", "Top Merchant", "Amount");
    println!("   {:─<25}─┼─{:─<10}", "", "");
    for m in &summary.top_merchants {
        println!("   {:25} │ {:>10.2}", truncate(&m.merchant, 25), m.amount);
    }

    if let Some(coffee) = &summary.coffee {
        if coffee.coffee_spend > 0.0 {
            println!();
            println!("   ☕ {}", coffee.message);
        }
    }

    Ok(())
}

pub fn cmd_subscriptions(rows: &[Transaction], privacy: bool) -> Result<()> {
    let (_, expense) = context::prepare(rows);
    let mut subs = detect_subscriptions(&expense, &SubscriptionConfig::default());
    if privacy {
        for sub in &mut subs {
            sub.merchant = spendcoach_core::privacy::mask_merchant(&sub.merchant);
        }
    }

    println!();
    println!("🔁 Recurring Charges");
    if subs.is_empty() {
        println!("   None detected.");
        return Ok(());
    }

    println!(
        "   {:25} │ {:>8} │ {:>6} │ Months",
        "Merchant", "Charge", "Count"
    );
    println!("   {:─<25}─┼─{:─<8}─┼─{:─<6}─┼─{:─<20}", "", "", "", "");
    for sub in &subs {
        println!(
            "   {:25} │ {:>8.2} │ {:>6} │ {}",
            truncate(&sub.merchant, 25),
            sub.charge,
            sub.count,
            sub.months.join(", ")
        );
    }

    Ok(())
}

pub fn cmd_anomalies(rows: &[Transaction], threshold: f64, privacy: bool) -> Result<()> {
    let (_, expense) = context::prepare(rows);
    let config = AnomalyConfig {
        z_threshold: threshold,
    };
    let mut anomalies = detect_anomalies(&expense, &config);
    if privacy {
        for a in &mut anomalies {
            a.merchant = spendcoach_core::privacy::mask_merchant(&a.merchant);
        }
    }

    println!();
    println!("⚠️  Unusual Charges (|z| ≥ {:.1})", threshold);
    if anomalies.is_empty() {
        println!("   None flagged.");
        return Ok(());
    }

    println!(
        "   {:10} │ {:25} │ {:>9} │ {:>6}",
        "Date", "Merchant", "Amount", "Z"
    );
    println!("   {:─<10}─┼─{:─<25}─┼─{:─<9}─┼─{:─<6}", "", "", "", "");
    for a in &anomalies {
        println!(
            "   {:10} │ {:25} │ {:>9.2} │ {:>6.2}",
            a.date,
            truncate(&a.merchant, 25),
            a.amount,
            a.z_score
        );
    }

    Ok(())
}

pub fn cmd_score(rows: &[Transaction], income: f64) -> Result<()> {
    let (_, expense) = context::prepare(rows);
    let score = health_score(
        &expense,
        income,
        &SubscriptionConfig::default(),
        &AnomalyConfig::default(),
    );

    println!();
    println!("❤️  Financial Health: {}/100", score.score);
    if let Some(period) = &score.period {
        println!("   Month: {}", period);
    }
    if let Some(explain) = &score.explain {
        println!("   {}", explain);
    }
    for signal in &score.signals {
        println!();
        println!("   {:18} {:>3}/100", signal.name, signal.value);
        println!("   {}", signal.hint);
    }

    Ok(())
}
