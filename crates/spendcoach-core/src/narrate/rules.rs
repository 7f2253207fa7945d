//! Rule-based fallback coach
//!
//! Always available: produces short, grounded nudges and keyword answers
//! directly from the coach context when no narrator backend is configured
//! or a narration call fails.

use crate::models::CoachContext;

/// Maximum number of nudges shown at once.
const MAX_NUDGES: usize = 4;

/// Short coaching nudges derived from the context.
pub fn rule_based_nudges(ctx: &CoachContext) -> Vec<String> {
    let mut nudges = Vec::new();

    if ctx.forecast.on_track {
        nudges.push(
            "Great pace - your plan looks on track. Keep habits steady and avoid new recurring spend."
                .to_string(),
        );
    } else {
        nudges.push(format!(
            "To hit your goal, trim about ${:.0}/mo. The what-if planner shows exactly where to take it from.",
            ctx.forecast.need_per_month
        ));
    }

    if ctx.coffee_msg.to_lowercase().contains("coffee") {
        nudges.push(ctx.coffee_msg.clone());
    }

    if let Some(s) = ctx.suggestions.first() {
        nudges.push(format!(
            "Try cutting {} by ${:.0}/mo (currently ${:.0}).",
            s.category, s.suggested_cut, s.current
        ));
    }

    if ctx.anomaly_count > 0 {
        nudges.push(format!(
            "Spotted {} unusual charges recently - give the anomalies table a quick review.",
            ctx.anomaly_count
        ));
    }

    nudges.truncate(MAX_NUDGES);
    nudges
}

/// Keyword-matched answer to a free-form question.
///
/// Returns the answer text; callers label the source as "rule".
pub fn rule_based_answer(question: &str, ctx: &CoachContext) -> String {
    let q = question.to_lowercase();

    if q.contains("coffee") && !ctx.coffee_msg.is_empty() {
        return ctx.coffee_msg.clone();
    }
    if q.contains("subscription") || q.contains("recurring") {
        let top = ctx
            .top_merchants
            .first()
            .map(|m| m.merchant.as_str())
            .unwrap_or("n/a");
        return format!(
            "Recurring charges are listed on the subscriptions card. Your top merchant this month is {}.",
            top
        );
    }
    if q.contains("total") || q.contains("spend") {
        return format!(
            "You've spent ${:.0} in {}.",
            ctx.expense_total,
            ctx.period.as_deref().unwrap_or("n/a")
        );
    }
    if q.contains("goal") || q.contains("track") {
        return ctx.forecast.message.clone();
    }
    if q.contains("anomal") || q.contains("outlier") {
        return format!(
            "{} unusual transactions flagged - check the anomalies table.",
            ctx.anomaly_count
        );
    }

    "I couldn't find that in the data. Try asking about coffee, total spend, subscriptions, \
     anomalies, or your goal."
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ForecastResult, MerchantSpend, Suggestion};

    fn ctx(on_track: bool) -> CoachContext {
        CoachContext {
            period: Some("2026-07".to_string()),
            expense_total: 950.0,
            by_category: Vec::new(),
            top_merchants: vec![MerchantSpend {
                merchant: "SAFEWAY".to_string(),
                amount: 260.0,
            }],
            coffee_msg: "You've spent $42.00 on coffee in 2026-07.".to_string(),
            forecast: ForecastResult {
                on_track,
                surplus: if on_track { 850.0 } else { 100.0 },
                gap: if on_track { 0.0 } else { 2800.0 },
                need_per_month: if on_track { 0.0 } else { 1400.0 },
                message: "Need about $1400/mo to hit $3000 in 2 months.".to_string(),
            },
            suggestions: vec![Suggestion {
                category: "Dining".to_string(),
                current: 300.0,
                suggested_cut: 60.0,
            }],
            delta_categories: Vec::new(),
            anomaly_count: 2,
        }
    }

    #[test]
    fn test_nudges_off_track_lead_with_the_gap() {
        let nudges = rule_based_nudges(&ctx(false));
        assert!(nudges[0].contains("$1400/mo"));
        assert!(nudges.len() <= 4);
    }

    #[test]
    fn test_nudges_on_track_and_include_coffee_and_cut() {
        let nudges = rule_based_nudges(&ctx(true));
        assert!(nudges[0].contains("on track"));
        assert!(nudges.iter().any(|n| n.contains("coffee")));
        assert!(nudges.iter().any(|n| n.contains("Dining")));
    }

    #[test]
    fn test_answer_keyword_routing() {
        let c = ctx(false);
        assert!(rule_based_answer("how much coffee?", &c).contains("coffee"));
        assert!(rule_based_answer("any subscriptions?", &c).contains("SAFEWAY"));
        assert!(rule_based_answer("total spend?", &c).contains("$950"));
        assert!(rule_based_answer("am I on track?", &c).contains("$1400"));
        assert!(rule_based_answer("anomalies?", &c).contains("2 unusual"));
    }

    #[test]
    fn test_answer_unknown_question_fallback() {
        let answer = rule_based_answer("what's the weather?", &ctx(true));
        assert!(answer.contains("Try asking"));
    }
}
