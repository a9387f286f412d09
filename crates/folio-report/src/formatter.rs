//! Markdown fragment formatting for operation results.
//!
//! Pure functions, one per operation kind. Currency and percentage fields
//! render with two decimal places; money values carry comma thousands
//! grouping. Absent optional metrics render as the literal token `N/A` —
//! user-visible output, so the exact wording matters.

use folio_models::{
    AddedHolding, AnalysisView, HoldingView, OpportunityView, ReportView, SellView,
};

/// `$1,234.56` with the sign inside: `$-300.00`.
fn money(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some(parts) => parts,
        None => (formatted.as_str(), "00"),
    };
    format!("${sign}{}.{frac_part}", group_thousands(int_part))
}

/// Whole-dollar rendering for large figures like market cap: `$690,000,000,000`.
fn whole_dollars(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let formatted = format!("{:.0}", value.abs());
    format!("${sign}{}", group_thousands(&formatted))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

fn pct(value: f64) -> String {
    format!("{value:+.2}%")
}

fn opt_num(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => "N/A".to_string(),
    }
}

fn opt_money(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("${v:.2}"),
        None => "N/A".to_string(),
    }
}

pub fn format_added(added: &AddedHolding) -> String {
    format!(
        "Added {} ({}) to portfolio: {} shares at ${:.2}",
        added.ticker, added.company_name, added.shares, added.purchase_price
    )
}

/// Portfolio snapshot with per-holding valuations and aggregate totals.
/// Total P/L percent is 0 when total cost is 0, not NaN.
pub fn format_portfolio(holdings: &[HoldingView]) -> String {
    if holdings.is_empty() {
        return "Portfolio is empty.".to_string();
    }

    let mut output = String::from("📊 **Current Portfolio**\n\n");
    let mut total_value = 0.0;
    let mut total_cost = 0.0;

    for holding in holdings {
        output.push_str(&format!(
            "**{}** - {}\n",
            holding.ticker, holding.company_name
        ));
        output.push_str(&format!("  • Shares: {}\n", holding.shares));
        output.push_str(&format!(
            "  • Purchase Price: ${:.2}\n",
            holding.purchase_price
        ));
        output.push_str(&format!(
            "  • Current Price: ${:.2}\n",
            holding.current_price
        ));
        output.push_str(&format!(
            "  • Current Value: {}\n",
            money(holding.current_value)
        ));
        output.push_str(&format!(
            "  • Profit/Loss: {} ({})\n\n",
            money(holding.profit_loss),
            pct(holding.profit_loss_pct)
        ));

        total_value += holding.current_value;
        total_cost += holding.purchase_value;
    }

    let total_pl = total_value - total_cost;
    let total_pl_pct = if total_cost > 0.0 {
        total_pl / total_cost * 100.0
    } else {
        0.0
    };

    output.push_str(&format!(
        "**Total Portfolio Value:** {}\n",
        money(total_value)
    ));
    output.push_str(&format!(
        "**Total Profit/Loss:** {} ({})",
        money(total_pl),
        pct(total_pl_pct)
    ));

    output
}

pub fn format_analysis(analysis: &AnalysisView) -> String {
    let mut output = format!(
        "📈 **Analysis: {} - {}**\n\n",
        analysis.ticker, analysis.company_name
    );
    output.push_str(&format!(
        "**Sector:** {} | **Industry:** {}\n\n",
        analysis.sector, analysis.industry
    ));

    output.push_str("**Price Information:**\n");
    output.push_str(&format!(
        "  • Current Price: ${:.2}\n",
        analysis.current_price
    ));
    output.push_str(&format!(
        "  • 52-Week High: ${:.2}\n",
        analysis.price_52w_high
    ));
    output.push_str(&format!(
        "  • 52-Week Low: ${:.2}\n",
        analysis.price_52w_low
    ));
    output.push_str(&format!(
        "  • 1-Month Change: {}\n",
        pct(analysis.change_1m_pct)
    ));
    output.push_str(&format!(
        "  • 3-Month Change: {}\n\n",
        pct(analysis.change_3m_pct)
    ));

    output.push_str("**Valuation Metrics:**\n");
    output.push_str(&format!(
        "  • Market Cap: {}\n",
        whole_dollars(analysis.market_cap)
    ));
    output.push_str(&format!("  • P/E Ratio: {}\n", opt_num(analysis.pe_ratio)));
    output.push_str(&format!(
        "  • Forward P/E: {}\n",
        opt_num(analysis.forward_pe)
    ));
    output.push_str(&format!("  • PEG Ratio: {}\n", opt_num(analysis.peg_ratio)));
    output.push_str(&format!(
        "  • Price/Book: {}\n",
        opt_num(analysis.price_to_book)
    ));
    output.push_str(&format!(
        "  • Dividend Yield: {:.2}%\n\n",
        analysis.dividend_yield
    ));

    output.push_str("**Technical Indicators:**\n");
    output.push_str(&format!(
        "  • 50-Day MA: {}\n",
        opt_money(analysis.moving_avg_50d)
    ));
    output.push_str(&format!(
        "  • 200-Day MA: {}\n",
        opt_money(analysis.moving_avg_200d)
    ));
    output.push_str(&format!("  • Volatility: {:.2}%\n", analysis.volatility));
    output.push_str(&format!("  • Beta: {}\n\n", opt_num(analysis.beta)));

    output.push_str("**Analyst Data:**\n");
    output.push_str(&format!(
        "  • Recommendation: {}\n",
        analysis.analyst_recommendation.to_uppercase()
    ));
    output.push_str(&format!(
        "  • Target Price: {}\n",
        opt_money(analysis.target_price)
    ));

    output
}

pub fn format_sell(sell: &SellView) -> String {
    let mut output = format!("🎯 **Sell Analysis: {}**\n\n", sell.ticker);
    output.push_str(&format!("**Recommendation: {}**\n", sell.recommendation));
    output.push_str(&format!("**Sell Score: {}/10**\n\n", sell.sell_score));
    output.push_str("**Analysis:**\n");
    for reason in &sell.reasons {
        output.push_str(&format!("  • {reason}\n"));
    }
    output
}

pub fn format_opportunities(opportunities: &[OpportunityView]) -> String {
    if opportunities.is_empty() {
        return "No buy opportunities found matching your criteria.".to_string();
    }

    let mut output = format!(
        "💡 **Buy Opportunities** (Found {} stocks)\n\n",
        opportunities.len()
    );

    for (i, opp) in opportunities.iter().enumerate() {
        output.push_str(&format!(
            "**{}. {}** - {}\n",
            i + 1,
            opp.ticker,
            opp.company_name
        ));
        output.push_str(&format!(
            "   Sector: {} | Price: ${:.2}\n",
            opp.sector, opp.current_price
        ));
        output.push_str(&format!("   Buy Score: {}/10\n", opp.buy_score));
        output.push_str("   **Reasons:**\n");
        for reason in &opp.reasons {
            output.push_str(&format!("     • {reason}\n"));
        }
        output.push('\n');
    }

    output
}

pub fn format_summary(report: &ReportView) -> String {
    if report.status == "empty" {
        return report
            .message
            .clone()
            .unwrap_or_else(|| "Portfolio is empty.".to_string());
    }

    let mut output = String::from("📊 **Portfolio Report**\n\n");
    output.push_str("**Summary:**\n");
    output.push_str(&format!(
        "  • Total Holdings: {}\n",
        report.holdings_count
    ));
    output.push_str(&format!(
        "  • Total Investment: {}\n",
        money(report.total_purchase_value)
    ));
    output.push_str(&format!(
        "  • Current Value: {}\n",
        money(report.total_current_value)
    ));
    output.push_str(&format!(
        "  • Total P/L: {} ({})\n\n",
        money(report.total_profit_loss),
        pct(report.total_profit_loss_pct)
    ));

    if report.sell_recommendations.is_empty() {
        output.push_str("✅ No immediate sell recommendations.\n");
    } else {
        output.push_str(&format!(
            "**⚠️ Sell Recommendations ({}):**\n\n",
            report.sell_recommendations.len()
        ));
        for rec in &report.sell_recommendations {
            output.push_str(&format!("**{}** - {}\n", rec.ticker, rec.recommendation));
            output.push_str(&format!("  Sell Score: {}/10\n", rec.sell_score));
            for reason in &rec.reasons {
                output.push_str(&format!("    • {reason}\n"));
            }
            output.push('\n');
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holding(
        ticker: &str,
        purchase_value: f64,
        current_value: f64,
        shares: f64,
    ) -> HoldingView {
        let profit_loss = current_value - purchase_value;
        HoldingView {
            ticker: ticker.to_string(),
            company_name: format!("{ticker} Inc."),
            shares,
            purchase_price: purchase_value / shares,
            current_price: current_value / shares,
            purchase_value,
            current_value,
            profit_loss,
            profit_loss_pct: profit_loss / purchase_value * 100.0,
        }
    }

    #[test]
    fn empty_portfolio_renders_literal_line() {
        assert_eq!(format_portfolio(&[]), "Portfolio is empty.");
    }

    #[test]
    fn balanced_gains_and_losses_net_to_zero() {
        // 1500 -> 1800 and 1500 -> 1200: total P/L must be exactly zero.
        let holdings = vec![
            holding("AAPL", 1500.0, 1800.0, 10.0),
            holding("TSLA", 1500.0, 1200.0, 10.0),
        ];

        let output = format_portfolio(&holdings);
        assert!(output.contains("**Total Portfolio Value:** $3,000.00"));
        assert!(output.contains("**Total Profit/Loss:** $0.00 (+0.00%)"));
    }

    #[test]
    fn zero_cost_portfolio_avoids_division_by_zero() {
        let mut h = holding("FREE", 1.0, 50.0, 1.0);
        h.purchase_value = 0.0;
        h.profit_loss = 50.0;
        h.profit_loss_pct = 0.0;

        let output = format_portfolio(&[h]);
        assert!(output.contains("**Total Profit/Loss:** $50.00 (+0.00%)"));
    }

    #[test]
    fn money_grouping_and_negative_sign() {
        assert_eq!(money(1234.56), "$1,234.56");
        assert_eq!(money(-300.0), "$-300.00");
        assert_eq!(money(0.0), "$0.00");
        assert_eq!(money(1_000_000.0), "$1,000,000.00");
        assert_eq!(whole_dollars(690_000_000_000.0), "$690,000,000,000");
    }

    #[test]
    fn absent_pe_ratio_renders_na_token() {
        let analysis = AnalysisView {
            ticker: "TSLA".to_string(),
            company_name: "Tesla, Inc.".to_string(),
            sector: "Consumer Cyclical".to_string(),
            industry: "Auto Manufacturers".to_string(),
            current_price: 218.55,
            price_52w_high: 299.29,
            price_52w_low: 138.80,
            change_1m_pct: -4.2,
            change_3m_pct: 12.7,
            market_cap: 690_000_000_000.0,
            pe_ratio: None,
            forward_pe: Some(58.3),
            peg_ratio: None,
            price_to_book: Some(9.1),
            dividend_yield: 0.0,
            moving_avg_50d: None,
            moving_avg_200d: None,
            volatility: 48.5,
            beta: None,
            analyst_recommendation: "hold".to_string(),
            target_price: None,
        };

        let output = format_analysis(&analysis);
        assert!(output.contains("  • P/E Ratio: N/A\n"));
        assert!(output.contains("  • Forward P/E: 58.30\n"));
        assert!(output.contains("  • 50-Day MA: N/A\n"));
        assert!(output.contains("  • Target Price: N/A\n"));
        assert!(output.contains("  • Recommendation: HOLD\n"));
    }

    #[test]
    fn no_opportunities_renders_literal_line() {
        assert_eq!(
            format_opportunities(&[]),
            "No buy opportunities found matching your criteria."
        );
    }

    #[test]
    fn opportunities_are_numbered_from_one() {
        let opportunities = vec![OpportunityView {
            ticker: "MSFT".to_string(),
            company_name: "Microsoft".to_string(),
            sector: "Technology".to_string(),
            current_price: 410.0,
            buy_score: 8,
            reasons: vec!["Strong free cash flow".to_string()],
        }];

        let output = format_opportunities(&opportunities);
        assert!(output.contains("💡 **Buy Opportunities** (Found 1 stocks)"));
        assert!(output.contains("**1. MSFT** - Microsoft"));
        assert!(output.contains("   Buy Score: 8/10"));
        assert!(output.contains("     • Strong free cash flow"));
    }

    #[test]
    fn empty_summary_uses_service_message() {
        let report = ReportView {
            status: "empty".to_string(),
            message: Some("Portfolio is empty.".to_string()),
            holdings_count: 0,
            total_purchase_value: 0.0,
            total_current_value: 0.0,
            total_profit_loss: 0.0,
            total_profit_loss_pct: 0.0,
            sell_recommendations: vec![],
        };

        assert_eq!(format_summary(&report), "Portfolio is empty.");
    }

    #[test]
    fn summary_with_sell_recommendations() {
        let report = ReportView {
            status: "ok".to_string(),
            message: None,
            holdings_count: 2,
            total_purchase_value: 3000.0,
            total_current_value: 3150.0,
            total_profit_loss: 150.0,
            total_profit_loss_pct: 5.0,
            sell_recommendations: vec![SellView {
                ticker: "TSLA".to_string(),
                recommendation: "SELL".to_string(),
                sell_score: 7,
                reasons: vec!["Overvalued vs sector".to_string()],
            }],
        };

        let output = format_summary(&report);
        assert!(output.contains("  • Total P/L: $150.00 (+5.00%)"));
        assert!(output.contains("**⚠️ Sell Recommendations (1):**"));
        assert!(output.contains("**TSLA** - SELL"));
    }

    #[test]
    fn summary_without_sell_recommendations() {
        let report = ReportView {
            status: "ok".to_string(),
            message: None,
            holdings_count: 1,
            total_purchase_value: 1000.0,
            total_current_value: 1100.0,
            total_profit_loss: 100.0,
            total_profit_loss_pct: 10.0,
            sell_recommendations: vec![],
        };

        assert!(format_summary(&report).contains("✅ No immediate sell recommendations."));
    }

    #[test]
    fn added_holding_line() {
        let added = AddedHolding {
            ticker: "TSLA".to_string(),
            company_name: "Tesla".to_string(),
            shares: 23.0,
            purchase_price: 218.55,
        };

        assert_eq!(
            format_added(&added),
            "Added TSLA (Tesla) to portfolio: 23 shares at $218.55"
        );
    }
}
