//! Plain-text report rendering for the terminal

use std::fmt::Write;

use callroi_core::config::{CalculatorConfig, CalculatorOutcome, OutputFormat};
use callroi_core::formula::Value;
use callroi_core::{Results, VerticalTemplate};

use crate::util::format::{
    format_currency, format_currency_short, format_number, format_payback, format_percent,
    format_quantity,
};

const RULE_WIDTH: usize = 72;

fn rule(out: &mut String) {
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');
}

fn heading(out: &mut String, title: &str) {
    out.push('\n');
    out.push_str(title);
    out.push('\n');
    rule(out);
}

/// Render a full calculation as summary, yearly table, tornado and scenarios
pub fn render_results(results: &Results) -> String {
    let mut out = String::new();

    heading(&mut out, "Summary");
    let _ = writeln!(out, "{:<28}{:>20}", "Payback", format_payback(results.payback_months));
    let _ = writeln!(out, "{:<28}{:>20}", "5-year NPV", format_currency(results.npv_5y));
    let _ = writeln!(out, "{:<28}{:>20}", "5-year cost reduction", format_percent(results.roi_5y));
    let split = results.ops_vs_revenue_split;
    let _ = writeln!(
        out,
        "{:<28}{:>20}",
        "Value split (ops/revenue)",
        format!(
            "{} / {}",
            format_percent(split.ops_savings),
            format_percent(split.revenue_retained)
        )
    );

    heading(&mut out, "Yearly projection");
    let _ = writeln!(
        out,
        "{:<6}{:>14}{:>14}{:>13}{:>13}{:>13}",
        "Year", "Baseline min", "Automated min", "Ops savings", "Revenue", "Cumulative"
    );
    for year in &results.yearly {
        let _ = writeln!(
            out,
            "{:<6}{:>14}{:>14}{:>13}{:>13}{:>13}",
            year.year,
            format_quantity(year.baseline_minutes),
            format_quantity(year.automated_minutes),
            format_currency_short(year.ops_savings),
            format_currency_short(year.revenue_retained),
            format_currency_short(year.cumulative_value),
        );
    }

    heading(&mut out, "Top NPV drivers");
    for entry in &results.tornado {
        let _ = writeln!(
            out,
            "{:<32}{:>20}",
            entry.driver(),
            format!("+/- {}", format_currency_short(entry.impact()))
        );
    }

    heading(&mut out, "Scenarios (NPV)");
    let scenarios = results.p10_p50_p90;
    for (label, npv) in [
        ("P10 (pessimistic)", scenarios.p10),
        ("P50 (base)", scenarios.p50),
        ("P90 (optimistic)", scenarios.p90),
    ] {
        let _ = writeln!(out, "{:<28}{:>20}", label, format_currency(npv));
    }

    out
}

/// Format a resolved value with the metric's display format
pub fn format_value(value: &Value, format: OutputFormat) -> String {
    let Some(number) = value.as_number() else {
        return value.to_string();
    };
    match format {
        OutputFormat::Currency => format_currency(number),
        OutputFormat::Percentage => format_percent(number),
        OutputFormat::Months => format!("{} months", format_number(number)),
        OutputFormat::Number => format_number(number),
    }
}

/// Render the declared outputs of a calculator run
pub fn render_outcome(config: &CalculatorConfig, outcome: &CalculatorOutcome) -> String {
    let mut out = String::new();

    heading(&mut out, &config.metadata.name);
    for output in &outcome.outputs {
        let marker = if output.metric.highlight { "*" } else { " " };
        let _ = writeln!(
            out,
            "{marker} {:<36}{:>20}",
            output.metric.label,
            format_value(&output.value, output.metric.format)
        );
    }

    out
}

/// List the built-in calculators
pub fn render_templates(templates: &[CalculatorConfig]) -> String {
    let mut out = String::new();

    heading(&mut out, "Calculator templates");
    for template in templates {
        let industry = template.metadata.industry.as_deref().unwrap_or("-");
        let _ = writeln!(
            out,
            "{:<18}{:<28}{}",
            template.id, template.metadata.name, industry
        );
    }

    heading(&mut out, "Industry presets");
    for vertical in VerticalTemplate::ALL {
        let _ = writeln!(out, "{}", vertical.id());
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use callroi_core::config::calculator_template;
    use callroi_core::{DealBuilder, IntentBuilder, calculate};
    use std::collections::BTreeMap;

    fn reference_results() -> Results {
        let inputs = DealBuilder::new()
            .annual_calls(100_000)
            .intent(
                IntentBuilder::new("General")
                    .share(1.0)
                    .minutes(3.0)
                    .containment(0.5, 0.8)
                    .handoff(1.0),
            )
            .agent_cost(0.8)
            .telco_cost(0.05)
            .polyai_cost(0.12)
            .abandon_rates(0.15, 0.08)
            .build()
            .unwrap();
        calculate(&inputs)
    }

    #[test]
    fn test_results_report_sections() {
        let text = render_results(&reference_results());

        assert!(text.contains("Summary"));
        assert!(text.contains("2 months"));
        assert!(text.contains("43.0%"));
        assert!(text.contains("400,000"));
        assert!(text.contains("Containment_General"));
        assert!(text.contains("P90 (optimistic)"));
    }

    #[test]
    fn test_format_value_by_metric_format() {
        let v = Value::Number(1234.5);
        assert_eq!(format_value(&v, OutputFormat::Currency), "$1,234.50");
        assert_eq!(format_value(&v, OutputFormat::Percentage), "1234.5%");
        assert_eq!(format_value(&Value::Number(6.0), OutputFormat::Months), "6 months");
        assert_eq!(
            format_value(&Value::List(vec![1.0, 2.5]), OutputFormat::Number),
            "[1, 2.5]"
        );
    }

    #[test]
    fn test_outcome_report_marks_highlights() {
        let calc = calculator_template("cost-savings").unwrap();
        let outcome = calc.run(&BTreeMap::new()).unwrap();
        let text = render_outcome(&calc, &outcome);

        assert!(text.contains(&calc.metadata.name));
        assert!(text.lines().any(|line| line.starts_with('*')));
    }

    #[test]
    fn test_templates_report_lists_everything() {
        let text = render_templates(&callroi_core::config::calculator_templates());
        for id in ["voice-ai-roi", "saas-roi", "cost-savings", "payback-period"] {
            assert!(text.contains(id));
        }
        assert!(text.contains("financial_services"));
    }
}
