//! Operator-authored formula calculators
//!
//! A calculator is a set of declared inputs, a map of named formulas over
//! those inputs and a list of output metrics to present. Configurations are
//! plain serde types so they can be loaded from YAML or JSON.
//!
//! # Example
//!
//! ```ignore
//! let calc = calculator_template("cost-savings")?;
//! let outcome = calc.run(&BTreeMap::from([("annual_volume".into(), 50_000.0)]))?;
//! println!("{}", outcome.output("annual_savings").unwrap());
//! ```

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::CalculatorError;
use crate::formula::{EvalLimits, Scope, Value, is_function, parse_formula, resolve_with_limits};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    #[default]
    Number,
    Percentage,
    Currency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Currency,
    Percentage,
    Months,
    #[default]
    Number,
}

/// One declared calculator input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputParameter {
    pub id: String,
    pub label: String,
    #[serde(rename = "type", default)]
    pub kind: InputKind,
    #[serde(default)]
    pub default: Option<f64>,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub help_text: Option<String>,
}

impl InputParameter {
    /// A required input with a default and a lower bound of 0
    pub fn new(id: &str, label: &str, kind: InputKind, default: f64) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            kind,
            default: Some(default),
            min: Some(0.0),
            max: None,
            required: true,
            help_text: None,
        }
    }

    #[must_use]
    pub fn bounds(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    #[must_use]
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    #[must_use]
    pub fn help(mut self, text: &str) -> Self {
        self.help_text = Some(text.to_string());
        self
    }

    fn in_bounds(&self, value: f64) -> bool {
        value.is_finite()
            && self.min.is_none_or(|min| value >= min)
            && self.max.is_none_or(|max| value <= max)
    }
}

/// One metric shown from the resolved scope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputMetric {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default)]
    pub highlight: bool,
}

impl OutputMetric {
    pub fn new(id: &str, label: &str, format: OutputFormat) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            format,
            highlight: false,
        }
    }

    #[must_use]
    pub fn highlighted(mut self) -> Self {
        self.highlight = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CalculatorMetadata {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub industry: Option<String>,
}

/// A complete calculator definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    pub id: String,
    pub metadata: CalculatorMetadata,
    #[serde(default)]
    pub inputs: Vec<InputParameter>,
    #[serde(default)]
    pub formulas: BTreeMap<String, String>,
    #[serde(default)]
    pub outputs: Vec<OutputMetric>,
    #[serde(default)]
    pub limits: EvalLimits,
}

/// An output metric paired with its resolved value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricValue {
    pub metric: OutputMetric,
    pub value: Value,
}

/// Result of running a calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorOutcome {
    /// Inputs merged with every formula value
    pub scope: Scope,
    /// Declared outputs, in declaration order
    pub outputs: Vec<MetricValue>,
}

impl CalculatorOutcome {
    /// Value of a declared output metric
    pub fn output(&self, id: &str) -> Option<&Value> {
        self.outputs
            .iter()
            .find(|o| o.metric.id == id)
            .map(|o| &o.value)
    }
}

impl CalculatorConfig {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            metadata: CalculatorMetadata {
                name: name.to_string(),
                ..Default::default()
            },
            inputs: Vec::new(),
            formulas: BTreeMap::new(),
            outputs: Vec::new(),
            limits: EvalLimits::default(),
        }
    }

    #[must_use]
    pub fn description(mut self, description: &str) -> Self {
        self.metadata.description = description.to_string();
        self
    }

    #[must_use]
    pub fn industry(mut self, industry: &str) -> Self {
        self.metadata.industry = Some(industry.to_string());
        self
    }

    #[must_use]
    pub fn input(mut self, input: InputParameter) -> Self {
        self.inputs.push(input);
        self
    }

    #[must_use]
    pub fn formula(mut self, name: &str, expression: &str) -> Self {
        self.formulas.insert(name.to_string(), expression.to_string());
        self
    }

    #[must_use]
    pub fn output(mut self, metric: OutputMetric) -> Self {
        self.outputs.push(metric);
        self
    }

    /// Verify every formula parses and only names inputs, formulas or functions
    pub fn check(&self) -> Result<(), CalculatorError> {
        self.check_with_variables(std::iter::empty())
    }

    /// Like [`check`](Self::check), also accepting the given extra variable names
    pub fn check_with_variables<'a>(
        &'a self,
        extra: impl IntoIterator<Item = &'a str>,
    ) -> Result<(), CalculatorError> {
        let known: BTreeSet<&str> = self
            .inputs
            .iter()
            .map(|i| i.id.as_str())
            .chain(self.formulas.keys().map(String::as_str))
            .chain(extra)
            .collect();

        for (name, formula) in &self.formulas {
            let expr = parse_formula(formula, &self.limits).map_err(|source| {
                CalculatorError::InvalidFormula {
                    name: name.clone(),
                    source,
                }
            })?;

            let mut unknown = BTreeSet::new();
            expr.for_each_variable(&mut |var| {
                if !known.contains(var) && !is_function(var) {
                    unknown.insert(var.to_string());
                }
            });
            if !unknown.is_empty() {
                return Err(CalculatorError::UnknownReferences {
                    name: name.clone(),
                    unknown: unknown.into_iter().collect(),
                });
            }
        }

        let missing: Vec<String> = self
            .outputs
            .iter()
            .filter(|o| !known.contains(o.id.as_str()))
            .map(|o| o.id.clone())
            .collect();
        if !missing.is_empty() {
            return Err(CalculatorError::UnknownReferences {
                name: "outputs".to_string(),
                unknown: missing,
            });
        }

        Ok(())
    }

    /// Bind inputs (provided values over defaults), resolve every formula and
    /// collect the declared outputs.
    ///
    /// Provided values without a declared input are passed through as variables
    /// and may be read by formulas.
    pub fn run(
        &self,
        provided: &BTreeMap<String, f64>,
    ) -> Result<CalculatorOutcome, CalculatorError> {
        self.check_with_variables(provided.keys().map(String::as_str))?;

        let mut variables: Scope = provided
            .iter()
            .map(|(id, value)| (id.clone(), Value::Number(*value)))
            .collect();

        for param in &self.inputs {
            let value = match provided.get(&param.id).copied().or(param.default) {
                Some(value) => value,
                None if param.required => {
                    return Err(CalculatorError::MissingInput {
                        id: param.id.clone(),
                    });
                }
                None => continue,
            };

            if !param.in_bounds(value) {
                return Err(CalculatorError::InputOutOfRange {
                    id: param.id.clone(),
                    value,
                    min: param.min.unwrap_or(f64::NEG_INFINITY),
                    max: param.max.unwrap_or(f64::INFINITY),
                });
            }
            variables.insert(param.id.clone(), Value::Number(value));
        }

        let scope = resolve_with_limits(&self.formulas, &variables, &self.limits)?;

        let outputs = self
            .outputs
            .iter()
            .filter_map(|metric| {
                scope.get(&metric.id).map(|value| MetricValue {
                    metric: metric.clone(),
                    value: value.clone(),
                })
            })
            .collect();

        tracing::debug!(
            calculator = %self.id,
            formulas = self.formulas.len(),
            "calculator resolved"
        );

        Ok(CalculatorOutcome { scope, outputs })
    }
}

/// Every built-in calculator
pub fn calculator_templates() -> Vec<CalculatorConfig> {
    vec![voice_ai_roi(), saas_roi(), cost_savings(), payback_period()]
}

/// Look up a built-in calculator by id
pub fn calculator_template(id: &str) -> Result<CalculatorConfig, CalculatorError> {
    calculator_templates()
        .into_iter()
        .find(|t| t.id == id)
        .ok_or_else(|| CalculatorError::TemplateNotFound(id.to_string()))
}

fn voice_ai_roi() -> CalculatorConfig {
    use InputKind::*;

    CalculatorConfig::new("voice-ai-roi", "Voice AI ROI Calculator")
        .description("Calculate ROI for voice AI implementation")
        .industry("contact_center")
        .input(
            InputParameter::new("annual_calls", "Annual Call Volume", Number, 100_000.0)
                .help("Total inbound calls per year"),
        )
        .input(
            InputParameter::new("agent_cost_per_min", "Agent Cost per Minute ($)", Currency, 0.80)
                .help("Fully loaded cost of human agent per minute"),
        )
        .input(
            InputParameter::new("ai_cost_per_min", "AI Cost per Minute ($)", Currency, 0.12)
                .help("Cost of AI/bot per minute"),
        )
        .input(
            InputParameter::new("avg_call_minutes", "Average Call Duration (minutes)", Number, 5.0)
                .help("Average minutes per call"),
        )
        .input(
            InputParameter::new("containment_rate", "AI Containment Rate (%)", Percentage, 70.0)
                .bounds(0.0, 100.0)
                .help("Percentage of calls fully handled by AI without human escalation"),
        )
        .formula("baseline_cost", "annual_calls * agent_cost_per_min * avg_call_minutes")
        .formula("ai_handled_calls", "annual_calls * (containment_rate / 100)")
        .formula("human_handled_calls", "annual_calls - ai_handled_calls")
        .formula("ai_cost", "ai_handled_calls * ai_cost_per_min * avg_call_minutes")
        .formula("human_cost", "human_handled_calls * agent_cost_per_min * avg_call_minutes")
        .formula("new_total_cost", "ai_cost + human_cost")
        .formula("annual_savings", "baseline_cost - new_total_cost")
        .formula("savings_5y", "annual_savings * 5")
        .formula("roi_5y", "(savings_5y / (ai_cost * 5)) * 100")
        .formula("payback_months", "(ai_cost * 12) / annual_savings")
        .output(
            OutputMetric::new("annual_savings", "Annual Savings", OutputFormat::Currency)
                .highlighted(),
        )
        .output(OutputMetric::new("roi_5y", "5-Year ROI", OutputFormat::Percentage).highlighted())
        .output(OutputMetric::new("payback_months", "Payback Period", OutputFormat::Months))
}

fn saas_roi() -> CalculatorConfig {
    use InputKind::*;

    CalculatorConfig::new("saas-roi", "SaaS ROI Calculator")
        .description("Calculate ROI for switching to our SaaS solution")
        .industry("saas")
        .input(InputParameter::new("users", "Number of Users", Number, 50.0).min(1.0))
        .input(InputParameter::new(
            "current_cost_per_user",
            "Current Cost per User/Month ($)",
            Currency,
            50.0,
        ))
        .input(InputParameter::new(
            "our_cost_per_user",
            "Our Price per User/Month ($)",
            Currency,
            30.0,
        ))
        .input(
            InputParameter::new("productivity_gain", "Productivity Increase (%)", Percentage, 25.0)
                .bounds(0.0, 100.0)
                .help("Expected productivity improvement"),
        )
        .input(InputParameter::new(
            "avg_hourly_rate",
            "Average Employee Hourly Rate ($)",
            Currency,
            50.0,
        ))
        .formula("current_monthly_cost", "users * current_cost_per_user")
        .formula("new_monthly_cost", "users * our_cost_per_user")
        .formula("software_savings_monthly", "current_monthly_cost - new_monthly_cost")
        .formula("hours_saved_per_user_monthly", "(productivity_gain / 100) * 160")
        .formula("total_hours_saved_monthly", "hours_saved_per_user_monthly * users")
        .formula("productivity_value_monthly", "total_hours_saved_monthly * avg_hourly_rate")
        .formula(
            "total_monthly_value",
            "software_savings_monthly + productivity_value_monthly",
        )
        .formula("annual_value", "total_monthly_value * 12")
        .formula("roi_3y", "((annual_value * 3) / (new_monthly_cost * 12 * 3)) * 100")
        .formula("payback_months", "(new_monthly_cost * 12) / total_monthly_value")
        .output(
            OutputMetric::new("total_monthly_value", "Monthly Value", OutputFormat::Currency)
                .highlighted(),
        )
        .output(
            OutputMetric::new("annual_value", "Annual Value", OutputFormat::Currency)
                .highlighted(),
        )
        .output(OutputMetric::new("roi_3y", "3-Year ROI", OutputFormat::Percentage).highlighted())
}

fn cost_savings() -> CalculatorConfig {
    use InputKind::*;

    CalculatorConfig::new("cost-savings", "Cost Savings Calculator")
        .description("Simple before and after cost comparison")
        .industry("general")
        .input(InputParameter::new("annual_volume", "Annual Volume/Units", Number, 100_000.0))
        .input(InputParameter::new(
            "current_cost_per_unit",
            "Current Cost per Unit ($)",
            Currency,
            1.00,
        ))
        .input(InputParameter::new("new_cost_per_unit", "New Cost per Unit ($)", Currency, 0.70))
        .formula("current_annual_cost", "annual_volume * current_cost_per_unit")
        .formula("new_annual_cost", "annual_volume * new_cost_per_unit")
        .formula("annual_savings", "current_annual_cost - new_annual_cost")
        .formula("savings_percentage", "(annual_savings / current_annual_cost) * 100")
        .formula("savings_3y", "annual_savings * 3")
        .formula("savings_5y", "annual_savings * 5")
        .output(
            OutputMetric::new("annual_savings", "Annual Savings", OutputFormat::Currency)
                .highlighted(),
        )
        .output(
            OutputMetric::new("savings_percentage", "Cost Reduction", OutputFormat::Percentage)
                .highlighted(),
        )
        .output(OutputMetric::new("savings_5y", "5-Year Savings", OutputFormat::Currency))
}

fn payback_period() -> CalculatorConfig {
    use InputKind::*;

    CalculatorConfig::new("payback-period", "Payback Period Calculator")
        .description("Calculate investment payback period")
        .industry("finance")
        .input(InputParameter::new(
            "initial_investment",
            "Initial Investment ($)",
            Currency,
            50_000.0,
        ))
        .input(
            InputParameter::new("monthly_benefit", "Monthly Benefit/Savings ($)", Currency, 5_000.0)
                .help("Expected monthly savings or revenue increase"),
        )
        .input(
            InputParameter::new(
                "ongoing_monthly_cost",
                "Ongoing Monthly Cost ($)",
                Currency,
                1_000.0,
            )
            .help("Recurring costs (subscription, maintenance, etc.)"),
        )
        .formula("net_monthly_benefit", "monthly_benefit - ongoing_monthly_cost")
        .formula("payback_months", "initial_investment / net_monthly_benefit")
        .formula("payback_years", "payback_months / 12")
        .formula("annual_benefit", "net_monthly_benefit * 12")
        .formula(
            "roi_3y",
            "((annual_benefit * 3 - initial_investment) / initial_investment) * 100",
        )
        .formula("total_3y_value", "annual_benefit * 3 - initial_investment")
        .output(
            OutputMetric::new("payback_months", "Payback Period (Months)", OutputFormat::Number)
                .highlighted(),
        )
        .output(OutputMetric::new("roi_3y", "3-Year ROI", OutputFormat::Percentage).highlighted())
        .output(OutputMetric::new("total_3y_value", "3-Year Net Value", OutputFormat::Currency))
}
