//! Industry presets
//!
//! Each vertical carries a typical intent mix, call volume, agent cost and
//! abandonment profile. All presets share the same telephony, platform and
//! economic assumptions.

use serde::{Deserialize, Serialize};

use crate::config::{DealBuilder, IntentBuilder};
use crate::error::ValidationError;
use crate::model::DealInputs;

/// Pre-configured deal scenario for an industry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalTemplate {
    Utilities,
    Restaurants,
    FinancialServices,
    Healthcare,
    Travel,
    Retail,
    ContactCenter,
}

impl VerticalTemplate {
    pub const ALL: [VerticalTemplate; 7] = [
        VerticalTemplate::Utilities,
        VerticalTemplate::Restaurants,
        VerticalTemplate::FinancialServices,
        VerticalTemplate::Healthcare,
        VerticalTemplate::Travel,
        VerticalTemplate::Retail,
        VerticalTemplate::ContactCenter,
    ];

    /// Identifier used in files and on the command line
    pub fn id(self) -> &'static str {
        match self {
            VerticalTemplate::Utilities => "utilities",
            VerticalTemplate::Restaurants => "restaurants",
            VerticalTemplate::FinancialServices => "financial_services",
            VerticalTemplate::Healthcare => "healthcare",
            VerticalTemplate::Travel => "travel",
            VerticalTemplate::Retail => "retail",
            VerticalTemplate::ContactCenter => "contact_center",
        }
    }

    /// Look up a vertical by identifier (dashes and underscores are interchangeable)
    pub fn from_id(id: &str) -> Option<Self> {
        let normalized = id.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL.into_iter().find(|v| v.id() == normalized)
    }

    /// Build the preset scenario
    pub fn inputs(self) -> Result<DealInputs, ValidationError> {
        let base = DealBuilder::new()
            .telco_cost(0.05)
            .polyai_cost(0.12)
            .acw_minutes(1.0)
            .inflation(0.03)
            .volume_growth(0.05)
            .discount_rate(0.10)
            .risk_adjustment(0.1);

        let builder = match self {
            VerticalTemplate::Utilities => base
                .annual_calls(8_000_000)
                .agent_cost(1.05)
                .abandon_rates(0.35, 0.08)
                .coverage(false, 0.4)
                .intent(intent("Outage Reporting & Updates", 0.45, 2.5, 0.35, 0.85, 0.5))
                .intent(intent("Billing Inquiries", 0.25, 3.0, 0.60, 0.90, 0.8))
                .intent(intent("Service Start/Stop", 0.15, 4.0, 0.30, 0.70, 1.5))
                .intent(intent("General FAQs", 0.10, 1.8, 0.75, 0.95, 0.2))
                .intent(intent("Safety/Gas Leaks", 0.05, 1.0, 0.0, 0.0, 0.1)),

            VerticalTemplate::Restaurants => base
                .annual_calls(350_000)
                .agent_cost(0.75)
                .abandon_rates(0.30, 0.05)
                .coverage(false, 0.35)
                .intent(
                    intent("New Reservations", 0.45, 3.5, 0.50, 0.76, 1.0)
                        .revenue_per_abandon(65.0),
                )
                .intent(
                    intent("Reservation Changes", 0.25, 3.0, 0.60, 0.85, 0.8)
                        .revenue_per_abandon(50.0),
                )
                .intent(
                    intent("Cancellations", 0.15, 2.0, 0.70, 0.90, 0.3)
                        .revenue_per_abandon(45.0),
                )
                .intent(
                    intent("Menu & Location Info", 0.10, 1.5, 0.85, 0.95, 0.2)
                        .revenue_per_abandon(25.0),
                )
                .intent(
                    intent("Special Events & Groups", 0.05, 5.0, 0.30, 0.60, 2.0)
                        .revenue_per_abandon(150.0),
                ),

            VerticalTemplate::FinancialServices => base
                .annual_calls(1_200_000)
                .agent_cost(1.10)
                .abandon_rates(0.15, 0.06)
                .coverage(true, 0.25)
                .intent(intent("Account Balance & Statements", 0.30, 2.0, 0.45, 0.75, 0.5))
                .intent(intent("Password Reset & Login Help", 0.25, 3.0, 0.35, 0.65, 1.0))
                .intent(intent("Card Services", 0.20, 3.5, 0.40, 0.70, 1.2))
                .intent(intent("Payments & Transfers", 0.15, 4.0, 0.25, 0.55, 1.8))
                .intent(intent("Disputes & Complex Issues", 0.10, 6.0, 0.10, 0.35, 2.5)),

            VerticalTemplate::Healthcare => base
                .annual_calls(180_000)
                .agent_cost(1.25)
                .abandon_rates(0.20, 0.08)
                .coverage(false, 0.30)
                .intent(intent("Appointment Scheduling", 0.40, 2.5, 0.35, 0.60, 1.5))
                .intent(intent("Test Results & Records", 0.20, 2.0, 0.20, 0.45, 1.0))
                .intent(intent("Prescription Refills", 0.15, 3.0, 0.40, 0.70, 1.2))
                .intent(intent("General Health Information", 0.15, 2.5, 0.60, 0.85, 0.5))
                .intent(intent("Crisis & Emergency Info", 0.10, 1.5, 0.70, 0.90, 0.3)),

            VerticalTemplate::Travel => base
                .annual_calls(600_000)
                .agent_cost(0.95)
                .abandon_rates(0.25, 0.12)
                .coverage(false, 0.45)
                .intent(
                    intent("Booking Questions & FAQs", 0.35, 3.0, 0.25, 0.50, 1.5)
                        .revenue_per_abandon(85.0),
                )
                .intent(
                    intent("Flight Changes & Cancellations", 0.25, 5.0, 0.15, 0.35, 2.5)
                        .revenue_per_abandon(120.0),
                )
                .intent(intent("Travel Alerts & Updates", 0.20, 2.0, 0.60, 0.85, 0.5))
                .intent(
                    intent("Refund Requests", 0.15, 4.0, 0.10, 0.25, 2.0)
                        .revenue_per_abandon(95.0),
                )
                .intent(
                    intent("Special Assistance", 0.05, 6.0, 0.05, 0.15, 3.0)
                        .revenue_per_abandon(200.0),
                ),

            VerticalTemplate::Retail => base
                .annual_calls(450_000)
                .agent_cost(0.85)
                .abandon_rates(0.18, 0.09)
                .coverage(true, 0.25)
                .intent(
                    intent("Order Status & Tracking", 0.35, 2.5, 0.60, 0.85, 0.5)
                        .revenue_per_abandon(25.0),
                )
                .intent(
                    intent("Returns & Exchanges", 0.25, 4.0, 0.40, 0.75, 1.0)
                        .revenue_per_abandon(40.0),
                )
                .intent(
                    intent("Product Information", 0.20, 3.0, 0.55, 0.80, 0.8)
                        .revenue_per_abandon(35.0),
                )
                .intent(
                    intent("Delivery & Shipping", 0.15, 3.5, 0.50, 0.80, 1.2)
                        .revenue_per_abandon(30.0),
                )
                .intent(
                    intent("Account & Loyalty", 0.05, 2.0, 0.70, 0.90, 0.3)
                        .revenue_per_abandon(20.0),
                ),

            VerticalTemplate::ContactCenter => base
                .annual_calls(2_500_000)
                .agent_cost(0.90)
                .abandon_rates(0.25, 0.08)
                .coverage(false, 0.40)
                .intent(intent("General FAQs", 0.40, 2.5, 0.45, 0.75, 0.8))
                .intent(intent("Account Authentication", 0.25, 3.0, 0.35, 0.65, 1.2))
                .intent(intent("Service Requests", 0.20, 4.0, 0.25, 0.55, 1.8))
                .intent(intent("Technical Support L1", 0.10, 5.0, 0.20, 0.45, 2.5))
                .intent(intent("Escalations & Complex Cases", 0.05, 7.0, 0.05, 0.20, 3.0)),
        };

        builder.build()
    }
}

fn intent(name: &str, share: f64, minutes: f64, m0: f64, m3: f64, handoff: f64) -> IntentBuilder {
    IntentBuilder::new(name)
        .share(share)
        .minutes(minutes)
        .containment(m0, m3)
        .handoff(handoff)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_vertical_validates() {
        for vertical in VerticalTemplate::ALL {
            let inputs = vertical
                .inputs()
                .unwrap_or_else(|e| panic!("{} failed validation: {e}", vertical.id()));
            let total: f64 = inputs.intents().iter().map(|i| i.volume_share).sum();
            assert!((total - 1.0).abs() < 0.01, "{}", vertical.id());
            assert_eq!(inputs.intents().len(), 5);
            assert_eq!(inputs.risk_adjustment(), 0.1);
        }
    }

    #[test]
    fn test_from_id() {
        assert_eq!(
            VerticalTemplate::from_id("financial-services"),
            Some(VerticalTemplate::FinancialServices)
        );
        assert_eq!(VerticalTemplate::from_id(" Retail "), Some(VerticalTemplate::Retail));
        assert_eq!(VerticalTemplate::from_id("mining"), None);
    }

    #[test]
    fn test_serde_ids_match() {
        for vertical in VerticalTemplate::ALL {
            let json = serde_json::to_string(&vertical).unwrap();
            assert_eq!(json, format!("\"{}\"", vertical.id()));
        }
    }

    #[test]
    fn test_restaurant_revenue_is_set() {
        let inputs = VerticalTemplate::Restaurants.inputs().unwrap();
        assert!(inputs.intents().iter().all(|i| i.revenue_per_abandon.is_some()));
        assert!(!inputs.business_hours_only());
    }
}
