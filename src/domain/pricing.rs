//! Pricing calculator for the public pricing page.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::roi::HAPPINESS_MOMENTS_PER_HOUR;
use crate::domain::types::{MoneyCents, TypeConstraintError};

/// Discount applied to yearly billing, in percent.
pub const YEARLY_DISCOUNT_PERCENT: i64 = 15;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Start,
    Groei,
    Professional,
    Enterprise,
}

impl Plan {
    pub const ALL: [Plan; 4] = [Plan::Start, Plan::Groei, Plan::Professional, Plan::Enterprise];

    /// Smallest plan that fits `volunteers`.
    pub fn for_volunteers(volunteers: u32) -> Plan {
        Self::ALL
            .into_iter()
            .find(|plan| plan.max_volunteers().is_none_or(|max| volunteers <= max))
            .unwrap_or(Plan::Enterprise)
    }

    /// Upper volunteer bound, `None` for the open-ended plan.
    pub const fn max_volunteers(self) -> Option<u32> {
        match self {
            Plan::Start => Some(50),
            Plan::Groei => Some(250),
            Plan::Professional => Some(1000),
            Plan::Enterprise => None,
        }
    }

    /// List price per month, `None` when priced on request.
    pub fn monthly_price(self) -> Option<MoneyCents> {
        let cents = match self {
            Plan::Start => 4_900,
            Plan::Groei => 14_900,
            Plan::Professional => 34_900,
            Plan::Enterprise => return None,
        };
        MoneyCents::new(cents).ok()
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Plan::Start => "start",
            Plan::Groei => "groei",
            Plan::Professional => "professional",
            Plan::Enterprise => "enterprise",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Plan::Start => "Start",
            Plan::Groei => "Groei",
            Plan::Professional => "Professional",
            Plan::Enterprise => "Enterprise",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingPeriod {
    #[default]
    Monthly,
    Yearly,
}

impl FromStr for BillingPeriod {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "monthly" => Ok(BillingPeriod::Monthly),
            "yearly" => Ok(BillingPeriod::Yearly),
            other => Err(TypeConstraintError::InvalidValue(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PriceQuote {
    pub plan: Plan,
    pub plan_label: &'static str,
    pub billing: BillingPeriod,
    pub volunteer_count: u32,
    /// Effective price per month after any discount.
    pub monthly_price: Option<MoneyCents>,
    /// Amount invoiced per billing period.
    pub period_price: Option<MoneyCents>,
    pub yearly_savings: Option<MoneyCents>,
    pub happiness_moments_per_month: u64,
    pub price_per_happiness_moment: Option<f64>,
}

/// Computes a quote for `volunteers` giving on average `hours_per_month` each.
pub fn quote(volunteers: u32, hours_per_month: f64, billing: BillingPeriod) -> PriceQuote {
    let plan = Plan::for_volunteers(volunteers);
    let hours = if hours_per_month.is_finite() && hours_per_month > 0.0 {
        hours_per_month
    } else {
        0.0
    };
    let happiness_moments_per_month =
        (f64::from(volunteers) * hours * HAPPINESS_MOMENTS_PER_HOUR).round() as u64;

    let list = plan.monthly_price().map(MoneyCents::get);
    let (monthly, period, savings) = match (list, billing) {
        (None, _) => (None, None, None),
        (Some(list), BillingPeriod::Monthly) => (Some(list), Some(list), None),
        (Some(list), BillingPeriod::Yearly) => {
            let full_year = list * 12;
            let discounted = full_year * (100 - YEARLY_DISCOUNT_PERCENT) / 100;
            (
                Some(discounted / 12),
                Some(discounted),
                Some(full_year - discounted),
            )
        }
    };
    let to_money = |cents: Option<i64>| cents.and_then(|c| MoneyCents::new(c).ok());

    let price_per_happiness_moment = match monthly {
        Some(cents) if happiness_moments_per_month > 0 => Some(
            (cents as f64 / 100.0 / happiness_moments_per_month as f64 * 10_000.0).round()
                / 10_000.0,
        ),
        _ => None,
    };

    PriceQuote {
        plan,
        plan_label: plan.label(),
        billing,
        volunteer_count: volunteers,
        monthly_price: to_money(monthly),
        period_price: to_money(period),
        yearly_savings: to_money(savings),
        happiness_moments_per_month,
        price_per_happiness_moment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_boundaries() {
        assert_eq!(Plan::for_volunteers(0), Plan::Start);
        assert_eq!(Plan::for_volunteers(50), Plan::Start);
        assert_eq!(Plan::for_volunteers(51), Plan::Groei);
        assert_eq!(Plan::for_volunteers(1000), Plan::Professional);
        assert_eq!(Plan::for_volunteers(1001), Plan::Enterprise);
    }

    #[test]
    fn monthly_quote_uses_list_price() {
        let q = quote(60, 8.0, BillingPeriod::Monthly);
        assert_eq!(q.plan, Plan::Groei);
        assert_eq!(q.monthly_price.unwrap().get(), 14_900);
        assert_eq!(q.period_price.unwrap().get(), 14_900);
        assert_eq!(q.happiness_moments_per_month, 2_400);
        assert_eq!(q.price_per_happiness_moment, Some(0.0621));
    }

    #[test]
    fn yearly_quote_applies_discount() {
        let q = quote(40, 4.0, BillingPeriod::Yearly);
        assert_eq!(q.plan, Plan::Start);
        assert_eq!(q.period_price.unwrap().get(), 49_980);
        assert_eq!(q.yearly_savings.unwrap().get(), 8_820);
        assert_eq!(q.monthly_price.unwrap().get(), 4_165);
    }

    #[test]
    fn enterprise_is_priced_on_request() {
        let q = quote(5_000, 8.0, BillingPeriod::Yearly);
        assert_eq!(q.plan, Plan::Enterprise);
        assert!(q.monthly_price.is_none());
        assert!(q.price_per_happiness_moment.is_none());
        assert_eq!(q.happiness_moments_per_month, 200_000);
    }
}
