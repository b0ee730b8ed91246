//! Licensing - Subscription plans and plan assignment

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::operator::{Subscription, SubscriptionStatus, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PlanDuration {
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

impl PlanDuration {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Monthly => "Monthly",
            Self::Quarterly => "Quarterly",
            Self::Yearly => "Yearly",
        }
    }

    pub fn days(&self) -> i64 {
        match self {
            Self::Monthly => 30,
            Self::Quarterly => 90,
            Self::Yearly => 365,
        }
    }

    pub fn all() -> &'static [PlanDuration] {
        &[
            PlanDuration::Monthly,
            PlanDuration::Quarterly,
            PlanDuration::Yearly,
        ]
    }
}

/// A pricing tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionPlan {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub duration: PlanDuration,
    pub features: Vec<String>,
}

impl SubscriptionPlan {
    /// A blank plan for the admin editor
    pub fn blank() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: "New Tier".to_string(),
            price: 0.0,
            duration: PlanDuration::Monthly,
            features: Vec::new(),
        }
    }
}

fn plan(id: &str, name: &str, price: f64, duration: PlanDuration, features: &[&str]) -> SubscriptionPlan {
    SubscriptionPlan {
        id: id.to_string(),
        name: name.to_string(),
        price,
        duration,
        features: features.iter().map(|f| f.to_string()).collect(),
    }
}

/// Seed plan list
pub fn default_plans() -> Vec<SubscriptionPlan> {
    vec![
        plan(
            "pro",
            "Pro Operator",
            49.0,
            PlanDuration::Monthly,
            &["AI Diagnostics", "Device Blueprint", "Unlimited vault snapshots"],
        ),
        plan(
            "forensic",
            "Forensic Suite",
            129.0,
            PlanDuration::Quarterly,
            &[
                "Everything in Pro",
                "Elevation Lab",
                "Identity Reset",
                "Advanced Analyzers",
            ],
        ),
        plan(
            "enterprise",
            "Enterprise Link",
            449.0,
            PlanDuration::Yearly,
            &[
                "Everything in Forensic",
                "Multi-operator control",
                "Priority cloud vault",
                "Dedicated support channel",
            ],
        ),
    ]
}

/// Grant `plan` to `user`, expiring one plan duration from `now`
pub fn subscribe(user: &mut User, plan: &SubscriptionPlan, now: DateTime<Utc>) {
    let expiry = now + TimeDelta::days(plan.duration.days());
    user.subscription = Some(Subscription {
        plan_id: plan.id.clone(),
        status: SubscriptionStatus::Active,
        expiry_date: Some(expiry),
    });
}

/// Look up the plan a user currently holds
pub fn current_plan<'a>(user: &User, plans: &'a [SubscriptionPlan]) -> Option<&'a SubscriptionPlan> {
    let plan_id = &user.subscription.as_ref()?.plan_id;
    plans.iter().find(|p| &p.id == plan_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::operator::google_user;

    #[test]
    fn subscribe_sets_active_license_with_expiry() {
        let now = Utc::now();
        let plans = default_plans();
        let mut user = google_user();
        assert!(!user.has_license(now));

        subscribe(&mut user, &plans[1], now);

        let sub = user.subscription.as_ref().unwrap();
        assert_eq!(sub.plan_id, "forensic");
        assert_eq!(sub.expiry_date, Some(now + TimeDelta::days(90)));
        assert!(user.has_license(now));
        assert!(!user.has_license(now + TimeDelta::days(91)));
        assert_eq!(current_plan(&user, &plans).unwrap().name, "Forensic Suite");
    }

    #[test]
    fn seed_plans_have_unique_ids() {
        let plans = default_plans();
        let mut ids: Vec<_> = plans.iter().map(|p| p.id.as_str()).collect();
        ids.dedup();
        assert_eq!(ids.len(), plans.len());
    }
}
