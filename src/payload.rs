//! JSON payload for the backend's request-creation endpoint.
//!
//! The shape is fixed by the backend contract: camelCase keys, 2-decimal
//! amounts as plain numbers, `null` recurrence fields for one-time charges,
//! and per-id amount maps only for the split type that uses them.

use std::collections::BTreeMap;

use chrono::SecondsFormat;
use serde::Serialize;

use crate::amount::Amount;
use crate::entry::CostEntry;
use crate::split::SplitMethod;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadParticipant {
    pub user_id: String,
    pub amount: Amount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_amount: Option<Amount>,
    /// Always `"pending"` at creation time
    pub status: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestPayload {
    pub name: String,
    pub is_recurring: bool,
    pub participants: Vec<PayloadParticipant>,
    pub split_type: &'static str,
    pub total_amount: Amount,
    /// Sum of the participants' amounts, owner share excluded
    pub total_amount_owed: Amount,
    pub frequency: Option<&'static str>,
    pub custom_interval: Option<u32>,
    pub custom_unit: Option<&'static str>,
    /// RFC 3339 UTC instant, `null` for one-time charges
    pub next_due: Option<String>,
    pub start_timing: String,
    pub is_dynamic: bool,
    pub allow_mark_as_paid_for_everyone: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_amounts: Option<BTreeMap<String, Amount>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage_amounts: Option<BTreeMap<String, f64>>,
}

impl From<&CostEntry> for RequestPayload {
    fn from(entry: &CostEntry) -> Self {
        let participants = entry
            .participants
            .iter()
            .map(|p| PayloadParticipant {
                user_id: p.id.clone(),
                amount: p.amount,
                percentage: p.percentage,
                custom_amount: p.custom_amount,
                status: "pending",
            })
            .collect();
        let (custom_interval, custom_unit) = match entry.rule {
            crate::schedule::RecurrenceRule::Custom { count, unit } => {
                (Some(count), Some(unit.wire_tag()))
            }
            _ => (None, None),
        };
        let custom_amounts = (entry.method == SplitMethod::Custom).then(|| {
            entry
                .participants
                .iter()
                .filter_map(|p| p.custom_amount.map(|a| (p.id.clone(), a)))
                .collect()
        });
        let percentage_amounts = (entry.method == SplitMethod::Percentage).then(|| {
            entry
                .participants
                .iter()
                .filter_map(|p| p.percentage.map(|pct| (p.id.clone(), pct)))
                .collect()
        });
        RequestPayload {
            name: entry.name.clone(),
            is_recurring: entry.rule.is_recurring(),
            participants,
            split_type: entry.method.wire_tag(),
            total_amount: entry.total,
            total_amount_owed: entry.total_owed,
            frequency: entry.rule.wire_tag(),
            custom_interval,
            custom_unit,
            next_due: entry
                .next_due
                .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true)),
            start_timing: entry.start.wire_value(),
            is_dynamic: entry.is_dynamic,
            allow_mark_as_paid_for_everyone: entry.allow_mark_as_paid_for_everyone,
            custom_amounts,
            percentage_amounts,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use crate::entry::EntryDraft;
    use crate::schedule::{IntervalUnit, RecurrenceRule, StartTiming};
    use crate::split::ParticipantInput;

    fn build(draft: EntryDraft) -> RequestPayload {
        RequestPayload::from(&CostEntry::build(draft).unwrap())
    }

    fn monthly_draft() -> EntryDraft {
        EntryDraft {
            name: "Rent".to_string(),
            total: Amount::from_float(90.0),
            participants: vec![ParticipantInput::new("u1"), ParticipantInput::new("u2")],
            method: SplitMethod::EqualIncludingOwner,
            rule: RecurrenceRule::Monthly,
            start: StartTiming::Now,
            is_dynamic: false,
            allow_mark_as_paid_for_everyone: true,
            now: Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn equal_split_payload_shape() {
        let value = serde_json::to_value(build(monthly_draft())).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "Rent",
                "isRecurring": true,
                "participants": [
                    { "userId": "u1", "amount": 30.0, "status": "pending" },
                    { "userId": "u2", "amount": 30.0, "status": "pending" },
                ],
                "splitType": "equalWithMe",
                "totalAmount": 90.0,
                "totalAmountOwed": 60.0,
                "frequency": "monthly",
                "customInterval": null,
                "customUnit": null,
                "nextDue": "2024-06-15T22:00:00Z",
                "startTiming": "now",
                "isDynamic": false,
                "allowMarkAsPaidForEveryone": true,
            })
        );
    }

    #[test]
    fn one_time_payload_nulls_the_recurrence_fields() {
        let value = serde_json::to_value(build(EntryDraft {
            rule: RecurrenceRule::OneTime,
            ..monthly_draft()
        }))
        .unwrap();
        assert_eq!(value["isRecurring"], json!(false));
        assert_eq!(value["frequency"], json!(null));
        assert_eq!(value["nextDue"], json!(null));
        assert_eq!(value["customInterval"], json!(null));
        assert_eq!(value["customUnit"], json!(null));
    }

    #[test]
    fn custom_split_carries_its_amount_map() {
        let value = serde_json::to_value(build(EntryDraft {
            method: SplitMethod::Custom,
            participants: vec![
                ParticipantInput::with_custom_amount("u1", 12.0),
                ParticipantInput::with_custom_amount("u2", 18.5),
            ],
            rule: RecurrenceRule::Custom { count: 3, unit: IntervalUnit::Weeks },
            start: StartTiming::OnDate("2024-07-01".parse().unwrap()),
            ..monthly_draft()
        }))
        .unwrap();
        assert_eq!(value["splitType"], json!("custom"));
        assert_eq!(value["totalAmount"], json!(30.5));
        assert_eq!(value["customAmounts"], json!({ "u1": 12.0, "u2": 18.5 }));
        assert_eq!(value["customInterval"], json!(3));
        assert_eq!(value["customUnit"], json!("weeks"));
        assert_eq!(value["startTiming"], json!("2024-07-01"));
        assert_eq!(value["nextDue"], json!("2024-07-01T22:00:00Z"));
        assert!(value.get("percentageAmounts").is_none());
    }

    #[test]
    fn percentage_split_carries_its_percentage_map() {
        let value = serde_json::to_value(build(EntryDraft {
            method: SplitMethod::Percentage,
            participants: vec![
                ParticipantInput::with_percentage("u1", 25.0),
                ParticipantInput::with_percentage("u2", 75.0),
            ],
            total: Amount::from_float(100.0),
            ..monthly_draft()
        }))
        .unwrap();
        assert_eq!(value["splitType"], json!("percentage"));
        assert_eq!(value["percentageAmounts"], json!({ "u1": 25.0, "u2": 75.0 }));
        assert_eq!(
            value["participants"][0],
            json!({ "userId": "u1", "amount": 25.0, "percentage": 25.0, "status": "pending" })
        );
        assert!(value.get("customAmounts").is_none());
    }
}
