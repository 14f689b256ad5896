//! Built-in schemas for the two scoring model contracts.

use super::schema::{ChoiceOption, ElapsedRule, FieldSpec, FormId, FormSchema, SchemaError};

/// Build the schema shown for `id`.
pub fn schema_for(id: FormId) -> Result<FormSchema, SchemaError> {
    match id {
        FormId::ModelV1 => transfer_schema(),
        FormId::ModelV2 => upi_schema(),
    }
}

/// Banking-transfer fields scored by the V1 model.
pub fn transfer_schema() -> Result<FormSchema, SchemaError> {
    let transfer_types: Vec<ChoiceOption> = ["TRANSFER", "CASH_IN", "CASH_OUT", "PAYMENT", "DEBIT"]
        .into_iter()
        .map(ChoiceOption::text)
        .collect();
    FormSchema::new(
        FormId::ModelV1,
        "Banking transfer",
        vec![
            FieldSpec::number("step", "Step (hour)").in_section("Transaction"),
            FieldSpec::choice("type", "Transaction type", transfer_types).in_section("Transaction"),
            FieldSpec::number("amount", "Amount").in_section("Transaction"),
            FieldSpec::text("nameOrig", "Sender UPI ID").in_section("Sender"),
            FieldSpec::number("oldbalanceOrg", "Sender old balance").in_section("Sender"),
            FieldSpec::number("newbalanceOrig", "Sender new balance").in_section("Sender"),
            FieldSpec::text("nameDest", "Receiver UPI ID").in_section("Receiver"),
            FieldSpec::number("oldbalanceDest", "Receiver old balance").in_section("Receiver"),
            FieldSpec::number("newbalanceDest", "Receiver new balance").in_section("Receiver"),
            FieldSpec::choice(
                "isFlaggedFraud",
                "Flagged by bank",
                vec![ChoiceOption::number("No", 0.0), ChoiceOption::number("Yes", 1.0)],
            )
            .in_section("Receiver"),
        ],
        None,
    )
}

/// UPI transaction fields scored by the V2 model.
pub fn upi_schema() -> Result<FormSchema, SchemaError> {
    let options = |values: &[&str]| -> Vec<ChoiceOption> {
        values.iter().copied().map(ChoiceOption::text).collect()
    };
    FormSchema::new(
        FormId::ModelV2,
        "UPI transaction",
        vec![
            FieldSpec::text("Transaction_ID", "Transaction ID").in_section("Transaction"),
            FieldSpec::datetime("Timestamp", "Timestamp").in_section("Transaction"),
            FieldSpec::number("Amount", "Amount").in_section("Transaction"),
            FieldSpec::choice(
                "Transaction_Type",
                "Transaction type",
                options(&["P2P", "P2M", "Bill_Pay", "Collect_Request"]),
            )
            .in_section("Transaction"),
            FieldSpec::choice(
                "Channel",
                "Channel",
                options(&["QR_Scan", "Intent_Link", "Manual_VPA"]),
            )
            .in_section("Transaction"),
            FieldSpec::text("Sender_ID", "Sender ID").in_section("Parties"),
            FieldSpec::text("Receiver_ID", "Receiver ID").in_section("Parties"),
            FieldSpec::toggle("Is_First_Time_Receiver", "First-time receiver")
                .in_section("Parties"),
            FieldSpec::text("Device_ID", "Device ID").in_section("Device & network"),
            FieldSpec::number("Geo_Jump", "Geo jump")
                .with_hint("Distance from last location (km)")
                .in_section("Device & network"),
            FieldSpec::choice(
                "Network_Type",
                "Network type",
                options(&["4G", "5G", "Public_WiFi"]),
            )
            .in_section("Device & network"),
            FieldSpec::number("Amount_Change_Ratio", "Amount change ratio")
                .in_section("Sender history"),
            FieldSpec::number("Sender_Account_Age", "Sender account age")
                .with_hint("Days")
                .in_section("Sender history"),
            FieldSpec::number("Avg_Transaction_Value", "Average transaction value")
                .in_section("Sender history"),
            FieldSpec::number("Txn_Count_1h", "Transactions in last hour")
                .in_section("Sender history"),
            FieldSpec::datetime("Last_Txn_Timestamp", "Last transaction time")
                .in_section("Sender history"),
        ],
        Some(ElapsedRule {
            current_key: "Timestamp".into(),
            last_key: "Last_Txn_Timestamp".into(),
            derived_key: "Time_Since_Last_Txn".into(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{FieldValue, FormState, build_payload};

    #[test]
    fn builtin_schemas_are_valid() {
        for id in FormId::ALL {
            let schema = schema_for(id).unwrap();
            assert_eq!(schema.id(), id);
            assert!(!schema.fields().is_empty());
        }
    }

    #[test]
    fn transfer_defaults_match_form_defaults() {
        let schema = transfer_schema().unwrap();
        let state = FormState::initialize(&schema);
        assert_eq!(state.value("type"), Some(&FieldValue::Text("TRANSFER".into())));
        assert_eq!(state.value("isFlaggedFraud"), Some(&FieldValue::Number(0.0)));
        assert_eq!(state.value("step"), Some(&FieldValue::Empty));
    }

    #[test]
    fn upi_payload_carries_derived_field_instead_of_last_timestamp() {
        let schema = upi_schema().unwrap();
        let payload = build_payload(&schema, &FormState::initialize(&schema)).unwrap();
        assert!(payload.get("Last_Txn_Timestamp").is_none());
        assert_eq!(
            payload.get("Time_Since_Last_Txn"),
            Some(&serde_json::json!(99_999))
        );
        assert_eq!(payload.get("Is_First_Time_Receiver"), Some(&serde_json::json!(false)));
        assert_eq!(payload.get("Network_Type"), Some(&serde_json::json!("4G")));
        assert_eq!(payload.len(), schema.fields().len());
    }
}
