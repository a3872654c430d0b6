//! Cached schema validation.
//!
//! `SchemaValidator` compiles each `SchemaKind` on first use and keeps the
//! compiled validator for its own lifetime. Construct one per process and
//! share it (e.g. behind an `Arc`); there is no global instance.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use jsonschema::Validator;

use crate::error::SchemaError;
use crate::kind::SchemaKind;
use crate::messages::{TRIAL_DATE_FORMAT, describe};

/// Outcome of validating one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// One entry per violated rule, in evaluation order. Empty when valid.
    pub errors: Vec<String>,
}

impl ValidationReport {
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// `(is_valid, errors)` pair.
    #[must_use]
    pub fn into_parts(self) -> (bool, Vec<String>) {
        (self.is_valid(), self.errors)
    }
}

/// Validates raw JSON documents against cached, lazily compiled schemas.
///
/// Concurrent first use of the same kind may compile it more than once; the
/// first compiled validator to reach the cache is kept and the others dropped.
#[derive(Default)]
pub struct SchemaValidator {
    compiled: RwLock<HashMap<SchemaKind, Arc<Validator>>>,
}

impl SchemaValidator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate raw bytes against `kind`.
    ///
    /// Bytes that are not JSON at all produce an invalid report with a single
    /// `Invalid JSON format: ...` message.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError` only if the schema itself cannot be loaded or
    /// compiled. Document problems are reported through `ValidationReport`.
    pub fn validate(&self, raw: &[u8], kind: SchemaKind) -> Result<ValidationReport, SchemaError> {
        let document: serde_json::Value = match serde_json::from_slice(raw) {
            Ok(document) => document,
            Err(e) => {
                // Compile anyway so a broken schema surfaces even on bad input.
                self.compiled(kind)?;
                return Ok(ValidationReport {
                    errors: vec![format!("Invalid JSON format: {e}")],
                });
            }
        };
        self.validate_value(&document, kind)
    }

    /// Validate raw bytes against a schema named at runtime.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::UnknownKind` if `name` is not a `SchemaKind`, and
    /// otherwise the same errors as [`Self::validate`].
    pub fn validate_named(&self, raw: &[u8], name: &str) -> Result<ValidationReport, SchemaError> {
        let kind: SchemaKind = name.parse()?;
        self.validate(raw, kind)
    }

    /// Validate an already parsed document.
    ///
    /// # Errors
    ///
    /// Same as [`Self::validate`].
    pub fn validate_value(
        &self,
        document: &serde_json::Value,
        kind: SchemaKind,
    ) -> Result<ValidationReport, SchemaError> {
        let validator = self.compiled(kind)?;
        let errors: Vec<String> = validator
            .iter_errors(document)
            .flat_map(|e| describe(&e))
            .collect();
        Ok(ValidationReport { errors })
    }

    /// Whether `kind` has already been compiled.
    #[must_use]
    pub fn is_cached(&self, kind: SchemaKind) -> bool {
        self.compiled
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&kind)
    }

    fn compiled(&self, kind: SchemaKind) -> Result<Arc<Validator>, SchemaError> {
        if let Some(validator) = self
            .compiled
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&kind)
        {
            return Ok(Arc::clone(validator));
        }

        let definition = kind.definition()?;
        let validator = jsonschema::options()
            .should_validate_formats(true)
            .with_format(TRIAL_DATE_FORMAT, trial_core::dates::is_trial_date)
            .build(&definition)
            .map_err(|e| SchemaError::Compilation {
                kind: kind.to_string(),
                reason: e.to_string(),
            })?;
        tracing::debug!(%kind, "compiled schema");

        // Compilation is idempotent, so a lost race just drops our copy.
        let mut cache = self
            .compiled
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(
            cache.entry(kind).or_insert_with(|| Arc::new(validator)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn validate(json: &str) -> ValidationReport {
        SchemaValidator::new()
            .validate(json.as_bytes(), SchemaKind::ClinicalTrial)
            .unwrap()
    }

    #[test]
    fn valid_document_passes() {
        let report = validate(
            r#"{
                "trialId": "TEST-001",
                "title": "Test Trial",
                "startDate": "2024-01-25",
                "endDate": "2024-02-25",
                "participants": 100,
                "status": "Ongoing"
            }"#,
        );
        assert_eq!(report.into_parts(), (true, vec![]));
    }

    #[test]
    fn nullable_optionals_pass() {
        let report = validate(
            r#"{
                "trialId": "TEST-001",
                "title": "Test Trial",
                "startDate": "2024-01-25T08:00:00+01:00",
                "endDate": null,
                "participants": null,
                "status": "NotStarted"
            }"#,
        );
        assert!(report.is_valid(), "{:?}", report.errors);
    }

    #[rstest]
    #[case("trialId")]
    #[case("title")]
    #[case("startDate")]
    #[case("status")]
    fn missing_required_field_is_named(#[case] field: &str) {
        let mut doc = serde_json::json!({
            "trialId": "TEST-001",
            "title": "Test Trial",
            "startDate": "2024-01-25",
            "status": "Ongoing"
        });
        doc.as_object_mut().unwrap().remove(field);

        let report = SchemaValidator::new()
            .validate_value(&doc, SchemaKind::ClinicalTrial)
            .unwrap();
        assert_eq!(report.errors, vec![format!("PropertyRequired: #/{field}")]);
    }

    #[test]
    fn invalid_date_names_field() {
        let report = validate(
            r#"{"trialId": "T", "title": "T", "startDate": "invalid-date", "status": "Ongoing"}"#,
        );
        assert_eq!(report.errors, vec!["DateTimeExpected: #/startDate".to_string()]);
    }

    #[test]
    fn invalid_end_date_names_field() {
        let report = validate(
            r#"{"trialId": "T", "title": "T", "startDate": "2024-01-25", "endDate": "2024-02-31", "status": "Ongoing"}"#,
        );
        assert_eq!(report.errors, vec!["DateTimeExpected: #/endDate".to_string()]);
    }

    #[rstest]
    #[case("+10000-01-25")]
    #[case("9999-12-31T23:00:00-02:00")]
    fn five_digit_year_is_not_a_date(#[case] start: &str) {
        let doc = serde_json::json!({
            "trialId": "T",
            "title": "T",
            "startDate": start,
            "status": "Completed"
        });
        let report = SchemaValidator::new()
            .validate_value(&doc, SchemaKind::ClinicalTrial)
            .unwrap();
        assert_eq!(report.errors, vec!["DateTimeExpected: #/startDate".to_string()]);
    }

    #[test]
    fn invalid_status_names_field() {
        let report = validate(
            r#"{"trialId": "T", "title": "T", "startDate": "2024-01-25", "status": "Invalid"}"#,
        );
        assert!(!report.is_valid());
        assert!(report.errors.iter().any(|e| e.contains("status")));
        assert!(report.errors.iter().any(|e| e.starts_with("NotInEnumeration")));
    }

    #[rstest]
    #[case(0)]
    #[case(-5)]
    fn participants_below_one_rejected(#[case] participants: i64) {
        let doc = serde_json::json!({
            "trialId": "T",
            "title": "T",
            "startDate": "2024-01-25",
            "status": "Ongoing",
            "participants": participants
        });
        let report = SchemaValidator::new()
            .validate_value(&doc, SchemaKind::ClinicalTrial)
            .unwrap();
        assert_eq!(report.errors, vec!["NumberTooSmall: #/participants".to_string()]);
    }

    #[test]
    fn additional_property_cites_rule() {
        let report = validate(
            r#"{"trialId": "T", "title": "T", "startDate": "2024-01-25", "status": "Ongoing", "unknownProperty": "value"}"#,
        );
        assert_eq!(
            report.errors,
            vec!["NoAdditionalPropertiesAllowed: #/unknownProperty".to_string()]
        );
    }

    #[test]
    fn multiple_violations_are_all_reported() {
        let report = validate(r#"{"title": "", "startDate": "nope", "status": "Paused"}"#);
        assert!(report.errors.len() >= 4, "{:?}", report.errors);
        assert!(report.errors.contains(&"PropertyRequired: #/trialId".to_string()));
        assert!(report.errors.contains(&"StringTooShort: #/title".to_string()));
    }

    #[test]
    fn malformed_json_is_single_message() {
        let report = validate("{ invalid json }");
        assert!(!report.is_valid());
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("Invalid JSON format: "));
    }

    #[test]
    fn non_object_document_is_rejected() {
        let report = validate("[1, 2, 3]");
        assert_eq!(report.errors, vec!["TypeMismatch: #".to_string()]);
    }

    #[test]
    fn unknown_named_kind_is_fatal() {
        let result = SchemaValidator::new().validate_named(b"{}", "bogus");
        assert!(matches!(result, Err(SchemaError::UnknownKind(_))));
    }

    #[test]
    fn named_kind_validates() {
        let report = SchemaValidator::new()
            .validate_named(
                br#"{"trialId": "T", "title": "T", "startDate": "2024-01-25", "status": "Completed"}"#,
                "clinicaltrial",
            )
            .unwrap();
        assert!(report.is_valid());
    }

    #[test]
    fn schema_is_compiled_once_and_cached() {
        let validator = SchemaValidator::new();
        assert!(!validator.is_cached(SchemaKind::ClinicalTrial));
        validator.validate(b"{}", SchemaKind::ClinicalTrial).unwrap();
        assert!(validator.is_cached(SchemaKind::ClinicalTrial));
        assert!(!validator.is_cached(SchemaKind::TrialRecord));

        let first = validator.compiled(SchemaKind::ClinicalTrial).unwrap();
        let second = validator.compiled(SchemaKind::ClinicalTrial).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn generated_event_schema_accepts_serialized_event() {
        use chrono::{TimeZone, Utc};
        use trial_core::entities::TrialRecord;
        use trial_core::enums::TrialStatus;
        use trial_core::events::TrialCreated;

        let event = TrialCreated::now(TrialRecord {
            id: "trl-00000001".into(),
            trial_id: "T-1".into(),
            title: "X".into(),
            start_date: Utc.with_ymd_and_hms(2024, 1, 25, 0, 0, 0).unwrap().fixed_offset(),
            end_date: Some(Utc.with_ymd_and_hms(2024, 2, 25, 0, 0, 0).unwrap().fixed_offset()),
            participants: Some(100),
            status: TrialStatus::Ongoing,
            duration_in_days: Some(31),
            created_at: Utc::now(),
            updated_at: None,
        });
        let json = serde_json::to_value(&event).unwrap();
        let report = SchemaValidator::new()
            .validate_value(&json, SchemaKind::TrialCreated)
            .unwrap();
        assert!(report.is_valid(), "{:?}", report.errors);
    }
}
