//! Rendering of `jsonschema` errors as `<RuleTag>: #/<field>` messages.

use jsonschema::ValidationError;
use jsonschema::error::ValidationErrorKind;

/// Name of the custom format used for submission dates.
pub const TRIAL_DATE_FORMAT: &str = "trial-date";

/// One message per violated rule. `AdditionalProperties` can name several
/// fields at once and expands to one message each.
pub(crate) fn describe(error: &ValidationError<'_>) -> Vec<String> {
    let path = error.instance_path.to_string();
    let tagged = |tag: &str| vec![format!("{tag}: #{path}")];

    match &error.kind {
        ValidationErrorKind::Required { property } => {
            let name = property
                .as_str()
                .map_or_else(|| property.to_string(), str::to_string);
            vec![format!("PropertyRequired: #{path}/{name}")]
        }
        ValidationErrorKind::AdditionalProperties { unexpected } => unexpected
            .iter()
            .map(|name| format!("NoAdditionalPropertiesAllowed: #{path}/{name}"))
            .collect(),
        ValidationErrorKind::Enum { .. } => tagged("NotInEnumeration"),
        ValidationErrorKind::Minimum { .. } | ValidationErrorKind::ExclusiveMinimum { .. } => {
            tagged("NumberTooSmall")
        }
        ValidationErrorKind::Maximum { .. } | ValidationErrorKind::ExclusiveMaximum { .. } => {
            tagged("NumberTooBig")
        }
        ValidationErrorKind::MinLength { .. } => tagged("StringTooShort"),
        ValidationErrorKind::MaxLength { .. } => tagged("StringTooLong"),
        ValidationErrorKind::Format { format } if format == TRIAL_DATE_FORMAT => {
            tagged("DateTimeExpected")
        }
        ValidationErrorKind::Format { .. } => tagged("InvalidFormat"),
        ValidationErrorKind::Type { .. } => tagged("TypeMismatch"),
        _ => vec![format!("{error}: #{path}")],
    }
}
