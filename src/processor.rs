//! Functions for admitting person records and processing batches of them.

use crate::domain::{clean_domain_input, is_valid_domain};
use crate::error::{AppError, Result};
use crate::models::{BatchOutcome, Person, PersonInput, SkippedRecord};
use crate::patterns::generate_for_all;
use crate::styles::split_full_name;

fn trimmed(field: &Option<String>) -> String {
    field.as_deref().unwrap_or("").trim().to_string()
}

/// Validates a raw record and turns it into a [`Person`].
///
/// Missing first/last names are derived from `full_name` when it is given.
/// The domain is cleaned (leading `@`, scheme, `www.`) and must pass
/// [`is_valid_domain`].
///
/// # Returns
/// * `Err(AppError::InsufficientInput)` listing the missing fields.
/// * `Err(AppError::InvalidDomain)` (or a domain extraction error) for a malformed domain.
pub(crate) fn admit_person(input: &PersonInput) -> Result<Person> {
    let mut first_name = trimmed(&input.first_name);
    let mut last_name = trimmed(&input.last_name);
    let full_name = trimmed(&input.full_name);
    let domain_input = trimmed(&input.domain);

    if (first_name.is_empty() || last_name.is_empty()) && !full_name.is_empty() {
        let (derived_first, derived_last) = split_full_name(&full_name);
        if first_name.is_empty() {
            first_name = derived_first;
        }
        if last_name.is_empty() {
            last_name = derived_last;
        }
        tracing::debug!(
            "Derived names from '{}': First='{}', Last='{}'",
            full_name,
            first_name,
            last_name
        );
    }

    let mut missing_parts = Vec::new();
    if first_name.is_empty() {
        missing_parts.push("first name");
    }
    if last_name.is_empty() {
        missing_parts.push("last name");
    }
    if domain_input.is_empty() {
        missing_parts.push("domain");
    }
    if !missing_parts.is_empty() {
        return Err(AppError::InsufficientInput(format!(
            "Missing {}",
            missing_parts.join(", ")
        )));
    }

    let domain = clean_domain_input(&domain_input)?;
    if !is_valid_domain(&domain) {
        return Err(AppError::InvalidDomain(domain));
    }

    Ok(Person::new(first_name, last_name, domain))
}

/// Admits every record and generates patterns for the admitted ones.
///
/// Rejected records are reported in `skipped` with their position; they never
/// abort the batch.
pub(crate) fn process_batch(inputs: &[PersonInput]) -> BatchOutcome {
    tracing::info!(target: "process_batch_task", "Processing {} records.", inputs.len());

    let mut people = Vec::with_capacity(inputs.len());
    let mut skipped = Vec::new();

    for (index, input) in inputs.iter().enumerate() {
        match admit_person(input) {
            Ok(person) => people.push(person),
            Err(e) => {
                tracing::warn!(target: "process_batch_task", "[#{}] Skipping record. Reason: {}", index, e);
                skipped.push(SkippedRecord {
                    index,
                    reason: e.to_string(),
                });
            }
        }
    }

    let report = generate_for_all(&people);
    tracing::info!(target: "process_batch_task",
        "Generated {} candidates for {} people ({} skipped).",
        report.flattened.len(),
        people.len(),
        skipped.len()
    );

    BatchOutcome { report, skipped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claim::{assert_matches, assert_ok};

    fn input(first: Option<&str>, last: Option<&str>, domain: Option<&str>) -> PersonInput {
        PersonInput {
            first_name: first.map(str::to_string),
            last_name: last.map(str::to_string),
            full_name: None,
            domain: domain.map(str::to_string),
        }
    }

    #[test]
    fn test_admit_person_trims_and_cleans_domain() {
        let person = assert_ok!(admit_person(&input(
            Some(" Marie "),
            Some("Curie "),
            Some(" @Sorbonne.fr")
        )));
        assert_eq!(person, Person::new("Marie", "Curie", "sorbonne.fr"));
    }

    #[test]
    fn test_admit_person_derives_names_from_full_name() {
        let record = PersonInput {
            full_name: Some("Jean Pierre Dupont".to_string()),
            domain: Some("https://www.acme.fr/equipe".to_string()),
            ..Default::default()
        };
        let person = assert_ok!(admit_person(&record));
        assert_eq!(person, Person::new("jean-pierre", "dupont", "acme.fr"));
    }

    #[test]
    fn test_admit_person_reports_missing_fields() {
        let err = admit_person(&input(Some("Marie"), Some("  "), None)).unwrap_err();
        assert_matches!(&err, AppError::InsufficientInput(_));
        assert_eq!(err.to_string(), "Insufficient Input Data: Missing last name, domain");
        assert_eq!(err.message_key(), Some("fillAllFields"));
    }

    #[test]
    fn test_admit_person_rejects_invalid_domain() {
        let err = admit_person(&input(Some("Marie"), Some("Curie"), Some("no-tld"))).unwrap_err();
        assert_matches!(&err, AppError::InvalidDomain(_));
        assert_eq!(err.message_key(), Some("invalidDomain"));
    }

    #[test]
    fn test_process_batch_skips_bad_records_and_keeps_order() {
        let inputs = vec![
            input(Some("Marie"), Some("Curie"), Some("sorbonne.fr")),
            input(None, Some("Curie"), Some("sorbonne.fr")),
            input(Some("Pierre"), Some("Curie"), Some("sorbonne.fr")),
        ];

        let outcome = process_batch(&inputs);

        assert_eq!(outcome.report.per_person.len(), 2);
        assert_eq!(outcome.report.per_person[1].person.first_name, "Pierre");
        assert_eq!(outcome.report.flattened.len(), 18);
        assert_eq!(outcome.report.flattened[9], "pierre.curie@sorbonne.fr");
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].index, 1);
    }

    #[test]
    fn test_person_input_accepts_both_key_styles() {
        let records: Vec<PersonInput> = serde_json::from_str(
            r#"[
                {"firstName": "Marie", "lastName": "Curie", "domain": "sorbonne.fr"},
                {"first_name": "Pierre", "last_name": "Curie", "company_domain": "sorbonne.fr"}
            ]"#,
        )
        .unwrap();
        let outcome = process_batch(&records);
        assert!(outcome.skipped.is_empty());
        assert_eq!(outcome.report.per_person.len(), 2);
    }
}
