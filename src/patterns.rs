//! Generates the candidate email addresses for a person and aggregates them for a list.

use crate::models::{PatternReport, Person, PersonPatterns};
use crate::normalize::normalize;

/// First character of `s` as a string, or "" when `s` is empty.
fn initial(s: &str) -> &str {
    s.char_indices()
        .nth(1)
        .map_or(s, |(end, _)| &s[..end])
}

/// Generates the ordered list of candidate email addresses for a person.
///
/// Names are trimmed and folded with [`normalize`], the domain is trimmed and
/// lowercased. Candidates come out in a fixed order:
///
/// | # | local-part           | example                  |
/// |---|----------------------|--------------------------|
/// | 1 | `firstname.lastname` | `marie.curie@sorbonne.fr`|
/// | 2 | `firstnamelastname`  | `mariecurie@sorbonne.fr` |
/// | 3 | `f.lastname`         | `m.curie@sorbonne.fr`    |
/// | 4 | `firstname`          | `marie@sorbonne.fr`      |
/// | 5 | `lastname.firstname` | `curie.marie@sorbonne.fr`|
/// | 6 | `lastnamefirstname`  | `curiemarie@sorbonne.fr` |
/// | 7 | `flastname`          | `mcurie@sorbonne.fr`     |
/// | 8 | `l.firstname`        | `c.marie@sorbonne.fr`    |
/// | 9 | `fl`                 | `mc@sorbonne.fr`         |
///
/// Two empty names yield nothing. A single empty name still yields all nine,
/// dangling separators included (`marie.@sorbonne.fr`, `@sorbonne.fr`).
///
/// The domain is not validated here; callers check it beforehand.
pub(crate) fn generate_email_patterns(person: &Person) -> Vec<String> {
    let first = normalize(person.first_name.trim());
    let last = normalize(person.last_name.trim());
    let domain = person.domain.trim().to_lowercase();

    if first.is_empty() && last.is_empty() {
        tracing::debug!("No name parts for domain {}; no patterns generated.", domain);
        return Vec::new();
    }

    tracing::debug!("Generating patterns for {} {} @ {}", first, last, domain);

    let f = initial(&first);
    let l = initial(&last);

    let local_parts = [
        format!("{}.{}", first, last),
        format!("{}{}", first, last),
        format!("{}.{}", f, last),
        first.clone(),
        format!("{}.{}", last, first),
        format!("{}{}", last, first),
        format!("{}{}", f, last),
        format!("{}.{}", l, first),
        format!("{}{}", f, l),
    ];

    local_parts
        .iter()
        .map(|local| format!("{}@{}", local, domain))
        .collect()
}

/// Generates the candidates of every person, keeping input order.
///
/// The flattened list is the concatenation of each person's candidates and is
/// not deduplicated: two identical people contribute their addresses twice.
pub(crate) fn generate_for_all(people: &[Person]) -> PatternReport {
    let per_person: Vec<PersonPatterns> = people
        .iter()
        .map(|person| PersonPatterns {
            person: person.clone(),
            patterns: generate_email_patterns(person),
        })
        .collect();

    let flattened = per_person
        .iter()
        .flat_map(|entry| entry.patterns.iter().cloned())
        .collect();

    PatternReport {
        per_person,
        flattened,
    }
}
