//! In-memory list of people waiting for pattern generation.

use crate::models::Person;
use serde::Serialize;

pub(crate) type PersonId = u64;

/// A person together with the id the store gave it.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct StoredPerson {
    pub id: PersonId,
    #[serde(flatten)]
    pub person: Person,
}

/// Ordered list of admitted people. Ids are never reused.
#[derive(Debug, Default)]
pub(crate) struct PeopleStore {
    next_id: PersonId,
    people: Vec<StoredPerson>,
}

impl PeopleStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends a person and returns its id.
    pub(crate) fn add(&mut self, person: Person) -> PersonId {
        self.next_id += 1;
        let id = self.next_id;
        tracing::debug!("Adding person #{}: {}", id, person.display_name());
        self.people.push(StoredPerson { id, person });
        id
    }

    /// Removes the person with `id`, returning it if it was present.
    pub(crate) fn remove(&mut self, id: PersonId) -> Option<Person> {
        let index = self.people.iter().position(|p| p.id == id)?;
        let removed = self.people.remove(index);
        tracing::debug!("Removed person #{}: {}", id, removed.person.display_name());
        Some(removed.person)
    }

    /// The people in insertion order.
    pub(crate) fn list(&self) -> Vec<Person> {
        self.people.iter().map(|p| p.person.clone()).collect()
    }

    pub(crate) fn entries(&self) -> &[StoredPerson] {
        &self.people
    }

    pub(crate) fn len(&self) -> usize {
        self.people.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.people.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curie(first: &str) -> Person {
        Person::new(first, "Curie", "sorbonne.fr")
    }

    #[test]
    fn test_add_and_list_keep_insertion_order() {
        let mut store = PeopleStore::new();
        assert!(store.is_empty());
        store.add(curie("Marie"));
        store.add(curie("Pierre"));
        assert_eq!(store.len(), 2);
        assert_eq!(store.list(), vec![curie("Marie"), curie("Pierre")]);
    }

    #[test]
    fn test_remove_by_id() {
        let mut store = PeopleStore::new();
        let marie = store.add(curie("Marie"));
        let pierre = store.add(curie("Pierre"));

        assert_eq!(store.remove(marie), Some(curie("Marie")));
        assert_eq!(store.remove(marie), None);
        assert_eq!(store.entries().len(), 1);
        assert_eq!(store.entries()[0].id, pierre);
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut store = PeopleStore::new();
        let first = store.add(curie("Marie"));
        store.remove(first);
        let second = store.add(curie("Irène"));
        assert_ne!(first, second);
    }

    #[test]
    fn test_stored_person_serializes_flat() {
        let mut store = PeopleStore::new();
        store.add(curie("Marie"));
        let json = serde_json::to_value(&store.entries()[0]).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["firstName"], "Marie");
        assert_eq!(json["domain"], "sorbonne.fr");
    }
}
