//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// Find an entity by identifier in an ordered collection.
pub fn find_by_id<'a, E: Entity>(items: &'a [E], id: &E::Id) -> Option<&'a E> {
    items.iter().find(|item| item.id() == id)
}

/// Mutable variant of [`find_by_id`].
pub fn find_by_id_mut<'a, E: Entity>(items: &'a mut [E], id: &E::Id) -> Option<&'a mut E> {
    items.iter_mut().find(|item| item.id() == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CategoryId;

    #[derive(Debug, PartialEq)]
    struct Row {
        id: CategoryId,
        label: &'static str,
    }

    impl Entity for Row {
        type Id = CategoryId;

        fn id(&self) -> &Self::Id {
            &self.id
        }
    }

    #[test]
    fn find_by_id_locates_matching_entity() {
        let first = CategoryId::new();
        let second = CategoryId::new();
        let mut rows = vec![
            Row { id: first, label: "a" },
            Row { id: second, label: "b" },
        ];

        assert_eq!(find_by_id(&rows, &second).map(|r| r.label), Some("b"));
        assert!(find_by_id(&rows, &CategoryId::new()).is_none());

        if let Some(row) = find_by_id_mut(&mut rows, &first) {
            row.label = "z";
        }
        assert_eq!(rows[0].label, "z");
    }
}
