// src/services/reports/grouping.rs

use std::{collections::HashMap, hash::Hash};

/// Agrupamento que preserva a ordem da primeira ocorrência de cada chave.
///
/// Os valores ficam num `Vec` (arena) e o `HashMap` guarda só o índice,
/// então cada acúmulo é O(1) e a saída sai na ordem em que as chaves apareceram.
#[derive(Debug)]
pub struct OrderedGroups<K, V> {
    index: HashMap<K, usize>,
    entries: Vec<(K, V)>,
}

impl<K, V> OrderedGroups<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self { index: HashMap::new(), entries: Vec::new() }
    }

    /// Devolve o grupo da chave, criando-o com `init` na primeira vez.
    pub fn entry_or_insert_with(&mut self, key: K, init: impl FnOnce() -> V) -> &mut V {
        let position = match self.index.get(&key) {
            Some(&position) => position,
            None => {
                self.entries.push((key.clone(), init()));
                self.index.insert(key, self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        &mut self.entries[position].1
    }

    pub fn iter(&self) -> impl Iterator<Item = &(K, V)> {
        self.entries.iter()
    }

    pub fn into_values(self) -> impl Iterator<Item = V> {
        self.entries.into_iter().map(|(_, value)| value)
    }
}

#[cfg(test)]
impl<K, V> OrderedGroups<K, V>
where
    K: Eq + Hash,
{
    pub fn get(&self, key: &K) -> Option<&V> {
        self.index.get(key).map(|&position| &self.entries[position].1)
    }
}

impl<K, V> Default for OrderedGroups<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_seen_order_is_kept() {
        let mut groups: OrderedGroups<&str, u32> = OrderedGroups::new();
        for key in ["b", "a", "b", "c", "a", "b"] {
            *groups.entry_or_insert_with(key, || 0) += 1;
        }

        let collected: Vec<_> = groups.iter().cloned().collect();
        assert_eq!(collected, vec![("b", 3), ("a", 2), ("c", 1)]);
        assert_eq!(groups.get(&"a"), Some(&2));
        assert_eq!(groups.get(&"z"), None);
    }

    #[test]
    fn test_init_runs_once_per_key() {
        let mut calls = 0;
        let mut groups: OrderedGroups<u8, Vec<u8>> = OrderedGroups::new();
        for value in [1u8, 1, 2, 1] {
            groups
                .entry_or_insert_with(value, || {
                    calls += 1;
                    Vec::new()
                })
                .push(value);
        }
        assert_eq!(calls, 2);
        assert_eq!(groups.iter().count(), 2);
    }
}
