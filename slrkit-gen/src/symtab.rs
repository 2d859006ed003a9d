use smartstring::alias::String;
use std::collections::HashMap;
use std::slice::Iter;

/// Interns symbol spellings, handing out dense indices in first-seen order.
///
/// Serialized as the list of spellings; the lookup map is rebuilt on
/// deserialization.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "Vec<String>", into = "Vec<String>")
)]
pub struct Symtab {
    map: HashMap<String, usize>,
    vec: Vec<String>,
}

impl Symtab {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
            vec: Vec::new(),
        }
    }

    /// Returns the index of `sym`, inserting it first if it is new.
    pub fn add(&mut self, sym: &str) -> usize {
        if let Some(&idx) = self.map.get(sym) {
            return idx;
        }
        let idx = self.vec.len();
        let owned = String::from(sym);
        self.vec.push(owned.clone());
        self.map.insert(owned, idx);
        idx
    }

    pub fn idx(&self, sym: &str) -> Option<usize> {
        self.map.get(sym).copied()
    }

    pub fn sym(&self, idx: usize) -> Option<&str> {
        self.vec.get(idx).map(|x| x.as_str())
    }

    pub fn iter(&self) -> Iter<'_, String> {
        self.vec.iter()
    }

    pub fn len(&self) -> usize {
        self.vec.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }
}

impl From<Vec<String>> for Symtab {
    fn from(syms: Vec<String>) -> Self {
        let mut st = Symtab::new();
        for sym in &syms {
            st.add(sym);
        }
        st
    }
}

impl From<Symtab> for Vec<String> {
    fn from(st: Symtab) -> Self {
        st.vec
    }
}

#[cfg(test)]
mod tests {
    use super::Symtab;

    #[test]
    fn test_new_is_empty() {
        let st = Symtab::new();
        assert!(st.is_empty());
        assert_eq!(st.idx("anything"), None);
        assert_eq!(st.sym(0), None);
    }

    #[test]
    fn test_add_and_retrieve() {
        let mut st = Symtab::new();
        assert_eq!(st.add("E"), 0);
        assert_eq!(st.add("T"), 1);
        assert_eq!(st.idx("T"), Some(1));
        assert_eq!(st.sym(0), Some("E"));
        assert_eq!(st.len(), 2);
    }

    #[test]
    fn test_duplicate_add_returns_same_index() {
        let mut st = Symtab::new();
        let first = st.add("id");
        let second = st.add("id");
        assert_eq!(first, second);
        assert_eq!(st.len(), 1);
        assert_eq!(st.sym(1), None);
    }

    #[test]
    fn test_iter_preserves_first_seen_order() {
        let mut st = Symtab::new();
        for name in ["+", "id", "*", "id", "(", "+"] {
            st.add(name);
        }
        let names: Vec<&str> = st.iter().map(|s| s.as_str()).collect();
        assert_eq!(names, vec!["+", "id", "*", "("]);
    }

    #[test]
    fn test_rebuild_from_spellings() {
        let mut st = Symtab::new();
        st.add("E");
        st.add("T");
        let spellings: Vec<smartstring::alias::String> = st.clone().into();
        let rebuilt = Symtab::from(spellings);
        assert_eq!(rebuilt, st);
        assert_eq!(rebuilt.idx("T"), Some(1));
    }
}
