use std::collections::HashMap;

/// Case-insensitive lookup from a name to its original spelling.
///
/// The first spelling seen for a key wins.
#[derive(Debug, Clone)]
pub struct CaseInsensitiveSet {
    map: HashMap<String, String>,
}

impl CaseInsensitiveSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = HashMap::new();
        for name in names {
            let name = name.as_ref();
            let key = name.trim().to_ascii_uppercase();
            map.entry(key).or_insert_with(|| name.to_string());
        }
        Self { map }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.map
            .get(&name.trim().to_ascii_uppercase())
            .map(|value| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(&name.trim().to_ascii_uppercase())
    }

    /// Returns the original spelling of the first candidate present in the set.
    pub fn find_any<'a, I>(&self, candidates: I) -> Option<&str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        candidates.into_iter().find_map(|name| self.get(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case_and_keeps_original() {
        let set = CaseInsensitiveSet::new(["InstanceId", "ResourceGroup"]);
        assert_eq!(set.get("instanceid"), Some("InstanceId"));
        assert!(set.contains("RESOURCEGROUP"));
        assert!(!set.contains("ResourceName"));
    }

    #[test]
    fn find_any_respects_candidate_order() {
        let set = CaseInsensitiveSet::new(["resource_id", "InstanceName"]);
        assert_eq!(
            set.find_any(["instance_id", "InstanceName", "resource_id"]),
            Some("InstanceName")
        );
        assert_eq!(set.find_any(["missing"]), None);
    }
}
