//! Snapshot of the organ set as last reported by the gateway.

use std::collections::HashMap;

use aiye_types::{OrganRecord, OrganType};

/// Immutable organ snapshot, keyed by id, preserving gateway order.
///
/// A new snapshot is built for every successful fetch and swapped in
/// whole; nothing edits one in place.
#[derive(Debug, Clone, Default)]
pub struct OrganCache {
    records: Vec<OrganRecord>,
    index: HashMap<String, usize>,
}

impl OrganCache {
    /// Build a snapshot. A repeated id replaces the earlier record but
    /// keeps its position.
    pub fn from_records(records: impl IntoIterator<Item = OrganRecord>) -> Self {
        let mut cache = Self::default();
        for record in records {
            match cache.index.get(&record.id) {
                Some(&slot) => cache.records[slot] = record,
                None => {
                    cache.index.insert(record.id.clone(), cache.records.len());
                    cache.records.push(record);
                }
            }
        }
        cache
    }

    pub fn get(&self, id: &str) -> Option<&OrganRecord> {
        self.index.get(id).map(|&slot| &self.records[slot])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn records(&self) -> &[OrganRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct organ types present, in first-seen order.
    pub fn organ_types(&self) -> Vec<OrganType> {
        let mut types = Vec::with_capacity(OrganType::ALL.len());
        for record in &self.records {
            if !types.contains(&record.organ_type) {
                types.push(record.organ_type);
            }
        }
        types
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aiye_types::SymptomState;

    fn organ(id: &str, organ_type: OrganType, score: f64) -> OrganRecord {
        OrganRecord {
            id: id.to_string(),
            name: id.to_uppercase(),
            organ_type,
            health_score: score,
            symptom_state: SymptomState::Healing,
            current_funding_usd: 0.0,
            target_funding_usd: 0.0,
            funding_percentage: 0.0,
        }
    }

    #[test]
    fn test_lookup_and_order() {
        let cache = OrganCache::from_records([
            organ("b", OrganType::Veins, 40.0),
            organ("a", OrganType::Lungs, 50.0),
        ]);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("a").unwrap().organ_type, OrganType::Lungs);
        assert!(cache.get("zzz").is_none());
        let ids: Vec<_> = cache.records().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[test]
    fn test_repeated_id_keeps_first_position() {
        let cache = OrganCache::from_records([
            organ("a", OrganType::Lungs, 10.0),
            organ("b", OrganType::Veins, 20.0),
            organ("a", OrganType::Lungs, 90.0),
        ]);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.records()[0].health_score, 90.0);
    }

    #[test]
    fn test_organ_types_are_distinct() {
        let cache = OrganCache::from_records([
            organ("a", OrganType::Skin, 10.0),
            organ("b", OrganType::Skin, 20.0),
            organ("c", OrganType::Lungs, 20.0),
        ]);
        assert_eq!(cache.organ_types(), [OrganType::Skin, OrganType::Lungs]);
        assert!(OrganCache::default().is_empty());
    }
}
