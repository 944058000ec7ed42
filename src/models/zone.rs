//! Zone model.
//!
//! A zone is one physical sorting lane with its workload for the shift.

use serde::{Deserialize, Serialize};

/// Represents one sorting lane and its workload for the shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Unique identifier for the zone.
    pub id: String,
    /// Display name (e.g., "Zone A").
    pub name: String,
    /// Number of cages/containers in the zone.
    #[serde(default)]
    pub cage_count: u32,
    /// Number of packages expected in the zone.
    pub package_count: u64,
}

/// Sums the package counts across zones.
pub fn total_packages(zones: &[Zone]) -> u64 {
    zones.iter().map(|z| z.package_count).sum()
}

/// Sums the cage counts across zones.
pub fn total_cages(zones: &[Zone]) -> u64 {
    zones.iter().map(|z| u64::from(z.cage_count)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_zone_without_cages() {
        let json = r#"{"id": "z1", "name": "Zone A", "package_count": 1600}"#;
        let zone: Zone = serde_json::from_str(json).unwrap();
        assert_eq!(zone.cage_count, 0);
        assert_eq!(zone.package_count, 1600);
    }

    #[test]
    fn test_total_packages() {
        let zones = vec![
            Zone {
                id: "z1".to_string(),
                name: "Zone A".to_string(),
                cage_count: 12,
                package_count: 2000,
            },
            Zone {
                id: "z2".to_string(),
                name: "Zone B".to_string(),
                cage_count: 8,
                package_count: 500,
            },
        ];
        assert_eq!(total_packages(&zones), 2500);
        assert_eq!(total_packages(&[]), 0);
        assert_eq!(total_cages(&zones), 20);
    }
}
