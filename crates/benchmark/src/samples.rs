//! Built-in sample routes.

use crate::dataset::{BoxSpec, Problem};
use std::collections::BTreeMap;

/// Named example problems, iterated in name order.
#[derive(Debug, Clone)]
pub struct SampleRoutes {
    routes: BTreeMap<String, Problem>,
}

impl SampleRoutes {
    /// Returns the built-in catalog.
    pub fn builtin() -> Self {
        let mut routes = BTreeMap::new();

        routes.insert(
            "single-lane".to_string(),
            Problem::new(
                [10.0, 2.0, 2.0],
                vec![
                    BoxSpec::new("A", [4.0, 2.0, 2.0], 0),
                    BoxSpec::new("B", [6.0, 2.0, 2.0], 1),
                ],
            ),
        );

        routes.insert(
            "side-by-side".to_string(),
            Problem::new(
                [6.0, 4.0, 2.0],
                vec![
                    BoxSpec::new("left-near", [3.0, 2.0, 2.0], 0),
                    BoxSpec::new("left-far", [3.0, 2.0, 2.0], 2),
                    BoxSpec::new("right-near", [3.0, 2.0, 2.0], 1),
                    BoxSpec::new("right-far", [3.0, 2.0, 2.0], 3),
                ],
            ),
        );

        routes.insert(
            "rotated".to_string(),
            Problem::new(
                [10.0, 2.0, 2.0],
                vec![BoxSpec::new("pole", [1.0, 1.0, 8.0], 0)],
            ),
        );

        routes.insert(
            "cube-eight".to_string(),
            Problem::new(
                [2.0, 2.0, 2.0],
                (0..8)
                    .map(|i| BoxSpec::new(format!("c{}", i), [1.0, 1.0, 1.0], i % 4))
                    .collect(),
            ),
        );

        routes.insert(
            "city-run".to_string(),
            Problem::new(
                [12.0, 2.4, 2.4],
                vec![
                    BoxSpec::new("pallet-1", [1.2, 0.8, 1.2], 0),
                    BoxSpec::new("pallet-2", [1.2, 0.8, 1.2], 0),
                    BoxSpec::new("pallet-3", [1.2, 0.8, 1.2], 1),
                    BoxSpec::new("crate-1", [2.0, 1.2, 1.0], 1),
                    BoxSpec::new("crate-2", [2.0, 1.2, 1.0], 2),
                    BoxSpec::new("drum-1", [0.6, 0.6, 0.9], 2),
                    BoxSpec::new("drum-2", [0.6, 0.6, 0.9], 3),
                    BoxSpec::new("roll-1", [2.4, 0.5, 0.5], 3),
                    BoxSpec::new("carton-1", [0.5, 0.4, 0.4], 4),
                    BoxSpec::new("carton-2", [0.5, 0.4, 0.4], 4),
                ],
            ),
        );

        routes.insert(
            "oversized".to_string(),
            Problem::new(
                [5.0, 2.0, 2.0],
                vec![BoxSpec::new("beam", [6.0, 1.0, 1.0], 0)],
            ),
        );

        routes.insert(
            "overfull".to_string(),
            Problem::new(
                [2.0, 2.0, 2.0],
                (0..9)
                    .map(|i| BoxSpec::new(format!("c{}", i), [1.0, 1.0, 1.0], 0))
                    .collect(),
            ),
        );

        Self { routes }
    }

    /// Returns the route names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }

    /// Looks up a route by name.
    pub fn get(&self, name: &str) -> Option<&Problem> {
        self.routes.get(name)
    }

    /// Iterates over all routes.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Problem)> {
        self.routes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog() {
        let samples = SampleRoutes::builtin();
        assert_eq!(samples.len(), 7);
        assert!(samples.get("single-lane").is_some());
        assert!(samples.get("nowhere").is_none());

        let names: Vec<&str> = samples.names().collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_ids_unique_per_route() {
        for (name, problem) in SampleRoutes::builtin().iter() {
            let mut ids: Vec<&str> = problem.boxes.iter().map(|b| b.box_id.as_str()).collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), problem.boxes.len(), "duplicate id in {}", name);
        }
    }
}
