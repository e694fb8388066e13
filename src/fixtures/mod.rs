//! Fixtures
//!
//! Item sets and search settings loaded from YAML files under a base path:
//!
//! - `items/<name>.yml`: an ordered `items` list of `{ type, amount }` records
//! - `searches/<name>.yml`: the target `pick` plus optional `strategy`,
//!   `policy` and `max_nodes`

use std::{fs, path::PathBuf};

use thiserror::Error;

use crate::{
    fixtures::{items::ItemsFixture, searches::SearchFixture},
    items::{
        Item,
        groups::{ItemGroup, ItemGroupError},
    },
    solvers::{SearchConfig, SolverError, SolverResult},
};

pub mod items;
pub mod searches;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// The loaded items do not form a valid group
    #[error("Invalid item set: {0}")]
    ItemGroup(#[from] ItemGroupError),

    /// No items loaded
    #[error("No items loaded")]
    NoItems,

    /// No search settings loaded
    #[error("No search loaded; pick unknown")]
    NoSearch,

    /// The loaded search failed
    #[error(transparent)]
    Solver(#[from] SolverError),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Items in file order
    items: Vec<Item>,

    /// Validated group built from `items`
    group: Option<ItemGroup>,

    /// Target total and solver settings
    search: Option<(i64, SearchConfig)>,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            items: Vec::new(),
            group: None,
            search: None,
        }
    }

    /// Load items from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the items do
    /// not form a valid group.
    pub fn load_items(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("items").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: ItemsFixture = serde_norway::from_str(&contents)?;

        self.group = Some(ItemGroup::new(fixture.items.iter().cloned())?);
        self.items = fixture.items;

        Ok(self)
    }

    /// Load search settings from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_search(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("searches").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: SearchFixture = serde_norway::from_str(&contents)?;

        self.search = Some(fixture.into_parts());

        Ok(self)
    }

    /// Load a complete fixture set (items and search with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_items(name)?.load_search(name)?;

        Ok(fixture)
    }

    /// Get all items
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Get the validated item group
    ///
    /// # Errors
    ///
    /// Returns an error if no items are loaded.
    pub fn group(&self) -> Result<&ItemGroup, FixtureError> {
        self.group.as_ref().ok_or(FixtureError::NoItems)
    }

    /// Get the target total
    ///
    /// # Errors
    ///
    /// Returns an error if no search is loaded.
    pub fn pick(&self) -> Result<i64, FixtureError> {
        self.search
            .map(|(pick, _config)| pick)
            .ok_or(FixtureError::NoSearch)
    }

    /// Get the solver settings
    ///
    /// # Errors
    ///
    /// Returns an error if no search is loaded.
    pub fn config(&self) -> Result<SearchConfig, FixtureError> {
        self.search
            .map(|(_pick, config)| config)
            .ok_or(FixtureError::NoSearch)
    }

    /// Run the loaded search over the loaded items.
    ///
    /// # Errors
    ///
    /// Returns an error if the fixture is incomplete or the solver fails.
    pub fn solve(&self) -> Result<SolverResult<'_>, FixtureError> {
        let group = self.group()?;
        let pick = self.pick()?;

        Ok(self.config()?.solve(group, pick)?)
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::fs::{create_dir_all, write};

    use tempfile::tempdir;
    use testresult::TestResult;

    use crate::solvers::{MatchPolicy, Strategy};

    use super::*;

    fn write_set(root: &std::path::Path, name: &str, items: &str, search: &str) -> TestResult {
        create_dir_all(root.join("items"))?;
        create_dir_all(root.join("searches"))?;

        write(root.join("items").join(format!("{name}.yml")), items)?;
        write(root.join("searches").join(format!("{name}.yml")), search)?;

        Ok(())
    }

    #[test]
    fn loads_items_and_search_from_base_path() -> TestResult {
        let dir = tempdir()?;

        write_set(
            dir.path(),
            "fruit",
            "items:\n  - type: Apple\n    amount: 1\n  - type: Banana\n    amount: 2\n",
            "pick: 2\npolicy: first-match-per-parent\n",
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());
        fixture.load_items("fruit")?.load_search("fruit")?;

        assert_eq!(fixture.items(), [Item::new("Apple", 1), Item::new("Banana", 2)]);
        assert_eq!(fixture.group()?.len(), 2);
        assert_eq!(fixture.pick()?, 2);

        let config = fixture.config()?;
        assert_eq!(config.policy, MatchPolicy::FirstMatchPerParent);
        assert_eq!(config.strategy, Strategy::Tree);

        let result = fixture.solve()?;
        assert_eq!(result.len(), 2, "Apple1+Banana1 and Banana2");

        Ok(())
    }

    #[test]
    fn rejects_negative_amounts() -> TestResult {
        let dir = tempdir()?;

        write_set(
            dir.path(),
            "broken",
            "items:\n  - type: Apple\n    amount: -1\n",
            "pick: 0\n",
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());
        let result = fixture.load_items("broken");

        assert!(
            matches!(
                result,
                Err(FixtureError::ItemGroup(ItemGroupError::InvalidAmount { .. }))
            ),
            "negative amounts must be rejected"
        );

        Ok(())
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let mut fixture = Fixture::with_base_path("./does-not-exist");

        assert!(matches!(fixture.load_items("nope"), Err(FixtureError::Io(_))));
    }

    #[test]
    fn accessors_error_before_loading() {
        let fixture = Fixture::default();

        assert!(matches!(fixture.group(), Err(FixtureError::NoItems)));
        assert!(matches!(fixture.pick(), Err(FixtureError::NoSearch)));
        assert!(matches!(fixture.solve(), Err(FixtureError::NoItems)));
    }
}
