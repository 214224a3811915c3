//! Map choice sets to human-readable choice names

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;
use thiserror::Error;
use crate::discriminators::{ChoiceSet, Discriminator};

#[derive(Debug, Error)]
pub enum NamingError {
    #[error("No choice name for discriminator {discriminator} in {group:?}. Consider adding one to the choice name table")]
    MissingName {
        discriminator: Discriminator,
        group: Vec<Discriminator>,
    },

    #[error("Multiple choice names {names:?} for discriminators {group:?}")]
    AmbiguousName {
        names: BTreeSet<String>,
        group: Vec<Discriminator>,
    },
}

/// Discriminator → choice name table
#[derive(Debug, Clone, Default)]
pub struct ChoiceNames(HashMap<Discriminator, String>);

impl ChoiceNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, discriminator: &str, name: &str) -> Self {
        self.0.insert(discriminator.to_string(), name.to_string());
        self
    }

    pub fn get(&self, discriminator: &str) -> Option<&str> {
        self.0.get(discriminator).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse `discriminator<TAB>name` lines. Blank lines and lines starting
    /// with `#` are skipped.
    pub fn parse_tsv(content: &str) -> Result<Self> {
        let mut names = HashMap::new();

        for (line_no, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let mut fields = line.split('\t').map(str::trim);
            match (fields.next(), fields.next(), fields.next()) {
                (Some(d), Some(name), None) if !d.is_empty() && !name.is_empty() => {
                    names.insert(d.to_string(), name.to_string());
                }
                _ => anyhow::bail!(
                    "Malformed choice name line {}: {:?} (expected discriminator<TAB>name)",
                    line_no + 1,
                    line
                ),
            }
        }

        Ok(Self(names))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read choice names from {:?}", path.as_ref()))?;
        let names = Self::parse_tsv(&content)
            .with_context(|| format!("Failed to parse choice names from {:?}", path.as_ref()))?;
        tracing::info!("Loaded {} choice names from {:?}", names.len(), path.as_ref());
        Ok(names)
    }

    /// Resolve the single name shared by every real member of `choice_set`.
    /// Returns `None` for a set without real members.
    pub fn name_of(&self, choice_set: &ChoiceSet) -> Result<Option<&str>, NamingError> {
        let group: Vec<Discriminator> = choice_set.discriminators().cloned().collect();

        if let Some(missing) = group.iter().find(|d| self.get(d).is_none()) {
            let discriminator = missing.clone();
            return Err(NamingError::MissingName { discriminator, group });
        }

        let names: BTreeSet<&str> = group.iter().filter_map(|d| self.get(d)).collect();
        if names.len() > 1 {
            return Err(NamingError::AmbiguousName {
                names: names.into_iter().map(str::to_string).collect(),
                group,
            });
        }

        Ok(names.into_iter().next())
    }
}

/// Choice name → discriminators, merged across product families
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NamedChoices(BTreeMap<String, BTreeSet<Discriminator>>);

impl NamedChoices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name `choice_set` and merge its real members under that name.
    /// Sets with fewer than two alternatives are ignored.
    pub fn add(&mut self, names: &ChoiceNames, choice_set: &ChoiceSet) -> Result<(), NamingError> {
        if choice_set.len() < 2 {
            return Ok(());
        }

        if let Some(name) = names.name_of(choice_set)? {
            if self.0.contains_key(name) {
                tracing::debug!("Merging {:?} into existing choice {}", choice_set, name);
            }
            self.0
                .entry(name.to_string())
                .or_default()
                .extend(choice_set.discriminators().cloned());
        }

        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&BTreeSet<Discriminator>> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<Discriminator>)> {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clique(items: &[&str]) -> ChoiceSet {
        let set: BTreeSet<Discriminator> = items.iter().map(|s| s.to_string()).collect();
        ChoiceSet::from_clique(&set)
    }

    fn names() -> ChoiceNames {
        ChoiceNames::new()
            .with("Small", "Size")
            .with("Medium", "Size")
            .with("Large", "Size")
            .with("Cheese", "Cheese")
            .with("Vanilla", "Flavor")
    }

    #[test]
    fn test_parse_tsv() {
        let content = "# discriminator\tname\n\nSmall\tSize\nCheese\t Cheese \n";
        let names = ChoiceNames::parse_tsv(content).unwrap();

        assert_eq!(names.len(), 2);
        assert_eq!(names.get("Cheese"), Some("Cheese"));
    }

    #[test]
    fn test_parse_tsv_malformed() {
        let err = ChoiceNames::parse_tsv("Small\tSize\nLarge\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));

        assert!(ChoiceNames::parse_tsv("Small\tSize\textra\n").is_err());
    }

    #[test]
    fn test_load_tsv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("choice_names.tsv");
        std::fs::write(&path, "Small\tSize\nLarge\tSize\n").unwrap();

        let names = ChoiceNames::load(&path).unwrap();

        assert_eq!(names.get("Large"), Some("Size"));
    }

    #[test]
    fn test_name_of_binary_choice_ignores_none() {
        assert_eq!(names().name_of(&ChoiceSet::binary("Cheese")).unwrap(), Some("Cheese"));
    }

    #[test]
    fn test_missing_name() {
        let err = names().name_of(&clique(&["Small", "Huge"])).unwrap_err();

        assert!(matches!(err, NamingError::MissingName { ref discriminator, .. } if discriminator == "Huge"));
    }

    #[test]
    fn test_ambiguous_name() {
        let err = names().name_of(&clique(&["Small", "Vanilla"])).unwrap_err();

        match err {
            NamingError::AmbiguousName { names, .. } => {
                assert_eq!(names.into_iter().collect::<Vec<_>>(), vec!["Flavor", "Size"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_same_name_merges() {
        let names = names();
        let mut named = NamedChoices::new();

        named.add(&names, &clique(&["Small", "Large"])).unwrap();
        named.add(&names, &clique(&["Small", "Medium"])).unwrap();
        named.add(&names, &ChoiceSet::binary("Cheese")).unwrap();

        assert_eq!(named.len(), 2);
        assert_eq!(named.get("Size").map(|s| s.len()), Some(3));
        assert_eq!(named.get("Cheese").map(|s| s.len()), Some(1));
    }

    #[test]
    fn test_trivial_set_ignored() {
        let mut named = NamedChoices::new();
        named.add(&ChoiceNames::new(), &clique(&["Unnamed"])).unwrap();

        assert!(named.is_empty());
    }
}
