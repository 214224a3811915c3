//! Output writing for choice group reports (JSONL and JSON)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::io::Write;
use std::path::{Path, PathBuf};
use crate::discriminators::{ChoiceSet, Selection, SelectionRule};
use crate::naming::NamedChoices;

pub const CHOICE_GROUPS_FILE: &str = "choice_groups.jsonl";
pub const NAMED_CHOICES_FILE: &str = "named_choices.json";

/// One choice set as written to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceSetRecord {
    pub id: String,
    pub members: ChoiceSet,             // `null` marks the absent alternative
    pub rule: SelectionRule,
}

/// Choice sets found for one product family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyReport {
    pub base_name: String,
    pub product_count: usize,
    pub generated_ts: i64,              // epoch ms
    pub choice_sets: Vec<ChoiceSetRecord>,
}

impl FamilyReport {
    pub fn new(base_name: &str, product_count: usize, selections: Vec<Selection>) -> Self {
        let choice_sets = selections
            .into_iter()
            .map(|s| ChoiceSetRecord {
                id: choice_set_id(base_name, &s.choice_set),
                members: s.choice_set,
                rule: s.rule,
            })
            .collect();

        Self {
            base_name: base_name.to_string(),
            product_count,
            generated_ts: chrono::Utc::now().timestamp_millis(),
            choice_sets,
        }
    }
}

/// Stable short id from the base name and the sorted members
pub fn choice_set_id(base_name: &str, choice_set: &ChoiceSet) -> String {
    let mut hasher = Sha256::new();
    hasher.update(base_name.as_bytes());
    for member in choice_set.iter() {
        hasher.update([0u8]);
        match member {
            Some(d) => hasher.update(d.as_bytes()),
            None => hasher.update(b"\xffnone"),
        }
    }
    format!("{:x}", hasher.finalize())[..16].to_string()
}

fn output_path(output_dir: &str, file_name: &str) -> Result<PathBuf> {
    let dir = Path::new(output_dir);
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output dir {:?}", dir))?;
    Ok(dir.join(file_name))
}

/// Write family reports to JSONL, one family per line
pub fn write_choice_groups_jsonl(output_dir: &str, reports: &[FamilyReport]) -> Result<PathBuf> {
    let path = output_path(output_dir, CHOICE_GROUPS_FILE)?;
    let mut file = std::fs::File::create(&path)?;

    for report in reports {
        let json = serde_json::to_string(report)?;
        writeln!(file, "{}", json)?;
    }

    tracing::info!("Wrote {} family reports to {:?}", reports.len(), path);
    Ok(path)
}

/// Load family reports written by `write_choice_groups_jsonl`
pub fn load_choice_groups_jsonl(output_dir: &str) -> Result<Vec<FamilyReport>> {
    let path = Path::new(output_dir).join(CHOICE_GROUPS_FILE);

    if !path.exists() {
        anyhow::bail!("Choice groups file not found: {:?}. Run 'groups' first.", path);
    }

    let content = std::fs::read_to_string(&path)?;
    let mut reports = Vec::new();

    for line in content.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let report: FamilyReport = serde_json::from_str(line)
            .with_context(|| format!("Failed to parse family report in {:?}", path))?;
        reports.push(report);
    }

    Ok(reports)
}

pub fn write_named_choices_json(output_dir: &str, named: &NamedChoices) -> Result<PathBuf> {
    let path = output_path(output_dir, NAMED_CHOICES_FILE)?;
    let json = serde_json::to_string_pretty(named)?;
    std::fs::write(&path, json)?;

    tracing::info!("Wrote {} named choices to {:?}", named.len(), path);
    Ok(path)
}
