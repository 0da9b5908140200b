//! Output formatting for `list`.

use buildenv_core::build_env::BuildEnvEntry;
use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

/// JSON document printed by `list --format json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildEnvsOutput<'a> {
    pub build_envs: &'a [BuildEnvEntry],
}

#[derive(Tabled)]
struct BuildEnvRow {
    #[tabled(rename = "Module")]
    module: String,
    #[tabled(rename = "Type")]
    build_type: String,
    #[tabled(rename = "Profile")]
    profile: String,
    #[tabled(rename = "Path")]
    path: String,
}

impl From<&BuildEnvEntry> for BuildEnvRow {
    fn from(entry: &BuildEnvEntry) -> Self {
        Self {
            module: entry.module.clone(),
            build_type: entry.build_type.clone(),
            profile: entry.profile.clone().unwrap_or_else(|| "-".to_string()),
            path: entry.path.clone(),
        }
    }
}

pub fn print_build_envs_table(entries: &[BuildEnvEntry]) {
    if entries.is_empty() {
        println!("(no build environments found)");
        return;
    }

    let rows: Vec<BuildEnvRow> = entries.iter().map(BuildEnvRow::from).collect();
    let table = Table::new(&rows).with(Style::rounded()).to_string();
    println!("{}", table);
}

pub fn print_build_envs_json(entries: &[BuildEnvEntry]) {
    let output = BuildEnvsOutput { build_envs: entries };
    println!("{}", serde_json::to_string(&output).unwrap_or_default());
}
