//! `list` command implementation.

use std::io::{self, Write};

use buildenv_core::build_env::list_build_envs;
use buildenv_core::report::write_record;
use buildenv_core::settings::ResolvedSettings;
use buildenv_core::{ConfigLoader, ErrorRecord, FsConfigLoader, LoadOptions};

use super::output::{print_build_envs_json, print_build_envs_table};
use crate::{ListArgs, ListFormat};

pub fn run(settings: &ResolvedSettings, args: ListArgs) {
    let opts = LoadOptions {
        config_file: args.target.config_file(settings),
        modules: args.target.modules.clone(),
    };

    let graph = match FsConfigLoader.load(&opts) {
        Ok(graph) => graph,
        Err(e) => {
            let record = ErrorRecord::from_load_error(&e);
            let stdout = io::stdout();
            let mut out = stdout.lock();
            if let Err(e) = write_record(&mut out, settings.format, &record) {
                eprintln!("Failed to write error report: {e}");
            }
            let _ = out.flush();
            std::process::exit(1);
        }
    };

    let profile = args.target.profile.as_deref().filter(|p| !p.is_empty());
    let entries = list_build_envs(&graph, profile);

    match args.format {
        ListFormat::Table => print_build_envs_table(&entries),
        ListFormat::Json => print_build_envs_json(&entries),
    }
}
