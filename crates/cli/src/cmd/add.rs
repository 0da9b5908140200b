//! `add` command implementation.

use std::io::{self, Write};

use buildenv_core::io::FsStore;
use buildenv_core::schema::{BuildType, GoogleCloudBuild};
use buildenv_core::report::write_record;
use buildenv_core::settings::ResolvedSettings;
use buildenv_core::{AddOptions, AddOutcome, ErrorRecord, FsConfigLoader, add_build_env};
use tracing::debug;

use crate::GcbArgs;

pub fn run_gcb(settings: &ResolvedSettings, args: GcbArgs) {
    let build_type = BuildType::GoogleCloudBuild(GoogleCloudBuild {
        project_id: args.project_id,
        disk_size_gb: args.disk_size_gb,
        machine_type: args.machine_type,
        timeout: args.timeout,
        concurrency: args.concurrency,
        ..Default::default()
    });

    let mut opts = AddOptions::new(build_type);
    opts.format = args.format.map_or(settings.format, Into::into);
    opts.config_file = args.target.config_file(settings);
    opts.modules = args.target.modules;
    opts.profile = args.target.profile.filter(|p| !p.is_empty());

    run(&opts);
}

fn run(opts: &AddOptions) {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match add_build_env(&FsConfigLoader, &FsStore, &mut FsStore, &mut out, opts) {
        Ok(AddOutcome::Applied(summary)) => {
            debug!(
                modules = summary.modules.len(),
                files = summary.files_written.len(),
                "build environment added"
            );
        }
        Ok(AddOutcome::Reported(_)) => {
            let _ = out.flush();
            std::process::exit(1);
        }
        Err(e) => {
            let record = ErrorRecord::unknown(e.to_string());
            if let Err(e) = write_record(&mut out, opts.format, &record) {
                eprintln!("Failed to write error report: {e}");
            }
            let _ = out.flush();
            std::process::exit(1);
        }
    }
}
