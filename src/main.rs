use clap::{
    crate_authors, crate_description, crate_name, crate_version, error::ErrorKind, Arg,
    ArgAction, Command,
};
use stager::{
    api::{self, Invocation},
    workspace::Workspace,
};

const USAGE_EXIT_CODE: i32 = 1;

// The CLI layer should only parse inputs and forward them to library code.
fn main() -> miette::Result<()> {
    let program = std::env::args()
        .next()
        .unwrap_or_else(|| crate_name!().to_string());

    let matches = match Command::new(crate_name!())
        .about(crate_description!())
        .author(crate_authors!())
        .version(crate_version!())
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("target")
                .help("directory to stage, or a file inside it; `clean` restores data/")
                .value_name("TARGET")
                // directories may start with '-'; known flags such as -v still parse as flags
                .allow_hyphen_values(true),
        )
        .try_get_matches()
    {
        Ok(matches) => matches,
        Err(error) => match error.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                // help and version are informational, but still not a staging run
                let _ = error.print();

                std::process::exit(USAGE_EXIT_CODE)
            }
            _ => exit_with_usage(&program),
        },
    };

    init_logging(matches.get_flag("verbose"));

    let workspace = Workspace::from_current_dir()?;

    let target = matches.get_one::<String>("target").map(String::as_str);

    match Invocation::from_target(target, &workspace) {
        Invocation::Clean => {
            api::clean(&workspace)?;
        }
        Invocation::Stage(target) => {
            api::stage(&workspace, &target)?;
        }
        Invocation::Usage => exit_with_usage(&program),
    }

    Ok(())
}

fn init_logging(is_verbose: bool) {
    let default_filter = if is_verbose { "debug" } else { "warn" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    log::debug!("executing in verbose mode");
}

fn exit_with_usage(program: &str) -> ! {
    print!("{}", api::usage(program));

    std::process::exit(USAGE_EXIT_CODE)
}
