#[macro_use]
extern crate clap;
#[macro_use]
extern crate log;

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use std::process;

use sidecat::enrich::{self, OutputFormat};
use sidecat::Result;

fn main() {
    let app = App::new("sidecat")
        .version(crate_version!())
        .setting(AppSettings::VersionlessSubcommands)
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .global_setting(AppSettings::ColoredHelp)
        .about("istio sidecar injection for kubernetes pod templates")
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .global(true)
                .help("Increase verbosity"),
        )
        .subcommand(
            SubCommand::with_name("inject")
                .about("Inject the istio sidecar into a pod template")
                .arg(
                    Arg::with_name("file")
                        .short("f")
                        .long("file")
                        .takes_value(true)
                        .help("Pod template to enrich (stdin when omitted)"),
                )
                .arg(
                    Arg::with_name("config")
                        .short("c")
                        .long("config")
                        .takes_value(true)
                        .help("Injection config overrides file"),
                )
                .arg(
                    Arg::with_name("set")
                        .long("set")
                        .takes_value(true)
                        .multiple(true)
                        .number_of_values(1)
                        .help("Override a single config key (key=value)"),
                )
                .arg(
                    Arg::with_name("output")
                        .short("o")
                        .long("output")
                        .takes_value(true)
                        .possible_values(&["yaml", "json"])
                        .default_value("yaml")
                        .help("Output format"),
                ),
        )
        .subcommand(
            SubCommand::with_name("validate")
                .about("Validate injection config overrides")
                .arg(
                    Arg::with_name("config")
                        .short("c")
                        .long("config")
                        .takes_value(true)
                        .help("Injection config overrides file"),
                )
                .arg(
                    Arg::with_name("set")
                        .long("set")
                        .takes_value(true)
                        .multiple(true)
                        .number_of_values(1)
                        .help("Override a single config key (key=value)"),
                ),
        )
        .subcommand(
            SubCommand::with_name("defaults")
                .about("Print the effective injection config")
                .arg(
                    Arg::with_name("config")
                        .short("c")
                        .long("config")
                        .takes_value(true)
                        .help("Injection config overrides file"),
                )
                .arg(
                    Arg::with_name("set")
                        .long("set")
                        .takes_value(true)
                        .multiple(true)
                        .number_of_values(1)
                        .help("Override a single config key (key=value)"),
                ),
        );

    let args = app.get_matches();

    let verbosity = args.occurrences_of("verbose");
    loggerv::Logger::new()
        .verbosity(verbosity)
        .module_path(true)
        .line_numbers(verbosity > 2)
        .init()
        .unwrap();

    if let Err(ref e) = run(&args) {
        error!("{}", e);
        for cause in e.iter().skip(1) {
            warn!("caused by: {}", cause);
        }
        process::exit(1);
    }
}

fn collect_sets(args: &ArgMatches) -> Vec<String> {
    args.values_of("set")
        .map(|vs| vs.map(String::from).collect())
        .unwrap_or_else(Vec::new)
}

fn run(args: &ArgMatches) -> Result<()> {
    match args.subcommand() {
        ("inject", Some(a)) => {
            let conf = enrich::load_config(a.value_of("config"), &collect_sets(a))?;
            let mut tpl = enrich::load_template(a.value_of("file"))?;
            let format = OutputFormat::from_flag(a.value_of("output").unwrap())?;
            println!("{}", enrich::enrich(&mut tpl, &conf, format)?);
            Ok(())
        }
        ("validate", Some(a)) => {
            let conf = enrich::load_config(a.value_of("config"), &collect_sets(a))?;
            conf.verify()?;
            info!("injection config valid");
            Ok(())
        }
        ("defaults", Some(a)) => {
            let conf = enrich::load_config(a.value_of("config"), &collect_sets(a))?;
            println!("{}", enrich::show_config(&conf)?);
            Ok(())
        }
        _ => unreachable!(),
    }
}
