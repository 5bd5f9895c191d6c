// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

mod cmd;

use clap::{Arg, Command};
use cmd::Error;
use log::LevelFilter;
use log4rs::{
    append::{
        console::{ConsoleAppender, Target},
        file::FileAppender,
    },
    config::{Appender, Config as LogConfig, Logger, Root},
    encode::pattern::PatternEncoder,
};
use std::{io as stdio, io::Write, process};
use tvm_config::Configuration;

fn main() {
    let matches = cli().get_matches();

    let result = Configuration::parse(&matches)
        .map_err(Error::Config)
        .and_then(|conf| {
            init_logger(&conf)?;
            match matches.subcommand() {
                Some(("run", sub_matches)) => cmd::run(&conf, sub_matches),
                Some(("address", sub_matches)) => cmd::address(sub_matches),
                _ => Err(Error::Custom("missing subcommand")),
            }
        });

    process::exit(match result {
        Ok(()) => 0,
        Err(err) => {
            let _ = writeln!(&mut stdio::stderr(), "{}", err);
            1
        }
    });
}

fn cli() -> Command {
    Command::new("tvm")
        .about("Runs contracts against a fresh in-memory ledger.")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Sets a custom config file"),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .value_name("FILE")
                .help("Specify the filename for the log. Stdout will be used by default if omitted."),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Can be error/warn/info/debug/trace. Default is the info level."),
        )
        .arg(
            Arg::new("log-conf")
                .long("log-conf")
                .value_name("FILE")
                .help("Sets a log4rs configuration file. Overrides log-file and log-level."),
        )
        .arg(
            Arg::new("energy-fee")
                .long("energy-fee")
                .value_name("SUN")
                .help("Sun charged per energy unit."),
        )
        .arg(
            Arg::new("max-fee-limit")
                .long("max-fee-limit")
                .value_name("SUN")
                .help("Upper bound of the fee limit of a transaction."),
        )
        .arg(
            Arg::new("max-cpu-time-of-one-tx")
                .long("max-cpu-time-of-one-tx")
                .value_name("MS")
                .help("Wall-clock budget of one transaction in milliseconds."),
        )
        .arg(
            Arg::new("max-call-depth")
                .long("max-call-depth")
                .value_name("DEPTH")
                .help("Maximum depth of nested calls (default 64)."),
        )
        .arg(
            Arg::new("deadline-check-interval")
                .long("deadline-check-interval")
                .value_name("INSTRUCTIONS")
                .help("Instructions executed between two deadline checks."),
        )
        .subcommand(cmd::run_command())
        .subcommand(cmd::address_command())
}

// If log_conf is provided, use it for log configuration and ignore
// log_file and log_level. Otherwise, set the console to INFO and set
// all our crate log to log_level.
fn init_logger(conf: &Configuration) -> Result<(), Error> {
    let log_config = match conf.raw_conf.log_conf {
        Some(ref log_conf) => {
            log4rs::config::load_config_file(log_conf, Default::default())
                .map_err(|e| Error::Logger(e.to_string()))?
        }
        None => {
            // Verdicts go to stdout, so the console log goes to stderr.
            let console =
                ConsoleAppender::builder().target(Target::Stderr).build();
            let mut conf_builder = LogConfig::builder().appender(
                Appender::builder().build("stderr", Box::new(console)),
            );
            let mut root_builder = Root::builder().appender("stderr");
            if let Some(ref log_file) = conf.raw_conf.log_file {
                let file_appender = FileAppender::builder()
                    .encoder(Box::new(PatternEncoder::new(
                        "{d} {h({l}):5.5} {T:<20.20} {t:12.12} - {m}{n}",
                    )))
                    .build(log_file)
                    .map_err(|e| Error::Logger(e.to_string()))?;
                conf_builder = conf_builder.appender(
                    Appender::builder()
                        .build("logfile", Box::new(file_appender)),
                );
                root_builder = root_builder.appender("logfile");
            };
            // Should add new crate names here
            for crate_name in [
                "tvm",
                "tvm_config",
                "tvm_executor",
                "tvm_statedb",
                "tvm_vm_interpreter",
                "tvm_vm_types",
                "primitives",
            ]
            .iter()
            {
                conf_builder = conf_builder.logger(
                    Logger::builder()
                        .build(*crate_name, conf.raw_conf.log_level),
                );
            }
            conf_builder
                .build(root_builder.build(LevelFilter::Info))
                .map_err(|e| Error::Logger(e.to_string()))?
        }
    };
    log4rs::init_config(log_config)
        .map_err(|e| Error::Logger(e.to_string()))?;
    Ok(())
}
