// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use std::str::FromStr;

use log::LevelFilter;
use tvm_executor::spec::{CommonParams, TransitionsBlockNumber};
use tvm_parameters::{energy::*, vm::*};

// usage:
// {
//   (name, (type), default_value)
//   ...
// }
// {
//   (name, (type), default_value, converter)
// }
build_config! {
    {
        // Energy section.
        (energy_fee, (u64), DEFAULT_SUN_PER_ENERGY)
        (max_fee_limit, (i64), DEFAULT_MAX_FEE_LIMIT)
        (total_energy_limit, (u64), DEFAULT_TOTAL_ENERGY_LIMIT)
        (constant_call_energy_limit, (u64), ENERGY_LIMIT_IN_CONSTANT_TX)

        // Deadline section.
        (max_cpu_time_of_one_tx, (u64), DEFAULT_MAX_CPU_TIME_OF_ONE_TX)
        (min_time_ratio, (f64), DEFAULT_MIN_TIME_RATIO)
        (max_time_ratio, (f64), DEFAULT_MAX_TIME_RATIO)
        (deadline_check_interval, (u64), DEFAULT_DEADLINE_CHECK_INTERVAL)

        // Interpreter section.
        (max_call_depth, (usize), DEFAULT_MAX_CALL_DEPTH)

        // Hardfork section. An unset transition is active from genesis.
        (vm_enabled_transition_number, (Option<u64>), None)
        (energy_limit_fix_ratio_transition_number, (Option<u64>), None)
        (transfer_trc10_transition_number, (Option<u64>), None)
        (constantinople_transition_number, (Option<u64>), None)
        (istanbul_transition_number, (Option<u64>), None)
        (london_transition_number, (Option<u64>), None)

        // Log section.
        (log_conf, (Option<String>), None)
        (log_file, (Option<String>), None)
    }
    {
        (log_level, (LevelFilter), LevelFilter::Info, parse_log_level)
    }
}

fn parse_log_level(level: &str) -> Result<LevelFilter, String> {
    LevelFilter::from_str(level)
        .map_err(|_| format!("Invalid log_level: {}", level))
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Configuration {
    pub raw_conf: RawConfiguration,
}

impl Configuration {
    pub fn parse(matches: &clap::ArgMatches) -> Result<Configuration, String> {
        let raw_conf = RawConfiguration::parse(matches)?;
        Configuration::from_raw(raw_conf)
    }

    pub fn from_raw(
        raw_conf: RawConfiguration,
    ) -> Result<Configuration, String> {
        if raw_conf.max_fee_limit < 0 {
            return Err("max_fee_limit must not be negative".into());
        }
        if raw_conf.min_time_ratio < 0.0
            || raw_conf.max_time_ratio < raw_conf.min_time_ratio
        {
            return Err(format!(
                "Invalid time ratios: min {} max {}",
                raw_conf.min_time_ratio, raw_conf.max_time_ratio
            ));
        }
        if raw_conf.deadline_check_interval == 0 {
            return Err("deadline_check_interval must be positive".into());
        }
        Ok(Configuration { raw_conf })
    }

    pub fn common_params(&self) -> CommonParams {
        let mut params = CommonParams::default();

        params.energy_fee = self.raw_conf.energy_fee;
        params.max_fee_limit = self.raw_conf.max_fee_limit;
        params.constant_call_energy_limit =
            self.raw_conf.constant_call_energy_limit;
        params.max_cpu_time_of_one_tx = self.raw_conf.max_cpu_time_of_one_tx;
        params.min_time_ratio = self.raw_conf.min_time_ratio;
        params.max_time_ratio = self.raw_conf.max_time_ratio;
        params.deadline_check_interval =
            self.raw_conf.deadline_check_interval;
        params.max_call_depth = self.raw_conf.max_call_depth;

        self.set_transitions(&mut params.transition_numbers);

        params
    }

    fn set_transitions(&self, transitions: &mut TransitionsBlockNumber) {
        let conf = &self.raw_conf;
        transitions.vm_enabled =
            conf.vm_enabled_transition_number.unwrap_or(0);
        transitions.energy_limit_fix_ratio = conf
            .energy_limit_fix_ratio_transition_number
            .unwrap_or(0);
        transitions.transfer_trc10 =
            conf.transfer_trc10_transition_number.unwrap_or(0);
        transitions.constantinople =
            conf.constantinople_transition_number.unwrap_or(0);
        transitions.istanbul = conf.istanbul_transition_number.unwrap_or(0);
        transitions.london = conf.london_transition_number.unwrap_or(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{Arg, Command};

    fn command() -> Command {
        let mut command =
            Command::new("tvm").arg(Arg::new("config").long("config"));
        for name in [
            "energy-fee",
            "max-call-depth",
            "london-transition-number",
            "log-level",
        ] {
            command = command.arg(Arg::new(name).long(name));
        }
        command
    }

    #[test]
    fn test_default_params() {
        let params = Configuration::default().common_params();
        assert_eq!(params.energy_fee, DEFAULT_SUN_PER_ENERGY);
        assert_eq!(params.max_fee_limit, DEFAULT_MAX_FEE_LIMIT);
        assert_eq!(params.max_call_depth, DEFAULT_MAX_CALL_DEPTH);
        assert_eq!(
            params.deadline_check_interval,
            DEFAULT_DEADLINE_CHECK_INTERVAL
        );
        assert_eq!(params.transition_numbers.vm_enabled, 0);
        assert_eq!(params.transition_numbers.london, 0);
    }

    #[test]
    fn test_toml_overlay() {
        let raw = RawConfiguration::from_toml_str(
            r#"
            energy_fee = 280
            max_time_ratio = 2.5
            london_transition_number = 1000
            log_level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(raw.energy_fee, 280);
        assert_eq!(raw.max_time_ratio, 2.5);
        assert_eq!(raw.london_transition_number, Some(1000));
        assert_eq!(raw.log_level, LevelFilter::Debug);
        assert_eq!(raw.max_call_depth, DEFAULT_MAX_CALL_DEPTH);

        let params = Configuration::from_raw(raw).unwrap().common_params();
        assert_eq!(params.energy_fee, 280);
        assert_eq!(params.transition_numbers.london, 1000);
        assert_eq!(params.transition_numbers.constantinople, 0);
    }

    #[test]
    fn test_invalid_toml_values() {
        for bad in [
            "energy_fee = \"a\"",
            "log_level = 3",
            "log_level = \"loud\"",
            "energy_fee =",
        ] {
            assert!(RawConfiguration::from_toml_str(bad).is_err(), "{}", bad);
        }
    }

    #[test]
    fn test_command_line_overrides_file() {
        let path = std::env::temp_dir()
            .join(format!("tvm-config-test-{}.toml", std::process::id()));
        std::fs::write(&path, "energy_fee = 280\nmax_call_depth = 16\n")
            .unwrap();

        let matches = command().get_matches_from(vec![
            "tvm",
            "--config",
            path.to_str().unwrap(),
            "--energy-fee",
            "420",
            "--log-level",
            "trace",
        ]);
        let conf = Configuration::parse(&matches).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(conf.raw_conf.energy_fee, 420);
        assert_eq!(conf.raw_conf.max_call_depth, 16);
        assert_eq!(conf.raw_conf.log_level, LevelFilter::Trace);
    }

    #[test]
    fn test_command_line_errors() {
        let matches = command()
            .get_matches_from(vec!["tvm", "--max-call-depth", "deep"]);
        assert_eq!(
            Configuration::parse(&matches).unwrap_err(),
            "Invalid max_call_depth"
        );

        let matches =
            command().get_matches_from(vec!["tvm", "--config", "/nonexistent"]);
        assert!(Configuration::parse(&matches).is_err());
    }

    #[test]
    fn test_rejects_inconsistent_ratios() {
        let raw = RawConfiguration {
            min_time_ratio: 3.0,
            max_time_ratio: 1.0,
            ..Default::default()
        };
        assert!(Configuration::from_raw(raw).is_err());

        let raw = RawConfiguration {
            deadline_check_interval: 0,
            ..Default::default()
        };
        assert!(Configuration::from_raw(raw).is_err());
    }
}
