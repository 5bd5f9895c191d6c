// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

macro_rules! if_option {
	(Option<$type:ty>, THEN {$($then:tt)*} ELSE {$($otherwise:tt)*}) => (
		$($then)*
	);
	($type:ty, THEN {$($then:tt)*} ELSE {$($otherwise:tt)*}) => (
		$($otherwise)*
	);
}

macro_rules! underscore_to_hyphen {
    ($e:expr) => {
        str::replace($e, "_", "-")
    };
}

macro_rules! build_config{
    (
        {
            $(($name:ident, ($($type:tt)+), $default:expr))*
        }
        {
            $(($c_name:ident, ($($c_type:tt)+), $c_default:expr, $converter:expr))*
        }
    ) => {
        use clap;
        use std::{fs::File, io::prelude::*};
        use toml;

        #[derive(Debug, PartialEq, Clone)]
        pub struct RawConfiguration {
            $(pub $name: $($type)+,)*
            $(pub $c_name: $($c_type)+,)*
        }

        impl Default for RawConfiguration {
            fn default() -> Self {
                RawConfiguration {
                    $($name: $default,)*
                    $($c_name: $c_default,)*
                }
            }
        }

        impl RawConfiguration {
            // First parse arguments from config file,
            // and then parse them from commandline.
            // Replace the ones from config file with the ones
            // from commandline if duplicates.
            pub fn parse(matches: &clap::ArgMatches) -> Result<RawConfiguration, String> {
                let mut config = if let Some(config_filename) = arg_value(matches, "config") {
                    RawConfiguration::from_file(config_filename)?
                } else {
                    RawConfiguration::default()
                };
                $(
                    if let Some(value) = arg_value(matches, &underscore_to_hyphen!(stringify!($name))) {
                        config.$name = if_option!(
                                $($type)+,
                                THEN{ Some(value.parse().map_err(|_| concat!("Invalid ", stringify!($name)).to_owned())?) }
                                ELSE{ value.parse().map_err(|_| concat!("Invalid ", stringify!($name)).to_owned())? }
                            );
                    }
                )*
                $(
                    if let Some(value) = arg_value(matches, &underscore_to_hyphen!(stringify!($c_name))) {
                        config.$c_name = if_option!(
                                $($c_type)+,
                                THEN{ Some($converter(value)?) }
                                ELSE{ $converter(value)? }
                            )
                    }
                )*
                Ok(config)
            }

            pub fn from_file(config_path: &str) -> Result<RawConfiguration, String> {
                let mut config_file = File::open(config_path)
                    .map_err(|e| format!("failed to open configuration file: {:?}", e))?;

                let mut config_str = String::new();
                config_file
                    .read_to_string(&mut config_str)
                    .map_err(|e| format!("failed to read configuration file: {:?}", e))?;

                RawConfiguration::from_toml_str(&config_str)
            }

            pub fn from_toml_str(config_str: &str) -> Result<RawConfiguration, String> {
                let mut config = RawConfiguration::default();

                let config_value = config_str.parse::<toml::Table>()
                    .map_err(|e| format!("failed to parse configuration file: {:?}", e))?;
                $(
                    if let Some(value) = config_value.get(stringify!($name)) {
                        config.$name = if_option!(
                            $($type)+,
                            THEN{ Some(value.clone().try_into().map_err(|e| format!("Invalid {}: err={:?}", stringify!($name), e))?) }
                            ELSE{ value.clone().try_into().map_err(|e| format!("Invalid {}: err={:?}", stringify!($name), e))? }
                        );
                    }
                )*

                $(
                    if let Some(value) = config_value.get(stringify!($c_name)) {
                        let value = value.as_str().ok_or_else(|| {
                            format!("Invalid {}: expect a string", stringify!($c_name))
                        })?;
                        config.$c_name = if_option!(
                            $($c_type)+,
                            THEN{ Some($converter(value)?) }
                            ELSE{ $converter(value)? }
                        )
                    }
                )*
                Ok(config)
            }
        }

        /// Arguments the command does not declare are treated as absent.
        fn arg_value<'a>(matches: &'a clap::ArgMatches, id: &str) -> Option<&'a str> {
            matches
                .try_get_one::<String>(id)
                .ok()
                .flatten()
                .map(String::as_str)
        }
    }
}
