// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use std::{fs, sync::Arc};

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use log::{debug, info};
use primitives::{
    Abi, AbiEntry, AccountType, BlockContext, CreateSmartContract, Operation,
    SignedTransaction, SmartContract, Transaction, TriggerSmartContract,
};
use rustc_hex::{FromHex, ToHex};
use serde_json::json;
use tvm_config::Configuration;
use tvm_executor::{
    state::State, ExecutorError, Machine, ProgramResult, Runtime,
};
use tvm_statedb::{InMemoryStorage, StateDb};
use tvm_types::{
    cal_contract_address, Address, CreateContractAddressType, U256,
};
use tvm_vm_interpreter::Factory as VmFactory;

const DEFAULT_OWNER: &str = "000000000000000000000000000000000000000a";
const VM_CACHE_SIZE: usize = 1024;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Config(String),
    #[error("Invalid {0}: {1}")]
    Argument(&'static str, String),
    #[error("Failed to set up logging: {0}")]
    Logger(String),
    #[error(transparent)]
    Executor(#[from] ExecutorError),
    #[error(transparent)]
    StateDb(#[from] tvm_statedb::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("Custom error: {0}")]
    Custom(&'static str),
}

pub fn run_command() -> Command {
    Command::new("run")
        .about("Deploys a contract, optionally invokes it, prints verdicts.")
        .arg(
            Arg::new("code")
                .long("code")
                .value_name("HEX")
                .required(true)
                .help("Creation bytecode of the contract."),
        )
        .arg(
            Arg::new("abi")
                .long("abi")
                .value_name("FILE")
                .help("JSON ABI of the contract."),
        )
        .arg(
            Arg::new("owner")
                .long("owner")
                .value_name("ADDRESS")
                .default_value(DEFAULT_OWNER)
                .help("Funded account sending both transactions."),
        )
        .arg(
            Arg::new("balance")
                .long("balance")
                .value_name("SUN")
                .default_value("100000000000")
                .value_parser(value_parser!(u64))
                .help("Initial balance of the owner."),
        )
        .arg(
            Arg::new("fee-limit")
                .long("fee-limit")
                .value_name("SUN")
                .default_value("1000000000")
                .value_parser(value_parser!(i64))
                .allow_negative_numbers(true)
                .help("Fee limit of each transaction."),
        )
        .arg(
            Arg::new("value")
                .long("value")
                .value_name("SUN")
                .default_value("0")
                .value_parser(value_parser!(i64))
                .allow_negative_numbers(true)
                .help("Value endowed to the contract at deployment."),
        )
        .arg(
            Arg::new("percent")
                .long("consume-user-resource-percent")
                .value_name("PERCENT")
                .default_value("100")
                .value_parser(value_parser!(i64))
                .allow_negative_numbers(true)
                .help("Share of the energy cost borne by callers."),
        )
        .arg(
            Arg::new("origin-energy-limit")
                .long("origin-energy-limit")
                .value_name("ENERGY")
                .default_value("10000000")
                .value_parser(value_parser!(i64))
                .allow_negative_numbers(true)
                .help("Energy the deployer subsidizes per call."),
        )
        .arg(
            Arg::new("call")
                .long("call")
                .value_name("HEX")
                .help("Call data of an invocation after the deployment."),
        )
        .arg(
            Arg::new("call-value")
                .long("call-value")
                .value_name("SUN")
                .default_value("0")
                .value_parser(value_parser!(i64))
                .allow_negative_numbers(true)
                .help("Value sent along the invocation."),
        )
        .arg(
            Arg::new("block-number")
                .long("block-number")
                .value_name("NUMBER")
                .default_value("1")
                .value_parser(value_parser!(u64))
                .help("Number of the block both transactions are packed in."),
        )
        .arg(
            Arg::new("no-deadline")
                .long("no-deadline")
                .action(ArgAction::SetTrue)
                .help("Lifts the wall-clock deadline."),
        )
}

pub fn address_command() -> Command {
    Command::new("address")
        .about("Derives the address a deployment transaction creates.")
        .arg(
            Arg::new("owner")
                .long("owner")
                .value_name("ADDRESS")
                .required(true),
        )
        .arg(
            Arg::new("raw-transaction")
                .long("raw-transaction")
                .value_name("HEX")
                .required(true),
        )
}

pub fn run(conf: &Configuration, matches: &ArgMatches) -> Result<(), Error> {
    let owner = parse_address("owner", string_arg(matches, "owner")?)?;
    let code = parse_hex("code", string_arg(matches, "code")?)?;
    let abi = match matches.get_one::<String>("abi") {
        Some(path) => {
            let entries: Vec<AbiEntry> =
                serde_json::from_str(&fs::read_to_string(path)?)?;
            Abi::new(entries)
        }
        None => Abi::default(),
    };
    let fee_limit = value_arg::<i64>(matches, "fee-limit")?;
    let block = BlockContext {
        number: value_arg(matches, "block-number")?,
        generated_by_myself: true,
        ..Default::default()
    };

    let machine = Machine::new_with_builtin(
        conf.common_params(),
        VmFactory::new(VM_CACHE_SIZE),
    );
    let mut state =
        funded_ledger(conf, &owner, value_arg(matches, "balance")?)?;
    let enforce_deadline = !matches.get_flag("no-deadline");

    let create = Transaction {
        operation: Operation::CreateSmartContract(CreateSmartContract {
            owner_address: owner,
            new_contract: SmartContract {
                origin_address: owner,
                abi,
                bytecode: code,
                call_value: value_arg(matches, "value")?,
                consume_user_resource_percent: value_arg(matches, "percent")?,
                name: "cli".into(),
                origin_energy_limit: value_arg(matches, "origin-energy-limit")?,
                ..Default::default()
            },
            call_token_value: 0,
            token_id: 0,
        }),
        fee_limit,
        timestamp: 1,
        ..Default::default()
    }
    .sign(vec![1]);
    let deployed =
        execute(&create, &block, &mut state, &machine, enforce_deadline)?;
    print_verdict("create", &deployed)?;

    let (Some(call_data), Some(contract_address)) =
        (matches.get_one::<String>("call"), deployed.contract_address)
    else {
        return Ok(());
    };
    if !deployed.is_success() {
        info!("deployment failed, skip the invocation");
        return Ok(());
    }
    let call = Transaction {
        operation: Operation::TriggerSmartContract(TriggerSmartContract {
            owner_address: owner,
            contract_address,
            call_value: value_arg(matches, "call-value")?,
            data: parse_hex("call", call_data)?,
            call_token_value: 0,
            token_id: 0,
        }),
        fee_limit,
        timestamp: 2,
        ..Default::default()
    }
    .sign(vec![1]);
    let invoked =
        execute(&call, &block, &mut state, &machine, enforce_deadline)?;
    print_verdict("call", &invoked)
}

pub fn address(matches: &ArgMatches) -> Result<(), Error> {
    let owner = parse_address("owner", string_arg(matches, "owner")?)?;
    let raw_transaction =
        parse_hex("raw-transaction", string_arg(matches, "raw-transaction")?)?;
    let address = cal_contract_address(
        CreateContractAddressType::FromRawTransactionAndOwner {
            raw_transaction,
            owner,
        },
    );
    println!("{:?}", address);
    Ok(())
}

fn funded_ledger(
    conf: &Configuration, owner: &Address, balance: u64,
) -> Result<State, Error> {
    let db = StateDb::new(Arc::new(InMemoryStorage::new()));
    let mut state = State::new(db)?;
    state.set_total_energy_limit(conf.raw_conf.total_energy_limit);
    state.create_account(owner, AccountType::Normal);
    state.add_balance(owner, &U256::from(balance))?;
    state.commit()?;
    debug!("ledger funded: owner {:?}, balance {}", owner, balance);
    Ok(state)
}

fn execute(
    tx: &SignedTransaction, block: &BlockContext, state: &mut State,
    machine: &Machine, enforce_deadline: bool,
) -> Result<ProgramResult, Error> {
    let mut runtime = Runtime::new(tx, Some(block), state, machine);
    if !enforce_deadline {
        runtime.disable_deadline();
    }
    runtime.execute()?;
    runtime.go();
    runtime.finalization()?;
    Ok(runtime.into_result())
}

fn print_verdict(stage: &str, result: &ProgramResult) -> Result<(), Error> {
    let verdict = json!({
        "stage": stage,
        "result": result.contract_result.to_string(),
        "code": result.contract_result.code(),
        "energyLimit": result.energy_limit,
        "energyUsed": result.energy_used,
        "returnData": result.return_data.to_hex::<String>(),
        "runtimeError": result.runtime_error,
        "contractAddress": result.contract_address.map(|a| format!("{:?}", a)),
        "internalTransactions":
            result.internal_transactions.iter().collect::<Vec<_>>(),
        "triggers": result.triggers,
    });
    println!("{}", serde_json::to_string_pretty(&verdict)?);
    Ok(())
}

fn string_arg<'a>(
    matches: &'a ArgMatches, id: &'static str,
) -> Result<&'a str, Error> {
    matches
        .get_one::<String>(id)
        .map(String::as_str)
        .ok_or_else(|| Error::Argument(id, "missing".into()))
}

fn value_arg<T>(matches: &ArgMatches, id: &'static str) -> Result<T, Error>
where T: Clone + Send + Sync + 'static {
    matches
        .get_one::<T>(id)
        .cloned()
        .ok_or_else(|| Error::Argument(id, "missing".into()))
}

fn parse_hex(id: &'static str, value: &str) -> Result<Vec<u8>, Error> {
    let value = value.strip_prefix("0x").unwrap_or(value);
    value
        .from_hex()
        .map_err(|e| Error::Argument(id, e.to_string()))
}

fn parse_address(id: &'static str, value: &str) -> Result<Address, Error> {
    let bytes = parse_hex(id, value)?;
    if bytes.len() != Address::len_bytes() {
        return Err(Error::Argument(
            id,
            format!(
                "expect {} bytes, got {}",
                Address::len_bytes(),
                bytes.len()
            ),
        ));
    }
    Ok(Address::from_slice(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_address() {
        let address = parse_address("owner", DEFAULT_OWNER).unwrap();
        assert_eq!(address, Address::from_low_u64_be(0x0a));
        let prefixed = format!("0x{}", DEFAULT_OWNER);
        assert_eq!(parse_address("owner", &prefixed).unwrap(), address);

        assert!(matches!(
            parse_address("owner", "0a0b"),
            Err(Error::Argument("owner", _))
        ));
        assert!(parse_address("owner", "zz").is_err());
    }

    #[test]
    fn test_funded_ledger_takes_configured_energy_limit() {
        let raw = tvm_config::RawConfiguration {
            total_energy_limit: 1_000,
            ..Default::default()
        };
        let conf = Configuration::from_raw(raw).unwrap();
        let owner = Address::from_low_u64_be(0x0a);
        let state = funded_ledger(&conf, &owner, 500).unwrap();
        assert_eq!(state.total_energy_limit(), 1_000);
        assert_eq!(state.balance(&owner).unwrap(), U256::from(500));
    }

    #[test]
    fn test_run_deploys_and_calls() {
        // `SSTORE(0, 42)` then return the word 42, behind an init prefix
        // copying it into memory.
        let code = "600f600c600039600f6000f3602a600055602a60005260206000f3";
        let matches = run_command().get_matches_from(vec![
            "run",
            "--code",
            code,
            "--call",
            "00",
            "--no-deadline",
        ]);
        run(&Configuration::default(), &matches).unwrap();
    }

    #[test]
    fn test_rejected_deployment_surfaces_error() {
        let matches = run_command().get_matches_from(vec![
            "run",
            "--code",
            "00",
            "--fee-limit",
            "-1",
        ]);
        assert!(matches!(
            run(&Configuration::default(), &matches),
            Err(Error::Executor(_))
        ));
    }
}
