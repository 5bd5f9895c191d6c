// Copyright 2015-2018 Parity Technologies (UK) Ltd.
// This file is part of Parity.

// Parity is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// Parity is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with Parity.  If not, see <http://www.gnu.org/licenses/>.

// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/
//! Rust VM implementation

mod gasometer;
mod memory;
mod shared_cache;
mod stack;

use self::{
    gasometer::{u256_to_h256, Gasometer},
    memory::Memory,
    stack::{verify_instruction, Stack, VecStack},
};
pub use self::shared_cache::SharedCache;
use crate::instructions::{self, Instruction};
use bit_set::BitSet;
use keccak_hash::keccak;
use primitives::Bytes;
use std::{cmp, mem, sync::Arc, time::Instant};
use tvm_types::{address_util::AddressUtil, Address, U256, U512};
use vm::{
    self, ActionParams, CallType, ContractCreateResult, Error, ExecTrapResult,
    GasLeft, MessageCallResult, ReturnData, Spec, TrapError, TrapKind,
    TrapResult,
};

type ProgramCounter = usize;

const ONE: U256 = U256([1, 0, 0, 0]);
const TWO_POW_255: U256 = U256([0, 0, 0, 0x8000000000000000]);

/// Abstraction over raw vector of Bytes. Easier state management of PC.
struct CodeReader {
    position: ProgramCounter,
    code: Arc<Bytes>,
}

impl CodeReader {
    fn new(code: Arc<Bytes>) -> Self { CodeReader { code, position: 0 } }

    /// Get `no_of_bytes` from code and convert to U256. Move PC. Bytes past
    /// the end of the code read as zero.
    fn read(&mut self, no_of_bytes: usize) -> U256 {
        let pos = self.position;
        self.position += no_of_bytes;
        let max = cmp::min(pos + no_of_bytes, self.code.len());
        let mut word = [0u8; 32];
        let start = 32 - no_of_bytes;
        word[start..start + (max - pos)].copy_from_slice(&self.code[pos..max]);
        U256::from_big_endian(&word)
    }

    fn len(&self) -> usize { self.code.len() }
}

enum InstructionResult {
    Ok,
    UnusedEnergy(u64),
    JumpToPosition(U256),
    StopExecutionNeedsReturn {
        /// Energy left.
        energy: u64,
        /// Return data offset.
        init_off: U256,
        /// Return data size.
        init_size: U256,
        /// Apply or revert state changes.
        apply: bool,
    },
    StopExecution,
    Trap(TrapKind),
}

/// ActionParams without code, so that it can be feed into CodeReader.
#[derive(Debug)]
struct InterpreterParams {
    /// Address of currently executed code.
    code_address: Address,
    /// Hash of currently executed code.
    code_hash: tvm_types::H256,
    /// Receive address. Usually equal to code_address,
    /// except when called using DELEGATECALL.
    address: Address,
    /// Sender of current part of the transaction.
    sender: Address,
    /// Transaction initiator.
    origin: Address,
    /// Energy paid up front for transaction execution
    energy: u64,
    /// Transaction value.
    value: U256,
    /// Secondary asset id and amount moved with the call.
    token_id: u64,
    token_amount: U256,
    /// Input data.
    data: Option<Bytes>,
}

impl From<ActionParams> for InterpreterParams {
    fn from(params: ActionParams) -> Self {
        InterpreterParams {
            code_address: params.code_address,
            code_hash: params.code_hash,
            address: params.address,
            sender: params.sender,
            origin: params.origin,
            energy: params.energy,
            value: params.value.value(),
            token_id: params.token_id(),
            token_amount: params.token_amount(),
            data: params.data,
        }
    }
}

/// Outcome of a single step.
enum InterpreterResult {
    /// The VM has already stopped.
    Done(vm::Result<GasLeft>),
    /// The VM can continue to run.
    Continue,
    /// The VM is suspended for a sub call or create.
    Trap(TrapKind),
}

/// Intepreter EVM implementation
pub struct Interpreter {
    mem: Vec<u8>,
    cache: Arc<SharedCache>,
    params: InterpreterParams,
    reader: CodeReader,
    return_data: ReturnData,
    valid_jump_destinations: Option<Arc<BitSet>>,
    gasometer: Gasometer,
    stack: VecStack<U256>,
    resume_output_range: Option<(U256, U256)>,
    /// Instructions executed so far; drives the deadline sampling.
    steps: u64,
}

impl vm::Exec for Interpreter {
    fn exec(
        mut self: Box<Self>, context: &mut dyn vm::Context,
    ) -> ExecTrapResult<GasLeft> {
        if context.deadline().is_exceeded(Instant::now()) {
            return TrapResult::Return(Err(Error::OutOfTime {
                instruction: self.current_instruction_name(),
            }));
        }
        loop {
            match self.step(context) {
                InterpreterResult::Continue => {}
                InterpreterResult::Done(value) => {
                    return TrapResult::Return(value)
                }
                InterpreterResult::Trap(TrapKind::Call(params)) => {
                    return TrapResult::SubCallCreate(TrapError::Call(
                        params, self,
                    ));
                }
                InterpreterResult::Trap(TrapKind::Create(params)) => {
                    return TrapResult::SubCallCreate(TrapError::Create(
                        params, self,
                    ));
                }
            }
        }
    }
}

impl vm::ResumeCall for Interpreter {
    fn resume_call(
        mut self: Box<Self>, result: MessageCallResult,
    ) -> Box<dyn vm::Exec> {
        let unused = self.apply_call_result(result);
        self.gasometer.current_energy =
            self.gasometer.current_energy.saturating_add(unused);
        self
    }
}

impl vm::ResumeCreate for Interpreter {
    fn resume_create(
        mut self: Box<Self>, result: ContractCreateResult,
    ) -> Box<dyn vm::Exec> {
        let unused = self.apply_create_result(result);
        self.gasometer.current_energy =
            self.gasometer.current_energy.saturating_add(unused);
        self
    }
}

impl Interpreter {
    /// Create a new `Interpreter` instance with shared cache.
    pub fn new(
        mut params: ActionParams, cache: Arc<SharedCache>, spec: &Spec,
    ) -> Interpreter {
        let reader =
            CodeReader::new(params.code.take().unwrap_or_default());
        let params = InterpreterParams::from(params);
        let gasometer = Gasometer::new(params.energy);
        let stack = VecStack::with_capacity(spec.stack_limit);

        Interpreter {
            cache,
            params,
            reader,
            gasometer,
            stack,
            mem: Vec::new(),
            return_data: ReturnData::empty(),
            valid_jump_destinations: None,
            resume_output_range: None,
            steps: 0,
        }
    }

    fn current_instruction_name(&self) -> &'static str {
        self.reader
            .code
            .get(self.reader.position)
            .and_then(|opcode| Instruction::from_u8(*opcode))
            .map_or("UNKNOWN", |instruction| instruction.info().name)
    }

    /// Execute a single step on the VM.
    #[inline(always)]
    fn step(&mut self, context: &mut dyn vm::Context) -> InterpreterResult {
        // Running off the end of the code is an implicit STOP.
        if self.reader.position >= self.reader.len() {
            return InterpreterResult::Done(Ok(GasLeft::Known(
                self.gasometer.current_energy,
            )));
        }

        let opcode = self.reader.code[self.reader.position];
        self.reader.position += 1;

        let instruction = match Instruction::from_u8(opcode)
            .filter(|instruction| is_enabled(context.spec(), *instruction))
        {
            Some(instruction) => instruction,
            None => {
                return InterpreterResult::Done(Err(Error::BadInstruction {
                    instruction: opcode,
                }))
            }
        };
        let info = instruction.info();

        self.steps += 1;
        let interval = context.spec().deadline_check_interval;
        if interval > 0
            && self.steps % interval == 0
            && context.deadline().is_exceeded(Instant::now())
        {
            warn!("deadline passed at {} after {} steps", info.name, self.steps);
            return InterpreterResult::Done(Err(Error::OutOfTime {
                instruction: info.name,
            }));
        }

        if let Err(e) = verify_instruction(
            &self.stack,
            instruction,
            context.spec().stack_limit,
        ) {
            return InterpreterResult::Done(Err(e));
        }

        let requirements = match self.gasometer.requirements(
            context,
            instruction,
            info,
            &self.stack,
            self.mem.size(),
        ) {
            Ok(t) => t,
            Err(e) => return InterpreterResult::Done(Err(e)),
        };
        if let Err(e) =
            self.gasometer.verify_energy(info, requirements.energy_cost)
        {
            return InterpreterResult::Done(Err(e));
        }
        self.mem.expand(requirements.memory_required_size);
        self.gasometer.current_mem_energy = requirements.memory_total_energy;
        self.gasometer.current_energy -= requirements.energy_cost;

        let result = match self.exec_instruction(
            context,
            instruction,
            requirements.provide_energy,
        ) {
            Ok(result) => result,
            Err(e) => return InterpreterResult::Done(Err(e)),
        };

        match result {
            InstructionResult::Ok => {}
            InstructionResult::JumpToPosition(position) => {
                match self.verify_jump(position) {
                    Ok(pos) => self.reader.position = pos,
                    Err(e) => return InterpreterResult::Done(Err(e)),
                }
            }
            InstructionResult::UnusedEnergy(energy) => {
                self.gasometer.current_energy =
                    self.gasometer.current_energy.saturating_add(energy);
            }
            InstructionResult::StopExecutionNeedsReturn {
                energy,
                init_off,
                init_size,
                apply,
            } => {
                let mem = mem::take(&mut self.mem);
                return InterpreterResult::Done(Ok(GasLeft::NeedsReturn {
                    energy_left: energy,
                    data: mem.into_return_data(init_off, init_size),
                    apply_state: apply,
                }));
            }
            InstructionResult::StopExecution => {
                return InterpreterResult::Done(Ok(GasLeft::Known(
                    self.gasometer.current_energy,
                )));
            }
            InstructionResult::Trap(trap) => {
                return InterpreterResult::Trap(trap)
            }
        }

        InterpreterResult::Continue
    }

    fn verify_jump(&mut self, jump_u: U256) -> vm::Result<usize> {
        let jump = if jump_u > U256::from(usize::MAX) {
            usize::MAX
        } else {
            jump_u.low_u64() as usize
        };
        let valid_jump_destinations = match &self.valid_jump_destinations {
            Some(destinations) => destinations.clone(),
            None => {
                let destinations = self.cache.jump_destinations(
                    &self.params.code_hash,
                    &self.reader.code,
                );
                self.valid_jump_destinations = Some(destinations.clone());
                destinations
            }
        };

        if valid_jump_destinations.contains(jump) && jump < self.reader.len()
        {
            Ok(jump)
        } else {
            Err(Error::BadJumpDestination { destination: jump })
        }
    }

    /// Pushes the outcome of a finished sub call and returns the energy it
    /// did not use.
    fn apply_call_result(&mut self, result: MessageCallResult) -> u64 {
        let (out_off, out_size) =
            self.resume_output_range.take().unwrap_or_default();
        match result {
            MessageCallResult::Success(energy_left, data) => {
                self.write_call_output(out_off, out_size, &data);
                self.return_data = data;
                self.stack.push(U256::one());
                energy_left
            }
            MessageCallResult::Reverted(energy_left, data) => {
                self.write_call_output(out_off, out_size, &data);
                self.return_data = data;
                self.stack.push(U256::zero());
                energy_left
            }
            MessageCallResult::Failed(err) => {
                debug!("sub call failed: {}", err);
                self.return_data = ReturnData::empty();
                self.stack.push(U256::zero());
                0
            }
        }
    }

    fn write_call_output(&mut self, offset: U256, size: U256, data: &[u8]) {
        let len = cmp::min(size.low_u64() as usize, data.len());
        self.mem.write_slice(offset, &data[..len]);
    }

    /// Pushes the outcome of a finished sub create and returns the energy
    /// it did not use.
    fn apply_create_result(&mut self, result: ContractCreateResult) -> u64 {
        match result {
            ContractCreateResult::Created(address, energy_left) => {
                self.return_data = ReturnData::empty();
                self.stack.push(address.to_word());
                energy_left
            }
            ContractCreateResult::Reverted(energy_left, data) => {
                self.return_data = data;
                self.stack.push(U256::zero());
                energy_left
            }
            ContractCreateResult::Failed(err) => {
                debug!("sub create failed: {}", err);
                self.return_data = ReturnData::empty();
                self.stack.push(U256::zero());
                0
            }
        }
    }

    fn exec_instruction(
        &mut self, context: &mut dyn vm::Context, instruction: Instruction,
        provided: Option<u64>,
    ) -> vm::Result<InstructionResult> {
        match instruction {
            instructions::JUMP => {
                let jump = self.stack.pop_back();
                return Ok(InstructionResult::JumpToPosition(jump));
            }
            instructions::JUMPI => {
                let jump = self.stack.pop_back();
                let condition = self.stack.pop_back();
                if !condition.is_zero() {
                    return Ok(InstructionResult::JumpToPosition(jump));
                }
            }
            instructions::JUMPDEST => {
                // ignore
            }
            instructions::CREATE => {
                let endowment = self.stack.pop_back();
                let init_off = self.stack.pop_back();
                let init_size = self.stack.pop_back();
                let create_energy = provided.expect(
                    "`provided` comes through Self::exec from \
                     `Gasometer::requirements`; it is `Some` for CREATE; qed",
                );

                if context.is_static() {
                    return Err(Error::MutableCallInStaticContext);
                }

                // clear return data buffer before creating new call frame.
                self.return_data = ReturnData::empty();

                if context.balance(&self.params.address)? < endowment {
                    self.stack.push(U256::zero());
                    return Ok(InstructionResult::UnusedEnergy(create_energy));
                }

                let contract_code =
                    self.mem.read_slice(init_off, init_size).to_vec();
                let create_result =
                    context.create(create_energy, &endowment, &contract_code)?;

                return match create_result {
                    Ok(result) => Ok(InstructionResult::UnusedEnergy(
                        self.apply_create_result(result),
                    )),
                    Err(trap) => Ok(InstructionResult::Trap(trap)),
                };
            }
            instructions::CALL
            | instructions::DELEGATECALL
            | instructions::STATICCALL => {
                self.stack.pop_back();
                let call_energy = provided.expect(
                    "`provided` comes through Self::exec from \
                     `Gasometer::requirements`; it is `Some` for the \
                     CALL family; qed",
                );
                let code_address = Address::from_word(&self.stack.pop_back());

                let value = if instruction == instructions::CALL {
                    Some(self.stack.pop_back())
                } else {
                    None
                };

                let in_off = self.stack.pop_back();
                let in_size = self.stack.pop_back();
                let out_off = self.stack.pop_back();
                let out_size = self.stack.pop_back();

                // Add stipend (only CALL transfers value)
                let call_energy = call_energy
                    + value.map_or(0, |val| {
                        if val.is_zero() {
                            0
                        } else {
                            context.spec().call_stipend
                        }
                    });

                let (sender_address, receive_address, has_balance, call_type) =
                    match instruction {
                        instructions::CALL => {
                            if context.is_static()
                                && value.map_or(false, |v| !v.is_zero())
                            {
                                return Err(Error::MutableCallInStaticContext);
                            }
                            let has_balance = context
                                .balance(&self.params.address)?
                                >= value.unwrap_or_default();
                            (
                                self.params.address,
                                code_address,
                                has_balance,
                                CallType::Call,
                            )
                        }
                        instructions::DELEGATECALL => (
                            self.params.sender,
                            self.params.address,
                            true,
                            CallType::DelegateCall,
                        ),
                        instructions::STATICCALL => (
                            self.params.address,
                            code_address,
                            true,
                            CallType::StaticCall,
                        ),
                        _ => unreachable!(),
                    };

                // clear return data buffer before creating new call frame.
                self.return_data = ReturnData::empty();

                if !has_balance {
                    self.stack.push(U256::zero());
                    return Ok(InstructionResult::UnusedEnergy(call_energy));
                }

                let call_result = {
                    let input = self.mem.read_slice(in_off, in_size);
                    context.call(
                        call_energy,
                        &sender_address,
                        &receive_address,
                        value,
                        None,
                        input,
                        &code_address,
                        call_type,
                    )?
                };

                self.resume_output_range = Some((out_off, out_size));

                return match call_result {
                    Ok(result) => Ok(InstructionResult::UnusedEnergy(
                        self.apply_call_result(result),
                    )),
                    Err(trap) => Ok(InstructionResult::Trap(trap)),
                };
            }
            instructions::RETURN => {
                let init_off = self.stack.pop_back();
                let init_size = self.stack.pop_back();

                return Ok(InstructionResult::StopExecutionNeedsReturn {
                    energy: self.gasometer.current_energy,
                    init_off,
                    init_size,
                    apply: true,
                });
            }
            instructions::REVERT => {
                let init_off = self.stack.pop_back();
                let init_size = self.stack.pop_back();

                return Ok(InstructionResult::StopExecutionNeedsReturn {
                    energy: self.gasometer.current_energy,
                    init_off,
                    init_size,
                    apply: false,
                });
            }
            instructions::STOP => {
                return Ok(InstructionResult::StopExecution);
            }
            instructions::SELFDESTRUCT => {
                if context.is_static() {
                    return Err(Error::MutableCallInStaticContext);
                }
                let address = self.stack.pop_back();
                let refund_address = Address::from_word(&address);
                context.suicide(&refund_address)?;
                return Ok(InstructionResult::StopExecution);
            }
            instructions::LOG0
            | instructions::LOG1
            | instructions::LOG2
            | instructions::LOG3
            | instructions::LOG4 => {
                if context.is_static() {
                    return Err(Error::MutableCallInStaticContext);
                }
                let no_of_topics = instruction.log_topics().unwrap_or(0);

                let offset = self.stack.pop_back();
                let size = self.stack.pop_back();
                let topics = self
                    .stack
                    .pop_n(no_of_topics)
                    .iter()
                    .map(u256_to_h256)
                    .collect();
                context.log(topics, self.mem.read_slice(offset, size))?;
            }
            instructions::PUSH1
            | instructions::PUSH2
            | instructions::PUSH3
            | instructions::PUSH4
            | instructions::PUSH5
            | instructions::PUSH6
            | instructions::PUSH7
            | instructions::PUSH8
            | instructions::PUSH9
            | instructions::PUSH10
            | instructions::PUSH11
            | instructions::PUSH12
            | instructions::PUSH13
            | instructions::PUSH14
            | instructions::PUSH15
            | instructions::PUSH16
            | instructions::PUSH17
            | instructions::PUSH18
            | instructions::PUSH19
            | instructions::PUSH20
            | instructions::PUSH21
            | instructions::PUSH22
            | instructions::PUSH23
            | instructions::PUSH24
            | instructions::PUSH25
            | instructions::PUSH26
            | instructions::PUSH27
            | instructions::PUSH28
            | instructions::PUSH29
            | instructions::PUSH30
            | instructions::PUSH31
            | instructions::PUSH32 => {
                let bytes = instruction.push_bytes().unwrap_or(0);
                let val = self.reader.read(bytes);
                self.stack.push(val);
            }
            instructions::MLOAD => {
                let word = self.mem.read(self.stack.pop_back());
                self.stack.push(word);
            }
            instructions::MSTORE => {
                let offset = self.stack.pop_back();
                let word = self.stack.pop_back();
                Memory::write(&mut self.mem, offset, word);
            }
            instructions::MSTORE8 => {
                let offset = self.stack.pop_back();
                let byte = self.stack.pop_back();
                self.mem.write_byte(offset, byte);
            }
            instructions::MSIZE => {
                self.stack.push(U256::from(self.mem.size()));
            }
            instructions::SHA3 => {
                let offset = self.stack.pop_back();
                let size = self.stack.pop_back();
                let k = keccak(self.mem.read_slice(offset, size));
                self.stack.push(U256::from_big_endian(k.as_bytes()));
            }
            instructions::SLOAD => {
                let key = u256_to_h256(&self.stack.pop_back());
                let word = context.storage_at(&key)?;
                self.stack.push(word);
            }
            instructions::SSTORE => {
                if context.is_static() {
                    return Err(Error::MutableCallInStaticContext);
                }
                let key = u256_to_h256(&self.stack.pop_back());
                let val = self.stack.pop_back();

                let current_val = context.storage_at(&key)?;
                if !current_val.is_zero() && val.is_zero() {
                    let refund = context.spec().sstore_refund_energy;
                    context.add_sstore_refund(refund);
                }
                context.set_storage(key, val)?;
            }
            instructions::PC => {
                self.stack.push(U256::from(self.reader.position - 1));
            }
            instructions::GAS => {
                self.stack.push(U256::from(self.gasometer.current_energy));
            }
            instructions::ADDRESS => {
                self.stack.push(self.params.address.to_word());
            }
            instructions::ORIGIN => {
                self.stack.push(self.params.origin.to_word());
            }
            instructions::BALANCE => {
                let address = Address::from_word(&self.stack.pop_back());
                let balance = context.balance(&address)?;
                self.stack.push(balance);
            }
            instructions::SELFBALANCE => {
                let balance = context.balance(&self.params.address)?;
                self.stack.push(balance);
            }
            instructions::TOKENBALANCE => {
                let token_id = self.stack.pop_back();
                let address = Address::from_word(&self.stack.pop_back());
                let balance = if token_id > U256::from(u64::MAX) {
                    U256::zero()
                } else {
                    context.token_balance(&address, token_id.low_u64())?
                };
                self.stack.push(balance);
            }
            instructions::CALLTOKENVALUE => {
                self.stack.push(self.params.token_amount);
            }
            instructions::CALLTOKENID => {
                self.stack.push(U256::from(self.params.token_id));
            }
            instructions::CALLER => {
                self.stack.push(self.params.sender.to_word());
            }
            instructions::CALLVALUE => {
                self.stack.push(self.params.value);
            }
            instructions::CALLDATALOAD => {
                let big_id = self.stack.pop_back();
                let data = self.params.data.as_deref().unwrap_or(&[]);
                let word = if big_id >= U256::from(data.len()) {
                    U256::zero()
                } else {
                    let id = big_id.low_u64() as usize;
                    let max = cmp::min(id + 32, data.len());
                    let mut v = [0u8; 32];
                    v[0..max - id].copy_from_slice(&data[id..max]);
                    U256::from_big_endian(&v)
                };
                self.stack.push(word);
            }
            instructions::CALLDATASIZE => {
                let len = self.params.data.as_ref().map_or(0, |d| d.len());
                self.stack.push(U256::from(len));
            }
            instructions::CODESIZE => {
                self.stack.push(U256::from(self.reader.len()));
            }
            instructions::RETURNDATASIZE => {
                self.stack.push(U256::from(self.return_data.len()))
            }
            instructions::EXTCODESIZE => {
                let address = Address::from_word(&self.stack.pop_back());
                let len = context.extcodesize(&address)?;
                self.stack.push(U256::from(len));
            }
            instructions::CALLDATACOPY => {
                let data = self.params.data.as_deref().unwrap_or(&[]);
                Self::copy_data_to_memory(&mut self.mem, &mut self.stack, data);
            }
            instructions::RETURNDATACOPY => {
                {
                    let source_offset = self.stack.peek(1);
                    let size = self.stack.peek(2);
                    let return_data_len = U256::from(self.return_data.len());
                    let (end, overflow) = source_offset.overflowing_add(*size);
                    if overflow || end > return_data_len {
                        return Err(Error::OutOfBounds);
                    }
                }
                Self::copy_data_to_memory(
                    &mut self.mem,
                    &mut self.stack,
                    &self.return_data,
                );
            }
            instructions::CODECOPY => {
                Self::copy_data_to_memory(
                    &mut self.mem,
                    &mut self.stack,
                    &self.reader.code,
                );
            }
            instructions::EXTCODECOPY => {
                let address = Address::from_word(&self.stack.pop_back());
                let code = context.extcode(&address)?;
                Self::copy_data_to_memory(
                    &mut self.mem,
                    &mut self.stack,
                    code.as_ref().map_or(&[][..], |c| &c[..]),
                );
            }
            instructions::GASPRICE => {
                self.stack.push(U256::zero());
            }
            instructions::BLOCKHASH => {
                let block_number = self.stack.pop_back();
                let block_hash = context.blockhash(&block_number);
                self.stack.push(U256::from_big_endian(block_hash.as_bytes()));
            }
            instructions::COINBASE => {
                self.stack.push(context.env().author.to_word());
            }
            instructions::TIMESTAMP => {
                self.stack.push(U256::from(context.env().timestamp));
            }
            instructions::NUMBER => {
                self.stack.push(U256::from(context.env().number));
            }
            instructions::DIFFICULTY | instructions::GASLIMIT => {
                self.stack.push(U256::zero());
            }

            // Stack instructions
            instructions::DUP1
            | instructions::DUP2
            | instructions::DUP3
            | instructions::DUP4
            | instructions::DUP5
            | instructions::DUP6
            | instructions::DUP7
            | instructions::DUP8
            | instructions::DUP9
            | instructions::DUP10
            | instructions::DUP11
            | instructions::DUP12
            | instructions::DUP13
            | instructions::DUP14
            | instructions::DUP15
            | instructions::DUP16 => {
                let position = instruction.dup_position().unwrap_or(0);
                let val = *self.stack.peek(position);
                self.stack.push(val);
            }
            instructions::SWAP1
            | instructions::SWAP2
            | instructions::SWAP3
            | instructions::SWAP4
            | instructions::SWAP5
            | instructions::SWAP6
            | instructions::SWAP7
            | instructions::SWAP8
            | instructions::SWAP9
            | instructions::SWAP10
            | instructions::SWAP11
            | instructions::SWAP12
            | instructions::SWAP13
            | instructions::SWAP14
            | instructions::SWAP15
            | instructions::SWAP16 => {
                let position = instruction.swap_position().unwrap_or(1);
                self.stack.swap_with_top(position)
            }
            instructions::POP => {
                self.stack.pop_back();
            }
            instructions::ADD => {
                let a = self.stack.pop_back();
                let b = self.stack.pop_back();
                self.stack.push(a.overflowing_add(b).0);
            }
            instructions::MUL => {
                let a = self.stack.pop_back();
                let b = self.stack.pop_back();
                self.stack.push(a.overflowing_mul(b).0);
            }
            instructions::SUB => {
                let a = self.stack.pop_back();
                let b = self.stack.pop_back();
                self.stack.push(a.overflowing_sub(b).0);
            }
            instructions::DIV => {
                let a = self.stack.pop_back();
                let b = self.stack.pop_back();
                self.stack
                    .push(if !b.is_zero() { a / b } else { U256::zero() });
            }
            instructions::MOD => {
                let a = self.stack.pop_back();
                let b = self.stack.pop_back();
                self.stack
                    .push(if !b.is_zero() { a % b } else { U256::zero() });
            }
            instructions::SDIV => {
                let (a, sign_a) = get_and_reset_sign(self.stack.pop_back());
                let (b, sign_b) = get_and_reset_sign(self.stack.pop_back());

                self.stack.push(if b.is_zero() {
                    U256::zero()
                } else {
                    set_sign(a / b, sign_a ^ sign_b)
                });
            }
            instructions::SMOD => {
                let ua = self.stack.pop_back();
                let ub = self.stack.pop_back();
                let (a, sign_a) = get_and_reset_sign(ua);
                let b = get_and_reset_sign(ub).0;

                self.stack.push(if !b.is_zero() {
                    set_sign(a % b, sign_a)
                } else {
                    U256::zero()
                });
            }
            instructions::EXP => {
                let base = self.stack.pop_back();
                let expon = self.stack.pop_back();
                let res = base.overflowing_pow(expon).0;
                self.stack.push(res);
            }
            instructions::NOT => {
                let a = self.stack.pop_back();
                self.stack.push(!a);
            }
            instructions::LT => {
                let a = self.stack.pop_back();
                let b = self.stack.pop_back();
                self.stack.push(bool_to_u256(a < b));
            }
            instructions::SLT => {
                let a = self.stack.pop_back();
                let b = self.stack.pop_back();
                self.stack.push(bool_to_u256(signed_lt(a, b)));
            }
            instructions::GT => {
                let a = self.stack.pop_back();
                let b = self.stack.pop_back();
                self.stack.push(bool_to_u256(a > b));
            }
            instructions::SGT => {
                let a = self.stack.pop_back();
                let b = self.stack.pop_back();
                self.stack.push(bool_to_u256(signed_lt(b, a)));
            }
            instructions::EQ => {
                let a = self.stack.pop_back();
                let b = self.stack.pop_back();
                self.stack.push(bool_to_u256(a == b));
            }
            instructions::ISZERO => {
                let a = self.stack.pop_back();
                self.stack.push(bool_to_u256(a.is_zero()));
            }
            instructions::AND => {
                let a = self.stack.pop_back();
                let b = self.stack.pop_back();
                self.stack.push(a & b);
            }
            instructions::OR => {
                let a = self.stack.pop_back();
                let b = self.stack.pop_back();
                self.stack.push(a | b);
            }
            instructions::XOR => {
                let a = self.stack.pop_back();
                let b = self.stack.pop_back();
                self.stack.push(a ^ b);
            }
            instructions::BYTE => {
                let word = self.stack.pop_back();
                let val = self.stack.pop_back();
                let byte = if word < U256::from(32) {
                    (val >> (8 * (31 - word.low_u64() as usize)))
                        & U256::from(0xff)
                } else {
                    U256::zero()
                };
                self.stack.push(byte);
            }
            instructions::ADDMOD => {
                let a = self.stack.pop_back();
                let b = self.stack.pop_back();
                let c = self.stack.pop_back();

                self.stack.push(if !c.is_zero() {
                    let res = (U512::from(a) + U512::from(b)) % U512::from(c);
                    u512_to_u256(res)
                } else {
                    U256::zero()
                });
            }
            instructions::MULMOD => {
                let a = self.stack.pop_back();
                let b = self.stack.pop_back();
                let c = self.stack.pop_back();

                self.stack.push(if !c.is_zero() {
                    let res = (U512::from(a) * U512::from(b)) % U512::from(c);
                    u512_to_u256(res)
                } else {
                    U256::zero()
                });
            }
            instructions::SIGNEXTEND => {
                let bit = self.stack.pop_back();
                if bit < U256::from(32) {
                    let number = self.stack.pop_back();
                    let bit_position = (bit.low_u64() * 8 + 7) as usize;

                    let bit = number.bit(bit_position);
                    let mask = (ONE << bit_position) - ONE;
                    self.stack.push(if bit {
                        number | !mask
                    } else {
                        number & mask
                    });
                }
            }
            instructions::SHL => {
                let shift = self.stack.pop_back();
                let value = self.stack.pop_back();

                let result = if shift >= U256::from(256) {
                    U256::zero()
                } else {
                    value << (shift.low_u64() as usize)
                };
                self.stack.push(result);
            }
            instructions::SHR => {
                let shift = self.stack.pop_back();
                let value = self.stack.pop_back();

                let result = if shift >= U256::from(256) {
                    U256::zero()
                } else {
                    value >> (shift.low_u64() as usize)
                };
                self.stack.push(result);
            }
            instructions::SAR => {
                let shift = self.stack.pop_back();
                let value = self.stack.pop_back();
                let sign = value & TWO_POW_255 != U256::zero();

                let result = if shift >= U256::from(256) {
                    if sign {
                        U256::MAX
                    } else {
                        U256::zero()
                    }
                } else {
                    let shift = shift.low_u64() as usize;
                    let mut shifted = value >> shift;
                    if sign && shift > 0 {
                        shifted = shifted | (U256::MAX << (256 - shift));
                    }
                    shifted
                };
                self.stack.push(result);
            }
            instructions::INVALID => {
                return Err(Error::BadInstruction {
                    instruction: instruction as u8,
                });
            }
            _ => {
                return Err(Error::BadInstruction {
                    instruction: instruction as u8,
                });
            }
        };
        Ok(InstructionResult::Ok)
    }

    fn copy_data_to_memory(
        mem: &mut Vec<u8>, stack: &mut dyn Stack<U256>, source: &[u8],
    ) {
        let dest_offset = stack.pop_back();
        let source_offset = stack.pop_back();
        let size = stack.pop_back();
        let source_size = U256::from(source.len());

        let output_end = match source_offset > source_size
            || size > source_size
            || source_offset + size > source_size
        {
            true => {
                let zero_slice = if source_offset > source_size {
                    mem.writeable_slice(dest_offset, size)
                } else {
                    mem.writeable_slice(
                        dest_offset + source_size - source_offset,
                        source_offset + size - source_size,
                    )
                };
                for i in zero_slice.iter_mut() {
                    *i = 0;
                }
                source.len()
            }
            false => (size.low_u64() + source_offset.low_u64()) as usize,
        };

        if source_offset < source_size {
            let output_begin = source_offset.low_u64() as usize;
            mem.write_slice(dest_offset, &source[output_begin..output_end]);
        }
    }
}

/// Instructions introduced by hard forks are illegal before activation.
fn is_enabled(spec: &Spec, instruction: Instruction) -> bool {
    match instruction {
        instructions::SHL | instructions::SHR | instructions::SAR => {
            spec.allow_tvm_constantinople
        }
        instructions::SELFBALANCE => spec.allow_tvm_istanbul,
        instructions::TOKENBALANCE
        | instructions::CALLTOKENVALUE
        | instructions::CALLTOKENID => spec.allow_tvm_transfer_trc10,
        _ => true,
    }
}

#[inline]
fn get_and_reset_sign(value: U256) -> (U256, bool) {
    let U256(arr) = value;
    let sign = arr[3].leading_zeros() == 0;
    (set_sign(value, sign), sign)
}

#[inline]
fn set_sign(value: U256, sign: bool) -> U256 {
    if sign {
        (!U256::zero() ^ value).overflowing_add(U256::one()).0
    } else {
        value
    }
}

#[inline]
fn signed_lt(a: U256, b: U256) -> bool {
    let (a, neg_a) = get_and_reset_sign(a);
    let (b, neg_b) = get_and_reset_sign(b);
    match (neg_a, neg_b) {
        (false, false) => a < b,
        (true, true) => a > b,
        (true, false) => true,
        (false, true) => false,
    }
}

#[inline]
fn bool_to_u256(val: bool) -> U256 {
    if val {
        U256::one()
    } else {
        U256::zero()
    }
}

/// The value is reduced modulo a 256-bit number, so the high words are zero.
#[inline]
fn u512_to_u256(value: U512) -> U256 {
    let U512(words) = value;
    U256([words[0], words[1], words[2], words[3]])
}
