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
use super::factory::Factory;
use rustc_hex::FromHex;
use std::{
    collections::{HashMap, HashSet},
    fmt::Debug,
    hash::Hash,
    str::FromStr,
    sync::Arc,
};
use tvm_types::{Address, H256, U256};
use vm::{
    self,
    tests::{test_finalize, MockCall, MockCallType, MockContext},
    ActionParams, ActionValue, Context, GasLeft, TokenValue,
};

evm_test! {test_add: test_add_int}
fn test_add(factory: super::Factory) {
    let address =
        Address::from_str("0f572e5295c57f15886f9b263e2f6d2d6c7b5ec6").unwrap();
    let code = "7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff01600055".from_hex().unwrap();

    let mut params = ActionParams::default();
    params.address = address.clone();
    params.energy = 100_000;
    params.code = Some(Arc::new(code));
    let mut ctx = MockContext::new();

    let energy_left = {
        let vm = factory.create(params, ctx.spec(), ctx.depth());
        test_finalize(vm.exec(&mut ctx).ok().unwrap()).unwrap()
    };

    assert_eq!(energy_left, 79_988);
    assert_store(
        &ctx,
        0,
        "fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffe",
    );
}

evm_test! {test_sha3: test_sha3_int}
fn test_sha3(factory: super::Factory) {
    let address =
        Address::from_str("0f572e5295c57f15886f9b263e2f6d2d6c7b5ec6").unwrap();
    let code = "6000600020600055".from_hex().unwrap();

    let mut params = ActionParams::default();
    params.address = address.clone();
    params.energy = 100_000;
    params.code = Some(Arc::new(code));
    let mut ctx = MockContext::new();

    let energy_left = {
        let vm = factory.create(params, ctx.spec(), ctx.depth());
        test_finalize(vm.exec(&mut ctx).ok().unwrap()).unwrap()
    };

    assert_eq!(energy_left, 79_961);
    assert_store(
        &ctx,
        0,
        "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470",
    );
}

evm_test! {test_address: test_address_int}
fn test_address(factory: super::Factory) {
    let address =
        Address::from_str("0f572e5295c57f15886f9b263e2f6d2d6c7b5ec6").unwrap();
    let code = "30600055".from_hex().unwrap();

    let mut params = ActionParams::default();
    params.address = address.clone();
    params.energy = 100_000;
    params.code = Some(Arc::new(code));
    let mut ctx = MockContext::new();

    let energy_left = {
        let vm = factory.create(params, ctx.spec(), ctx.depth());
        test_finalize(vm.exec(&mut ctx).ok().unwrap()).unwrap()
    };

    assert_eq!(energy_left, 79_995);
    assert_store(
        &ctx,
        0,
        "0000000000000000000000000f572e5295c57f15886f9b263e2f6d2d6c7b5ec6",
    );
}

evm_test! {test_origin: test_origin_int}
fn test_origin(factory: super::Factory) {
    let address =
        Address::from_str("0f572e5295c57f15886f9b263e2f6d2d6c7b5ec6").unwrap();
    let origin =
        Address::from_str("cd1722f2947def4cf144679da39c4c32bdc35681").unwrap();
    let code = "32600055".from_hex().unwrap();

    let mut params = ActionParams::default();
    params.address = address;
    params.origin = origin;
    params.energy = 100_000;
    params.code = Some(Arc::new(code));
    let mut context = MockContext::new();

    let energy_left = {
        let vm = factory.create(params, context.spec(), context.depth());
        test_finalize(vm.exec(&mut context).ok().unwrap()).unwrap()
    };

    assert_eq!(energy_left, 79_995);
    assert_store(
        &context,
        0,
        "000000000000000000000000cd1722f2947def4cf144679da39c4c32bdc35681",
    );
}

evm_test! {test_selfbalance: test_selfbalance_int}
fn test_selfbalance(factory: super::Factory) {
    let own_addr =
        Address::from_str("1337000000000000000000000000000000000000").unwrap();
    // 47       SELFBALANCE
    // 60 ff    PUSH ff
    // 55       SSTORE
    let code = "4760ff55".from_hex().unwrap();

    let mut params = ActionParams::default();
    params.address = own_addr.clone();
    params.energy = 100_000;
    params.code = Some(Arc::new(code));
    let mut ctx = MockContext::new();

    ctx.balances = {
        let mut x = HashMap::new();
        x.insert(own_addr, U256::from(1_025)); // 0x401
        x
    };
    let energy_left = {
        let vm = factory.create(params, ctx.spec(), ctx.depth());
        test_finalize(vm.exec(&mut ctx).ok().unwrap()).unwrap()
    };
    assert_eq!(energy_left, 79_992);
    assert_store(
        &ctx,
        0xff,
        "0000000000000000000000000000000000000000000000000000000000000401",
    );
}

evm_test! {test_selfbalance_before_istanbul: test_selfbalance_before_istanbul_int}
fn test_selfbalance_before_istanbul(factory: super::Factory) {
    let code = "4760ff55".from_hex().unwrap();

    let mut params = ActionParams::default();
    params.energy = 100_000;
    params.code = Some(Arc::new(code));
    let mut ctx = MockContext::new();
    ctx.spec.allow_tvm_istanbul = false;

    let err = {
        let vm = factory.create(params, ctx.spec(), ctx.depth());
        test_finalize(vm.exec(&mut ctx).ok().unwrap()).unwrap_err()
    };
    assert!(matches!(err, vm::Error::BadInstruction { instruction: 0x47 }));
}

evm_test! {test_sender: test_sender_int}
fn test_sender(factory: super::Factory) {
    let address =
        Address::from_str("0f572e5295c57f15886f9b263e2f6d2d6c7b5ec6").unwrap();
    let sender =
        Address::from_str("cd1722f2947def4cf144679da39c4c32bdc35681").unwrap();
    let code = "33600055".from_hex().unwrap();

    let mut params = ActionParams::default();
    params.address = address.clone();
    params.sender = sender.clone();
    params.energy = 100_000;
    params.code = Some(Arc::new(code));
    let mut ctx = MockContext::new();

    let energy_left = {
        let vm = factory.create(params, ctx.spec(), ctx.depth());
        test_finalize(vm.exec(&mut ctx).ok().unwrap()).unwrap()
    };

    assert_eq!(energy_left, 79_995);
    assert_store(
        &ctx,
        0,
        "000000000000000000000000cd1722f2947def4cf144679da39c4c32bdc35681",
    );
}

evm_test! {test_extcodecopy: test_extcodecopy_int}
fn test_extcodecopy(factory: super::Factory) {
    // 33 - sender
    // 3b - extcodesize
    // 60 00 - push 0
    // 60 00 - push 0
    // 33 - sender
    // 3c - extcodecopy
    // 60 00 - push 0
    // 51 - load word from memory
    // 60 00 - push 0
    // 55 - sstore

    let address =
        Address::from_str("0f572e5295c57f15886f9b263e2f6d2d6c7b5ec6").unwrap();
    let sender =
        Address::from_str("cd1722f2947def4cf144679da39c4c32bdc35681").unwrap();
    let code = "333b60006000333c600051600055".from_hex().unwrap();
    let sender_code = "6005600055".from_hex().unwrap();

    let mut params = ActionParams::default();
    params.address = address.clone();
    params.sender = sender.clone();
    params.energy = 100_000;
    params.code = Some(Arc::new(code));
    let mut ctx = MockContext::new();
    ctx.codes.insert(sender, Arc::new(sender_code));

    {
        let vm = factory.create(params, ctx.spec(), ctx.depth());
        test_finalize(vm.exec(&mut ctx).ok().unwrap()).unwrap()
    };

    assert_store(
        &ctx,
        0,
        "6005600055000000000000000000000000000000000000000000000000000000",
    );
}

evm_test! {test_log_empty: test_log_empty_int}
fn test_log_empty(factory: super::Factory) {
    let address =
        Address::from_str("0f572e5295c57f15886f9b263e2f6d2d6c7b5ec6").unwrap();
    let code = "60006000a0".from_hex().unwrap();

    let mut params = ActionParams::default();
    params.address = address.clone();
    params.energy = 100_000;
    params.code = Some(Arc::new(code));
    let mut ctx = MockContext::new();

    let energy_left = {
        let vm = factory.create(params, ctx.spec(), ctx.depth());
        test_finalize(vm.exec(&mut ctx).ok().unwrap()).unwrap()
    };

    assert_eq!(energy_left, 99_619);
    assert_eq!(ctx.logs.len(), 1);
    assert_eq!(ctx.logs[0].topics.len(), 0);
    assert!(ctx.logs[0].data.is_empty());
}

evm_test! {test_log_sender: test_log_sender_int}
fn test_log_sender(factory: super::Factory) {
    // 60 ff - push ff
    // 60 00 - push 00
    // 53 - mstore
    // 33 - sender
    // 60 20 - push 20
    // 60 00 - push 0
    // a1 - log with 1 topic

    let address =
        Address::from_str("0f572e5295c57f15886f9b263e2f6d2d6c7b5ec6").unwrap();
    let sender =
        Address::from_str("cd1722f3947def4cf144679da39c4c32bdc35681").unwrap();
    let code = "60ff6000533360206000a1".from_hex().unwrap();

    let mut params = ActionParams::default();
    params.address = address.clone();
    params.sender = sender.clone();
    params.energy = 100_000;
    params.code = Some(Arc::new(code));
    let mut ctx = MockContext::new();

    let energy_left = {
        let vm = factory.create(params, ctx.spec(), ctx.depth());
        test_finalize(vm.exec(&mut ctx).ok().unwrap()).unwrap()
    };

    assert_eq!(energy_left, 98_974);
    assert_eq!(ctx.logs.len(), 1);
    assert_eq!(ctx.logs[0].topics.len(), 1);
    assert_eq!(
        ctx.logs[0].topics[0],
        H256::from_str(
            "000000000000000000000000cd1722f3947def4cf144679da39c4c32bdc35681"
        )
        .unwrap()
    );
    assert_eq!(
        ctx.logs[0].data,
        "ff00000000000000000000000000000000000000000000000000000000000000"
            .from_hex::<Vec<u8>>()
            .unwrap()
    );
}

evm_test! {test_blockhash: test_blockhash_int}
fn test_blockhash(factory: super::Factory) {
    let address =
        Address::from_str("0f572e5295c57f15886f9b263e2f6d2d6c7b5ec6").unwrap();
    let code = "600040600055".from_hex().unwrap();
    let blockhash = H256::from_str(
        "123400000000000000000000cd1722f2947def4cf144679da39c4c32bdc35681",
    )
    .unwrap();

    let mut params = ActionParams::default();
    params.address = address.clone();
    params.energy = 100_000;
    params.code = Some(Arc::new(code));
    let mut ctx = MockContext::new();
    ctx.blockhashes.insert(U256::zero(), blockhash.clone());

    let energy_left = {
        let vm = factory.create(params, ctx.spec(), ctx.depth());
        test_finalize(vm.exec(&mut ctx).ok().unwrap()).unwrap()
    };

    assert_eq!(energy_left, 79_974);
    assert_eq!(
        ctx.store.get(&H256::zero()).unwrap(),
        &U256::from_big_endian(blockhash.as_bytes())
    );
}

evm_test! {test_calldataload: test_calldataload_int}
fn test_calldataload(factory: super::Factory) {
    let address =
        Address::from_str("0f572e5295c57f15886f9b263e2f6d2d6c7b5ec6").unwrap();
    let code = "600135600055".from_hex().unwrap();
    let data =
        "0123ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff23"
            .from_hex()
            .unwrap();

    let mut params = ActionParams::default();
    params.address = address.clone();
    params.energy = 100_000;
    params.code = Some(Arc::new(code));
    params.data = Some(data);
    let mut ctx = MockContext::new();

    let energy_left = {
        let vm = factory.create(params, ctx.spec(), ctx.depth());
        test_finalize(vm.exec(&mut ctx).ok().unwrap()).unwrap()
    };

    assert_eq!(energy_left, 79_991);
    assert_store(
        &ctx,
        0,
        "23ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff23",
    );
}

evm_test! {test_comparison: test_comparison_int}
fn test_comparison(factory: super::Factory) {
    let code = "601665012365124623818181811060005511600155146002556415235412358014600355".from_hex().unwrap();

    let mut params = ActionParams::default();
    params.energy = 100_000;
    params.code = Some(Arc::new(code));
    let mut ctx = MockContext::new();

    let energy_left = {
        let vm = factory.create(params, ctx.spec(), ctx.depth());
        test_finalize(vm.exec(&mut ctx).ok().unwrap()).unwrap()
    };

    assert_store(
        &ctx,
        0,
        "0000000000000000000000000000000000000000000000000000000000000000",
    );
    assert_store(
        &ctx,
        1,
        "0000000000000000000000000000000000000000000000000000000000000001",
    );
    assert_store(
        &ctx,
        2,
        "0000000000000000000000000000000000000000000000000000000000000000",
    );
    assert_store(
        &ctx,
        3,
        "0000000000000000000000000000000000000000000000000000000000000001",
    );
    assert_eq!(energy_left, 49_952);
}

evm_test! {test_signed_comparison: test_signed_comparison_int}
fn test_signed_comparison(factory: super::Factory) {
    let code =
        "60106000036010818112600055136001556010601060000381811260025513600355"
            .from_hex()
            .unwrap();

    let mut params = ActionParams::default();
    params.energy = 100_000;
    params.code = Some(Arc::new(code));
    let mut ctx = MockContext::new();

    let energy_left = {
        let vm = factory.create(params, ctx.spec(), ctx.depth());
        test_finalize(vm.exec(&mut ctx).ok().unwrap()).unwrap()
    };

    assert_store(
        &ctx,
        0,
        "0000000000000000000000000000000000000000000000000000000000000000",
    );
    assert_store(
        &ctx,
        1,
        "0000000000000000000000000000000000000000000000000000000000000001",
    );
    assert_store(
        &ctx,
        2,
        "0000000000000000000000000000000000000000000000000000000000000001",
    );
    assert_store(
        &ctx,
        3,
        "0000000000000000000000000000000000000000000000000000000000000000",
    );
    assert_eq!(energy_left, 49_940);
}

evm_test! {test_bitops: test_bitops_int}
fn test_bitops(factory: super::Factory) {
    let code = "60ff610ff08181818116600055176001551860025560008015600355198015600455600555".from_hex().unwrap();

    let mut params = ActionParams::default();
    params.energy = 150_000;
    params.code = Some(Arc::new(code));
    let mut ctx = MockContext::new();

    let energy_left = {
        let vm = factory.create(params, ctx.spec(), ctx.depth());
        test_finalize(vm.exec(&mut ctx).ok().unwrap()).unwrap()
    };

    assert_store(
        &ctx,
        0,
        "00000000000000000000000000000000000000000000000000000000000000f0",
    );
    assert_store(
        &ctx,
        1,
        "0000000000000000000000000000000000000000000000000000000000000fff",
    );
    assert_store(
        &ctx,
        2,
        "0000000000000000000000000000000000000000000000000000000000000f0f",
    );
    assert_store(
        &ctx,
        3,
        "0000000000000000000000000000000000000000000000000000000000000001",
    );
    assert_store(
        &ctx,
        4,
        "0000000000000000000000000000000000000000000000000000000000000000",
    );
    assert_store(
        &ctx,
        5,
        "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
    );
    assert_eq!(energy_left, 44_937);
}

evm_test! {test_addmod_mulmod: test_addmod_mulmod_int}
fn test_addmod_mulmod(factory: super::Factory) {
    let code = "60ff60f060108282820860005509600155600060f0601082828208196002550919600355".from_hex().unwrap();

    let mut params = ActionParams::default();
    params.energy = 100_000;
    params.code = Some(Arc::new(code));
    let mut ctx = MockContext::new();

    let energy_left = {
        let vm = factory.create(params, ctx.spec(), ctx.depth());
        test_finalize(vm.exec(&mut ctx).ok().unwrap()).unwrap()
    };

    assert_store(
        &ctx,
        0,
        "0000000000000000000000000000000000000000000000000000000000000001",
    );
    assert_store(
        &ctx,
        1,
        "000000000000000000000000000000000000000000000000000000000000000f",
    );
    assert_store(
        &ctx,
        2,
        "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
    );
    assert_store(
        &ctx,
        3,
        "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
    );
    assert_eq!(energy_left, 19_914);
}

evm_test! {test_byte: test_byte_int}
fn test_byte(factory: super::Factory) {
    let code = "60f061ffff1a600055610fff601f1a600155".from_hex().unwrap();

    let mut params = ActionParams::default();
    params.energy = 100_000;
    params.code = Some(Arc::new(code));
    let mut ctx = MockContext::new();

    let energy_left = {
        let vm = factory.create(params, ctx.spec(), ctx.depth());
        test_finalize(vm.exec(&mut ctx).ok().unwrap()).unwrap()
    };

    assert_store(
        &ctx,
        0,
        "0000000000000000000000000000000000000000000000000000000000000000",
    );
    assert_store(
        &ctx,
        1,
        "00000000000000000000000000000000000000000000000000000000000000ff",
    );
    assert_eq!(energy_left, 74_976);
}

evm_test! {test_signextend: test_signextend_int}
fn test_signextend(factory: super::Factory) {
    let code = "610fff60020b60005560ff60200b600155".from_hex().unwrap();

    let mut params = ActionParams::default();
    params.energy = 100_000;
    params.code = Some(Arc::new(code));
    let mut ctx = MockContext::new();

    let energy_left = {
        let vm = factory.create(params, ctx.spec(), ctx.depth());
        test_finalize(vm.exec(&mut ctx).ok().unwrap()).unwrap()
    };

    assert_store(
        &ctx,
        0,
        "0000000000000000000000000000000000000000000000000000000000000fff",
    );
    assert_store(
        &ctx,
        1,
        "00000000000000000000000000000000000000000000000000000000000000ff",
    );
    assert_eq!(energy_left, 59_972);
}

#[test]
fn test_badinstruction_int() {
    let factory = Factory::new(1024 * 32);
    let code = "af".from_hex().unwrap();

    let mut params = ActionParams::default();
    params.energy = 100_000;
    params.code = Some(Arc::new(code));
    let mut ctx = MockContext::new();

    let err = {
        let vm = factory.create(params, ctx.spec(), ctx.depth());
        test_finalize(vm.exec(&mut ctx).ok().unwrap()).unwrap_err()
    };

    match err {
        vm::Error::BadInstruction { instruction: 0xaf } => (),
        _ => assert!(false, "Expected bad instruction"),
    }
}

evm_test! {test_pop: test_pop_int}
fn test_pop(factory: super::Factory) {
    let code = "60f060aa50600055".from_hex().unwrap();

    let mut params = ActionParams::default();
    params.energy = 100_000;
    params.code = Some(Arc::new(code));
    let mut ctx = MockContext::new();

    let energy_left = {
        let vm = factory.create(params, ctx.spec(), ctx.depth());
        test_finalize(vm.exec(&mut ctx).ok().unwrap()).unwrap()
    };

    assert_store(
        &ctx,
        0,
        "00000000000000000000000000000000000000000000000000000000000000f0",
    );
    assert_eq!(energy_left, 79_989);
}

evm_test! {test_extops: test_extops_int}
fn test_extops(factory: super::Factory) {
    let code =
        "5a6001555836553a600255386003553460045560016001526016590454600555"
            .from_hex()
            .unwrap();

    let mut params = ActionParams::default();
    params.energy = 150_000;
    params.value = ActionValue::Transfer(U256::from(0x99));
    params.code = Some(Arc::new(code));
    let mut ctx = MockContext::new();

    {
        let vm = factory.create(params, ctx.spec(), ctx.depth());
        test_finalize(vm.exec(&mut ctx).ok().unwrap()).unwrap()
    };

    assert_store(
        &ctx,
        0,
        "0000000000000000000000000000000000000000000000000000000000000004",
    ); // PC / CALLDATASIZE
    assert_store(
        &ctx,
        1,
        "00000000000000000000000000000000000000000000000000000000000249ee",
    ); // GAS
    assert_store(
        &ctx,
        2,
        "0000000000000000000000000000000000000000000000000000000000000000",
    ); // GASPRICE
    assert_store(
        &ctx,
        3,
        "0000000000000000000000000000000000000000000000000000000000000020",
    ); // CODESIZE
    assert_store(
        &ctx,
        4,
        "0000000000000000000000000000000000000000000000000000000000000099",
    ); // CALLVALUE
    assert_store(
        &ctx,
        5,
        "0000000000000000000000000000000000000000000000000000000000000000",
    );
}

evm_test! {test_jumps: test_jumps_int}
fn test_jumps(factory: super::Factory) {
    let code = "600160015560066000555b60016000540380806000551560245760015402600155600a565b".from_hex().unwrap();

    let mut params = ActionParams::default();
    params.energy = 300_000;
    params.code = Some(Arc::new(code));
    let mut ctx = MockContext::new();

    {
        let vm = factory.create(params, ctx.spec(), ctx.depth());
        test_finalize(vm.exec(&mut ctx).ok().unwrap()).unwrap()
    };

    assert_eq!(ctx.sstore_clears, 1);
    assert_store(
        &ctx,
        0,
        "0000000000000000000000000000000000000000000000000000000000000000",
    ); // 5!
    assert_store(
        &ctx,
        1,
        "0000000000000000000000000000000000000000000000000000000000000078",
    ); // 5!
}

evm_test! {test_bad_jump: test_bad_jump_int}
fn test_bad_jump(factory: super::Factory) {
    let code = "600456".from_hex().unwrap();

    let mut params = ActionParams::default();
    params.energy = 100_000;
    params.code = Some(Arc::new(code));
    let mut ctx = MockContext::new();

    let err = {
        let vm = factory.create(params, ctx.spec(), ctx.depth());
        test_finalize(vm.exec(&mut ctx).ok().unwrap()).unwrap_err()
    };
    assert!(matches!(
        err,
        vm::Error::BadJumpDestination { destination: 4 }
    ));
}

evm_test! {test_calls: test_calls_int}
fn test_calls(factory: super::Factory) {
    // Five zero pushes, value 0x50, target 0x998, energy 0x100, CALL.
    let code = "60006000600060006050610998610100f100".from_hex().unwrap();

    let address = Address::from_low_u64_be(0x155);
    let code_address = Address::from_low_u64_be(0x998);
    let mut params = ActionParams::default();
    params.energy = 150_000;
    params.code = Some(Arc::new(code));
    params.address = address.clone();
    let mut ctx = MockContext::new();
    ctx.balances = {
        let mut s = HashMap::new();
        s.insert(params.address.clone(), U256::from(params.energy));
        s
    };

    let energy_left = {
        let vm = factory.create(params, ctx.spec(), ctx.depth());
        test_finalize(vm.exec(&mut ctx).ok().unwrap()).unwrap()
    };

    assert_set_contains(
        &ctx.calls,
        &MockCall {
            call_type: MockCallType::Call,
            energy: 2556,
            sender_address: Some(address.clone()),
            receive_address: Some(code_address.clone()),
            value: Some(U256::from(0x50)),
            data: vec![],
            code_address: Some(code_address.clone()),
        },
    );
    // The stipend handed to the callee comes back unused.
    assert_eq!(energy_left, 118_239);
    assert_eq!(ctx.calls.len(), 1);
}

evm_test! {test_call_without_balance: test_call_without_balance_int}
fn test_call_without_balance(factory: super::Factory) {
    let code = "60006000600060006050610998610100f1600055"
        .from_hex()
        .unwrap();

    let mut params = ActionParams::default();
    params.energy = 150_000;
    params.code = Some(Arc::new(code));
    params.address = Address::from_low_u64_be(0x155);
    let mut ctx = MockContext::new();

    {
        let vm = factory.create(params, ctx.spec(), ctx.depth());
        test_finalize(vm.exec(&mut ctx).ok().unwrap()).unwrap()
    };

    assert_eq!(ctx.calls.len(), 0);
    assert_store(
        &ctx,
        0,
        "0000000000000000000000000000000000000000000000000000000000000000",
    );
}

evm_test! {test_create_in_staticcall: test_create_in_staticcall_int}
fn test_create_in_staticcall(factory: super::Factory) {
    let code = "600060006064f000".from_hex().unwrap();

    let address = Address::from_low_u64_be(0x155);
    let mut params = ActionParams::default();
    params.energy = 100_000;
    params.code = Some(Arc::new(code));
    params.address = address.clone();
    let mut ctx = MockContext::new();
    ctx.is_static = true;

    let err = {
        let vm = factory.create(params, ctx.spec(), ctx.depth());
        test_finalize(vm.exec(&mut ctx).ok().unwrap()).unwrap_err()
    };

    assert!(matches!(err, vm::Error::MutableCallInStaticContext));
    assert_eq!(ctx.calls.len(), 0);
}

evm_test! {test_sstore_in_staticcall: test_sstore_in_staticcall_int}
fn test_sstore_in_staticcall(factory: super::Factory) {
    let code = "6001600055".from_hex().unwrap();

    let mut params = ActionParams::default();
    params.energy = 100_000;
    params.code = Some(Arc::new(code));
    let mut ctx = MockContext::new();
    ctx.is_static = true;

    let err = {
        let vm = factory.create(params, ctx.spec(), ctx.depth());
        test_finalize(vm.exec(&mut ctx).ok().unwrap()).unwrap_err()
    };

    assert!(matches!(err, vm::Error::MutableCallInStaticContext));
    assert!(ctx.store.is_empty());
}

evm_test! {test_sstore_clear_records_refund: test_sstore_clear_records_refund_int}
fn test_sstore_clear_records_refund(factory: super::Factory) {
    let code = "6000600055".from_hex().unwrap();

    let mut params = ActionParams::default();
    params.energy = 100_000;
    params.code = Some(Arc::new(code));
    let mut ctx = MockContext::new();
    ctx.store.insert(H256::zero(), U256::one());

    let energy_left = {
        let vm = factory.create(params, ctx.spec(), ctx.depth());
        test_finalize(vm.exec(&mut ctx).ok().unwrap()).unwrap()
    };

    assert_eq!(energy_left, 94_994);
    assert_eq!(ctx.sstore_clears, 1);
    assert_store(
        &ctx,
        0,
        "0000000000000000000000000000000000000000000000000000000000000000",
    );
}

evm_test! {test_token_ops: test_token_ops_int}
fn test_token_ops(factory: super::Factory) {
    // d2       CALLTOKENVALUE
    // 60 00 55 SSTORE at 0
    // d3       CALLTOKENID
    // 60 01 55 SSTORE at 1
    // 30       ADDRESS
    // 62 0f4241 PUSH3 1000001
    // d1       TOKENBALANCE
    // 60 02 55 SSTORE at 2
    let code = "d2600055d360015530620f4241d1600255".from_hex().unwrap();

    let address = Address::from_low_u64_be(0x155);
    let mut params = ActionParams::default();
    params.address = address;
    params.energy = 100_000;
    params.token = Some(TokenValue {
        id: 1_000_001,
        amount: U256::from(7),
    });
    params.code = Some(Arc::new(code));
    let mut ctx = MockContext::new();
    ctx.token_balances.insert((address, 1_000_001), U256::from(42));

    let energy_left = {
        let vm = factory.create(params, ctx.spec(), ctx.depth());
        test_finalize(vm.exec(&mut ctx).ok().unwrap()).unwrap()
    };

    assert_store(
        &ctx,
        0,
        "0000000000000000000000000000000000000000000000000000000000000007",
    );
    assert_store(
        &ctx,
        1,
        "00000000000000000000000000000000000000000000000000000000000f4241",
    );
    assert_store(
        &ctx,
        2,
        "000000000000000000000000000000000000000000000000000000000000002a",
    );
    assert_eq!(energy_left, 39_962);
}

evm_test! {test_token_ops_disabled: test_token_ops_disabled_int}
fn test_token_ops_disabled(factory: super::Factory) {
    let code = "d2600055".from_hex().unwrap();

    let mut params = ActionParams::default();
    params.energy = 100_000;
    params.code = Some(Arc::new(code));
    let mut ctx = MockContext::new();
    ctx.spec.allow_tvm_transfer_trc10 = false;

    let err = {
        let vm = factory.create(params, ctx.spec(), ctx.depth());
        test_finalize(vm.exec(&mut ctx).ok().unwrap()).unwrap_err()
    };
    assert!(matches!(err, vm::Error::BadInstruction { instruction: 0xd2 }));
}

evm_test! {test_shifts: test_shifts_int}
fn test_shifts(factory: super::Factory) {
    // 1 << 1 at 0, (0 - 16) >>> 2 at 1
    let code = "600160011b600055601060000360021d600155"
        .from_hex()
        .unwrap();

    let mut params = ActionParams::default();
    params.energy = 100_000;
    params.code = Some(Arc::new(code));
    let mut ctx = MockContext::new();

    {
        let vm = factory.create(params, ctx.spec(), ctx.depth());
        test_finalize(vm.exec(&mut ctx).ok().unwrap()).unwrap()
    };

    assert_store(
        &ctx,
        0,
        "0000000000000000000000000000000000000000000000000000000000000002",
    );
    assert_store(
        &ctx,
        1,
        "fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffc",
    );
}

evm_test! {test_shifts_before_constantinople: test_shifts_before_constantinople_int}
fn test_shifts_before_constantinople(factory: super::Factory) {
    let code = "600160011b600055".from_hex().unwrap();

    let mut params = ActionParams::default();
    params.energy = 100_000;
    params.code = Some(Arc::new(code));
    let mut ctx = MockContext::new();
    ctx.spec.allow_tvm_constantinople = false;

    let err = {
        let vm = factory.create(params, ctx.spec(), ctx.depth());
        test_finalize(vm.exec(&mut ctx).ok().unwrap()).unwrap_err()
    };
    assert!(matches!(err, vm::Error::BadInstruction { instruction: 0x1b }));
}

evm_test! {test_out_of_energy: test_out_of_energy_int}
fn test_out_of_energy(factory: super::Factory) {
    let code = "600160005500".from_hex().unwrap();

    let mut params = ActionParams::default();
    params.energy = 20_005;
    params.code = Some(Arc::new(code));
    let mut ctx = MockContext::new();

    let err = {
        let vm = factory.create(params, ctx.spec(), ctx.depth());
        test_finalize(vm.exec(&mut ctx).ok().unwrap()).unwrap_err()
    };
    assert_eq!(
        err.to_string(),
        "Not enough energy for 'SSTORE' operation executing: \
         curInvokeEnergyLimit[20005], curOpEnergy[20000], usedEnergy[6]"
    );
    assert!(ctx.store.is_empty());
}

evm_test! {test_revert: test_revert_int}
fn test_revert(factory: super::Factory) {
    // Store 0xff at memory 0, then REVERT returning that byte.
    let code = "60ff60005360016000fd".from_hex().unwrap();

    let mut params = ActionParams::default();
    params.energy = 100_000;
    params.code = Some(Arc::new(code));
    let mut ctx = MockContext::new();

    let result = {
        let vm = factory.create(params, ctx.spec(), ctx.depth());
        vm.exec(&mut ctx).ok().unwrap()
    };

    match result {
        Ok(GasLeft::NeedsReturn {
            energy_left,
            data,
            apply_state,
        }) => {
            assert_eq!(energy_left, 99_982);
            assert_eq!(&*data, &[0xffu8][..]);
            assert!(!apply_state);
        }
        _ => panic!("expected a revert"),
    }
}

evm_test! {test_returndatacopy_out_of_bounds: test_returndatacopy_out_of_bounds_int}
fn test_returndatacopy_out_of_bounds(factory: super::Factory) {
    let code = "6001600060003e".from_hex().unwrap();

    let mut params = ActionParams::default();
    params.energy = 100_000;
    params.code = Some(Arc::new(code));
    let mut ctx = MockContext::new();

    let err = {
        let vm = factory.create(params, ctx.spec(), ctx.depth());
        test_finalize(vm.exec(&mut ctx).ok().unwrap()).unwrap_err()
    };
    assert!(matches!(err, vm::Error::OutOfBounds));
}

evm_test! {test_memory_limit: test_memory_limit_int}
fn test_memory_limit(factory: super::Factory) {
    let code = "63ffffffff51".from_hex().unwrap();

    let mut params = ActionParams::default();
    params.energy = u64::MAX;
    params.code = Some(Arc::new(code));
    let mut ctx = MockContext::new();

    let err = {
        let vm = factory.create(params, ctx.spec(), ctx.depth());
        test_finalize(vm.exec(&mut ctx).ok().unwrap()).unwrap_err()
    };
    assert!(matches!(err, vm::Error::OutOfMemory { .. }));
}

evm_test! {test_stack_underflow: test_stack_underflow_int}
fn test_stack_underflow(factory: super::Factory) {
    let code = "01".from_hex().unwrap();

    let mut params = ActionParams::default();
    params.energy = 100_000;
    params.code = Some(Arc::new(code));
    let mut ctx = MockContext::new();

    let err = {
        let vm = factory.create(params, ctx.spec(), ctx.depth());
        test_finalize(vm.exec(&mut ctx).ok().unwrap()).unwrap_err()
    };
    assert!(matches!(
        err,
        vm::Error::StackUnderflow {
            instruction: "ADD",
            wanted: 2,
            on_stack: 0
        }
    ));
}

fn assert_set_contains<T: Debug + Eq + PartialEq + Hash>(
    set: &HashSet<T>, val: &T,
) {
    let contains = set.contains(val);
    if !contains {
        println!("Set: {:?}", set);
        println!("Elem: {:?}", val);
    }
    assert!(contains, "Element not found in HashSet");
}

fn assert_store(ctx: &MockContext, pos: u64, val: &str) {
    assert_eq!(
        ctx.store.get(&H256::from_low_u64_be(pos)).unwrap(),
        &U256::from_str(val).unwrap()
    );
}
