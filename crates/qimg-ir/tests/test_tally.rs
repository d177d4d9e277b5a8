//! Tests for gate tallies, lowering and circuit artifacts.

use proptest::prelude::*;
use qimg_ir::{
    Circuit, GateTally, Instruction, IrError, QubitId, StandardGate, count_gates,
    decompose_multi_qubit, load_circuit, save_circuit,
};

fn arb_instruction(n: u32) -> impl Strategy<Value = Instruction> {
    let single = (0..n, 0usize..4).prop_map(|(q, k)| {
        let gate = [StandardGate::H, StandardGate::X, StandardGate::T, StandardGate::Ry(0.3)][k]
            .clone();
        Instruction::single_qubit_gate(gate, QubitId(q))
    });
    let pair = (0..n, 1..n).prop_map(move |(a, off)| {
        Instruction::two_qubit_gate(StandardGate::CX, QubitId(a), QubitId((a + off) % n))
    });
    let triple = (0..n, 1..n, 1..n)
        .prop_filter("distinct operands", |(_, b, c)| b != c)
        .prop_map(move |(a, b, c)| {
            Instruction::gate(
                StandardGate::CCX,
                [QubitId(a), QubitId((a + b) % n), QubitId((a + c) % n)],
            )
        });
    prop_oneof![single, pair, triple]
}

fn arb_circuit() -> impl Strategy<Value = Circuit> {
    prop::collection::vec(arb_instruction(4), 0..40)
        .prop_map(|insts| Circuit::from_instructions("random", 4, insts).unwrap())
}

// ---------------------------------------------------------------------------
// Tallies
// ---------------------------------------------------------------------------

#[test]
fn empty_circuit_has_empty_tally() {
    let tally = count_gates(&Circuit::new("empty", 6)).unwrap();
    assert_eq!(tally.total(), 0);
    assert_eq!(tally.two_qubit(), 0);
}

#[test]
fn ghz_tally() {
    let tally = count_gates(&Circuit::ghz(6).unwrap()).unwrap();
    assert_eq!(tally.get(1), 1);
    assert_eq!(tally.two_qubit(), 5);
}

#[test]
fn forbidden_arity_names_the_gate() {
    let mut circuit = Circuit::new("c", 3);
    circuit.cswap(QubitId(0), QubitId(1), QubitId(2)).unwrap();
    match count_gates(&circuit) {
        Err(IrError::ForbiddenArity { gate_name, arity }) => {
            assert_eq!(gate_name, "cswap");
            assert_eq!(arity, 3);
        }
        other => panic!("expected ForbiddenArity, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Artifacts
// ---------------------------------------------------------------------------

#[test]
fn artifact_file_roundtrip_keeps_tally() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("c.json");
    let circuit = decompose_multi_qubit(&{
        let mut c = Circuit::new("c", 3);
        c.ccx(QubitId(0), QubitId(1), QubitId(2)).unwrap();
        c
    })
    .unwrap();

    save_circuit(&circuit, &path).unwrap();
    let loaded = load_circuit(&path).unwrap();
    assert_eq!(count_gates(&loaded).unwrap(), count_gates(&circuit).unwrap());
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn lowering_always_yields_countable_circuit(circuit in arb_circuit()) {
        let raw = GateTally::from_circuit(&circuit);
        let lowered = decompose_multi_qubit(&circuit).unwrap();
        let tally = count_gates(&lowered).unwrap();

        prop_assert_eq!(tally.get(3), 0);
        prop_assert_eq!(tally.two_qubit(), raw.two_qubit() + 6 * raw.get(3));
        prop_assert_eq!(lowered.num_qubits(), circuit.num_qubits());
    }

    #[test]
    fn tally_total_matches_gate_count(circuit in arb_circuit()) {
        let tally = GateTally::from_circuit(&circuit);
        prop_assert_eq!(tally.total(), circuit.gate_count());
    }
}
