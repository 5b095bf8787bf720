//! Result widths of the binary and unary operators, and the values they
//! evaluate to.

use bitloom_conformance::{eval_u64, expose};
use bitloom_netlist::{BinaryOp, Block};

#[test]
fn add_and_sub_grow_by_one_bit() {
    for (wa, wb) in [(1, 1), (3, 5), (8, 2), (16, 16)] {
        let mut b = Block::new();
        let x = b.input(Some(wa), Some("x")).unwrap();
        let y = b.input(Some(wb), Some("y")).unwrap();
        let sum = b.add(x, y).unwrap();
        let diff = b.sub(x, y).unwrap();
        assert_eq!(b.width(sum).unwrap(), wa.max(wb) + 1);
        assert_eq!(b.width(diff).unwrap(), wa.max(wb) + 1);
    }
}

#[test]
fn sums_never_truncate() {
    let mut b = Block::new();
    let x = b.input(Some(4), Some("x")).unwrap();
    let y = b.input(Some(3), Some("y")).unwrap();
    let sum = b.add(x, y).unwrap();
    expose(&mut b, "sum", sum).unwrap();
    for xv in 0..16u64 {
        for yv in 0..8u64 {
            assert_eq!(eval_u64(&b, "sum", &[("x", xv), ("y", yv)]), xv + yv);
        }
    }
}

#[test]
fn multiply_doubles_equalized_width() {
    let mut b = Block::new();
    let x = b.input(Some(4), Some("x")).unwrap();
    let y = b.input(Some(4), Some("y")).unwrap();
    let p = b.mul(x, y).unwrap();
    assert_eq!(b.width(p).unwrap(), 8);

    let narrow = b.input(Some(2), Some("narrow")).unwrap();
    let q = b.mul(narrow, x).unwrap();
    assert_eq!(b.width(q).unwrap(), 8);

    expose(&mut b, "p", p).unwrap();
    assert_eq!(eval_u64(&b, "p", &[("x", 15), ("y", 15), ("narrow", 0)]), 225);
}

#[test]
fn comparisons_are_one_bit() {
    let mut b = Block::new();
    let x = b.input(Some(5), Some("x")).unwrap();
    let y = b.input(Some(3), Some("y")).unwrap();
    for op in [BinaryOp::Lt, BinaryOp::Gt, BinaryOp::Eq] {
        let r = b.logic_op(x, y, op).unwrap();
        assert_eq!(b.width(r).unwrap(), 1);
    }
}

#[test]
fn derived_comparisons_evaluate() {
    let mut b = Block::new();
    let x = b.input(Some(4), Some("x")).unwrap();
    let y = b.input(Some(4), Some("y")).unwrap();
    let le = b.le(x, y).unwrap();
    let ge = b.ge(x, y).unwrap();
    let ne = b.ne(x, y).unwrap();
    expose(&mut b, "le", le).unwrap();
    expose(&mut b, "ge", ge).unwrap();
    expose(&mut b, "ne", ne).unwrap();

    for (xv, yv) in [(3, 3), (2, 9), (9, 2)] {
        let pairs = [("x", xv), ("y", yv)];
        assert_eq!(eval_u64(&b, "le", &pairs), u64::from(xv <= yv));
        assert_eq!(eval_u64(&b, "ge", &pairs), u64::from(xv >= yv));
        assert_eq!(eval_u64(&b, "ne", &pairs), u64::from(xv != yv));
    }
}

#[test]
fn subtraction_wraps_in_result_width() {
    let mut b = Block::new();
    let x = b.input(Some(4), Some("x")).unwrap();
    let y = b.input(Some(4), Some("y")).unwrap();
    let d = b.sub(x, y).unwrap();
    expose(&mut b, "d", d).unwrap();
    assert_eq!(eval_u64(&b, "d", &[("x", 9), ("y", 4)]), 5);
    assert_eq!(eval_u64(&b, "d", &[("x", 0), ("y", 1)]), 0b11111);
}

#[test]
fn bitwise_ops_match_integer_ops() {
    let mut b = Block::new();
    let x = b.input(Some(8), Some("x")).unwrap();
    let y = b.input(Some(4), Some("y")).unwrap();
    let and = b.and(x, y).unwrap();
    let or = b.or(x, y).unwrap();
    let xor = b.xor(x, y).unwrap();
    let inv = b.invert(x).unwrap();
    assert_eq!(b.width(and).unwrap(), 8);
    expose(&mut b, "and", and).unwrap();
    expose(&mut b, "or", or).unwrap();
    expose(&mut b, "xor", xor).unwrap();
    expose(&mut b, "inv", inv).unwrap();

    let pairs = [("x", 0xA5), ("y", 0xC)];
    assert_eq!(eval_u64(&b, "and", &pairs), 0xA5 & 0xC);
    assert_eq!(eval_u64(&b, "or", &pairs), 0xA5 | 0xC);
    assert_eq!(eval_u64(&b, "xor", &pairs), 0xA5 ^ 0xC);
    assert_eq!(eval_u64(&b, "inv", &pairs), 0x5A);
}
