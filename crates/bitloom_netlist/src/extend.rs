//! Widening a wire to a larger bitwidth.
//!
//! Extension never shrinks. The extra high bits are copies of one
//! extension bit, made by a select net that repeats bit 0 of the extension
//! source, then placed above the original wire with a concat.

use crate::block::Block;
use crate::error::{NetlistError, NetlistResult};
use crate::ids::WireId;
use crate::literal::ConstInput;
use crate::net::Op;
use crate::wire::Signedness;
use tracing::trace;

#[derive(Debug, Clone, Copy)]
enum ExtensionBit {
    Zero,
    Msb,
}

impl Block {
    /// Extends `id` to `bitwidth` bits by its own rule: sign-extension for
    /// signed wires, zero-extension otherwise.
    pub fn extended(&mut self, id: WireId, bitwidth: u32) -> NetlistResult<WireId> {
        match self.wire(id).signedness {
            Signedness::Unsigned => self.zero_extended(id, bitwidth),
            Signedness::Signed => self.sign_extended(id, bitwidth),
        }
    }

    /// Extends `id` to `bitwidth` bits with zeros.
    pub fn zero_extended(&mut self, id: WireId, bitwidth: u32) -> NetlistResult<WireId> {
        self.extend_with_bit(id, bitwidth, ExtensionBit::Zero)
    }

    /// Extends `id` to `bitwidth` bits by replicating its most significant bit.
    pub fn sign_extended(&mut self, id: WireId, bitwidth: u32) -> NetlistResult<WireId> {
        self.extend_with_bit(id, bitwidth, ExtensionBit::Msb)
    }

    fn extend_with_bit(
        &mut self,
        id: WireId,
        bitwidth: u32,
        bit: ExtensionBit,
    ) -> NetlistResult<WireId> {
        self.check_readable(id)?;
        let width = self.width(id)?;
        if bitwidth == width {
            return Ok(id);
        }
        if bitwidth < width {
            return Err(NetlistError::ShrinkExtension {
                name: self.name(id).to_string(),
                from: width,
                to: bitwidth,
            });
        }
        let extra = bitwidth - width;
        trace!(wire = self.name(id), width, bitwidth, ?bit, "extending");

        let source = match bit {
            ExtensionBit::Zero => {
                self.add_const(&ConstInput::from(0u32), Some(1), Signedness::Unsigned)?
            }
            ExtensionBit::Msb => self.select_bits(id, &[width - 1])?,
        };
        let extension = self.temp_wire(extra);
        self.add_net(
            Op::Select,
            Some(vec![0; extra as usize]),
            vec![source],
            vec![extension],
        );
        self.concat(&[extension, id])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::wire::Role;

    #[test]
    fn same_width_is_identity() {
        let mut b = Block::new();
        let a = b.input(Some(4), Some("a")).unwrap();
        assert_eq!(b.extended(a, 4).unwrap(), a);
        assert_eq!(b.zero_extended(a, 4).unwrap(), a);
        assert_eq!(b.sign_extended(a, 4).unwrap(), a);
        assert_eq!(b.net_count(), 0);
        assert_eq!(b.wire_count(), 1);
    }

    #[test]
    fn shrink_is_rejected() {
        let mut b = Block::new();
        let a = b.input(Some(8), Some("a")).unwrap();
        for w in 1..8 {
            let err = b.extended(a, w).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Dimension);
        }
        assert_eq!(b.net_count(), 0);
    }

    #[test]
    fn zero_extension_structure() {
        let mut b = Block::new();
        let a = b.input(Some(4), Some("a")).unwrap();
        let wide = b.zero_extended(a, 8).unwrap();
        assert_eq!(b.width(wide).unwrap(), 8);

        let nets: Vec<_> = b.nets().collect();
        assert_eq!(nets.len(), 2);
        assert_eq!(nets[0].op, Op::Select);
        assert_eq!(nets[0].param, Some(vec![0, 0, 0, 0]));
        let zero = nets[0].args[0];
        assert_eq!(b.wire(zero).role, Role::Const);
        assert_eq!(b.width(zero).unwrap(), 1);
        assert_eq!(nets[1].op, Op::Concat);
        assert_eq!(nets[1].args, vec![nets[0].dest(), a]);
    }

    #[test]
    fn sign_extension_replicates_msb() {
        let mut b = Block::new();
        let a = b.signed_input(Some(4), Some("a")).unwrap();
        let wide = b.extended(a, 7).unwrap();
        assert_eq!(b.width(wide).unwrap(), 7);

        let nets: Vec<_> = b.nets().collect();
        assert_eq!(nets.len(), 3);
        assert_eq!(nets[0].op, Op::Select);
        assert_eq!(nets[0].args, vec![a]);
        assert_eq!(nets[0].param, Some(vec![3]));
        assert_eq!(nets[1].param, Some(vec![0, 0, 0]));
        assert_eq!(nets[1].args, vec![nets[0].dest()]);
        assert_eq!(nets[2].op, Op::Concat);
    }

    #[test]
    fn unsigned_default_rule_is_zero() {
        let mut b = Block::new();
        let a = b.input(Some(2), Some("a")).unwrap();
        b.extended(a, 3).unwrap();
        let first = b.nets().next().unwrap();
        assert_eq!(b.wire(first.args[0]).role, Role::Const);
    }

    #[test]
    fn pending_width_cannot_be_extended() {
        let mut b = Block::new();
        let a = b.wire_vector(None, Some("a")).unwrap();
        let err = b.extended(a, 4).unwrap_err();
        assert_eq!(err, NetlistError::UnresolvedWidth { name: "a".into() });
    }
}
