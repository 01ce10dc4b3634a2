//! Runtime call encoding.

use super::{encode_compact_u128, ExtrinsicFormat};

/// `MultiAddress::Id` discriminant used by V4 call arguments
pub(super) const MULTI_ADDRESS_ID: u8 = 0x00;

/// A runtime call: module index, call index, and pre-encoded arguments.
///
/// Argument bytes are SCALE-encoded by the specific call type; this type
/// only fixes the `[module][call][args]` framing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    /// Pallet index in the runtime
    pub module_index: u8,
    /// Call index within the pallet
    pub call_index: u8,
    /// SCALE-encoded call arguments
    pub args: Vec<u8>,
}

impl Call {
    /// Build a call from its indices and encoded arguments
    #[must_use]
    pub const fn new(module_index: u8, call_index: u8, args: Vec<u8>) -> Self {
        Self {
            module_index,
            call_index,
            args,
        }
    }

    /// Encode as `[module_index][call_index][args]`
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(2 + self.args.len());
        out.push(self.module_index);
        out.push(self.call_index);
        out.extend_from_slice(&self.args);
        out
    }

    /// A balance-transfer call.
    ///
    /// V4 runtimes take a `MultiAddress` destination (enum discriminant +
    /// account id); V27 runtimes take the raw account id. The amount is
    /// compact-encoded in both.
    #[must_use]
    pub fn transfer(
        format: ExtrinsicFormat,
        module_index: u8,
        call_index: u8,
        dest: &[u8; 32],
        amount: u128,
    ) -> Self {
        let mut args = Vec::with_capacity(34 + 17);
        if format == ExtrinsicFormat::V4 {
            args.push(MULTI_ADDRESS_ID);
        }
        args.extend_from_slice(dest);
        encode_compact_u128(amount, &mut args);
        Self::new(module_index, call_index, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_framing() {
        let call = Call::new(0x06, 0x02, vec![0xaa, 0xbb]);
        assert_eq!(call.encode(), vec![0x06, 0x02, 0xaa, 0xbb]);
    }

    #[test]
    fn test_encode_empty_args() {
        let call = Call::new(0x01, 0x00, Vec::new());
        assert_eq!(call.encode(), vec![0x01, 0x00]);
    }

    #[test]
    fn test_transfer_v4_has_address_discriminant() {
        let dest = [0x11u8; 32];
        let call = Call::transfer(ExtrinsicFormat::V4, 4, 0, &dest, 63);

        let encoded = call.encode();
        assert_eq!(encoded[0], 4);
        assert_eq!(encoded[1], 0);
        assert_eq!(encoded[2], MULTI_ADDRESS_ID);
        assert_eq!(&encoded[3..35], &dest);
        assert_eq!(&encoded[35..], &[63 << 2]);
    }

    #[test]
    fn test_transfer_v27_is_raw_account() {
        let dest = [0x11u8; 32];
        let call = Call::transfer(ExtrinsicFormat::V27, 4, 0, &dest, 63);

        let encoded = call.encode();
        assert_eq!(&encoded[2..34], &dest);
        assert_eq!(&encoded[34..], &[63 << 2]);
        // One byte shorter than the V4 form: no address enum.
        assert_eq!(
            encoded.len() + 1,
            Call::transfer(ExtrinsicFormat::V4, 4, 0, &dest, 63)
                .encode()
                .len()
        );
    }
}
