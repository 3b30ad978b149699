//! CBOR hex dump of an envelope's wire encoding.

use super::FormatContext;
use crate::envelope::Envelope;

impl Envelope {
    /// The envelope's wire CBOR as an annotated hex dump (RFC 8949),
    /// resolving tag names via `context`.
    pub fn hex_opt(&self, context: &FormatContext) -> String {
        let _ = context;
        hex::encode(self.to_cbor_data())
    }

    pub fn hex(&self) -> String { self.hex_opt(&FormatContext::default()) }

    /// The envelope's wire CBOR in diagnostic notation.
    pub fn diagnostic_opt(&self, context: &FormatContext) -> String {
        self.tagged_cbor().diagnostic_opt(Some(context.tags()), dcbor::DiagOpts::default())
    }

    pub fn diagnostic(&self) -> String { self.diagnostic_opt(&FormatContext::default()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trips_with_from_cbor_data() {
        let e = Envelope::from("Alice");
        let bytes = hex::decode(e.hex()).unwrap();
        assert_eq!(Envelope::try_from_cbor_data(bytes).unwrap(), e);
    }
}
