//! Resolved transfer recipients.

use serde::{Deserialize, Serialize};

use crate::address::Address;

/// The form a recipient string resolved into.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recipient {
    /// User-friendly base64 address.
    Friendly(Address),
    /// Raw `workchain:hex` address.
    Raw(Address),
    /// Domain name resolved through the name service.
    Domain { name: String, resolved: Address },
}

impl Recipient {
    /// The destination address, whichever form it arrived in.
    pub fn address(&self) -> &Address {
        match self {
            Recipient::Friendly(addr) | Recipient::Raw(addr) => addr,
            Recipient::Domain { resolved, .. } => resolved,
        }
    }
}

/// A recipient plus the memo requirement looked up against known accounts.
///
/// Created fresh on every successful resolution; no history is kept.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRecipient {
    pub recipient: Recipient,
    pub is_memo_required: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_accessor_covers_all_forms() {
        let addr = Address::new(0, [3u8; 32]);
        assert_eq!(Recipient::Friendly(addr.clone()).address(), &addr);
        assert_eq!(Recipient::Raw(addr.clone()).address(), &addr);
        let domain = Recipient::Domain {
            name: "alice.ton".into(),
            resolved: addr.clone(),
        };
        assert_eq!(domain.address(), &addr);
    }
}
