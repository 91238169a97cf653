//! Selecting address records by value and kind.

use crate::address::AddressType;

/// An address together with its kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AddressRecord {
    pub address: String,
    pub address_type: AddressType,
}

impl AddressRecord {
    pub fn new(address: impl Into<String>, address_type: AddressType) -> Self {
        AddressRecord {
            address: address.into(),
            address_type,
        }
    }

    fn type_matches(&self, filter_type: AddressType) -> bool {
        filter_type == AddressType::All || filter_type == self.address_type
    }
}

/// Return `address` if it passes the filter.
///
/// With `filter_text`, the address text must equal it and the kind must match
/// `filter_type`. Without it, only the kind is checked. `AddressType::All`
/// matches every kind.
pub fn match_address<'a>(
    address: Option<&'a AddressRecord>,
    filter_text: Option<&str>,
    filter_type: AddressType,
) -> Option<&'a AddressRecord> {
    let address = address?;
    let text_matches = filter_text.map_or(true, |text| address.address == text);
    (text_matches && address.type_matches(filter_type)).then_some(address)
}

/// Apply [`match_address`] to every record.
pub fn filter_addresses<'a, I>(
    addresses: I,
    filter_text: Option<&'a str>,
    filter_type: AddressType,
) -> impl Iterator<Item = &'a AddressRecord>
where
    I: IntoIterator<Item = &'a AddressRecord>,
{
    addresses
        .into_iter()
        .filter_map(move |address| match_address(Some(address), filter_text, filter_type))
}
