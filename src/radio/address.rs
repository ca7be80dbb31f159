//! ESB on-air address layout.
//!
//! Every logical pipe address is one prefix byte followed by a 4-byte base
//! address. The RADIO compares the base bytes with the most significant
//! bit of each byte first, so the register words are built bit-reversed.

/// Base address bytes compared on air (`PCNF1.BALEN`).
pub const BASE_ADDRESS_LEN: usize = 4;

/// Pipes served by one PREFIX register.
pub const PREFIXES_PER_REGISTER: usize = 4;

/// BASE0/BASE1 register word for `address`.
pub fn base_address_word(address: &[u8; BASE_ADDRESS_LEN]) -> u32 {
    u32::from_le_bytes(*address).reverse_bits()
}

/// PREFIX0/PREFIX1 register word for up to four prefixes, lowest pipe in
/// the least significant byte. Missing prefixes are zero.
pub fn prefix_word(prefixes: &[u8]) -> u32 {
    let mut bytes = [0u8; PREFIXES_PER_REGISTER];
    for (dst, src) in bytes.iter_mut().zip(prefixes) {
        *dst = src.reverse_bits();
    }
    u32::from_le_bytes(bytes)
}
