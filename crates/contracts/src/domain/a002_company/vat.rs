//! French intra-community VAT number derived from a SIREN

/// Checksum key: `(12 + 3 * (siren mod 97)) mod 97`.
/// Returns `None` when the SIREN is not a plain decimal number.
pub fn vat_key(siren: &str) -> Option<u8> {
    let siren = siren.trim();
    if siren.is_empty() || !siren.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: u64 = siren.parse().ok()?;
    let key = (12 + 3 * (value % 97)) % 97;
    u8::try_from(key).ok()
}

/// `FR` + two-digit key + SIREN, e.g. `FR44732829320`
pub fn french_vat_number(siren: &str) -> Option<String> {
    let key = vat_key(siren)?;
    Some(format!("FR{:02}{}", key, siren.trim()))
}
