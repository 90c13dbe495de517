pub struct SignatureService;

const FNV_OFFSET_BASIS: u32 = 0x811c9dc5;
const FNV_PRIME: u32 = 0x01000193;

impl SignatureService {
    /// FNV-1a 32-bit over the UTF-16 code units of the canonical string,
    /// rendered as 8 lowercase hex digits. The key is part of the signing
    /// interface but is not folded into the hash: the result is an unkeyed
    /// integrity checksum, not a MAC.
    pub fn generate(canonical: &str, _key: &str) -> String {
        let mut hash = FNV_OFFSET_BASIS;
        for unit in canonical.encode_utf16() {
            hash ^= u32::from(unit);
            hash = hash.wrapping_mul(FNV_PRIME);
        }
        format!("{:08x}", hash)
    }

    /// Exact, case-sensitive comparison against the payload's `sig` field.
    pub fn verify(canonical: &str, sig: &str, key: &str) -> bool {
        Self::generate(canonical, key) == sig
    }
}
