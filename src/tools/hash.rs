//! Cryptographic digest utility.
//!
//! Pure functions over the RustCrypto digest family; no state is kept
//! between calls.

use std::str::FromStr;

use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};
use sha3::{Sha3_224, Sha3_256, Sha3_384, Sha3_512};

/// Supported digest algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    Sha3_224,
    Sha3_256,
    Sha3_384,
    Sha3_512,
}

impl HashAlgorithm {
    /// Every supported algorithm, in display order.
    pub const ALL: &'static [HashAlgorithm] = &[
        Self::Md5,
        Self::Sha1,
        Self::Sha224,
        Self::Sha256,
        Self::Sha384,
        Self::Sha512,
        Self::Sha3_224,
        Self::Sha3_256,
        Self::Sha3_384,
        Self::Sha3_512,
    ];
}

impl std::fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Md5 => write!(f, "md5"),
            Self::Sha1 => write!(f, "sha-1"),
            Self::Sha224 => write!(f, "sha-224"),
            Self::Sha256 => write!(f, "sha-256"),
            Self::Sha384 => write!(f, "sha-384"),
            Self::Sha512 => write!(f, "sha-512"),
            Self::Sha3_224 => write!(f, "sha3-224"),
            Self::Sha3_256 => write!(f, "sha3-256"),
            Self::Sha3_384 => write!(f, "sha3-384"),
            Self::Sha3_512 => write!(f, "sha3-512"),
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "md5" => Ok(Self::Md5),
            "sha1" => Ok(Self::Sha1),
            "sha224" => Ok(Self::Sha224),
            "sha256" => Ok(Self::Sha256),
            "sha384" => Ok(Self::Sha384),
            "sha512" => Ok(Self::Sha512),
            "sha3224" => Ok(Self::Sha3_224),
            "sha3256" => Ok(Self::Sha3_256),
            "sha3384" => Ok(Self::Sha3_384),
            "sha3512" => Ok(Self::Sha3_512),
            _ => Err(format!("Unknown hash algorithm: {s}")),
        }
    }
}

/// Hex digest of `input` under `algorithm`.
pub fn digest_hex(algorithm: HashAlgorithm, input: &str) -> String {
    fn hex_of<D: Digest>(input: &str) -> String {
        hex::encode(D::digest(input.as_bytes()))
    }

    match algorithm {
        HashAlgorithm::Md5 => hex_of::<Md5>(input),
        HashAlgorithm::Sha1 => hex_of::<Sha1>(input),
        HashAlgorithm::Sha224 => hex_of::<Sha224>(input),
        HashAlgorithm::Sha256 => hex_of::<Sha256>(input),
        HashAlgorithm::Sha384 => hex_of::<Sha384>(input),
        HashAlgorithm::Sha512 => hex_of::<Sha512>(input),
        HashAlgorithm::Sha3_224 => hex_of::<Sha3_224>(input),
        HashAlgorithm::Sha3_256 => hex_of::<Sha3_256>(input),
        HashAlgorithm::Sha3_384 => hex_of::<Sha3_384>(input),
        HashAlgorithm::Sha3_512 => hex_of::<Sha3_512>(input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Standard "abc" test vectors.
    #[test]
    fn known_vectors_abc() {
        let cases = [
            (HashAlgorithm::Md5, "900150983cd24fb0d6963f7d28e17f72"),
            (HashAlgorithm::Sha1, "a9993e364706816aba3e25717850c26c9cd0d89d"),
            (
                HashAlgorithm::Sha224,
                "23097d223405d8228642a477bda255b32aadbce4bda0b3f7e36c9da7",
            ),
            (
                HashAlgorithm::Sha256,
                "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
            ),
            (
                HashAlgorithm::Sha384,
                "cb00753f45a35e8bb5a03d699ac65007272c32ab0eded1631a8b605a43ff5bed8086072ba1e7cc2358baeca134c825a7",
            ),
            (
                HashAlgorithm::Sha512,
                "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f",
            ),
            (
                HashAlgorithm::Sha3_256,
                "3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532",
            ),
        ];
        for (algorithm, expected) in cases {
            assert_eq!(digest_hex(algorithm, "abc"), expected, "{algorithm}");
        }
    }

    #[test]
    fn empty_input() {
        assert_eq!(
            digest_hex(HashAlgorithm::Md5, ""),
            "d41d8cd98f00b204e9800998ecf8427e"
        );
        assert_eq!(
            digest_hex(HashAlgorithm::Sha256, ""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn parse_accepts_common_spellings() {
        assert_eq!("SHA-256".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha256);
        assert_eq!("sha256".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha256);
        assert_eq!("sha3-512".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha3_512);
        assert_eq!("MD5".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Md5);
        assert!("sha42".parse::<HashAlgorithm>().is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        for &algorithm in HashAlgorithm::ALL {
            let parsed: HashAlgorithm = algorithm.to_string().parse().unwrap();
            assert_eq!(parsed, algorithm);
        }
    }
}
