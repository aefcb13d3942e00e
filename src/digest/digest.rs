// Copyright 2023-2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::algorithm::DigestAlgorithm;
use super::errors::Error;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;

/// Outcome of comparing a digest against another, possibly absent, digest
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DigestComparison {
    Match,
    Mismatch,
    Unknown,
}

/// An algorithm-tagged hash value.  The byte length always agrees with the
/// algorithm.  The textual form is `"<ALG> <lowercase-hex>"`, which is also
/// how digests are serialised.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, SerializeDisplay, DeserializeFromStr)]
pub struct Digest {
    algorithm: DigestAlgorithm,
    bytes: Vec<u8>,
}

impl Digest {
    pub fn new(algorithm: DigestAlgorithm, bytes: &[u8]) -> Result<Self, Error> {
        if bytes.is_empty() {
            return Err(Error::Sema(format!("{algorithm} digest: empty bytes")));
        }

        if bytes.len() != algorithm.digest_len() {
            return Err(Error::Sema(format!(
                "{algorithm} digest: expecting {} bytes, got {}",
                algorithm.digest_len(),
                bytes.len()
            )));
        }

        Ok(Self {
            algorithm,
            bytes: bytes.to_vec(),
        })
    }

    /// Build a digest from its hex-encoded value
    pub fn from_hex(algorithm: DigestAlgorithm, v: &str) -> Result<Self, Error> {
        let bytes = hex::decode(v).map_err(|e| Error::Syntax(format!("{algorithm} digest: {e}")))?;

        Self::new(algorithm, &bytes)
    }

    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }

    /// True if every byte is zero.  A zero digest is an ordinary value as far
    /// as comparison goes.
    pub fn is_zero(&self) -> bool {
        self.bytes.iter().all(|b| *b == 0)
    }

    /// Compare against another digest.  An absent digest cannot be judged,
    /// so the result is `Unknown`; otherwise both algorithm and bytes must
    /// agree for a `Match`.
    pub fn compare(&self, other: Option<&Digest>) -> DigestComparison {
        match other {
            None => DigestComparison::Unknown,
            Some(o) if self.algorithm == o.algorithm && self.bytes == o.bytes => {
                DigestComparison::Match
            }
            Some(_) => DigestComparison::Mismatch,
        }
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.algorithm, hex::encode(&self.bytes))
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl FromStr for Digest {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        let (alg, value) = s
            .split_once(' ')
            .ok_or_else(|| Error::Syntax(format!("expecting \"<ALG> <hex>\", got {s:?}")))?;

        let algorithm: DigestAlgorithm = alg.parse()?;

        Self::from_hex(algorithm, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    const SHA1_0: [u8; 20] = hex!("0123456789abcdef0123456789abcdef01234567");
    const SHA1_1: [u8; 20] = hex!("89abcdef0123456789abcdef0123456789abcdef");

    const ALL: [DigestAlgorithm; 6] = [
        DigestAlgorithm::Md2,
        DigestAlgorithm::Md5,
        DigestAlgorithm::Sha1,
        DigestAlgorithm::Sha256,
        DigestAlgorithm::Sha384,
        DigestAlgorithm::Sha512,
    ];

    fn pattern(len: usize, seed: u8) -> Vec<u8> {
        (0..len)
            .map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed))
            .collect()
    }

    #[test]
    fn string_round_trip() {
        for (i, alg) in ALL.iter().enumerate() {
            let d = Digest::new(*alg, &pattern(alg.digest_len(), i as u8)).unwrap();

            let s = d.to_string();
            assert!(s.starts_with(alg.name()));

            let back: Digest = s.parse().unwrap();
            assert_eq!(back, d);
        }
    }

    #[test]
    fn length_invariant() {
        for alg in ALL {
            let n = alg.digest_len();

            assert!(Digest::new(alg, &pattern(n + 1, 0)).is_err());
            assert!(Digest::new(alg, &pattern(n - 1, 0)).is_err());
            assert!(Digest::new(alg, &pattern(n, 0)).is_ok());
        }
    }

    #[test]
    fn empty_bytes() {
        let r = Digest::new(DigestAlgorithm::Sha256, &[]);

        assert!(matches!(r, Err(Error::Sema(_))));
    }

    #[test]
    fn three_valued_compare() {
        let d0 = Digest::new(DigestAlgorithm::Sha1, &SHA1_0).unwrap();
        let d1 = Digest::new(DigestAlgorithm::Sha1, &SHA1_1).unwrap();

        assert_eq!(d0.compare(None), DigestComparison::Unknown);
        assert_eq!(d0.compare(Some(&d0.clone())), DigestComparison::Match);
        assert_eq!(d0.compare(Some(&d1)), DigestComparison::Mismatch);
        assert_eq!(d1.compare(Some(&d0)), DigestComparison::Mismatch);
    }

    #[test]
    fn zero_digests() {
        let z0 = Digest::new(DigestAlgorithm::Sha1, &[0u8; 20]).unwrap();
        let z1 = Digest::new(DigestAlgorithm::Sha1, &[0u8; 20]).unwrap();
        let d = Digest::new(DigestAlgorithm::Sha1, &SHA1_0).unwrap();

        assert!(z0.is_zero());
        assert_eq!(z0.compare(Some(&z1)), DigestComparison::Match);
        assert_eq!(z0.compare(Some(&d)), DigestComparison::Mismatch);
    }

    #[test]
    fn same_bytes_different_algorithm() {
        let md5 = Digest::new(DigestAlgorithm::Md5, &[7u8; 16]).unwrap();
        let md2 = Digest::new(DigestAlgorithm::Md2, &[7u8; 16]).unwrap();

        assert_eq!(md5.compare(Some(&md2)), DigestComparison::Mismatch);
        assert_ne!(md5, md2);
    }

    #[test]
    fn malformed_strings() {
        assert!(matches!(
            "SHA1".parse::<Digest>(),
            Err(Error::Syntax(_))
        ));
        assert!(matches!(
            "SHA1 zz".parse::<Digest>(),
            Err(Error::Syntax(_))
        ));
        assert!(matches!(
            "SHA2 0123".parse::<Digest>(),
            Err(Error::UnknownAlgorithm(_))
        ));
        assert!(matches!(
            "SHA1 0123".parse::<Digest>(),
            Err(Error::Sema(_))
        ));
    }

    #[test]
    fn serde_as_string() {
        let d = Digest::new(DigestAlgorithm::Sha1, &SHA1_0).unwrap();

        let j = serde_json::to_string(&d).unwrap();
        assert_eq!(j, "\"SHA1 0123456789abcdef0123456789abcdef01234567\"");

        let back: Digest = serde_json::from_str(&j).unwrap();
        assert_eq!(back, d);
    }
}
