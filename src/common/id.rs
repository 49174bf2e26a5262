//! Kademlia node Id or a lookup target
use rand::Rng;
use sha1_smol::Sha1;
use std::{
    cmp::Ordering,
    fmt::{self, Debug, Display, Formatter},
    str::FromStr,
};

use crate::{Error, Result};

/// The size of node IDs in bytes.
pub const ID_SIZE: usize = 20;
/// Largest value returned by [Id::distance].
pub const MAX_DISTANCE: u8 = ID_SIZE as u8 * 8;

#[derive(Clone, Copy, PartialEq, Ord, PartialOrd, Eq, Hash)]
/// Kademlia node Id or a lookup target.
///
/// Node identities and data keys live in the same 160 bit space, so the
/// same type is used for both.
pub struct Id([u8; ID_SIZE]);

impl Id {
    /// Derive an Id from a raw label, by hashing its UTF-8 bytes with SHA-1.
    ///
    /// Any string is a valid label, including the empty string.
    pub fn from_label(raw: &str) -> Id {
        let mut hasher = Sha1::new();
        hasher.update(raw.as_bytes());

        Id(hasher.digest().bytes())
    }

    /// Generate a random Id.
    pub fn random() -> Id {
        let mut rng = rand::thread_rng();
        let random_bytes: [u8; ID_SIZE] = rng.gen();

        Id(random_bytes)
    }

    /// Create a new Id from some bytes. Returns Err if `bytes` is not of length
    /// [ID_SIZE].
    pub fn from_bytes<T: AsRef<[u8]>>(bytes: T) -> Result<Id> {
        let bytes = bytes.as_ref();
        if bytes.len() != ID_SIZE {
            return Err(Error::InvalidIdSize(bytes.len()));
        }

        let mut tmp: [u8; ID_SIZE] = [0; ID_SIZE];
        tmp.copy_from_slice(bytes);

        Ok(Id(tmp))
    }

    /// Returns the raw bytes of this Id.
    pub fn as_bytes(&self) -> &[u8; ID_SIZE] {
        &self.0
    }

    /// XOR distance between this Id and a target Id.
    ///
    /// The result is itself an Id, whose (big endian) byte ordering is the
    /// numeric ordering of the 160 bit XOR value, so comparing two results
    /// with [Ord] compares distances.
    pub fn xor(&self, other: &Id) -> Id {
        let mut result = [0_u8; ID_SIZE];

        for (i, byte) in result.iter_mut().enumerate() {
            *byte = self.0[i] ^ other.0[i];
        }

        Id(result)
    }

    /// Compare `a` and `b` by their XOR distance to this Id.
    ///
    /// Ties fall back to comparing the ids themselves, which can only happen
    /// if `a == b`.
    pub fn closer(&self, a: &Id, b: &Id) -> Ordering {
        self.xor(a).cmp(&self.xor(b)).then_with(|| a.cmp(b))
    }

    /// Simplified log2 distance between this Id and a target Id.
    ///
    /// The distance is the number of trailing bits after the common prefix.
    /// Only used for diagnostics, every ordering decision uses [Id::xor].
    ///
    /// Distance to self is 0
    /// Distance to the furthest Id is 160
    /// Distance to an Id with 5 leading matching bits is 155
    pub fn distance(&self, other: &Id) -> u8 {
        for i in 0..ID_SIZE {
            let a = self.0[i];
            let b = other.0[i];

            if a != b {
                // leading zeros so far + leading zeros of this byte
                let leading_zeros = (i as u32 * 8 + (a ^ b).leading_zeros()) as u8;

                return MAX_DISTANCE - leading_zeros;
            }
        }

        0
    }
}

impl From<[u8; ID_SIZE]> for Id {
    fn from(bytes: [u8; ID_SIZE]) -> Id {
        Id(bytes)
    }
}

impl FromStr for Id {
    type Err = Error;

    fn from_str(s: &str) -> Result<Id> {
        if s.len() != ID_SIZE * 2 {
            return Err(Error::InvalidIdEncoding(s.to_string()));
        }

        let mut bytes = [0_u8; ID_SIZE];

        for (i, byte) in bytes.iter_mut().enumerate() {
            let pair = s
                .get(i * 2..i * 2 + 2)
                .ok_or_else(|| Error::InvalidIdEncoding(s.to_string()))?;

            *byte = u8::from_str_radix(pair, 16)
                .map_err(|_| Error::InvalidIdEncoding(s.to_string()))?;
        }

        Ok(Id(bytes))
    }
}

impl Display for Id {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{:02x}", byte)?;
        }

        Ok(())
    }
}

impl Debug for Id {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn from_label_is_deterministic() {
        assert_eq!(Id::from_label("node-a"), Id::from_label("node-a"));
        assert_ne!(Id::from_label("node-a"), Id::from_label("node-b"));
    }

    #[test]
    fn from_label_is_sha1() {
        assert_eq!(
            Id::from_label("hello"),
            Id::from_str("aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d").unwrap()
        );
        assert_eq!(
            Id::from_label(""),
            Id::from_str("da39a3ee5e6b4b0d3255bfef95601890afd80709").unwrap()
        );
    }

    #[test]
    fn from_bytes_wrong_size() {
        assert_eq!(Id::from_bytes([0_u8; 19]), Err(Error::InvalidIdSize(19)));
        assert!(Id::from_bytes([7_u8; 20]).is_ok());
    }

    #[test]
    fn from_str_invalid() {
        assert!(Id::from_str("abc").is_err());
        assert!(Id::from_str("zz02c1cc60ff9e1331c47331a36ddd5d994ea38a").is_err());
    }

    #[test]
    fn display_round_trips() {
        let id = Id::random();
        assert_eq!(Id::from_str(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn xor_to_self_is_zero() {
        let id = Id::random();
        assert_eq!(id.xor(&id), Id([0; ID_SIZE]));
    }

    #[test]
    fn xor_is_symmetric() {
        let a = Id::random();
        let b = Id::random();

        assert_eq!(a.xor(&b), b.xor(&a));
    }

    #[test]
    fn xor_orders_numerically() {
        let origin = Id([0; ID_SIZE]);

        let mut near = [0_u8; ID_SIZE];
        near[ID_SIZE - 1] = 0xff;
        let mut far = [0_u8; ID_SIZE];
        far[0] = 0x01;

        assert_eq!(
            origin.closer(&Id(near), &Id(far)),
            std::cmp::Ordering::Less
        );
    }

    #[test]
    fn distance_to_self() {
        let id = Id::random();
        assert_eq!(id.distance(&id), 0)
    }

    #[test]
    fn distance_to_id() {
        let id = Id([
            6, 57, 161, 226, 79, 187, 138, 178, 119, 223, 3, 52, 118, 171, 13, 225, 15, 171, 59,
            220,
        ]);
        let target = Id([
            3, 91, 26, 235, 151, 55, 173, 225, 168, 9, 51, 89, 79, 64, 93, 63, 119, 42, 160, 142,
        ]);

        assert_eq!(id.distance(&target), 155)
    }

    #[test]
    fn distance_to_furthest() {
        let id = Id::random();

        let mut opposite = [0_u8; ID_SIZE];
        for (i, &value) in id.0.iter().enumerate() {
            opposite[i] = value ^ 0xff;
        }

        assert_eq!(id.distance(&Id(opposite)), MAX_DISTANCE)
    }
}
