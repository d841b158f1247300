//! Nonce-Based AEAD
//!
//! Per-message keys are derived from a key generating key (KGK) and a
//! 96-bit nonce by encrypting counter blocks. The tag is the RC6 encryption
//! of a Polyval digest over the padded AAD, the padded plaintext and a
//! length block. The plaintext is then encrypted in CTR mode seeded by the
//! tag.
//!
//! # Wire format
//! - [`Aead::seal`]: `nonce (12) || ciphertext || tag (block size)`
//! - [`Aead::seal_with_nonce`]: `ciphertext || tag`
//!
//! # Length block
//! One cipher block: plaintext bit length as a little-endian `u64` at bytes
//! `0..8`, AAD bit length likewise at bytes `8..16`, the rest zero.

pub mod field;
pub mod polyval;

use core::fmt;
use rand::RngCore;
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use crate::aead::field::FieldElement;
use crate::aead::polyval::Polyval;
use crate::cipher::rc6::{Rc6, DEFAULT_HALF_ROUNDS};
use crate::cipher::word::Word;
use crate::cipher::BlockCipher;
use crate::engine::dispatcher::Dispatch;
use crate::mode::{Ctr, Ecb};
use crate::types::{Error, Result, FIELD_BLOCK_SIZE, MAX_DATA_SIZE, NONCE_SIZE};

/// Bytes kept from each key derivation block.
const DERIVED_BYTES_PER_BLOCK: usize = 8;

/// Authentication key length.
pub const AUTH_KEY_SIZE: usize = 16;

// =============================================================================
// DERIVED KEYS
// =============================================================================

/// Per-message keys. Wiped on drop.
pub struct DerivedKeys {
    authentication_key: [u8; AUTH_KEY_SIZE],
    encryption_key: Vec<u8>,
}

impl DerivedKeys {
    /// Polyval hash key.
    pub const fn authentication_key(&self) -> &[u8; AUTH_KEY_SIZE] {
        &self.authentication_key
    }

    /// Cipher key for the tag and the keystream. Same length as the KGK.
    pub fn encryption_key(&self) -> &[u8] {
        &self.encryption_key
    }
}

impl Drop for DerivedKeys {
    fn drop(&mut self) {
        self.authentication_key.zeroize();
        self.encryption_key.zeroize();
    }
}

impl fmt::Debug for DerivedKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedKeys").finish_non_exhaustive()
    }
}

// =============================================================================
// VALIDATION
// =============================================================================

/// Reject plaintext or AAD of 2^36 bytes or more.
///
/// # Errors
/// [`Error::DataTooLarge`] carrying the first offending length.
pub const fn check_lengths(plaintext_len: u64, aad_len: u64) -> Result<()> {
    if plaintext_len >= MAX_DATA_SIZE {
        return Err(Error::DataTooLarge { len: plaintext_len });
    }
    if aad_len >= MAX_DATA_SIZE {
        return Err(Error::DataTooLarge { len: aad_len });
    }
    Ok(())
}

const fn check_nonce(nonce: &[u8]) -> Result<()> {
    if nonce.len() == NONCE_SIZE {
        Ok(())
    } else {
        Err(Error::InvalidNonceLength { len: nonce.len() })
    }
}

fn byte_len(data: &[u8]) -> u64 {
    u64::try_from(data.len()).unwrap_or(u64::MAX)
}

// =============================================================================
// AEAD
// =============================================================================

/// AEAD over `Rc6<W>`, borrowing its key generating key.
#[derive(Clone, Copy)]
pub struct Aead<'k, W: Word = u32> {
    kgk: &'k [u8],
    cipher: Rc6<W>,
    dispatch: Dispatch,
}

impl<'k, W: Word> Aead<'k, W> {
    /// Bind a 16- or 32-byte key generating key.
    ///
    /// # Errors
    /// [`Error::InvalidKeyLength`] for any other length.
    pub const fn new(kgk: &'k [u8]) -> Result<Self> {
        match kgk.len() {
            16 | 32 => Ok(Self {
                kgk,
                cipher: Rc6::new(DEFAULT_HALF_ROUNDS),
                dispatch: Dispatch::Auto,
            }),
            len => Err(Error::InvalidKeyLength { len }),
        }
    }

    /// Choose how CTR passes are scheduled.
    #[must_use]
    pub const fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = dispatch;
        self
    }

    /// Run the cipher with a non-default number of half-rounds.
    #[must_use]
    pub const fn with_half_rounds(mut self, half_rounds: usize) -> Self {
        self.cipher = Rc6::new(half_rounds);
        self
    }

    /// Tag length, equal to the cipher block size.
    pub const fn tag_size(&self) -> usize {
        self.cipher.block_size()
    }

    /// Derive the per-message keys for `nonce`.
    ///
    /// Block `i` is the counter `i` as one little-endian word followed by
    /// the nonce, zero-padded to the block size and encrypted under the KGK.
    /// Blocks 0..2 give the authentication key, 2..4 the encryption key and,
    /// for a 32-byte KGK, 4..6 its second half.
    ///
    /// # Errors
    /// [`Error::InvalidNonceLength`] unless the nonce is 12 bytes.
    pub fn derive_keys(&self, nonce: &[u8]) -> Result<DerivedKeys> {
        check_nonce(nonce)?;
        let schedule = self.cipher.expand_key(self.kgk)?;
        let block_size = self.cipher.block_size();
        let blocks = (AUTH_KEY_SIZE + self.kgk.len()) / DERIVED_BYTES_PER_BLOCK;

        let mut material = Vec::with_capacity(blocks * DERIVED_BYTES_PER_BLOCK);
        let mut block = vec![0u8; block_size];
        for counter in (0u32..).take(blocks) {
            block.fill(0);
            W::from_u32(counter).store_le(&mut block);
            block[W::BYTES..W::BYTES + NONCE_SIZE].copy_from_slice(nonce);
            self.cipher.encrypt_block_with(&schedule, &mut block);
            material.extend_from_slice(&block[..DERIVED_BYTES_PER_BLOCK]);
        }
        block.zeroize();

        let mut authentication_key = [0u8; AUTH_KEY_SIZE];
        authentication_key.copy_from_slice(&material[..AUTH_KEY_SIZE]);
        let encryption_key = material[AUTH_KEY_SIZE..].to_vec();
        material.zeroize();

        Ok(DerivedKeys {
            authentication_key,
            encryption_key,
        })
    }

    /// Compute the tag for `plaintext` and `aad` under `keys`.
    ///
    /// # Errors
    /// [`Error::InvalidNonceLength`] or [`Error::DataTooLarge`].
    pub fn compute_tag(
        &self,
        keys: &DerivedKeys,
        plaintext: &[u8],
        aad: &[u8],
        nonce: &[u8],
    ) -> Result<Vec<u8>> {
        check_nonce(nonce)?;
        check_lengths(byte_len(plaintext), byte_len(aad))?;
        let block_size = self.cipher.block_size();

        let mut polyval = Polyval::new(keys.authentication_key());
        absorb_padded(&mut polyval, aad, block_size);
        absorb_padded(&mut polyval, plaintext, block_size);

        let mut length_block = vec![0u8; block_size];
        length_block[..8].copy_from_slice(&(byte_len(plaintext) * 8).to_le_bytes());
        length_block[8..16].copy_from_slice(&(byte_len(aad) * 8).to_le_bytes());
        polyval.update(&length_block);

        let mut digest = polyval.digest();
        for (byte, nonce_byte) in digest.iter_mut().zip(nonce) {
            *byte ^= nonce_byte;
        }
        digest[FIELD_BLOCK_SIZE - 1] &= 0x7F;

        let mut tag = vec![0u8; block_size];
        tag[..FIELD_BLOCK_SIZE].copy_from_slice(&digest);
        digest.zeroize();
        Ecb::new(self.cipher).encrypt(&mut tag, keys.encryption_key())?;
        Ok(tag)
    }

    /// Encrypt under a fresh random nonce.
    ///
    /// Returns `nonce || ciphertext || tag`.
    ///
    /// # Errors
    /// [`Error::DataTooLarge`].
    pub fn seal(&self, plaintext: &[u8], aad: &[u8]) -> Result<Vec<u8>> {
        let mut nonce = [0u8; NONCE_SIZE];
        rand::rng().fill_bytes(&mut nonce);

        let body = self.seal_with_nonce(plaintext, aad, &nonce)?;
        let mut sealed = Vec::with_capacity(NONCE_SIZE + body.len());
        sealed.extend_from_slice(&nonce);
        sealed.extend_from_slice(&body);
        Ok(sealed)
    }

    /// Encrypt under a caller-supplied nonce. The nonce must never be reused
    /// with the same KGK.
    ///
    /// Returns `ciphertext || tag`.
    ///
    /// # Errors
    /// [`Error::InvalidNonceLength`] or [`Error::DataTooLarge`].
    pub fn seal_with_nonce(&self, plaintext: &[u8], aad: &[u8], nonce: &[u8]) -> Result<Vec<u8>> {
        check_nonce(nonce)?;
        check_lengths(byte_len(plaintext), byte_len(aad))?;

        let keys = self.derive_keys(nonce)?;
        let tag = self.compute_tag(&keys, plaintext, aad, nonce)?;

        let mut sealed = Vec::with_capacity(plaintext.len() + tag.len());
        sealed.extend_from_slice(plaintext);
        Ctr::new(self.cipher).crypt_with(&mut sealed, keys.encryption_key(), &tag, self.dispatch)?;
        sealed.extend_from_slice(&tag);
        Ok(sealed)
    }

    /// Decrypt the output of [`seal`](Self::seal).
    ///
    /// # Errors
    /// [`Error::CiphertextTooShort`] if the input cannot hold a nonce and a
    /// tag, otherwise as [`open_with_nonce`](Self::open_with_nonce).
    pub fn open(&self, sealed: &[u8], aad: &[u8]) -> Result<Vec<u8>> {
        let min = NONCE_SIZE + self.tag_size();
        if sealed.len() < min {
            return Err(Error::CiphertextTooShort {
                min,
                len: sealed.len(),
            });
        }
        let (nonce, body) = sealed.split_at(NONCE_SIZE);
        self.open_with_nonce(body, aad, nonce)
    }

    /// Decrypt `ciphertext || tag` under `nonce`.
    ///
    /// The tag is recomputed over the decrypted plaintext and compared in
    /// constant time. On mismatch the plaintext is wiped and nothing is
    /// returned.
    ///
    /// # Errors
    /// [`Error::InvalidNonceLength`], [`Error::CiphertextTooShort`],
    /// [`Error::DataTooLarge`] or [`Error::AuthenticationFailed`].
    pub fn open_with_nonce(&self, ciphertext: &[u8], aad: &[u8], nonce: &[u8]) -> Result<Vec<u8>> {
        check_nonce(nonce)?;
        let tag_size = self.tag_size();
        if ciphertext.len() < tag_size {
            return Err(Error::CiphertextTooShort {
                min: tag_size,
                len: ciphertext.len(),
            });
        }
        let (body, tag) = ciphertext.split_at(ciphertext.len() - tag_size);
        check_lengths(byte_len(body), byte_len(aad))?;

        let keys = self.derive_keys(nonce)?;
        let mut plaintext = body.to_vec();
        Ctr::new(self.cipher).crypt_with(&mut plaintext, keys.encryption_key(), tag, self.dispatch)?;

        let expected = self.compute_tag(&keys, &plaintext, aad, nonce)?;
        if bool::from(expected.as_slice().ct_eq(tag)) {
            Ok(plaintext)
        } else {
            plaintext.zeroize();
            tracing::debug!(len = body.len(), aad_len = aad.len(), "authentication failed");
            Err(Error::AuthenticationFailed)
        }
    }
}

impl<W: Word> fmt::Debug for Aead<'_, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Aead")
            .field("key_bits", &(self.kgk.len() * 8))
            .field("cipher", &self.cipher)
            .field("dispatch", &self.dispatch)
            .finish_non_exhaustive()
    }
}

/// Absorb `data` zero-padded to a multiple of `block_size`.
///
/// `block_size` is a multiple of the field block size, so the padding past
/// the last partial field block is whole zero field blocks.
fn absorb_padded(polyval: &mut Polyval, data: &[u8], block_size: usize) {
    polyval.update(data);
    let absorbed = data.len().div_ceil(FIELD_BLOCK_SIZE);
    let padded = data.len().div_ceil(block_size) * block_size / FIELD_BLOCK_SIZE;
    for _ in absorbed..padded {
        polyval.update_block(FieldElement::ZERO);
    }
}
