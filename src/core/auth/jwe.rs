//! Outer encryption layer of access tokens
//!
//! Access tokens arrive as compact JWE (`ECDH-ES+A256KW` key agreement,
//! `A256GCM` content encryption). The plaintext is the signed JWT handled by
//! [`super::jwt`]. Only decryption is supported; tokens are minted by the API.

use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes256Gcm, Nonce};
use aes_kw::KekAes256;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use p256::{EncodedPoint, FieldBytes, PublicKey, SecretKey};
use serde::{Deserialize, Serialize};

use super::jwt::TokenError;

/// Expected `typ` of the protected header
pub const EXPECTED_TYP: &str = "JWE";
/// Expected key management algorithm
pub const EXPECTED_ALG: &str = "ECDH-ES+A256KW";
/// Expected content encryption algorithm
pub const EXPECTED_ENC: &str = "A256GCM";
/// Expected ephemeral key type
pub const EXPECTED_KTY: &str = "EC";
/// Expected ephemeral key curve
pub const EXPECTED_CRV: &str = "P-256";

const KEK_LEN: usize = 32;
const CEK_LEN: usize = 32;
const WRAPPED_CEK_LEN: usize = CEK_LEN + 8;
const IV_LEN: usize = 12;
const TAG_LEN: usize = 16;
const COORDINATE_LEN: usize = 32;

/// Ephemeral public key carried in the protected header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EphemeralKey {
    pub kty: String,
    pub crv: String,
    pub x: String,
    pub y: String,
}

impl EphemeralKey {
    /// Decode the affine coordinates into a P-256 point.
    ///
    /// Only the coordinates are interpreted here; `kty`/`crv` are checked by
    /// [`EncryptionHeader::is_expected`] once decryption has succeeded.
    pub fn to_public_key(&self) -> Result<PublicKey, TokenError> {
        let x = decode_coordinate(&self.x, "epk.x")?;
        let y = decode_coordinate(&self.y, "epk.y")?;

        let point =
            EncodedPoint::from_affine_coordinates(&FieldBytes::from(x), &FieldBytes::from(y), false);

        PublicKey::from_sec1_bytes(point.as_bytes())
            .map_err(|_| TokenError::Malformed("epk is not a curve point"))
    }
}

/// Protected header of the outer JWE
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptionHeader {
    #[serde(default)]
    pub typ: Option<String>,
    pub alg: String,
    pub enc: String,
    pub epk: EphemeralKey,
    /// Agreement PartyUInfo (base64url)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apu: Option<String>,
    /// Agreement PartyVInfo (base64url)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apv: Option<String>,
}

impl EncryptionHeader {
    /// Check the header against the only accepted algorithm suite.
    pub fn is_expected(&self) -> bool {
        self.typ.as_deref() == Some(EXPECTED_TYP)
            && self.alg == EXPECTED_ALG
            && self.enc == EXPECTED_ENC
            && self.epk.kty == EXPECTED_KTY
            && self.epk.crv == EXPECTED_CRV
    }
}

/// Result of a successful decryption
#[derive(Debug)]
pub struct Decrypted {
    pub header: EncryptionHeader,
    pub plaintext: Vec<u8>,
}

/// Decrypts compact JWE tokens addressed to a static P-256 key
#[derive(Clone)]
pub struct JweDecrypter {
    key: SecretKey,
}

impl JweDecrypter {
    /// Create a decrypter from a P-256 secret key
    pub fn new(key: SecretKey) -> Self {
        Self { key }
    }

    /// Load the private key from an EC JSON Web Key (`kty=EC`, `crv=P-256`, with `d`)
    pub fn from_jwk(jwk: &str) -> Result<Self, TokenError> {
        let key = SecretKey::from_jwk_str(jwk).map_err(|_| TokenError::InvalidKey("decryption"))?;
        Ok(Self::new(key))
    }

    /// Public half of the decryption key
    pub fn public_key(&self) -> PublicKey {
        self.key.public_key()
    }

    /// Decrypt a compact JWE.
    ///
    /// Header contents are returned untrusted: the caller decides whether the
    /// algorithm suite is acceptable before using the plaintext.
    pub fn decrypt(&self, token: &str) -> Result<Decrypted, TokenError> {
        let mut segments = token.split('.');
        let (Some(protected), Some(encrypted_key), Some(iv), Some(ciphertext), Some(tag), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(TokenError::Malformed("expected five segments"));
        };

        let header: EncryptionHeader =
            serde_json::from_slice(&decode_segment(protected, "protected header")?)
                .map_err(|_| TokenError::Malformed("protected header"))?;

        let ephemeral = header.epk.to_public_key()?;
        let shared = p256::ecdh::diffie_hellman(self.key.to_nonzero_scalar(), ephemeral.as_affine());
        let kek = derive_kek(shared.raw_secret_bytes(), &header)?;

        let encrypted_key = decode_segment(encrypted_key, "encrypted key")?;
        if encrypted_key.len() != WRAPPED_CEK_LEN {
            return Err(TokenError::Decryption("wrapped key length"));
        }

        let mut cek = [0u8; CEK_LEN];
        KekAes256::new(&kek.into())
            .unwrap(&encrypted_key, &mut cek)
            .map_err(|_| TokenError::Decryption("key unwrap"))?;

        let iv: [u8; IV_LEN] = decode_segment(iv, "iv")?
            .try_into()
            .map_err(|_| TokenError::Malformed("iv length"))?;
        let tag = decode_segment(tag, "tag")?;
        if tag.len() != TAG_LEN {
            return Err(TokenError::Malformed("tag length"));
        }

        let mut sealed = decode_segment(ciphertext, "ciphertext")?;
        sealed.extend_from_slice(&tag);

        let cipher =
            Aes256Gcm::new_from_slice(&cek).map_err(|_| TokenError::Decryption("content key"))?;
        let plaintext = cipher
            .decrypt(
                &Nonce::from(iv),
                Payload {
                    msg: &sealed,
                    aad: protected.as_bytes(),
                },
            )
            .map_err(|_| TokenError::Decryption("content"))?;

        Ok(Decrypted { header, plaintext })
    }
}

/// Concat KDF (NIST SP 800-56A) as profiled by RFC 7518 §4.6.2.
///
/// The algorithm ID is always [`EXPECTED_ALG`]; this decrypter implements no
/// other key management mode.
fn derive_kek(shared_secret: &[u8], header: &EncryptionHeader) -> Result<[u8; KEK_LEN], TokenError> {
    let apu = match header.apu.as_deref() {
        Some(value) => decode_segment(value, "apu")?,
        None => Vec::new(),
    };
    let apv = match header.apv.as_deref() {
        Some(value) => decode_segment(value, "apv")?,
        None => Vec::new(),
    };

    let mut kek = [0u8; KEK_LEN];
    concat_kdf::derive_key_into::<sha2::Sha256>(
        shared_secret,
        &kdf_other_info(EXPECTED_ALG, &apu, &apv),
        &mut kek,
    )
    .map_err(|_| TokenError::Decryption("key derivation"))?;

    Ok(kek)
}

pub(crate) fn kdf_other_info(alg: &str, apu: &[u8], apv: &[u8]) -> Vec<u8> {
    let mut info = Vec::with_capacity(alg.len() + apu.len() + apv.len() + 16);
    for field in [alg.as_bytes(), apu, apv] {
        info.extend_from_slice(&(field.len() as u32).to_be_bytes());
        info.extend_from_slice(field);
    }
    info.extend_from_slice(&((KEK_LEN * 8) as u32).to_be_bytes());
    info
}

fn decode_coordinate(segment: &str, what: &'static str) -> Result<[u8; COORDINATE_LEN], TokenError> {
    decode_segment(segment, what)?
        .try_into()
        .map_err(|_| TokenError::Malformed("epk coordinate length"))
}

fn decode_segment(segment: &str, what: &'static str) -> Result<Vec<u8>, TokenError> {
    URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| TokenError::Malformed(what))
}
