//! Token minting helpers for tests
//!
//! Keys are derived from fixed seeds so failures are reproducible.

use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes256Gcm, Nonce};
use aes_kw::KekAes256;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use ed25519_dalek::SigningKey;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use p256::SecretKey;
use p256::elliptic_curve::sec1::ToEncodedPoint;
use serde::Serialize;
use serde_json::json;

use super::jwe::{
    EXPECTED_ALG, EXPECTED_CRV, EXPECTED_ENC, EXPECTED_KTY, EXPECTED_TYP, JweDecrypter,
    kdf_other_info,
};
use super::jwt::{Claims, TokenCodec, UserClaims};

/// A valid v4 UUID used as token subject
pub const SUBJECT: &str = "5f0e4c9a-3b1d-4e8a-9c2f-7a6b5d4c3e21";

/// RFC 8410 PKCS#8 v1 prefix for a raw Ed25519 seed
const ED25519_PKCS8_PREFIX: [u8; 16] = [
    0x30, 0x2e, 0x02, 0x01, 0x00, 0x30, 0x05, 0x06, 0x03, 0x2b, 0x65, 0x70, 0x04, 0x22, 0x04, 0x20,
];

/// Header fields of the outer layer that tests may bend
#[derive(Debug, Clone)]
pub struct OuterHeader {
    pub typ: Option<String>,
    pub alg: String,
    pub enc: String,
    pub kty: String,
    pub crv: String,
}

impl Default for OuterHeader {
    fn default() -> Self {
        Self {
            typ: Some(EXPECTED_TYP.to_string()),
            alg: EXPECTED_ALG.to_string(),
            enc: EXPECTED_ENC.to_string(),
            kty: EXPECTED_KTY.to_string(),
            crv: EXPECTED_CRV.to_string(),
        }
    }
}

pub struct TestKeys {
    decryption: SecretKey,
    seed: [u8; 32],
}

impl TestKeys {
    pub fn new() -> Self {
        Self::with_seed(1)
    }

    pub fn with_seed(seed: u8) -> Self {
        Self {
            decryption: SecretKey::from_slice(&[seed; 32]).expect("valid P-256 scalar"),
            seed: [seed.wrapping_add(100); 32],
        }
    }

    pub fn decrypter(&self) -> JweDecrypter {
        JweDecrypter::new(self.decryption.clone())
    }

    pub fn decryption_jwk(&self) -> String {
        (*self.decryption.to_jwk_string()).clone()
    }

    pub fn verification_jwk(&self) -> String {
        let public = SigningKey::from_bytes(&self.seed).verifying_key().to_bytes();
        json!({
            "kty": "OKP",
            "crv": "Ed25519",
            "x": URL_SAFE_NO_PAD.encode(public),
        })
        .to_string()
    }

    pub fn codec(&self) -> TokenCodec {
        TokenCodec::from_jwks(&self.decryption_jwk(), &self.verification_jwk())
            .expect("test keys load")
    }

    /// Sign `claims` as a compact JWS with the test Ed25519 key
    pub fn sign(&self, claims: &impl Serialize, header: &Header) -> String {
        let mut der = ED25519_PKCS8_PREFIX.to_vec();
        der.extend_from_slice(&self.seed);
        encode(header, claims, &EncodingKey::from_ed_der(&der)).expect("signing succeeds")
    }

    /// Encrypt `plaintext` to the test P-256 key with the given header fields
    pub fn seal(&self, plaintext: &[u8], header: &OuterHeader) -> String {
        let ephemeral = SecretKey::from_slice(&[0x42; 32]).expect("valid P-256 scalar");
        let point = ephemeral.public_key().to_encoded_point(false);
        let x = point.x().expect("uncompressed point");
        let y = point.y().expect("uncompressed point");

        let protected = URL_SAFE_NO_PAD.encode(
            json!({
                "typ": header.typ,
                "alg": header.alg,
                "enc": header.enc,
                "epk": {
                    "kty": header.kty,
                    "crv": header.crv,
                    "x": URL_SAFE_NO_PAD.encode(x),
                    "y": URL_SAFE_NO_PAD.encode(y),
                },
            })
            .to_string(),
        );

        let shared = p256::ecdh::diffie_hellman(
            ephemeral.to_nonzero_scalar(),
            self.decryption.public_key().as_affine(),
        );
        let mut kek = [0u8; 32];
        concat_kdf::derive_key_into::<sha2::Sha256>(
            shared.raw_secret_bytes(),
            &kdf_other_info(EXPECTED_ALG, b"", b""),
            &mut kek,
        )
        .expect("kdf succeeds");

        let cek = [0x24u8; 32];
        let mut wrapped = [0u8; 40];
        KekAes256::new(&kek.into())
            .wrap(&cek, &mut wrapped)
            .expect("key wrap succeeds");

        let iv = [0x11u8; 12];
        let sealed = Aes256Gcm::new_from_slice(&cek)
            .expect("valid key")
            .encrypt(
                &Nonce::from(iv),
                Payload {
                    msg: plaintext,
                    aad: protected.as_bytes(),
                },
            )
            .expect("encryption succeeds");
        let (ciphertext, tag) = sealed.split_at(sealed.len() - 16);

        format!(
            "{protected}.{}.{}.{}.{}",
            URL_SAFE_NO_PAD.encode(wrapped),
            URL_SAFE_NO_PAD.encode(iv),
            URL_SAFE_NO_PAD.encode(ciphertext),
            URL_SAFE_NO_PAD.encode(tag),
        )
    }

    /// A well-formed access token carrying `claims`
    pub fn mint(&self, claims: &Claims) -> String {
        let inner = self.sign(claims, &Header::new(Algorithm::EdDSA));
        self.seal(inner.as_bytes(), &OuterHeader::default())
    }
}

/// Claims for `subject` valid for one hour from `issued_at`
pub fn claims_for(subject: &str, roles: &[&str], issued_at: i64) -> Claims {
    Claims {
        sub: subject.to_string(),
        user: UserClaims {
            id: subject.to_string(),
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
            email: Some("ada@example.com".to_string()),
            roles: roles.iter().map(|r| r.to_string()).collect(),
        },
        nbf: issued_at as f64,
        iat: issued_at as f64,
        exp: (issued_at + 3600) as f64,
    }
}
