//! JSON Web Key (RFC 7517/7518) encoding for RSA-OAEP-256 keys.

use rsa::traits::{PrivateKeyParts, PublicKeyParts};
use rsa::{BigUint, RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Serialize};

use crate::core::codec;
use crate::core::constants::JWK_ALG;
use crate::error::{KeyError, Result};

/// Wire form of an RSA JWK.
///
/// No `Debug` impl: private members must never end up in logs.
#[derive(Serialize, Deserialize)]
struct Jwk {
    kty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    alg: Option<String>,
    n: String,
    e: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    d: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    p: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    q: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dq: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    qi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    key_ops: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ext: Option<bool>,
}

impl Jwk {
    fn parse(text: &str) -> Result<Self> {
        let jwk: Self = serde_json::from_str(text)
            .map_err(|e| KeyError::Import(format!("invalid JWK: {}", e)))?;

        if jwk.kty != "RSA" {
            return Err(KeyError::Import(format!("unsupported JWK kty: {}", jwk.kty)).into());
        }
        if let Some(alg) = jwk.alg.as_deref() {
            if alg != JWK_ALG {
                return Err(KeyError::Import(format!(
                    "unsupported JWK alg: {} (expected {})",
                    alg, JWK_ALG
                ))
                .into());
            }
        }

        Ok(jwk)
    }

    fn has_private_members(&self) -> bool {
        self.d.is_some() || self.p.is_some() || self.q.is_some()
    }

    fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| KeyError::ExportFailed(e.to_string()).into())
    }
}

pub(super) fn public_to_json(key: &RsaPublicKey) -> Result<String> {
    Jwk {
        kty: "RSA".to_string(),
        alg: Some(JWK_ALG.to_string()),
        n: uint_to_b64(key.n()),
        e: uint_to_b64(key.e()),
        d: None,
        p: None,
        q: None,
        dp: None,
        dq: None,
        qi: None,
        key_ops: Some(vec!["encrypt".to_string()]),
        ext: Some(true),
    }
    .to_json()
}

pub(super) fn private_to_json(key: &RsaPrivateKey) -> Result<String> {
    let [p, q] = key.primes() else {
        return Err(KeyError::ExportFailed(format!(
            "JWK export needs a two-prime key, this one has {} primes",
            key.primes().len()
        ))
        .into());
    };

    let one = BigUint::from(1u64);
    let two = BigUint::from(2u64);
    let dp = key.d() % &(p - &one);
    let dq = key.d() % &(q - &one);
    // p is prime, so q^(p-2) mod p is the CRT coefficient q^-1 mod p
    let qi = q.modpow(&(p - &two), p);

    Jwk {
        kty: "RSA".to_string(),
        alg: Some(JWK_ALG.to_string()),
        n: uint_to_b64(key.n()),
        e: uint_to_b64(key.e()),
        d: Some(uint_to_b64(key.d())),
        p: Some(uint_to_b64(p)),
        q: Some(uint_to_b64(q)),
        dp: Some(uint_to_b64(&dp)),
        dq: Some(uint_to_b64(&dq)),
        qi: Some(uint_to_b64(&qi)),
        key_ops: Some(vec!["decrypt".to_string()]),
        ext: Some(true),
    }
    .to_json()
}

pub(super) fn public_from_json(text: &str) -> Result<RsaPublicKey> {
    let jwk = Jwk::parse(text)?;
    if jwk.has_private_members() {
        return Err(KeyError::Import(
            "JWK contains private key material where a public key was expected".into(),
        )
        .into());
    }

    RsaPublicKey::new(b64_to_uint("n", &jwk.n)?, b64_to_uint("e", &jwk.e)?)
        .map_err(|e| KeyError::Import(format!("invalid RSA public key: {}", e)).into())
}

pub(super) fn private_from_json(text: &str) -> Result<RsaPrivateKey> {
    let jwk = Jwk::parse(text)?;

    let n = b64_to_uint("n", &jwk.n)?;
    let e = b64_to_uint("e", &jwk.e)?;
    let d = required(&jwk.d, "d")?;
    let p = required(&jwk.p, "p")?;
    let q = required(&jwk.q, "q")?;

    let key = RsaPrivateKey::from_components(n, e, d, vec![p, q])
        .map_err(|e| KeyError::Import(format!("invalid RSA private key: {}", e)))?;
    key.validate()
        .map_err(|e| KeyError::Import(format!("inconsistent RSA private key: {}", e)))?;

    Ok(key)
}

fn required(member: &Option<String>, name: &str) -> Result<BigUint> {
    let value = member.as_deref().ok_or_else(|| {
        KeyError::Import(format!("JWK is missing private member '{}'", name))
    })?;
    b64_to_uint(name, value)
}

fn uint_to_b64(value: &BigUint) -> String {
    codec::encode_url(&value.to_bytes_be())
}

fn b64_to_uint(name: &str, value: &str) -> Result<BigUint> {
    let bytes = codec::decode_url(value)
        .map_err(|e| KeyError::Import(format!("JWK member '{}' is not base64url: {}", name, e)))?;
    if bytes.is_empty() {
        return Err(KeyError::Import(format!("JWK member '{}' is empty", name)).into());
    }
    Ok(BigUint::from_bytes_be(&bytes))
}
