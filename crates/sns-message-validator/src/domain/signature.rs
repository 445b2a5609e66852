//! # Signature Verification (SignatureVersion 1)
//!
//! Pure domain logic for checking an SNS signature against a PEM signing
//! certificate.
//!
//! ## Security Notes
//!
//! - The algorithm is fixed to RSASSA-PKCS1-v1_5 with SHA-1, the scheme SNS
//!   uses for `SignatureVersion` 1. It is never negotiated from the message.
//! - Only the certificate's SubjectPublicKeyInfo is consumed. Validity
//!   period, chain and revocation are not checked; trust comes from the
//!   host the certificate was fetched from.

use super::errors::ValidationError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use rsa::pkcs1v15;
use rsa::pkcs8::DecodePublicKey as _;
use rsa::signature::Verifier as _;
use rsa::RsaPublicKey;
use sha1::Sha1;

// =============================================================================
// SIGNING CERTIFICATE
// =============================================================================

/// A parsed signing certificate, reduced to its public key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SigningCertificate {
    spki_der: Vec<u8>,
}

impl SigningCertificate {
    /// Parse the first PEM block of `pem` as a DER X.509 certificate.
    ///
    /// # Errors
    /// `InvalidCert` when no PEM block can be decoded or the DER does not
    /// parse as a certificate.
    pub fn from_pem(pem: &[u8]) -> Result<Self, ValidationError> {
        let (_, block) = x509_parser::pem::parse_x509_pem(pem)
            .map_err(|_| ValidationError::invalid_cert("Could not decode the certificate"))?;

        let (_, cert) = x509_parser::parse_x509_certificate(&block.contents)
            .map_err(|e| ValidationError::invalid_cert(format!("invalid certificate DER: {e}")))?;

        Ok(Self {
            spki_der: cert.tbs_certificate.subject_pki.raw.to_vec(),
        })
    }

    /// DER SubjectPublicKeyInfo of the certificate.
    pub fn public_key_der(&self) -> &[u8] {
        &self.spki_der
    }

    /// Decode the RSA public key.
    ///
    /// # Errors
    /// `IncorrectSignature` when the key is not RSA: the certificate parsed,
    /// but it cannot have produced a `SignatureVersion` 1 signature.
    fn rsa_public_key(&self) -> Result<RsaPublicKey, ValidationError> {
        RsaPublicKey::from_public_key_der(&self.spki_der).map_err(|e| {
            ValidationError::incorrect_signature(format!(
                "Incorrect signature: certificate does not carry an RSA public key: {e}"
            ))
        })
    }

    /// Verify an RSA PKCS#1 v1.5 / SHA-1 signature over `signable`.
    ///
    /// # Errors
    /// `IncorrectSignature` with the underlying cryptographic error.
    pub fn verify_sha1_rsa(&self, signable: &[u8], signature: &[u8]) -> Result<(), ValidationError> {
        let verifying_key = pkcs1v15::VerifyingKey::<Sha1>::new(self.rsa_public_key()?);
        let signature = pkcs1v15::Signature::try_from(signature)
            .map_err(|e| ValidationError::incorrect_signature(format!("Incorrect signature: {e}")))?;

        verifying_key
            .verify(signable, &signature)
            .map_err(|e| ValidationError::incorrect_signature(format!("Incorrect signature: {e}")))
    }
}

// =============================================================================
// SIGNATURE DECODING
// =============================================================================

/// Decode the `Signature` field (standard, padded base64).
///
/// Embedded `\r` and `\n` are skipped.
///
/// # Errors
/// `IncorrectSignature` if the value is not valid base64.
pub fn decode_signature(encoded: &str) -> Result<Vec<u8>, ValidationError> {
    let compact: String = encoded.chars().filter(|c| !matches!(c, '\r' | '\n')).collect();

    STANDARD
        .decode(compact)
        .map_err(|_| ValidationError::incorrect_signature("Could not base64 decode the signature"))
}

// =============================================================================
// UNIT TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::ErrorKind;

    const SIGNING_CERT_PEM: &str = include_str!("../../tests/fixtures/signing_cert.pem");
    const EC_SIGNING_CERT_PEM: &str = include_str!("../../tests/fixtures/ec_signing_cert.pem");

    /// RSA/SHA-1 signature over [`SIGNABLE`] made with the fixture key.
    const SIGNATURE: &str = "ol5x/KiU+7dWKRuyD6Y1EntwXo+orXlVgQbq4JDy5uh/+EBBz/mfWQ0X0LXyyxkXXCykDakEz1F0h9y9xV9UitLlYA/tEMzI7WU9ob9d9L8YTCZVaHZUtCu4S0p0eCFzT69q+ijPuH9N1znuZOzDogsJIf8E9/8owtRmi6M50Co=";

    const SIGNABLE: &[u8] = b"Message\nTest notification\n\
        MessageId\n165545c9-2a5c-472c-8df2-7ff2be2b3b1b\n\
        Subject\nTest subject\n\
        Timestamp\n2012-04-26T20:45:04.751Z\n\
        TopicArn\narn:aws:sns:us-west-2:123456789012:MyTopic\n\
        Type\nNotification\n";

    #[test]
    fn test_parse_fixture_certificate() {
        let cert = SigningCertificate::from_pem(SIGNING_CERT_PEM.as_bytes()).unwrap();

        assert!(!cert.public_key_der().is_empty());
    }

    #[test]
    fn test_verify_valid_signature() {
        let cert = SigningCertificate::from_pem(SIGNING_CERT_PEM.as_bytes()).unwrap();
        let signature = decode_signature(SIGNATURE).unwrap();

        assert_eq!(cert.verify_sha1_rsa(SIGNABLE, &signature), Ok(()));
    }

    #[test]
    fn test_verify_tampered_payload() {
        let cert = SigningCertificate::from_pem(SIGNING_CERT_PEM.as_bytes()).unwrap();
        let signature = decode_signature(SIGNATURE).unwrap();
        let mut tampered = SIGNABLE.to_vec();
        tampered[8] ^= 0x01;

        let err = cert.verify_sha1_rsa(&tampered, &signature).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::IncorrectSignature);
        assert!(err.message().starts_with("Incorrect signature: "));
    }

    #[test]
    fn test_verify_short_signature() {
        let cert = SigningCertificate::from_pem(SIGNING_CERT_PEM.as_bytes()).unwrap();
        let signature = decode_signature("aW52YWxpZC1zaWduYXR1cmU=").unwrap();

        let err = cert.verify_sha1_rsa(SIGNABLE, &signature).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::IncorrectSignature);
    }

    #[test]
    fn test_decode_signature_rejects_invalid_base64() {
        for encoded in ["not-base64!!", "EXAMPLEpH+DcEwjAPg8O9mY8dReBSwksfg2S="] {
            let err = decode_signature(encoded).unwrap_err();

            assert_eq!(err.kind(), ErrorKind::IncorrectSignature);
            assert_eq!(err.message(), "Could not base64 decode the signature");
        }
    }

    #[test]
    fn test_decode_signature_skips_line_breaks() {
        let wrapped = decode_signature("aW52YWxp\nZC1zaWduYXR1cmU=\r\n").unwrap();

        assert_eq!(wrapped, b"invalid-signature");
        assert_eq!(wrapped, decode_signature("aW52YWxpZC1zaWduYXR1cmU=").unwrap());
    }

    #[test]
    fn test_non_rsa_certificate_is_incorrect_signature() {
        let cert = SigningCertificate::from_pem(EC_SIGNING_CERT_PEM.as_bytes()).unwrap();
        let signature = decode_signature(SIGNATURE).unwrap();

        let err = cert.verify_sha1_rsa(SIGNABLE, &signature).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::IncorrectSignature);
        assert!(err
            .message()
            .starts_with("Incorrect signature: certificate does not carry an RSA public key"));
    }

    #[test]
    fn test_missing_pem_block() {
        let err = SigningCertificate::from_pem(b"this is not a certificate").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidCert);
        assert_eq!(err.message(), "Could not decode the certificate");
    }

    #[test]
    fn test_pem_block_with_garbage_der() {
        let pem = "-----BEGIN CERTIFICATE-----\nAAECAwQFBgcICQ==\n-----END CERTIFICATE-----\n";

        let err = SigningCertificate::from_pem(pem.as_bytes()).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidCert);
    }
}
