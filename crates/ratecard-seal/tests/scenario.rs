//! End-to-end scenarios over the sample rate card.

use serde_json::json;

use ratecard_seal::{
    add_checksum, canonical_string, compute_checksum, remove_checksum, verify_checksum,
    Algorithm, CertificateIssuer, CertificateRequest, KeyMaterial, RustCryptoBackend,
    SealConfig, Sealer, SignOptions, SignatureInfo, VerifyError,
};
use ratecard_seal_testkit::fixtures::{detailed_rate_card, sample_rate_card, SealFixture};
use ratecard_seal_testkit::generators::permute_keys;
use ratecard_seal_testkit::vectors::{SAMPLE_CHECKSUM, TAMPERED_CHECKSUM};

const SAMPLE_CANONICAL: &str = r#"{"cards":{"default":{"currency":"USD","endpoint":"default","name":"Default","type":"termination"}},"date":"2026-01-12","name":"Test","schema_version":"1.0.0","version":"1.0"}"#;

#[test]
fn sample_canonicalizes_regardless_of_key_order() {
    let card = sample_rate_card();
    for by in 0..5 {
        let permuted = permute_keys(&card, by);
        assert_eq!(canonical_string(&permuted).unwrap(), SAMPLE_CANONICAL);
    }
}

#[test]
fn sample_checksum_is_fixed() {
    let card = sample_rate_card();
    assert_eq!(compute_checksum(&card).unwrap(), SAMPLE_CHECKSUM);

    let tampered = card.with_field("name", json!("Tampered"));
    assert_eq!(compute_checksum(&tampered).unwrap(), TAMPERED_CHECKSUM);
}

#[test]
fn checksum_lifecycle() {
    let card = add_checksum(&sample_rate_card()).unwrap();
    assert_eq!(card.checksum(), Some(SAMPLE_CHECKSUM));

    let check = verify_checksum(&card).unwrap();
    assert!(check.valid);
    assert_eq!(check.expected.as_deref(), Some(SAMPLE_CHECKSUM));

    let tampered = card.with_field("name", json!("Tampered"));
    let check = verify_checksum(&tampered).unwrap();
    assert!(!check.valid);
    assert_eq!(check.actual, TAMPERED_CHECKSUM);

    let removed = remove_checksum(&card);
    let check = verify_checksum(&removed).unwrap();
    assert!(!check.valid);
    assert!(check.expected.is_none());
}

#[test]
fn sample_signs_and_detects_tamper_for_every_algorithm() {
    let card = sample_rate_card();
    for algorithm in Algorithm::ALL {
        let fixture = SealFixture::new(algorithm);
        let signed = fixture.sign(&card);

        let result = fixture.verify(&signed);
        assert!(result.valid, "{algorithm} should verify");
        assert_eq!(result.signature_info.unwrap().algorithm, algorithm.as_str());

        let tampered = signed.with_field("name", json!("Tampered"));
        let result = fixture.verify(&tampered);
        assert!(!result.valid, "{algorithm} should reject tampering");
        assert!(result.error.is_none());
    }
}

#[test]
fn checksum_survives_add_and_remove() {
    let card = sample_rate_card();
    let restored = remove_checksum(&add_checksum(&card).unwrap());
    assert_eq!(compute_checksum(&restored).unwrap(), SAMPLE_CHECKSUM);
    assert_eq!(canonical_string(&restored).unwrap(), SAMPLE_CANONICAL);
}

#[test]
fn resigning_a_signed_card_verifies() {
    let card = sample_rate_card();
    assert!(card.metadata().is_none());
    for algorithm in [Algorithm::ES256, Algorithm::RS256] {
        let fixture = SealFixture::new(algorithm);
        let once = fixture.sign(&card);
        assert!(fixture.verify(&once).valid);

        let twice = fixture.sign_with(&once, &SignOptions::new().key_id("rotated"));
        let result = fixture.verify(&twice);
        assert!(result.valid, "{algorithm} re-signature should verify");
        assert_eq!(
            result.signature_info.unwrap().key_id.as_deref(),
            Some("rotated")
        );
    }
}

#[test]
fn pem_keys_sign_and_verify() {
    for algorithm in [Algorithm::RS384, Algorithm::ES512] {
        let fixture = SealFixture::new(algorithm);
        let pem = fixture.pem();
        let signed = fixture
            .signer
            .sign(
                &sample_rate_card(),
                pem.private_key.as_str(),
                algorithm,
                &SignOptions::new().public_key(pem.public_key.as_str()),
            )
            .unwrap();

        assert!(fixture.verifier.verify_embedded(&signed).valid);
        assert!(fixture
            .verifier
            .verify_with_key(&signed, pem.public_key.as_str())
            .valid);
    }
}

#[test]
fn cross_key_is_rejected() {
    let card = sample_rate_card();
    let es256 = SealFixture::new(Algorithm::ES256);
    let signed = es256.sign(&card);

    // Same algorithm, different key
    let other = es256.signer.key_manager().generate(Algorithm::ES256).unwrap();
    let result = es256.verifier.verify_with_key(&signed, other.public_key);
    assert!(!result.valid);

    // Key from another family
    let rsa = SealFixture::new(Algorithm::RS256);
    let result = es256
        .verifier
        .verify_with_key(&signed, rsa.key_pair().public_key.clone());
    assert!(!result.valid);
    assert!(matches!(result.error, Some(VerifyError::Key(_))));
}

#[test]
fn missing_key_is_reported() {
    let fixture = SealFixture::new(Algorithm::ES256);
    let signed = fixture.sign(&sample_rate_card());
    let result = fixture.verifier.verify_embedded(&signed);
    assert!(!result.valid);
    assert_eq!(result.error, Some(VerifyError::NoPublicKey));
}

#[test]
fn checksum_and_signature_do_not_interfere() {
    let fixture = SealFixture::new(Algorithm::ES256);
    let card = detailed_rate_card();

    // checksum then sign
    let a = fixture.sign(&add_checksum(&card).unwrap());
    assert!(fixture.verify(&a).valid);
    assert!(verify_checksum(&a).unwrap().valid);

    // sign then checksum
    let b = add_checksum(&fixture.sign(&card)).unwrap();
    assert!(fixture.verify(&b).valid);
    assert!(verify_checksum(&b).unwrap().valid);

    // other metadata survives both
    assert_eq!(
        b.metadata().unwrap().get("author"),
        Some(&json!("carrier-ops"))
    );
}

#[test]
fn sealer_end_to_end_with_pem() {
    let sealer = Sealer::new(
        RustCryptoBackend,
        SealConfig {
            algorithm: Algorithm::ES384,
            key_id: Some("carrier-2026".into()),
            pin_algorithm: true,
            ..SealConfig::default()
        },
    );
    let pair = sealer.generate_key_pair().unwrap();
    let pem = sealer.export_pem(&pair).unwrap();

    let sealed = sealer
        .seal(&sample_rate_card(), pem.private_key.as_str(), None)
        .unwrap();
    let info = SignatureInfo::from_document(&sealed).unwrap().unwrap();
    assert_eq!(info.key_id.as_deref(), Some("carrier-2026"));
    assert_eq!(info.public_key.as_deref(), Some(pem.public_key.as_str()));

    let report = sealer.inspect(&sealed, None).unwrap();
    assert!(report.is_intact());
    assert_eq!(report.checksum.expected.as_deref(), Some(SAMPLE_CHECKSUM));

    let report = sealer
        .inspect(
            &sealed.with_field("name", json!("Tampered")),
            Some(KeyMaterial::pem(pem.public_key.clone())),
        )
        .unwrap();
    assert!(!report.is_intact());
}

#[test]
fn certificate_key_seals_documents() {
    let issued = CertificateIssuer::new(RustCryptoBackend)
        .issue(CertificateRequest::new("carrier.example").algorithm(Algorithm::ES256))
        .unwrap();

    let sealer = Sealer::new(RustCryptoBackend, SealConfig::default());
    let sealed = sealer
        .seal(&sample_rate_card(), issued.private_key.as_str(), None)
        .unwrap();
    let result = sealer.verify(
        &sealed,
        Some(KeyMaterial::pem(issued.certificate.public_key.clone())),
    );
    assert!(result.valid);
}
