//! End-to-end coverage of the testable properties in section 8: correctness round-trips,
//! implicit rejection, and the public-surface error paths, across all three parameter sets.
//! No NIST ACVP vectors are available to this build, so these tests check internal consistency
//! (keygen/encaps/decaps agreement, length/modulus validation) rather than known-answer bytes.

use rand_core::{OsRng, SeedableRng};

use ml_kem_rs::traits::{Decaps, Encaps, KeyGen, SerDes};
use ml_kem_rs::{ml_kem_1024, ml_kem_512, ml_kem_768, Error};

macro_rules! round_trip_test {
    ($name:ident, $module:ident) => {
        #[test]
        fn $name() {
            let (ek, dk) = ml_kem_rs::$module::KG::try_keygen_with_rng(&mut OsRng).unwrap();
            let (ssk_enc, ct) = ek.try_encaps_with_rng(&mut OsRng).unwrap();
            let ssk_dec = dk.try_decaps(&ct).unwrap();
            assert_eq!(ssk_enc, ssk_dec);
        }
    };
}

round_trip_test!(ml_kem_512_round_trip, ml_kem_512);
round_trip_test!(ml_kem_768_round_trip, ml_kem_768);
round_trip_test!(ml_kem_1024_round_trip, ml_kem_1024);

macro_rules! deterministic_agreement_test {
    ($name:ident, $module:ident) => {
        #[test]
        fn $name() {
            let d = [0x11u8; 32];
            let z = [0x22u8; 32];
            let m = [0x33u8; 32];
            let (ek, dk) = ml_kem_rs::$module::KG::keygen_from_seed(d, z);
            let (ssk_enc, ct) = ek.encaps_from_seed(&m).unwrap();
            let ssk_dec = dk.try_decaps(&ct).unwrap();
            assert_eq!(ssk_enc, ssk_dec);

            // Same seeds reproduce the same keys and ciphertext.
            let (ek2, _dk2) = ml_kem_rs::$module::KG::keygen_from_seed(d, z);
            assert_eq!(ek.clone().into_bytes(), ek2.into_bytes());
        }
    };
}

deterministic_agreement_test!(ml_kem_512_deterministic_agreement, ml_kem_512);
deterministic_agreement_test!(ml_kem_768_deterministic_agreement, ml_kem_768);
deterministic_agreement_test!(ml_kem_1024_deterministic_agreement, ml_kem_1024);

#[test]
fn tampered_ciphertext_triggers_implicit_rejection_not_an_error() {
    let (ek, dk) = ml_kem_512::KG::try_keygen_with_rng(&mut OsRng).unwrap();
    let (ssk_enc, ct) = ek.try_encaps_with_rng(&mut OsRng).unwrap();

    let mut ct_bytes = ct.into_bytes();
    *ct_bytes.last_mut().unwrap() ^= 0x01;
    let tampered = ml_kem_512::CipherText::try_from_bytes(ct_bytes).unwrap();

    // Implicit rejection: decaps still returns Ok(_), just not the original shared secret.
    let ssk_dec = dk.try_decaps(&tampered).unwrap();
    assert_ne!(ssk_enc, ssk_dec);
}

#[test]
fn encaps_key_with_out_of_range_coefficient_is_rejected() {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(2);
    let (ek, _dk) = ml_kem_768::KG::try_keygen_with_rng(&mut rng).unwrap();
    let mut ek_bytes = ek.into_bytes();
    ek_bytes[0..384].copy_from_slice(&[0xFFu8; 384]); // every coefficient == 0xFFF >= q
    let res = ml_kem_768::EncapsKey::try_from_bytes(ek_bytes);
    assert_eq!(res.err(), Some(Error::InvalidPublicKey));
}

#[test]
fn decaps_key_with_mismatched_hash_is_rejected() {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(3);
    let (_ek, dk) = ml_kem_1024::KG::try_keygen_with_rng(&mut rng).unwrap();
    let mut dk_bytes = dk.into_bytes();
    let h_start = ml_kem_1024::DK_LEN - 64;
    dk_bytes[h_start] ^= 0xFF;
    let res = ml_kem_1024::DecapsKey::try_from_bytes(dk_bytes);
    assert_eq!(res.err(), Some(Error::InvalidSecretKey));
}
