use chunkwise::aes256gcm::ghash::{Ghash, HashKey};
use chunkwise::blake2::{Blake2bCore, Blake2sCore, Params};
use chunkwise::streaming::{CompressionBackend, StreamingState};
use proptest::prelude::*;

fn arb_data() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..2048)
}

fn arb_splits() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0usize..2048, 0..12)
}

/// Feeds `data` split at `splits` and checks the result against the
/// one-shot computation.
fn check_chunking<B: CompressionBackend>(params: &B::Params, data: &[u8], splits: &[usize]) {
    let mut expected = vec![0u8; B::new(params).expect("params").digest_len()];
    StreamingState::<B>::oneshot(params, data, &mut expected).expect("oneshot");

    let mut points: Vec<usize> = splits.iter().map(|s| s % (data.len() + 1)).collect();
    points.push(data.len());
    points.sort_unstable();

    let mut state = StreamingState::<B>::create(params).expect("create");
    let mut prev = 0;
    for point in points {
        state.update(&data[prev..point]).expect("update");
        prev = point;
        assert!(state.buffered().len() <= StreamingState::<B>::buffer_len());
    }
    assert_eq!(state.total_len(), data.len() as u64);
    assert_eq!(state.finish_to_vec().expect("finish"), expected);
}

proptest! {
    #[test]
    fn blake2s_chunking_invariant(data in arb_data(), splits in arb_splits(), keyed in any::<bool>()) {
        let key: &[u8] = if keyed { b"integration key" } else { b"" };
        check_chunking::<Blake2sCore>(&Params::new(32).with_key(key), &data, &splits);
    }

    #[test]
    fn blake2b_chunking_invariant(data in arb_data(), splits in arb_splits(), len in 1usize..=64) {
        check_chunking::<Blake2bCore>(&Params::new(len), &data, &splits);
    }

    #[test]
    fn poly1305_chunking_invariant(data in arb_data(), splits in arb_splits(), key in any::<[u8; 32]>()) {
        check_chunking::<chunkwise::poly1305::Poly1305Core>(&key.into(), &data, &splits);
    }

    #[test]
    fn ghash_chunking_invariant(data in arb_data(), splits in arb_splits(), key in any::<[u8; 16]>()) {
        check_chunking::<Ghash>(&HashKey::from(key), &data, &splits);
    }

    #[test]
    fn aes256gcm_round_trip(
        plaintext in arb_data(),
        aad in prop::collection::vec(any::<u8>(), 0..64),
        key in any::<[u8; 32]>(),
        nonce in any::<[u8; 12]>(),
    ) {
        use chunkwise::aes256gcm::*;

        let ciphertext = aes256gcm_encrypt(&key, &nonce, &plaintext, &aad).expect("encrypt");
        prop_assert_eq!(ciphertext.len(), plaintext.len() + CRYPTO_AEAD_AES256GCM_ABYTES);
        let decrypted = aes256gcm_decrypt(&key, &nonce, &ciphertext, &aad).expect("decrypt");
        prop_assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn aes256gcm_single_bit_flip_rejected(
        plaintext in prop::collection::vec(any::<u8>(), 0..256),
        aad in prop::collection::vec(any::<u8>(), 1..64),
        key in any::<[u8; 32]>(),
        nonce in any::<[u8; 12]>(),
        position in any::<prop::sample::Index>(),
        bit in 0u8..8,
        in_aad in any::<bool>(),
    ) {
        use chunkwise::aes256gcm::*;
        use chunkwise::error::Error;

        let aead = Aes256Gcm::new(&key);
        let mut ciphertext = aead.encrypt(&nonce, &plaintext, &aad).expect("encrypt");
        let mut aad = aad;

        // either the aad or ciphertext-with-tag gets exactly one bit flipped
        let target = if in_aad { &mut aad } else { &mut ciphertext };
        let idx = position.index(target.len());
        target[idx] ^= 1 << bit;

        match aead.decrypt(&nonce, &ciphertext, &aad) {
            Err(Error::AuthenticationFailure) => {}
            other => panic!("flipped bit {} of byte {} accepted: {:?}", bit, idx, other),
        }
    }
}

#[test]
fn test_blake2b_hasher() {
    use chunkwise::blake2b::*;

    let key = Key::gen();
    let mut hasher = Blake2b512::new(Some(key.as_slice())).expect("new");
    for chunk in b"streamed in several pieces".chunks(5) {
        hasher.update(chunk).expect("update");
    }
    let digest: Digest = hasher.finalize().expect("finalize");

    let mut expected = [0u8; BLAKE2B_OUTBYTES];
    hash(&mut expected, b"streamed in several pieces", Some(key.as_slice())).expect("hash");
    assert_eq!(digest.as_slice(), &expected);
}

#[test]
fn test_onetimeauth() {
    use chunkwise::onetimeauth::*;

    let key = Key::gen();
    let mut auth = OnetimeAuth::new(key.clone()).expect("new");
    auth.update(b"authenticate ").expect("update");
    auth.update(b"this").expect("update");
    let mac: Mac = auth.finalize().expect("finalize");

    OnetimeAuth::compute_and_verify(&mac, key, b"authenticate this").expect("verify");
}

#[test]
fn test_aes256gcm() {
    use chunkwise::aes256gcm::*;

    let key = Key::gen();
    let nonce = Nonce::gen();
    let cipher = Aes256Gcm::new(&key);

    let mut ciphertext = cipher
        .encrypt(&nonce, b"hey", b"header")
        .expect("unable to encrypt");
    let decrypted = cipher
        .decrypt(&nonce, &ciphertext, b"header")
        .expect("unable to decrypt");
    assert_eq!(decrypted, b"hey");

    cipher
        .decrypt(&nonce, &ciphertext, b"other header")
        .expect_err("wrong aad");
    ciphertext[0] ^= 1;
    cipher
        .decrypt(&nonce, &ciphertext, b"header")
        .expect_err("tampered ciphertext");
}

#[cfg(feature = "serde")]
#[test]
fn test_key_serde() {
    use chunkwise::aes256gcm::Key;

    let key = Key::gen();
    let json = serde_json::to_string(&key).expect("serialize");
    let decoded: Key = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(key, decoded);
}
